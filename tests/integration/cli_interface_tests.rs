/*!
 * Integration tests for the command-line user interface
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use xml_translator::app_config::Config;
use xml_translator::app_controller::{Controller, Notification, TranslateOutcome, UserInterface};
use xml_translator::cli_interface::{translate_folder, ConsoleInterface, FolderSummary, OutputTarget};
use xml_translator::session::Session;
use crate::common;

/// Test that controller creation rejects an invalid configuration
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.languages.clear();

    assert!(Controller::with_config(config, ConsoleInterface::new("RU", false)).is_err());
}

/// Test the default output naming next to the source document
#[test]
fn test_outputPathFor_withDefaultTarget_shouldPlaceBesideDocument() {
    let ui = ConsoleInterface::new("RU", false);

    let path = ui.output_path_for(Path::new("/data/page.xml"), "xml");

    assert_eq!(path, Path::new("/data/page.ru.xml"));
}

/// Test explicit file and directory targets
#[test]
fn test_outputPathFor_withExplicitTargets_shouldHonourThem() {
    let mut ui = ConsoleInterface::new("EN", false);

    ui.set_output(OutputTarget::File("out.xml".into()));
    assert_eq!(ui.output_path_for(Path::new("page.xml"), "xml"), Path::new("out.xml"));

    ui.set_output(OutputTarget::Directory("translated".into()));
    assert_eq!(ui.output_path_for(Path::new("src/page.xml"), "xml"), Path::new("translated/page.en.xml"));
}

/// Test that an existing output is only replaced when forced
#[test]
fn test_pickSavePath_withExistingOutput_shouldRequireForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let document = common::create_test_document(temp_dir.path(), "page.xml")?;
    common::create_test_file(temp_dir.path(), "page.ru.xml", "<old/>")?;

    let mut polite = ConsoleInterface::new("RU", false);
    assert_eq!(polite.pick_save_path(&document, "xml"), None);

    let mut forced = ConsoleInterface::new("RU", true);
    assert_eq!(forced.pick_save_path(&document, "xml"), Some(temp_dir.path().join("page.ru.xml")));
    Ok(())
}

/// Test that warnings and errors are counted
#[test]
fn test_notify_shouldCountProblemsOnly() {
    let mut ui = ConsoleInterface::new("RU", false);

    ui.notify(Notification::info("Success", "XML loaded!"));
    ui.notify(Notification::warning("Error", "load a JSON dictionary first"));
    ui.notify(Notification::error("Error", "Malformed XML"));

    assert_eq!(ui.problem_count(), 2);
}

/// Test a full command-line style run with default output naming
#[test]
fn test_consoleRun_withDefaults_shouldWriteLanguageSuffixedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let document = common::create_test_document(temp_dir.path(), "page.xml")?;

    let mut ui = ConsoleInterface::new("RU", false);
    ui.set_dictionary(&dictionary);
    ui.set_document(&document);
    let mut controller = Controller::with_config(Config::default(), ui)?;

    let session = controller.load_dictionary(Session::new());
    let session = controller.load_document(session);
    let outcome = controller.translate(&session);

    let expected = temp_dir.path().join("page.ru.xml");
    assert!(matches!(outcome, TranslateOutcome::Written { ref path, .. } if *path == expected));
    assert!(fs::read_to_string(&expected)?.contains("<a>Привет</a>"));
    assert_eq!(controller.ui().problem_count(), 0);

    // A second run without force leaves the first output alone
    fs::write(&expected, "<kept/>")?;
    assert_eq!(controller.translate(&session), TranslateOutcome::Cancelled);
    assert_eq!(fs::read_to_string(&expected)?, "<kept/>");
    Ok(())
}

/// Builds a controller with the sample dictionary already loaded
fn folder_controller(dictionary: &Path, force: bool) -> Result<(Controller<ConsoleInterface>, Session)> {
    let mut ui = ConsoleInterface::new("RU", force);
    ui.set_dictionary(dictionary);
    let mut controller = Controller::with_config(Config::default(), ui)?;
    let session = controller.load_dictionary(Session::new());
    Ok((controller, session))
}

/// Test that same-named documents in sibling directories get separate outputs
#[test]
fn test_translateFolder_withOutputDir_shouldMirrorSubdirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let pages = temp_dir.path().join("pages");
    fs::create_dir_all(pages.join("a"))?;
    fs::create_dir_all(pages.join("b"))?;
    common::create_test_file(&pages.join("a"), "index.xml", "<r>Hello</r>")?;
    common::create_test_file(&pages.join("b"), "index.xml", "<r>Save</r>")?;
    let out = temp_dir.path().join("out");

    let (mut controller, session) = folder_controller(&dictionary, false)?;
    let summary = translate_folder(&mut controller, session, &pages, Some(out.as_path()))?;

    assert_eq!(summary, FolderSummary { written: 2, skipped: 0, failed: 0 });
    assert!(fs::read_to_string(out.join("a").join("index.ru.xml"))?.ends_with("<r>Привет</r>"));
    assert!(fs::read_to_string(out.join("b").join("index.ru.xml"))?.ends_with("<r>Сохранить</r>"));
    assert!(!out.join("index.ru.xml").exists());
    Ok(())
}

/// Test that a folder run beside the sources skips earlier outputs and counts failures
#[test]
fn test_translateFolder_withoutOutputDir_shouldSkipPreviousOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let pages = temp_dir.path().join("pages");
    fs::create_dir_all(&pages)?;
    common::create_test_document(&pages, "page.xml")?;
    common::create_test_file(&pages, "broken.xml", "<r><a></r>")?;
    common::create_test_file(&pages, "old.ru.xml", "<kept/>")?;

    let (mut controller, session) = folder_controller(&dictionary, false)?;
    let summary = translate_folder(&mut controller, session, &pages, None)?;

    assert_eq!(summary, FolderSummary { written: 1, skipped: 0, failed: 1 });
    assert_eq!(summary.total(), 2);
    assert!(pages.join("page.ru.xml").exists());
    assert_eq!(fs::read_to_string(pages.join("old.ru.xml"))?, "<kept/>");
    Ok(())
}
