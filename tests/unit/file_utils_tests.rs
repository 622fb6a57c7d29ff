/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use xml_translator::file_utils::FileManager;
use crate::common;

/// Test that dir_exists only accepts directories
#[test]
fn test_dir_exists_shouldRejectFilesAndMissingPaths() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "page.xml", "<a/>")?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&test_file));
    assert!(!FileManager::dir_exists(temp_dir.path().join("missing")));
    Ok(())
}

/// Test that nested inputs keep their relative directory under the output root
#[test]
fn test_mirrored_output_dir_withNestedInput_shouldKeepRelativePath() {
    let root = Path::new("pages");

    assert_eq!(FileManager::mirrored_output_dir("pages/a/index.xml", root, "out"), Path::new("out/a"));
    assert_eq!(FileManager::mirrored_output_dir("pages/b/c/index.xml", root, "out"), Path::new("out/b/c"));
    assert_eq!(FileManager::mirrored_output_dir("pages/index.xml", root, "out"), Path::new("out"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/menu.xml");
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "RU", "xml");

    assert_eq!(output_path, Path::new("/tmp/output/menu.ru.xml"));
}

/// Test that a leading dot in the extension is tolerated
#[test]
fn test_generate_output_path_withDottedExtension_shouldNotDoubleDot() {
    let output_path = FileManager::generate_output_path("menu.xml", "out", "EN", ".xml");
    assert_eq!(output_path, Path::new("out/menu.en.xml"));
}

/// Test recognition of files written by a previous run
#[test]
fn test_is_translation_output_shouldMatchLanguageSuffixOnly() {
    let languages = vec!["RU".to_string(), "EN".to_string()];

    assert!(FileManager::is_translation_output("pages/menu.ru.xml", &languages));
    assert!(FileManager::is_translation_output("menu.EN.xml", &languages));
    assert!(!FileManager::is_translation_output("menu.xml", &languages));
    assert!(!FileManager::is_translation_output("menu.de.xml", &languages));
    assert!(!FileManager::is_translation_output(".ru.xml", &languages));
}

/// Test recursive search by extension
#[test]
fn test_find_files_withNestedDirectories_shouldFindMatchingExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    std::fs::create_dir_all(&nested)?;

    common::create_test_file(temp_dir.path(), "a.xml", "<a/>")?;
    common::create_test_file(&nested, "b.XML", "<b/>")?;
    common::create_test_file(temp_dir.path(), "c.json", "{}")?;

    let files = FileManager::find_files(temp_dir.path(), "xml")?;

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|p| p.extension().unwrap().eq_ignore_ascii_case("xml")));
    Ok(())
}
