/*!
 * Non-interactive user interface used by the command-line binary.
 *
 * File "pickers" answer with paths given on the command line and
 * notifications go to the log. Saving over an existing file requires
 * `force_overwrite`; otherwise the save is declined like a cancelled dialog.
 * Directory runs go through [`translate_folder`].
 */

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_controller::{Controller, Notification, NotificationLevel, TranslateOutcome, UserInterface};
use crate::file_utils::FileManager;
use crate::session::Session;

/// Where translated documents are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `<stem>.<lang>.<ext>` next to the source document
    Beside,
    /// Exactly this file
    File(PathBuf),
    /// `<stem>.<lang>.<ext>` inside this directory
    Directory(PathBuf),
}

/// Command-line implementation of [`UserInterface`]
#[derive(Debug)]
pub struct ConsoleInterface {
    dictionary: Option<PathBuf>,
    document: Option<PathBuf>,
    output: OutputTarget,
    language: String,
    force_overwrite: bool,
    problems: usize,
}

impl ConsoleInterface {
    pub fn new(language: impl Into<String>, force_overwrite: bool) -> Self {
        Self {
            dictionary: None,
            document: None,
            output: OutputTarget::Beside,
            language: language.into(),
            force_overwrite,
            problems: 0,
        }
    }

    pub fn set_dictionary(&mut self, path: impl Into<PathBuf>) {
        self.dictionary = Some(path.into());
    }

    pub fn set_document(&mut self, path: impl Into<PathBuf>) {
        self.document = Some(path.into());
    }

    pub fn set_output(&mut self, output: OutputTarget) {
        self.output = output;
    }

    /// Language code used in generated output names
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Number of warnings and errors shown so far
    pub fn problem_count(&self) -> usize {
        self.problems
    }

    /// Destination for `document` before the overwrite check
    pub fn output_path_for(&self, document: &Path, default_extension: &str) -> PathBuf {
        match &self.output {
            OutputTarget::File(path) => path.clone(),
            OutputTarget::Directory(dir) => {
                FileManager::generate_output_path(document, dir, &self.language, default_extension)
            }
            OutputTarget::Beside => {
                let dir = document.parent().unwrap_or(Path::new("."));
                FileManager::generate_output_path(document, dir, &self.language, default_extension)
            }
        }
    }
}

impl UserInterface for ConsoleInterface {
    fn pick_dictionary_path(&mut self) -> Option<PathBuf> {
        self.dictionary.clone()
    }

    fn pick_document_path(&mut self) -> Option<PathBuf> {
        self.document.clone()
    }

    fn pick_save_path(&mut self, document: &Path, default_extension: &str) -> Option<PathBuf> {
        let target = self.output_path_for(document, default_extension);

        if target.exists() && !self.force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", target);
            return None;
        }

        Some(target)
    }

    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!("{}", notification.message),
            NotificationLevel::Warning => {
                self.problems += 1;
                warn!("{}", notification.message);
            }
            NotificationLevel::Error => {
                self.problems += 1;
                error!("{}", notification.message);
            }
        }
    }
}

/// Counts from translating a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl FolderSummary {
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed
    }
}

/// Translate every document under `input_dir`, skipping earlier outputs.
///
/// With `output_dir`, each document's path relative to `input_dir` is
/// recreated under it. Otherwise outputs are written beside their sources.
pub fn translate_folder(
    controller: &mut Controller<ConsoleInterface>,
    mut session: Session,
    input_dir: &Path,
    output_dir: Option<&Path>,
) -> Result<FolderSummary> {
    let start_time = std::time::Instant::now();
    let languages = controller.config().languages.clone();
    let extension = controller.config().output.default_extension.clone();

    let files: Vec<PathBuf> = FileManager::find_files(input_dir, &extension)?
        .into_iter()
        .filter(|path| !FileManager::is_translation_output(path, &languages))
        .collect();

    let mut summary = FolderSummary::default();
    if files.is_empty() {
        warn!("No .{} files found in {:?}", extension, input_dir);
        return Ok(summary);
    }

    info!("Translating {} documents in {:?}", files.len(), input_dir);

    let progress_bar = ProgressBar::new(files.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));

    for file in &files {
        progress_bar.set_message(file.file_name().unwrap_or_default().to_string_lossy().to_string());

        if let Some(root) = output_dir {
            let target_dir = FileManager::mirrored_output_dir(file, input_dir, root);
            std::fs::create_dir_all(&target_dir)
                .with_context(|| format!("Failed to create output directory: {:?}", target_dir))?;
            controller.ui_mut().set_output(OutputTarget::Directory(target_dir));
        }

        controller.ui_mut().set_document(file);
        session = controller.load_document(session);
        match controller.translate(&session) {
            TranslateOutcome::Written { .. } => summary.written += 1,
            TranslateOutcome::Cancelled => summary.skipped += 1,
            TranslateOutcome::Failed(_) => summary.failed += 1,
        }

        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    info!(
        "Finished in {:.1}s: {} translated, {} skipped, {} failed",
        start_time.elapsed().as_secs_f64(),
        summary.written,
        summary.skipped,
        summary.failed
    );

    Ok(summary)
}
