use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::dictionary::TranslationMap;
use crate::document::DocumentTree;
use crate::errors::{AppError, ErrorKind};
use crate::language_utils::{display_label, LanguageSelector};
use crate::session::Session;
use crate::substitution::{substitute, SubstitutionReport};

// @module: Application controller for dictionary-driven XML translation

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, title: title.into(), message: message.into() }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Warning, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, title: title.into(), message: message.into() }
    }
}

/// The user-facing surface the controller talks to.
///
/// Returning `None` from a picker means the user cancelled.
pub trait UserInterface {
    /// Ask for the dictionary file to open
    fn pick_dictionary_path(&mut self) -> Option<PathBuf>;

    /// Ask for the XML document to open
    fn pick_document_path(&mut self) -> Option<PathBuf>;

    /// Ask where to save the translated copy of `document`
    fn pick_save_path(&mut self, document: &Path, default_extension: &str) -> Option<PathBuf>;

    /// Show a message to the user
    fn notify(&mut self, notification: Notification);
}

/// Result of a translate request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// The translated document was saved
    Written {
        path: PathBuf,
        report: SubstitutionReport,
    },
    /// The user declined to pick a destination, nothing was written
    Cancelled,
    /// The request failed and was reported to the user
    Failed(ErrorKind),
}

/// Main application controller for XML translation
pub struct Controller<U: UserInterface> {
    // @field: App configuration
    config: Config,
    // @field: Language chosen for dictionary loads
    selector: LanguageSelector,
    // @field: Presentation layer
    ui: U,
}

impl<U: UserInterface> Controller<U> {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, ui: U) -> Result<Self> {
        config.validate()?;
        let selector = LanguageSelector::new(config.languages.iter().cloned())?;

        Ok(Self { config, selector, ui })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Language used by the next dictionary load
    pub fn selected_language(&self) -> &str {
        self.selector.current()
    }

    /// Change the selected language; only configured codes are accepted
    pub fn select_language(&mut self, code: &str) -> Result<()> {
        let selected = self.selector.select(code)?;
        debug!("Selected dictionary language {}", selected);
        Ok(())
    }

    /// Pick a dictionary file and load the selected language from it.
    ///
    /// On cancel or failure the session is returned unchanged.
    pub fn load_dictionary(&mut self, session: Session) -> Session {
        let Some(path) = self.ui.pick_dictionary_path() else {
            debug!("Dictionary selection cancelled");
            return session;
        };

        let language = self.selector.current().to_string();
        match TranslationMap::load(&path, &language, &self.config.dictionary_section) {
            Ok(map) => {
                info!("Loaded {} dictionary entries for {} from {:?}", map.len(), language, path);
                self.ui.notify(Notification::info(
                    "Success",
                    format!(
                        "JSON loaded for language: {} ({} entries)",
                        display_label(&language),
                        map.len()
                    ),
                ));
                session.with_dictionary(map)
            }
            Err(error) => {
                self.report(&AppError::from(error), "Failed to read JSON");
                session
            }
        }
    }

    /// Pick a document and record its path; the file is not read yet
    pub fn load_document(&mut self, session: Session) -> Session {
        let Some(path) = self.ui.pick_document_path() else {
            debug!("Document selection cancelled");
            return session;
        };

        info!("Selected document {:?}", path);
        self.ui.notify(Notification::info("Success", "XML loaded!"));
        session.with_document(path)
    }

    /// Translate the session's document and save the result where the user asks.
    ///
    /// Every failure is reported through the user interface; the session is
    /// never modified.
    pub fn translate(&mut self, session: &Session) -> TranslateOutcome {
        match self.try_translate(session) {
            Ok(outcome) => outcome,
            Err(error) => {
                let kind = error.kind();
                let context = match kind {
                    ErrorKind::InputMissing => "Cannot translate",
                    _ => "Translation failed",
                };
                self.report(&error, context);
                TranslateOutcome::Failed(kind)
            }
        }
    }

    fn try_translate(&mut self, session: &Session) -> Result<TranslateOutcome, AppError> {
        let (map, document) = session.require_inputs()?;

        let mut tree = DocumentTree::from_path(document)?;
        let report = substitute(&mut tree, map, &self.config.substitution);
        info!(
            "Replaced {} texts and {} attributes in {:?}",
            report.texts_replaced, report.attributes_replaced, document
        );

        let Some(destination) = self.ui.pick_save_path(document, &self.config.output.default_extension) else {
            info!("No destination chosen, translation discarded");
            return Ok(TranslateOutcome::Cancelled);
        };

        tree.write_to_path(&destination)?;
        self.ui.notify(Notification::info(
            "Success",
            format!("XML translated! Saved to {}", destination.display()),
        ));

        Ok(TranslateOutcome::Written { path: destination, report })
    }

    fn report(&mut self, error: &AppError, context: &str) {
        debug!("{}: {:?}", context, error);
        let notification = match error.kind() {
            ErrorKind::InputMissing => Notification::warning("Error", format!("{}: {}", context, error)),
            _ => Notification::error("Error", format!("{}: {}", context, error)),
        };
        self.ui.notify(notification);
    }
}
