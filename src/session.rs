/*!
 * Translation session state.
 *
 * A session carries the two inputs of a translation run: the dictionary for
 * the selected language and the path of the document to translate. Loading
 * operations consume a session and return the updated one; a failed load
 * simply hands back the previous value.
 */

use std::path::{Path, PathBuf};

use crate::dictionary::TranslationMap;
use crate::errors::{AppError, MissingInput};

/// Inputs collected for a translation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    translation_map: Option<TranslationMap>,
    document_path: Option<PathBuf>,
}

impl Session {
    /// Create a session with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dictionary wholesale
    pub fn with_dictionary(self, map: TranslationMap) -> Self {
        Self {
            translation_map: Some(map),
            ..self
        }
    }

    /// Record the document path without reading the file
    pub fn with_document<P: Into<PathBuf>>(self, path: P) -> Self {
        Self {
            document_path: Some(path.into()),
            ..self
        }
    }

    pub fn translation_map(&self) -> Option<&TranslationMap> {
        self.translation_map.as_ref()
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document_path.as_deref()
    }

    /// Both inputs, or which of them is missing.
    ///
    /// An empty dictionary counts as missing, as does an empty path.
    pub fn require_inputs(&self) -> Result<(&TranslationMap, &Path), AppError> {
        let map = self.translation_map.as_ref().filter(|map| !map.is_empty());
        let path = self
            .document_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty());

        match (map, path) {
            (Some(map), Some(path)) => Ok((map, path)),
            (None, Some(_)) => Err(AppError::InputMissing(MissingInput::Dictionary)),
            (Some(_), None) => Err(AppError::InputMissing(MissingInput::Document)),
            (None, None) => Err(AppError::InputMissing(MissingInput::Both)),
        }
    }
}
