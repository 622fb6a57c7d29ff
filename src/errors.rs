/*!
 * Error types for the xml-translator application.
 *
 * This module contains custom error types for the dictionary loader, the
 * document tree and the application controller, using the thiserror crate
 * for ergonomic error definitions.
 */

use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading a translation dictionary
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The dictionary file could not be read
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        /// Path of the dictionary file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dictionary file is not valid JSON
    #[error("Invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is valid but not shaped like a dictionary
    #[error("Unexpected dictionary structure: {0}")]
    UnexpectedShape(String),
}

/// Errors that can occur while reading or writing an XML document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read
    #[error("Failed to read document {path}: {source}")]
    Io {
        /// Path of the document file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The XML parser rejected the document
    #[error("Malformed XML at byte {position}: {message}")]
    Parse {
        /// Byte offset the parser had reached
        position: u64,
        /// Parser message
        message: String,
    },

    /// The document bytes do not decode in the declared or detected encoding
    #[error("Cannot decode document as {encoding}: {message}")]
    Encoding {
        /// Encoding name as resolved from the BOM or the declaration
        encoding: String,
        /// What went wrong
        message: String,
    },

    /// The XML is well-formed at the token level but does not form a single tree
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// The tree could not be written out
    #[error("Failed to write document: {0}")]
    Serialize(String),
}

/// Which of the two translation inputs is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// No dictionary loaded, or the loaded dictionary is empty
    Dictionary,
    /// No document selected
    Document,
    /// Neither input is available
    Both,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dictionary => write!(f, "load a non-empty JSON dictionary first"),
            Self::Document => write!(f, "load an XML document first"),
            Self::Both => write!(f, "load a JSON dictionary and an XML document first"),
        }
    }
}

/// Coarse classification of failures as they are reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required session state was absent
    InputMissing,
    /// A dictionary or document could not be read or parsed
    ParseFailure,
    /// The output document could not be written
    SerializeFailure,
    /// Configuration or other unexpected failure
    Other,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Translation was requested before both inputs were loaded
    #[error("Missing input: {0}")]
    InputMissing(MissingInput),

    /// Error from the dictionary loader
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Error from document parsing or serialization
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Classify the error for user-facing reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputMissing(_) => ErrorKind::InputMissing,
            Self::Dictionary(_) => ErrorKind::ParseFailure,
            Self::Document(DocumentError::Serialize(_)) => ErrorKind::SerializeFailure,
            Self::Document(_) => ErrorKind::ParseFailure,
            Self::Config(_) | Self::File(_) | Self::Unknown(_) => ErrorKind::Other,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
