/*!
 * Error handling for credit report extraction
 *
 * Two conditions are fatal: malformed XML and a missing report root. Every
 * other missing field or section resolves to a documented default instead of
 * an error, because bureau documents vary wildly in completeness.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Library result type
pub type Result<T> = std::result::Result<T, InprofileError>;

/// Errors surfaced by the extraction engine
#[derive(Error, Debug)]
pub enum InprofileError {
    /// The input is not well-formed XML
    #[error("XML parsing error: {message}")]
    XmlParse {
        message: String,
    },

    /// The document parsed but the expected report root is absent
    #[error("missing root element '{expected_root}' in credit report document")]
    MissingRoot {
        expected_root: String,
        suggestion: String,
    },

    /// File I/O errors with context
    #[error("I/O error reading '{path}': {message}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File not found with suggestions
    #[error("file not found: {path}")]
    FileNotFound {
        path: PathBuf,
        suggestion: String,
    },
}

impl InprofileError {
    /// Create a missing-root error for the given expected root element
    pub fn missing_root(expected_root: &str) -> Self {
        Self::MissingRoot {
            expected_root: expected_root.to_string(),
            suggestion: format!(
                "The document must contain a top-level <{}> element. \
                Check that the file is an Experian credit report export and not a \
                different bureau format.",
                expected_root
            ),
        }
    }

    /// Create a file not found error with a helpful suggestion
    pub fn file_not_found_with_suggestion(path: PathBuf) -> Self {
        let suggestion = format!(
            "Check if the file exists at '{}'. Make sure the path is correct and \
            you have read permissions.",
            path.display()
        );
        Self::FileNotFound { path, suggestion }
    }

    /// Create an I/O error tied to a file path
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            path,
            source,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingRoot { suggestion, .. } => {
                format!("{}\n\nSuggestion: {}", self, suggestion)
            }
            Self::FileNotFound { suggestion, .. } => {
                format!("{}\n\nSuggestion: {}", self, suggestion)
            }
            _ => self.to_string(),
        }
    }
}

impl From<quick_xml::Error> for InprofileError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for InprofileError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlParse {
            message: err.to_string(),
        }
    }
}
