//! Error types raised by the registry and catalog loader.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while registering exception templates.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A template with this code is already registered (or repeated in the batch).
    #[error("exception ({code}) already exists")]
    AlreadyExists { code: String },

    /// The catalog document is not a valid JSON array of exception views.
    #[error("invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    /// A catalog file is not a valid JSON array of exception views.
    #[error("invalid catalog {}: {source}", .path.display())]
    CatalogFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManagerError {
    /// Returns `true` if this is a duplicate-code conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// A base error that only carries its rendered text.
///
/// Produced when an [`ExceptionView`](crate::ExceptionView) is turned back
/// into an [`Exception`](crate::Exception): the view keeps only the text of
/// the wrapped cause, so that text is all that can be restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MessageError(pub String);

impl MessageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_message_names_the_code() {
        let err = ManagerError::AlreadyExists { code: "E1".into() };
        assert_eq!(err.to_string(), "exception (E1) already exists");
        assert!(err.is_conflict());
    }

    #[test]
    fn catalog_error_is_not_a_conflict() {
        let err: ManagerError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(!err.is_conflict());
        assert!(err.to_string().starts_with("invalid catalog:"));
    }

    #[test]
    fn message_error_displays_its_text() {
        assert_eq!(MessageError::new("db down").to_string(), "db down");
    }
}
