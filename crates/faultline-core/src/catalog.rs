//! Loading exception templates from JSON catalogs.
//!
//! A catalog is a JSON array of [`ExceptionView`] objects, the same shape
//! [`Exception::view`] serializes to:
//!
//! ```json
//! [
//!   { "errorCode": "USERNAME_REQUIRED", "message": "username must be filled", "statusCode": 400 },
//!   { "errorCode": "SERVER_ERROR", "message": "internal server error", "statusCode": 500 }
//! ]
//! ```
//!
//! Catalogs are registered all-or-nothing: a code that is already present,
//! or repeated inside the catalog, rejects the whole document.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::code::ErrorCode;
use crate::error::ManagerError;
use crate::exception::{Exception, ExceptionView};
use crate::manager::Manager;

/// Parse a catalog document into exception templates.
pub fn parse_catalog<T: DeserializeOwned>(json: &str) -> Result<Vec<Exception<T>>, ManagerError> {
    let views: Vec<ExceptionView<T>> = serde_json::from_str(json)?;
    Ok(views.into_iter().map(Exception::from).collect())
}

impl<T: ErrorCode + DeserializeOwned> Manager<T> {
    /// Register every template in a JSON catalog string.
    ///
    /// Returns the number of templates added.
    pub fn load_json(&self, json: &str) -> Result<usize, ManagerError> {
        let templates = parse_catalog::<T>(json)?;
        let count = templates.len();
        self.safe_add_all(templates)?;
        Ok(count)
    }

    /// Register every template in a JSON catalog file.
    pub fn load_file(&self, path: &Path) -> Result<usize, ManagerError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManagerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.load_json(&content).map_err(|e| match e {
            ManagerError::Catalog(source) => ManagerError::CatalogFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), count, "exception catalog loaded");
        Ok(count)
    }
}
