//! faultline-core — structured exception values and a template registry.
//!
//! This crate defines:
//! - [`Exception`] — an error value with a code, message, display message,
//!   metadata, optional cause and status code
//! - [`ExceptionView`] — its flat, serializable projection
//! - [`Manager`] — a thread-safe registry of exception templates keyed by code
//! - [`Stringify`] — how a code renders inside `Display` output
//!
//! # Quick Start
//!
//! ```rust
//! use faultline_core::{Exception, StrManager};
//!
//! let manager = StrManager::new();
//! manager.add(Exception::new_for_api("SERVER_ERROR".to_string(), "internal server error", 500));
//!
//! let mut err = manager.get(&"SERVER_ERROR".to_string()).unwrap();
//! err.set_display_message("Try again later");
//!
//! // The registered template is untouched.
//! assert_eq!(manager.get(&"SERVER_ERROR".to_string()).unwrap().display_message(), "");
//! ```

pub mod catalog;
pub mod code;
pub mod error;
pub mod exception;
pub mod manager;
pub mod stringify;

pub use catalog::parse_catalog;
pub use code::ErrorCode;
pub use error::{ManagerError, MessageError};
pub use exception::{BaseError, Exception, ExceptionView, Metadata};
pub use manager::{IntManager, Manager, StrManager};
pub use stringify::{stringify, Stringify};
