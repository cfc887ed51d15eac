//! The structured exception value and its serializable view.
//!
//! An [`Exception`] is built once with [`Exception::new`] (or one of the
//! convenience constructors) and configured through chained mutators:
//!
//! ```rust
//! use faultline_core::Exception;
//!
//! let err = Exception::new_for_api("USERNAME_REQUIRED", "username must be filled", 400)
//!     .with_display_message("Please enter a username")
//!     .with_err_type("VALIDATION");
//!
//! assert_eq!(err.to_string(), "USERNAME_REQUIRED: username must be filled");
//! assert_eq!(err.status_code(), 400);
//! ```
//!
//! Mutators always act on the value they are called on; they never copy.
//! `with_*` consumes and returns the value (construction chains) and
//! `set_*` takes `&mut self` and returns it (chains on a value you hold).
//! Call [`Exception::clone`] first when the original must stay untouched.
//!
//! `clone` copies every field, including `metadata` and `stack_trace`, so
//! a clone never shares mutable state with its source. Only `base` is
//! shared, behind an `Arc`, and it is immutable.
//!
//! An exception has no internal lock. It is `Send + Sync` whenever its code
//! type is, but mutating one value from several threads requires the
//! caller's own synchronization.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MessageError;
use crate::stringify::Stringify;

/// Free-form key/value attributes attached to an exception.
pub type Metadata = Map<String, Value>;

/// A wrapped lower-level error.
pub type BaseError = Arc<dyn StdError + Send + Sync + 'static>;

// ─── Exception ────────────────────────────────────────────────────────────────

/// A structured error value identified by a code of type `T`.
#[derive(Debug, Clone)]
pub struct Exception<T> {
    code: T,
    message: String,
    display_message: String,
    err_type: String,
    metadata: Metadata,
    stack_trace: Vec<String>,
    reason: Option<Value>,
    base: Option<BaseError>,
    status_code: i64,
}

impl<T> Exception<T> {
    /// Create an exception with the given code and message.
    ///
    /// Every other field starts empty: no metadata, no display message,
    /// no type, no stack trace, no reason, no base and a zero status code.
    pub fn new(code: T, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            display_message: String::new(),
            err_type: String::new(),
            metadata: Metadata::new(),
            stack_trace: Vec::new(),
            reason: None,
            base: None,
            status_code: 0,
        }
    }

    /// Create an exception wrapping the error that caused it.
    pub fn new_with_base<E>(code: T, message: impl Into<String>, base: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(code, message).with_base(base)
    }

    /// Create an exception carrying a transport status code (e.g. HTTP).
    pub fn new_for_api(code: T, message: impl Into<String>, status_code: i64) -> Self {
        Self::new(code, message).with_status_code(status_code)
    }

    // ── accessors ──

    /// The code identifying this exception.
    pub fn err_code(&self) -> &T {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// User-facing text, empty when unset.
    pub fn display_message(&self) -> &str {
        &self.display_message
    }

    /// Free-text category, empty when unset.
    pub fn err_type(&self) -> &str {
        &self.err_type
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access to the metadata map held by this value.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn stack_trace(&self) -> &[String] {
        &self.stack_trace
    }

    /// The underlying cause payload, if any. Distinct from [`base`](Self::base).
    pub fn reason(&self) -> Option<&Value> {
        self.reason.as_ref()
    }

    /// The wrapped lower-level error, if any.
    pub fn base(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.base.as_deref()
    }

    /// Transport status code; `0` means unset.
    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    // ── in-place mutators ──

    pub fn set_err_type(&mut self, err_type: impl Into<String>) -> &mut Self {
        self.err_type = err_type.into();
        self
    }

    pub fn set_display_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.display_message = message.into();
        self
    }

    /// Replace the whole metadata map. Prior entries are dropped, not merged.
    pub fn set_metadata(&mut self, metadata: Metadata) -> &mut Self {
        self.metadata = metadata;
        self
    }

    /// Insert (or overwrite) a single metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the reason payload. `Value::Null` clears it.
    pub fn set_reason(&mut self, reason: impl Into<Value>) -> &mut Self {
        self.reason = match reason.into() {
            Value::Null => None,
            value => Some(value),
        };
        self
    }

    pub fn set_base<E>(&mut self, base: E) -> &mut Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.base = Some(Arc::new(base));
        self
    }

    /// Set an already shared base error, or clear it with `None`.
    pub fn set_shared_base(&mut self, base: Option<BaseError>) -> &mut Self {
        self.base = base;
        self
    }

    pub fn set_status_code(&mut self, status_code: i64) -> &mut Self {
        self.status_code = status_code;
        self
    }

    pub fn set_stack_trace(&mut self, frames: Vec<String>) -> &mut Self {
        self.stack_trace = frames;
        self
    }

    // ── builder mutators ──

    pub fn with_err_type(mut self, err_type: impl Into<String>) -> Self {
        self.set_err_type(err_type);
        self
    }

    pub fn with_display_message(mut self, message: impl Into<String>) -> Self {
        self.set_display_message(message);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.set_metadata(metadata);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<Value>) -> Self {
        self.set_reason(reason);
        self
    }

    pub fn with_base<E>(mut self, base: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.set_base(base);
        self
    }

    pub fn with_shared_base(mut self, base: Option<BaseError>) -> Self {
        self.set_shared_base(base);
        self
    }

    pub fn with_status_code(mut self, status_code: i64) -> Self {
        self.set_status_code(status_code);
        self
    }

    pub fn with_stack_trace(mut self, frames: Vec<String>) -> Self {
        self.set_stack_trace(frames);
        self
    }
}

impl<T: Clone> Exception<T> {
    /// Shorthand for [`clone`](Clone::clone).
    pub fn c(&self) -> Self {
        self.clone()
    }

    /// Project this exception into its flat, serializable form.
    ///
    /// The base error is kept only as its rendered text.
    pub fn view(&self) -> ExceptionView<T> {
        ExceptionView {
            base: self
                .base
                .as_ref()
                .map(|b| b.to_string())
                .unwrap_or_default(),
            message: self.message.clone(),
            display_message: self.display_message.clone(),
            err_type: self.err_type.clone(),
            err_code: self.code.clone(),
            metadata: self.metadata.clone(),
            stack_trace: self.stack_trace.clone(),
            reason: self.reason.clone(),
            status_code: self.status_code,
        }
    }
}

impl<T: Stringify> fmt::Display for Exception<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.stringify(), self.message)
    }
}

impl<T: Stringify + fmt::Debug> StdError for Exception<T> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.base.as_deref().map(|b| b as &(dyn StdError + 'static))
    }
}

// ─── ExceptionView ────────────────────────────────────────────────────────────

/// Flat, serialization-ready projection of an [`Exception`].
///
/// Empty optional fields are left out of the serialized form; `message` and
/// `errorCode` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionView<T> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_message: String,
    #[serde(rename = "errorType", default, skip_serializing_if = "String::is_empty")]
    pub err_type: String,
    #[serde(rename = "errorCode")]
    pub err_code: T,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Value>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status_code: i64,
}

fn is_zero(status: &i64) -> bool {
    *status == 0
}

impl<T> From<ExceptionView<T>> for Exception<T> {
    fn from(view: ExceptionView<T>) -> Self {
        let base = (!view.base.is_empty())
            .then(|| Arc::new(MessageError(view.base)) as BaseError);
        Self {
            code: view.err_code,
            message: view.message,
            display_message: view.display_message,
            err_type: view.err_type,
            metadata: view.metadata,
            stack_trace: view.stack_trace,
            reason: view.reason.filter(|r| !r.is_null()),
            base,
            status_code: view.status_code,
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
