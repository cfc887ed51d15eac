//! Thread-safe registry of exception templates keyed by code.
//!
//! A [`Manager`] stores one template per code and hands out clones on every
//! read, so callers can mutate what they get back without touching the
//! registered template.
//!
//! A single `RwLock` guards the whole map. Mutations take the write lock,
//! queries take the read lock, and the conflict-checked inserts
//! ([`Manager::safe_add`], [`Manager::safe_add_all`]) hold the write lock
//! across both the check and the insert.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::code::ErrorCode;
use crate::error::ManagerError;
use crate::exception::Exception;

/// Registry for string-coded exceptions.
pub type StrManager = Manager<String>;

/// Registry for integer-coded exceptions.
pub type IntManager = Manager<i64>;

/// Concurrency-guarded store of exception templates.
///
/// Cloning a `Manager` yields another handle onto the same registry.
pub struct Manager<T> {
    inner: Arc<RwLock<HashMap<T, Exception<T>>>>,
}

impl<T> Clone for Manager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ErrorCode> Default for Manager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ErrorCode> Manager<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // Poisoning is ignored: every critical section leaves the map consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<T, Exception<T>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<T, Exception<T>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the entire registry. Prior entries are discarded.
    ///
    /// Each template is stored under its own code; a map key that disagrees
    /// with its value's code is ignored.
    pub fn set(&self, exceptions: HashMap<T, Exception<T>>) -> &Self {
        let mut rekeyed = HashMap::with_capacity(exceptions.len());
        for (key, exception) in exceptions {
            if key != *exception.err_code() {
                tracing::warn!(
                    key = %key.stringify(),
                    code = %exception.err_code().stringify(),
                    "template stored under its own code, not the given key"
                );
            }
            rekeyed.insert(exception.err_code().clone(), exception);
        }
        let mut cache = self.write();
        *cache = rekeyed;
        tracing::debug!(size = cache.len(), "exception registry replaced");
        self
    }

    /// Insert a template, overwriting any template with the same code.
    pub fn add(&self, exception: Exception<T>) -> &Self {
        let code = exception.err_code().clone();
        tracing::debug!(code = %code.stringify(), "exception registered");
        self.write().insert(code, exception);
        self
    }

    /// Insert a template, failing if its code is already registered.
    pub fn safe_add(&self, exception: Exception<T>) -> Result<(), ManagerError> {
        let mut cache = self.write();
        let code = exception.err_code();
        if cache.contains_key(code) {
            tracing::warn!(code = %code.stringify(), "exception already registered");
            return Err(ManagerError::AlreadyExists {
                code: code.stringify(),
            });
        }
        tracing::debug!(code = %code.stringify(), "exception registered");
        cache.insert(code.clone(), exception);
        Ok(())
    }

    /// Insert every template under one lock acquisition, overwriting collisions.
    pub fn add_all<I>(&self, exceptions: I) -> &Self
    where
        I: IntoIterator<Item = Exception<T>>,
    {
        let mut cache = self.write();
        let mut count = 0usize;
        for exception in exceptions {
            cache.insert(exception.err_code().clone(), exception);
            count += 1;
        }
        tracing::debug!(count, "exceptions registered");
        self
    }

    /// Insert every template, or none of them.
    ///
    /// Fails with the first code that is already registered or that appears
    /// twice in `exceptions`; the registry is left unchanged in that case.
    pub fn safe_add_all<I>(&self, exceptions: I) -> Result<(), ManagerError>
    where
        I: IntoIterator<Item = Exception<T>>,
    {
        let batch: Vec<Exception<T>> = exceptions.into_iter().collect();
        let mut cache = self.write();

        let mut seen = HashSet::with_capacity(batch.len());
        for exception in &batch {
            let code = exception.err_code();
            if cache.contains_key(code) || !seen.insert(code) {
                tracing::warn!(code = %code.stringify(), "exception already registered");
                return Err(ManagerError::AlreadyExists {
                    code: code.stringify(),
                });
            }
        }

        let count = batch.len();
        for exception in batch {
            cache.insert(exception.err_code().clone(), exception);
        }
        tracing::debug!(count, "exceptions registered");
        Ok(())
    }

    /// Fetch a clone of the template registered under `code`.
    pub fn get(&self, code: &T) -> Option<Exception<T>> {
        self.read().get(code).cloned()
    }

    /// Clones of every registered template, in no particular order.
    pub fn get_all(&self) -> Vec<Exception<T>> {
        self.read().values().cloned().collect()
    }

    /// Snapshot of every registered code, in no particular order.
    pub fn codes(&self) -> Vec<T> {
        self.read().keys().cloned().collect()
    }

    pub fn size(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn contains(&self, code: &T) -> bool {
        self.read().contains_key(code)
    }

    /// `true` if every code is registered (vacuously `true` for none).
    pub fn contains_all(&self, codes: &[T]) -> bool {
        let cache = self.read();
        codes.iter().all(|code| cache.contains_key(code))
    }

    /// `true` if at least one code is registered.
    pub fn contains_any(&self, codes: &[T]) -> bool {
        let cache = self.read();
        codes.iter().any(|code| cache.contains_key(code))
    }

    /// Remove the template under `code`, returning it if it was present.
    pub fn remove(&self, code: &T) -> Option<Exception<T>> {
        let removed = self.write().remove(code);
        if removed.is_some() {
            tracing::debug!(code = %code.stringify(), "exception removed");
        }
        removed
    }

    /// Remove every template.
    pub fn clear(&self) {
        *self.write() = HashMap::new();
        tracing::debug!("exception registry cleared");
    }
}

impl<T: ErrorCode> std::fmt::Debug for Manager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager").field("size", &self.size()).finish()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
