//! The bound every exception code type satisfies.

use std::hash::Hash;

use crate::stringify::Stringify;

/// An identifier usable as an exception code and registry key.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Stringify` type, so
/// `String`, `&'static str`, `i32`, `i64` and similar work out of the box.
/// Custom enums opt in by implementing [`Stringify`].
pub trait ErrorCode: Clone + Eq + Hash + Stringify {}

impl<T: Clone + Eq + Hash + Stringify> ErrorCode for T {}
