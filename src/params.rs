//! Named-parameter registry shared by the specification types.
//!
//! Each specification type owns a static [`ParamTable`] that maps the exact
//! parameter strings accepted by `set_param`/`get_param` onto typed slots.
//! A lookup is keyed by both name and [`ParamKind`], so a name registered as a
//! float is unknown to the integer setter and vice versa.
//!
//! # Examples
//!
//! ```
//! use connspec::params::{ParamKind, ParamTable};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Slot { Gain, Offset }
//!
//! static TABLE: ParamTable<Slot> = ParamTable::new(
//!     "amplifier",
//!     &[("gain", ParamKind::Int, Slot::Gain), ("offset", ParamKind::Float, Slot::Offset)],
//! );
//!
//! assert_eq!(TABLE.lookup("gain", ParamKind::Int).unwrap(), Slot::Gain);
//! assert!(TABLE.lookup("gain", ParamKind::Float).is_err());
//! assert!(TABLE.lookup("bias", ParamKind::Int).is_err());
//! ```

use crate::{ConnSpecError, Result};

/// Value kind accepted by a named parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Integer-valued (enumerations, counts, channel indices)
    Int,
    /// Floating-point scalar
    Float,
    /// Borrowed per-connection array
    Array,
}

/// Tagged parameter value for the single-entry-point setters.
///
/// The `Array` variant borrows the caller's buffer; it is never copied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue<'a> {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f32),
    /// Borrowed per-connection values
    Array(&'a [f32]),
}

impl<'a> ParamValue<'a> {
    /// Kind tag of this value.
    #[inline]
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Array(_) => ParamKind::Array,
        }
    }

    /// Integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Float payload, if this is a `Float`.
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Array payload, if this is an `Array`.
    pub fn as_array(&self) -> Option<&'a [f32]> {
        match *self {
            ParamValue::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue<'_> {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f32> for ParamValue<'_> {
    fn from(v: f32) -> Self {
        ParamValue::Float(v)
    }
}

impl<'a> From<&'a [f32]> for ParamValue<'a> {
    fn from(v: &'a [f32]) -> Self {
        ParamValue::Array(v)
    }
}

/// Static name-to-slot mapping for one specification type.
pub struct ParamTable<S: 'static> {
    target: &'static str,
    entries: &'static [(&'static str, ParamKind, S)],
}

impl<S: Copy + 'static> ParamTable<S> {
    /// Create a table. `target` names the owning type in error messages.
    pub const fn new(target: &'static str, entries: &'static [(&'static str, ParamKind, S)]) -> Self {
        Self { target, entries }
    }

    /// Resolve `name` for a value of `kind`.
    ///
    /// Fails with `UnknownParameter` when the name is absent or registered
    /// under a different kind.
    pub fn lookup(&self, name: &str, kind: ParamKind) -> Result<S> {
        self.entries
            .iter()
            .find(|(n, k, _)| *n == name && *k == kind)
            .map(|&(_, _, slot)| slot)
            .ok_or_else(|| self.unknown(name))
    }

    /// Resolve `name` regardless of kind, returning the registered kind too.
    pub fn lookup_any(&self, name: &str) -> Result<(ParamKind, S)> {
        self.entries
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, kind, slot)| (kind, slot))
            .ok_or_else(|| self.unknown(name))
    }

    /// Pass `result` through, logging a warning if the access was rejected.
    pub(crate) fn report<T>(&self, name: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            tracing::warn!(target_type = self.target, name, error = %err, "parameter rejected");
        }
        result
    }

    fn unknown(&self, name: &str) -> ConnSpecError {
        ConnSpecError::UnknownParameter {
            target: self.target,
            name: name.to_string(),
        }
    }
}

/// Convert a signed count to `usize`, rejecting negatives.
pub(crate) fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        ConnSpecError::InvalidArgument(format!("{} must be non-negative, got {}", name, value))
    })
}
