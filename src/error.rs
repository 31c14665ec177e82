//! The error value: message, resolved root cause, ordered fields and a tag.
//!
//! # Shape
//!
//! An [`Error`] is always flat. Wrapping a previous `Error` does not nest it;
//! instead its fields are copied in and its root cause is carried over:
//!
//! ```text
//! e1 = new("a", [internal(conn refused), int(id, 7)])
//!        message  = "a"
//!        internal = conn refused
//!        fields   = [id=7]
//!
//! e2 = new("b", [internal(e1), string(op, load)])
//!        message  = "b"
//!        internal = conn refused        <- e1's root, not e1
//!        fields   = [id=7, op=load]     <- e1's fields first
//! ```
//!
//! When the wrapped `Error` has no cause of its own, its message becomes the
//! root cause as a [`MessageError`].
//!
//! # Identification
//!
//! [`as_error`] finds an `Error` anywhere in a `source()` chain, so values
//! that were further wrapped by unrelated error types are still recognised.
//!
//! # Memory
//!
//! The message and every owned field are zeroized on drop.

use crate::field::{Field, Fields};
use crate::kind::ErrorType;
use crate::option::ErrorOption;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Shared handle to a root cause.
///
/// Shared so that every `Error` built on top of the same failure points at
/// the same object, which keeps identity comparisons meaningful.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Structured error value.
///
/// Built once through [`Error::new`], [`Error::wrap`] or
/// [`ErrorBuilder`](crate::ErrorBuilder) and read-only afterwards.
#[derive(Clone)]
#[must_use = "errors should be handled or logged"]
pub struct Error {
    pub(crate) message: String,
    pub(crate) internal: Option<Cause>,
    pub(crate) fields: Fields,
    pub(crate) kind: ErrorType,
}

impl Error {
    /// Create an error from a literal message, then apply `options` in order.
    ///
    /// ```rust
    /// use errorx::{Error, with_int, with_internal};
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "conn refused");
    /// let err = Error::new("db failed", [with_internal(io), with_int("id", 7)]);
    ///
    /// assert_eq!(err.to_string(), "db failed");
    /// assert_eq!(err.internal().unwrap().to_string(), "conn refused");
    /// assert_eq!(err.fields()[0].as_pair(), ("id", "7"));
    /// ```
    pub fn new<I>(message: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = ErrorOption>,
    {
        let mut err = Self::bare(message.into());
        for option in options {
            option.apply(&mut err);
        }
        err
    }

    /// Wrap `cause`, reusing its display text as the message.
    ///
    /// Equivalent to `Error::new(cause.to_string(), [with_internal(cause), options...])`.
    /// Wrapping another `Error` therefore keeps its message, fields and root
    /// cause, and adds whatever `options` contribute.
    pub fn wrap<E, I>(cause: E, options: I) -> Self
    where
        E: StdError + Send + Sync + 'static,
        I: IntoIterator<Item = ErrorOption>,
    {
        let message = cause.to_string();
        Self::new(
            message,
            std::iter::once(ErrorOption::Internal(Box::new(cause))).chain(options),
        )
    }

    #[inline]
    pub(crate) fn bare(message: String) -> Self {
        Self {
            message,
            internal: None,
            fields: Fields::new(),
            kind: ErrorType::UNSET,
        }
    }

    /// Display message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Resolved root cause, if any. Never another `Error`.
    #[inline]
    pub fn internal(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.internal.as_deref()
    }

    /// Shared handle to the root cause.
    #[inline]
    pub fn internal_shared(&self) -> Option<&Cause> {
        self.internal.as_ref()
    }

    /// Flattened fields in insertion order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the first field named `key`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key() == key)
            .map(Field::value)
    }

    /// Classification tag.
    #[inline]
    pub const fn kind(&self) -> ErrorType {
        self.kind
    }

    /// Root cause to carry over when this error gets wrapped.
    pub(crate) fn root_cause(&self) -> Cause {
        match &self.internal {
            Some(cause) => Arc::clone(cause),
            None => Arc::new(MessageError::new(self.message.clone())),
        }
    }
}

impl Drop for Error {
    fn drop(&mut self) {
        self.message.zeroize();
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Error");
        d.field("message", &self.message);
        if let Some(internal) = &self.internal {
            d.field("internal", &format_args!("{}", internal));
        }
        if !self.kind.is_unset() {
            d.field("type", &self.kind);
        }
        if !self.fields.is_empty() {
            d.field("fields", &self.fields.as_slice());
        }
        d.finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.internal
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Find the first [`Error`] in `err`'s `source()` chain, `err` included.
///
/// ```rust
/// use errorx::{as_error, Error};
///
/// let err = Error::new("not found", []);
/// let io = std::io::Error::other(err);
///
/// let found = as_error(io.get_ref().unwrap()).unwrap();
/// assert_eq!(found.message(), "not found");
/// ```
pub fn as_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    let mut current = Some(err);
    while let Some(candidate) = current {
        if let Some(found) = candidate.downcast_ref::<Error>() {
            return Some(found);
        }
        current = candidate.source();
    }
    None
}

// ============================================================================
// Message-only cause
// ============================================================================

/// Plain failure carrying only text.
///
/// Stands in as the root cause when an `Error` without a cause of its own is
/// wrapped. Holds a copy of that message, so it is zeroized on drop too.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct MessageError(String);

impl MessageError {
    /// Wrap `message`.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The carried text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageError").field(&self.0).finish()
    }
}

impl StdError for MessageError {}
