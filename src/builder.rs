//! Fluent construction for [`Error`].
//!
//! The builder records the same [`ErrorOption`] steps that [`Error::new`]
//! takes and applies them in call order on [`build`](ErrorBuilder::build).
//! It is the more readable form when options depend on local control flow:
//!
//! ```rust
//! use errorx::{Error, ErrorType};
//!
//! # let user_id: Option<i64> = Some(17);
//! let mut builder = Error::builder("Unauthorized").kind(ErrorType::new(2));
//! if let Some(id) = user_id {
//!     builder = builder.int("user_id", id);
//! }
//! let err = builder.caller().build();
//!
//! assert_eq!(err.field("user_id"), Some("17"));
//! assert!(err.field("caller").is_some());
//! ```

use crate::caller::Caller;
use crate::error::Error;
use crate::kind::ErrorType;
use crate::option::{self, ErrorOption};
use smallvec::SmallVec;
use std::error::Error as StdError;
use std::fmt;

/// Ordered recorder of construction steps.
#[must_use = "builders do nothing until `build` is called"]
pub struct ErrorBuilder {
    message: String,
    steps: SmallVec<[ErrorOption; 4]>,
}

impl ErrorBuilder {
    /// Start with a literal message and no steps.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            steps: SmallVec::new(),
        }
    }

    /// Start from `cause`, reusing its display text as the message.
    pub fn wrap<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(cause.to_string()).internal(cause)
    }

    /// Record an arbitrary step.
    #[inline]
    pub fn option(mut self, step: ErrorOption) -> Self {
        self.steps.push(step);
        self
    }

    /// Record several steps in order.
    pub fn options<I>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = ErrorOption>,
    {
        self.steps.extend(steps);
        self
    }

    /// See [`with_internal`](crate::with_internal).
    pub fn internal<E>(self, err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        self.option(option::with_internal(err))
    }

    /// See [`with_any`](crate::with_any).
    pub fn any(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.option(option::with_any(key, value))
    }

    /// See [`with_string`](crate::with_string).
    pub fn string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.option(option::with_string(key, value))
    }

    /// See [`with_int`](crate::with_int).
    pub fn int(self, key: impl Into<String>, value: i64) -> Self {
        self.option(option::with_int(key, value))
    }

    /// Set the classification tag.
    pub fn kind(self, kind: ErrorType) -> Self {
        self.option(option::with_type(kind))
    }

    /// Record the location of the code calling this method.
    #[track_caller]
    pub fn caller(self) -> Self {
        self.option(option::with_caller())
    }

    /// Record the frame `skip` levels above the code calling this method.
    ///
    /// Same resolution rules as [`with_caller_skip`](crate::with_caller_skip).
    #[inline(never)]
    pub fn caller_skip(self, skip: usize) -> Self {
        // One extra level for this method's own frame.
        self.option(option::with_caller_skip(skip.saturating_add(1)))
    }

    /// Record an explicit position.
    pub fn caller_at(self, caller: Caller) -> Self {
        self.option(option::with_caller_at(caller))
    }

    /// Record the stack trace at this call.
    pub fn stacktrace(self) -> Self {
        self.option(option::with_stacktrace())
    }

    /// Apply every recorded step in order.
    pub fn build(self) -> Error {
        Error::new(self.message, self.steps)
    }
}

impl From<ErrorBuilder> for Error {
    #[inline]
    fn from(builder: ErrorBuilder) -> Self {
        builder.build()
    }
}

impl fmt::Debug for ErrorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBuilder")
            .field("message", &self.message)
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl Error {
    /// Start a fluent build with a literal message.
    #[inline]
    pub fn builder(message: impl Into<String>) -> ErrorBuilder {
        ErrorBuilder::new(message)
    }
}
