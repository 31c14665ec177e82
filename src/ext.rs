//! Annotating `Result`s from other libraries.

use crate::error::Error;
use crate::option::{ErrorOption, with_internal};
use std::error::Error as StdError;

/// Lift any `Result<T, E>` into `Result<T, Error>`.
///
/// Options are evaluated before the call, on the success path as well, so
/// keep expensive ones ([`with_stacktrace`](crate::with_stacktrace),
/// [`with_caller_skip`](crate::with_caller_skip)) for
/// [`annotate_with`](ResultExt::annotate_with).
///
/// ```rust
/// use errorx::{ResultExt, with_int};
///
/// fn read(id: i64) -> errorx::Result<String> {
///     std::fs::read_to_string("/definitely/not/here").annotate("read failed", [with_int("id", id)])
/// }
///
/// let err = read(4).unwrap_err();
/// assert_eq!(err.to_string(), "read failed");
/// assert_eq!(err.field("id"), Some("4"));
/// assert!(err.internal().is_some());
/// ```
pub trait ResultExt<T> {
    /// Wrap the error, keeping its text as the message.
    fn wrap_err<I>(self, options: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = ErrorOption>;

    /// Replace the message and record the error as the cause.
    fn annotate<I>(self, message: impl Into<String>, options: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = ErrorOption>;

    /// Like [`annotate`](ResultExt::annotate) but builds the message and
    /// options only on failure.
    fn annotate_with<F, I>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> (String, I),
        I: IntoIterator<Item = ErrorOption>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn wrap_err<I>(self, options: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = ErrorOption>,
    {
        self.map_err(|err| Error::wrap(err, options))
    }

    fn annotate<I>(self, message: impl Into<String>, options: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = ErrorOption>,
    {
        self.map_err(|err| {
            Error::new(
                message,
                std::iter::once(with_internal(err)).chain(options),
            )
        })
    }

    fn annotate_with<F, I>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> (String, I),
        I: IntoIterator<Item = ErrorOption>,
    {
        self.map_err(|err| {
            let (message, options) = f();
            Error::new(
                message,
                std::iter::once(with_internal(err)).chain(options),
            )
        })
    }
}
