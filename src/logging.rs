//! Structured log view over an [`Error`].
//!
//! The crate never writes logs. A boundary layer that does can borrow a
//! [`LogRecord`] from an error and either read its parts or render it with
//! [`LogRecord::write_to`]:
//!
//! ```text
//! [type=3] msg='Unknown server error' internal='conn refused' id='7' caller='db/repo.rs:12'
//! ```
//!
//! # Properties
//!
//! - Borrows from the error and cannot outlive it
//! - Accessors do not allocate
//! - Rendered values are truncated at [`MAX_FIELD_OUTPUT_LEN`] bytes on a
//!   UTF-8 boundary, so a multi-megabyte stack trace cannot flood a sink
//! - Field keys follow the same `internal` rule as the JSON projection

use crate::error::Error;
use crate::field::Field;
use crate::json::{INTERNAL_KEY, projected_key};
use crate::kind::ErrorType;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Maximum length for any individual value in rendered output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Appended to values cut at [`MAX_FIELD_OUTPUT_LEN`].
pub const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed view of one error for a log sink.
#[derive(Clone, Copy)]
pub struct LogRecord<'a> {
    message: &'a str,
    internal: Option<&'a (dyn StdError + Send + Sync + 'static)>,
    kind: ErrorType,
    fields: &'a [Field],
}

impl<'a> LogRecord<'a> {
    /// Display message of the error.
    #[inline]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Root cause, if any.
    #[inline]
    pub const fn internal(&self) -> Option<&'a (dyn StdError + Send + Sync + 'static)> {
        self.internal
    }

    /// Type tag.
    #[inline]
    pub const fn kind(&self) -> ErrorType {
        self.kind
    }

    /// Fields in insertion order.
    #[inline]
    pub const fn fields(&self) -> &'a [Field] {
        self.fields
    }

    /// Render as one line without allocating for values under the limit.
    ///
    /// The root cause is formatted once to measure it, which allocates.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[type={}] msg='{}'",
            self.kind,
            clip(self.message)
        )?;

        if let Some(internal) = self.internal {
            let text = internal.to_string();
            write!(f, " {}='{}'", INTERNAL_KEY, clip(&text))?;
        }

        for field in self.fields {
            write!(
                f,
                " {}='{}'",
                projected_key(field.key()),
                clip(field.value())
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl fmt::Debug for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("message", &self.message)
            .field("internal", &self.internal.map(|e| e.to_string()))
            .field("type", &self.kind)
            .field("fields", &self.fields)
            .finish()
    }
}

impl Error {
    /// Borrow a structured log view.
    #[inline]
    pub fn log_record(&self) -> LogRecord<'_> {
        LogRecord {
            message: self.message(),
            internal: self.internal(),
            kind: self.kind(),
            fields: self.fields(),
        }
    }

    /// Callback form of [`log_record`](Self::log_record); the view is gone
    /// when `f` returns.
    ///
    /// ```rust
    /// use errorx::{Error, with_int};
    ///
    /// let err = Error::new("db failed", [with_int("id", 7)]);
    /// let line = err.with_log_record(|record| record.to_string());
    /// assert_eq!(line, "[type=0] msg='db failed' id='7'");
    /// ```
    #[inline]
    pub fn with_log_record<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LogRecord<'_>) -> R,
    {
        let record = self.log_record();
        f(&record)
    }
}

/// Bound one rendered value to [`MAX_FIELD_OUTPUT_LEN`] bytes, indicator
/// included. Values already within the limit are borrowed as is.
pub(crate) fn clip(value: &str) -> Cow<'_, str> {
    if value.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(value);
    }

    let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();
    let kept = value
        .char_indices()
        .map(|(start, c)| start + c.len_utf8())
        .take_while(|&end| end <= budget)
        .last()
        .unwrap_or(0);

    Cow::Owned([&value[..kept], TRUNCATION_INDICATOR].concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{with_int, with_internal, with_stacktrace, with_string, with_type};

    #[test]
    fn renders_all_parts_in_order() {
        let err = Error::new(
            "Unknown server error",
            [
                with_internal("conn refused"),
                with_int("id", 7),
                with_string("caller", "db/repo.rs:12"),
                with_type(ErrorType::new(3)),
            ],
        );
        assert_eq!(
            err.log_record().to_string(),
            "[type=3] msg='Unknown server error' internal='conn refused' id='7' caller='db/repo.rs:12'"
        );
    }

    #[test]
    fn internal_field_key_is_renamed() {
        let err = Error::new("x", [with_string("internal", "mine")]);
        assert_eq!(err.log_record().to_string(), "[type=0] msg='x' field.internal='mine'");
    }

    #[test]
    fn accessors_borrow_from_error() {
        let err = Error::new("x", [with_internal("root"), with_int("n", 1)]);
        let record = err.log_record();
        assert_eq!(record.message(), "x");
        assert_eq!(record.internal().unwrap().to_string(), "root");
        assert_eq!(record.fields().len(), 1);
        assert!(record.kind().is_unset());
    }

    #[test]
    fn huge_stacktrace_is_bounded() {
        let err = Error::new("x", [with_stacktrace(), with_string("blob", "z".repeat(50_000))]);
        let mut out = String::new();
        err.log_record().write_to(&mut out).unwrap();
        assert!(out.len() < 3 * MAX_FIELD_OUTPUT_LEN);
        assert!(out.contains(TRUNCATION_INDICATOR));
    }

    #[test]
    fn clip_ascii_fills_budget() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN + 10);
        let truncated = clip(&s);
        assert_eq!(truncated.len(), MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn clip_borrows_at_limit() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = clip(&s);
        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated.len(), MAX_FIELD_OUTPUT_LEN);
    }

    #[test]
    fn clip_respects_utf8() {
        // 'й' is two bytes, '🔥' four; neither may be split.
        for unit in ["й", "🔥"] {
            let s = unit.repeat(MAX_FIELD_OUTPUT_LEN);
            let truncated = clip(&s);
            assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
            assert!(truncated.ends_with(TRUNCATION_INDICATOR));
            let body = truncated.trim_end_matches(TRUNCATION_INDICATOR);
            assert!(!body.is_empty());
            assert!(body.chars().all(|c| c.to_string() == unit));
            // The next whole char would not have fitted.
            assert!(body.len() + unit.len() + TRUNCATION_INDICATOR.len() > MAX_FIELD_OUTPUT_LEN);
        }
    }

    #[test]
    fn callback_form() {
        let err = Error::new("x", [with_int("id", 1)]);
        let count = err.with_log_record(|record| record.fields().len());
        assert_eq!(count, 1);
    }
}
