//! Construction options.
//!
//! Each option changes exactly one aspect of the error being built and is
//! applied in the order the caller lists it. Options are plain values, so a
//! sequence can be assembled up front and passed to [`Error::new`]:
//!
//! ```rust
//! use errorx::{Error, ErrorType, with_caller, with_int, with_string, with_type};
//!
//! let err = Error::new(
//!     "Invalid params",
//!     [
//!         with_type(ErrorType::new(1)),
//!         with_string("param", "limit"),
//!         with_int("max", 100),
//!         with_caller(),
//!     ],
//! );
//! assert_eq!(err.fields().len(), 3);
//! ```
//!
//! # Ordering
//!
//! Every option commutes with every other except [`with_internal`]: when it
//! absorbs a previous [`Error`], that error's fields are appended at the
//! point where `with_internal` runs. Put it first to get the usual
//! "inherited fields, then new fields" layout.
//!
//! # Capture time
//!
//! Caller and stack-trace options capture when the option is *created*, at
//! the call site, not when it is applied.

use crate::caller::{self, CALLER_KEY, Caller, STACKTRACE_KEY};
use crate::error::{Error, as_error};
use crate::field::Field;
use crate::kind::ErrorType;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// One construction step.
#[derive(Debug)]
pub enum ErrorOption {
    /// Record a cause, flattening it if it is (or wraps) an [`Error`].
    Internal(Box<dyn StdError + Send + Sync>),
    /// Append a field.
    Field(Field),
    /// Set the classification tag.
    Type(ErrorType),
    /// Append a `caller` field. `None` is a resolution miss and adds nothing.
    Caller(Option<Caller>),
    /// Append a `stacktrace` field.
    Stacktrace(String),
}

impl ErrorOption {
    pub(crate) fn apply(self, err: &mut Error) {
        match self {
            Self::Internal(cause) => {
                let absorbed = as_error(&*cause)
                    .map(|prior| (prior.fields.clone(), prior.root_cause()));
                match absorbed {
                    Some((fields, root)) => {
                        err.fields.extend(fields);
                        err.internal = Some(root);
                    }
                    None => err.internal = Some(Arc::from(cause)),
                }
            }
            Self::Field(field) => err.fields.push(field),
            Self::Type(kind) => err.kind = kind,
            Self::Caller(Some(caller)) => {
                err.fields.push(Field::new(CALLER_KEY, caller.to_string()));
            }
            Self::Caller(None) => {}
            Self::Stacktrace(trace) => err.fields.push(Field::new(STACKTRACE_KEY, trace)),
        }
    }
}

/// Record `err` as the cause.
///
/// If `err` is an [`Error`], or has one anywhere in its `source()` chain,
/// that error's fields are appended and its own root cause (or its message,
/// when it has none) becomes the cause. Anything else is stored as is.
///
/// Plain strings are accepted too and become an opaque cause.
pub fn with_internal<E>(err: E) -> ErrorOption
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    ErrorOption::Internal(err.into())
}

/// Append a field using the value's `Display` output.
pub fn with_any(key: impl Into<String>, value: impl fmt::Display) -> ErrorOption {
    ErrorOption::Field(Field::new(key, value.to_string()))
}

/// Append a field verbatim.
pub fn with_string(key: impl Into<String>, value: impl Into<String>) -> ErrorOption {
    ErrorOption::Field(Field::new(key, value))
}

/// Append a field holding `value` in base 10.
pub fn with_int(key: impl Into<String>, value: i64) -> ErrorOption {
    ErrorOption::Field(Field::new(key, value.to_string()))
}

/// Set the type tag. The last one applied wins.
pub fn with_type(kind: ErrorType) -> ErrorOption {
    ErrorOption::Type(kind)
}

/// Append `caller = <short-file>:<line>` for the code calling this function.
///
/// `#[track_caller]` functions in between are transparent, so a helper
/// marked `#[track_caller]` reports the location of *its* caller.
#[track_caller]
pub fn with_caller() -> ErrorOption {
    ErrorOption::Caller(Some(Caller::here()))
}

/// Append `caller` for the frame `skip` levels above the calling function.
///
/// `skip = 0` is the function that called `with_caller_skip`. Resolution
/// walks the live stack and needs the `frame-walk` feature plus debug
/// symbols; inlined frames are invisible to it. A miss, including a `skip`
/// deeper than the stack, adds no field.
#[inline(never)]
pub fn with_caller_skip(skip: usize) -> ErrorOption {
    ErrorOption::Caller(caller::resolve_frame(skip))
}

/// Append `caller` from an explicit position, e.g. one built by [`caller!`](crate::caller!).
pub fn with_caller_at(caller: Caller) -> ErrorOption {
    ErrorOption::Caller(Some(caller))
}

/// Append `stacktrace` with the full trace at this call.
pub fn with_stacktrace() -> ErrorOption {
    ErrorOption::Stacktrace(caller::capture_stacktrace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn pairs(err: &Error) -> Vec<(&str, &str)> {
        err.fields().iter().map(Field::as_pair).collect()
    }

    #[test]
    fn fields_keep_insertion_order() {
        let err = Error::new("x", [with_string("k1", "v1"), with_string("k2", "v2")]);
        assert_eq!(pairs(&err), vec![("k1", "v1"), ("k2", "v2")]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let err = Error::new("x", [with_int("n", 1), with_int("n", 2)]);
        assert_eq!(pairs(&err), vec![("n", "1"), ("n", "2")]);
    }

    #[test]
    fn value_formatting() {
        let err = Error::new(
            "x",
            [
                with_any("ratio", 0.5),
                with_any("flag", true),
                with_int("neg", -42),
                with_int("max", i64::MAX),
            ],
        );
        assert_eq!(
            pairs(&err),
            vec![
                ("ratio", "0.5"),
                ("flag", "true"),
                ("neg", "-42"),
                ("max", "9223372036854775807"),
            ]
        );
    }

    #[test]
    fn message_is_stable_under_options() {
        let err = Error::new(
            "stable",
            [
                with_string("a", "b"),
                with_type(ErrorType::new(9)),
                with_caller(),
                with_caller_skip(3),
                with_stacktrace(),
            ],
        );
        assert_eq!(err.to_string(), "stable");
        assert_eq!(err.kind(), ErrorType::new(9));
    }

    #[test]
    fn last_type_wins() {
        let err = Error::new(
            "x",
            [with_type(ErrorType::new(1)), with_type(ErrorType::new(2))],
        );
        assert_eq!(err.kind(), ErrorType::new(2));
    }

    #[test]
    fn nested_wraps_flatten() {
        let root = io::Error::other("root cause");
        let e1 = Error::new("a", [with_internal(root), with_string("id", "1")]);
        let e1_fields = e1.fields().to_vec();
        let e2 = Error::new("b", [with_internal(e1), with_string("op", "load")]);

        assert_eq!(e2.internal().unwrap().to_string(), "root cause");
        assert!(e2.internal().unwrap().downcast_ref::<io::Error>().is_some());
        assert!(e2.fields().starts_with(&e1_fields));
        assert_eq!(pairs(&e2), vec![("id", "1"), ("op", "load")]);
    }

    #[test]
    fn internal_placement_follows_option_order() {
        let inner = Error::new("inner", [with_string("inherited", "yes")]);
        let err = Error::new("outer", [with_string("first", "1"), with_internal(inner)]);
        assert_eq!(pairs(&err), vec![("first", "1"), ("inherited", "yes")]);
    }

    #[test]
    fn string_cause_is_opaque() {
        let err = Error::new("x", [with_internal("bare text")]);
        assert_eq!(err.internal().unwrap().to_string(), "bare text");
        assert!(err.fields().is_empty());
    }

    #[test]
    fn caller_names_this_file() {
        let line = line!() + 1;
        let err = Error::new("x", [with_caller()]);
        assert_eq!(err.field(CALLER_KEY), Some(format!("src/option.rs:{}", line).as_str()));
    }

    #[track_caller]
    fn domain_helper() -> Error {
        Error::new("helper", [with_caller()])
    }

    #[test]
    fn track_caller_helpers_are_transparent() {
        let line = line!() + 1;
        let err = domain_helper();
        assert_eq!(err.field(CALLER_KEY), Some(format!("src/option.rs:{}", line).as_str()));
    }

    #[test]
    fn out_of_range_skip_adds_nothing() {
        let baseline = Error::new("x", [with_int("id", 7), with_type(ErrorType::new(3))]);
        let err = Error::new(
            "x",
            [with_int("id", 7), with_caller_skip(1 << 20), with_type(ErrorType::new(3))],
        );
        assert_eq!(err.field(CALLER_KEY), None);
        assert_eq!(pairs(&err), pairs(&baseline));
        assert_eq!(err.kind(), baseline.kind());
    }

    #[test]
    fn resolved_skip_is_short_form() {
        let err = Error::new("x", [with_caller_skip(0)]);
        // Depends on debug info being available; only the shape is checked.
        if let Some(value) = err.field(CALLER_KEY) {
            let (file, line) = value.rsplit_once(':').unwrap();
            assert!(file.ends_with(".rs"));
            assert!(file.matches(['/', '\\']).count() <= 1);
            assert!(line.parse::<u32>().is_ok());
        }
    }

    /// Exact frames need unwind info and line tables, which debug builds keep.
    #[cfg(all(feature = "frame-walk", debug_assertions))]
    mod frame_walk {
        use super::*;

        fn expected(line: u32) -> String {
            format!("src/option.rs:{}", line)
        }

        #[inline(never)]
        fn raise_for_caller() -> Error {
            Error::new("helper", [with_caller_skip(1)])
        }

        #[inline(never)]
        fn raise_here() -> (Error, u32) {
            let line = line!() + 1;
            let err = Error::new("helper", [with_caller_skip(0)]);
            (err, line)
        }

        #[test]
        fn skip_zero_is_the_requesting_function() {
            let line = line!() + 1;
            let err = Error::new("x", [with_caller_skip(0)]);
            assert_eq!(err.field(CALLER_KEY), Some(expected(line).as_str()));
        }

        #[test]
        fn skip_zero_inside_a_helper_is_the_helper() {
            let (err, line) = raise_here();
            assert_eq!(err.field(CALLER_KEY), Some(expected(line).as_str()));
        }

        #[test]
        fn skip_one_is_the_helpers_caller() {
            let line = line!() + 1;
            let err = raise_for_caller();
            assert_eq!(err.field(CALLER_KEY), Some(expected(line).as_str()));
        }
    }

    #[test]
    fn explicit_caller() {
        let err = Error::new("x", [with_caller_at(Caller::new("/srv/app/db/repo.rs", 12))]);
        assert_eq!(err.field(CALLER_KEY), Some("db/repo.rs:12"));
    }

    #[test]
    fn stacktrace_field_is_appended() {
        let err = Error::new("x", [with_int("id", 1), with_stacktrace()]);
        assert_eq!(err.fields().len(), 2);
        assert_eq!(err.fields()[1].key(), STACKTRACE_KEY);
        assert!(!err.fields()[1].value().is_empty());
    }
}
