//! # errorx
//!
//! Structured error annotation.
//!
//! An [`Error`] carries four things:
//!
//! 1. **A message** for whoever reads `to_string()`
//! 2. **A root cause**, the innermost real failure, kept for inspection
//! 3. **Ordered fields**, key/value diagnostics accumulated across wraps
//! 4. **A type tag**, an open integer class the boundary layer maps to
//!    status codes, log levels or retries
//!
//! ## Design Philosophy
//!
//! - Errors are flat: wrapping absorbs the previous error's fields and root
//!   cause instead of nesting it
//! - Errors are immutable once built; construction is an ordered list of
//!   options applied once
//! - Caller locations and stack traces are opt-in per call site
//! - The crate never logs and never decides transport semantics; it only
//!   structures data for the code that does
//!
//! ## Quick Start
//!
//! ```rust
//! use errorx::{as_error, Error, ErrorType, with_caller, with_int, with_internal, with_type};
//!
//! const TYPE_NOT_FOUND: ErrorType = ErrorType::new(4);
//!
//! fn load(id: i64) -> errorx::Result<()> {
//!     let driver = std::io::Error::other("no rows in result set");
//!     Err(Error::new(
//!         "record not found",
//!         [with_internal(driver), with_int("id", id), with_type(TYPE_NOT_FOUND), with_caller()],
//!     ))
//! }
//!
//! let err = load(7).unwrap_err();
//! assert_eq!(err.to_string(), "record not found");
//! assert_eq!(err.kind(), TYPE_NOT_FOUND);
//! assert_eq!(err.internal().unwrap().to_string(), "no rows in result set");
//!
//! // Boundary code recognises the error even after foreign wrapping.
//! let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
//! assert!(as_error(&*boxed).is_some());
//! ```
//!
//! ## Wrapping
//!
//! ```rust
//! use errorx::{Error, with_internal, with_string};
//!
//! let db = Error::new("query failed", [with_internal("conn refused"), with_string("table", "users")]);
//! let svc = Error::new("load profile failed", [with_internal(db), with_string("user", "17")]);
//!
//! assert_eq!(svc.internal().unwrap().to_string(), "conn refused");
//! assert_eq!(svc.field("table"), Some("users"));
//! assert_eq!(
//!     svc.json_value(),
//!     serde_json::json!({"internal": "conn refused", "table": "users", "user": "17"})
//! );
//! ```
//!
//! ## Features
//!
//! - `frame-walk` (default): stack walking for [`with_caller_skip`]. Without
//!   it, `with_caller_skip` never resolves; [`with_caller`] and [`caller!`]
//!   are unaffected.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod caller;
pub mod convenience;
pub mod error;
pub mod ext;
pub mod field;
pub mod json;
pub mod kind;
pub mod logging;
pub mod option;

pub use builder::ErrorBuilder;
pub use caller::{CALLER_KEY, Caller, STACKTRACE_KEY, trim_file_path};
pub use error::{Cause, Error, MessageError, as_error};
pub use ext::ResultExt;
pub use field::{Field, Fields};
pub use json::INTERNAL_KEY;
pub use kind::ErrorType;
pub use logging::LogRecord;
pub use option::{
    ErrorOption, with_any, with_caller, with_caller_at, with_caller_skip, with_int,
    with_internal, with_stacktrace, with_string, with_type,
};

/// Type alias for Results using our error type.
pub type Result<T> = std::result::Result<T, Error>;
