//! Open classification tag carried by every [`Error`](crate::Error).
//!
//! The core defines exactly one value, [`ErrorType::UNSET`]. Concrete tags
//! ("invalid params", "unauthorized", ...) belong to the domain layer that
//! consumes them:
//!
//! ```rust
//! use errorx::ErrorType;
//!
//! pub const INVALID_PARAMS: ErrorType = ErrorType::new(1);
//! pub const UNAUTHORIZED: ErrorType = ErrorType::new(2);
//!
//! assert_ne!(INVALID_PARAMS, UNAUTHORIZED);
//! assert!(ErrorType::default().is_unset());
//! ```

use std::fmt;

/// Integer classification tag.
///
/// Any `i64` is accepted without validation. The zero value means
/// "unclassified" and is what a freshly constructed error carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct ErrorType(i64);

impl ErrorType {
    /// Unclassified.
    pub const UNSET: ErrorType = ErrorType(0);

    /// Wrap a raw tag value.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw tag value.
    #[inline]
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// True if no classification was assigned.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for ErrorType {
    #[inline]
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<ErrorType> for i64 {
    #[inline]
    fn from(tag: ErrorType) -> Self {
        tag.0
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
