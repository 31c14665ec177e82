//! Ordered key/value diagnostic fields.
//!
//! Fields are stored in insertion order and duplicates are kept. Owned
//! text is zeroized when a field is dropped, so identifiers and captured
//! stack traces do not linger in freed memory after the error is gone.

use smallvec::SmallVec;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Inline capacity of a field list.
///
/// Most errors carry an id plus a caller location; four entries keep the
/// common case off the heap.
pub const INLINE_FIELDS: usize = 4;

/// Field storage used by [`Error`](crate::Error).
pub type Fields = SmallVec<[Field; INLINE_FIELDS]>;

/// One diagnostic key/value pair.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct Field {
    key: String,
    value: String,
}

impl Field {
    /// Build a field from any string-like key and value.
    #[inline]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Field name.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Rendered value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Borrow as a `(key, value)` pair.
    #[inline]
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.key, &self.value)
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.key, self.value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let field = Field::new("id", "42");
        assert_eq!(field.key(), "id");
        assert_eq!(field.value(), "42");
        assert_eq!(field.as_pair(), ("id", "42"));
    }

    #[test]
    fn from_tuple() {
        let field: Field = ("k", String::from("v")).into();
        assert_eq!(field, Field::new("k", "v"));
    }

    #[test]
    fn zeroize_clears_owned_text() {
        let mut field = Field::new("session", "secret-token");
        field.zeroize();
        assert_eq!(field.key(), "");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn formatting() {
        let field = Field::new("id", "7");
        assert_eq!(field.to_string(), "id=7");
        assert_eq!(format!("{:?}", field), r#"("id", "7")"#);
    }

    #[test]
    fn small_lists_stay_inline() {
        let mut fields = Fields::new();
        for i in 0..INLINE_FIELDS {
            fields.push(Field::new("k", i.to_string()));
        }
        assert!(!fields.spilled());
        fields.push(Field::new("k", "overflow"));
        assert!(fields.spilled());
    }
}
