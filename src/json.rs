//! JSON projection for log sinks and transport.
//!
//! The projection is a single flat object: one member per field plus
//! `"internal"` holding the root cause's text when there is one.
//!
//! ```rust
//! use errorx::{Error, with_internal, with_string};
//!
//! let err = Error::new("lookup failed", [with_internal("boom"), with_string("id", "42")]);
//! let json: serde_json::Value = serde_json::from_str(&err.json_string().unwrap()).unwrap();
//!
//! assert_eq!(json, serde_json::json!({ "internal": "boom", "id": "42" }));
//! ```
//!
//! # Key rules
//!
//! - Later fields with a repeated key overwrite earlier ones.
//! - `"internal"` belongs to the cause. A field literally named `internal`
//!   is written as `"field.internal"`, whether or not a cause is present.
//! - Keys already starting with `field.` get the prefix again
//!   (`field.internal` becomes `field.field.internal`), so no two distinct
//!   field keys share an output key and neither collides with the cause.

use crate::error::Error;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Member holding the root cause.
pub const INTERNAL_KEY: &str = "internal";

/// Prefix applied to a field whose key collides with [`INTERNAL_KEY`] or
/// already carries this prefix.
pub const SHADOWED_FIELD_PREFIX: &str = "field.";

/// Output key for a field key. One-to-one, and never [`INTERNAL_KEY`].
pub(crate) fn projected_key(key: &str) -> Cow<'_, str> {
    if key == INTERNAL_KEY || key.starts_with(SHADOWED_FIELD_PREFIX) {
        Cow::Owned(format!("{}{}", SHADOWED_FIELD_PREFIX, key))
    } else {
        Cow::Borrowed(key)
    }
}

impl Error {
    /// Projection as a JSON object map.
    pub fn json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for field in self.fields() {
            map.insert(
                projected_key(field.key()).into_owned(),
                Value::String(field.value().to_owned()),
            );
        }
        if let Some(internal) = self.internal() {
            map.insert(INTERNAL_KEY.to_owned(), Value::String(internal.to_string()));
        }
        map
    }

    /// Projection as a JSON value.
    #[inline]
    pub fn json_value(&self) -> Value {
        Value::Object(self.json_map())
    }

    /// Projection serialized as a compact JSON object.
    ///
    /// Only an encoder failure produces `Err`; string-only maps do not fail
    /// in practice.
    pub fn json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.json_map())
    }
}
