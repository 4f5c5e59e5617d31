//! Type-checking primitives.
//!
//! Pure functions that decide whether a single value satisfies a declared
//! primitive type, and whether each element of an array satisfies an item
//! type. Failures come back as [`Violation`] values; nothing here panics or
//! returns `Err`.
//!
//! The `reference` tag is not checked natively: it is delegated to the
//! injected [`ReferenceCheck`] capability, with [`HexReference`] (a
//! 24-hex-character token predicate) as the shipped default.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

use crate::error::Violation;
use crate::path::FieldPath;
use crate::rule::TypeTag;

/// The injected capability deciding whether a value is a valid reference
/// identifier.
///
/// Only consulted for the `reference` type tag; null values are skipped
/// before the predicate runs.
pub trait ReferenceCheck: Send + Sync {
    /// Returns true if the value is a valid reference identifier.
    fn is_valid(&self, value: &Value) -> bool;
}

impl<F> ReferenceCheck for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn is_valid(&self, value: &Value) -> bool {
        self(value)
    }
}

/// The default reference predicate: a 24-character hex token.
///
/// # Example
///
/// ```rust
/// use lockstep::{HexReference, ReferenceCheck};
/// use serde_json::json;
///
/// let check = HexReference::new();
/// assert!(check.is_valid(&json!("507f1f77bcf86cd799439011")));
/// assert!(!check.is_valid(&json!("not-a-reference")));
/// ```
pub struct HexReference {
    pattern: Regex,
}

impl HexReference {
    /// Creates the default 24-hex-character predicate.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new("^[0-9a-fA-F]{24}$").expect("hex token pattern is valid"),
        }
    }
}

impl Default for HexReference {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceCheck for HexReference {
    fn is_valid(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| self.pattern.is_match(s))
    }
}

/// Checks a single value against a scalar tag.
///
/// Returns one violation at `path` when the value does not satisfy the tag,
/// None otherwise.
pub(crate) fn check_scalar(
    value: &Value,
    tag: TypeTag,
    path: &FieldPath,
    reference: &dyn ReferenceCheck,
) -> Option<Violation> {
    if conforms(value, tag, reference) {
        None
    } else {
        Some(Violation::type_mismatch(
            path.clone(),
            tag.name(),
            value_type_name(value),
        ))
    }
}

/// Checks every element of an array value against an item tag.
///
/// A non-array value yields one "must be of type 'array'" violation and no
/// per-element checks. Otherwise one violation per failing element, all
/// sharing the field path.
pub(crate) fn check_items(
    value: &Value,
    tag: TypeTag,
    path: &FieldPath,
    reference: &dyn ReferenceCheck,
) -> Vec<Violation> {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            return vec![Violation::type_mismatch(
                path.clone(),
                "array",
                value_type_name(value),
            )]
        }
    };

    items
        .iter()
        .filter(|item| !conforms(item, tag, reference))
        .map(|item| Violation::item_type_mismatch(path.clone(), tag.name(), value_type_name(item)))
        .collect()
}

/// Decides whether one value satisfies one tag.
fn conforms(value: &Value, tag: TypeTag, reference: &dyn ReferenceCheck) -> bool {
    match tag {
        TypeTag::String => value.is_string(),
        TypeTag::Number => value.is_number(),
        TypeTag::Boolean => value.is_boolean(),
        TypeTag::Date => match value {
            // Timestamps disguised as numbers or booleans must not coerce.
            Value::Number(_) | Value::Bool(_) => false,
            Value::String(s) => parses_as_date(s),
            _ => false,
        },
        // Null counts as absent for references; everything else goes through
        // the injected predicate.
        TypeTag::Reference => value.is_null() || reference.is_valid(value),
    }
}

/// Permissive date parsing over the common interchange formats.
fn parses_as_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(s, "%Y/%m/%d").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
