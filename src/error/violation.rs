//! Conformance violation types.
//!
//! This module provides [`Violation`] for single conformance failures and
//! [`Violations`] for non-empty accumulations of them. The fixed user-facing
//! message catalog lives here as constructors, so the validator and the type
//! checker never format messages themselves.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::FieldPath;

/// A single conformance violation.
///
/// `Violation` captures where a check failed, what the user should read, and
/// a stable code for programmatic handling:
/// - **path**: dot-joined chain of field names from the payload root
/// - **message**: human-readable description of the failure
/// - **code**: machine-readable discriminator (e.g. `required`, `invalid_type`)
///
/// # Example
///
/// ```rust
/// use lockstep::{FieldPath, Violation};
///
/// let violation = Violation::new(
///     FieldPath::root().push("email"),
///     "must look like an email address",
/// )
/// .with_code("invalid_email");
///
/// assert_eq!(violation.code, "invalid_email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The path to the field that failed the check.
    pub path: FieldPath,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code (e.g. `additional_property`).
    pub code: String,
}

impl Violation {
    /// Creates a new violation with the given path and message.
    ///
    /// The code defaults to "violation". Use `with_code` to set a more
    /// specific one; the catalog constructors below always do.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "violation".to_string(),
        }
    }

    /// Sets the code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// A required field is absent from the payload.
    pub fn required(path: FieldPath, name: &str) -> Self {
        Self::new(path, format!("must have required property '{}'", name)).with_code("required")
    }

    /// A payload key has no counterpart in the rule tree.
    pub fn additional_property(path: FieldPath) -> Self {
        Self::new(path, "must NOT have additional properties").with_code("additional_property")
    }

    /// A value does not satisfy its declared type.
    ///
    /// Also used for array-typed fields receiving a non-array value, with
    /// `expected` set to `array`.
    pub fn type_mismatch(path: FieldPath, expected: &str, received: &str) -> Self {
        Self::new(
            path,
            format!("must be of type '{}', received '{}'", expected, received),
        )
        .with_code("invalid_type")
    }

    /// An array element does not satisfy the declared item type.
    ///
    /// One violation is emitted per failing element; all share the field path.
    pub fn item_type_mismatch(path: FieldPath, expected: &str, received: &str) -> Self {
        let message = format!(
            "each item in '{}' must be of type '{}', received '{}'",
            path, expected, received
        );
        Self::new(path, message).with_code("invalid_item_type")
    }

    /// A value (or at least one array element) is outside the allowed enum set.
    ///
    /// Aggregated: exactly one such violation per field, however many elements
    /// are out of the set.
    pub fn enum_mismatch(path: FieldPath, allowed: &[Value]) -> Self {
        let joined = allowed
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            path,
            format!("must be one of the following values: {}", joined),
        )
        .with_code("enum")
    }

    /// Payload nesting exceeded the validator's recursion bound.
    pub fn depth_exceeded(path: FieldPath, max_depth: usize) -> Self {
        Self::new(
            path,
            format!("maximum validation depth of {} exceeded", max_depth),
        )
        .with_code("max_depth_exceeded")
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Violation {}

// Violation stays Send + Sync; these assertions keep that true if the field
// types ever change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violation>();
    assert_sync::<Violation>();
};

/// Renders an enum member the way the message catalog expects.
///
/// Strings render bare (admin, not "admin"); everything else uses its JSON
/// rendering.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A non-empty collection of conformance violations.
///
/// `Violations` wraps a `NonEmptyVec<Violation>` so that a
/// `Validation<T, Violations>` failure always carries at least one violation.
///
/// # Combining
///
/// `Violations` implements `Semigroup`, so failures from independent checks
/// can be combined while preserving order:
///
/// ```rust
/// use lockstep::{FieldPath, Violation, Violations};
/// use stillwater::prelude::*;
///
/// let a = Violations::single(Violation::required(FieldPath::from_name("name"), "name"));
/// let b = Violations::single(Violation::additional_property(FieldPath::from_name("extra")));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    /// Creates a `Violations` containing a single violation.
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Creates a `Violations` from a `Vec<Violation>`.
    ///
    /// # Panics
    ///
    /// Panics if the vec is empty. Use this only where emptiness has already
    /// been ruled out.
    pub fn from_vec(violations: Vec<Violation>) -> Self {
        Self(NonEmptyVec::from_vec(violations).expect("Violations requires at least one violation"))
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the violations, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Returns all violations at the given path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&Violation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Returns all violations with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.code == code).collect()
    }

    /// Returns the first violation.
    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Converts this collection into a plain `Vec<Violation>`.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "payload failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = Box<dyn Iterator<Item = &'a Violation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}
