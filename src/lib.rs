//! # Lockstep
//!
//! A payload conformance checker: walk a declarative rule tree and an
//! arbitrary data tree in lock-step, and get back a precise, path-addressed
//! list of every violation — not just the first one.
//!
//! ## Overview
//!
//! A [`RuleTree`] declares the expected fields: their type tag (`string`,
//! `number`, `boolean`, `date`, or an opaque `reference` identifier), whether
//! they are required, allowed enum values, one level of array-of-scalar, and
//! arbitrarily nested objects. [`Validator::validate`] compares a
//! `serde_json::Value` payload against the tree and returns a flat,
//! order-stable `Vec<Violation>`; an empty list means the payload conforms.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: dot-joined location of a violation (e.g. `address.zip`)
//! - [`Violation`] / [`Violations`]: one failure, and a non-empty accumulation
//! - [`RuleTree`] / [`Rule`] / [`TypeTag`]: the declarative rule model
//! - [`Validator`]: the recursive lock-step walk
//! - [`RuleRegistry`]: thread-safe named rule-tree storage
//!
//! ## Example
//!
//! ```rust
//! use lockstep::{Rule, RuleTree, TypeTag};
//! use serde_json::json;
//!
//! let rules = RuleTree::new()
//!     .field("name", Rule::string().required())
//!     .field("age", TypeTag::Number)
//!     .field("role", Rule::string().one_of([json!("admin"), json!("user")]));
//!
//! // A conforming payload produces no violations.
//! let violations = lockstep::validate(&json!({"name": "ada", "age": 36}), &rules);
//! assert!(violations.is_empty());
//!
//! // Every problem is reported in one pass, with its path.
//! let violations = lockstep::validate(&json!({"age": "36", "role": "guest"}), &rules);
//! let messages: Vec<_> = violations.iter().map(|v| v.to_string()).collect();
//! assert_eq!(
//!     messages,
//!     vec![
//!         "name: must have required property 'name'",
//!         "age: must be of type 'number', received 'string'",
//!         "role: must be one of the following values: admin, user",
//!     ],
//! );
//! ```

pub mod check;
pub mod error;
pub mod path;
pub mod registry;
pub mod rule;
pub mod validator;

pub use check::{HexReference, ReferenceCheck};
pub use error::{Violation, Violations};
pub use path::FieldPath;
pub use registry::{RegistryError, RuleRegistry};
pub use rule::{FieldRule, Rule, RuleDescriptor, RuleKind, RuleParseError, RuleTree, TypeTag};
pub use validator::Validator;

use serde_json::Value;

/// Type alias for applicative validation results carrying [`Violations`].
pub type ValidationResult<T> = stillwater::Validation<T, Violations>;

/// Validates a payload against a rule tree with a default [`Validator`].
///
/// Equivalent to `Validator::new().validate(payload, rules)`. Build a
/// [`Validator`] instead when you need a custom reference predicate or depth
/// bound.
pub fn validate(payload: &Value, rules: &RuleTree) -> Vec<Violation> {
    Validator::new().validate(payload, rules)
}
