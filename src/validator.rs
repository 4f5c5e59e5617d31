//! The tree validator.
//!
//! [`Validator`] walks a rule tree and a payload tree in lock-step: unknown
//! keys first, then each declared rule in order, delegating scalar and array
//! decisions to the type checker and recursing into nested objects. Every
//! violation found along the way lands in one flat, order-stable list.

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::check::{check_items, check_scalar, value_type_name, HexReference, ReferenceCheck};
use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::rule::{RuleKind, RuleTree};
use crate::ValidationResult;

/// Default recursion bound for nested payloads.
const DEFAULT_MAX_DEPTH: usize = 100;

/// Validates payloads against rule trees.
///
/// A validator holds the injected reference-identifier predicate (default:
/// [`HexReference`]) and a recursion bound for untrusted input. It carries no
/// per-call state, so one validator can serve any number of threads.
///
/// # Example
///
/// ```rust
/// use lockstep::{Rule, RuleTree, Validator};
/// use serde_json::json;
///
/// let rules = RuleTree::new()
///     .field("name", Rule::string().required())
///     .field("age", Rule::number());
///
/// let validator = Validator::new();
/// let violations = validator.validate(&json!({"age": "12"}), &rules);
///
/// assert_eq!(violations.len(), 2);
/// assert_eq!(violations[0].message, "must have required property 'name'");
/// assert_eq!(violations[1].message, "must be of type 'number', received 'string'");
/// ```
#[derive(Clone)]
pub struct Validator {
    reference: Arc<dyn ReferenceCheck>,
    max_depth: usize,
}

impl Validator {
    /// Creates a validator with the default reference predicate and depth
    /// bound.
    pub fn new() -> Self {
        Self {
            reference: Arc::new(HexReference::new()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the recursion bound.
    ///
    /// Payload nesting deeper than this yields one `max_depth_exceeded`
    /// violation at the offending path instead of recursing further.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Replaces the reference-identifier predicate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lockstep::{Rule, RuleTree, Validator};
    /// use serde_json::{json, Value};
    ///
    /// let validator = Validator::new()
    ///     .with_reference_check(|v: &Value| {
    ///         v.as_str().is_some_and(|s| s.starts_with("usr_"))
    ///     });
    ///
    /// let rules = RuleTree::new().field("owner", Rule::reference());
    /// assert!(validator.validate(&json!({"owner": "usr_42"}), &rules).is_empty());
    /// ```
    pub fn with_reference_check(mut self, check: impl ReferenceCheck + 'static) -> Self {
        self.reference = Arc::new(check);
        self
    }

    /// Validates a payload against a rule tree.
    ///
    /// Returns the flat list of violations in a deterministic order: per
    /// recursion level, unknown-key violations first, then per-rule
    /// violations in rule-declaration order. An empty list means the payload
    /// conforms. Never panics on malformed payload shapes; a non-object
    /// payload yields one `invalid_type` violation at the root.
    pub fn validate(&self, payload: &Value, rules: &RuleTree) -> Vec<Violation> {
        let mut violations = Vec::new();
        match payload.as_object() {
            Some(obj) => self.walk(obj, rules, &FieldPath::root(), 0, &mut violations),
            None => violations.push(Violation::type_mismatch(
                FieldPath::root(),
                "object",
                value_type_name(payload),
            )),
        }
        violations
    }

    /// Validates a payload, returning an applicative result.
    ///
    /// An empty violation list becomes `Success(())`; a non-empty one becomes
    /// `Failure` carrying a non-empty [`Violations`], ready to combine with
    /// other validations.
    pub fn check(&self, payload: &Value, rules: &RuleTree) -> ValidationResult<()> {
        let violations = self.validate(payload, rules);
        if violations.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(Violations::from_vec(violations))
        }
    }

    /// Validates many independent payloads against one rule tree in parallel.
    ///
    /// Output order matches input order; each payload's violation list is
    /// identical to what [`Validator::validate`] would return for it alone.
    pub fn validate_all(&self, payloads: &[Value], rules: &RuleTree) -> Vec<Vec<Violation>> {
        payloads
            .par_iter()
            .map(|payload| self.validate(payload, rules))
            .collect()
    }

    fn walk(
        &self,
        payload: &Map<String, Value>,
        rules: &RuleTree,
        base: &FieldPath,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        if depth >= self.max_depth {
            out.push(Violation::depth_exceeded(base.clone(), self.max_depth));
            return;
        }

        // Pass 1: payload keys with no declared rule. Reported once, at their
        // own path; their subtrees are never expanded.
        for key in payload.keys() {
            if !rules.contains(key) {
                out.push(Violation::additional_property(base.push(key)));
            }
        }

        // Pass 2: declared rules, in declaration order.
        for (name, rule) in rules.iter() {
            let rule = rule.descriptor();
            let path = base.push(name);

            let value = match payload.get(name) {
                Some(value) => value,
                None => {
                    if rule.is_required() {
                        out.push(Violation::required(path, name));
                    }
                    continue;
                }
            };

            // Nested recursion keys off the payload value's shape, not the
            // declared type. A scalar-declared rule receiving an object
            // recurses against an empty tree (flagging every key) and still
            // fails its scalar check below; both reports are intentional.
            if let Some(obj) = value.as_object() {
                let empty = RuleTree::new();
                let nested = match rule.kind() {
                    RuleKind::Nested(tree) => tree,
                    _ => &empty,
                };
                self.walk(obj, nested, &path, depth + 1, out);
            }

            match rule.kind() {
                RuleKind::Scalar(tag) => {
                    if let Some(violation) =
                        check_scalar(value, *tag, &path, self.reference.as_ref())
                    {
                        out.push(violation);
                    }
                }
                RuleKind::Items(tag) => {
                    out.extend(check_items(value, *tag, &path, self.reference.as_ref()));
                }
                RuleKind::Nested(_) => {}
            }

            // Enum membership applies to whatever is actually present: every
            // element of an array, or the single scalar. One aggregated
            // violation per field, however many elements are out of the set.
            if let Some(allowed) = rule.allowed() {
                let out_of_set = match value.as_array() {
                    Some(items) => items.iter().any(|item| !allowed.contains(item)),
                    None => !allowed.contains(value),
                };
                if out_of_set {
                    out.push(Violation::enum_mismatch(path, allowed));
                }
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

// One validator serves many threads; keep that true if the fields change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};
