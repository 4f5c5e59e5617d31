//! Rule tree definitions.
//!
//! This module provides the declarative rule model: [`TypeTag`] for the fixed
//! primitive kinds, [`FieldRule`] (a bare tag shorthand or a full
//! [`RuleDescriptor`]), and [`RuleTree`], the ordered mapping from field name
//! to rule. Rule trees are built either with the [`Rule`] factory and the
//! builder methods, or parsed from a JSON description (see
//! [`RuleTree::from_value`]).
//!
//! # Example
//!
//! ```rust
//! use lockstep::{Rule, RuleTree, TypeTag};
//! use serde_json::json;
//!
//! let rules = RuleTree::new()
//!     .field("name", Rule::string().required())
//!     .field("age", TypeTag::Number)
//!     .field("tags", Rule::items(TypeTag::String))
//!     .field("role", Rule::string().one_of([json!("admin"), json!("user")]));
//! ```

mod parse;

pub use parse::RuleParseError;

use std::borrow::Cow;
use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

/// One of the fixed primitive kinds a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// A native string.
    String,
    /// A genuine numeric value (numeric-looking strings do not pass).
    Number,
    /// A genuine boolean value.
    Boolean,
    /// A parseable date; numbers and booleans are rejected outright.
    Date,
    /// An opaque reference identifier checked by an injected predicate.
    Reference,
}

impl TypeTag {
    /// Returns the tag's name as it appears in rule descriptions and messages.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::Reference => "reference",
        }
    }

    /// Parses a tag from its name, or None if the name is not a tag.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(TypeTag::String),
            "number" => Some(TypeTag::Number),
            "boolean" => Some(TypeTag::Boolean),
            "date" => Some(TypeTag::Date),
            "reference" => Some(TypeTag::Reference),
            _ => None,
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared shape of a field: a scalar, an array of scalars, or a nested
/// rule tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// A single scalar of the given tag.
    Scalar(TypeTag),
    /// An array whose every element must satisfy the given tag.
    Items(TypeTag),
    /// A nested object validated against its own rule tree.
    Nested(RuleTree),
}

/// A full field rule: declared shape plus `required` and enum constraints.
///
/// Built through the [`Rule`] factory:
///
/// ```rust
/// use lockstep::Rule;
/// use serde_json::json;
///
/// let rule = Rule::string()
///     .required()
///     .one_of([json!("admin"), json!("user")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDescriptor {
    kind: RuleKind,
    required: bool,
    allowed: Option<Vec<Value>>,
}

impl RuleDescriptor {
    pub(crate) fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            required: false,
            allowed: None,
        }
    }

    /// Marks the field as required.
    ///
    /// A required field absent from the payload yields exactly one presence
    /// violation and no further checks for that field.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restricts the field to the given set of allowed values.
    ///
    /// For array-typed fields every element is checked against the set; for
    /// scalar fields the single value is. However many elements are out of
    /// the set, one aggregated violation is emitted per field.
    pub fn one_of(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.allowed = Some(values.into_iter().collect());
        self
    }

    /// Returns the declared shape.
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Returns true if the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the allowed value set, if any.
    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed.as_deref()
    }
}

/// A rule for one field: either the bare tag shorthand or a full descriptor.
///
/// The shorthand `"number"` and the descriptor `{type: "number"}` mean the
/// same thing; [`FieldRule::descriptor`] normalizes both to a
/// [`RuleDescriptor`] once per recursive validation step.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Bare shorthand for `{type: Tag}` with no other constraints.
    Tag(TypeTag),
    /// A full descriptor.
    Descriptor(RuleDescriptor),
}

impl FieldRule {
    /// Normalizes this rule to a descriptor.
    pub(crate) fn descriptor(&self) -> Cow<'_, RuleDescriptor> {
        match self {
            FieldRule::Tag(tag) => Cow::Owned(RuleDescriptor::new(RuleKind::Scalar(*tag))),
            FieldRule::Descriptor(descriptor) => Cow::Borrowed(descriptor),
        }
    }
}

impl From<TypeTag> for FieldRule {
    fn from(tag: TypeTag) -> Self {
        FieldRule::Tag(tag)
    }
}

impl From<RuleDescriptor> for FieldRule {
    fn from(descriptor: RuleDescriptor) -> Self {
        FieldRule::Descriptor(descriptor)
    }
}

impl From<RuleTree> for FieldRule {
    fn from(tree: RuleTree) -> Self {
        FieldRule::Descriptor(RuleDescriptor::new(RuleKind::Nested(tree)))
    }
}

/// Entry point for creating field rules.
///
/// `Rule` provides factory methods for each declared shape; the returned
/// [`RuleDescriptor`] supports `.required()` and `.one_of(...)` chaining.
pub struct Rule;

impl Rule {
    /// A scalar string rule.
    pub fn string() -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Scalar(TypeTag::String))
    }

    /// A scalar number rule.
    pub fn number() -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Scalar(TypeTag::Number))
    }

    /// A scalar boolean rule.
    pub fn boolean() -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Scalar(TypeTag::Boolean))
    }

    /// A scalar date rule.
    pub fn date() -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Scalar(TypeTag::Date))
    }

    /// A reference-identifier rule.
    pub fn reference() -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Scalar(TypeTag::Reference))
    }

    /// An array rule whose elements must satisfy `tag`.
    pub fn items(tag: TypeTag) -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Items(tag))
    }

    /// A nested-object rule validated against `tree`.
    pub fn nested(tree: RuleTree) -> RuleDescriptor {
        RuleDescriptor::new(RuleKind::Nested(tree))
    }
}

/// An ordered mapping from field name to rule.
///
/// Insertion order is preserved and determines the order of per-rule
/// violations, keeping the violation list deterministic.
///
/// # Example
///
/// ```rust
/// use lockstep::{Rule, RuleTree};
///
/// let rules = RuleTree::new()
///     .field("name", Rule::string().required())
///     .field(
///         "address",
///         RuleTree::new().field("zip", Rule::string().required()),
///     );
///
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTree {
    fields: IndexMap<String, FieldRule>,
}

impl RuleTree {
    /// Creates an empty rule tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field rule, returning self for chaining.
    ///
    /// Re-adding a name replaces the earlier rule but keeps its position.
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<FieldRule>) -> Self {
        self.fields.insert(name.into(), rule.into());
        self
    }

    /// Returns the rule for a field, if declared.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// Returns true if the field is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns an iterator over (name, rule) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
