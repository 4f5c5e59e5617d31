//! Parsing rule trees from JSON descriptions.
//!
//! The transport layer flattens whatever schema representation it holds into
//! a plain JSON object and hands it here. The accepted shape mirrors the rule
//! model: bare tag strings, one-element tag arrays, descriptor objects with
//! `type`/`required`/`enum` attributes, and nested rule objects.
//!
//! ```json
//! {
//!   "name": {"type": "string", "required": true},
//!   "age": "number",
//!   "tags": ["string"],
//!   "address": {"zip": {"type": "string", "required": true}}
//! }
//! ```

use serde_json::Value;

use super::{FieldRule, Rule, RuleDescriptor, RuleKind, RuleTree, TypeTag};

/// Errors produced while parsing a JSON rule description.
///
/// These are configuration problems on the caller's side, reported through
/// `Result` rather than as payload violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// The description (or a nested rule map) is not a JSON object.
    #[error("rule tree at '{field}' must be a JSON object")]
    NotAnObject {
        /// Dot-joined location of the offending description.
        field: String,
    },

    /// A type name is not one of the fixed tags.
    #[error("unknown type tag '{tag}' for field '{field}'")]
    UnknownTag {
        /// Dot-joined location of the offending rule.
        field: String,
        /// The unrecognized tag name.
        tag: String,
    },

    /// A rule is not a tag string, a one-element tag array, or an object.
    #[error("rule for field '{field}' must be a type tag, an array of one tag, or an object")]
    InvalidRule {
        /// Dot-joined location of the offending rule.
        field: String,
    },

    /// An array type declaration does not hold exactly one tag.
    #[error("array type for field '{field}' must contain exactly one type tag")]
    InvalidItems {
        /// Dot-joined location of the offending rule.
        field: String,
    },

    /// The `required` attribute is not a boolean.
    #[error("'required' for field '{field}' must be a boolean")]
    InvalidRequired {
        /// Dot-joined location of the offending rule.
        field: String,
    },

    /// The `enum` attribute is not an array.
    #[error("'enum' for field '{field}' must be an array")]
    InvalidEnum {
        /// Dot-joined location of the offending rule.
        field: String,
    },
}

impl RuleTree {
    /// Parses a rule tree from a JSON description.
    ///
    /// An object with a `type` key holding a tag string, a one-element tag
    /// array, or a nested rule object is a descriptor; an object without a
    /// `type` key is a nested rule tree. A nested field genuinely named
    /// `type` therefore needs the descriptor form around its parent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lockstep::RuleTree;
    /// use serde_json::json;
    ///
    /// let rules = RuleTree::from_value(&json!({
    ///     "name": {"type": "string", "required": true},
    ///     "age": "number",
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(rules.len(), 2);
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, RuleParseError> {
        parse_tree(value, "")
    }
}

fn parse_tree(value: &Value, at: &str) -> Result<RuleTree, RuleParseError> {
    let obj = value.as_object().ok_or_else(|| RuleParseError::NotAnObject {
        field: label(at),
    })?;

    let mut tree = RuleTree::new();
    for (name, rule_value) in obj {
        let field = join(at, name);
        tree = tree.field(name.clone(), parse_rule(rule_value, &field)?);
    }
    Ok(tree)
}

fn parse_rule(value: &Value, field: &str) -> Result<FieldRule, RuleParseError> {
    match value {
        Value::String(name) => parse_tag(name, field).map(FieldRule::Tag),
        Value::Array(items) => {
            let tag = parse_item_tag(items, field)?;
            Ok(Rule::items(tag).into())
        }
        Value::Object(obj) => {
            if let Some(type_value) = obj.get("type") {
                parse_descriptor(type_value, obj, field).map(FieldRule::Descriptor)
            } else {
                // No `type` attribute: a nested rule map.
                Ok(parse_tree(value, field)?.into())
            }
        }
        _ => Err(RuleParseError::InvalidRule {
            field: label(field),
        }),
    }
}

fn parse_descriptor(
    type_value: &Value,
    obj: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<RuleDescriptor, RuleParseError> {
    let kind = match type_value {
        Value::String(name) => RuleKind::Scalar(parse_tag(name, field)?),
        Value::Array(items) => RuleKind::Items(parse_item_tag(items, field)?),
        Value::Object(_) => RuleKind::Nested(parse_tree(type_value, field)?),
        _ => {
            return Err(RuleParseError::InvalidRule {
                field: label(field),
            })
        }
    };

    let mut descriptor = RuleDescriptor::new(kind);

    match obj.get("required") {
        None => {}
        Some(Value::Bool(true)) => descriptor = descriptor.required(),
        Some(Value::Bool(false)) => {}
        Some(_) => {
            return Err(RuleParseError::InvalidRequired {
                field: label(field),
            })
        }
    }

    match obj.get("enum") {
        None => {}
        Some(Value::Array(values)) => descriptor = descriptor.one_of(values.iter().cloned()),
        Some(_) => {
            return Err(RuleParseError::InvalidEnum {
                field: label(field),
            })
        }
    }

    // Other descriptor attributes are ignored, matching the permissiveness of
    // schema objects in the wild.
    Ok(descriptor)
}

fn parse_item_tag(items: &[Value], field: &str) -> Result<TypeTag, RuleParseError> {
    match items {
        [Value::String(name)] => parse_tag(name, field),
        _ => Err(RuleParseError::InvalidItems {
            field: label(field),
        }),
    }
}

fn parse_tag(name: &str, field: &str) -> Result<TypeTag, RuleParseError> {
    TypeTag::from_name(name).ok_or_else(|| RuleParseError::UnknownTag {
        field: label(field),
        tag: name.to_string(),
    })
}

fn join(at: &str, name: &str) -> String {
    if at.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", at, name)
    }
}

fn label(at: &str) -> String {
    if at.is_empty() {
        "(root)".to_string()
    } else {
        at.to_string()
    }
}
