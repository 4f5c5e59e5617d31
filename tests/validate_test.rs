//! Integration tests for the lock-step tree validator.

use lockstep::{validate, Rule, RuleTree, TypeTag, Validator};
use serde_json::json;

#[test]
fn test_missing_required_and_type_mismatch() {
    let rules = RuleTree::new()
        .field("name", Rule::string().required())
        .field("age", TypeTag::Number);

    let violations = validate(&json!({"age": "12"}), &rules);

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].path.to_string(), "name");
    assert_eq!(violations[0].message, "must have required property 'name'");
    assert_eq!(violations[1].path.to_string(), "age");
    assert_eq!(
        violations[1].message,
        "must be of type 'number', received 'string'"
    );
}

#[test]
fn test_array_element_violation_shares_field_path() {
    let rules = RuleTree::new().field("tags", Rule::items(TypeTag::String));

    let violations = validate(&json!({"tags": ["a", 2, "c"]}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "tags");
    assert_eq!(
        violations[0].message,
        "each item in 'tags' must be of type 'string', received 'number'"
    );
}

#[test]
fn test_enum_violation_lists_allowed_values() {
    let rules = RuleTree::new().field(
        "role",
        Rule::string().one_of([json!("admin"), json!("user")]),
    );

    let violations = validate(&json!({"role": "guest"}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "role");
    assert_eq!(
        violations[0].message,
        "must be one of the following values: admin, user"
    );
}

#[test]
fn test_unexpected_key() {
    let rules = RuleTree::new();

    let violations = validate(&json!({"extra": 1}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "extra");
    assert_eq!(violations[0].message, "must NOT have additional properties");
}

#[test]
fn test_boolean_never_coerces_to_date() {
    let rules = RuleTree::new().field("dob", TypeTag::Date);

    let violations = validate(&json!({"dob": true}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "dob");
    assert_eq!(
        violations[0].message,
        "must be of type 'date', received 'boolean'"
    );
}

#[test]
fn test_nested_required_field() {
    let rules = RuleTree::new().field(
        "address",
        RuleTree::new().field("name", Rule::string().required()),
    );

    let violations = validate(&json!({"address": {}}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "address.name");
    assert_eq!(violations[0].message, "must have required property 'name'");
}

#[test]
fn test_conformant_payload_is_empty() {
    let rules = RuleTree::new()
        .field("name", Rule::string().required())
        .field("age", TypeTag::Number)
        .field("active", TypeTag::Boolean)
        .field("joined", TypeTag::Date)
        .field("owner", Rule::reference())
        .field("tags", Rule::items(TypeTag::String))
        .field(
            "address",
            RuleTree::new()
                .field("zip", Rule::string().required())
                .field("city", TypeTag::String),
        );

    let payload = json!({
        "name": "ada",
        "age": 36,
        "active": true,
        "joined": "2024-03-01",
        "owner": "507f1f77bcf86cd799439011",
        "tags": ["engineering", "ops"],
        "address": {"zip": "10115", "city": "Berlin"},
    });

    assert!(validate(&payload, &rules).is_empty());
}

#[test]
fn test_determinism() {
    let rules = RuleTree::new()
        .field("name", Rule::string().required())
        .field("tags", Rule::items(TypeTag::Number))
        .field("role", Rule::string().one_of([json!("admin")]));
    let payload = json!({"extra": {}, "tags": ["x", "y"], "role": "guest"});

    let first = validate(&payload, &rules);
    let second = validate(&payload, &rules);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_required_short_circuits_other_checks() {
    let rules = RuleTree::new().field(
        "role",
        Rule::string().required().one_of([json!("admin")]),
    );

    let violations = validate(&json!({}), &rules);

    // Exactly one presence violation; no type or enum violations follow.
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "required");
}

#[test]
fn test_absent_optional_field_is_not_checked() {
    let rules = RuleTree::new().field(
        "role",
        Rule::string().one_of([json!("admin"), json!("user")]),
    );

    assert!(validate(&json!({}), &rules).is_empty());
}

#[test]
fn test_present_optional_field_is_type_checked() {
    let rules = RuleTree::new().field("age", TypeTag::Number);

    let violations = validate(&json!({"age": null}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "must be of type 'number', received 'null'"
    );
}

#[test]
fn test_unknown_key_reported_once_regardless_of_shape() {
    let rules = RuleTree::new().field("name", TypeTag::String);

    let violations = validate(
        &json!({
            "name": "ada",
            "extra": {"deeply": {"nested": ["junk", {"more": 1}]}},
        }),
        &rules,
    );

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "extra");
    assert_eq!(violations[0].code, "additional_property");
}

#[test]
fn test_enum_aggregates_to_one_violation_per_field() {
    let rules = RuleTree::new().field(
        "roles",
        Rule::items(TypeTag::String).one_of([json!("admin"), json!("user")]),
    );

    let violations = validate(&json!({"roles": ["guest", "user", "root"]}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "enum");
    assert_eq!(violations[0].path.to_string(), "roles");
}

#[test]
fn test_enum_over_array_checks_every_element() {
    let rules = RuleTree::new().field(
        "roles",
        Rule::items(TypeTag::String).one_of([json!("admin"), json!("user")]),
    );

    assert!(validate(&json!({"roles": ["admin", "user", "admin"]}), &rules).is_empty());

    let violations = validate(&json!({"roles": ["admin", "guest"]}), &rules);
    assert_eq!(violations.len(), 1);
}

#[test]
fn test_enum_still_runs_after_type_mismatch() {
    let rules = RuleTree::new().field(
        "role",
        Rule::string().one_of([json!("admin"), json!("user")]),
    );

    let violations = validate(&json!({"role": 3}), &rules);

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].code, "invalid_type");
    assert_eq!(violations[1].code, "enum");
}

#[test]
fn test_scalar_rule_with_object_value_reports_both_ways() {
    // Recursion is keyed off the payload value's shape, independent of the
    // declared type: the object is walked against an empty tree (every key
    // unexpected) and the scalar check still fires.
    let rules = RuleTree::new().field("name", TypeTag::String);

    let violations = validate(&json!({"name": {"first": "ada", "last": "lovelace"}}), &rules);

    assert_eq!(violations.len(), 3);
    assert_eq!(violations[0].path.to_string(), "name.first");
    assert_eq!(violations[0].code, "additional_property");
    assert_eq!(violations[1].path.to_string(), "name.last");
    assert_eq!(violations[1].code, "additional_property");
    assert_eq!(violations[2].path.to_string(), "name");
    assert_eq!(
        violations[2].message,
        "must be of type 'string', received 'object'"
    );
}

#[test]
fn test_array_rule_with_object_value() {
    let rules = RuleTree::new().field("tags", Rule::items(TypeTag::String));

    let violations = validate(&json!({"tags": {"a": 1}}), &rules);

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].path.to_string(), "tags.a");
    assert_eq!(violations[0].code, "additional_property");
    assert_eq!(
        violations[1].message,
        "must be of type 'array', received 'object'"
    );
}

#[test]
fn test_array_rule_with_scalar_value() {
    let rules = RuleTree::new().field("tags", Rule::items(TypeTag::String));

    let violations = validate(&json!({"tags": "solo"}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "must be of type 'array', received 'string'"
    );
}

#[test]
fn test_nested_rule_with_scalar_value_passes_silently() {
    // A nested-declared field receiving a scalar produces no type violation;
    // only presence and enum checks apply to it.
    let rules = RuleTree::new().field(
        "address",
        RuleTree::new().field("zip", Rule::string().required()),
    );

    assert!(validate(&json!({"address": "10115"}), &rules).is_empty());
}

#[test]
fn test_unknown_keys_at_every_level() {
    let rules = RuleTree::new().field(
        "address",
        RuleTree::new().field("zip", TypeTag::String),
    );

    let violations = validate(
        &json!({
            "top": 1,
            "address": {"zip": "10115", "inner": true},
        }),
        &rules,
    );

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].path.to_string(), "top");
    assert_eq!(violations[1].path.to_string(), "address.inner");
}

#[test]
fn test_violation_order_is_rule_declaration_order() {
    let rules = RuleTree::new()
        .field("zeta", Rule::number().required())
        .field("alpha", Rule::string().required());

    let violations = validate(&json!({}), &rules);

    let paths: Vec<_> = violations.iter().map(|v| v.path.to_string()).collect();
    assert_eq!(paths, vec!["zeta", "alpha"]);
}

#[test]
fn test_deeply_nested_paths() {
    let rules = RuleTree::new().field(
        "order",
        RuleTree::new().field(
            "shipping",
            RuleTree::new().field("zip", Rule::string().required()),
        ),
    );

    let violations = validate(&json!({"order": {"shipping": {}}}), &rules);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "order.shipping.zip");
}

#[test]
fn test_batch_validation() {
    let rules = RuleTree::new().field("name", Rule::string().required());
    let payloads = vec![
        json!({"name": "ada"}),
        json!({"name": 7}),
        json!({}),
    ];

    let results = Validator::new().validate_all(&payloads, &rules);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_empty());
    assert_eq!(results[1][0].code, "invalid_type");
    assert_eq!(results[2][0].code, "required");

    // Batch results match one-at-a-time results exactly.
    for (payload, batch) in payloads.iter().zip(&results) {
        assert_eq!(&validate(payload, &rules), batch);
    }
}

#[test]
fn test_rules_parsed_from_json_behave_identically() {
    let parsed = RuleTree::from_value(&json!({
        "name": {"type": "string", "required": true},
        "age": "number",
        "tags": ["string"],
        "role": {"type": "string", "enum": ["admin", "user"]},
        "address": {"zip": {"type": "string", "required": true}},
    }))
    .unwrap();

    let built = RuleTree::new()
        .field("name", Rule::string().required())
        .field("age", TypeTag::Number)
        .field("tags", Rule::items(TypeTag::String))
        .field("role", Rule::string().one_of([json!("admin"), json!("user")]))
        .field(
            "address",
            RuleTree::new().field("zip", Rule::string().required()),
        );

    let payload = json!({
        "age": "36",
        "tags": ["a", 2],
        "role": "guest",
        "address": {},
        "extra": null,
    });

    assert_eq!(validate(&payload, &parsed), validate(&payload, &built));
}
