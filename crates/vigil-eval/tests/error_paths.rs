//! Hard-versus-swallowed error-path tests.
//!
//! The direct condition API surfaces evaluation errors; rule-level
//! evaluation swallows them all, so no malformed rule or data point ever
//! stops a stream.

use serde_json::json;
use vigil_eval::{EvalError, Record, RuleEngine, Validator};
use vigil_rules::parse_rules_json;

#[test]
fn unknown_operator_surfaces_through_condition_api() {
    let engine = RuleEngine::new(parse_rules_json(r#"{"rules": []}"#).unwrap());
    let record = Record::from_value(json!({"battery_level": 50}), 0);

    let err = engine
        .evaluate_condition(&record, "battery_level", "almost_equal", &json!(50))
        .unwrap_err();
    assert!(
        matches!(err, EvalError::UnknownOperator(ref name) if name == "almost_equal"),
        "expected UnknownOperator, got: {err}"
    );
}

#[test]
fn invalid_regex_surfaces_through_condition_api() {
    let engine = RuleEngine::new(parse_rules_json(r#"{"rules": []}"#).unwrap());
    let record = Record::from_value(json!({"entity_id": "unit-1"}), 0);

    let err = engine
        .evaluate_condition(&record, "entity_id", "regex", &json!("[unclosed"))
        .unwrap_err();
    assert!(
        matches!(err, EvalError::InvalidRegex(_)),
        "expected InvalidRegex, got: {err}"
    );
}

#[test]
fn incompatible_expected_value_surfaces_through_condition_api() {
    let engine = RuleEngine::new(parse_rules_json(r#"{"rules": []}"#).unwrap());
    let record = Record::from_value(json!({"entity_id": "unit-1"}), 0);

    let err = engine
        .evaluate_condition(&record, "entity_id", "contains", &json!(42))
        .unwrap_err();
    assert!(
        matches!(err, EvalError::IncompatibleValue(_)),
        "expected IncompatibleValue, got: {err}"
    );
}

#[test]
fn stream_survives_a_catalog_full_of_broken_rules() {
    // Typo'd operator, invalid regex, wrong-typed expected value, and one
    // good rule: only the good rule produces violations, and every record
    // is processed.
    let mut validator = Validator::new(RuleEngine::new(
        parse_rules_json(
            r#"{"rules": [
                {"id": "typo", "field": "speed", "operator": "gte", "threshold": 0},
                {"id": "bad_regex", "field": "entity_id", "operator": "regex", "threshold": "[unclosed"},
                {"id": "bad_expected", "field": "entity_id", "operator": "contains", "threshold": 42},
                {"id": "speed_max", "field": "speed", "operator": "<=", "threshold": 100,
                 "severity": "error", "message": "Speed exceeds limit"}
            ]}"#,
        )
        .unwrap(),
    ));

    for (i, payload) in [
        json!({"entity_id": "unit-1", "speed": 120}),
        json!({"entity_id": "unit-1", "speed": 90}),
        json!({"entity_id": "unit-2", "speed": 150}),
    ]
    .into_iter()
    .enumerate()
    {
        validator.process(Record::from_value(payload, i));
    }

    assert_eq!(validator.total_records(), 3);
    assert_eq!(validator.total_violations(), 2);
    let report = validator.finalize("", "");
    assert!(report.violations_by_rule.contains_key("speed_max"));
    assert!(!report.violations_by_rule.contains_key("typo"));
    assert!(!report.violations_by_rule.contains_key("bad_regex"));
    assert!(!report.violations_by_rule.contains_key("bad_expected"));
}

#[test]
fn malformed_record_payload_never_panics() {
    // Payloads that are not even objects still flow through: every field
    // resolves to absent and rules behave per their null semantics.
    let mut validator = Validator::new(RuleEngine::new(
        parse_rules_json(
            r#"{"rules": [
                {"id": "battery_min", "field": "battery_level", "operator": ">=", "threshold": 20},
                {"id": "has_state", "field": "movement_state", "operator": "exists", "threshold": true}
            ]}"#,
        )
        .unwrap(),
    ));

    let result = validator.process(Record::from_value(json!("not an object"), 0));
    assert!(!result.passed());
    assert_eq!(result.violations.len(), 2);
    assert_eq!(result.record.entity_id, "unknown");
}

#[test]
fn conditional_with_broken_condition_clause_never_fires() {
    // The condition clause errors (unknown operator): fail-open means the
    // whole rule is silently inert, even though then would fail.
    let mut validator = Validator::new(RuleEngine::new(
        parse_rules_json(
            r#"{"rules": [{
                "id": "broken_condition", "type": "conditional",
                "condition": {"field": "battery_level", "operator": "below", "value": 10},
                "then": {"field": "movement_state", "operator": "in", "value": ["idle"]}
            }]}"#,
        )
        .unwrap(),
    ));

    let result = validator.process(Record::from_value(
        json!({"battery_level": 5, "movement_state": "moving"}),
        0,
    ));
    assert!(result.passed());
}
