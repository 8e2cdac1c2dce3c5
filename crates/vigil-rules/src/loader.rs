//! Rules-document loading: JSON and YAML sources into a [`RuleSet`].
//!
//! Documents have the shape `{"rules": [ <rule>, ... ]}`. Loading is a
//! two-step raw-deserialize-then-finalize: the raw form is permissive
//! (everything optional), and finalization enforces the one hard
//! requirement — every rule must carry an `id`.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, RuleLoadError};
use crate::model::{Clause, Rule, RuleKind, RuleSet, Severity};

// =============================================================================
// Raw document shape
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    severity: Severity,
    #[serde(default)]
    message: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "type")]
    kind: RuleKind,
    #[serde(default)]
    field: String,
    #[serde(default)]
    operator: String,
    #[serde(default)]
    threshold: Value,
    #[serde(default)]
    condition: Option<Clause>,
    #[serde(default)]
    then: Option<Clause>,
}

impl RawRule {
    /// Enforce the `id` requirement and apply the name-defaults-to-id rule.
    fn finalize(self, index: usize) -> Result<Rule> {
        let id = self.id.ok_or(RuleLoadError::MissingId { index })?;
        let name = self.name.unwrap_or_else(|| id.clone());
        Ok(Rule {
            id,
            name,
            severity: self.severity,
            message: self.message,
            description: self.description,
            kind: self.kind,
            field: self.field,
            operator: self.operator,
            threshold: self.threshold,
            condition: self.condition,
            then: self.then,
        })
    }
}

fn finalize_document(raw: RawDocument) -> Result<RuleSet> {
    let mut set = RuleSet::new();
    for (index, raw_rule) in raw.rules.into_iter().enumerate() {
        set.push(raw_rule.finalize(index)?);
    }
    Ok(set)
}

// =============================================================================
// Public API
// =============================================================================

/// Parse a rules document from a JSON string.
pub fn parse_rules_json(json: &str) -> Result<RuleSet> {
    let raw: RawDocument = serde_json::from_str(json)?;
    finalize_document(raw)
}

/// Parse a rules document from a YAML string.
pub fn parse_rules_yaml(yaml: &str) -> Result<RuleSet> {
    let raw: RawDocument = serde_yaml::from_str(yaml)?;
    finalize_document(raw)
}

/// Parse a rules document from an already-decoded JSON value.
pub fn parse_rules_value(value: Value) -> Result<RuleSet> {
    let raw: RawDocument = serde_json::from_value(value)?;
    finalize_document(raw)
}

/// Load a rules document from a file, dispatching on the extension:
/// `.json` is parsed as JSON, `.yaml`/`.yml` as YAML.
pub fn load_rules_file(path: &Path) -> Result<RuleSet> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_rules_json(&content),
        Some("yaml" | "yml") => parse_rules_yaml(&content),
        other => Err(RuleLoadError::UnsupportedFormat(
            other.unwrap_or("").to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_rule() {
        let set = parse_rules_json(
            r#"{"rules": [{"id": "battery_min", "field": "battery_level", "operator": ">=", "threshold": 20}]}"#,
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        let rule = set.get("battery_min").unwrap();
        assert_eq!(rule.name, "battery_min");
        assert_eq!(rule.severity, Severity::Warning);
        assert_eq!(rule.kind, RuleKind::Simple);
        assert_eq!(rule.threshold, json!(20));
    }

    #[test]
    fn test_parse_full_rule() {
        let set = parse_rules_json(
            r#"{
                "rules": [{
                    "id": "speed_max",
                    "name": "Speed Maximum",
                    "field": "speed",
                    "operator": "<=",
                    "threshold": 100,
                    "severity": "error",
                    "message": "Speed exceeds limit",
                    "description": "Units must stay under the site speed cap"
                }]
            }"#,
        )
        .unwrap();

        let rule = set.get("speed_max").unwrap();
        assert_eq!(rule.name, "Speed Maximum");
        assert_eq!(rule.severity, Severity::Error);
        assert_eq!(rule.message, "Speed exceeds limit");
    }

    #[test]
    fn test_parse_conditional_rule() {
        let set = parse_rules_json(
            r#"{
                "rules": [{
                    "id": "no_movement_on_low_battery",
                    "type": "conditional",
                    "severity": "critical",
                    "message": "Moving with critical battery",
                    "condition": {"field": "battery_level", "operator": "<", "value": 10},
                    "then": {"field": "movement_state", "operator": "in", "value": ["idle", "stopped"]}
                }]
            }"#,
        )
        .unwrap();

        let rule = set.get("no_movement_on_low_battery").unwrap();
        assert_eq!(rule.kind, RuleKind::Conditional);
        let cond = rule.condition.as_ref().unwrap();
        assert_eq!(cond.field, "battery_level");
        assert_eq!(cond.operator, "<");
        assert_eq!(cond.value, json!(10));
        let then = rule.then.as_ref().unwrap();
        assert_eq!(then.field, "movement_state");
    }

    #[test]
    fn test_missing_id_is_hard_error() {
        let err = parse_rules_json(
            r#"{"rules": [{"id": "ok"}, {"field": "speed", "operator": "<=", "threshold": 100}]}"#,
        )
        .unwrap_err();

        assert!(
            matches!(err, RuleLoadError::MissingId { index: 1 }),
            "expected MissingId at index 1, got: {err}"
        );
    }

    #[test]
    fn test_unknown_severity_is_load_error() {
        let err = parse_rules_json(r#"{"rules": [{"id": "r", "severity": "fatal"}]}"#).unwrap_err();
        assert!(matches!(err, RuleLoadError::Json(_)));
    }

    #[test]
    fn test_missing_rules_key_is_empty_set() {
        let set = parse_rules_json("{}").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_rules_value() {
        let set = parse_rules_value(json!({
            "rules": [{"id": "r1"}, {"id": "r2"}]
        }))
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_yaml_parity() {
        let set = parse_rules_yaml(
            r#"
rules:
  - id: battery_min
    field: battery_level
    operator: ">="
    threshold: 20
    severity: warning
    message: Battery below 20%
"#,
        )
        .unwrap();

        let rule = set.get("battery_min").unwrap();
        assert_eq!(rule.severity, Severity::Warning);
        assert_eq!(rule.threshold, json!(20));
    }

    #[test]
    fn test_incomplete_clause_still_loads() {
        // A conditional rule whose clauses are structurally incomplete
        // loads fine; it just never fires at evaluation time.
        let set = parse_rules_json(
            r#"{
                "rules": [{
                    "id": "half_formed",
                    "type": "conditional",
                    "condition": {"field": "battery_level"}
                }]
            }"#,
        )
        .unwrap();

        let rule = set.get("half_formed").unwrap();
        assert!(rule.condition.is_some());
        assert!(rule.then.is_none());
        assert_eq!(rule.condition.as_ref().unwrap().operator, "");
    }
}
