//! Rule evaluation engine.
//!
//! The `RuleEngine` holds a rule catalog and an operator registry, and
//! decides pass/fail per (rule, record) pair, materializing a
//! [`Violation`] on failure.
//!
//! Error handling is deliberately two-tier: [`RuleEngine::evaluate_condition`]
//! surfaces every failure (unknown operator, bad regex, incompatible
//! value) to its caller, while [`RuleEngine::evaluate_rule`] swallows them
//! all and reports "no violation", so a single bad rule or data point can
//! never halt a stream. Swallowed errors are emitted on the `tracing`
//! debug channel.

use std::sync::Arc;

use serde_json::Value;
use vigil_rules::{Rule, RuleKind, RuleSet};

use crate::error::Result;
use crate::operators::{text, OperatorRegistry, Predicate};
use crate::record::Record;
use crate::result::Violation;

// Absent fields evaluate as null.
static NULL: Value = Value::Null;

/// Evaluates catalog rules against records.
pub struct RuleEngine {
    rules: RuleSet,
    operators: OperatorRegistry,
}

impl RuleEngine {
    /// Create an engine over a rule catalog with the built-in operators.
    pub fn new(rules: RuleSet) -> Self {
        RuleEngine {
            rules,
            operators: OperatorRegistry::with_builtins(),
        }
    }

    /// Create an engine with a caller-assembled operator registry.
    pub fn with_registry(rules: RuleSet, operators: OperatorRegistry) -> Self {
        RuleEngine { rules, operators }
    }

    /// Register a custom operator; an existing name is overwritten.
    pub fn register_operator<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&Value, &Value) -> Result<bool> + Send + Sync + 'static,
    {
        self.operators.register(name, predicate);
    }

    /// Access the rule catalog.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate a single condition against a record.
    ///
    /// This is the strict path: an operator name absent from the registry
    /// fails immediately with `UnknownOperator`, and predicate failures
    /// propagate. Only [`evaluate_rule`](Self::evaluate_rule) swallows
    /// these.
    pub fn evaluate_condition(
        &self,
        record: &Record,
        field: &str,
        operator: &str,
        expected: &Value,
    ) -> Result<bool> {
        let actual = record.field(field).unwrap_or(&NULL);
        let predicate: &Predicate = self.operators.resolve(operator)?;
        predicate(actual, expected)
    }

    /// Evaluate one rule against one record.
    ///
    /// Returns `Some(violation)` when the rule fails, `None` when it
    /// passes, does not apply, or its evaluation errored (fail-open).
    pub fn evaluate_rule(&self, rule: &Rule, record: &Record) -> Option<Arc<Violation>> {
        let outcome = match rule.kind {
            RuleKind::Simple => self.check_simple(rule, record),
            RuleKind::Conditional => self.check_conditional(rule, record),
        };
        match outcome {
            Ok(violation) => violation,
            Err(err) => {
                tracing::debug!(
                    rule_id = %rule.id,
                    error = %err,
                    "rule evaluation failed, treating as no violation"
                );
                None
            }
        }
    }

    /// Run every catalog rule against a record, collecting violations in
    /// catalog order.
    pub fn validate_record(&self, record: &Record) -> Vec<Arc<Violation>> {
        self.rules
            .iter()
            .filter_map(|rule| self.evaluate_rule(rule, record))
            .collect()
    }

    fn check_simple(&self, rule: &Rule, record: &Record) -> Result<Option<Arc<Violation>>> {
        let passed =
            self.evaluate_condition(record, &rule.field, &rule.operator, &rule.threshold)?;
        if passed {
            return Ok(None);
        }
        let expected = format!("{} {}", rule.operator, text(&rule.threshold));
        Ok(Some(self.build_violation(rule, record, &rule.field, expected)))
    }

    fn check_conditional(&self, rule: &Rule, record: &Record) -> Result<Option<Arc<Violation>>> {
        // Both clauses are required for the rule to apply at all.
        let (condition, then) = match (&rule.condition, &rule.then) {
            (Some(condition), Some(then)) => (condition, then),
            _ => return Ok(None),
        };

        let applies =
            self.evaluate_condition(record, &condition.field, &condition.operator, &condition.value)?;
        if !applies {
            return Ok(None);
        }

        let passed = self.evaluate_condition(record, &then.field, &then.operator, &then.value)?;
        if passed {
            return Ok(None);
        }

        let expected = format!(
            "{} {} (when {} {} {})",
            then.operator,
            text(&then.value),
            condition.field,
            condition.operator,
            text(&condition.value),
        );
        Ok(Some(self.build_violation(rule, record, &then.field, expected)))
    }

    fn build_violation(
        &self,
        rule: &Rule,
        record: &Record,
        field: &str,
        expected: String,
    ) -> Arc<Violation> {
        let actual_value = record.field(field).cloned().unwrap_or(Value::Null);
        Arc::new(Violation {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            severity: rule.severity,
            message: rule.message.clone(),
            timestamp: record.timestamp.clone(),
            entity_id: record.entity_id.clone(),
            field: field.to_string(),
            actual_value,
            expected,
            record_index: record.index,
        })
    }
}
