//! Rule model types: severity levels, rule kinds, clauses, and the catalog.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Enumerations
// =============================================================================

/// Severity level attached to a rule and carried into its violations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Severity::Info),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        })
    }
}

/// The two rule shapes: a plain field comparison, or an if/then pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Simple,
    Conditional,
}

// =============================================================================
// Rules
// =============================================================================

/// One half of a conditional rule: a field, an operator name, and an
/// expected value.
///
/// All parts default to empty so that a structurally incomplete clause
/// loads fine and simply never matches at evaluation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clause {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

/// A declarative validation rule.
///
/// `Simple` rules carry `field`/`operator`/`threshold`; `Conditional`
/// rules carry a `condition` clause and a `then` clause, and only check
/// `then` when `condition` holds. A conditional rule missing either
/// clause is vacuously satisfied.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// Unique-by-convention identifier. The catalog does not dedup:
    /// duplicate ids are permitted and all evaluate.
    pub id: String,
    /// Human-readable name; defaults to `id` when absent in the source.
    pub name: String,
    pub severity: Severity,
    pub message: String,
    pub description: String,
    pub kind: RuleKind,
    pub field: String,
    pub operator: String,
    pub threshold: Value,
    pub condition: Option<Clause>,
    pub then: Option<Clause>,
}

// =============================================================================
// RuleSet — the rule catalog
// =============================================================================

/// An ordered collection of loaded rules.
///
/// Purely a data container: evaluation walks it linearly in load order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty catalog.
    pub fn new() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// Build a catalog from already-constructed rules.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    /// Append a rule, preserving load order.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Number of rules in the catalog.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// First rule with the given id, if any.
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
