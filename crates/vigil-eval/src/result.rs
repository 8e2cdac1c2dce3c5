//! Per-record validation result types.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use vigil_rules::Severity;

use crate::record::Record;

/// Pass/fail status of a record or an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

/// Evidence that a specific rule failed for a specific record.
///
/// Created exactly once per (rule, record) failure and never mutated;
/// the same allocation is shared by every container that references it
/// (global list, entity summary, per-record result).
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    /// Timestamp of the offending record.
    pub timestamp: String,
    pub entity_id: String,
    /// The field the failed check applied to.
    pub field: String,
    /// The resolved value of that field (`null` when absent).
    pub actual_value: Value,
    /// Human-readable description of what the rule required.
    pub expected: String,
    /// Arrival index of the offending record.
    pub record_index: usize,
}

/// The result of validating a single record against the whole catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResult {
    pub record: Record,
    pub status: Status,
    /// Violations in rule-catalog order; empty iff `status` is `Pass`.
    pub violations: Vec<Arc<Violation>>,
}

impl RecordResult {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}
