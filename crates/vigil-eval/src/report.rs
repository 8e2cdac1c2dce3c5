//! Report types: per-entity summaries and the end-of-run snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use vigil_rules::Severity;

use crate::result::{Status, Violation};

/// Running summary for one entity id.
///
/// Created when the first record for the entity arrives, mutated on every
/// subsequent one. Status flips to `Fail` permanently once any violation
/// is recorded.
#[derive(Debug, Clone)]
pub struct EntitySummary {
    pub entity_id: String,
    pub total_records: u64,
    pub violation_count: u64,
    pub status: Status,
    /// All violations for this entity, in arrival order.
    pub violations: Vec<Arc<Violation>>,
}

impl EntitySummary {
    pub(crate) fn new(entity_id: String) -> Self {
        EntitySummary {
            entity_id,
            total_records: 0,
            violation_count: 0,
            status: Status::Pass,
            violations: Vec::new(),
        }
    }

    /// Fraction of violation-free checks for this entity, as a percentage.
    ///
    /// Counts violations against records, so an entity whose records carry
    /// several violations each can go below zero.
    pub fn pass_rate(&self) -> f64 {
        let total = self.total_records.max(1) as f64;
        round2((self.total_records as f64 - self.violation_count as f64) / total * 100.0)
    }
}

// Serialized form carries the derived pass rate and omits the violation
// list; the report's global list already has every violation.
impl Serialize for EntitySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EntitySummary", 5)?;
        state.serialize_field("entity_id", &self.entity_id)?;
        state.serialize_field("total_records", &self.total_records)?;
        state.serialize_field("violation_count", &self.violation_count)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("pass_rate", &self.pass_rate())?;
        state.end()
    }
}

/// Headline numbers and provenance for a [`Report`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_records: u64,
    pub total_passed: u64,
    pub total_violations: u64,
    /// Percentage of records that passed; 100.0 for an empty run.
    pub pass_rate: f64,
    /// RFC 3339 UTC timestamp of report generation.
    pub generated_at: String,
    /// Identifier of the rules source (file path or a caller-chosen label).
    pub rules_source: String,
    /// Identifier of the input source.
    pub input_source: String,
}

/// Immutable snapshot of aggregation state at report time.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: ReportSummary,
    /// Violation counts keyed by rule id.
    pub violations_by_rule: BTreeMap<String, u64>,
    /// Violation counts keyed by severity.
    pub violations_by_severity: BTreeMap<Severity, u64>,
    /// Per-entity summaries keyed by entity id.
    pub entities: BTreeMap<String, EntitySummary>,
    /// Every violation of the run, in arrival order.
    pub violations: Vec<Arc<Violation>>,
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
