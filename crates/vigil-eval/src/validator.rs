//! Streaming validator: drives the engine over a record stream and
//! accumulates counters, per-entity summaries, and the violation list.
//!
//! One `Validator` instance belongs to one caller on one thread; all
//! mutable state is owned exclusively by the instance and `reset()`
//! reinitializes it wholesale. Memory per incoming record is O(1) apart
//! from the accumulated violation list and the per-entity summary map.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use vigil_rules::Severity;

use crate::engine::RuleEngine;
use crate::record::Record;
use crate::report::{round2, EntitySummary, Report, ReportSummary};
use crate::result::{RecordResult, Status, Violation};

type ViolationListener = Box<dyn FnMut(&Violation)>;
type RecordListener = Box<dyn FnMut(&RecordResult)>;

/// Stateful aggregator over a stream of records.
///
/// Listeners are fixed at construction via the builder methods and
/// invoked synchronously: the violation listener once per violation (in
/// rule-catalog order within a record), the record listener once per
/// record after its violations are recorded. A listener that blocks
/// stalls the pipeline; there is no timeout.
pub struct Validator {
    engine: RuleEngine,
    total_records: u64,
    total_passed: u64,
    total_violations: u64,
    by_rule: BTreeMap<String, u64>,
    by_severity: BTreeMap<Severity, u64>,
    entities: BTreeMap<String, EntitySummary>,
    violations: Vec<Arc<Violation>>,
    on_violation: Option<ViolationListener>,
    on_record: Option<RecordListener>,
}

impl Validator {
    /// Create a validator over an engine, with no listeners.
    pub fn new(engine: RuleEngine) -> Self {
        Validator {
            engine,
            total_records: 0,
            total_passed: 0,
            total_violations: 0,
            by_rule: BTreeMap::new(),
            by_severity: BTreeMap::new(),
            entities: BTreeMap::new(),
            violations: Vec::new(),
            on_violation: None,
            on_record: None,
        }
    }

    /// Attach a violation listener, invoked once per violation.
    pub fn on_violation<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&Violation) + 'static,
    {
        self.on_violation = Some(Box::new(listener));
        self
    }

    /// Attach a record listener, invoked once per processed record.
    pub fn on_record<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&RecordResult) + 'static,
    {
        self.on_record = Some(Box::new(listener));
        self
    }

    /// Access the underlying engine.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn total_passed(&self) -> u64 {
        self.total_passed
    }

    pub fn total_violations(&self) -> u64 {
        self.total_violations
    }

    /// Percentage of records that passed; 100.0 before any record arrives.
    pub fn pass_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 100.0;
        }
        (self.total_passed as f64 / self.total_records as f64) * 100.0
    }

    /// Validate one record and fold it into the running aggregation.
    pub fn process(&mut self, record: Record) -> RecordResult {
        let violations = self.engine.validate_record(&record);
        let status = if violations.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        };

        self.total_records += 1;
        if status == Status::Pass {
            self.total_passed += 1;
        }

        let summary = self
            .entities
            .entry(record.entity_id.clone())
            .or_insert_with(|| EntitySummary::new(record.entity_id.clone()));
        summary.total_records += 1;

        for violation in &violations {
            self.total_violations += 1;
            *self.by_rule.entry(violation.rule_id.clone()).or_insert(0) += 1;
            *self.by_severity.entry(violation.severity).or_insert(0) += 1;
            self.violations.push(Arc::clone(violation));

            summary.violation_count += 1;
            summary.status = Status::Fail;
            summary.violations.push(Arc::clone(violation));

            if let Some(listener) = self.on_violation.as_mut() {
                listener(violation);
            }
        }

        let result = RecordResult {
            record,
            status,
            violations,
        };
        if let Some(listener) = self.on_record.as_mut() {
            listener(&result);
        }
        result
    }

    /// Lazily validate a stream of records.
    ///
    /// Each record is fully processed (all rules, all listener calls)
    /// when the consumer pulls it. Dropping the iterator early leaves the
    /// validator in a valid, reportable state covering what was consumed.
    pub fn process_stream<'a, I>(
        &'a mut self,
        records: I,
    ) -> impl Iterator<Item = RecordResult> + 'a
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: 'a,
    {
        records.into_iter().map(move |record| self.process(record))
    }

    /// Validate every record and collect the results.
    pub fn process_all<I>(&mut self, records: I) -> Vec<RecordResult>
    where
        I: IntoIterator<Item = Record>,
    {
        records.into_iter().map(|record| self.process(record)).collect()
    }

    /// Snapshot the current aggregation state into an immutable report.
    ///
    /// Does not reset anything and may be called repeatedly, including
    /// mid-stream for progress reporting.
    pub fn finalize(&self, rules_source: &str, input_source: &str) -> Report {
        Report {
            summary: ReportSummary {
                total_records: self.total_records,
                total_passed: self.total_passed,
                total_violations: self.total_violations,
                pass_rate: round2(self.pass_rate()),
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                rules_source: rules_source.to_string(),
                input_source: input_source.to_string(),
            },
            violations_by_rule: self.by_rule.clone(),
            violations_by_severity: self.by_severity.clone(),
            entities: self.entities.clone(),
            violations: self.violations.clone(),
        }
    }

    /// Discard all running state and return to the initial empty state.
    /// The engine and listeners stay.
    pub fn reset(&mut self) {
        self.total_records = 0;
        self.total_passed = 0;
        self.total_violations = 0;
        self.by_rule = BTreeMap::new();
        self.by_severity = BTreeMap::new();
        self.entities = BTreeMap::new();
        self.violations = Vec::new();
    }
}
