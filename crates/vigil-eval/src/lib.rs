//! # vigil-eval
//!
//! Rule evaluation engine and streaming aggregator for the vigil log
//! validator.
//!
//! This crate consumes the rule catalog produced by [`vigil_rules`] and
//! evaluates it against decoded [`Record`]s, accumulating per-record
//! verdicts, per-entity summaries, and a final [`Report`].
//!
//! ## Architecture
//!
//! - **Operator registry** ([`OperatorRegistry`]): named binary predicates
//!   over (actual, expected), extensible at runtime without touching
//!   engine code.
//! - **Rule engine** ([`RuleEngine`]): pass/fail per (rule, record) with
//!   dotted-path field resolution and conditional if/then short-circuit.
//!   Evaluation failures are swallowed at the rule level (fail-open) so a
//!   bad rule or data point never halts the stream; only the direct
//!   condition API surfaces them.
//! - **Validator** ([`Validator`]): single-threaded pull-based aggregation
//!   with O(1) memory per incoming record aside from the accumulated
//!   violation list, plus optional synchronous listeners.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use vigil_eval::{Record, RuleEngine, Validator};
//! use vigil_rules::parse_rules_json;
//!
//! let rules = parse_rules_json(r#"{
//!     "rules": [
//!         {"id": "battery_min", "field": "battery_level",
//!          "operator": ">=", "threshold": 20,
//!          "severity": "warning", "message": "Battery below 20%"}
//!     ]
//! }"#).unwrap();
//!
//! let mut validator = Validator::new(RuleEngine::new(rules));
//!
//! let record = Record::from_value(json!({"entity_id": "unit-1", "battery_level": 15}), 0);
//! let result = validator.process(record);
//! assert!(!result.passed());
//! assert_eq!(result.violations[0].expected, ">= 20");
//!
//! let report = validator.finalize("inline", "example");
//! assert_eq!(report.summary.total_violations, 1);
//! ```
//!
//! ## Listeners
//!
//! ```rust
//! use serde_json::json;
//! use vigil_eval::{Record, RuleEngine, Validator};
//! use vigil_rules::parse_rules_json;
//!
//! let rules = parse_rules_json(r#"{
//!     "rules": [{"id": "speed_max", "field": "speed",
//!                "operator": "<=", "threshold": 100,
//!                "severity": "error", "message": "Speed exceeds limit"}]
//! }"#).unwrap();
//!
//! let mut validator = Validator::new(RuleEngine::new(rules))
//!     .on_violation(|v| eprintln!("[{}] {}: {}", v.severity, v.entity_id, v.message));
//!
//! for (i, payload) in [json!({"speed": 80}), json!({"speed": 130})].into_iter().enumerate() {
//!     validator.process(Record::from_value(payload, i));
//! }
//! assert_eq!(validator.total_violations(), 1);
//! ```

pub mod engine;
pub mod error;
pub mod operators;
pub mod record;
pub mod report;
pub mod result;
pub mod validator;

// Re-export the most commonly used types at crate root
pub use engine::RuleEngine;
pub use error::{EvalError, Result};
pub use operators::{OperatorRegistry, Predicate};
pub use record::Record;
pub use report::{EntitySummary, Report, ReportSummary};
pub use result::{RecordResult, Status, Violation};
pub use validator::Validator;
