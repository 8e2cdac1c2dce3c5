//! # vigil-rules
//!
//! Rule model and rules-document loading for the vigil log validator.
//!
//! A rules document is a JSON (or YAML) object of the shape
//! `{"rules": [ <rule>, ... ]}`. Each rule is either a *simple*
//! field/operator/threshold comparison or a *conditional* if/then pair
//! that is only checked when its condition holds.
//!
//! ## Quick Start
//!
//! ```rust
//! use vigil_rules::{parse_rules_json, RuleKind, Severity};
//!
//! let set = parse_rules_json(r#"{
//!     "rules": [
//!         {"id": "battery_min", "field": "battery_level",
//!          "operator": ">=", "threshold": 20,
//!          "severity": "warning", "message": "Battery below 20%"}
//!     ]
//! }"#).unwrap();
//!
//! let rule = set.get("battery_min").unwrap();
//! assert_eq!(rule.kind, RuleKind::Simple);
//! assert_eq!(rule.severity, Severity::Warning);
//! ```
//!
//! The only hard requirement at load time is that every rule carries an
//! `id`; `name` falls back to the id and `severity` to `warning`.

pub mod error;
pub mod loader;
pub mod model;

// Re-export the most commonly used types and functions at crate root
pub use error::{Result, RuleLoadError};
pub use loader::{load_rules_file, parse_rules_json, parse_rules_value, parse_rules_yaml};
pub use model::{Clause, Rule, RuleKind, RuleSet, Severity};
