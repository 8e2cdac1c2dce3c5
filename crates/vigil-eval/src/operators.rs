//! Operator registry: named binary predicates over (actual, expected).
//!
//! Operators are dispatched by name through a registry lookup, so new
//! predicates can be registered at runtime without touching engine code.
//! Custom predicates may shadow built-ins by reusing a name.
//!
//! Every predicate receives the resolved field value (`Value::Null` for
//! absent fields) and the rule's expected value, and returns
//! `Result<bool>`: `Ok(false)` is a clean mismatch, `Err` is an
//! evaluation failure (bad pattern, wrong-typed expected value) that the
//! rule-level orchestration decides to surface or swallow.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::{EvalError, Result};

/// A named binary predicate over (actual value, expected value).
pub type Predicate = Arc<dyn Fn(&Value, &Value) -> Result<bool> + Send + Sync>;

/// Registry mapping operator names to predicates.
pub struct OperatorRegistry {
    ops: HashMap<String, Predicate>,
}

impl OperatorRegistry {
    /// Create a registry pre-populated with the built-in operators.
    pub fn with_builtins() -> Self {
        let mut registry = OperatorRegistry {
            ops: HashMap::new(),
        };
        registry.install_builtins();
        registry
    }

    /// Create an empty registry with no operators at all.
    pub fn empty() -> Self {
        OperatorRegistry {
            ops: HashMap::new(),
        }
    }

    /// Register a predicate under a name, overwriting any existing one.
    pub fn register<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&Value, &Value) -> Result<bool> + Send + Sync + 'static,
    {
        self.ops.insert(name.to_string(), Arc::new(predicate));
    }

    /// Look up a predicate by name.
    pub fn resolve(&self, name: &str) -> Result<&Predicate> {
        self.ops
            .get(name)
            .ok_or_else(|| EvalError::UnknownOperator(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Names of all registered operators, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    fn install_builtins(&mut self) {
        self.register(">=", |a, e| {
            Ok(matches!(
                compare(a, e),
                Some(Ordering::Greater | Ordering::Equal)
            ))
        });
        self.register(">", |a, e| {
            Ok(matches!(compare(a, e), Some(Ordering::Greater)))
        });
        self.register("<=", |a, e| {
            Ok(matches!(
                compare(a, e),
                Some(Ordering::Less | Ordering::Equal)
            ))
        });
        self.register("<", |a, e| Ok(matches!(compare(a, e), Some(Ordering::Less))));

        self.register("==", |a, e| Ok(values_equal(a, e)));
        self.register("!=", |a, e| Ok(!values_equal(a, e)));

        self.register("in", |a, e| {
            Ok(e.as_array()
                .map_or(false, |items| items.iter().any(|i| values_equal(a, i))))
        });
        self.register("not_in", |a, e| {
            Ok(e.as_array()
                .map_or(true, |items| !items.iter().any(|i| values_equal(a, i))))
        });

        self.register("regex", |a, e| {
            if a.is_null() {
                return Ok(false);
            }
            let pattern = e.as_str().ok_or_else(|| {
                EvalError::IncompatibleValue(format!("regex pattern must be a string, got {e}"))
            })?;
            // Anchor at the start only: the pattern must match from the
            // beginning of the value but need not cover all of it.
            let re = Regex::new(&format!(r"\A(?:{pattern})"))?;
            Ok(re.is_match(&text(a)))
        });

        self.register("exists", |a, e| {
            Ok(e.as_bool().map_or(false, |want| !a.is_null() == want))
        });

        self.register("contains", |a, e| {
            if a.is_null() {
                return Ok(false);
            }
            let needle = expect_str("contains", e)?;
            Ok(text(a).contains(needle))
        });
        self.register("starts_with", |a, e| {
            if a.is_null() {
                return Ok(false);
            }
            let prefix = expect_str("starts_with", e)?;
            Ok(text(a).starts_with(prefix))
        });
        self.register("ends_with", |a, e| {
            if a.is_null() {
                return Ok(false);
            }
            let suffix = expect_str("ends_with", e)?;
            Ok(text(a).ends_with(suffix))
        });
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// =============================================================================
// Value helpers
// =============================================================================

/// Ordered comparison: numbers compare as f64, strings lexicographically.
/// Any other pairing (including a null actual) is unordered.
fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

/// Loose equality: numbers compare by numeric value (`15 == 15.0`),
/// everything else by structural equality (`null == null` included).
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Stringify a value for substring/regex matching: strings verbatim,
/// everything else via its compact JSON rendering.
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn expect_str<'a>(op: &str, expected: &'a Value) -> Result<&'a str> {
    expected.as_str().ok_or_else(|| {
        EvalError::IncompatibleValue(format!("{op} expects a string value, got {expected}"))
    })
}
