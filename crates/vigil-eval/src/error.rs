//! Evaluation-specific error types.

use thiserror::Error;

/// Errors that can occur while evaluating a condition against a record.
///
/// Inside [`crate::engine::RuleEngine::evaluate_rule`] these are swallowed
/// (fail-open); through the direct condition API they surface to the caller.
#[derive(Debug, Error)]
pub enum EvalError {
    /// An operator name was not found in the registry.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// A regex pattern failed to compile.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// An expected value's type is incompatible with the operator.
    #[error("incompatible value for operator: {0}")]
    IncompatibleValue(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EvalError>;
