use thiserror::Error;

/// Errors that can occur while loading a rules document.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rule at index {index} is missing required field 'id'")]
    MissingId { index: usize },

    #[error("unsupported rules format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, RuleLoadError>;
