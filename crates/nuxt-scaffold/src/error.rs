//! Configuration errors
//!
//! These are defects in the static configuration or in the answers handed to
//! the resolver. They are raised while loading, never during resolution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown option key '{0}'")]
    UnknownKey(String),

    #[error("'{value}' is not a valid choice for '{key}' (expected one of: {expected})")]
    InvalidChoice {
        key: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid filter expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("invalid filter pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to parse answers")]
    Answers(#[from] serde_yaml::Error),
}
