use thiserror::Error;

/// Result alias used across the crate.
pub type SecurityResult<T> = Result<T, SecurityError>;

/// Errors produced by this crate.
///
/// Sanitizers and validators never return errors — malformed input maps to a
/// safe default instead. This type covers config loading, URL parsing inside
/// the parameter guard, and storage backends that can actually fail.
#[derive(Error, Debug)]
pub enum SecurityError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// URL parse or rewrite error.
    #[error("URL error: {0}")]
    Url(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
