use thiserror::Error;

/// Result type for query assembly operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while assembling a statement
#[derive(Error, Debug)]
pub enum QueryError {
    /// Two fragments tried to bind the same parameter name. With
    /// generator-issued names this indicates a caller bypassed renaming.
    #[error("Parameter collision: {key} is already bound")]
    ParameterCollision { key: String },
}
