use thiserror::Error;

/// Rejected link input. Always terminal: retrying the same request fails the
/// same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),
}
