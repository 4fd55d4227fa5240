use thiserror::Error;

/// Errors that can occur when constructing a NetworkId
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkIdError {
    /// NetworkIds are strictly positive
    #[error("NetworkId must be positive, 0 is reserved")]
    Zero,
}
