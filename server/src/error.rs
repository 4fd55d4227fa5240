use thiserror::Error;

/// Errors returned by the authority's entity registry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry has not been initialized, or was torn down
    #[error("Entity registry is not initialized - cannot {operation}")]
    NotInitialized { operation: &'static str },

    /// Every NetworkId has been handed out
    #[error("NetworkId space exhausted - no id left to assign")]
    IdSpaceExhausted,
}
