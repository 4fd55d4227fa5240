use thiserror::Error;

/// Errors that can occur while decoding a snapshot buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The buffer ended before a complete value could be read
    #[error("Snapshot buffer ended early: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },
}
