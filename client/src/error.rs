use thiserror::Error;

use rampart_shared::{NetworkId, SerdeErr};

/// Errors that can occur while binding remote entities or applying their
/// snapshots
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The remote entity manager does not exist yet. The entity stays
    /// unsynchronized until it registers again.
    #[error("Remote entity manager not ready - NetworkId {network_id} left unbound")]
    ManagerNotReady { network_id: NetworkId },

    /// The NetworkId is already bound to a different local entity
    #[error("NetworkId {network_id} is already bound to another entity")]
    IdAlreadyBound { network_id: NetworkId },

    /// The snapshot could not be decoded
    #[error("Failed to decode snapshot for NetworkId {network_id}: {source}")]
    Decode {
        network_id: NetworkId,
        #[source]
        source: SerdeErr,
    },

    /// The snapshot was applied but carried more bytes than its schema reads
    #[error("Snapshot for NetworkId {network_id} has {remaining} trailing bytes")]
    TrailingBytes {
        network_id: NetworkId,
        remaining: usize,
    },
}
