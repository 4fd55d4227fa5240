//! # Rampart Client
//! The observing side of rampart: binds NetworkIds received from the
//! authority to local entities and applies their snapshots.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use rampart_shared::{
        HostType, NetworkId, Replicate, ReplicatedWorld, SerdeErr, SnapshotReader, SnapshotWriter,
    };
}

mod error;
mod observer_context;
mod remote_entity_manager;

pub use error::RemoteError;
pub use observer_context::ObserverContext;
pub use remote_entity_manager::{ApplyOutcome, RemoteEntityManager};
