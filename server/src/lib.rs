//! # Rampart Server
//! The authoritative side of rampart: assigns NetworkIds to replicated
//! entities and emits their snapshots each tick, for an external transport
//! to deliver to observers.

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
mod registry;
mod server_config;

pub use error::RegistryError;
pub use registry::{AuthorityContext, EntityRegistry, EntitySnapshot};
pub use server_config::ReplicationConfig;
