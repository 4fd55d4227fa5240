//! # Rampart Shared
//! Common functionality shared between rampart-server & rampart-client crates:
//! replicated properties and their schemas, the entity replication contract,
//! the replicated world entities, and the bomb objective state machines.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use rampart_serde::{
    ConstByteLength, FieldKind, Quat, Serde, SerdeErr, SnapshotReader, SnapshotWriter, Transform,
    Vec3, WireField,
};

mod entities;
mod objective;
mod signal;
mod types;
mod world;

pub use entities::{
    Door, DoorState, MovingPlatform, PathFollower, PathState, PlatformState, DOOR_SCHEMA,
    PATH_FOLLOWER_SCHEMA, PLATFORM_SCHEMA,
};
pub use objective::{
    assign_site_indices, ActiveBombSlot, BombPhase, BombSignal, BombSite, BombState,
    CancelReason, InteractInput, ObjectiveConfig, ObjectiveEventData, ObjectiveEventType,
    ObjectivePolicy, ObjectiveTick, ObjectiveWorld, ParticipantId, PlantedBomb, SiteInfo, SiteKey,
    SitePhase, SiteSignal, SiteState, TeamId, BOMB_SCHEMA, SITE_SCHEMA,
};
pub use signal::{Signal, SubscriptionKey};
pub use types::HostType;
pub use world::{
    component::{
        error::PropertyError,
        property::{
            ReplicatedProperty, ReplicatedValue, ReplicationMode, SnapshotField,
            TransformThreshold,
        },
        property_set::{PropertySet, PropertySetBuilder},
        schema::{FieldSpec, SnapshotSchema},
    },
    diff_mask::DiffMask,
    error::NetworkIdError,
    network_id::NetworkId,
    replicate::{Replica, Replicate},
    world_type::ReplicatedWorld,
};
