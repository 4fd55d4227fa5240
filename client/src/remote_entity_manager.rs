use std::{collections::HashMap, hash::Hash};

use log::{debug, info, warn};

use rampart_shared::{NetworkId, ReplicatedWorld, SnapshotReader};

use crate::RemoteError;

/// What happened to an incoming snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// No local entity is bound to the NetworkId yet
    UnknownId,
    /// The NetworkId is bound, but the world no longer holds the entity
    MissingEntity,
}

/// Maps NetworkIds received from the authority to local entities, and
/// applies incoming snapshots to them.
///
/// Registration and snapshots may arrive in any order. A snapshot for an id
/// that isn't bound yet is dropped.
pub struct RemoteEntityManager<E: Copy + Eq + Hash> {
    id_to_entity: HashMap<NetworkId, E>,
    entity_to_id: HashMap<E, NetworkId>,
    dropped_snapshots: u64,
}

impl<E: Copy + Eq + Hash> RemoteEntityManager<E> {
    pub fn new() -> Self {
        Self {
            id_to_entity: HashMap::new(),
            entity_to_id: HashMap::new(),
            dropped_snapshots: 0,
        }
    }

    /// Binds `entity` to `network_id`. Binding an entity again moves it to
    /// the new id; binding an id that another entity holds is an error.
    pub fn register_remote(&mut self, network_id: NetworkId, entity: E) -> Result<(), RemoteError> {
        if let Some(bound) = self.id_to_entity.get(&network_id) {
            if *bound == entity {
                return Ok(());
            }
            return Err(RemoteError::IdAlreadyBound { network_id });
        }

        if let Some(old_id) = self.entity_to_id.insert(entity, network_id) {
            debug!(
                "RemoteEntityManager: entity moved from NetworkId {} to {}",
                old_id, network_id
            );
            self.id_to_entity.remove(&old_id);
        }
        self.id_to_entity.insert(network_id, entity);

        info!("RemoteEntityManager: bound NetworkId {}", network_id);
        Ok(())
    }

    pub fn deregister_remote(&mut self, network_id: &NetworkId) -> Option<E> {
        let entity = self.id_to_entity.remove(network_id)?;
        self.entity_to_id.remove(&entity);
        info!("RemoteEntityManager: unbound NetworkId {}", network_id);
        Some(entity)
    }

    pub fn entity(&self, network_id: &NetworkId) -> Option<E> {
        self.id_to_entity.get(network_id).copied()
    }

    pub fn network_id(&self, entity: &E) -> Option<NetworkId> {
        self.entity_to_id.get(entity).copied()
    }

    pub fn len(&self) -> usize {
        self.id_to_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_entity.is_empty()
    }

    /// Snapshots dropped so far because their id was unknown or their
    /// entity was gone
    pub fn dropped_snapshots(&self) -> u64 {
        self.dropped_snapshots
    }

    /// Decodes `payload` into the entity bound to `network_id`.
    ///
    /// Snapshots that can't be routed are dropped and reported through the
    /// outcome. A payload longer than the entity's snapshot is still
    /// applied, then reported as `TrailingBytes`.
    pub fn apply_snapshot<W: ReplicatedWorld<E>>(
        &mut self,
        network_id: NetworkId,
        payload: &[u8],
        world: &mut W,
    ) -> Result<ApplyOutcome, RemoteError> {
        let Some(entity) = self.id_to_entity.get(&network_id).copied() else {
            debug!(
                "RemoteEntityManager: dropping snapshot for unknown NetworkId {}",
                network_id
            );
            self.dropped_snapshots += 1;
            return Ok(ApplyOutcome::UnknownId);
        };

        let Some(replica) = world.replica_mut(&entity) else {
            warn!(
                "RemoteEntityManager: NetworkId {} is bound but missing from the world",
                network_id
            );
            self.dropped_snapshots += 1;
            return Ok(ApplyOutcome::MissingEntity);
        };

        let mut reader = SnapshotReader::new(payload);
        replica
            .read_snapshot(&mut reader)
            .map_err(|source| RemoteError::Decode { network_id, source })?;

        if !reader.is_exhausted() {
            warn!(
                "RemoteEntityManager: snapshot for NetworkId {} has {} trailing bytes",
                network_id,
                reader.remaining()
            );
            return Err(RemoteError::TrailingBytes {
                network_id,
                remaining: reader.remaining(),
            });
        }

        Ok(ApplyOutcome::Applied)
    }
}

impl<E: Copy + Eq + Hash> Default for RemoteEntityManager<E> {
    fn default() -> Self {
        Self::new()
    }
}
