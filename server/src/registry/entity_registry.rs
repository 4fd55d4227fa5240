use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use log::{info, warn};

use rampart_shared::{NetworkId, ReplicatedWorld};

use crate::RegistryError;

/// One entity's encoded snapshot for a single pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySnapshot {
    pub network_id: NetworkId,
    pub payload: Vec<u8>,
}

/// The authoritative set of replicated entities.
///
/// Every registration hands out a fresh NetworkId, strictly greater than any
/// id handed out before. Retired ids are never reissued, so no two entities
/// can ever share an id.
pub struct EntityRegistry<E: Copy + Eq + Hash> {
    next_id: Option<NetworkId>,
    id_to_entity: BTreeMap<NetworkId, E>,
    entity_to_id: HashMap<E, NetworkId>,
    // first id of the next snapshot pass, when the last pass ran out of budget
    resume_from: Option<NetworkId>,
}

impl<E: Copy + Eq + Hash> EntityRegistry<E> {
    pub fn new() -> Self {
        Self::starting_at(Some(NetworkId::FIRST))
    }

    /// Picks up an id space where an earlier registry left off. `None` means
    /// that space is exhausted.
    pub(crate) fn starting_at(next_id: Option<NetworkId>) -> Self {
        Self {
            next_id,
            id_to_entity: BTreeMap::new(),
            entity_to_id: HashMap::new(),
            resume_from: None,
        }
    }

    /// The id the next registration will get
    pub fn next_id(&self) -> Option<NetworkId> {
        self.next_id
    }

    /// Assigns `entity` a fresh NetworkId. Registering an entity that is
    /// already registered retires its old id and binds it to a new one.
    pub fn register(&mut self, entity: E) -> Result<NetworkId, RegistryError> {
        let Some(network_id) = self.next_id else {
            return Err(RegistryError::IdSpaceExhausted);
        };

        if let Some(old_id) = self.entity_to_id.remove(&entity) {
            warn!(
                "EntityRegistry: entity registered twice, retiring NetworkId {}",
                old_id
            );
            self.id_to_entity.remove(&old_id);
        }

        self.next_id = network_id.next();
        self.id_to_entity.insert(network_id, entity);
        self.entity_to_id.insert(entity, network_id);

        info!("EntityRegistry: assigned NetworkId {}", network_id);

        Ok(network_id)
    }

    /// Retires the entity's NetworkId. Returns the id it held, if any.
    pub fn deregister(&mut self, entity: &E) -> Option<NetworkId> {
        let network_id = self.entity_to_id.remove(entity)?;
        self.id_to_entity.remove(&network_id);
        info!("EntityRegistry: retired NetworkId {}", network_id);
        Some(network_id)
    }

    pub fn deregister_id(&mut self, network_id: &NetworkId) -> Option<E> {
        let entity = self.id_to_entity.remove(network_id)?;
        self.entity_to_id.remove(&entity);
        info!("EntityRegistry: retired NetworkId {}", network_id);
        Some(entity)
    }

    pub fn network_id(&self, entity: &E) -> Option<NetworkId> {
        self.entity_to_id.get(entity).copied()
    }

    pub fn entity(&self, network_id: &NetworkId) -> Option<E> {
        self.id_to_entity.get(network_id).copied()
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.entity_to_id.contains_key(entity)
    }

    /// All registered entities, in NetworkId order
    pub fn iter(&self) -> impl Iterator<Item = (NetworkId, E)> + '_ {
        self.id_to_entity
            .iter()
            .map(|(network_id, entity)| (*network_id, *entity))
    }

    pub fn len(&self) -> usize {
        self.id_to_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_entity.is_empty()
    }

    /// Writes one snapshot per registered entity, in NetworkId order.
    ///
    /// With a budget, emission stops before the entity that would push the
    /// pass past it, and the next pass starts from that entity. The first
    /// entity of a pass is always emitted, however large.
    pub fn write_snapshots<W: ReplicatedWorld<E>>(
        &mut self,
        world: &mut W,
        budget_bytes: Option<usize>,
    ) -> Vec<EntitySnapshot> {
        let order: Vec<(NetworkId, E)> = match self.resume_from {
            Some(start) => self
                .id_to_entity
                .range(start..)
                .chain(self.id_to_entity.range(..start))
                .map(|(network_id, entity)| (*network_id, *entity))
                .collect(),
            None => self.iter().collect(),
        };
        self.resume_from = None;

        let mut snapshots = Vec::new();
        let mut used_bytes = 0;

        for (network_id, entity) in order {
            let Some(replica) = world.replica_mut(&entity) else {
                warn!(
                    "EntityRegistry: NetworkId {} is registered but missing from the world",
                    network_id
                );
                continue;
            };

            let size = replica.size_bytes();
            if let Some(budget) = budget_bytes {
                if !snapshots.is_empty() && used_bytes + size > budget {
                    self.resume_from = Some(network_id);
                    break;
                }
            }

            let payload = replica.to_snapshot();
            used_bytes += payload.len();
            snapshots.push(EntitySnapshot {
                network_id,
                payload,
            });
        }

        snapshots
    }

    /// Makes the next snapshot of every registered entity carry all fields
    pub fn reset_baselines<W: ReplicatedWorld<E>>(&mut self, world: &mut W) {
        for entity in self.id_to_entity.values() {
            if let Some(replica) = world.replica_mut(entity) {
                replica.reset_baseline();
            }
        }
    }
}

impl<E: Copy + Eq + Hash> Default for EntityRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
