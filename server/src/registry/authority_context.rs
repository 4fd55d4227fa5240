use std::hash::Hash;

use log::{info, warn};

use rampart_shared::{NetworkId, ReplicatedWorld};

use super::entity_registry::{EntityRegistry, EntitySnapshot};
use crate::{RegistryError, ReplicationConfig};

/// Owns the authority's registry for the lifetime of a session.
///
/// The registry exists only between `init` and `teardown`. Registering
/// outside that window is an error rather than a crash, so offline and
/// editor contexts can keep running with a fallback id.
///
/// The id space outlives the registry: a registry created by a later `init`
/// continues from the last id handed out, so observers still holding old
/// bindings never see an id reused.
pub struct AuthorityContext<E: Copy + Eq + Hash> {
    config: ReplicationConfig,
    registry: Option<EntityRegistry<E>>,
    // next id to hand out while no registry exists
    next_id: Option<NetworkId>,
}

impl<E: Copy + Eq + Hash> AuthorityContext<E> {
    pub fn new(config: ReplicationConfig) -> Self {
        Self {
            config,
            registry: None,
            next_id: Some(NetworkId::FIRST),
        }
    }

    pub fn config(&self) -> &ReplicationConfig {
        &self.config
    }

    /// Creates the registry. Does nothing if it already exists.
    pub fn init(&mut self) {
        if self.registry.is_some() {
            warn!("AuthorityContext: registry already initialized");
            return;
        }
        info!("AuthorityContext: registry initialized");
        self.registry = Some(EntityRegistry::starting_at(self.next_id));
    }

    /// Drops the registry, returning it. Later registrations fail until the
    /// next `init`.
    pub fn teardown(&mut self) -> Option<EntityRegistry<E>> {
        let registry = self.registry.take()?;
        info!("AuthorityContext: registry torn down");
        self.next_id = registry.next_id();
        Some(registry)
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    pub fn registry(&self) -> Option<&EntityRegistry<E>> {
        self.registry.as_ref()
    }

    pub fn registry_mut(&mut self) -> Option<&mut EntityRegistry<E>> {
        self.registry.as_mut()
    }

    pub fn register(&mut self, entity: E) -> Result<NetworkId, RegistryError> {
        let Some(registry) = self.registry.as_mut() else {
            return Err(RegistryError::NotInitialized {
                operation: "register entity",
            });
        };
        registry.register(entity)
    }

    /// Registers `entity`, or hands back `fallback` if that isn't possible
    pub fn register_or(&mut self, entity: E, fallback: NetworkId) -> NetworkId {
        match self.register(entity) {
            Ok(network_id) => network_id,
            Err(error) => {
                warn!(
                    "AuthorityContext: {}, using fallback NetworkId {}",
                    error, fallback
                );
                fallback
            }
        }
    }

    pub fn deregister(&mut self, entity: &E) -> Option<NetworkId> {
        self.registry.as_mut()?.deregister(entity)
    }

    /// One pass of snapshots within the configured budget. Empty while the
    /// registry doesn't exist.
    pub fn write_snapshots<W: ReplicatedWorld<E>>(&mut self, world: &mut W) -> Vec<EntitySnapshot> {
        let budget = self.config.snapshot_budget_bytes;
        match self.registry.as_mut() {
            Some(registry) => registry.write_snapshots(world, budget),
            None => Vec::new(),
        }
    }

    pub fn reset_baselines<W: ReplicatedWorld<E>>(&mut self, world: &mut W) {
        if let Some(registry) = self.registry.as_mut() {
            registry.reset_baselines(world);
        }
    }
}

impl<E: Copy + Eq + Hash> Default for AuthorityContext<E> {
    fn default() -> Self {
        Self::new(ReplicationConfig::default())
    }
}
