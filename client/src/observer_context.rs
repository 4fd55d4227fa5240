use std::hash::Hash;

use log::{info, warn};

use rampart_shared::{NetworkId, ReplicatedWorld};

use crate::{remote_entity_manager::ApplyOutcome, RemoteEntityManager, RemoteError};

/// Owns an observer's remote entity manager for the lifetime of a session.
///
/// Entities may try to register before the manager exists. Those attempts
/// fail with `ManagerNotReady` and leave the entity unsynchronized; the
/// caller decides when to retry.
pub struct ObserverContext<E: Copy + Eq + Hash> {
    manager: Option<RemoteEntityManager<E>>,
}

impl<E: Copy + Eq + Hash> ObserverContext<E> {
    pub fn new() -> Self {
        Self { manager: None }
    }

    /// Creates the manager. Does nothing if it already exists.
    pub fn init(&mut self) {
        if self.manager.is_some() {
            warn!("ObserverContext: remote entity manager already initialized");
            return;
        }
        info!("ObserverContext: remote entity manager initialized");
        self.manager = Some(RemoteEntityManager::new());
    }

    pub fn teardown(&mut self) -> Option<RemoteEntityManager<E>> {
        let manager = self.manager.take();
        if manager.is_some() {
            info!("ObserverContext: remote entity manager torn down");
        }
        manager
    }

    pub fn is_initialized(&self) -> bool {
        self.manager.is_some()
    }

    pub fn manager(&self) -> Option<&RemoteEntityManager<E>> {
        self.manager.as_ref()
    }

    pub fn manager_mut(&mut self) -> Option<&mut RemoteEntityManager<E>> {
        self.manager.as_mut()
    }

    pub fn register_remote(&mut self, network_id: NetworkId, entity: E) -> Result<(), RemoteError> {
        let Some(manager) = self.manager.as_mut() else {
            warn!(
                "ObserverContext: entity tried to bind NetworkId {} before the manager exists",
                network_id
            );
            return Err(RemoteError::ManagerNotReady { network_id });
        };
        manager.register_remote(network_id, entity)
    }

    pub fn deregister_remote(&mut self, network_id: &NetworkId) -> Option<E> {
        self.manager.as_mut()?.deregister_remote(network_id)
    }

    pub fn apply_snapshot<W: ReplicatedWorld<E>>(
        &mut self,
        network_id: NetworkId,
        payload: &[u8],
        world: &mut W,
    ) -> Result<ApplyOutcome, RemoteError> {
        let Some(manager) = self.manager.as_mut() else {
            return Err(RemoteError::ManagerNotReady { network_id });
        };
        manager.apply_snapshot(network_id, payload, world)
    }
}

impl<E: Copy + Eq + Hash> Default for ObserverContext<E> {
    fn default() -> Self {
        Self::new()
    }
}
