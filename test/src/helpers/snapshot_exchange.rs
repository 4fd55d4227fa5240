use std::{collections::VecDeque, hash::Hash};

use log::debug;

use rampart_client::{ApplyOutcome, ObserverContext, RemoteError};
use rampart_server::{AuthorityContext, EntitySnapshot};
use rampart_shared::{NetworkId, ReplicatedWorld};

/// In-memory stand-in for the transport. Snapshots are delivered in the
/// order they were sent unless a test reorders or drops them.
#[derive(Default)]
pub struct SnapshotQueue {
    pending: VecDeque<EntitySnapshot>,
}

impl SnapshotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send_all(&mut self, snapshots: Vec<EntitySnapshot>) {
        self.pending.extend(snapshots);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.pending.iter()
    }

    pub fn reverse(&mut self) {
        self.pending.make_contiguous().reverse();
    }

    /// Discards every pending snapshot for `network_id`
    pub fn drop_for(&mut self, network_id: NetworkId) -> usize {
        let before = self.pending.len();
        self.pending
            .retain(|snapshot| snapshot.network_id != network_id);
        let dropped = before - self.pending.len();
        debug!("SnapshotQueue: dropped {} snapshot(s) for {}", dropped, network_id);
        dropped
    }

    /// Applies every pending snapshot to the observer, in queue order
    pub fn deliver_all<E: Copy + Eq + Hash, W: ReplicatedWorld<E>>(
        &mut self,
        observer: &mut ObserverContext<E>,
        world: &mut W,
    ) -> Vec<Result<ApplyOutcome, RemoteError>> {
        self.pending
            .drain(..)
            .map(|snapshot| observer.apply_snapshot(snapshot.network_id, &snapshot.payload, world))
            .collect()
    }
}

/// One replication pass: snapshot the authority's world and apply the
/// result to the observer's world
pub fn exchange_snapshots<E, SW, CW>(
    authority: &mut AuthorityContext<E>,
    server_world: &mut SW,
    observer: &mut ObserverContext<E>,
    client_world: &mut CW,
) -> Vec<Result<ApplyOutcome, RemoteError>>
where
    E: Copy + Eq + Hash,
    SW: ReplicatedWorld<E>,
    CW: ReplicatedWorld<E>,
{
    let mut queue = SnapshotQueue::new();
    queue.send_all(authority.write_snapshots(server_world));
    queue.deliver_all(observer, client_world)
}
