use super::replicate::Replicate;

/// The game world, as seen by the registry and the remote manager.
/// Entities are addressed by the world's own handle type `E`.
pub trait ReplicatedWorld<E> {
    fn has_entity(&self, entity: &E) -> bool;

    fn replica(&self, entity: &E) -> Option<&dyn Replicate>;

    fn replica_mut(&mut self, entity: &E) -> Option<&mut dyn Replicate>;
}
