use rampart_serde::{SerdeErr, SnapshotReader, SnapshotWriter};

use super::component::{property_set::PropertySet, schema::SnapshotSchema};

/// The contract every synchronized object exposes to the registry and the
/// remote manager
pub trait Replicate {
    /// The entity type's wire contract
    fn schema(&self) -> &'static SnapshotSchema;

    /// Appends this pass's snapshot: a DiffMask followed by every field the
    /// properties decide to send, in schema order
    fn write_snapshot(&mut self, writer: &mut SnapshotWriter);

    /// Consumes a snapshot, applying each present field in schema order
    fn read_snapshot(&mut self, reader: &mut SnapshotReader) -> Result<(), SerdeErr>;

    /// Exact byte count of the next `write_snapshot`
    fn size_bytes(&self) -> usize;

    /// Make the next `write_snapshot` carry every field
    fn reset_baseline(&mut self);

    fn to_snapshot(&mut self) -> Vec<u8> {
        let mut writer = SnapshotWriter::with_capacity(self.size_bytes());
        self.write_snapshot(&mut writer);
        writer.to_bytes()
    }
}

/// Implemented by entities that keep their replicated state in a plain
/// struct next to the PropertySet describing it. Such entities get
/// `Replicate` for free.
pub trait Replica {
    type State: 'static;

    fn replica(&self) -> (&Self::State, &PropertySet<Self::State>);

    fn replica_mut(&mut self) -> (&mut Self::State, &mut PropertySet<Self::State>);
}

impl<R: Replica> Replicate for R {
    fn schema(&self) -> &'static SnapshotSchema {
        self.replica().1.schema()
    }

    fn write_snapshot(&mut self, writer: &mut SnapshotWriter) {
        let (state, properties) = self.replica_mut();
        properties.write(state, writer);
    }

    fn read_snapshot(&mut self, reader: &mut SnapshotReader) -> Result<(), SerdeErr> {
        let (state, properties) = self.replica_mut();
        properties.read(state, reader)
    }

    fn size_bytes(&self) -> usize {
        let (state, properties) = self.replica();
        properties.size_bytes(state)
    }

    fn reset_baseline(&mut self) {
        self.replica_mut().1.reset_baseline();
    }
}
