use std::fmt::Debug;

use rampart_serde::{
    ConstByteLength, FieldKind, SerdeErr, Serde, SnapshotReader, SnapshotWriter, Transform,
    WireField,
};

/// Whether a property is re-sent on every synchronization pass, or only once
/// it has drifted far enough from the value last put on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReplicationMode {
    Always,
    OnChange,
}

/// A value that can back a ReplicatedProperty, together with the threshold
/// type used to decide whether it changed significantly
pub trait ReplicatedValue: WireField + Debug + 'static {
    type Threshold: Copy + Debug + Default + 'static;

    /// True if `self` is further than `threshold` from `last_sent`
    fn differs_from(&self, last_sent: &Self, threshold: &Self::Threshold) -> bool;
}

// `!(delta <= threshold)` so that a NaN delta counts as a change
fn exceeds(delta: f32, threshold: f32) -> bool {
    !(delta <= threshold)
}

impl ReplicatedValue for i32 {
    type Threshold = i32;

    fn differs_from(&self, last_sent: &Self, threshold: &Self::Threshold) -> bool {
        (i64::from(*self) - i64::from(*last_sent)).abs() > i64::from(*threshold)
    }
}

impl ReplicatedValue for f32 {
    type Threshold = f32;

    fn differs_from(&self, last_sent: &Self, threshold: &Self::Threshold) -> bool {
        if self.to_bits() == last_sent.to_bits() {
            return false;
        }
        exceeds((self - last_sent).abs(), *threshold)
    }
}

/// Independent thresholds for the two halves of a Transform
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformThreshold {
    /// Distance, in world units
    pub position: f32,
    /// Angle, in radians
    pub rotation: f32,
}

impl TransformThreshold {
    pub fn new(position: f32, rotation: f32) -> Self {
        Self { position, rotation }
    }
}

impl ReplicatedValue for Transform {
    type Threshold = TransformThreshold;

    fn differs_from(&self, last_sent: &Self, threshold: &Self::Threshold) -> bool {
        if self == last_sent {
            return false;
        }
        exceeds(self.position_delta(last_sent), threshold.position)
            || exceeds(self.rotation_delta(last_sent), threshold.rotation)
    }
}

/// One piece of replicated entity state.
///
/// The property never owns the state it describes: it reads it through `read`
/// when encoding on the authority, and writes it through `write` when decoding
/// on an observer. It remembers the value it last put on the wire so OnChange
/// properties compare against what observers actually have, not against the
/// previous raw sample.
pub struct ReplicatedProperty<S, T: ReplicatedValue> {
    name: &'static str,
    read: fn(&S) -> T,
    write: fn(&mut S, T),
    mode: ReplicationMode,
    threshold: T::Threshold,
    last_sent: Option<T>,
}

impl<S, T: ReplicatedValue> ReplicatedProperty<S, T> {
    /// Create a property that is encoded on every pass
    pub fn always(name: &'static str, read: fn(&S) -> T, write: fn(&mut S, T)) -> Self {
        Self {
            name,
            read,
            write,
            mode: ReplicationMode::Always,
            threshold: T::Threshold::default(),
            last_sent: None,
        }
    }

    /// Create a property that is only encoded once it differs from the last
    /// sent value by more than `threshold`
    pub fn on_change(
        name: &'static str,
        read: fn(&S) -> T,
        write: fn(&mut S, T),
        threshold: T::Threshold,
    ) -> Self {
        Self {
            name,
            read,
            write,
            mode: ReplicationMode::OnChange,
            threshold,
            last_sent: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn mode(&self) -> ReplicationMode {
        self.mode
    }

    pub fn threshold(&self) -> &T::Threshold {
        &self.threshold
    }

    pub fn last_sent(&self) -> Option<&T> {
        self.last_sent.as_ref()
    }

    /// Whether the next `encode` will append this property's value
    pub fn should_send(&self, state: &S) -> bool {
        match self.mode {
            ReplicationMode::Always => true,
            ReplicationMode::OnChange => match &self.last_sent {
                None => true,
                Some(last_sent) => (self.read)(state).differs_from(last_sent, &self.threshold),
            },
        }
    }

    /// Appends the current value if the mode says it should be sent.
    /// Returns whether anything was appended. A skipped value leaves the
    /// last-sent value untouched.
    pub fn encode(&mut self, state: &S, writer: &mut SnapshotWriter) -> bool {
        if !self.should_send(state) {
            return false;
        }
        self.send(state, writer);
        true
    }

    /// Appends the current value unconditionally and records it as last sent
    pub fn send(&mut self, state: &S, writer: &mut SnapshotWriter) {
        let value = (self.read)(state);
        value.ser(writer);
        self.last_sent = Some(value);
    }

    /// Reads this property's slot and applies it to the state
    pub fn decode(&self, state: &mut S, reader: &mut SnapshotReader) -> Result<(), SerdeErr> {
        let value = T::de(reader)?;
        (self.write)(state, value);
        Ok(())
    }

    /// Forget the last sent value, so the next pass sends the property again
    pub fn reset_baseline(&mut self) {
        self.last_sent = None;
    }

    pub fn byte_length() -> usize {
        T::const_byte_length()
    }
}

/// Type-erased view of a ReplicatedProperty, so properties of different value
/// types can live in one ordered PropertySet
pub trait SnapshotField<S> {
    fn name(&self) -> &'static str;
    fn kind(&self) -> FieldKind;
    fn mode(&self) -> ReplicationMode;
    fn byte_length(&self) -> usize;
    fn should_send(&self, state: &S) -> bool;
    fn send(&mut self, state: &S, writer: &mut SnapshotWriter);
    fn receive(&self, state: &mut S, reader: &mut SnapshotReader) -> Result<(), SerdeErr>;
    fn reset_baseline(&mut self);
}

impl<S, T: ReplicatedValue> SnapshotField<S> for ReplicatedProperty<S, T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> FieldKind {
        T::KIND
    }

    fn mode(&self) -> ReplicationMode {
        self.mode
    }

    fn byte_length(&self) -> usize {
        T::const_byte_length()
    }

    fn should_send(&self, state: &S) -> bool {
        ReplicatedProperty::should_send(self, state)
    }

    fn send(&mut self, state: &S, writer: &mut SnapshotWriter) {
        ReplicatedProperty::send(self, state, writer)
    }

    fn receive(&self, state: &mut S, reader: &mut SnapshotReader) -> Result<(), SerdeErr> {
        self.decode(state, reader)
    }

    fn reset_baseline(&mut self) {
        ReplicatedProperty::reset_baseline(self)
    }
}
