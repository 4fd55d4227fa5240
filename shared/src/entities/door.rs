use rampart_serde::{Quat, Transform};

use crate::{
    objective::sanitize_delta,
    world::{
        component::{
            property::{ReplicatedProperty, TransformThreshold},
            property_set::PropertySet,
            schema::{FieldSpec, SnapshotSchema},
        },
        replicate::Replica,
    },
};

const DOOR_FIELDS: [FieldSpec; 2] = [FieldSpec::int("is_open"), FieldSpec::transform("transform")];
pub static DOOR_SCHEMA: SnapshotSchema = SnapshotSchema::new("Door", 1, &DOOR_FIELDS);

#[derive(Clone, Debug, PartialEq)]
pub struct DoorState {
    pub is_open: i32,
    pub transform: Transform,
}

/// A door swinging around a vertical hinge between its closed transform and
/// `open_angle` radians of yaw
pub struct Door {
    state: DoorState,
    properties: PropertySet<DoorState>,
    closed: Transform,
    open_angle: f32,
    swing_speed: f32,
    swing: f32,
}

impl Door {
    pub fn new(closed: Transform, open_angle: f32, swing_speed: f32) -> Self {
        let properties = PropertySet::builder(&DOOR_SCHEMA)
            .field(ReplicatedProperty::always(
                "is_open",
                |state: &DoorState| state.is_open,
                |state: &mut DoorState, value| state.is_open = value,
            ))
            .field(ReplicatedProperty::on_change(
                "transform",
                |state: &DoorState| state.transform,
                |state: &mut DoorState, value| state.transform = value,
                TransformThreshold::new(0.01, 0.01),
            ))
            .build();

        Self {
            state: DoorState {
                is_open: 0,
                transform: closed,
            },
            properties,
            closed,
            open_angle,
            swing_speed,
            swing: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open != 0
    }

    pub fn open(&mut self) {
        self.state.is_open = 1;
    }

    pub fn close(&mut self) {
        self.state.is_open = 0;
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.state.transform
    }

    pub fn state(&self) -> &DoorState {
        &self.state
    }

    /// Swing toward the target angle
    pub fn update(&mut self, delta: f32) {
        let target = if self.is_open() { self.open_angle } else { 0.0 };
        let step = self.swing_speed * sanitize_delta(delta);
        let remaining = target - self.swing;
        self.swing += remaining.clamp(-step, step);

        self.state.transform = Transform::new(
            self.closed.position,
            self.closed.rotation * Quat::from_rotation_y(self.swing),
        );
    }
}

impl Replica for Door {
    type State = DoorState;

    fn replica(&self) -> (&DoorState, &PropertySet<DoorState>) {
        (&self.state, &self.properties)
    }

    fn replica_mut(&mut self) -> (&mut DoorState, &mut PropertySet<DoorState>) {
        (&mut self.state, &mut self.properties)
    }
}
