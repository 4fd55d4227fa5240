use rampart_serde::{Transform, Vec3};

use crate::{
    objective::sanitize_delta,
    world::{
        component::{
            property::ReplicatedProperty,
            property_set::PropertySet,
            schema::{FieldSpec, SnapshotSchema},
        },
        replicate::Replica,
    },
};

const PLATFORM_FIELDS: [FieldSpec; 2] = [FieldSpec::transform("transform"), FieldSpec::int("heading")];
pub static PLATFORM_SCHEMA: SnapshotSchema =
    SnapshotSchema::new("MovingPlatform", 1, &PLATFORM_FIELDS);

#[derive(Clone, Debug, PartialEq)]
pub struct PlatformState {
    pub transform: Transform,
    /// 1 while travelling toward `end`, -1 while travelling back to `start`
    pub heading: i32,
}

/// A platform travelling back and forth between two points
pub struct MovingPlatform {
    state: PlatformState,
    properties: PropertySet<PlatformState>,
    start: Vec3,
    end: Vec3,
    speed: f32,
}

impl MovingPlatform {
    pub fn new(start: Vec3, end: Vec3, speed: f32) -> Self {
        // always sent: a platform is in motion almost every tick, and
        // observers interpolate between consecutive transforms
        let properties = PropertySet::builder(&PLATFORM_SCHEMA)
            .field(ReplicatedProperty::always(
                "transform",
                |state: &PlatformState| state.transform,
                |state: &mut PlatformState, value| state.transform = value,
            ))
            .field(ReplicatedProperty::on_change(
                "heading",
                |state: &PlatformState| state.heading,
                |state: &mut PlatformState, value| state.heading = value,
                0,
            ))
            .build();

        Self {
            state: PlatformState {
                transform: Transform::from_position(start),
                heading: 1,
            },
            properties,
            start,
            end,
            speed,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.state.transform.position
    }

    pub fn heading(&self) -> i32 {
        self.state.heading
    }

    pub fn state(&self) -> &PlatformState {
        &self.state
    }

    pub fn update(&mut self, delta: f32) {
        let leg = self.start.distance(self.end);
        if !leg.is_finite() || leg <= 0.0 {
            return;
        }
        // whole round trips end where they started
        let mut budget = (self.speed * sanitize_delta(delta)) % (2.0 * leg);
        // a long tick may still cover more than one leg
        while budget > 0.0 {
            let target = if self.state.heading > 0 { self.end } else { self.start };
            let position = self.state.transform.position;
            let distance = position.distance(target);
            if distance > budget {
                self.state.transform.position = position + (target - position) / distance * budget;
                return;
            }
            self.state.transform.position = target;
            self.state.heading = -self.state.heading;
            budget -= distance;
        }
    }
}

impl Replica for MovingPlatform {
    type State = PlatformState;

    fn replica(&self) -> (&PlatformState, &PropertySet<PlatformState>) {
        (&self.state, &self.properties)
    }

    fn replica_mut(&mut self) -> (&mut PlatformState, &mut PropertySet<PlatformState>) {
        (&mut self.state, &mut self.properties)
    }
}
