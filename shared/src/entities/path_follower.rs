use rampart_serde::{Quat, Transform, Vec3};

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

const PATH_FOLLOWER_FIELDS: [FieldSpec; 2] =
    [FieldSpec::float("distance"), FieldSpec::transform("transform")];
pub static PATH_FOLLOWER_SCHEMA: SnapshotSchema =
    SnapshotSchema::new("PathFollower", 1, &PATH_FOLLOWER_FIELDS);

#[derive(Clone, Debug, PartialEq)]
pub struct PathState {
    /// Distance travelled along the path
    pub distance: f32,
    pub transform: Transform,
}

/// Travels a polyline of waypoints at constant speed, facing along the
/// current segment. Forward is -Z.
pub struct PathFollower {
    state: PathState,
    properties: PropertySet<PathState>,
    waypoints: Vec<Vec3>,
    length: f32,
    speed: f32,
    looping: bool,
}

impl PathFollower {
    pub fn new(waypoints: Vec<Vec3>, speed: f32, looping: bool) -> Self {
        let properties = PropertySet::builder(&PATH_FOLLOWER_SCHEMA)
            .field(ReplicatedProperty::on_change(
                "distance",
                |state: &PathState| state.distance,
                |state: &mut PathState, value| state.distance = value,
                0.05,
            ))
            .field(ReplicatedProperty::on_change(
                "transform",
                |state: &PathState| state.transform,
                |state: &mut PathState, value| state.transform = value,
                TransformThreshold::new(0.02, 0.02),
            ))
            .build();

        let length: f32 = waypoints
            .windows(2)
            .map(|segment| segment[0].distance(segment[1]))
            .sum();
        let mut follower = Self {
            state: PathState {
                distance: 0.0,
                transform: Transform::IDENTITY,
            },
            properties,
            waypoints,
            length,
            speed,
            looping,
        };
        follower.state.transform = follower.sample(0.0);
        follower
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn distance(&self) -> f32 {
        self.state.distance
    }

    pub fn transform(&self) -> &Transform {
        &self.state.transform
    }

    pub fn state(&self) -> &PathState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        !self.looping && self.state.distance >= self.length
    }

    pub fn update(&mut self, delta: f32) {
        if self.length <= 0.0 {
            return;
        }
        let mut distance = self.state.distance + self.speed * sanitize_delta(delta);
        if self.looping {
            distance %= self.length;
        } else {
            distance = distance.min(self.length);
        }
        self.state.distance = distance;
        self.state.transform = self.sample(distance);
    }

    /// Transform at `distance` along the path
    pub fn sample(&self, distance: f32) -> Transform {
        let Some(first) = self.waypoints.first() else {
            return Transform::IDENTITY;
        };
        let mut travelled = 0.0;
        for segment in self.waypoints.windows(2) {
            let (from, to) = (segment[0], segment[1]);
            let segment_length = from.distance(to);
            if segment_length <= 0.0 {
                continue;
            }
            if travelled + segment_length >= distance {
                let t = (distance - travelled) / segment_length;
                return Transform::new(from.lerp(to, t), facing(to - from));
            }
            travelled += segment_length;
        }
        match self.waypoints.windows(2).rev().find(|s| s[0] != s[1]) {
            Some(last) => Transform::new(last[1], facing(last[1] - last[0])),
            None => Transform::from_position(*first),
        }
    }
}

fn facing(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}

impl Replica for PathFollower {
    type State = PathState;

    fn replica(&self) -> (&PathState, &PropertySet<PathState>) {
        (&self.state, &self.properties)
    }

    fn replica_mut(&mut self) -> (&mut PathState, &mut PropertySet<PathState>) {
        (&mut self.state, &mut self.properties)
    }
}
