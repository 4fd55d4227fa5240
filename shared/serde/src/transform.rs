use glam::{Quat, Vec3};

use crate::{ConstByteLength, SerdeErr, Serde, SnapshotReader, SnapshotWriter};

/// Position + orientation of a replicated entity.
/// On the wire: 3 floats of position followed by a normalized quaternion (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Distance between the two positions
    pub fn position_delta(&self, other: &Self) -> f32 {
        self.position.distance(other.position)
    }

    /// Angle, in radians, between the two orientations
    pub fn rotation_delta(&self, other: &Self) -> f32 {
        self.rotation.angle_between(other.rotation)
    }

    /// Equal within `epsilon` on every position axis and quaternion component
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && self.rotation.abs_diff_eq(other.rotation, epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Serde for Transform {
    fn ser(&self, writer: &mut SnapshotWriter) {
        self.position.ser(writer);
        self.rotation.ser(writer);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        let position = Vec3::de(reader)?;
        let rotation = Quat::de(reader)?;
        Ok(Self { position, rotation })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for Transform {
    fn const_byte_length() -> usize {
        Vec3::const_byte_length() + Quat::const_byte_length()
    }
}
