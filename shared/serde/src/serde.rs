use glam::{Quat, Vec3};

use crate::{SerdeErr, SnapshotReader, SnapshotWriter};

/// A type that can be written to and read from a snapshot buffer
pub trait Serde: Sized + Clone + PartialEq {
    /// Append the value to the outgoing buffer
    fn ser(&self, writer: &mut SnapshotWriter);

    /// Parse a value from the incoming buffer
    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` will append
    fn byte_length(&self) -> usize;
}

/// Implemented by every type whose encoding has the same width for all values
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}

impl Serde for u8 {
    fn ser(&self, writer: &mut SnapshotWriter) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl ConstByteLength for u8 {
    fn const_byte_length() -> usize {
        1
    }
}

impl Serde for u32 {
    fn ser(&self, writer: &mut SnapshotWriter) {
        writer.write_u32(*self);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        reader.read_u32()
    }

    fn byte_length(&self) -> usize {
        4
    }
}

impl ConstByteLength for u32 {
    fn const_byte_length() -> usize {
        4
    }
}

impl Serde for i32 {
    fn ser(&self, writer: &mut SnapshotWriter) {
        writer.write_i32(*self);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        reader.read_i32()
    }

    fn byte_length(&self) -> usize {
        4
    }
}

impl ConstByteLength for i32 {
    fn const_byte_length() -> usize {
        4
    }
}

impl Serde for f32 {
    fn ser(&self, writer: &mut SnapshotWriter) {
        writer.write_f32(*self);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        reader.read_f32()
    }

    fn byte_length(&self) -> usize {
        4
    }
}

impl ConstByteLength for f32 {
    fn const_byte_length() -> usize {
        4
    }
}

impl Serde for Vec3 {
    fn ser(&self, writer: &mut SnapshotWriter) {
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_f32(self.z);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        let x = reader.read_f32()?;
        let y = reader.read_f32()?;
        let z = reader.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    fn byte_length(&self) -> usize {
        12
    }
}

impl ConstByteLength for Vec3 {
    fn const_byte_length() -> usize {
        12
    }
}

// Quaternions travel as (x, y, z, w) and are normalized on the way out, so
// the receiving side never has to renormalize.
impl Serde for Quat {
    fn ser(&self, writer: &mut SnapshotWriter) {
        let rotation = if self.is_normalized() {
            *self
        } else {
            self.normalize()
        };
        writer.write_f32(rotation.x);
        writer.write_f32(rotation.y);
        writer.write_f32(rotation.z);
        writer.write_f32(rotation.w);
    }

    fn de(reader: &mut SnapshotReader) -> Result<Self, SerdeErr> {
        let x = reader.read_f32()?;
        let y = reader.read_f32()?;
        let z = reader.read_f32()?;
        let w = reader.read_f32()?;
        Ok(Quat::from_xyzw(x, y, z, w))
    }

    fn byte_length(&self) -> usize {
        16
    }
}

impl ConstByteLength for Quat {
    fn const_byte_length() -> usize {
        16
    }
}
