use crate::{ConstByteLength, Serde, Transform};

/// The fixed wire encodings a replicated field may use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 4-byte signed integer
    Int,
    /// 4-byte IEEE-754 float
    Float,
    /// 3 floats of position + 4 floats of normalized quaternion
    Transform,
}

impl FieldKind {
    pub const fn byte_length(&self) -> usize {
        match self {
            FieldKind::Int | FieldKind::Float => 4,
            FieldKind::Transform => 28,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Int => "Int",
            FieldKind::Float => "Float",
            FieldKind::Transform => "Transform",
        }
    }
}

/// A value type that may back a replicated field
pub trait WireField: Serde + ConstByteLength {
    const KIND: FieldKind;
}

impl WireField for i32 {
    const KIND: FieldKind = FieldKind::Int;
}

impl WireField for f32 {
    const KIND: FieldKind = FieldKind::Float;
}

impl WireField for Transform {
    const KIND: FieldKind = FieldKind::Transform;
}
