//! # Rampart Serde
//! Byte-aligned codec for entity snapshots. Every value has a fixed width on
//! the wire, so the size of a snapshot can be computed before it is written.

mod error;
mod field_kind;
mod reader;
mod serde;
mod transform;
mod writer;

pub use error::SerdeErr;
pub use field_kind::{FieldKind, WireField};
pub use reader::SnapshotReader;
pub use serde::{ConstByteLength, Serde};
pub use transform::Transform;
pub use writer::SnapshotWriter;

pub use glam::{Quat, Vec3};
