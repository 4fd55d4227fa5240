use rampart_serde::FieldKind;

use crate::world::diff_mask::DiffMask;

/// One named, typed slot of an entity type's snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn int(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Int,
        }
    }

    pub const fn float(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Float,
        }
    }

    pub const fn transform(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Transform,
        }
    }
}

/// The wire contract of one replicated entity type: an ordered list of
/// fields. Declared as a `const`, so a malformed schema fails to compile.
/// Adding, removing or reordering fields means bumping `version`.
#[derive(Debug, PartialEq, Eq)]
pub struct SnapshotSchema {
    type_name: &'static str,
    version: u16,
    fields: &'static [FieldSpec],
}

impl SnapshotSchema {
    pub const MAX_FIELDS: usize = 32;

    pub const fn new(type_name: &'static str, version: u16, fields: &'static [FieldSpec]) -> Self {
        assert!(!fields.is_empty(), "SnapshotSchema must declare at least one field");
        assert!(
            fields.len() <= Self::MAX_FIELDS,
            "SnapshotSchema declares more fields than a DiffMask can describe"
        );
        let mut i = 0;
        while i < fields.len() {
            let mut j = i + 1;
            while j < fields.len() {
                assert!(
                    !str_eq(fields[i].name, fields[j].name),
                    "SnapshotSchema field names must be unique"
                );
                j += 1;
            }
            i += 1;
        }
        Self {
            type_name,
            version,
            fields,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Size of a snapshot carrying every field
    pub fn full_byte_length(&self) -> usize {
        DiffMask::byte_count_for(self.fields.len())
            + self
                .fields
                .iter()
                .map(|field| field.kind.byte_length())
                .sum::<usize>()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
