use thiserror::Error;

use rampart_serde::FieldKind;

/// Errors that can occur when binding ReplicatedProperties to a SnapshotSchema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The number of properties differs from the number of schema fields
    #[error("{type_name} schema declares {expected} fields, but {actual} properties were supplied")]
    FieldCountMismatch {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A property was supplied out of schema order, or under another name
    #[error("{type_name} schema field {index} is `{expected}`, but property `{actual}` was supplied")]
    FieldNameMismatch {
        type_name: &'static str,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A property's value type doesn't use the schema's wire encoding
    #[error("{type_name} schema field `{field}` is encoded as {expected}, but its property is {actual}")]
    FieldKindMismatch {
        type_name: &'static str,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

impl PropertyError {
    pub(crate) fn kind_mismatch(
        type_name: &'static str,
        field: &'static str,
        expected: FieldKind,
        actual: FieldKind,
    ) -> Self {
        PropertyError::FieldKindMismatch {
            type_name,
            field,
            expected: expected.name(),
            actual: actual.name(),
        }
    }
}
