use rampart_serde::{SerdeErr, SnapshotReader, SnapshotWriter};

use super::{
    error::PropertyError,
    property::{ReplicatedProperty, ReplicatedValue, SnapshotField},
    schema::SnapshotSchema,
};
use crate::world::diff_mask::DiffMask;

/// The ordered properties of one replicated entity, bound to its schema.
///
/// A snapshot is a DiffMask followed by the values of the set fields, in
/// schema order.
pub struct PropertySet<S> {
    schema: &'static SnapshotSchema,
    fields: Vec<Box<dyn SnapshotField<S>>>,
}

impl<S: 'static> PropertySet<S> {
    pub fn builder(schema: &'static SnapshotSchema) -> PropertySetBuilder<S> {
        PropertySetBuilder {
            schema,
            fields: Vec::with_capacity(schema.len()),
        }
    }

    /// Binds the properties to the schema, failing if they don't match it
    /// field for field
    pub fn try_new(
        schema: &'static SnapshotSchema,
        fields: Vec<Box<dyn SnapshotField<S>>>,
    ) -> Result<Self, PropertyError> {
        if fields.len() != schema.len() {
            return Err(PropertyError::FieldCountMismatch {
                type_name: schema.type_name(),
                expected: schema.len(),
                actual: fields.len(),
            });
        }
        for (index, (spec, field)) in schema.fields().iter().zip(fields.iter()).enumerate() {
            if spec.name != field.name() {
                return Err(PropertyError::FieldNameMismatch {
                    type_name: schema.type_name(),
                    index,
                    expected: spec.name,
                    actual: field.name(),
                });
            }
            if spec.kind != field.kind() {
                return Err(PropertyError::kind_mismatch(
                    schema.type_name(),
                    spec.name,
                    spec.kind,
                    field.kind(),
                ));
            }
        }
        Ok(Self { schema, fields })
    }

    /// Binds the properties to the schema
    ///
    /// # Panics
    ///
    /// Panics if the properties don't match the schema.
    /// Consider using `try_new` for non-panicking error handling.
    pub fn new(schema: &'static SnapshotSchema, fields: Vec<Box<dyn SnapshotField<S>>>) -> Self {
        match Self::try_new(schema, fields) {
            Ok(set) => set,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<S> PropertySet<S> {
    pub fn schema(&self) -> &'static SnapshotSchema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Which fields the next `write` will carry
    pub fn diff_mask(&self, state: &S) -> DiffMask {
        let mut mask = DiffMask::new(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if field.should_send(state) {
                mask.set_bit(index, true);
            }
        }
        mask
    }

    /// Exact number of bytes the next `write` will produce
    pub fn size_bytes(&self, state: &S) -> usize {
        let mut size = DiffMask::byte_count_for(self.fields.len());
        for field in self.fields.iter() {
            if field.should_send(state) {
                size += field.byte_length();
            }
        }
        size
    }

    pub fn write(&mut self, state: &S, writer: &mut SnapshotWriter) {
        let mask = self.diff_mask(state);
        mask.write(writer);
        for (index, field) in self.fields.iter_mut().enumerate() {
            if mask.bit(index) == Some(true) {
                field.send(state, writer);
            }
        }
    }

    pub fn read(&self, state: &mut S, reader: &mut SnapshotReader) -> Result<(), SerdeErr> {
        let mask = DiffMask::read(reader, self.fields.len())?;
        // a short payload leaves the state untouched
        let needed: usize = self
            .fields
            .iter()
            .enumerate()
            .filter(|(index, _)| mask.bit(*index) == Some(true))
            .map(|(_, field)| field.byte_length())
            .sum();
        let remaining = reader.remaining();
        if remaining < needed {
            return Err(SerdeErr::UnexpectedEnd { needed, remaining });
        }
        for (index, field) in self.fields.iter().enumerate() {
            if mask.bit(index) == Some(true) {
                field.receive(state, reader)?;
            }
        }
        Ok(())
    }

    pub fn reset_baseline(&mut self) {
        for field in self.fields.iter_mut() {
            field.reset_baseline();
        }
    }
}

/// Collects properties in schema order
pub struct PropertySetBuilder<S> {
    schema: &'static SnapshotSchema,
    fields: Vec<Box<dyn SnapshotField<S>>>,
}

impl<S: 'static> PropertySetBuilder<S> {
    pub fn field<T: ReplicatedValue>(mut self, property: ReplicatedProperty<S, T>) -> Self {
        self.fields.push(Box::new(property));
        self
    }

    pub fn try_build(self) -> Result<PropertySet<S>, PropertyError> {
        PropertySet::try_new(self.schema, self.fields)
    }

    /// # Panics
    ///
    /// Panics if the collected properties don't match the schema.
    pub fn build(self) -> PropertySet<S> {
        PropertySet::new(self.schema, self.fields)
    }
}
