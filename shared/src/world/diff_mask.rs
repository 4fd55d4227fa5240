use rampart_serde::{SerdeErr, SnapshotReader, SnapshotWriter};

/// One bit per schema field, written ahead of the fields of a snapshot.
/// A set bit means the field's value follows on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffMask {
    mask: Vec<u8>,
}

impl DiffMask {
    pub fn new(field_count: usize) -> Self {
        Self {
            mask: vec![0; Self::byte_count_for(field_count)],
        }
    }

    pub fn byte_count_for(field_count: usize) -> usize {
        field_count.div_ceil(8)
    }

    pub fn byte_count(&self) -> usize {
        self.mask.len()
    }

    pub fn bit(&self, index: usize) -> Option<bool> {
        let byte = self.mask.get(index / 8)?;
        Some(byte & (1 << (index % 8)) != 0)
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        let Some(byte) = self.mask.get_mut(index / 8) else {
            return;
        };
        let bit = 1 << (index % 8);
        if value {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    pub fn clear(&mut self) {
        self.mask.iter_mut().for_each(|byte| *byte = 0);
    }

    pub fn is_clear(&self) -> bool {
        self.mask.iter().all(|byte| *byte == 0)
    }

    pub fn write(&self, writer: &mut SnapshotWriter) {
        writer.write_bytes(&self.mask);
    }

    pub fn read(reader: &mut SnapshotReader, field_count: usize) -> Result<Self, SerdeErr> {
        let mut mask = Vec::with_capacity(Self::byte_count_for(field_count));
        for _ in 0..Self::byte_count_for(field_count) {
            mask.push(reader.read_byte()?);
        }
        Ok(Self { mask })
    }
}
