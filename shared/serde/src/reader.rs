use byteorder::{ByteOrder, LittleEndian};

use crate::SerdeErr;

/// Cursor over a received snapshot buffer
pub struct SnapshotReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> SnapshotReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    fn take(&mut self, needed: usize) -> Result<&'b [u8], SerdeErr> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(SerdeErr::UnexpectedEnd { needed, remaining });
        }
        let start = self.cursor;
        self.cursor += needed;
        Ok(&self.buffer[start..self.cursor])
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, SerdeErr> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, SerdeErr> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, SerdeErr> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn bytes_read(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
