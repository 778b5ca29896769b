//! Bounds-checked big-endian reader over an input buffer.

use crate::error::IlbmError;
use crate::ilbm::ChunkId;

/// Read position over an immutable byte buffer.
///
/// The position never passes `data.len()`. A failed read leaves it unchanged.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Cursor starting at `pos`, clamped to the end of `data`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Advance by `n` bytes, stopping at the end of the buffer.
    pub fn skip_saturating(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], IlbmError> {
        if n > self.remaining() {
            return Err(IlbmError::BufferUnderrun {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], IlbmError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, IlbmError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16, IlbmError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, IlbmError> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_tag(&mut self) -> Result<ChunkId, IlbmError> {
        self.read_array().map(ChunkId)
    }
}
