//! Top-level IFF chunk index.

use alloc::vec::Vec;
use core::fmt;

use log::debug;

use super::cursor::ByteCursor;
use crate::error::{IlbmError, Mismatch};

/// Four-byte IFF chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const FORM: Self = Self(*b"FORM");
    pub const ILBM: Self = Self(*b"ILBM");
    /// Bitmap header.
    pub const BMHD: Self = Self(*b"BMHD");
    /// Color map.
    pub const CMAP: Self = Self(*b"CMAP");
    /// Interleaved bitplane data.
    pub const BODY: Self = Self(*b"BODY");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId(\"{self}\")")
    }
}

/// Location of one chunk's content within the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRecord {
    pub id: ChunkId,
    /// Offset of the first content byte (just past the length field).
    pub offset: usize,
    /// Declared content length, unpadded.
    pub length: u32,
}

/// Top-level chunks of a `FORM ILBM`, in first-seen order.
///
/// A tag that occurs more than once keeps its first position but takes the
/// record of its last occurrence.
#[derive(Clone, Debug, Default)]
pub struct ChunkTable {
    entries: Vec<ChunkRecord>,
}

impl ChunkTable {
    fn insert(&mut self, record: ChunkRecord) {
        match self.entries.iter_mut().find(|e| e.id == record.id) {
            Some(existing) => {
                debug!(
                    "duplicate {} chunk at offset {} replaces offset {}",
                    record.id, record.offset, existing.offset
                );
                *existing = record;
            }
            None => self.entries.push(record),
        }
    }

    pub fn get(&self, id: ChunkId) -> Option<&ChunkRecord> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Like [`get`](Self::get), but a missing chunk is an error.
    pub fn require(&self, id: ChunkId) -> Result<&ChunkRecord, IlbmError> {
        self.get(id).ok_or(IlbmError::MissingChunk(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate the `FORM ILBM` framing and index every top-level chunk.
///
/// Chunk bodies are skipped by their declared length with no pad byte. The
/// scan stops once fewer than 8 bytes (one chunk header) remain.
pub fn index(data: &[u8]) -> Result<ChunkTable, IlbmError> {
    let mut cursor = ByteCursor::new(data);

    let group = cursor.read_tag()?;
    if group != ChunkId::FORM {
        return Err(IlbmError::StructuralMismatch(Mismatch::GroupTag(group)));
    }
    let declared = cursor.read_u32_be()?;
    if u64::from(declared) + 8 != data.len() as u64 {
        return Err(IlbmError::StructuralMismatch(Mismatch::Length {
            declared,
            actual: data.len(),
        }));
    }
    let form_type = cursor.read_tag()?;
    if form_type != ChunkId::ILBM {
        return Err(IlbmError::StructuralMismatch(Mismatch::TypeTag(form_type)));
    }

    let mut table = ChunkTable::default();
    while cursor.remaining() >= 8 {
        let id = cursor.read_tag()?;
        let length = cursor.read_u32_be()?;
        table.insert(ChunkRecord {
            id,
            offset: cursor.position(),
            length,
        });
        cursor.skip_saturating(length as usize);
    }

    debug!("indexed {} ILBM chunks", table.len());
    Ok(table)
}
