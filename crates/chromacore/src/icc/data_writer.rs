//! Growable big-endian buffer used to assemble ICC profiles.
//!
//! The writer keeps an explicit write index so the profile can be laid out
//! out of order: tag payloads first, then the tag table, then the header.
//! Writing past the current end grows the buffer with zero bytes.

use crate::icc::tags::{TagDataEntry, TagTableEntry};
use crate::icc::types::{S15Fixed16, TypeSignature, XyzNumber};

#[derive(Debug, Default, Clone)]
pub struct IccDataWriter {
    buf: Vec<u8>,
    index: usize,
}

impl IccDataWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            index: 0,
        }
    }

    /// Current write position
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the write position. Positions past the end are allowed; the gap
    /// is zero-filled on the next write.
    #[inline]
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Total bytes materialized so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let end = self.index + bytes.len();
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[self.index..end].copy_from_slice(bytes);
        self.index = end;
        bytes.len()
    }

    pub fn write_u8(&mut self, value: u8) -> usize {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> usize {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> usize {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> usize {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_s15_fixed16(&mut self, value: S15Fixed16) -> usize {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_xyz_number(&mut self, value: &XyzNumber) -> usize {
        self.write_bytes(&value.to_bytes())
    }

    /// Write `count` zero bytes
    pub fn write_empty(&mut self, count: usize) -> usize {
        let end = self.index + count;
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[self.index..end].fill(0);
        self.index = end;
        count
    }

    /// Write ASCII text into a fixed-width field: truncated to `length`,
    /// padded with `pad`. Non-ASCII characters become `?`.
    pub fn write_ascii_fixed(&mut self, text: &str, length: usize, pad: u8) -> usize {
        let mut field = vec![pad; length];
        for (dst, ch) in field.iter_mut().zip(text.chars()) {
            *dst = if ch.is_ascii() { ch as u8 } else { b'?' };
        }
        self.write_bytes(&field)
    }

    /// Write NUL-terminated ASCII text
    pub fn write_ascii_nul(&mut self, text: &str) -> usize {
        let mut n = 0;
        for ch in text.chars() {
            n += self.write_u8(if ch.is_ascii() { ch as u8 } else { b'?' });
        }
        n + self.write_u8(0)
    }

    /// Write UTF-16BE code units without terminator
    pub fn write_utf16be(&mut self, text: &str) -> usize {
        let mut n = 0;
        for unit in text.encode_utf16() {
            n += self.write_u16(unit);
        }
        n
    }

    /// Type signature followed by the four reserved bytes every tag starts with
    pub fn write_type_header(&mut self, sig: TypeSignature) -> usize {
        self.write_u32(sig.0) + self.write_empty(4)
    }

    /// Pad with zeros up to the next 4-byte boundary
    pub fn write_padding(&mut self) -> usize {
        let rem = self.index % 4;
        if rem == 0 {
            0
        } else {
            self.write_empty(4 - rem)
        }
    }

    /// Encode one tag payload at the current index and return the table row
    /// pointing at it. The recorded size includes alignment padding.
    pub fn write_tag_data_entry(&mut self, entry: &TagDataEntry) -> TagTableEntry {
        let offset = self.index;
        entry.data.write(self);
        self.write_padding();
        TagTableEntry {
            signature: entry.signature,
            offset: offset as u32,
            size: (self.index - offset) as u32,
        }
    }

    /// Write a tag table row
    pub fn write_tag_table_entry(&mut self, row: &TagTableEntry) -> usize {
        self.write_u32(row.signature.0) + self.write_u32(row.offset) + self.write_u32(row.size)
    }
}
