use byteorder::{ByteOrder, LittleEndian};

use crate::error::{WadError, WadResult};

/// A record with a fixed on-disk width. `from_bytes` is only ever handed a
/// slice of exactly `WIDTH` bytes, the bounds check happens in the cursor.
pub trait FixedRecord: Sized {
    const WIDTH: usize;

    fn from_bytes(bytes: &[u8]) -> Self;
}

/// Random access reader over an immutable buffer. All WAD integers are
/// little-endian.
///
/// Each decode call makes its own cursor, so no position state is shared
/// between independent decodes of the same buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Seeking past the end is allowed, the following read fails instead.
    pub fn seek(&mut self, offset: usize) {
        self.position = offset;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn read_exact(&mut self, wanted: usize) -> WadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(wanted)
            .filter(|end| *end <= self.data.len())
            .ok_or(WadError::TruncatedRead {
                offset: self.position,
                wanted,
                len: self.data.len(),
            })?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> WadResult<u8> {
        Ok(self.read_exact(1)?[0])
    }

    pub fn read_u16(&mut self) -> WadResult<u16> {
        Ok(LittleEndian::read_u16(self.read_exact(2)?))
    }

    pub fn read_i16(&mut self) -> WadResult<i16> {
        Ok(LittleEndian::read_i16(self.read_exact(2)?))
    }

    pub fn read_u32(&mut self) -> WadResult<u32> {
        Ok(LittleEndian::read_u32(self.read_exact(4)?))
    }

    pub fn read_fixed<T: FixedRecord>(&mut self) -> WadResult<T> {
        Ok(T::from_bytes(self.read_exact(T::WIDTH)?))
    }
}

/// Read an `i16` at `offset` within a record slice
pub(crate) fn i16_at(bytes: &[u8], offset: usize) -> i16 {
    LittleEndian::read_i16(&bytes[offset..offset + 2])
}

/// Read a `u16` at `offset` within a record slice
pub(crate) fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&bytes[offset..offset + 2])
}

/// Read a `u32` at `offset` within a record slice
pub(crate) fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&bytes[offset..offset + 4])
}
