use std::marker::PhantomData;

use log::warn;

use crate::cursor::{ByteCursor, FixedRecord};
use crate::directory::LumpInfo;
use crate::error::WadResult;

/// Walks the fixed size records of a lump. The record count is
/// `lump.size / T::WIDTH`, a short trailing remainder is never read.
///
/// The count is capped at what the buffer can hold past `lump.offset`, so a
/// lying directory entry costs nothing beyond the real data.
pub struct RecordIter<'a, T: FixedRecord> {
    cursor: ByteCursor<'a>,
    lump_offset: usize,
    declared_count: usize,
    item_count: usize,
    current: usize,
    _phantom: PhantomData<T>,
}

impl<'a, T: FixedRecord> RecordIter<'a, T> {
    pub fn new(buffer: &'a [u8], lump: &LumpInfo) -> Self {
        let lump_offset = lump.offset as usize;
        let declared_count = lump.size as usize / T::WIDTH;
        let available = buffer.len().saturating_sub(lump_offset) / T::WIDTH;
        Self {
            cursor: ByteCursor::new(buffer),
            lump_offset,
            declared_count,
            item_count: declared_count.min(available),
            current: 0,
            _phantom: PhantomData,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Records the directory entry claims but the buffer does not hold
    pub fn missing_count(&self) -> usize {
        self.declared_count - self.item_count
    }
}

impl<T: FixedRecord> Iterator for RecordIter<'_, T> {
    type Item = WadResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.item_count {
            self.cursor
                .seek(self.lump_offset + self.current * T::WIDTH);
            self.current += 1;
            return Some(self.cursor.read_fixed());
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.item_count - self.current;
        (left, Some(left))
    }
}

/// Decode every record of a lump. A record that can't be read is logged and
/// skipped, the rest are still returned.
pub fn decode_records<T: FixedRecord>(buffer: &[u8], lump: &LumpInfo) -> Vec<T> {
    let iter = RecordIter::<T>::new(buffer, lump);
    if iter.missing_count() > 0 {
        warn!(
            "{} claims {} records but only {} fit in the buffer, skipping the rest",
            lump.name,
            iter.item_count() + iter.missing_count(),
            iter.item_count()
        );
    }
    let mut records = Vec::with_capacity(iter.item_count());
    for (i, record) in iter.enumerate() {
        match record {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping {} record {i}: {e}", lump.name),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::{RecordIter, decode_records};
    use crate::directory::{LumpInfo, WadName};
    use crate::lumps::{WadLineDef, WadSideDef, WadVertex};

    fn lump(offset: u32, size: u32) -> LumpInfo {
        LumpInfo {
            offset,
            size,
            name: WadName::from_bytes(b"LINEDEFS"),
        }
    }

    #[test]
    fn record_count_truncates() {
        let data = [0u8; 64];
        assert_eq!(decode_records::<WadLineDef>(&data, &lump(0, 28)).len(), 2);
        assert_eq!(decode_records::<WadLineDef>(&data, &lump(0, 15)).len(), 1);
        assert_eq!(decode_records::<WadLineDef>(&data, &lump(0, 13)).len(), 0);
    }

    #[test]
    fn records_in_order() {
        let data: Vec<u8> = [1i16, 2, 3, 4, 5, 6]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let verts: Vec<WadVertex> = decode_records(&data, &lump(0, 12));
        assert_eq!(
            verts,
            vec![WadVertex::new(1, 2), WadVertex::new(3, 4), WadVertex::new(5, 6)]
        );
    }

    #[test]
    fn count_capped_by_buffer() {
        // Lump claims 3 vertexes but the buffer only holds 2
        let data = [0u8; 8];
        let mut iter = RecordIter::<WadVertex>::new(&data, &lump(0, 12));
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert_eq!(iter.missing_count(), 1);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().is_none());

        let verts: Vec<WadVertex> = decode_records(&data, &lump(0, 12));
        assert_eq!(verts.len(), 2);
    }

    #[test]
    fn oversized_lump_entry() {
        let data = [0u8; 62];
        let iter = RecordIter::<WadSideDef>::new(&data, &lump(2, 0xFFFF_FFF0));
        assert_eq!(iter.item_count(), 2);
        assert_eq!(iter.missing_count(), 0xFFFF_FFF0 / 30 - 2);

        let sides: Vec<WadSideDef> = decode_records(&data, &lump(2, 0xFFFF_FFF0));
        assert_eq!(sides.len(), 2);
        assert!(decode_records::<WadSideDef>(&data, &lump(70, 0xFFFF_FFF0)).is_empty());
    }
}
