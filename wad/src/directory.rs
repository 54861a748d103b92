use std::fmt;

use log::debug;

use crate::cursor::{ByteCursor, FixedRecord, u32_at};
use crate::error::{WadError, WadResult};
use crate::header::WadHeader;

pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// An 8 byte name field as used for lumps and texture references. NUL
/// padded, but not NUL terminated when all 8 characters are used.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WadName(pub [u8; 8]);

impl WadName {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut name = [0u8; 8];
        let len = bytes.len().min(8);
        name[..len].copy_from_slice(&bytes[..len]);
        WadName(name)
    }

    /// The significant bytes, up to the first NUL
    pub fn trimmed(&self) -> &[u8] {
        let len = self.0.iter().position(|b| *b == 0).unwrap_or(8);
        &self.0[..len]
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.trimmed().starts_with(prefix.as_bytes())
    }
}

impl PartialEq<str> for WadName {
    fn eq(&self, other: &str) -> bool {
        self.trimmed() == other.as_bytes()
    }
}

impl PartialEq<&str> for WadName {
    fn eq(&self, other: &&str) -> bool {
        self.trimmed() == other.as_bytes()
    }
}

impl fmt::Display for WadName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.trimmed()))
    }
}

impl fmt::Debug for WadName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Contains the details for a lump of data: where it starts, the size of it,
/// and the name
///
/// The directory structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                                    |
/// |------------|--------------|------------------------------------------------------------|
/// | 0x00-0x03  | unsigned int | Offset value to the start of the lump data in the WAD file |
/// | 0x04-0x07  | unsigned int | The size of the lump in bytes                              |
/// | 0x08-0x0f  | 8 ASCII char | ASCII holding the name of the lump                         |
///
/// The position of a lump in the directory matters as much as its name:
/// maps and marker ranges are found by order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LumpInfo {
    /// The offset in bytes where the lump data starts
    pub offset: u32,
    /// The size in bytes of the lump referenced
    pub size: u32,
    /// Name for the lump data
    pub name: WadName,
}

impl LumpInfo {
    /// Zero sized lumps only ever act as markers
    pub fn is_marker(&self) -> bool {
        self.size == 0
    }

    /// Byte range of the payload within the WAD buffer
    pub fn data_range(&self) -> std::ops::Range<usize> {
        self.offset as usize..self.offset as usize + self.size as usize
    }
}

impl FixedRecord for LumpInfo {
    const WIDTH: usize = DIRECTORY_ENTRY_SIZE;

    fn from_bytes(bytes: &[u8]) -> Self {
        LumpInfo {
            offset: u32_at(bytes, 0),
            size: u32_at(bytes, 4),
            name: WadName::from_bytes(&bytes[8..16]),
        }
    }
}

impl fmt::Debug for LumpInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nLumpInfo {{\n  name: {},\n  size: {},\n  offset: {},\n}}",
            self.name, self.size, self.offset
        )
    }
}

/// Read every directory entry, in file order
pub fn decode_directory(buffer: &[u8], header: &WadHeader) -> WadResult<Vec<LumpInfo>> {
    if header.lump_count < 1 {
        return Err(WadError::MalformedDirectory(
            "WAD has no lumps".to_string(),
        ));
    }

    let mut cursor = ByteCursor::new(buffer);
    let mut lumps = Vec::with_capacity(header.lump_count as usize);
    for i in 0..header.lump_count as usize {
        cursor.seek(header.dir_offset as usize + i * DIRECTORY_ENTRY_SIZE);
        let lump: LumpInfo = cursor
            .read_fixed()
            .map_err(|e| WadError::MalformedDirectory(format!("entry {i}: {e}")))?;
        lumps.push(lump);
    }
    debug!("Read {} directory entries", lumps.len());
    Ok(lumps)
}
