use std::fmt;

use crate::cursor::{ByteCursor, FixedRecord, u32_at};
use crate::directory::DIRECTORY_ENTRY_SIZE;
use crate::error::{WadError, WadResult};

/// Header which tells us the WAD type and where the directory is
///
/// The header structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                              |
/// |------------|--------------|------------------------------------------------------|
/// | 0x00-0x03  | 4 ASCII char | *Should* be an ASCII string (either "IWAD" or "PWAD") |
/// | 0x04-0x07  | unsigned int | The number entries in the directory                  |
/// | 0x08-0x0b  | unsigned int | Offset in bytes to the directory in the WAD file     |
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WadHeader {
    /// Will be either `IWAD` for game, or `PWAD` for patch
    pub wad_type: [u8; 4],
    /// The count of "lumps" of data
    pub lump_count: u32,
    /// Offset in bytes that the directory starts at
    pub dir_offset: u32,
}

impl WadHeader {
    pub const SIZE: usize = 12;

    /// Decode the header at the start of `buffer` and check that the
    /// directory it describes lies inside the buffer.
    pub fn decode(buffer: &[u8]) -> WadResult<Self> {
        if buffer.len() < Self::SIZE {
            return Err(WadError::MalformedHeader(format!(
                "buffer is {} bytes, a header needs {}",
                buffer.len(),
                Self::SIZE
            )));
        }
        let header: WadHeader = ByteCursor::new(buffer)
            .read_fixed()
            .map_err(|e| WadError::MalformedHeader(e.to_string()))?;

        let dir_end = header.dir_offset as u64 + DIRECTORY_ENTRY_SIZE as u64 * header.lump_count as u64;
        if dir_end > buffer.len() as u64 {
            return Err(WadError::MalformedHeader(format!(
                "directory of {} lumps at offset {} ends at {}, past the buffer end {}",
                header.lump_count,
                header.dir_offset,
                dir_end,
                buffer.len()
            )));
        }
        Ok(header)
    }

    pub fn wad_type_str(&self) -> String {
        String::from_utf8_lossy(&self.wad_type).into_owned()
    }

    pub fn is_iwad(&self) -> bool {
        &self.wad_type == b"IWAD"
    }
}

impl FixedRecord for WadHeader {
    const WIDTH: usize = Self::SIZE;

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut wad_type = [0u8; 4];
        wad_type.copy_from_slice(&bytes[..4]);
        WadHeader {
            wad_type,
            lump_count: u32_at(bytes, 4),
            dir_offset: u32_at(bytes, 8),
        }
    }
}

impl fmt::Debug for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadHeader {{\n  wad_type: {},\n  lump_count: {},\n  dir_offset: {},\n}}",
            self.wad_type_str(),
            self.lump_count,
            self.dir_offset
        )
    }
}
