use crate::cursor::ByteCursor;
use crate::directory::LumpInfo;
use crate::error::{WadError, WadResult};

pub const FLAT_WIDTH: usize = 64;
pub const FLAT_HEIGHT: usize = 64;
pub const FLAT_SIZE: usize = FLAT_WIDTH * FLAT_HEIGHT;

/// A floor or ceiling texture: a raw 64x64 grid of palette indexes stored
/// row by row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadFlat {
    pub name: String,
    pub data: Vec<u8>,
}

impl WadFlat {
    /// Read the first 4096 bytes of the lump. Extra bytes are ignored.
    pub fn from_lump(buffer: &[u8], lump: &LumpInfo) -> WadResult<WadFlat> {
        if (lump.size as usize) < FLAT_SIZE {
            return Err(WadError::TruncatedRead {
                offset: lump.offset as usize,
                wanted: FLAT_SIZE,
                len: lump.size as usize,
            });
        }
        let mut cursor = ByteCursor::new(buffer);
        cursor.seek(lump.offset as usize);
        Ok(WadFlat {
            name: lump.name.to_string(),
            data: cursor.read_exact(FLAT_SIZE)?.to_vec(),
        })
    }

    /// Palette index at `x, y`, `None` outside the 64x64 grid
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= FLAT_WIDTH || y >= FLAT_HEIGHT {
            return None;
        }
        self.data.get(y * FLAT_WIDTH + x).copied()
    }
}
