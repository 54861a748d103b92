use log::error;

use crate::cursor::ByteCursor;
use crate::directory::LumpInfo;
use crate::error::{WadError, WadResult};

/// A `startRow` of this value ends a column
pub const POST_TERMINATOR: u8 = 0xFF;

const PATCH_HEADER_SIZE: usize = 8;

/// One vertical run of opaque pixels in a patch column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadPost {
    /// Row the run starts on, relative to the top of the patch
    pub top_delta: u8,
    /// Palette indexes, one per row
    pub pixels: Vec<u8>,
}

impl WadPost {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WadColumn {
    pub posts: Vec<WadPost>,
}

/// A column encoded, paletted image. Used for sprites, wall patches and
/// menu/HUD graphics.
///
/// | Field Size | Data Type | Content                                      |
/// |------------|-----------|----------------------------------------------|
/// | 0x00-0x01  | u16       | Width                                        |
/// | 0x02-0x03  | u16       | Height                                       |
/// | 0x04-0x05  | i16       | Left offset                                  |
/// | 0x06-0x07  | i16       | Top offset                                   |
/// | 0x08-...   | u32 * w   | Column offsets, relative to the lump start   |
///
/// Each column is a chain of posts: `[u8 top][u8 len][u8 pad][len bytes][u8 pad]`
/// ending at a post whose top is `0xFF`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WadPatch {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub left_offset: i16,
    pub top_offset: i16,
    pub column_offsets: Vec<u32>,
    pub columns: Vec<WadColumn>,
}

impl WadPatch {
    /// Decode the patch held in `lump`. Any read failure fails the whole
    /// patch.
    pub fn from_lump(buffer: &[u8], lump: &LumpInfo) -> WadResult<WadPatch> {
        if (lump.size as usize) < PATCH_HEADER_SIZE {
            return Err(WadError::HeaderTooSmall {
                lump: lump.name.to_string(),
                size: lump.size,
            });
        }

        Self::decode(buffer, lump).map_err(|e| {
            // Column table length is one entry per column. A WAD that only
            // decodes with `width - 1` entries should show up here.
            error!("Could not decode patch {}: {e}", lump.name);
            WadError::MalformedPatch {
                lump: lump.name.to_string(),
                source: Box::new(e),
            }
        })
    }

    fn decode(buffer: &[u8], lump: &LumpInfo) -> WadResult<WadPatch> {
        let base = lump.offset as usize;
        let mut cursor = ByteCursor::new(buffer);
        cursor.seek(base);

        let width = cursor.read_u16()?;
        let height = cursor.read_u16()?;
        let left_offset = cursor.read_i16()?;
        let top_offset = cursor.read_i16()?;

        let column_offsets = (0..width)
            .map(|_| cursor.read_u32())
            .collect::<WadResult<Vec<u32>>>()?;

        let mut columns = Vec::with_capacity(width as usize);
        for offset in column_offsets.iter() {
            cursor.seek(base + *offset as usize);
            columns.push(read_column(&mut cursor)?);
        }

        Ok(WadPatch {
            name: lump.name.to_string(),
            width,
            height,
            left_offset,
            top_offset,
            column_offsets,
            columns,
        })
    }
}

/// Read posts from the cursor position until the terminator. Each post
/// follows directly after the previous one's trailing pad byte.
fn read_column(cursor: &mut ByteCursor) -> WadResult<WadColumn> {
    let mut posts = Vec::new();
    loop {
        let top_delta = cursor.read_u8()?;
        if top_delta == POST_TERMINATOR {
            break;
        }
        let len = cursor.read_u8()?;
        cursor.read_u8()?; // pad
        let pixels = cursor.read_exact(len as usize)?.to_vec();
        cursor.read_u8()?; // pad
        posts.push(WadPost { top_delta, pixels });
    }
    Ok(WadColumn { posts })
}
