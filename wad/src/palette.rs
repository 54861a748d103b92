use crate::cursor::{ByteCursor, FixedRecord};
use crate::directory::LumpInfo;
use crate::error::{WadError, WadResult};
use crate::flat::{FLAT_HEIGHT, FLAT_WIDTH, WadFlat};
use crate::patch::WadPatch;

/// PLAYPAL holds this many palettes back to back. The first is the normal
/// one, the rest are damage/pickup/radiation suit tints.
pub const PLAYPAL_COUNT: usize = 14;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WadColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl WadColour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// 256 RGB triples, 768 bytes on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadPalette(pub [WadColour; 256]);

impl Default for WadPalette {
    fn default() -> Self {
        WadPalette([WadColour::default(); 256])
    }
}

impl FixedRecord for WadPalette {
    const WIDTH: usize = 256 * 3;

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut palette = WadPalette::default();
        for (colour, rgb) in palette.0.iter_mut().zip(bytes.chunks_exact(3)) {
            *colour = WadColour::new(rgb[0], rgb[1], rgb[2]);
        }
        palette
    }
}

impl WadPalette {
    pub fn colour(&self, index: u8) -> WadColour {
        self.0[index as usize]
    }
}

/// Read all 14 palettes of a PLAYPAL lump
pub fn decode_playpal(buffer: &[u8], lump: &LumpInfo) -> WadResult<Vec<WadPalette>> {
    let mut cursor = ByteCursor::new(buffer);
    cursor.seek(lump.offset as usize);
    (0..PLAYPAL_COUNT)
        .map(|_| cursor.read_fixed())
        .collect::<WadResult<Vec<WadPalette>>>()
        .map_err(|e| WadError::MalformedPalette {
            lump: lump.name.to_string(),
            source: Box::new(e),
        })
}

/// An RGBA8 image, row major. Pixels with no data are fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * 4)
    }

    /// Paint one opaque pixel. Coordinates outside the raster are ignored.
    pub fn set(&mut self, x: usize, y: usize, colour: WadColour) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&[colour.r, colour.g, colour.b, 0xFF]);
        }
    }

    /// RGBA at `x, y`, `None` outside the raster
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}

/// Draw a patch column by column. Rows that fall below the patch height are
/// clipped.
pub fn render_patch(patch: &WadPatch, palette: &WadPalette) -> Raster {
    let mut raster = Raster::new(patch.width as usize, patch.height as usize);
    for (x, column) in patch.columns.iter().enumerate() {
        for post in column.posts.iter() {
            for (row, index) in post.pixels.iter().enumerate() {
                let y = post.top_delta as usize + row;
                if y >= raster.height {
                    break;
                }
                raster.set(x, y, palette.colour(*index));
            }
        }
    }
    raster
}

pub fn render_flat(flat: &WadFlat, palette: &WadPalette) -> Raster {
    let mut raster = Raster::new(FLAT_WIDTH, FLAT_HEIGHT);
    for (i, index) in flat.data.iter().take(FLAT_WIDTH * FLAT_HEIGHT).enumerate() {
        raster.set(i % FLAT_WIDTH, i / FLAT_WIDTH, palette.colour(*index));
    }
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WadData;
    use crate::flat::FLAT_SIZE;
    use crate::tests::{WadBuilder, patch_bytes, test_palettes};

    fn grey_palette() -> WadPalette {
        let mut palette = WadPalette::default();
        for (i, c) in palette.0.iter_mut().enumerate() {
            *c = WadColour::new(i as u8, i as u8, 255 - i as u8);
        }
        palette
    }

    #[test]
    fn playpal() {
        let data = WadBuilder::new()
            .lump("PLAYPAL", &test_palettes())
            .build();
        let wad = WadData::from_bytes(data).unwrap();
        let palettes = decode_playpal(wad.data(), &wad.lumps()[0]).unwrap();
        assert_eq!(palettes.len(), PLAYPAL_COUNT);
        // Palette n has colour i = (i, n, 255 - i)
        assert_eq!(palettes[0].colour(0), WadColour::new(0, 0, 255));
        assert_eq!(palettes[3].colour(10), WadColour::new(10, 3, 245));
        assert_eq!(palettes[13].colour(255), WadColour::new(255, 13, 0));
    }

    #[test]
    fn truncated_playpal() {
        let mut bytes = test_palettes();
        bytes.truncate(768 * 13 + 10);
        let data = WadBuilder::new().lump("PLAYPAL", &bytes).build();
        let mut wad_bytes = data;
        // Chop the directory off the end too so the read can't run into it
        let wad = WadData::from_bytes(wad_bytes.clone()).unwrap();
        let lump = wad.lumps()[0];
        wad_bytes.truncate(lump.offset as usize + lump.size as usize);
        assert!(matches!(
            decode_playpal(&wad_bytes, &lump),
            Err(WadError::MalformedPalette { .. })
        ));
    }

    #[test]
    fn patch_is_column_major() {
        let bytes = patch_bytes(2, 4, 0, 0, &[vec![(0, vec![1, 2, 3])], vec![(2, vec![7])]]);
        let data = WadBuilder::new().lump("PATCH", &bytes).build();
        let wad = WadData::from_bytes(data).unwrap();
        let patch = WadPatch::from_lump(wad.data(), &wad.lumps()[0]).unwrap();

        let raster = render_patch(&patch, &grey_palette());
        assert_eq!((raster.width, raster.height), (2, 4));
        assert_eq!(raster.get(0, 0), Some([1, 1, 254, 255]));
        assert_eq!(raster.get(0, 1), Some([2, 2, 253, 255]));
        assert_eq!(raster.get(0, 2), Some([3, 3, 252, 255]));
        assert_eq!(raster.get(0, 3), Some([0, 0, 0, 0]));
        assert_eq!(raster.get(1, 0), Some([0, 0, 0, 0]));
        assert_eq!(raster.get(1, 2), Some([7, 7, 248, 255]));
    }

    #[test]
    fn post_past_height_is_clipped() {
        let bytes = patch_bytes(1, 2, 0, 0, &[vec![(1, vec![5, 6, 7])]]);
        let data = WadBuilder::new().lump("TALL", &bytes).build();
        let wad = WadData::from_bytes(data).unwrap();
        let patch = WadPatch::from_lump(wad.data(), &wad.lumps()[0]).unwrap();
        let raster = render_patch(&patch, &grey_palette());
        assert_eq!(raster.pixels.len(), 2 * 4);
        assert_eq!(raster.get(0, 2), None);
        assert_eq!(raster.get(0, 1), Some([5, 5, 250, 255]));
    }

    #[test]
    fn out_of_range_pixels() {
        let mut raster = Raster::new(2, 2);
        raster.set(2, 0, WadColour::new(1, 2, 3));
        raster.set(0, 5, WadColour::new(1, 2, 3));
        assert!(raster.pixels.iter().all(|b| *b == 0));
        assert_eq!(raster.get(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(raster.get(2, 1), None);
    }

    #[test]
    fn flat_is_row_major() {
        let mut data = vec![0u8; FLAT_SIZE];
        data[1] = 9;
        data[64] = 4;
        let flat = WadFlat {
            name: "TEST".to_string(),
            data,
        };
        let raster = render_flat(&flat, &grey_palette());
        assert_eq!((raster.width, raster.height), (64, 64));
        assert_eq!(raster.get(1, 0), Some([9, 9, 246, 255]));
        assert_eq!(raster.get(0, 1), Some([4, 4, 251, 255]));
        assert_eq!(raster.get(0, 0).map(|p| p[3]), Some(255));
        assert_eq!(raster.get(64, 0), None);
    }
}
