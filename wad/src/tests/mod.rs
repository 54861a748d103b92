//! Builders for small in-memory WADs, and tests of the whole decode.

use crate::directory::DIRECTORY_ENTRY_SIZE;
use crate::header::WadHeader;
use crate::palette::PLAYPAL_COUNT;

/// Lays lumps out back to back after the header, in the order they are
/// added, with the directory at the very end.
pub struct WadBuilder {
    wad_type: [u8; 4],
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    pub fn new() -> Self {
        Self {
            wad_type: *b"PWAD",
            lumps: Vec::new(),
        }
    }

    pub fn iwad(mut self) -> Self {
        self.wad_type = *b"IWAD";
        self
    }

    pub fn lump(mut self, name: &str, data: &[u8]) -> Self {
        self.lumps.push((name.to_string(), data.to_vec()));
        self
    }

    /// A zero sized lump
    pub fn marker(self, name: &str) -> Self {
        self.lump(name, &[])
    }

    pub fn build(self) -> Vec<u8> {
        let lump_bytes: usize = self.lumps.iter().map(|(_, d)| d.len()).sum();
        let dir_offset = WadHeader::SIZE + lump_bytes;

        let mut out = Vec::with_capacity(dir_offset + self.lumps.len() * DIRECTORY_ENTRY_SIZE);
        out.extend_from_slice(&self.wad_type);
        out.extend_from_slice(&(self.lumps.len() as u32).to_le_bytes());
        out.extend_from_slice(&(dir_offset as u32).to_le_bytes());

        let mut directory = Vec::with_capacity(self.lumps.len() * DIRECTORY_ENTRY_SIZE);
        for (name, data) in self.lumps.iter() {
            directory.extend_from_slice(&(out.len() as u32).to_le_bytes());
            directory.extend_from_slice(&(data.len() as u32).to_le_bytes());
            let mut padded = [0u8; 8];
            padded[..name.len()].copy_from_slice(name.as_bytes());
            directory.extend_from_slice(&padded);
            out.extend_from_slice(data);
        }
        out.extend_from_slice(&directory);
        out
    }
}

/// Encode a patch. Each column is a list of `(top_delta, pixels)` posts.
pub fn patch_bytes(
    width: u16,
    height: u16,
    left: i16,
    top: i16,
    columns: &[Vec<(u8, Vec<u8>)>],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&left.to_le_bytes());
    out.extend_from_slice(&top.to_le_bytes());

    let mut column_data = Vec::new();
    let table_end = 8 + 4 * width as usize;
    for column in columns.iter() {
        out.extend_from_slice(&((table_end + column_data.len()) as u32).to_le_bytes());
        for (top_delta, pixels) in column.iter() {
            column_data.push(*top_delta);
            column_data.push(pixels.len() as u8);
            column_data.push(0);
            column_data.extend_from_slice(pixels);
            column_data.push(0);
        }
        column_data.push(0xFF);
    }
    out.extend_from_slice(&column_data);
    out
}

/// A PLAYPAL where palette `n` maps index `i` to `(i, n, 255 - i)`
pub fn test_palettes() -> Vec<u8> {
    let mut out = Vec::with_capacity(PLAYPAL_COUNT * 768);
    for n in 0..PLAYPAL_COUNT {
        for i in 0..=255u8 {
            out.extend_from_slice(&[i, n as u8, 255 - i]);
        }
    }
    out
}

mod contents {
    use super::{WadBuilder, patch_bytes, test_palettes};
    use crate::error::WadError;
    use crate::flat::FLAT_SIZE;
    use crate::markers::MapLump;
    use crate::music::MusicFormat;
    use crate::wad::{DecodeOptions, WadContents, WadData};

    fn le(words: &[i16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn imp() -> Vec<u8> {
        patch_bytes(2, 3, 1, 2, &[vec![(0, vec![4, 5])], vec![(1, vec![6, 7])]])
    }

    /// Every kind of lump the decoder knows about
    fn sample_wad() -> Vec<u8> {
        WadBuilder::new()
            .iwad()
            .lump("PLAYPAL", &test_palettes())
            .marker("E1M1")
            .lump("THINGS", &le(&[1056, -3616, 90, 1, 7]))
            .lump("LINEDEFS", &le(&[0, 1, 1, 0, 0, 0, -1]))
            .lump("SIDEDEFS", &[0u8; 30])
            .lump("VERTEXES", &le(&[1088, -3680, 1024, -3680]))
            .lump("SEGS", &le(&[0, 1, 16384, 0, 0, 0]))
            .lump("SSECTORS", &le(&[1, 0]))
            .lump("NODES", &[0u8; 28])
            .lump("SECTORS", &[0u8; 26])
            .lump("REJECT", &[0])
            .lump("BLOCKMAP", &le(&[0, 0, 1, 1]))
            .lump("D_E1M1", b"MUS\x1A\x10\x00\x20\x00")
            .lump("D_INTRO", b"MThd\0\0\0\x06")
            .lump("DEMO1", b"MUS\x1A")
            .marker("S_START")
            .lump("TROOA1", &imp())
            .lump("TROOB1", &imp())
            .marker("S_END")
            .marker("P_START")
            .lump("WALL00_1", &imp())
            .marker("P_END")
            .marker("F_START")
            .lump("FLOOR0_1", &[3u8; FLAT_SIZE])
            .lump("BROKEN", &[1u8; 10])
            .marker("F_END")
            .build()
    }

    #[test]
    fn load_everything() {
        let wad = WadData::from_bytes(sample_wad()).unwrap();
        assert!(wad.header().is_iwad());
        assert_eq!(wad.lumps().len(), wad.header().lump_count as usize);

        let contents = WadContents::load(&wad, &DecodeOptions::default()).unwrap();
        assert_eq!(contents.palettes.len(), 14);
        assert_eq!(contents.palette().unwrap().colour(7).g, 0);

        assert_eq!(contents.maps.len(), 1);
        let map = &contents.maps[0];
        assert_eq!(map.name, "E1M1");
        assert_eq!(map.things.len(), 1);
        assert_eq!(map.things[0].angle, 90);
        assert_eq!(map.things[0].kind, 1);
        assert_eq!(map.vertexes.len(), 2);
        assert_eq!(map.segments[0].angle, 16384);
        assert_eq!(map.blockmap.len(), 8);

        let sprites: Vec<&str> = contents.sprites.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(sprites, vec!["TROOA1", "TROOB1"]);
        assert_eq!(contents.patches.len(), 1);
        assert_eq!(contents.patches[0].left_offset, 1);

        // The short flat is skipped, not fatal
        assert_eq!(contents.flats.len(), 1);
        assert_eq!(contents.flats[0].name, "FLOOR0_1");

        let songs: Vec<(&str, MusicFormat)> = contents
            .music
            .iter()
            .map(|m| (m.name.as_str(), m.format))
            .collect();
        assert_eq!(
            songs,
            vec![("D_E1M1", MusicFormat::Mus), ("D_INTRO", MusicFormat::Midi)]
        );
    }

    #[test]
    fn decoding_twice_is_identical() {
        let data = sample_wad();
        let options = DecodeOptions::default();
        let first = WadContents::load(&WadData::from_bytes(data.clone()).unwrap(), &options).unwrap();
        let second = WadContents::load(&WadData::from_bytes(data).unwrap(), &options).unwrap();
        assert_eq!(first.maps, second.maps);
        assert_eq!(first.sprites, second.sprites);
        assert_eq!(first.patches, second.patches);
        assert_eq!(first.flats, second.flats);
        assert_eq!(first.music, second.music);
        assert_eq!(first.palettes, second.palettes);
    }

    #[test]
    fn options_select_what_is_decoded() {
        let wad = WadData::from_bytes(sample_wad()).unwrap();
        let options = DecodeOptions {
            graphics: false,
            music: false,
            ..Default::default()
        };
        let contents = WadContents::load(&wad, &options).unwrap();
        assert_eq!(contents.maps.len(), 1);
        assert!(contents.palettes.is_empty());
        assert!(contents.sprites.is_empty());
        assert!(contents.music.is_empty());
    }

    #[test]
    fn music_prefix_is_configurable() {
        let wad = WadData::from_bytes(sample_wad()).unwrap();
        let demos = wad.music("DEMO");
        assert_eq!(demos.len(), 1);
        assert_eq!(demos[0].format, MusicFormat::Mus);
        assert_eq!(wad.music_data(&demos[0]).unwrap(), b"MUS\x1A");
    }

    #[test]
    fn lookups() {
        let wad = WadData::from_bytes(sample_wad()).unwrap();
        assert_eq!(wad.find_lump_index("PLAYPAL"), Some(0));
        assert!(wad.lump_exists("S_END"));
        assert!(!wad.lump_exists("COLORMAP"));
        let lump = wad.find_lump("D_INTRO").unwrap();
        assert_eq!(wad.lump_data(lump).unwrap(), b"MThd\0\0\0\x06");
    }

    #[test]
    fn pwad_without_playpal() {
        let data = WadBuilder::new()
            .marker("MAP07")
            .lump("THINGS", &[0u8; 10])
            .marker("S_START")
            .lump("SPIDA1", &imp())
            .marker("S_END")
            .build();
        let wad = WadData::from_bytes(data).unwrap();
        assert!(matches!(wad.palettes(), Err(WadError::MissingLump(_))));

        let contents = WadContents::load(&wad, &DecodeOptions::default()).unwrap();
        assert!(contents.palettes.is_empty());
        assert!(contents.palette().is_none());
        assert_eq!(contents.sprites.len(), 1);

        let raw = &wad.map_lumps()[0];
        assert_eq!(raw.name, "MAP07");
        assert_eq!(raw.found().len(), 1);
        assert!(raw.missing().contains(MapLump::Nodes));
    }

    #[test]
    fn bad_sprite_fails_graphics() {
        let data = WadBuilder::new()
            .marker("S_START")
            .lump("BAD", &[1, 0])
            .marker("S_END")
            .build();
        let wad = WadData::from_bytes(data).unwrap();
        let options = DecodeOptions {
            maps: false,
            music: false,
            ..Default::default()
        };
        assert!(matches!(
            WadContents::load(&wad, &options),
            Err(WadError::HeaderTooSmall { .. })
        ));
    }
}
