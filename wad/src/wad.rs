use std::fmt;

use log::{debug, info, warn};

use crate::cursor::ByteCursor;
use crate::directory::{LumpInfo, decode_directory};
use crate::error::{WadError, WadResult};
use crate::flat::WadFlat;
use crate::header::WadHeader;
use crate::map::WadMap;
use crate::markers::{
    FLAT_MARKERS, LumpGroup, MapLumps, PATCH_MARKERS, SPRITE_MARKERS, group_maps, group_range,
};
use crate::music::{MUSIC_PREFIX, MusicFormat, MusicLump};
use crate::palette::{WadPalette, decode_playpal};
use crate::patch::WadPatch;

pub const PLAYPAL: &str = "PLAYPAL";

/// "Where's All (the) Data": contains the WAD in memory, plus the directory
/// telling us where each data lump starts.
///
/// The directory is the only owner of `LumpInfo`s. Everything derived from
/// it refers back by index.
pub struct WadData {
    /// The WAD as an array of bytes read in to memory
    data: Vec<u8>,
    header: WadHeader,
    /// Tells us where each lump of data is
    lumps: Vec<LumpInfo>,
}

impl fmt::Debug for WadData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadData {{\n  header: {:?},\n  lumps: {},\n  bytes: {},\n}}",
            self.header,
            self.lumps.len(),
            self.data.len()
        )
    }
}

impl WadData {
    /// Decode the header and directory of a WAD already read in to memory
    pub fn from_bytes(data: Vec<u8>) -> WadResult<WadData> {
        let header = WadHeader::decode(&data)?;
        let lumps = decode_directory(&data, &header)?;
        info!(
            "{} with {} lumps, directory at {}",
            header.wad_type_str(),
            header.lump_count,
            header.dir_offset
        );
        Ok(WadData {
            data,
            header,
            lumps,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    pub fn lumps(&self) -> &[LumpInfo] {
        &self.lumps
    }

    pub fn find_lump_index(&self, name: &str) -> Option<usize> {
        self.lumps.iter().position(|l| l.name == name)
    }

    pub fn find_lump(&self, name: &str) -> Option<&LumpInfo> {
        self.find_lump_index(name).map(|i| &self.lumps[i])
    }

    pub fn lump_exists(&self, name: &str) -> bool {
        self.find_lump_index(name).is_some()
    }

    /// The payload of a lump, exactly `lump.size` bytes
    pub fn lump_data(&self, lump: &LumpInfo) -> WadResult<&[u8]> {
        let mut cursor = ByteCursor::new(&self.data);
        cursor.seek(lump.offset as usize);
        cursor.read_exact(lump.size as usize)
    }

    pub fn map_lumps(&self) -> Vec<MapLumps> {
        group_maps(&self.lumps)
    }

    pub fn load_map(&self, raw: &MapLumps) -> WadMap {
        WadMap::load(&self.data, &self.lumps, raw)
    }

    pub fn maps(&self) -> Vec<WadMap> {
        self.map_lumps().iter().map(|raw| self.load_map(raw)).collect()
    }

    /// All palettes in PLAYPAL
    pub fn palettes(&self) -> WadResult<Vec<WadPalette>> {
        let lump = self
            .find_lump(PLAYPAL)
            .ok_or_else(|| WadError::MissingLump(PLAYPAL.to_string()))?;
        decode_playpal(&self.data, lump)
    }

    pub fn sprite_lumps(&self) -> LumpGroup {
        group_range(&self.lumps, &SPRITE_MARKERS)
    }

    pub fn patch_lumps(&self) -> LumpGroup {
        group_range(&self.lumps, &PATCH_MARKERS)
    }

    pub fn flat_lumps(&self) -> LumpGroup {
        group_range(&self.lumps, &FLAT_MARKERS)
    }

    /// Decode every patch in a group. One bad patch fails the lot.
    pub fn patches_in(&self, group: &LumpGroup) -> WadResult<Vec<WadPatch>> {
        group
            .lumps
            .iter()
            .map(|i| WadPatch::from_lump(&self.data, &self.lumps[*i]))
            .collect()
    }

    pub fn sprites(&self) -> WadResult<Vec<WadPatch>> {
        self.patches_in(&self.sprite_lumps())
    }

    pub fn patches(&self) -> WadResult<Vec<WadPatch>> {
        self.patches_in(&self.patch_lumps())
    }

    /// Flats that can't be read are skipped
    pub fn flats(&self) -> Vec<WadFlat> {
        self.flat_lumps()
            .lumps
            .iter()
            .filter_map(|i| {
                let lump = &self.lumps[*i];
                WadFlat::from_lump(&self.data, lump)
                    .map_err(|e| warn!("Skipping flat {}: {e}", lump.name))
                    .ok()
            })
            .collect()
    }

    /// Every non-empty lump whose name starts with `prefix`, classified by
    /// its header
    pub fn music(&self, prefix: &str) -> Vec<MusicLump> {
        self.lumps
            .iter()
            .enumerate()
            .filter(|(_, lump)| !lump.is_marker() && lump.name.starts_with(prefix))
            .map(|(index, lump)| {
                let (format, err) = MusicFormat::classify(&self.data, lump);
                if let Some(e) = err {
                    warn!("Cannot detect music format for {}: {e}", lump.name);
                }
                MusicLump {
                    name: lump.name.to_string(),
                    format,
                    lump: index,
                }
            })
            .collect()
    }

    /// The raw song bytes, unmodified
    pub fn music_data(&self, song: &MusicLump) -> WadResult<&[u8]> {
        self.lump_data(&self.lumps[song.lump])
    }
}

/// What `WadContents::load` should decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub maps: bool,
    pub graphics: bool,
    pub music: bool,
    /// PLAYPAL entry used for rendering
    pub palette: usize,
    /// Name prefix that marks a music lump
    pub music_prefix: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            maps: true,
            graphics: true,
            music: true,
            palette: 0,
            music_prefix: MUSIC_PREFIX.to_string(),
        }
    }
}

/// The fully decoded contents of one WAD
#[derive(Debug, Clone, Default)]
pub struct WadContents {
    pub header: Option<WadHeader>,
    pub palettes: Vec<WadPalette>,
    pub palette: usize,
    pub maps: Vec<WadMap>,
    pub sprites: Vec<WadPatch>,
    pub patches: Vec<WadPatch>,
    pub flats: Vec<WadFlat>,
    pub music: Vec<MusicLump>,
}

impl WadContents {
    /// Decode what `options` asks for.
    ///
    /// A missing PLAYPAL (common in PWADs) leaves `palettes` empty, a
    /// truncated one is an error.
    pub fn load(wad: &WadData, options: &DecodeOptions) -> WadResult<WadContents> {
        let mut contents = WadContents {
            header: Some(*wad.header()),
            palette: options.palette,
            ..Default::default()
        };

        if options.maps {
            contents.maps = wad.maps();
        }

        if options.graphics {
            contents.palettes = match wad.palettes() {
                Ok(palettes) => palettes,
                Err(WadError::MissingLump(name)) => {
                    warn!("No {name} in this WAD, graphics can't be rendered");
                    Vec::new()
                }
                Err(e) => return Err(e),
            };
            contents.sprites = wad.sprites()?;
            contents.patches = wad.patches()?;
            contents.flats = wad.flats();
            debug!(
                "Decoded {} sprites, {} patches, {} flats",
                contents.sprites.len(),
                contents.patches.len(),
                contents.flats.len()
            );
        }

        if options.music {
            contents.music = wad.music(&options.music_prefix);
        }

        Ok(contents)
    }

    /// The palette selected for rendering, if the WAD had one
    pub fn palette(&self) -> Option<&WadPalette> {
        self.palettes.get(self.palette)
    }
}
