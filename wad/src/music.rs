use std::fmt;

use crate::cursor::ByteCursor;
use crate::directory::LumpInfo;
use crate::error::WadError;

/// Music lumps are named `D_<song>`
pub const MUSIC_PREFIX: &str = "D_";

const MIDI_MAGIC: &[u8] = b"MThd";
const MUS_MAGIC: &[u8] = b"MUS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicFormat {
    Midi,
    Mus,
    Unknown,
}

impl MusicFormat {
    /// Sniff the first four bytes of `lump`.
    ///
    /// Anything unrecognised is `Unknown` along with the reason, which the
    /// caller is free to treat as a warning.
    pub fn classify(buffer: &[u8], lump: &LumpInfo) -> (MusicFormat, Option<WadError>) {
        let mut cursor = ByteCursor::new(buffer);
        cursor.seek(lump.offset as usize);
        let magic = match cursor.read_exact(4) {
            Ok(magic) => magic,
            Err(e) => return (MusicFormat::Unknown, Some(e)),
        };

        if magic.starts_with(MIDI_MAGIC) {
            (MusicFormat::Midi, None)
        } else if magic.starts_with(MUS_MAGIC) {
            (MusicFormat::Mus, None)
        } else {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(magic);
            (
                MusicFormat::Unknown,
                Some(WadError::UnknownMusicFormat {
                    lump: lump.name.to_string(),
                    magic: bytes,
                }),
            )
        }
    }

    /// File extension to use when exporting
    pub fn extension(&self) -> &'static str {
        match self {
            MusicFormat::Midi => "mid",
            MusicFormat::Mus => "mus",
            MusicFormat::Unknown => "lmp",
        }
    }
}

impl fmt::Display for MusicFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            MusicFormat::Midi => "MIDI",
            MusicFormat::Mus => "MUS",
            MusicFormat::Unknown => "Unknown",
        })
    }
}

/// A song found in the WAD. `lump` is the directory index of its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicLump {
    pub name: String,
    pub format: MusicFormat,
    pub lump: usize,
}

impl MusicLump {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}
