use thiserror::Error;

pub type WadResult<T> = Result<T, WadError>;

/// Everything that can go wrong while decoding a WAD held in memory.
///
/// Only some of these abort a whole decode: a bad header, directory, patch
/// or palette. The rest are reported through `log::warn!` by the caller and
/// the offending unit is skipped.
#[derive(Debug, Error)]
pub enum WadError {
    /// A read would run past the end of the buffer.
    #[error("read of {wanted} bytes at offset {offset} runs past the end of the buffer ({len} bytes)")]
    TruncatedRead {
        offset: usize,
        wanted: usize,
        len: usize,
    },

    #[error("malformed WAD header: {0}")]
    MalformedHeader(String),

    #[error("malformed WAD directory: {0}")]
    MalformedDirectory(String),

    /// A start marker that sits at or after its end marker.
    #[error("malformed {start}/{end} markers: start at lump {start_index}, end at lump {end_index}")]
    MalformedMarkers {
        start: &'static str,
        end: &'static str,
        start_index: usize,
        end_index: usize,
    },

    /// Only one half of a marker pair is present.
    #[error("marker {found} has no matching {missing}")]
    MissingMarker {
        found: &'static str,
        missing: &'static str,
    },

    #[error("patch {lump} is {size} bytes, too small to hold a patch header")]
    HeaderTooSmall { lump: String, size: u32 },

    #[error("malformed patch {lump}: {source}")]
    MalformedPatch {
        lump: String,
        #[source]
        source: Box<WadError>,
    },

    #[error("malformed palette {lump}: {source}")]
    MalformedPalette {
        lump: String,
        #[source]
        source: Box<WadError>,
    },

    #[error("lump {0} not found")]
    MissingLump(String),

    #[error("lump {lump} has an unrecognised music header {magic:02X?}")]
    UnknownMusicFormat { lump: String, magic: [u8; 4] },
}
