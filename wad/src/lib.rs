//! This crate contains the structures and tools for decoding WAD files held
//! in memory: the directory, maps, patches, flats, palettes and music.
//!
//! The structure of a WAD is this:
//!
//! ```text,ignore
//!                        <───── 32 bits ──────>
//!                        ┌────────────────────┐
//!             ┌──── 0x00 |  ASCII WAD Type    | 0x03
//!             |          | ────────────────── |
//!     Header ─┤     0x04 | # of directories   | 0x07
//!             |          | ────────────────── |
//!             └──── 0x08 | offset to listing ───0x0B ──┐
//!             ┌───────── | ────────────────── |        |
//!             |     0x0C | ┌────────────────┐ |        |
//!             |          | |   Lump Bytes   |<─────┐   |
//!     Lumps ──┤          | |       .        | |    |   |
//!             |          | └────────────────┘ |    |   |
//!             |          |         .          |    |   |
//!             └───────── |         .          |    |   |
//!             ┌───────── | ┌────────────────┐<─────────┘
//!             |          | |   Lump Offset  |──────┘
//!  Directory ─┤          | |----------------| |
//!     List    |          | |   Lump Size    | |
//!             |          | |----------------| |
//!             |          | |   Lump Name    | |
//!             |          | └────────────────┘ |
//!             |          |         .          |
//!             └───────── └────────────────────┘
//! ```
//!
//! Nothing here touches the filesystem, a `WadData` is built from bytes the
//! caller has already read.

pub mod cursor;
pub mod directory;
pub mod error;
pub mod flat;
pub mod header;
pub mod iterators;
/// A Lump is a chunk of data that starts at an offset in the WAD, and ends
/// at a location that is `sizeof<record-in-lump> * num-of-entries`
///
/// The lump module contains the fixed size level records those lumps are
/// parsed in to.
pub mod lumps;
pub mod map;
pub mod markers;
pub mod music;
pub mod palette;
pub mod patch;
pub mod wad;

#[cfg(test)]
mod tests;

pub use crate::cursor::{ByteCursor, FixedRecord};
pub use crate::directory::{LumpInfo, WadName};
pub use crate::error::{WadError, WadResult};
pub use crate::flat::WadFlat;
pub use crate::header::WadHeader;
pub use crate::map::WadMap;
pub use crate::markers::{LumpGroup, MapLump, MapLumps};
pub use crate::music::{MusicFormat, MusicLump};
pub use crate::palette::{Raster, WadColour, WadPalette, render_flat, render_patch};
pub use crate::patch::{WadColumn, WadPatch, WadPost};
pub use crate::wad::*;
