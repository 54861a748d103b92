//! Partitioning the flat, ordered lump directory into groups.
//!
//! Nothing in a WAD says which lumps are sprites, flats or map data, that is
//! all implied by zero sized marker lumps and by directory order. Groups here
//! never copy lump data, they hold indexes into the directory.

use std::ops::Range;

use log::{debug, warn};

use crate::directory::{LumpInfo, WadName};
use crate::error::{WadError, WadResult};

/// A `START`/`END` marker name pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

impl MarkerPair {
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }

    /// Locate the first zero sized lump named `start` and the first named
    /// `end`. Data lumps that share a marker name are not markers.
    ///
    /// `Ok(None)` if neither exists. The returned range spans the markers
    /// themselves.
    pub fn locate(&self, lumps: &[LumpInfo]) -> WadResult<Option<Range<usize>>> {
        let start = lumps
            .iter()
            .position(|l| l.is_marker() && l.name == self.start);
        let end = lumps
            .iter()
            .position(|l| l.is_marker() && l.name == self.end);
        match (start, end) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(WadError::MissingMarker {
                found: self.start,
                missing: self.end,
            }),
            (None, Some(_)) => Err(WadError::MissingMarker {
                found: self.end,
                missing: self.start,
            }),
            (Some(start), Some(end)) => self.bounds(start, end).map(Some),
        }
    }

    /// A start marker must come strictly before its end marker
    pub fn bounds(&self, start_index: usize, end_index: usize) -> WadResult<Range<usize>> {
        if start_index >= end_index {
            return Err(WadError::MalformedMarkers {
                start: self.start,
                end: self.end,
                start_index,
                end_index,
            });
        }
        Ok(start_index..end_index + 1)
    }
}

/// Marker names for one kind of lump: the main range plus any numbered
/// ranges that may sit elsewhere in the directory.
#[derive(Debug, Clone, Copy)]
pub struct RangeSpec {
    pub name: &'static str,
    pub primary: MarkerPair,
    pub auxiliary: &'static [MarkerPair],
}

pub const SPRITE_MARKERS: RangeSpec = RangeSpec {
    name: "sprites",
    primary: MarkerPair::new("S_START", "S_END"),
    auxiliary: &[MarkerPair::new("SS_START", "SS_END")],
};

pub const PATCH_MARKERS: RangeSpec = RangeSpec {
    name: "patches",
    primary: MarkerPair::new("P_START", "P_END"),
    auxiliary: &[
        MarkerPair::new("P1_START", "P1_END"),
        MarkerPair::new("P2_START", "P2_END"),
        MarkerPair::new("P3_START", "P3_END"),
    ],
};

pub const FLAT_MARKERS: RangeSpec = RangeSpec {
    name: "flats",
    primary: MarkerPair::new("F_START", "F_END"),
    auxiliary: &[
        MarkerPair::new("F1_START", "F1_END"),
        MarkerPair::new("F2_START", "F2_END"),
    ],
};

/// A named set of lumps, held as directory indexes in directory order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LumpGroup {
    pub name: String,
    pub lumps: Vec<usize>,
}

impl LumpGroup {
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Collect every non-marker lump inside the ranges described by `markers`.
///
/// A malformed or half present pair is logged and contributes nothing. An
/// auxiliary range that overlaps the primary range, or an auxiliary range
/// already taken, is dropped.
pub fn group_range(lumps: &[LumpInfo], markers: &RangeSpec) -> LumpGroup {
    let mut ranges: Vec<Range<usize>> = Vec::new();

    for pair in std::iter::once(&markers.primary).chain(markers.auxiliary.iter()) {
        match pair.locate(lumps) {
            Ok(Some(range)) => {
                if let Some(taken) = ranges.iter().find(|r| overlaps(r, &range)) {
                    debug!(
                        "{}/{} at {:?} overlaps {:?}, dropping it",
                        pair.start, pair.end, range, taken
                    );
                    continue;
                }
                ranges.push(range);
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring {} range: {e}", markers.name),
        }
    }

    // Keep directory order regardless of which pair was found first
    ranges.sort_by_key(|r| r.start);
    let indexes = ranges
        .into_iter()
        .flat_map(|r| (r.start + 1..r.end - 1).filter(|i| !lumps[*i].is_marker()))
        .collect();

    LumpGroup {
        name: markers.name.to_string(),
        lumps: indexes,
    }
}

/// The sub-lumps that make up a map, in their usual directory order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapLump {
    /// Position and angle for all monster, powerup and spawn location
    Things,
    /// An array of lines referencing two vertices (Two vertexes are connected
    /// by one `LineDef`). Also points to one or two `SideDef` depending on if
    /// this line is a wall or a portal
    LineDefs,
    /// Defines upper, lower, and middle textures. Also defines texture
    /// horizontal and vertical offsets. This is information for a `LineDef`
    SideDefs,
    /// An array of signed short X, Y pairs (`Vertex`). All coordinates in this
    /// map block are indexes into this array
    Vertexes,
    /// Portions of lines cut due to Binary Space Partitioning
    Segs,
    /// Set of segments of a `LineDef` representing a convex subspace
    SubSectors,
    /// BSP with segs, nodes and sub-sector leaves
    Nodes,
    /// Area surrounded by lines, with set ceiling and floor textures/heights
    /// with light level
    Sectors,
    /// Sector-to-sector visibility matrix to speed-up line of sight
    /// calculations
    Reject,
    /// 128x128 grid partition of the map LINEDEFS to accelerate collision
    /// detection
    Blockmap,
}

impl MapLump {
    pub const COUNT: usize = 10;

    pub const ALL: [MapLump; Self::COUNT] = [
        MapLump::Things,
        MapLump::LineDefs,
        MapLump::SideDefs,
        MapLump::Vertexes,
        MapLump::Segs,
        MapLump::SubSectors,
        MapLump::Nodes,
        MapLump::Sectors,
        MapLump::Reject,
        MapLump::Blockmap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MapLump::Things => "THINGS",
            MapLump::LineDefs => "LINEDEFS",
            MapLump::SideDefs => "SIDEDEFS",
            MapLump::Vertexes => "VERTEXES",
            MapLump::Segs => "SEGS",
            MapLump::SubSectors => "SSECTORS",
            MapLump::Nodes => "NODES",
            MapLump::Sectors => "SECTORS",
            MapLump::Reject => "REJECT",
            MapLump::Blockmap => "BLOCKMAP",
        }
    }

    pub fn from_name(name: &WadName) -> Option<MapLump> {
        Self::ALL.into_iter().find(|kind| *name == kind.name())
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of `MapLump` kinds as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapLumpSet(u16);

impl MapLumpSet {
    pub fn all() -> Self {
        Self((1 << MapLump::COUNT) - 1)
    }

    pub fn contains(&self, kind: MapLump) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: MapLump) {
        self.0 |= kind.bit();
    }

    /// Returns `true` if `kind` was in the set
    pub fn remove(&mut self, kind: MapLump) -> bool {
        let present = self.contains(kind);
        self.0 &= !kind.bit();
        present
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = MapLump> + '_ {
        MapLump::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

/// The directory indexes belonging to one map: its marker and whichever of
/// the ten sub-lumps were found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLumps {
    pub name: String,
    pub marker: usize,
    lumps: [Option<usize>; MapLump::COUNT],
}

impl MapLumps {
    pub fn new(name: String, marker: usize) -> Self {
        Self {
            name,
            marker,
            lumps: [None; MapLump::COUNT],
        }
    }

    pub fn get(&self, kind: MapLump) -> Option<usize> {
        self.lumps[kind as usize]
    }

    pub fn found(&self) -> MapLumpSet {
        let mut set = MapLumpSet::default();
        for kind in MapLump::ALL {
            if self.get(kind).is_some() {
                set.insert(kind);
            }
        }
        set
    }

    pub fn missing(&self) -> MapLumpSet {
        let mut set = MapLumpSet::all();
        for kind in self.found().iter() {
            set.remove(kind);
        }
        set
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Indexes of the found sub-lumps, in `MapLump` order
    pub fn indexes(&self) -> impl Iterator<Item = (MapLump, usize)> + '_ {
        MapLump::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|i| (kind, i)))
    }
}

/// `ExMy` for Doom, `MAPxx` for Doom II
pub fn is_map_name(name: &WadName) -> bool {
    match name.trimmed() {
        [b'E', e, b'M', m, ..] => e.is_ascii_digit() && m.is_ascii_digit(),
        [b'M', b'A', b'P', rest @ ..] => !rest.is_empty() && rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Find every map in the directory.
///
/// A map starts at a zero sized lump with a map name. Lumps after it are
/// matched against the ten sub-lump names in any order, each name at most
/// once, until all ten are found or the next zero sized lump is reached. A
/// map that ends early is still returned with what was found, even if that
/// is nothing.
pub fn group_maps(lumps: &[LumpInfo]) -> Vec<MapLumps> {
    let mut maps = Vec::new();

    for (index, lump) in lumps.iter().enumerate() {
        if !lump.is_marker() || !is_map_name(&lump.name) {
            continue;
        }

        let mut map = MapLumps::new(lump.name.to_string(), index);
        let mut needed = MapLumpSet::all();

        for (next_index, next) in lumps.iter().enumerate().skip(index + 1) {
            if next.is_marker() {
                break;
            }
            if let Some(kind) = MapLump::from_name(&next.name) {
                if needed.remove(kind) {
                    map.lumps[kind as usize] = Some(next_index);
                }
            }
            if needed.is_empty() {
                break;
            }
        }

        if needed.len() == MapLump::COUNT {
            warn!("Map marker {} has no map lumps after it", map.name);
        } else if !needed.is_empty() {
            let missing: Vec<&str> = needed.iter().map(|k| k.name()).collect();
            warn!("Map {} is missing {}", map.name, missing.join(", "));
        }
        maps.push(map);
    }

    debug!("Found {} maps", maps.len());
    maps
}
