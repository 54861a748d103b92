use log::{debug, warn};

use crate::directory::LumpInfo;
use crate::iterators::decode_records;
use crate::lumps::{
    WadLineDef, WadNode, WadSector, WadSegment, WadSideDef, WadSubSector, WadThing, WadVertex,
};
use crate::markers::{MapLump, MapLumps};

/// A single decoded level. Sub-lumps that were not present in the WAD are
/// left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WadMap {
    pub name: String,
    pub things: Vec<WadThing>,
    pub linedefs: Vec<WadLineDef>,
    pub sidedefs: Vec<WadSideDef>,
    pub vertexes: Vec<WadVertex>,
    pub segments: Vec<WadSegment>,
    pub subsectors: Vec<WadSubSector>,
    pub nodes: Vec<WadNode>,
    pub sectors: Vec<WadSector>,
    /// Raw REJECT table, not decoded
    pub reject: Vec<u8>,
    /// Raw BLOCKMAP, not decoded
    pub blockmap: Vec<u8>,
}

impl WadMap {
    pub fn new(name: String) -> WadMap {
        WadMap {
            name,
            ..Default::default()
        }
    }

    /// Decode each found sub-lump of `raw`. Decoding is best effort, a bad
    /// record costs only that record.
    pub fn load(buffer: &[u8], lumps: &[LumpInfo], raw: &MapLumps) -> WadMap {
        let mut map = WadMap::new(raw.name.clone());

        for (kind, index) in raw.indexes() {
            let lump = &lumps[index];
            match kind {
                MapLump::Things => map.things = decode_records(buffer, lump),
                MapLump::LineDefs => map.linedefs = decode_records(buffer, lump),
                MapLump::SideDefs => map.sidedefs = decode_records(buffer, lump),
                MapLump::Vertexes => map.vertexes = decode_records(buffer, lump),
                MapLump::Segs => map.segments = decode_records(buffer, lump),
                MapLump::SubSectors => map.subsectors = decode_records(buffer, lump),
                MapLump::Nodes => map.nodes = decode_records(buffer, lump),
                MapLump::Sectors => map.sectors = decode_records(buffer, lump),
                MapLump::Reject => map.reject = raw_bytes(buffer, lump),
                MapLump::Blockmap => map.blockmap = raw_bytes(buffer, lump),
            }
        }

        debug!(
            "Loaded {}: {} things, {} linedefs, {} sectors",
            map.name,
            map.things.len(),
            map.linedefs.len(),
            map.sectors.len()
        );
        map
    }
}

fn raw_bytes(buffer: &[u8], lump: &LumpInfo) -> Vec<u8> {
    match buffer.get(lump.data_range()) {
        Some(bytes) => bytes.to_vec(),
        None => {
            warn!("{} runs past the end of the WAD, ignoring it", lump.name);
            Vec::new()
        }
    }
}
