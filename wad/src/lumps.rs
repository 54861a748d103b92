//! Level geometry records, in WAD order:
//!  - Thing
//!  - LineDef
//!  - SideDef
//!  - Vertex
//!  - Segment   (SEGS)
//!  - SubSector (SSECTORS)
//!  - Node
//!  - Sector
//!
//! REJECT and BLOCKMAP are carried as raw bytes only.

use crate::cursor::{FixedRecord, i16_at, u16_at};
use crate::directory::WadName;

/// A linedef side index of `0xFFFF` means the side is not present
pub const NO_SIDEDEF: u16 = 0xFFFF;

/// A `Thing` describes only the position, type, and angle + spawn flags
///
/// The data in the WAD lump is structured as follows:
///
/// | Field Size | Data Type | Content    |
/// |------------|-----------|------------|
/// |  0x00-0x01 |    i16    | X Position |
/// |  0x02-0x03 |    i16    | Y Position |
/// |  0x04-0x05 |    u16    | Angle      |
/// |  0x06-0x07 |    u16    | Type       |
/// |  0x08-0x09 |    u16    | Flags      |
///
/// Each `Thing` record is 10 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadThing {
    pub x: i16,
    pub y: i16,
    pub angle: u16,
    pub kind: u16,
    pub flags: u16,
}

impl FixedRecord for WadThing {
    const WIDTH: usize = 10;

    fn from_bytes(b: &[u8]) -> Self {
        WadThing {
            x: i16_at(b, 0),
            y: i16_at(b, 2),
            angle: u16_at(b, 4),
            kind: u16_at(b, 6),
            flags: u16_at(b, 8),
        }
    }
}

/// A `Vertex` is the basic struct used for any type of coordinate
/// in the level
///
/// | Field Size | Data Type | Content      |
/// |------------|-----------|--------------|
/// |  0x00-0x01 |    i16    | X Coordinate |
/// |  0x02-0x03 |    i16    | Y Coordinate |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WadVertex {
    pub x: i16,
    pub y: i16,
}

impl WadVertex {
    pub fn new(x: i16, y: i16) -> WadVertex {
        WadVertex { x, y }
    }
}

impl FixedRecord for WadVertex {
    const WIDTH: usize = 4;

    fn from_bytes(b: &[u8]) -> Self {
        WadVertex::new(i16_at(b, 0), i16_at(b, 2))
    }
}

/// Each linedef represents a line from one of the VERTEXES to another.
///
///| Field Size | Data Type      | Content                                   |
///|------------|----------------|-------------------------------------------|
///|  0x00-0x01 | Unsigned short | Start vertex                              |
///|  0x02-0x03 | Unsigned short | End vertex                                |
///|  0x04-0x05 | Unsigned short | Flags                                     |
///|  0x06-0x07 | Unsigned short | Line type / Action                        |
///|  0x08-0x09 | Unsigned short | Sector tag                                |
///|  0x0A-0x0B | Unsigned short | Front sidedef ( 0xFFFF side not present ) |
///|  0x0C-0x0D | Unsigned short | Back sidedef  ( 0xFFFF side not present ) |
///
/// A Linedef will always have at least one side. This first side is referred to
/// as either front or right. If you imagine a linedef starting from the bottom
/// of the screen travelling upwards then the right side of this line is the first
/// valid side (and is the front).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadLineDef {
    /// The line starts from this point
    pub start_vertex: u16,
    /// The line ends at this point
    pub end_vertex: u16,
    pub flags: u16,
    pub special: u16,
    /// This is a number which ties this line's effect type
    /// to all SECTORS that have the same tag number (in their last
    /// field)
    pub sector_tag: u16,
    /// Index of the front (right) `SideDef` for this line
    pub front_sidedef: u16,
    /// Index of the back (left) `SideDef`, `None` if the parsed value was
    /// `0xFFFF`
    pub back_sidedef: Option<u16>,
}

impl WadLineDef {
    pub fn is_two_sided(&self) -> bool {
        self.back_sidedef.is_some()
    }
}

impl FixedRecord for WadLineDef {
    const WIDTH: usize = 14;

    fn from_bytes(b: &[u8]) -> Self {
        let back = u16_at(b, 12);
        WadLineDef {
            start_vertex: u16_at(b, 0),
            end_vertex: u16_at(b, 2),
            flags: u16_at(b, 4),
            special: u16_at(b, 6),
            sector_tag: u16_at(b, 8),
            front_sidedef: u16_at(b, 10),
            back_sidedef: (back != NO_SIDEDEF).then_some(back),
        }
    }
}

/// A sidedef is a definition of what wall texture(s) to draw along a
/// `LineDef`, and a group of sidedefs outline the space of a `Sector`
///
/// Each `SideDef` record is 30 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSideDef {
    pub x_offset: i16,
    pub y_offset: i16,
    /// Name of upper texture used for example in the upper of a window
    pub upper_tex: WadName,
    /// Name of lower texture used for example in the front of a step
    pub lower_tex: WadName,
    /// The regular part of a wall
    pub middle_tex: WadName,
    /// Sector that this sidedef faces or helps to surround
    pub sector: u16,
}

impl FixedRecord for WadSideDef {
    const WIDTH: usize = 30;

    fn from_bytes(b: &[u8]) -> Self {
        WadSideDef {
            x_offset: i16_at(b, 0),
            y_offset: i16_at(b, 2),
            upper_tex: WadName::from_bytes(&b[4..12]),
            lower_tex: WadName::from_bytes(&b[12..20]),
            middle_tex: WadName::from_bytes(&b[20..28]),
            sector: u16_at(b, 28),
        }
    }
}

/// The Segments (SEGS) are in a sequential order determined by the `SubSector`
/// (SSECTOR), which are part of the NODES recursive tree
///
/// | Field Size | Data Type | Content                              |
/// |------------|-----------|--------------------------------------|
/// |  0x00-0x01 |    u16    | Index to vertex the line starts from |
/// |  0x02-0x03 |    u16    | Index to vertex the line ends with   |
/// |  0x04-0x05 |    i16    | Angle in Binary Angle Measurement (BAMS) |
/// |  0x06-0x07 |    u16    | Index to the linedef this seg travels along|
/// |  0x08-0x09 |    i16    | Direction along line. 0 == SEG is on the right and follows the line, 1 == SEG travels in opposite direction |
/// |  0x0A-0x0B |    i16    | Offset: this is the distance along the linedef this seg starts at |
///
/// Each `Segment` record is 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSegment {
    pub start_vertex: u16,
    pub end_vertex: u16,
    /// Binary Angle Measurement
    ///
    /// Degrees(0-360) = angle * 0.005493164
    pub angle: i16,
    /// The Linedef this segment travels along
    pub linedef: u16,
    /// The `side`, 0 = front/right, 1 = back/left
    pub direction: i16,
    /// Offset distance along the linedef (from `start_vertex`) to the start
    /// of this `Segment`
    pub offset: i16,
}

impl FixedRecord for WadSegment {
    const WIDTH: usize = 12;

    fn from_bytes(b: &[u8]) -> Self {
        WadSegment {
            start_vertex: u16_at(b, 0),
            end_vertex: u16_at(b, 2),
            angle: i16_at(b, 4),
            linedef: u16_at(b, 6),
            direction: i16_at(b, 8),
            offset: i16_at(b, 10),
        }
    }
}

/// A `SubSector` divides up all the SECTORS into convex polygons. They are then
/// referenced through the NODES resources. There will be (number of nodes) + 1.
///
/// | Field Size | Data Type | Content                            |
/// |------------|-----------|------------------------------------|
/// |  0x00-0x01 |    u16    | How many segments line this sector |
/// |  0x02-0x03 |    u16    | Index to the starting segment      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSubSector {
    /// How many `Segment`s line this `SubSector`
    pub seg_count: u16,
    /// The `Segment` to start with
    pub start_seg: u16,
}

impl FixedRecord for WadSubSector {
    const WIDTH: usize = 4;

    fn from_bytes(b: &[u8]) -> Self {
        WadSubSector {
            seg_count: u16_at(b, 0),
            start_seg: u16_at(b, 2),
        }
    }
}

/// The base node structure as parsed from the WAD records. What is stored in the WAD
/// is the splitting line used for splitting the level/node, a box which encapsulates
/// the left and right regions of the split, and the index numbers for left and right
/// children of the node; the index is in to the array built from this lump.
///
/// **The last node is the root node**
///
/// | Field Size | Content                              |
/// |------------|--------------------------------------|
/// | 0x00-0x01  | Partition line x coordinate          |
/// | 0x02-0x03  | Partition line y coordinate          |
/// | 0x04-0x05  | Change in x to end of partition line |
/// | 0x06-0x07  | Change in y to end of partition line |
/// | 0x08-0x0F  | Right (Front) box top, bottom, left, right |
/// | 0x10-0x17  | Left (Back) box top, bottom, left, right   |
/// | 0x18-0x19  | Right (Front) child index            |
/// | 0x1A-0x1B  | Left (Back)  child index             |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadNode {
    /// Where the line used for splitting the level starts
    pub x: i16,
    pub y: i16,
    /// Where the line used for splitting the level ends
    pub dx: i16,
    pub dy: i16,
    /// Bounding boxes, right then left, each in file order: top, bottom,
    /// left, right
    pub bounding_boxes: [[i16; 4]; 2],
    /// Right then left child. The high bit marks a subsector leaf
    pub child_index: [u16; 2],
}

impl WadNode {
    pub const SUBSECTOR_FLAG: u16 = 0x8000;

    pub fn right_child(&self) -> u16 {
        self.child_index[0]
    }

    pub fn left_child(&self) -> u16 {
        self.child_index[1]
    }
}

impl FixedRecord for WadNode {
    const WIDTH: usize = 28;

    fn from_bytes(b: &[u8]) -> Self {
        let bbox = |start: usize| {
            [
                i16_at(b, start),
                i16_at(b, start + 2),
                i16_at(b, start + 4),
                i16_at(b, start + 6),
            ]
        };
        WadNode {
            x: i16_at(b, 0),
            y: i16_at(b, 2),
            dx: i16_at(b, 4),
            dy: i16_at(b, 6),
            bounding_boxes: [bbox(8), bbox(16)],
            child_index: [u16_at(b, 24), u16_at(b, 26)],
        }
    }
}

/// A `Sector` is a horizontal (east-west and north-south) area of the level
/// where a floor height and ceiling height is defined.
///
/// Each `Sector` record is 26 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSector {
    pub floor_height: i16,
    pub ceil_height: i16,
    /// Floor texture name
    pub floor_tex: WadName,
    /// Ceiling texture name
    pub ceil_tex: WadName,
    /// Light level from 0-255. There are actually only 32 brightnesses
    /// possible so blocks of 8 are the same bright
    pub light_level: u16,
    /// This determines some area-effects called special sectors
    pub kind: u16,
    /// a "tag" number corresponding to LINEDEF(s) with the same tag
    /// number
    pub tag: u16,
}

impl FixedRecord for WadSector {
    const WIDTH: usize = 26;

    fn from_bytes(b: &[u8]) -> Self {
        WadSector {
            floor_height: i16_at(b, 0),
            ceil_height: i16_at(b, 2),
            floor_tex: WadName::from_bytes(&b[4..12]),
            ceil_tex: WadName::from_bytes(&b[12..20]),
            light_level: u16_at(b, 20),
            kind: u16_at(b, 22),
            tag: u16_at(b, 24),
        }
    }
}
