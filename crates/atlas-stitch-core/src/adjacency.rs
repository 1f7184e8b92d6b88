//! Wang blob adjacency resolution.
//!
//! A tile's appearance is chosen from 47 precomputed variants by
//! matching its 8-neighbour occupancy pattern against an ordered rule
//! table. Variant indices line up with the frame order produced by the
//! blob autotile processor, so `resolve` output can index straight into
//! that entry's frames.

use crate::error::{Result, StitchError};

/// Number of blob tile variants, and the length of the rule table.
pub const VARIANT_COUNT: usize = 47;

/// Probe offsets in pattern bit order: NW, N, NE, W, E, SW, S, SE.
/// Bit `j` of a mask is `1 << (7 - j)`, i.e. NW is the MSB.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One recognized neighbourhood pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyRule {
    /// Required occupancy per neighbour (1 = tile, 0 = empty).
    pub adjacency: u8,
    /// Neighbours that match either way.
    pub ignore: u8,
}

const fn rule(adjacency: u8, ignore: u8) -> AdjacencyRule {
    AdjacencyRule { adjacency, ignore }
}

/// The ordered rule table; the index of a rule is its variant id.
///
/// Order is load-bearing: earlier rules pin down corner neighbours,
/// later rules widen their ignore masks into catch-alls, and resolution
/// is strictly first-match-wins. The table covers all 256 patterns.
///
/// Mask digits read left to right as NW N NE W E SW S SE.
pub static ADJACENCIES: [AdjacencyRule; VARIANT_COUNT] = [
    rule(0b0000_1011, 0b1010_0100), // 0
    rule(0b0001_1111, 0b1010_0000), // 1
    rule(0b0001_0110, 0b1010_0001), // 2
    rule(0b0000_0010, 0b1010_0101), // 3
    rule(0b0000_1010, 0b1010_0100), // 4
    rule(0b0001_1110, 0b1010_0000), // 5
    rule(0b0001_1011, 0b1010_0000), // 6
    rule(0b0001_0010, 0b1010_0001), // 7
    rule(0b0001_1010, 0b1010_0000), // 8
    rule(0b1101_1011, 0b0000_0000), // 9
    rule(0b0110_1011, 0b1000_0100), // 10
    rule(0b1111_1111, 0b0000_0000), // 11
    rule(0b1101_0110, 0b0010_0001), // 12
    rule(0b0100_0010, 0b1010_0101), // 13
    rule(0b0110_1010, 0b1000_0100), // 14
    rule(0b1111_1110, 0b0000_0000), // 15
    rule(0b1111_1011, 0b0000_0000), // 16
    rule(0b1101_0010, 0b0010_0001), // 17
    rule(0b1111_1010, 0b0000_0000), // 18
    rule(0b0111_1110, 0b0000_0000), // 19
    rule(0b0110_1000, 0b1000_0101), // 20
    rule(0b1111_1000, 0b0000_0101), // 21
    rule(0b1101_0000, 0b0010_0101), // 22
    rule(0b0100_0000, 0b1010_0101), // 23
    rule(0b0100_1010, 0b1000_0101), // 24
    rule(0b1101_1111, 0b0000_0000), // 25
    rule(0b0111_1111, 0b0000_0000), // 26
    rule(0b0101_0110, 0b0010_0001), // 27
    rule(0b0101_1111, 0b0000_0000), // 28
    rule(0b0101_1011, 0b0000_0000), // 29
    rule(0b0101_1110, 0b0000_0000), // 30
    rule(0b0000_1000, 0b1010_0101), // 31
    rule(0b0001_1000, 0b1010_0101), // 32
    rule(0b0001_0000, 0b1010_0101), // 33
    rule(0b0000_0000, 0b1010_0101), // 34
    rule(0b0100_1000, 0b1000_0101), // 35
    rule(0b1101_1000, 0b0000_0101), // 36
    rule(0b0111_1000, 0b0000_0101), // 37
    rule(0b0101_0000, 0b0010_0101), // 38
    rule(0b0101_1000, 0b0000_0101), // 39
    rule(0b0111_1010, 0b0000_0000), // 40
    rule(0b1101_1010, 0b0000_0000), // 41
    rule(0b0100_1010, 0b1000_0100), // 42
    rule(0b1101_1110, 0b0000_0000), // 43
    rule(0b0111_1011, 0b0000_0000), // 44
    rule(0b0101_0010, 0b0010_0001), // 45
    rule(0b0101_1010, 0b0000_0000), // 46
];

/// Packs a neighbour pattern into its mask form (NW as MSB).
pub fn pattern_bits(neighbors: [bool; 8]) -> u8 {
    let mut bits = 0u8;
    for (j, &occupied) in neighbors.iter().enumerate() {
        if occupied {
            bits |= 1 << (7 - j);
        }
    }
    bits
}

/// Returns the variant id of the first rule matching the neighbour
/// pattern, in `[NW, N, NE, W, E, SW, S, SE]` order.
///
/// The table is total, so this returns `Some` for every pattern; `None`
/// would mean the table itself has been corrupted.
pub fn resolve(neighbors: [bool; 8]) -> Option<u8> {
    'rules: for (index, r) in ADJACENCIES.iter().enumerate() {
        for (j, &occupied) in neighbors.iter().enumerate() {
            let bit = 1u8 << (7 - j);
            if r.ignore & bit != 0 {
                continue;
            }
            if (r.adjacency & bit != 0) != occupied {
                continue 'rules;
            }
        }
        return Some(index as u8);
    }
    None
}

/// Occupancy oracle for autotile resolution, answered by whatever map
/// structure the caller keeps.
pub trait TileProbe {
    fn is_tile(&self, x: i32, y: i32) -> bool;
}

/// Resolves the variant for the tile at (x, y) by probing its 8
/// neighbours. A failed match is a programming-invariant violation and
/// reports the offending coordinate instead of guessing a variant.
pub fn variant_at<P: TileProbe + ?Sized>(probe: &P, x: i32, y: i32) -> Result<u8> {
    let mut neighbors = [false; 8];
    for (j, (dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
        neighbors[j] = probe.is_tile(x + dx, y + dy);
    }
    resolve(neighbors).ok_or(StitchError::UnmatchedTile { x, y })
}
