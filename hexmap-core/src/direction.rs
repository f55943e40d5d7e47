//! The six fixed hex directions

use crate::coord::HexCoord;
use serde::{Deserialize, Serialize};

/// Number of neighbors of a hex cell
pub const NUM_DIRECTIONS: usize = 6;

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
const OFFSETS: [HexCoord; NUM_DIRECTIONS] = [
    HexCoord::new(0, -1),  // N
    HexCoord::new(1, -1),  // NE
    HexCoord::new(1, 0),   // SE
    HexCoord::new(0, 1),   // S
    HexCoord::new(-1, 1),  // SW
    HexCoord::new(-1, 0),  // NW
];

/// Clock-face position of each direction, same index order as `OFFSETS`
const CLOCK_POSITIONS: [u8; NUM_DIRECTIONS] = [12, 2, 4, 6, 8, 10];

/// A neighbor direction on a flat-top hex grid.
///
/// Consecutive directions are adjacent going clockwise, and iteration always
/// visits them in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    SouthEast = 2,
    South = 3,
    SouthWest = 4,
    NorthWest = 5,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at `index` (wraps modulo 6)
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % NUM_DIRECTIONS]
    }

    /// Coordinate offset of a single step in this direction
    pub const fn offset(self) -> HexCoord {
        OFFSETS[self as usize]
    }

    pub const fn opposite(self) -> Self {
        self.rotate_clockwise(3)
    }

    pub const fn rotate_clockwise(self, steps: usize) -> Self {
        Self::from_index(self as usize + steps)
    }

    pub const fn rotate_counter_clockwise(self, steps: usize) -> Self {
        Self::from_index(self as usize + NUM_DIRECTIONS - steps % NUM_DIRECTIONS)
    }

    /// Clock-face position: 12 (north), 2, 4, 6, 8, 10
    pub const fn clock_position(self) -> u8 {
        CLOCK_POSITIONS[self as usize]
    }

    pub fn from_clock_position(position: u8) -> Option<Self> {
        CLOCK_POSITIONS
            .iter()
            .position(|&p| p == position)
            .map(Self::from_index)
    }
}

impl HexCoord {
    /// Neighbor coordinate in `direction`, regardless of grid membership
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        *self + direction.offset()
    }

    /// All six neighbor coordinates in direction order
    pub fn neighbors(&self) -> [HexCoord; NUM_DIRECTIONS] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    /// Direction from `self` to an adjacent `other`, `None` if not adjacent
    pub fn direction_to(&self, other: HexCoord) -> Option<Direction> {
        let delta = other - *self;
        Direction::ALL.into_iter().find(|d| d.offset() == delta)
    }
}
