//! Filled hexagonal regions and hollow rings

use crate::coord::HexCoord;
use crate::direction::{Direction, NUM_DIRECTIONS};
use crate::grid::{Cell, HexGrid};
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

/// Number of coordinates within `radius` of a center, center included
pub const fn radius_cell_count(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * (r + 1) + 1
}

/// Number of coordinates on the ring at exactly `radius`
pub const fn ring_cell_count(radius: u32) -> usize {
    NUM_DIRECTIONS * radius as usize
}

// ============================================================================
// RADIUS
// ============================================================================

/// Every coordinate within `radius` of `center`.
///
/// Walks the cube rectangle `-R <= dq <= R`,
/// `max(-R, -dq - R) <= dr <= min(R, -dq + R)`, so no out-of-range
/// coordinate is ever visited.
#[derive(Clone, Debug)]
pub struct RadiusIter {
    center: HexCoord,
    radius: i32,
    dq: i32,
    dr: i32,
    remaining: usize,
}

impl RadiusIter {
    pub fn new(center: HexCoord, radius: u32) -> Self {
        let radius = radius as i32;
        Self {
            center,
            radius,
            dq: -radius,
            dr: 0,
            remaining: radius_cell_count(radius as u32),
        }
        .with_row_start()
    }

    fn with_row_start(mut self) -> Self {
        self.dr = (-self.radius).max(-self.dq - self.radius);
        self
    }

    fn row_end(&self) -> i32 {
        self.radius.min(-self.dq + self.radius)
    }
}

impl Iterator for RadiusIter {
    type Item = HexCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let next = self.center + HexCoord::new(self.dq, self.dr);
        self.remaining -= 1;
        if self.dr < self.row_end() {
            self.dr += 1;
        } else {
            self.dq += 1;
            self.dr = (-self.radius).max(-self.dq - self.radius);
        }
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RadiusIter {}
impl FusedIterator for RadiusIter {}

// ============================================================================
// RING
// ============================================================================

/// Coordinates at exactly `radius` from `center`, never the center itself.
///
/// Starts `radius` steps south-west of the center and traces the six edges
/// of the hexagon, `radius` steps per edge, in direction order.
#[derive(Clone, Debug)]
pub struct RingIter {
    edge_length: u32,
    direction: usize,
    edge_index: u32,
    next: HexCoord,
}

impl RingIter {
    pub fn new(center: HexCoord, radius: u32) -> Self {
        Self {
            edge_length: radius,
            // A zero ring is empty: start past the last edge
            direction: if radius == 0 { NUM_DIRECTIONS } else { 0 },
            edge_index: 0,
            next: center + Direction::SouthWest.offset() * radius as i32,
        }
    }
}

impl Iterator for RingIter {
    type Item = HexCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.direction >= NUM_DIRECTIONS {
            return None;
        }
        let current = self.next;
        self.next = current.neighbor(Direction::from_index(self.direction));
        self.edge_index += 1;
        if self.edge_index == self.edge_length {
            self.edge_index = 0;
            self.direction += 1;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.direction >= NUM_DIRECTIONS {
            0
        } else {
            let edge = self.edge_length as usize;
            (NUM_DIRECTIONS - self.direction) * edge - self.edge_index as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RingIter {}
impl FusedIterator for RingIter {}

impl HexCoord {
    pub fn coords_in_radius(&self, radius: u32) -> RadiusIter {
        RadiusIter::new(*self, radius)
    }

    pub fn ring(&self, radius: u32) -> RingIter {
        RingIter::new(*self, radius)
    }
}

// ============================================================================
// GRID QUERIES
// ============================================================================

impl<C: Cell> HexGrid<C> {
    /// Existing cells within `radius` of `center`, center included if present
    pub fn cells_in_radius(&self, center: HexCoord, radius: u32) -> Vec<&C> {
        self.existing(center.coords_in_radius(radius))
    }

    /// Existing cells at exactly `radius` from `center`.
    ///
    /// Radius 0 is empty: a ring never contains its own center.
    pub fn cells_in_ring(&self, center: HexCoord, radius: u32) -> Vec<&C> {
        self.existing(center.ring(radius).filter(|&c| c != center))
    }

    /// Existing cells whose distance from `center` lies in `range`, nearest ring first
    pub fn cells_in_distance_range(&self, center: HexCoord, range: RangeInclusive<u32>) -> Vec<&C> {
        range
            .flat_map(|radius| {
                std::iter::once(center)
                    .filter(move |_| radius == 0)
                    .chain(center.ring(radius))
            })
            .filter_map(|c| self.cell_at(c))
            .collect()
    }
}
