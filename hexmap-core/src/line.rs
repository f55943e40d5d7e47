//! Straight-line rasterization across hex cells

use crate::coord::{FractionalHex, HexCoord};
use crate::grid::{Cell, HexGrid};

/// Cube-space nudge `(1e-6, 1e-6, -2e-6)` applied to the start point.
///
/// A line running exactly along a shared hex edge would otherwise round
/// to either side at random.
pub const LINE_NUDGE: FractionalHex = FractionalHex::new(1e-6, 1e-6);

/// Cells crossed by the segment between two fractional points.
///
/// Samples `n + 1` evenly spaced points, `n` being the hex distance between
/// the rounded endpoints.
pub fn hex_line_fractional(start: FractionalHex, end: FractionalHex) -> Vec<HexCoord> {
    let n = start.round().distance(end.round());
    if n == 0 {
        return vec![start.round()];
    }

    let nudged = start + LINE_NUDGE;
    let step = 1.0 / n as f64;
    (0..=n)
        .map(|i| FractionalHex::lerp(nudged, end, i as f64 * step).round())
        .collect()
}

impl HexCoord {
    /// Cells on the straight line from `self` to `end`, both included
    pub fn line_to(&self, end: HexCoord) -> Vec<HexCoord> {
        hex_line_fractional((*self).into(), end.into())
    }
}

impl<C: Cell> HexGrid<C> {
    /// Existing cells on the line from `start` to `end`
    pub fn hex_line(&self, start: HexCoord, end: HexCoord) -> Vec<&C> {
        self.existing(start.line_to(end))
    }
}
