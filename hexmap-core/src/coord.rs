//! Hex coordinates: axial storage, cube arithmetic
//!
//! A coordinate stores the two free axes `q` and `r`; the third cube axis is
//! always derived as `s = -q - r`, so `q + r + s == 0` cannot be violated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Derived third cube axis
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance: `max(|dq|, |dr|, |ds|)`
    pub fn distance(&self, other: HexCoord) -> u32 {
        (*self - other).length()
    }

    /// Distance from the origin
    pub fn length(&self) -> u32 {
        self.q
            .unsigned_abs()
            .max(self.r.unsigned_abs())
            .max(self.s().unsigned_abs())
    }

    /// Build from "odd-q" offset coordinates (odd columns shoved down)
    pub fn from_offset(col: i32, row: i32) -> Self {
        Self::new(col, row - (col - (col & 1)) / 2)
    }

    /// Convert to "odd-q" offset coordinates as `(col, row)`
    pub fn to_offset(&self) -> (i32, i32) {
        (self.q, self.r + (self.q - (self.q & 1)) / 2)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl Add for HexCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl AddAssign for HexCoord {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for HexCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl SubAssign for HexCoord {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for HexCoord {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.q, -self.r)
    }
}

impl Mul<i32> for HexCoord {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.q * rhs, self.r * rhs)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

// ============================================================================
// FRACTIONAL COORDINATES
// ============================================================================

/// A point anywhere in hex space, not just a cell center
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
}

impl FractionalHex {
    pub const fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> f64 {
        -self.q - self.r
    }

    /// Linear interpolation between `a` and `b` at parameter `t`
    pub fn lerp(a: FractionalHex, b: FractionalHex, t: f64) -> Self {
        Self::new(a.q + (b.q - a.q) * t, a.r + (b.r - a.r) * t)
    }

    /// Round to the containing cell.
    ///
    /// Each axis is rounded independently, then the axis with the largest
    /// rounding error is recomputed from the other two so the result stays
    /// on the `q + r + s = 0` plane.
    pub fn round(&self) -> HexCoord {
        let (q, r, s) = (self.q, self.r, self.s());
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        HexCoord::new(rq as i32, rr as i32)
    }
}

impl From<HexCoord> for FractionalHex {
    fn from(coord: HexCoord) -> Self {
        Self::new(coord.q as f64, coord.r as f64)
    }
}

impl Add for FractionalHex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}
