//! HEXMAP Core - Hex grid geometry and pathfinding
//!
//! This crate provides the spatial substrate for a turn-based strategy map:
//! - Hex coordinates (axial storage, cube arithmetic)
//! - Fixed six-direction neighbor topology
//! - Grid index mapping coordinates to cells
//! - Radius regions, rings and line rasterization
//! - Uniform-cost shortest path search with pluggable traversal costs
//! - JSON map configuration

pub mod coord;
pub mod direction;
pub mod grid;
pub mod region;
pub mod line;
pub mod path;
pub mod config;

// Re-exports for convenient access
pub use coord::{FractionalHex, HexCoord};
pub use direction::Direction;
pub use grid::{Cell, GridError, HexGrid};
pub use region::{RadiusIter, RingIter};
pub use line::{hex_line_fractional, LINE_NUDGE};
pub use path::{Path, Reachable, TraversalCost, UniformCost};
pub use config::{ConfigError, MapConfig, MapShape};
