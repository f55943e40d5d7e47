//! Geometry query commands: distance, neighbors, radius, ring, line

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hexmap_core::{Direction, HexCoord, HexGrid};

use crate::common::{format_coord, load_map, parse_coord, print_coords, print_json, MapSource};

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct DistanceArgs {
    /// First coordinate ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub a: HexCoord,

    /// Second coordinate ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub b: HexCoord,

    #[command(flatten)]
    pub source: MapSource,
}

#[derive(Args, Clone, Debug)]
pub struct NeighborsArgs {
    /// Cell to inspect ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub center: HexCoord,

    #[command(flatten)]
    pub source: MapSource,
}

#[derive(Args, Clone, Debug)]
pub struct RegionArgs {
    /// Center coordinate ("q,r"); need not be on the map
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub center: HexCoord,

    /// Radius in hex steps
    pub radius: u32,

    #[command(flatten)]
    pub source: MapSource,
}

#[derive(Args, Clone, Debug)]
pub struct LineArgs {
    /// Line start ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub a: HexCoord,

    /// Line end ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub b: HexCoord,

    #[command(flatten)]
    pub source: MapSource,
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct DistanceReport {
    from: HexCoord,
    to: HexCoord,
    distance: u32,
    both_on_map: bool,
}

#[derive(Debug, PartialEq, Serialize)]
struct NeighborEntry {
    direction: String,
    coord: HexCoord,
}

// ============================================================================
// LEVEL 1 - COMMANDS
// ============================================================================

pub fn run_distance(args: DistanceArgs) -> Result<()> {
    let (_, grid) = load_map(&args.source)?;
    let report = distance_report(&grid, args.a, args.b);
    if args.source.json {
        print_json(&report)
    } else {
        println!("{}", report.distance);
        if !report.both_on_map {
            tracing::warn!("At least one coordinate is not on the map");
        }
        Ok(())
    }
}

pub fn run_neighbors(args: NeighborsArgs) -> Result<()> {
    let (_, grid) = load_map(&args.source)?;
    let entries = neighbor_entries(&grid, args.center);
    if args.source.json {
        print_json(&entries)
    } else {
        for entry in &entries {
            println!("{:<10} {}", entry.direction, format_coord(entry.coord));
        }
        Ok(())
    }
}

pub fn run_radius(args: RegionArgs) -> Result<()> {
    let (_, grid) = load_map(&args.source)?;
    let coords = radius_coords(&grid, args.center, args.radius);
    tracing::debug!("{} cells within {} of {}", coords.len(), args.radius, args.center);
    print_coords(&coords, args.source.json)
}

pub fn run_ring(args: RegionArgs) -> Result<()> {
    let (_, grid) = load_map(&args.source)?;
    let coords = ring_coords(&grid, args.center, args.radius);
    tracing::debug!("{} cells at {} from {}", coords.len(), args.radius, args.center);
    print_coords(&coords, args.source.json)
}

pub fn run_line(args: LineArgs) -> Result<()> {
    let (_, grid) = load_map(&args.source)?;
    let coords = line_coords(&grid, args.a, args.b);
    print_coords(&coords, args.source.json)
}

// ============================================================================
// LEVEL 2 - QUERIES
// ============================================================================

fn distance_report(grid: &HexGrid<HexCoord>, a: HexCoord, b: HexCoord) -> DistanceReport {
    DistanceReport {
        from: a,
        to: b,
        distance: a.distance(b),
        both_on_map: grid.has_cell_at(a) && grid.has_cell_at(b),
    }
}

fn neighbor_entries(grid: &HexGrid<HexCoord>, center: HexCoord) -> Vec<NeighborEntry> {
    Direction::ALL
        .iter()
        .filter_map(|&dir| {
            grid.neighbor(center, dir).map(|&coord| NeighborEntry {
                direction: format!("{:?}", dir),
                coord,
            })
        })
        .collect()
}

fn radius_coords(grid: &HexGrid<HexCoord>, center: HexCoord, radius: u32) -> Vec<HexCoord> {
    grid.cells_in_radius(center, radius).into_iter().copied().collect()
}

fn ring_coords(grid: &HexGrid<HexCoord>, center: HexCoord, radius: u32) -> Vec<HexCoord> {
    grid.cells_in_ring(center, radius).into_iter().copied().collect()
}

fn line_coords(grid: &HexGrid<HexCoord>, a: HexCoord, b: HexCoord) -> Vec<HexCoord> {
    grid.hex_line(a, b).into_iter().copied().collect()
}

// ============================================================================
// TESTS
// ============================================================================
