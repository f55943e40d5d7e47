//! Path search commands: path, reach
//!
//! Both use unit step cost with the map's blocked cells impassable.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use hexmap_core::{HexCoord, HexGrid, MapConfig};

use crate::common::{format_coord, load_map, parse_coord, print_json, MapSource};

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct PathArgs {
    /// Start cell ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub start: HexCoord,

    /// Goal cell ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub goal: HexCoord,

    /// Include the start cell in the printed path
    #[arg(long)]
    pub include_start: bool,

    #[command(flatten)]
    pub source: MapSource,
}

#[derive(Args, Clone, Debug)]
pub struct ReachArgs {
    /// Origin cell ("q,r")
    #[arg(value_parser = parse_coord, allow_hyphen_values = true)]
    pub center: HexCoord,

    /// Movement budget
    pub budget: f32,

    #[command(flatten)]
    pub source: MapSource,
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

#[derive(Debug, PartialEq, Serialize)]
struct PathReport {
    start: HexCoord,
    goal: HexCoord,
    cost: f32,
    steps: Vec<HexCoord>,
}

#[derive(Debug, PartialEq, Serialize)]
struct ReachEntry {
    coord: HexCoord,
    cost: f32,
}

// ============================================================================
// LEVEL 1 - COMMANDS
// ============================================================================

pub fn run_path(args: PathArgs) -> Result<()> {
    let (config, grid) = load_map(&args.source)?;
    let Some(report) = find_path(&config, &grid, args.start, args.goal, args.include_start) else {
        bail!(
            "No path from {} to {} on map '{}'",
            args.start,
            args.goal,
            config.name
        );
    };

    if args.source.json {
        print_json(&report)
    } else {
        print_path(&report);
        Ok(())
    }
}

pub fn run_reach(args: ReachArgs) -> Result<()> {
    let (config, grid) = load_map(&args.source)?;
    let entries = movement_range(&config, &grid, args.center, args.budget);
    tracing::info!(
        "{} cells reachable from {} within {}",
        entries.len(),
        args.center,
        args.budget
    );

    if args.source.json {
        print_json(&entries)
    } else {
        for entry in &entries {
            println!("{:<8} {}", format_coord(entry.coord), entry.cost);
        }
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - SEARCHES
// ============================================================================

fn find_path(
    config: &MapConfig,
    grid: &HexGrid<HexCoord>,
    start: HexCoord,
    goal: HexCoord,
    include_start: bool,
) -> Option<PathReport> {
    let cost = config.terrain_cost();
    let path = grid.shortest_path(start, goal, &cost)?;
    let mut steps = path.coords();
    if include_start {
        steps.insert(0, start);
    }
    Some(PathReport {
        start,
        goal,
        cost: path.cost(),
        steps,
    })
}

fn movement_range(
    config: &MapConfig,
    grid: &HexGrid<HexCoord>,
    center: HexCoord,
    budget: f32,
) -> Vec<ReachEntry> {
    let cost = config.terrain_cost();
    grid.reachable_within(center, budget, &cost)
        .iter()
        .map(|(&coord, total)| ReachEntry { coord, cost: total })
        .collect()
}

// ============================================================================
// LEVEL 3 - OUTPUT
// ============================================================================

fn print_path(report: &PathReport) {
    println!(
        "Path {} -> {}: {} steps, cost {}",
        report.start,
        report.goal,
        report.steps.len(),
        report.cost
    );
    for &step in &report.steps {
        println!("  {}", format_coord(step));
    }
}

// ============================================================================
// TESTS
// ============================================================================
