//! Shared argument types and output helpers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexmap_core::{HexCoord, HexGrid, MapConfig};

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Which map to query and how to print results
#[derive(Args, Clone, Debug, Default)]
pub struct MapSource {
    /// Map JSON file (defaults to a hexagonal map of radius 5)
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a `q,r` coordinate
pub fn parse_coord(s: &str) -> Result<HexCoord, String> {
    let (q, r) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'q,r', got '{}'", s))?;
    let q = q
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid q in '{}': {}", s, e))?;
    let r = r
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid r in '{}': {}", s, e))?;
    Ok(HexCoord::new(q, r))
}

// ============================================================================
// MAP LOADING
// ============================================================================

/// Load the configured map (or the default) and build its grid
pub fn load_map(source: &MapSource) -> Result<(MapConfig, HexGrid<HexCoord>)> {
    let config = match &source.map {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load map: {}", path.display()))?,
        None => MapConfig::default(),
    };
    let grid = config
        .build_grid()
        .with_context(|| format!("Failed to build grid for map '{}'", config.name))?;
    tracing::debug!("Map '{}' has {} cells", config.name, grid.len());
    Ok((config, grid))
}

// ============================================================================
// OUTPUT
// ============================================================================

pub fn format_coord(coord: HexCoord) -> String {
    format!("{},{}", coord.q, coord.r)
}

/// Print one coordinate per line, or a JSON array
pub fn print_coords(coords: &[HexCoord], json: bool) -> Result<()> {
    if json {
        print_json(&coords)
    } else {
        for &coord in coords {
            println!("{}", format_coord(coord));
        }
        Ok(())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
