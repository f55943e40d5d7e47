//! Map generation command
//!
//! Writes a map JSON file that the query commands read with `--map`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexmap_core::{HexCoord, MapConfig};

use crate::common::parse_coord;

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeKind {
    Hexagonal,
    Rectangular,
}

#[derive(Args, Clone, Debug)]
pub struct MapArgs {
    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Map name
    #[arg(long, default_value = "generated")]
    pub name: String,

    /// Map outline
    #[arg(long, value_enum, default_value_t = ShapeKind::Hexagonal)]
    pub shape: ShapeKind,

    /// Radius for hexagonal maps
    #[arg(long, default_value_t = 5)]
    pub radius: u32,

    /// Columns for rectangular maps
    #[arg(long, default_value_t = 10)]
    pub width: u32,

    /// Rows for rectangular maps
    #[arg(long, default_value_t = 10)]
    pub height: u32,

    /// Fraction of cells to mark blocked (0.0 - 1.0)
    #[arg(long, default_value_t = 0.0)]
    pub scatter: f64,

    /// Cells to leave unblocked when scattering ("q,r", repeatable)
    #[arg(long = "keep-clear", value_parser = parse_coord, allow_hyphen_values = true)]
    pub keep_clear: Vec<HexCoord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Generate a map and write it to disk
pub fn run(args: MapArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;
    config
        .save(&args.output)
        .with_context(|| format!("Failed to write map: {}", args.output.display()))?;
    print_summary(&config, &args.output);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &MapArgs, seed: Option<u64>) -> Result<MapConfig> {
    let mut config = base_config(args);
    if args.scatter > 0.0 {
        scatter_blocked(&mut config, args, seed);
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(config: &MapConfig, output: &std::path::Path) {
    println!("Map '{}' written to {}", config.name, output.display());
    println!("  Cells:   {}", config.shape.coords().len() - config.holes.len());
    println!("  Blocked: {}", config.blocked.len());
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn base_config(args: &MapArgs) -> MapConfig {
    match args.shape {
        ShapeKind::Hexagonal => MapConfig::hexagonal(&args.name, args.radius),
        ShapeKind::Rectangular => MapConfig::rectangular(&args.name, args.width, args.height),
    }
}

fn scatter_blocked(config: &mut MapConfig, args: &MapArgs, seed: Option<u64>) {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!("Scattering blocked cells with seed {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    config.random_blocked(&mut rng, args.scatter, &args.keep_clear);
}

// ============================================================================
// TESTS
// ============================================================================
