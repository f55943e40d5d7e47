//! HEXMAP CLI - Command-line interface
//!
//! Commands:
//! - map: Generate a map file
//! - distance / neighbors / radius / ring / line: Geometry queries
//! - path: Cheapest path between two cells
//! - reach: Movement range within a cost budget

mod common;
mod map_cmd;
mod path_cmd;
mod query_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexmap")]
#[command(about = "HEXMAP hex grid geometry and pathfinding tool")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map file
    Map(map_cmd::MapArgs),
    /// Hex distance between two coordinates
    Distance(query_cmd::DistanceArgs),
    /// Existing neighbors of a cell, in direction order
    Neighbors(query_cmd::NeighborsArgs),
    /// Existing cells within a radius
    Radius(query_cmd::RegionArgs),
    /// Existing cells at exactly a radius
    Ring(query_cmd::RegionArgs),
    /// Existing cells on a straight line
    Line(query_cmd::LineArgs),
    /// Cheapest path between two cells
    Path(path_cmd::PathArgs),
    /// Cells reachable within a movement budget
    Reach(path_cmd::ReachArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Map(args) => map_cmd::run(args, cli.seed),
        Commands::Distance(args) => query_cmd::run_distance(args),
        Commands::Neighbors(args) => query_cmd::run_neighbors(args),
        Commands::Radius(args) => query_cmd::run_radius(args),
        Commands::Ring(args) => query_cmd::run_ring(args),
        Commands::Line(args) => query_cmd::run_line(args),
        Commands::Path(args) => path_cmd::run_path(args),
        Commands::Reach(args) => path_cmd::run_reach(args),
    }
}
