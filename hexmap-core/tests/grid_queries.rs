//! Integration tests for the grid query surface
//!
//! Exercises the operations consumers rely on end to end: lookups, neighbors,
//! regions, rings, lines and path search over maps built from configuration.

use hexmap_core::{
    Cell, Direction, GridError, HexCoord, HexGrid, MapConfig, TraversalCost, UniformCost,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Terrain a movement system might hang off each cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terrain {
    Grassland,
    Hills,
    Mountain,
}

#[derive(Clone, Debug)]
struct Tile {
    position: HexCoord,
    terrain: Terrain,
}

impl Cell for Tile {
    fn coord(&self) -> HexCoord {
        self.position
    }
}

/// Movement rule: hills cost 2, mountains are impassable
struct LandMovement;

impl TraversalCost<Tile> for LandMovement {
    fn cost(&self, _from: &Tile, to: &Tile) -> Option<f32> {
        match to.terrain {
            Terrain::Grassland => Some(1.0),
            Terrain::Hills => Some(2.0),
            Terrain::Mountain => None,
        }
    }
}

fn terrain_map(radius: u32, hills: &[HexCoord], mountains: &[HexCoord]) -> HexGrid<Tile> {
    let tiles = HexCoord::ORIGIN
        .coords_in_radius(radius)
        .map(|position| {
            let terrain = if mountains.contains(&position) {
                Terrain::Mountain
            } else if hills.contains(&position) {
                Terrain::Hills
            } else {
                Terrain::Grassland
            };
            Tile { position, terrain }
        })
        .collect();
    HexGrid::new(tiles).unwrap()
}

fn coord_set<C: Cell>(cells: &[&C]) -> FxHashSet<HexCoord> {
    cells.iter().map(|c| c.coord()).collect()
}

// ============================================================================
// REGION SCENARIOS
// ============================================================================

#[test]
fn test_rectangular_patch_radius_and_ring() {
    let config = MapConfig::rectangular("patch", 5, 5);
    let grid = config.build_grid().unwrap();
    let origin = config.shape.center();

    assert_eq!(grid.cells_in_radius(origin, 2).len(), 19);
    assert_eq!(grid.cells_in_ring(origin, 2).len(), 12);
    assert_eq!(grid.cells_in_ring(origin, 1).len(), 6);
    assert!(grid.cells_in_ring(origin, 0).is_empty());
}

#[test]
fn test_radius_contains_exactly_cells_in_range() {
    let config = MapConfig::rectangular("patch", 8, 6).with_holes(vec![HexCoord::from_offset(3, 3)]);
    let grid = config.build_grid().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..40 {
        let center = grid.cells()[rng.gen_range(0..grid.len())];
        let radius = rng.gen_range(0..5);
        let region = coord_set(&grid.cells_in_radius(center, radius));
        let expected: FxHashSet<HexCoord> = grid
            .coords()
            .filter(|c| c.distance(center) <= radius)
            .collect();
        assert!(region.contains(&center));
        assert_eq!(region, expected);

        if radius >= 1 {
            let ring = coord_set(&grid.cells_in_ring(center, radius));
            let inner = coord_set(&grid.cells_in_radius(center, radius - 1));
            let diff: FxHashSet<HexCoord> = region.difference(&inner).copied().collect();
            assert_eq!(ring, diff);
            assert!(!ring.contains(&center));
        }
    }
}

#[test]
fn test_neighbors_at_map_edge() {
    let grid = MapConfig::rectangular("patch", 3, 3).build_grid().unwrap();
    let corner = HexCoord::from_offset(0, 0);
    let neighbors = grid.all_neighbors(corner);
    assert_eq!(neighbors.len(), 2);
    assert!(grid.neighbor(corner, Direction::North).is_none());
    assert!(grid.has_neighbor(corner, Direction::South));
    assert!(grid.has_neighbor(corner, Direction::SouthEast));
}

// ============================================================================
// LINE SCENARIOS
// ============================================================================

#[test]
fn test_line_across_map() {
    let grid = MapConfig::hexagonal("hex", 6).build_grid().unwrap();
    let a = HexCoord::new(-6, 2);
    let b = HexCoord::new(5, -3);
    let line = grid.hex_line(a, b);
    assert_eq!(line.len(), a.distance(b) as usize + 1);
    assert_eq!(**line.first().unwrap(), a);
    assert_eq!(**line.last().unwrap(), b);
    assert_eq!(grid.hex_line(a, a), vec![&a]);
}

// ============================================================================
// PATH SCENARIOS
// ============================================================================

#[test]
fn test_unit_cost_path_length_is_distance() {
    let grid = MapConfig::hexagonal("hex", 5).build_grid().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    for _ in 0..100 {
        let a = grid.cells()[rng.gen_range(0..grid.len())];
        let b = grid.cells()[rng.gen_range(0..grid.len())];
        let path = grid.shortest_path(a, b, &UniformCost).unwrap();
        assert_eq!(path.len(), a.distance(b) as usize);
        // No repeated cells, each step adjacent
        let full = path.with_start(grid.cell_at(a).unwrap());
        let unique: FxHashSet<HexCoord> = full.iter().map(|c| **c).collect();
        assert_eq!(unique.len(), full.len());
        for pair in full.windows(2) {
            assert_eq!(pair[0].distance(*pair[1]), 1);
        }
    }
}

#[test]
fn test_single_blocked_cell_forces_detour() {
    let config = MapConfig::hexagonal("hex", 4).with_blocked(vec![HexCoord::new(0, 0)]);
    let grid = config.build_grid().unwrap();
    let start = HexCoord::new(-2, 0);
    let goal = HexCoord::new(2, 0);

    let open = grid.shortest_path(start, goal, &UniformCost).unwrap();
    assert_eq!(open.len(), 4);

    let path = grid.shortest_path(start, goal, &config.terrain_cost()).unwrap();
    assert!(path.len() > 4);
    assert!(!path.coords().contains(&HexCoord::ORIGIN));
}

#[test]
fn test_terrain_costs_shape_the_route() {
    // A hill band across the middle with one grass gap at the top
    let hills: Vec<HexCoord> = (-2..=3).map(|r| HexCoord::new(0, r)).collect();
    let grid = terrain_map(4, &hills, &[]);
    let path = grid
        .shortest_path(HexCoord::new(-2, 1), HexCoord::new(2, -1), &LandMovement)
        .unwrap();
    // Straight through costs 1 + 2 + 1 + 1 = 5; going round costs more
    assert_eq!(path.cost(), 5.0);
    assert_eq!(path.last().map(|t| t.position), Some(HexCoord::new(2, -1)));
}

#[test]
fn test_mountain_wall_is_unreachable() {
    // Mountains on every cell with q == 0 split the map in two
    let wall: Vec<HexCoord> = (-4..=4).map(|r| HexCoord::new(0, r)).collect();
    let grid = terrain_map(4, &[], &wall);
    assert!(grid
        .shortest_path(HexCoord::new(-2, 0), HexCoord::new(2, 0), &LandMovement)
        .is_none());
    // Same side still works
    assert!(grid
        .shortest_path(HexCoord::new(-2, 0), HexCoord::new(-3, 3), &LandMovement)
        .is_some());
}

#[test]
fn test_movement_range_respects_terrain() {
    let grid = terrain_map(3, &[HexCoord::new(1, 0)], &[HexCoord::new(0, 1)]);
    let reach = grid.reachable_within(HexCoord::ORIGIN, 1.0, &LandMovement);
    // Six neighbors minus the hill (too expensive) and the mountain
    assert_eq!(reach.len(), 1 + 4);
    assert!(!reach.contains(HexCoord::new(1, 0)));
    assert!(!reach.contains(HexCoord::new(0, 1)));

    let reach = grid.reachable_within(HexCoord::ORIGIN, 2.0, &LandMovement);
    assert_eq!(reach.cost_to(HexCoord::new(1, 0)), Some(2.0));
    assert!(!reach.contains(HexCoord::new(0, 1)));
}

#[test]
fn test_regenerated_grid_serves_new_queries() {
    let mut grid = MapConfig::hexagonal("small", 1).build_grid().unwrap();
    assert!(grid.shortest_path(HexCoord::ORIGIN, HexCoord::new(3, 0), &UniformCost).is_none());

    let bigger = MapConfig::hexagonal("big", 3).build_grid().unwrap();
    grid.regenerate(bigger.into_cells()).unwrap();
    assert_eq!(
        grid.shortest_path(HexCoord::ORIGIN, HexCoord::new(3, 0), &UniformCost)
            .map(|p| p.len()),
        Some(3)
    );

    let err = grid.regenerate(vec![HexCoord::ORIGIN, HexCoord::ORIGIN]).unwrap_err();
    assert_eq!(err, GridError::DuplicateCell { coord: HexCoord::ORIGIN });
}

#[test]
fn test_concurrent_searches_share_grid() {
    let grid = MapConfig::hexagonal("shared", 8).build_grid().unwrap();
    let goals: Vec<HexCoord> = HexCoord::ORIGIN.ring(8).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = goals
            .chunks(12)
            .map(|chunk| {
                let grid = &grid;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&goal| grid.shortest_path(HexCoord::ORIGIN, goal, &UniformCost).map(|p| p.len()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            for len in handle.join().unwrap() {
                assert_eq!(len, Some(8));
            }
        }
    });

    let batch = grid.shortest_paths(HexCoord::ORIGIN, &goals, &UniformCost);
    assert!(batch.iter().all(|p| p.as_ref().map(|p| p.len()) == Some(8)));
}
