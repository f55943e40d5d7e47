//! Uniform-cost shortest path search with caller-supplied traversal costs
//!
//! The search knows nothing about terrain, owners or units: every edge is
//! weighted by a [`TraversalCost`] supplied per call. Each call allocates its
//! own frontier and bookkeeping, so searches over a shared grid never
//! interfere with each other.
//!
//! Path convention: a returned [`Path`] excludes the start cell and ends
//! with the goal. Searching from a cell to itself yields an empty path.

use crate::coord::HexCoord;
use crate::direction::Direction;
use crate::grid::{Cell, HexGrid};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// ============================================================================
// COST FUNCTIONS
// ============================================================================

/// Cost of stepping from one cell to an adjacent one.
///
/// `None` marks the step impassable. `Some(cost)` must be finite and
/// nonnegative, and must not change during a single search.
pub trait TraversalCost<C> {
    fn cost(&self, from: &C, to: &C) -> Option<f32>;
}

impl<C, F> TraversalCost<C> for F
where
    F: Fn(&C, &C) -> Option<f32>,
{
    fn cost(&self, from: &C, to: &C) -> Option<f32> {
        self(from, to)
    }
}

/// Every step costs 1, nothing is impassable
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformCost;

impl<C> TraversalCost<C> for UniformCost {
    fn cost(&self, _from: &C, _to: &C) -> Option<f32> {
        Some(1.0)
    }
}

/// Validate a step cost: negative, NaN or infinite costs count as impassable
fn checked_step(cost: Option<f32>) -> Option<f32> {
    let cost = cost?;
    debug_assert!(cost >= 0.0, "traversal cost must be nonnegative, got {}", cost);
    (cost >= 0.0 && cost.is_finite()).then_some(cost)
}

// ============================================================================
// PATH
// ============================================================================

/// Cells from the first step after the start up to and including the goal
#[derive(Clone, Debug)]
pub struct Path<'g, C> {
    cells: Vec<&'g C>,
    cost: f32,
}

impl<'g, C: Cell> Path<'g, C> {
    pub fn cells(&self) -> &[&'g C] {
        &self.cells
    }

    pub fn coords(&self) -> Vec<HexCoord> {
        self.cells.iter().map(|c| c.coord()).collect()
    }

    /// Total accumulated traversal cost
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Number of steps, i.e. cells excluding the start
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Option<&'g C> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<&'g C> {
        self.cells.last().copied()
    }

    /// The path with `start` prepended, for callers that want both ends
    pub fn with_start(&self, start: &'g C) -> Vec<&'g C> {
        std::iter::once(start).chain(self.cells.iter().copied()).collect()
    }

    pub fn into_cells(self) -> Vec<&'g C> {
        self.cells
    }
}

impl<'g, C> IntoIterator for Path<'g, C> {
    type Item = &'g C;
    type IntoIter = std::vec::IntoIter<&'g C>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

// ============================================================================
// FRONTIER
// ============================================================================

/// Frontier entry, ordered so the max-heap pops the lowest cost first and,
/// among equal costs, the entry pushed first
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    cost: f32,
    seq: u64,
    coord: HexCoord,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

// ============================================================================
// SEARCH
// ============================================================================

/// Call-local search state
struct Search<'g, C> {
    grid: &'g HexGrid<C>,
    frontier: BinaryHeap<FrontierEntry>,
    best_cost: FxHashMap<HexCoord, f32>,
    came_from: FxHashMap<HexCoord, HexCoord>,
    closed: FxHashSet<HexCoord>,
    /// Cells in the order they were settled
    settled: Vec<HexCoord>,
    next_seq: u64,
}

impl<'g, C: Cell> Search<'g, C> {
    fn new(grid: &'g HexGrid<C>, start: HexCoord) -> Self {
        let mut search = Self {
            grid,
            frontier: BinaryHeap::new(),
            best_cost: FxHashMap::default(),
            came_from: FxHashMap::default(),
            closed: FxHashSet::default(),
            settled: Vec::new(),
            next_seq: 0,
        };
        search.push(start, 0.0);
        search.best_cost.insert(start, 0.0);
        search
    }

    fn push(&mut self, coord: HexCoord, cost: f32) {
        self.frontier.push(FrontierEntry {
            cost,
            seq: self.next_seq,
            coord,
        });
        self.next_seq += 1;
    }

    /// Expand cells in cost order until `goal` is settled (returns its cost)
    /// or the frontier runs dry. Steps that would exceed `budget` are dropped.
    fn run<T>(&mut self, goal: Option<HexCoord>, budget: Option<f32>, cost_fn: &T) -> Option<f32>
    where
        T: TraversalCost<C> + ?Sized,
    {
        let grid = self.grid;
        while let Some(entry) = self.frontier.pop() {
            // Stale entry for a cell already settled at a lower cost
            if !self.closed.insert(entry.coord) {
                continue;
            }
            self.settled.push(entry.coord);

            if goal == Some(entry.coord) {
                return Some(entry.cost);
            }

            let Some(current) = grid.cell_at(entry.coord) else {
                continue;
            };

            for direction in Direction::ALL {
                let next_coord = entry.coord.neighbor(direction);
                if self.closed.contains(&next_coord) {
                    continue;
                }
                let Some(next) = grid.cell_at(next_coord) else {
                    continue;
                };
                let Some(step) = checked_step(cost_fn.cost(current, next)) else {
                    continue;
                };

                let new_cost = entry.cost + step;
                if budget.is_some_and(|limit| new_cost > limit) {
                    continue;
                }
                let improves = self
                    .best_cost
                    .get(&next_coord)
                    .map_or(true, |&known| new_cost < known);
                if improves {
                    self.best_cost.insert(next_coord, new_cost);
                    self.came_from.insert(next_coord, entry.coord);
                    self.push(next_coord, new_cost);
                }
            }
        }
        None
    }

    /// Walk predecessors back from `goal`; the start has none and is left out
    fn reconstruct(&self, goal: HexCoord) -> Vec<&'g C> {
        let mut cells = Vec::new();
        let mut current = goal;
        while let Some(&prev) = self.came_from.get(&current) {
            if let Some(cell) = self.grid.cell_at(current) {
                cells.push(cell);
            }
            current = prev;
        }
        cells.reverse();
        cells
    }
}

impl<C: Cell> HexGrid<C> {
    /// Cheapest path from `start` to `goal` under `cost_fn`.
    ///
    /// Returns `None` when the goal is unreachable, including when either end
    /// has no cell. Ties between equal-cost frontier entries resolve in the
    /// order they were discovered, and neighbors are relaxed in direction
    /// order, so the result is deterministic.
    pub fn shortest_path<T>(&self, start: HexCoord, goal: HexCoord, cost_fn: &T) -> Option<Path<'_, C>>
    where
        T: TraversalCost<C> + ?Sized,
    {
        if !self.has_cell_at(start) || !self.has_cell_at(goal) {
            tracing::trace!("No path {} -> {}: endpoint missing", start, goal);
            return None;
        }

        let mut search = Search::new(self, start);
        let found = search.run(Some(goal), None, cost_fn);
        tracing::trace!(
            "Path search {} -> {}: settled {} cells, result {:?}",
            start,
            goal,
            search.settled.len(),
            found
        );

        found.map(|cost| Path {
            cells: search.reconstruct(goal),
            cost,
        })
    }

    /// Every cell reachable from `start` with total cost at most `budget`,
    /// the start included at cost 0.
    pub fn reachable_within<T>(&self, start: HexCoord, budget: f32, cost_fn: &T) -> Reachable<'_, C>
    where
        T: TraversalCost<C> + ?Sized,
    {
        if !self.has_cell_at(start) || !(budget >= 0.0) {
            return Reachable {
                grid: self,
                costs: FxHashMap::default(),
                came_from: FxHashMap::default(),
                order: Vec::new(),
            };
        }

        let mut search = Search::new(self, start);
        search.run(None, Some(budget), cost_fn);
        tracing::trace!(
            "Reachability from {} within {}: {} cells",
            start,
            budget,
            search.settled.len()
        );

        let costs = search
            .settled
            .iter()
            .filter_map(|c| search.best_cost.get(c).map(|&cost| (*c, cost)))
            .collect();
        Reachable {
            grid: self,
            costs,
            came_from: search.came_from,
            order: search.settled,
        }
    }

    /// One independent search per goal; runs in parallel with the `parallel` feature
    pub fn shortest_paths<T>(&self, start: HexCoord, goals: &[HexCoord], cost_fn: &T) -> Vec<Option<Path<'_, C>>>
    where
        C: Sync,
        T: TraversalCost<C> + Sync + ?Sized,
    {
        let search = |&goal: &HexCoord| self.shortest_path(start, goal, cost_fn);

        #[cfg(feature = "parallel")]
        let paths: Vec<_> = {
            use rayon::prelude::*;
            goals.par_iter().map(search).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let paths: Vec<_> = goals.iter().map(search).collect();

        paths
    }
}

// ============================================================================
// REACHABILITY
// ============================================================================

/// Result of [`HexGrid::reachable_within`]: settled cells with their cheapest costs
#[derive(Clone, Debug)]
pub struct Reachable<'g, C> {
    grid: &'g HexGrid<C>,
    costs: FxHashMap<HexCoord, f32>,
    came_from: FxHashMap<HexCoord, HexCoord>,
    /// Settle order: nondecreasing cost
    order: Vec<HexCoord>,
}

impl<'g, C: Cell> Reachable<'g, C> {
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.costs.contains_key(&coord)
    }

    pub fn cost_to(&self, coord: HexCoord) -> Option<f32> {
        self.costs.get(&coord).copied()
    }

    /// Cheapest path to a reachable cell, same convention as [`HexGrid::shortest_path`]
    pub fn path_to(&self, coord: HexCoord) -> Option<Path<'g, C>> {
        let cost = self.cost_to(coord)?;
        let mut cells = Vec::new();
        let mut current = coord;
        while let Some(&prev) = self.came_from.get(&current) {
            cells.push(self.grid.cell_at(current)?);
            current = prev;
        }
        cells.reverse();
        Some(Path { cells, cost })
    }

    /// Reachable cells, cheapest first
    pub fn cells(&self) -> Vec<&'g C> {
        self.grid.existing(self.order.iter().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'g C, f32)> + '_ {
        self.order
            .iter()
            .filter_map(|c| Some((self.grid.cell_at(*c)?, self.costs[c])))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
