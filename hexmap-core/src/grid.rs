//! Grid index: the single source of truth for "is there a cell here"

use crate::coord::HexCoord;
use crate::direction::Direction;
use rustc_hash::FxHashMap;

/// Anything identified by exactly one hex coordinate
pub trait Cell {
    fn coord(&self) -> HexCoord;
}

impl Cell for HexCoord {
    fn coord(&self) -> HexCoord {
        *self
    }
}

/// Error types for grid construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Duplicate cell at {coord}")]
    DuplicateCell { coord: HexCoord },
}

/// Hex grid owning its cells, indexed by coordinate.
///
/// The index is built when the grid is constructed and rebuilt by
/// [`HexGrid::regenerate`]. Every query takes `&self` and leaves the grid
/// untouched, so a shared grid can serve searches from several threads.
#[derive(Clone, Debug)]
pub struct HexGrid<C> {
    /// Authoritative cell collection
    cells: Vec<C>,

    /// coord -> position in `cells`
    index: FxHashMap<HexCoord, usize>,
}

impl<C: Cell> HexGrid<C> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a grid, rejecting two cells with the same coordinate
    pub fn new(cells: Vec<C>) -> Result<Self, GridError> {
        let index = build_index(&cells)?;
        tracing::debug!("Built grid index: {} cells", cells.len());
        Ok(Self { cells, index })
    }

    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Replace the whole cell collection (map regeneration) and rebuild the index.
    ///
    /// On error the grid keeps its previous cells.
    pub fn regenerate(&mut self, cells: Vec<C>) -> Result<(), GridError> {
        let index = build_index(&cells)?;
        tracing::debug!(
            "Regenerated grid index: {} -> {} cells",
            self.cells.len(),
            cells.len()
        );
        self.cells = cells;
        self.index = index;
        Ok(())
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    pub fn has_cell_at(&self, coord: HexCoord) -> bool {
        self.index.contains_key(&coord)
    }

    pub fn cell_at(&self, coord: HexCoord) -> Option<&C> {
        self.index.get(&coord).map(|&i| &self.cells[i])
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.cells.iter().map(Cell::coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> Vec<C> {
        self.cells
    }

    /// Keep only coordinates that have a cell, mapped to their cells
    pub(crate) fn existing<I>(&self, coords: I) -> Vec<&C>
    where
        I: IntoIterator<Item = HexCoord>,
    {
        coords.into_iter().filter_map(|c| self.cell_at(c)).collect()
    }

    // ========================================================================
    // NEIGHBORS
    // ========================================================================

    pub fn has_neighbor(&self, coord: HexCoord, direction: Direction) -> bool {
        self.has_cell_at(coord.neighbor(direction))
    }

    /// Cell adjacent to `coord` in `direction`, absent at map edges and holes
    pub fn neighbor(&self, coord: HexCoord, direction: Direction) -> Option<&C> {
        self.cell_at(coord.neighbor(direction))
    }

    /// Existing neighbors in direction order (not sorted spatially)
    pub fn all_neighbors(&self, coord: HexCoord) -> Vec<&C> {
        self.existing(coord.neighbors())
    }
}

impl HexGrid<HexCoord> {
    /// Grid whose cells are the coordinates themselves; duplicates are merged
    pub fn from_coords<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = HexCoord>,
    {
        let mut cells = Vec::new();
        let mut index = FxHashMap::default();
        for coord in coords {
            index.entry(coord).or_insert_with(|| {
                cells.push(coord);
                cells.len() - 1
            });
        }
        Self { cells, index }
    }
}

impl<C> Default for HexGrid<C> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

fn build_index<C: Cell>(cells: &[C]) -> Result<FxHashMap<HexCoord, usize>, GridError> {
    let mut index = FxHashMap::default();
    index.reserve(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let coord = cell.coord();
        if index.insert(coord, i).is_some() {
            return Err(GridError::DuplicateCell { coord });
        }
    }
    Ok(index)
}
