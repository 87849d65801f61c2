//! Grid module - manages the orb board
//!
//! The grid is an R x C board where each cell is empty or holds one orb.
//! Uses a flat vector in row-major order (`row * cols + col`).
//! Coordinates: row 0 is the top row, column 0 the leftmost column.
//!
//! Every orb records its own location. All mutations go through [`Grid`]
//! methods, which rewrite the orb's location whenever it is placed, so the
//! cell -> orb and orb -> cell views can never disagree.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::matcher::{completes_run_on_fill, MatchSet};
use crate::record::RemovedOrb;
use crate::refill::{refill, OrbGenerator};
use crate::types::{Cell, OrbId, OrbType, MIN_DIMENSION};

/// Draws rejected per cell before `filled_without_matches` falls back to a
/// deterministic choice
pub const REROLL_LIMIT: usize = 16;

/// One orb instance
///
/// Orbs are only created by a [`Grid`] (initial fill, refill, [`Grid::new_orb`])
/// and are not `Copy`: moving an orb means taking it out of one cell and
/// setting it into another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Orb {
    id: OrbId,
    kind: OrbType,
    location: Cell,
}

impl Orb {
    pub fn id(&self) -> OrbId {
        self.id
    }

    pub fn kind(&self) -> OrbType {
        self.kind
    }

    /// The cell this orb occupies (or last occupied, once taken off the grid)
    pub fn location(&self) -> Cell {
        self.location
    }
}

/// Invariant violations reported by [`Grid::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("orb {id} is stored at {actual} but records location {recorded}")]
    LocationMismatch {
        id: OrbId,
        recorded: Cell,
        actual: Cell,
    },
    #[error("orb {id} appears more than once")]
    DuplicateId { id: OrbId },
}

impl GridError {
    pub fn code(&self) -> &'static str {
        match self {
            GridError::LocationMismatch { .. } => "location_mismatch",
            GridError::DuplicateId { .. } => "duplicate_id",
        }
    }
}

/// Errors from parsing a textual board layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGridError {
    #[error("board needs at least {min} rows and {min} columns, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize, min: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown orb symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

impl ParseGridError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseGridError::TooSmall { .. } => "too_small",
            ParseGridError::Ragged { .. } => "ragged_rows",
            ParseGridError::UnknownSymbol { .. } => "unknown_symbol",
        }
    }
}

/// The orb board - rows x cols using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat vector of cells, row-major order (row * cols + col)
    cells: Vec<Option<Orb>>,
    /// Next id to mint; ids are never reused within one grid
    next_id: u32,
}

impl Grid {
    /// Create a new empty grid
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below [`MIN_DIMENSION`]: no run of three
    /// could ever form on such a board.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows >= MIN_DIMENSION && cols >= MIN_DIMENSION,
            "grid must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {rows}x{cols}"
        );
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            next_id: 0,
        }
    }

    /// Create a fully populated grid, generating orbs in row-major order
    ///
    /// The board may start with runs already in place.
    pub fn filled<G: OrbGenerator + ?Sized>(rows: usize, cols: usize, generator: &mut G) -> Self {
        let mut grid = Self::new(rows, cols);
        refill(&mut grid, generator);
        grid
    }

    /// Create a fully populated grid that contains no run
    ///
    /// Each cell is drawn from `generator` until its type does not complete a
    /// run with the two cells to its left or the two cells above it. After
    /// [`REROLL_LIMIT`] rejected draws the first type in [`OrbType::ALL`] that
    /// completes nothing is used instead.
    pub fn filled_without_matches<G: OrbGenerator + ?Sized>(
        rows: usize,
        cols: usize,
        generator: &mut G,
    ) -> Self {
        let mut grid = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell::new(row, col);
                let kind = (0..REROLL_LIMIT)
                    .map(|_| generator.next_orb())
                    .find(|&kind| !completes_run_on_fill(&grid, cell, kind))
                    .or_else(|| {
                        OrbType::ALL
                            .into_iter()
                            .find(|&kind| !completes_run_on_fill(&grid, cell, kind))
                    })
                    .unwrap_or(OrbType::ALL[0]);
                grid.spawn(cell, kind);
            }
        }
        grid
    }

    /// Parse a textual layout, one string per row
    ///
    /// Symbols are the orb symbols (`F W G L D H`, case-insensitive) and `.`
    /// for an empty cell. Whitespace inside a row is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use orb_cascade_core::Grid;
    /// use orb_cascade_core::types::{Cell, OrbType};
    ///
    /// let grid = Grid::from_rows(&["F W G", "L . D", "H H H"]).unwrap();
    /// assert_eq!(grid.dimensions(), (3, 3));
    /// assert_eq!(grid.kind_at(Cell::new(1, 2)), Some(OrbType::Dark));
    /// assert!(grid.is_empty(Cell::new(1, 1)));
    /// ```
    pub fn from_rows<S: AsRef<str>>(layout: &[S]) -> Result<Self, ParseGridError> {
        let parsed: Vec<Vec<char>> = layout
            .iter()
            .map(|line| line.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        let rows = parsed.len();
        let cols = parsed.first().map_or(0, Vec::len);
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(ParseGridError::TooSmall {
                rows,
                cols,
                min: MIN_DIMENSION,
            });
        }

        let mut grid = Self::new(rows, cols);
        for (row, line) in parsed.iter().enumerate() {
            if line.len() != cols {
                return Err(ParseGridError::Ragged {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &symbol) in line.iter().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let kind = OrbType::from_symbol(symbol)
                    .ok_or(ParseGridError::UnknownSymbol { row, col, symbol })?;
                grid.spawn(Cell::new(row, col), kind);
            }
        }
        Ok(grid)
    }

    /// Calculate flat index from a cell
    #[inline(always)]
    fn index(&self, cell: Cell) -> usize {
        assert!(
            self.is_valid(cell),
            "cell {cell} out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        cell.row * self.cols + cell.col
    }

    /// Get (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if a cell lies on the board
    pub fn is_valid(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Get the orb at a cell
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    pub fn get(&self, cell: Cell) -> Option<&Orb> {
        self.cells[self.index(cell)].as_ref()
    }

    /// Place an orb (or clear the cell with `None`), returning whatever was there
    ///
    /// The placed orb's location is updated to `cell`. An orb must be taken
    /// off its old cell before it is set on a new one.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds. Debug builds also panic when the
    /// orb's id already sits on another cell.
    pub fn set(&mut self, cell: Cell, orb: Option<Orb>) -> Option<Orb> {
        let idx = self.index(cell);
        if let Some(orb) = &orb {
            debug_assert!(
                !self
                    .cells
                    .iter()
                    .enumerate()
                    .any(|(i, other)| i != idx && other.as_ref().map(Orb::id) == Some(orb.id)),
                "orb {} is already on the board",
                orb.id
            );
        }
        let orb = orb.map(|mut orb| {
            orb.location = cell;
            orb
        });
        std::mem::replace(&mut self.cells[idx], orb)
    }

    /// Clear a cell and return its orb
    pub fn take(&mut self, cell: Cell) -> Option<Orb> {
        self.set(cell, None)
    }

    /// Mint a new orb with a fresh id, not yet placed on the board
    pub fn new_orb(&mut self, kind: OrbType) -> Orb {
        let id = OrbId(self.next_id);
        self.next_id += 1;
        Orb {
            id,
            kind,
            location: Cell::new(0, 0),
        }
    }

    /// Mint a new orb and place it on an empty cell
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds or already occupied.
    pub fn spawn(&mut self, cell: Cell, kind: OrbType) -> OrbId {
        assert!(self.is_empty(cell), "cannot spawn onto occupied cell {cell}");
        let orb = self.new_orb(kind);
        let id = orb.id;
        self.set(cell, Some(orb));
        id
    }

    /// Exchange the contents of two cells, updating both locations
    pub(crate) fn swap_cells(&mut self, a: Cell, b: Cell) {
        let first = self.take(a);
        let second = self.take(b);
        self.set(a, second);
        self.set(b, first);
    }

    /// Orb type at a cell, `None` when empty
    pub fn kind_at(&self, cell: Cell) -> Option<OrbType> {
        self.get(cell).map(Orb::kind)
    }

    /// Check if a cell is empty
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Check if every cell holds an orb
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of orbs on the board
    pub fn orb_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&c| self.is_empty(c)).collect()
    }

    /// Orbs on the board in row-major order
    pub fn orbs(&self) -> impl Iterator<Item = &Orb> {
        self.cells.iter().flatten()
    }

    /// In-bounds 4-neighbours of a cell (up, down, left, right)
    pub fn neighbours(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        let mut out = ArrayVec::new();
        if let Some(up) = cell.up() {
            out.push(up);
        }
        if cell.row + 1 < self.rows {
            out.push(Cell::new(cell.row + 1, cell.col));
        }
        if let Some(left) = cell.left() {
            out.push(left);
        }
        if cell.col + 1 < self.cols {
            out.push(Cell::new(cell.row, cell.col + 1));
        }
        out
    }

    /// Clear every cell of a match set at once
    ///
    /// Returns the removed orbs in row-major order. Empty cells in the set are
    /// skipped.
    pub fn remove_all(&mut self, matches: &MatchSet) -> Vec<RemovedOrb> {
        matches
            .iter()
            .filter_map(|cell| {
                self.take(cell).map(|orb| RemovedOrb {
                    id: orb.id,
                    kind: orb.kind,
                    cell,
                })
            })
            .collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Verify that every orb's recorded location matches its cell and that
    /// no id appears twice
    pub fn check_invariants(&self) -> Result<(), GridError> {
        let mut seen = HashSet::with_capacity(self.cells.len());
        for cell in self.cells() {
            let Some(orb) = self.get(cell) else {
                continue;
            };
            if orb.location != cell {
                return Err(GridError::LocationMismatch {
                    id: orb.id,
                    recorded: orb.location,
                    actual: cell,
                });
            }
            if !seen.insert(orb.id) {
                return Err(GridError::DuplicateId { id: orb.id });
            }
        }
        Ok(())
    }

    /// Layout strings, one per row (see [`Grid::from_rows`])
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        self.kind_at(Cell::new(row, col))
                            .map_or('.', |kind| kind.symbol())
                    })
                    .collect()
            })
            .collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rows().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(5, 6);
        assert_eq!(grid.index(Cell::new(0, 0)), 0);
        assert_eq!(grid.index(Cell::new(0, 5)), 5);
        assert_eq!(grid.index(Cell::new(1, 0)), 6);
        assert_eq!(grid.index(Cell::new(4, 5)), 29);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_grid_get_out_of_bounds_panics() {
        let grid = Grid::new(5, 6);
        grid.get(Cell::new(5, 0));
    }

    #[test]
    #[should_panic(expected = "at least 3x3")]
    fn test_grid_too_small_panics() {
        Grid::new(2, 6);
    }

    #[test]
    fn test_set_updates_location() {
        let mut grid = Grid::new(3, 3);
        let id = grid.spawn(Cell::new(0, 0), OrbType::Fire);

        let orb = grid.take(Cell::new(0, 0)).unwrap();
        assert!(grid.set(Cell::new(2, 1), Some(orb)).is_none());

        let placed = grid.get(Cell::new(2, 1)).unwrap();
        assert_eq!(placed.id(), id);
        assert_eq!(placed.location(), Cell::new(2, 1));
        assert!(grid.check_invariants().is_ok());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut grid = Grid::new(3, 3);
        let a = grid.spawn(Cell::new(0, 0), OrbType::Fire);
        grid.take(Cell::new(0, 0));
        let b = grid.spawn(Cell::new(0, 0), OrbType::Fire);
        assert_ne!(a, b);
    }

    #[test]
    fn test_duplicate_id_detected() {
        let mut grid = Grid::new(3, 3);
        grid.spawn(Cell::new(0, 0), OrbType::Fire);
        // Bypass `set`, which refuses duplicates in debug builds
        let mut copy = grid.cells[0].clone().unwrap();
        copy.location = Cell::new(1, 1);
        grid.cells[4] = Some(copy);
        assert_eq!(
            grid.check_invariants().unwrap_err().code(),
            "duplicate_id"
        );
    }

    #[test]
    fn test_location_mismatch_detected() {
        let mut grid = Grid::new(3, 3);
        grid.spawn(Cell::new(0, 0), OrbType::Fire);
        grid.cells[0].as_mut().unwrap().location = Cell::new(2, 2);
        assert!(matches!(
            grid.check_invariants(),
            Err(GridError::LocationMismatch { .. })
        ));
    }

    #[test]
    fn test_swap_cells_with_empty() {
        let mut grid = Grid::new(3, 3);
        grid.spawn(Cell::new(0, 0), OrbType::Water);
        grid.swap_cells(Cell::new(0, 0), Cell::new(0, 1));
        assert!(grid.is_empty(Cell::new(0, 0)));
        assert_eq!(grid.get(Cell::new(0, 1)).unwrap().location(), Cell::new(0, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already on the board")]
    fn test_set_rejects_copy_of_placed_orb() {
        let mut grid = Grid::from_rows(&["F..", "...", "..."]).unwrap();
        let copy = grid.get(Cell::new(0, 0)).cloned();
        grid.set(Cell::new(2, 2), copy);
    }

    #[test]
    fn test_set_same_orb_back_in_place() {
        let mut grid = Grid::from_rows(&["F..", "...", "..."]).unwrap();
        let copy = grid.get(Cell::new(0, 0)).cloned();
        assert!(grid.set(Cell::new(0, 0), copy).is_some());
        assert!(grid.check_invariants().is_ok());
    }

    #[test]
    fn test_neighbours_at_corner_and_centre() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.neighbours(Cell::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbours(Cell::new(1, 1)).len(), 4);
        assert_eq!(grid.neighbours(Cell::new(2, 1)).len(), 3);
    }

    #[test]
    fn test_layout_roundtrip() {
        let layout = ["FWG", "L.D", "HHH"];
        let grid = Grid::from_rows(&layout).unwrap();
        assert_eq!(grid.to_rows(), layout);
        assert_eq!(grid.to_string(), "FWG\nL.D\nHHH");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Grid::from_rows(&["FW", "FW"]).unwrap_err().code(),
            "too_small"
        );
        assert_eq!(
            Grid::from_rows(&["FWG", "FW", "FWG"]).unwrap_err(),
            ParseGridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            Grid::from_rows(&["FWG", "FXG", "FWG"]).unwrap_err(),
            ParseGridError::UnknownSymbol {
                row: 1,
                col: 1,
                symbol: 'X'
            }
        );
    }
}
