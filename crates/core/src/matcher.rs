//! Match detection - runs of three or more same-typed orbs
//!
//! Detection slides a window of three cells along every row (left to right)
//! and every column (top to bottom). A window matches when all three cells
//! hold orbs of the same type; all three cells join the match set. Longer
//! runs fall out naturally because consecutive windows overlap.
//!
//! Empty cells never match, so an empty cell breaks any run through it.
//! The result depends only on the grid contents.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{Axis, Cell, OrbType, MIN_RUN};

/// Cells taking part in at least one run, ordered row-major
///
/// An orb that belongs to both a horizontal and a vertical run is listed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: BTreeSet<Cell>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell, returning false if it was already present
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// An empty set means the board is stable
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().collect()
    }
}

impl FromIterator<Cell> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MatchSet {
    type Item = Cell;
    type IntoIter = std::collections::btree_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// A maximal run of same-typed orbs along one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: OrbType,
    pub axis: Axis,
    /// Cells from left to right (horizontal) or top to bottom (vertical)
    pub cells: Vec<Cell>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let axis = match self.axis {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        };
        write!(f, "{} {} {axis}", self.len(), self.kind.as_str())?;
        if let Some(first) = self.cells.first() {
            write!(f, " from {first}")?;
        }
        Ok(())
    }
}

/// Type shared by a window of three, if all three are occupied and equal
#[inline]
fn triple(a: Option<OrbType>, b: Option<OrbType>, c: Option<OrbType>) -> Option<OrbType> {
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) if a == b && b == c => Some(a),
        _ => None,
    }
}

/// Scan every row and every column for runs of three or more
///
/// # Examples
///
/// ```
/// use orb_cascade_core::{detect_matches, Grid};
/// use orb_cascade_core::types::Cell;
///
/// let grid = Grid::from_rows(&["FFWFFF", "WGWGLD", "GWGWDL"]).unwrap();
/// let matches = detect_matches(&grid);
/// assert_eq!(matches.to_vec(), vec![Cell::new(0, 3), Cell::new(0, 4), Cell::new(0, 5)]);
/// ```
pub fn detect_matches(grid: &Grid) -> MatchSet {
    let (rows, cols) = grid.dimensions();
    let mut matches = MatchSet::new();

    // Horizontal windows
    for row in 0..rows {
        for col in 0..cols - 2 {
            let window = [
                Cell::new(row, col),
                Cell::new(row, col + 1),
                Cell::new(row, col + 2),
            ];
            if triple(
                grid.kind_at(window[0]),
                grid.kind_at(window[1]),
                grid.kind_at(window[2]),
            )
            .is_some()
            {
                matches.cells.extend(window);
            }
        }
    }

    // Vertical windows
    for row in 0..rows - 2 {
        for col in 0..cols {
            let window = [
                Cell::new(row, col),
                Cell::new(row + 1, col),
                Cell::new(row + 2, col),
            ];
            if triple(
                grid.kind_at(window[0]),
                grid.kind_at(window[1]),
                grid.kind_at(window[2]),
            )
            .is_some()
            {
                matches.cells.extend(window);
            }
        }
    }

    matches
}

/// Sliding-triple scan of a single line of cells
///
/// Returns the distinct indices that belong to a run, ascending. Lines
/// shorter than three never match.
///
/// # Examples
///
/// ```
/// use orb_cascade_core::scan_line;
/// use orb_cascade_core::types::OrbType::{Fire as A, Water as B};
///
/// let line = [Some(A), Some(A), Some(B), Some(A), Some(A), Some(A)];
/// assert_eq!(scan_line(&line), vec![3, 4, 5]);
/// ```
pub fn scan_line(line: &[Option<OrbType>]) -> Vec<usize> {
    let mut hits = BTreeSet::new();
    for (start, window) in line.windows(MIN_RUN).enumerate() {
        if triple(window[0], window[1], window[2]).is_some() {
            hits.extend(start..start + MIN_RUN);
        }
    }
    hits.into_iter().collect()
}

/// Group the board's matches into maximal runs
///
/// Horizontal runs come first (row-major), then vertical runs (column-major).
/// A cell shared by a horizontal and a vertical run appears in both.
pub fn runs(grid: &Grid) -> Vec<Run> {
    let (rows, cols) = grid.dimensions();
    let mut out = Vec::new();

    for row in 0..rows {
        let line: Vec<Cell> = (0..cols).map(|col| Cell::new(row, col)).collect();
        collect_runs(grid, &line, Axis::Horizontal, &mut out);
    }
    for col in 0..cols {
        let line: Vec<Cell> = (0..rows).map(|row| Cell::new(row, col)).collect();
        collect_runs(grid, &line, Axis::Vertical, &mut out);
    }
    out
}

fn collect_runs(grid: &Grid, line: &[Cell], axis: Axis, out: &mut Vec<Run>) {
    let mut start = 0;
    while start < line.len() {
        let Some(kind) = grid.kind_at(line[start]) else {
            start += 1;
            continue;
        };
        let mut end = start + 1;
        while end < line.len() && grid.kind_at(line[end]) == Some(kind) {
            end += 1;
        }
        if end - start >= MIN_RUN {
            out.push(Run {
                kind,
                axis,
                cells: line[start..end].to_vec(),
            });
        }
        start = end;
    }
}

/// Length of the same-typed run through `cell` along `axis`
///
/// Returns 0 when the cell is empty.
pub fn run_length_through(grid: &Grid, cell: Cell, axis: Axis) -> usize {
    let Some(kind) = grid.kind_at(cell) else {
        return 0;
    };
    let (rows, cols) = grid.dimensions();
    let step = |c: Cell, forward: bool| -> Option<Cell> {
        match (axis, forward) {
            (Axis::Horizontal, false) => c.left(),
            (Axis::Horizontal, true) => (c.col + 1 < cols).then(|| Cell::new(c.row, c.col + 1)),
            (Axis::Vertical, false) => c.up(),
            (Axis::Vertical, true) => (c.row + 1 < rows).then(|| Cell::new(c.row + 1, c.col)),
        }
    };

    let mut len = 1;
    for forward in [false, true] {
        let mut cursor = step(cell, forward);
        while let Some(next) = cursor {
            if grid.kind_at(next) != Some(kind) {
                break;
            }
            len += 1;
            cursor = step(next, forward);
        }
    }
    len
}

/// True when the orb at `cell` is part of a horizontal or vertical run
pub fn is_matched_at(grid: &Grid, cell: Cell) -> bool {
    run_length_through(grid, cell, Axis::Horizontal) >= MIN_RUN
        || run_length_through(grid, cell, Axis::Vertical) >= MIN_RUN
}

/// True when placing `kind` at `cell` would complete a run with the two
/// cells to its left or the two cells above it
///
/// Used during a row-major initial fill, where cells to the right and below
/// are still empty.
pub(crate) fn completes_run_on_fill(grid: &Grid, cell: Cell, kind: OrbType) -> bool {
    let same = |c: Option<Cell>| c.and_then(|c| grid.kind_at(c)) == Some(kind);

    let left1 = cell.left();
    let left2 = left1.and_then(|c| c.left());
    let up1 = cell.up();
    let up2 = up1.and_then(|c| c.up());

    (same(left1) && same(left2)) || (same(up1) && same(up2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_on_checkerboard() {
        let grid = Grid::from_rows(&["FWFW", "WFWF", "FWFW"]).unwrap();
        assert!(detect_matches(&grid).is_empty());
        assert!(runs(&grid).is_empty());
    }

    #[test]
    fn test_empty_cell_breaks_run() {
        let grid = Grid::from_rows(&["FF.F", "WGWG", "GWGW"]).unwrap();
        assert!(detect_matches(&grid).is_empty());
    }

    #[test]
    fn test_long_run_fully_matched() {
        let grid = Grid::from_rows(&["DDDDD", "WGWGW", "GWGWG"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 5);
        let runs = runs(&grid);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 5);
        assert_eq!(runs[0].axis, Axis::Horizontal);
    }

    #[test]
    fn test_cross_shape_deduplicated() {
        // Plus sign of light orbs centred at (1, 1)
        let grid = Grid::from_rows(&["WLW", "LLL", "WLW"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 5);
        assert!(matches.contains(Cell::new(1, 1)));
        assert_eq!(runs(&grid).len(), 2);
    }

    #[test]
    fn test_scan_line_short_and_broken() {
        assert!(scan_line(&[Some(OrbType::Fire), Some(OrbType::Fire)]).is_empty());
        assert!(scan_line(&[Some(OrbType::Fire), None, Some(OrbType::Fire)]).is_empty());
        assert!(scan_line(&[None, None, None]).is_empty());
    }

    #[test]
    fn test_run_length_through() {
        let grid = Grid::from_rows(&["HHHW", "WGHW", "GWHG"]).unwrap();
        assert_eq!(run_length_through(&grid, Cell::new(0, 2), Axis::Horizontal), 3);
        assert_eq!(run_length_through(&grid, Cell::new(0, 2), Axis::Vertical), 3);
        assert_eq!(run_length_through(&grid, Cell::new(0, 3), Axis::Vertical), 2);
        assert!(is_matched_at(&grid, Cell::new(2, 2)));
        assert!(!is_matched_at(&grid, Cell::new(1, 3)));
    }

    #[test]
    fn test_run_display_for_logs() {
        let grid = Grid::from_rows(&["HHHW", "WGHW", "GWHG"]).unwrap();
        let found: Vec<String> = runs(&grid).iter().map(Run::to_string).collect();
        assert_eq!(
            found,
            vec!["3 heal horizontal from (0, 0)", "3 heal vertical from (0, 2)"]
        );
    }

    #[test]
    fn test_completes_run_on_fill() {
        let grid = Grid::from_rows(&["FF.", "W..", "W.."]).unwrap();
        assert!(completes_run_on_fill(&grid, Cell::new(0, 2), OrbType::Fire));
        assert!(!completes_run_on_fill(&grid, Cell::new(0, 2), OrbType::Water));
        // (2, 0) is occupied but the check only looks left and up
        assert!(!completes_run_on_fill(&grid, Cell::new(1, 1), OrbType::Water));
    }
}
