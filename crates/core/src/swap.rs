//! Swap module - adjacent orb exchange and swap hints

use crate::grid::Grid;
use crate::matcher::is_matched_at;
use crate::types::Cell;

/// Exchange the orbs at two 4-adjacent cells
///
/// Returns false, leaving the grid untouched, when the cells are not
/// adjacent or either cell is empty. On success both orbs' locations are
/// updated.
///
/// # Panics
///
/// Panics if either cell is out of bounds.
pub fn try_swap(grid: &mut Grid, a: Cell, b: Cell) -> bool {
    let both_occupied = !grid.is_empty(a) && !grid.is_empty(b);
    if !a.is_adjacent(b) || !both_occupied {
        return false;
    }
    grid.swap_cells(a, b);
    true
}

/// Every adjacent swap that would create at least one run
///
/// Pairs are `(cell, right or lower neighbour)` in row-major order of the
/// first cell, right neighbour before lower. An empty result means the board
/// has no productive move.
pub fn matching_swaps(grid: &Grid) -> Vec<(Cell, Cell)> {
    let mut scratch = grid.clone();
    let mut out = Vec::new();

    for cell in grid.cells() {
        // Neighbours come up, down, left, right; reversed and kept when later
        // in row-major order, that is right then down
        let forward = grid.neighbours(cell).into_iter().rev().filter(|&n| n > cell);
        for other in forward {
            if grid.kind_at(cell) == grid.kind_at(other) {
                continue;
            }
            if !try_swap(&mut scratch, cell, other) {
                continue;
            }
            if is_matched_at(&scratch, cell) || is_matched_at(&scratch, other) {
                out.push((cell, other));
            }
            scratch.swap_cells(cell, other);
        }
    }
    out
}
