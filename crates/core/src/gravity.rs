//! Gravity - per-column collapse after removals
//!
//! Each column is walked from the bottom row upward. Every empty cell pulls
//! down the nearest orb above it, so survivors end up packed at the bottom in
//! their original vertical order and empties remain only at the top.
//!
//! Columns are independent; they are processed left to right so the move log
//! is reproducible.

use crate::grid::Grid;
use crate::record::OrbMove;
use crate::types::Cell;

/// Collapse every column, returning the moves in the order performed
///
/// Applying gravity to an already settled grid records no moves.
pub fn apply_gravity(grid: &mut Grid) -> Vec<OrbMove> {
    let (rows, cols) = grid.dimensions();
    let mut moves = Vec::new();

    for col in 0..cols {
        // Next landing row; rows at or below it are already packed
        let mut write = rows;
        for row in (0..rows).rev() {
            let from = Cell::new(row, col);
            let Some(orb) = grid.take(from) else {
                continue;
            };
            write -= 1;
            let to = Cell::new(write, col);
            if to != from {
                moves.push(OrbMove {
                    id: orb.id(),
                    kind: orb.kind(),
                    from,
                    to,
                });
            }
            grid.set(to, Some(orb));
        }
    }

    log::trace!("gravity moved {} orbs", moves.len());
    moves
}

/// True when no empty cell has an orb somewhere above it
pub fn is_settled(grid: &Grid) -> bool {
    let (rows, cols) = grid.dimensions();
    (0..cols).all(|col| {
        let mut seen_orb = false;
        for row in 0..rows {
            let occupied = !grid.is_empty(Cell::new(row, col));
            if seen_orb && !occupied {
                return false;
            }
            seen_orb |= occupied;
        }
        true
    })
}
