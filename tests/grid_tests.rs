//! Grid tests - storage, location invariant and layout parsing

use std::collections::HashSet;

use orb_cascade::core::{Grid, SequenceGenerator, UniformGenerator};
use orb_cascade::types::{Cell, OrbType, DEFAULT_COLS, DEFAULT_ROWS};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(DEFAULT_ROWS, DEFAULT_COLS);
    assert_eq!(grid.dimensions(), (5, 6));
    assert_eq!(grid.orb_count(), 0);

    for cell in grid.cells() {
        assert!(grid.is_valid(cell), "cell {cell} should be valid");
        assert!(grid.get(cell).is_none());
    }
    assert_eq!(grid.empty_cells().len(), 30);
}

#[test]
fn test_set_then_get_round_trip() {
    let mut grid = Grid::new(3, 3);
    let orb = grid.new_orb(OrbType::Light);
    let id = orb.id();

    assert!(grid.set(Cell::new(2, 1), Some(orb)).is_none());

    let stored = grid.get(Cell::new(2, 1)).unwrap();
    assert_eq!(stored.id(), id);
    assert_eq!(stored.kind(), OrbType::Light);
    assert_eq!(stored.location(), Cell::new(2, 1));
}

#[test]
fn test_moving_an_orb_rewrites_its_location() {
    let mut grid = Grid::from_rows(&["F..", "...", "..."]).unwrap();
    let orb = grid.take(Cell::new(0, 0)).unwrap();
    grid.set(Cell::new(1, 2), Some(orb));

    assert!(grid.is_empty(Cell::new(0, 0)));
    assert_eq!(grid.get(Cell::new(1, 2)).unwrap().location(), Cell::new(1, 2));
    assert!(grid.check_invariants().is_ok());
}

#[test]
fn test_set_returns_displaced_orb() {
    let mut grid = Grid::from_rows(&["FW.", "...", "..."]).unwrap();
    let water = grid.take(Cell::new(0, 1)).unwrap();

    let displaced = grid.set(Cell::new(0, 0), Some(water)).unwrap();
    assert_eq!(displaced.kind(), OrbType::Fire);
    assert_eq!(grid.kind_at(Cell::new(0, 0)), Some(OrbType::Water));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_get_out_of_bounds_panics() {
    let grid = Grid::new(3, 3);
    grid.get(Cell::new(0, 3));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_set_out_of_bounds_panics() {
    let mut grid = Grid::new(3, 4);
    let orb = grid.new_orb(OrbType::Fire);
    grid.set(Cell::new(3, 0), Some(orb));
}

#[test]
#[should_panic(expected = "at least 3x3")]
fn test_grid_below_minimum_size_panics() {
    Grid::new(2, 6);
}

#[test]
#[should_panic(expected = "occupied")]
fn test_spawn_onto_occupied_cell_panics() {
    let mut grid = Grid::from_rows(&["F..", "...", "..."]).unwrap();
    grid.spawn(Cell::new(0, 0), OrbType::Dark);
}

#[test]
fn test_ids_are_unique_and_never_reused() {
    let mut grid = Grid::filled(5, 6, &mut UniformGenerator::new(9));
    let first: HashSet<_> = grid.orbs().map(|o| o.id()).collect();
    assert_eq!(first.len(), 30);

    grid.clear();
    assert_eq!(grid.orb_count(), 0);
    orb_cascade::core::refill(&mut grid, &mut UniformGenerator::new(9));

    for orb in grid.orbs() {
        assert!(!first.contains(&orb.id()), "id {} reused", orb.id());
    }
}

#[test]
fn test_from_rows_errors() {
    let err = Grid::from_rows(&["FWG", "FW"]).unwrap_err();
    assert_eq!(err.code(), "too_small");

    let err = Grid::from_rows(&["FWG", "FW", "GGG"]).unwrap_err();
    assert_eq!(err.code(), "ragged_rows");

    let err = Grid::from_rows(&["FWG", "FWX", "GGG"]).unwrap_err();
    assert_eq!(err.code(), "unknown_symbol");
    assert!(err.to_string().contains("'X'"));
}

#[test]
fn test_layout_round_trip() {
    let layout = ["FWGL", "D.HF", "wglh"];
    let grid = Grid::from_rows(&layout).unwrap();
    assert_eq!(grid.to_rows(), vec!["FWGL", "D.HF", "WGLH"]);
    assert_eq!(grid.to_string(), "FWGL\nD.HF\nWGLH");
    assert_eq!(Grid::from_rows(&grid.to_rows()).unwrap().to_rows(), grid.to_rows());
}

#[test]
fn test_neighbours() {
    let grid = Grid::new(3, 4);
    assert_eq!(
        grid.neighbours(Cell::new(0, 0)).as_slice(),
        &[Cell::new(1, 0), Cell::new(0, 1)]
    );
    assert_eq!(grid.neighbours(Cell::new(1, 1)).len(), 4);
    assert_eq!(grid.neighbours(Cell::new(2, 3)).len(), 2);
}

#[test]
fn test_filled_uses_generator_row_major() {
    let mut gen = SequenceGenerator::new(vec![OrbType::Fire, OrbType::Water, OrbType::Wood]);
    let grid = Grid::filled(3, 4, &mut gen);
    assert_eq!(grid.to_rows(), vec!["FWGF", "WGFW", "GFWG"]);
    assert_eq!(gen.drawn(), 12);
}

#[test]
fn test_filled_without_matches_rerolls() {
    // A constant generator would build runs everywhere
    let mut always_fire = || OrbType::Fire;
    let grid = Grid::filled_without_matches(5, 6, &mut always_fire);
    assert!(grid.is_full());
    assert!(orb_cascade::core::detect_matches(&grid).is_empty());
    assert!(grid.check_invariants().is_ok());
}
