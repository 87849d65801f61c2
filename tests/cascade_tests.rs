//! Cascade tests - full detect/remove/collapse/refill cycles

use std::collections::HashSet;

use orb_cascade::core::{detect_matches, Grid, SequenceGenerator, UniformGenerator};
use orb_cascade::engine::{CascadeEngine, EngineConfig};
use orb_cascade::types::{Cell, OrbType};

fn alternating(a: OrbType, b: OrbType) -> SequenceGenerator {
    SequenceGenerator::new(vec![a, b])
}

#[test]
fn test_uniform_board_clears_in_one_combo() {
    let mut grid = Grid::from_rows(&["FFF", "FFF", "FFF"]).unwrap();
    let mut gen = alternating(OrbType::Heal, OrbType::Dark);

    let outcome = CascadeEngine::default().run(&mut grid, &mut gen);

    assert_eq!(outcome.combo_count, 1);
    let t = &outcome.transitions[0];
    assert_eq!(t.removed.len(), 9);
    assert!(t.moves.is_empty());
    assert_eq!(t.spawned.len(), 9);
    assert!(grid.is_full());
    assert_eq!(grid.to_rows(), vec!["HDH", "DHD", "HDH"]);
}

#[test]
fn test_falling_orb_starts_second_combo() {
    // Column 0 clears, water drops into row 3 next to two waters
    let mut grid = Grid::from_rows(&["WGD", "FDG", "FGD", "FWW"]).unwrap();
    let water = grid.get(Cell::new(0, 0)).unwrap().id();
    let mut gen = alternating(OrbType::Heal, OrbType::Light);

    let outcome = CascadeEngine::default().run(&mut grid, &mut gen);

    assert_eq!(outcome.combo_count, 2);
    assert!(!outcome.truncated);

    let first = &outcome.transitions[0];
    assert_eq!(
        first.removed.iter().map(|r| r.cell).collect::<Vec<_>>(),
        vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)]
    );
    assert_eq!(first.moves.len(), 1);
    assert_eq!(first.moves[0].id, water);
    assert_eq!(first.moves[0].to, Cell::new(3, 0));

    let second = &outcome.transitions[1];
    assert_eq!(second.combo, 2);
    assert!(second.removed.iter().all(|r| r.kind == OrbType::Water));
    assert!(second.removed.iter().any(|r| r.id == water));
    assert_eq!(second.moves.len(), 9);
    assert!(second.spawned.iter().all(|s| s.cell.row == 0));

    assert_eq!(grid.to_rows(), vec!["LHL", "HGD", "LDG", "HGD"]);
    assert!(detect_matches(&grid).is_empty());
}

#[test]
fn test_stable_board_untouched() {
    let mut grid = Grid::from_rows(&["FWG", "WGF", "GFW"]).unwrap();
    let before = grid.clone();
    let outcome = CascadeEngine::default().run(&mut grid, &mut alternating(OrbType::Heal, OrbType::Dark));
    assert!(outcome.is_empty());
    assert_eq!(outcome.combo_count, 0);
    assert_eq!(grid, before);
}

#[test]
fn test_runaway_cascade_is_truncated() {
    let mut grid = Grid::from_rows(&["FFF", "FFF", "FFF"]).unwrap();
    let engine = CascadeEngine::new(EngineConfig { max_combos: 3 });
    let outcome = engine.run(&mut grid, &mut || OrbType::Fire);

    assert!(outcome.truncated);
    assert_eq!(outcome.combo_count, 3);
    assert_eq!(outcome.transitions.len(), 3);
    assert!(!detect_matches(&grid).is_empty());
}

#[test]
fn test_same_seed_same_cascade() {
    let play = || {
        let mut grid = Grid::filled(6, 7, &mut UniformGenerator::new(2024));
        let outcome = CascadeEngine::default().run(&mut grid, &mut UniformGenerator::new(77));
        (grid, outcome)
    };
    let (grid_a, outcome_a) = play();
    let (grid_b, outcome_b) = play();
    assert_eq!(grid_a, grid_b);
    assert_eq!(outcome_a, outcome_b);
}

#[test]
fn test_every_combo_refills_what_it_removed() {
    for seed in 1..30 {
        let mut grid = Grid::filled(5, 6, &mut UniformGenerator::new(seed));
        let outcome = CascadeEngine::default().run(&mut grid, &mut UniformGenerator::new(seed + 1000));

        let mut spawned_ids = HashSet::new();
        for (i, t) in outcome.transitions.iter().enumerate() {
            assert_eq!(t.combo as usize, i + 1);
            assert!(!t.removed.is_empty());
            assert_eq!(t.spawned.len(), t.removed.len(), "seed {seed} combo {}", t.combo);
            for s in &t.spawned {
                assert!(spawned_ids.insert(s.id), "seed {seed}: id {} spawned twice", s.id);
            }
        }
        assert_eq!(outcome.combo_count as usize, outcome.transitions.len());
        assert!(grid.is_full());
        assert!(grid.check_invariants().is_ok());
        assert!(outcome.truncated || detect_matches(&grid).is_empty());
    }
}

#[test]
fn test_steps_can_be_replayed_lazily() {
    let mut grid = Grid::from_rows(&["WGD", "FDG", "FGD", "FWW"]).unwrap();
    let engine = CascadeEngine::default();
    let mut gen = alternating(OrbType::Heal, OrbType::Light);

    let mut steps = engine.steps(&mut grid, &mut gen);
    let first = steps.next().unwrap();
    assert_eq!(first.combo, 1);
    // Board after combo 1 still holds the water run
    assert_eq!(steps.grid().to_rows()[3], "WWW");
    let second = steps.next().unwrap();
    assert_eq!(second.combo, 2);
    assert!(steps.next().is_none());
    assert_eq!(steps.combo_count(), 2);
}
