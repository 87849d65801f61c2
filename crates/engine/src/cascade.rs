//! Cascade engine - detect, remove, collapse, refill, repeat
//!
//! One cascade starts after a player swap and runs until the board is stable:
//!
//! ```text
//! Idle -> Detecting -> (Resolving -> Detecting)* -> Idle
//! ```
//!
//! `Resolving` is removal, gravity and refill, always in that order. Every
//! `Detecting -> Resolving` cycle is one combo and produces one
//! [`Transition`]. The whole cascade is computed synchronously; presentation
//! layers replay the returned log at their own pace.
//!
//! The engine borrows the grid mutably for the duration of a cascade, so no
//! other code can observe or modify it mid-run.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::{apply_gravity, detect_matches, refill, runs, Grid, OrbGenerator};
use crate::core::{OrbMove, OrbSpawn, RemovedOrb};

/// Cascade state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeState {
    /// No cascade in progress
    Idle,
    /// Next step scans the board for runs
    Detecting,
    /// Removal, gravity and refill are being applied
    Resolving,
}

/// One combo of a cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// 1-based combo number within the cascade
    pub combo: u32,
    /// Cleared orbs, row-major
    pub removed: Vec<RemovedOrb>,
    /// Gravity moves in the order performed
    pub moves: Vec<OrbMove>,
    /// New orbs in fill order
    pub spawned: Vec<OrbSpawn>,
}

/// Result of a full cascade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub combo_count: u32,
    pub transitions: Vec<Transition>,
    /// True when the cascade stopped at `max_combos` with runs still on the board
    pub truncated: bool,
}

impl CascadeOutcome {
    /// True when the board was already stable
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Total orbs cleared over all combos
    pub fn removed_count(&self) -> usize {
        self.transitions.iter().map(|t| t.removed.len()).sum()
    }
}

/// Drives cascades over a grid
#[derive(Debug, Clone, Default)]
pub struct CascadeEngine {
    config: EngineConfig,
}

impl CascadeEngine {
    /// # Panics
    ///
    /// Panics if `config.max_combos` is 0; such an engine could never resolve
    /// a run.
    pub fn new(config: EngineConfig) -> Self {
        assert!(config.max_combos >= 1, "max_combos must be at least 1");
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the board until no run remains
    ///
    /// # Examples
    ///
    /// ```
    /// use orb_cascade_engine::CascadeEngine;
    /// use orb_cascade_engine::core::{Grid, SequenceGenerator};
    /// use orb_cascade_engine::types::OrbType;
    ///
    /// let mut grid = Grid::from_rows(&["FFF", "FFF", "FFF"]).unwrap();
    /// let mut gen = SequenceGenerator::new(vec![OrbType::Water, OrbType::Wood]);
    ///
    /// let outcome = CascadeEngine::default().run(&mut grid, &mut gen);
    /// assert_eq!(outcome.combo_count, 1);
    /// assert_eq!(grid.to_string(), "WGW\nGWG\nWGW");
    /// ```
    pub fn run<G: OrbGenerator + ?Sized>(&self, grid: &mut Grid, generator: &mut G) -> CascadeOutcome {
        let mut steps = self.steps(grid, generator);
        let transitions: Vec<Transition> = steps.by_ref().collect();
        CascadeOutcome {
            combo_count: steps.combo_count(),
            truncated: steps.truncated(),
            transitions,
        }
    }

    /// Lazy cascade: yields one transition per combo
    ///
    /// The grid reflects every yielded transition by the time it is returned.
    pub fn steps<'a, G: OrbGenerator + ?Sized>(
        &self,
        grid: &'a mut Grid,
        generator: &'a mut G,
    ) -> CascadeSteps<'a, G> {
        CascadeSteps {
            grid,
            generator,
            state: CascadeState::Idle,
            combo: 0,
            max_combos: self.config.max_combos,
            truncated: false,
            finished: false,
        }
    }
}

/// Iterator over the combos of one cascade
pub struct CascadeSteps<'a, G: OrbGenerator + ?Sized> {
    grid: &'a mut Grid,
    generator: &'a mut G,
    state: CascadeState,
    combo: u32,
    max_combos: u32,
    truncated: bool,
    finished: bool,
}

impl<G: OrbGenerator + ?Sized> CascadeSteps<'_, G> {
    pub fn state(&self) -> CascadeState {
        self.state
    }

    /// Combos resolved so far
    pub fn combo_count(&self) -> u32 {
        self.combo
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Read-only view of the grid between steps
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    fn finish(&mut self) {
        self.state = CascadeState::Idle;
        self.finished = true;
    }
}

impl<G: OrbGenerator + ?Sized> Iterator for CascadeSteps<'_, G> {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        if self.finished {
            return None;
        }

        self.state = CascadeState::Detecting;
        let matches = detect_matches(self.grid);
        if matches.is_empty() {
            log::debug!("cascade settled after {} combos", self.combo);
            self.finish();
            return None;
        }
        if self.combo >= self.max_combos {
            log::warn!(
                "cascade stopped at {} combos with {} orbs still matched",
                self.combo,
                matches.len()
            );
            self.truncated = true;
            self.finish();
            return None;
        }

        self.state = CascadeState::Resolving;
        self.combo += 1;
        log::debug!("combo {}: {} orbs matched", self.combo, matches.len());
        if log::log_enabled!(log::Level::Trace) {
            for run in runs(self.grid) {
                log::trace!("combo {}: {run}", self.combo);
            }
        }

        let removed = self.grid.remove_all(&matches);
        let moves = apply_gravity(self.grid);
        let spawned = refill(self.grid, self.generator);
        debug_assert!(self.grid.check_invariants().is_ok());
        debug_assert!(self.grid.is_full());

        self.state = CascadeState::Detecting;
        Some(Transition {
            combo: self.combo,
            removed,
            moves,
            spawned,
        })
    }
}
