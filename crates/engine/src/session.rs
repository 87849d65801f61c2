//! Board session - one player's board between resets
//!
//! The session owns the grid, the cascade engine and the refill generator,
//! and enforces the single-writer rule at the input boundary: while the
//! presentation layer is still replaying a cascade, every swap and drag is
//! rejected.
//!
//! Input arrives either as single adjacent swaps or as a drag, where one
//! picked-up orb travels through several cells and swaps with each orb it
//! enters. Releasing the drag resolves the cascade.
//!
//! ```text
//! Ready --begin_drag--> Dragging --end_drag--> Replaying --finish_replay--> Ready
//!   \--resolve (after try_swap)---------------^
//! ```

use crate::cascade::{CascadeEngine, CascadeOutcome};
use crate::config::{BoardConfig, EngineConfig, FillPolicy};
use crate::core::{try_swap, Grid, OrbGenerator, UniformGenerator};
use crate::types::Cell;

/// Input phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Accepting swaps and drags
    Ready,
    /// An orb is held; `current` is where it sits now
    Dragging { origin: Cell, current: Cell },
    /// A cascade was resolved and is being animated
    Replaying,
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Cascades resolved (including ones with no combo)
    pub resolved: u32,
    /// Highest combo count of any cascade
    pub best_combo: u32,
    /// Orbs cleared over the session
    pub cleared: usize,
}

pub struct BoardSession {
    grid: Grid,
    engine: CascadeEngine,
    generator: Box<dyn OrbGenerator>,
    board: BoardConfig,
    phase: Phase,
    drag_path: Vec<Cell>,
    stats: SessionStats,
}

impl BoardSession {
    /// New session with the default uniform generator seeded from `board.seed`
    pub fn new(board: BoardConfig, engine: EngineConfig) -> Self {
        Self::with_generator(board, engine, Box::new(UniformGenerator::new(board.seed)))
    }

    /// New session with a caller-supplied generator for fill and refill
    pub fn with_generator(
        board: BoardConfig,
        engine: EngineConfig,
        mut generator: Box<dyn OrbGenerator>,
    ) -> Self {
        let grid = Self::fill(&board, generator.as_mut());
        log::info!(
            "new {}x{} board (fill: {})",
            board.rows,
            board.cols,
            board.fill_policy.as_str()
        );
        Self {
            grid,
            engine: CascadeEngine::new(engine),
            generator,
            board,
            phase: Phase::Ready,
            drag_path: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Session over an existing grid; `generator` is used for refills
    pub fn from_grid(grid: Grid, engine: EngineConfig, generator: Box<dyn OrbGenerator>) -> Self {
        let (rows, cols) = grid.dimensions();
        let board = BoardConfig {
            rows,
            cols,
            ..BoardConfig::default()
        };
        Self {
            grid,
            engine: CascadeEngine::new(engine),
            generator,
            board,
            phase: Phase::Ready,
            drag_path: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    fn fill(board: &BoardConfig, generator: &mut dyn OrbGenerator) -> Grid {
        match board.fill_policy {
            FillPolicy::Random => Grid::filled(board.rows, board.cols, generator),
            FillPolicy::NoInitialMatches => {
                Grid::filled_without_matches(board.rows, board.cols, generator)
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// True while a resolved cascade awaits `finish_replay`
    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Replaying
    }

    /// Cells visited by the held orb, starting at the pick-up cell
    pub fn drag_path(&self) -> &[Cell] {
        &self.drag_path
    }

    /// Swap two adjacent orbs outside of a drag
    ///
    /// Rejected while dragging or replaying, and for cells off the board.
    /// Call [`BoardSession::resolve`] afterwards to run the cascade.
    pub fn try_swap(&mut self, a: Cell, b: Cell) -> bool {
        if self.phase != Phase::Ready {
            log::debug!("swap {a} <-> {b} rejected: {:?}", self.phase);
            return false;
        }
        if !self.grid.is_valid(a) || !self.grid.is_valid(b) {
            log::debug!("swap {a} <-> {b} rejected: off the board");
            return false;
        }
        try_swap(&mut self.grid, a, b)
    }

    /// Pick up the orb at `cell`
    pub fn begin_drag(&mut self, cell: Cell) -> bool {
        if self.phase != Phase::Ready || !self.grid.is_valid(cell) || self.grid.is_empty(cell) {
            return false;
        }
        self.phase = Phase::Dragging {
            origin: cell,
            current: cell,
        };
        self.drag_path.clear();
        self.drag_path.push(cell);
        true
    }

    /// Move the held orb into `cell`, swapping with the orb there
    ///
    /// Only 4-adjacent targets are accepted; anything else is ignored.
    pub fn drag_to(&mut self, cell: Cell) -> bool {
        let Phase::Dragging { origin, current } = self.phase else {
            return false;
        };
        // Off-board and non-adjacent targets are never neighbours
        if !self.grid.neighbours(current).contains(&cell) {
            return false;
        }
        if !try_swap(&mut self.grid, current, cell) {
            return false;
        }
        self.phase = Phase::Dragging {
            origin,
            current: cell,
        };
        self.drag_path.push(cell);
        true
    }

    /// Release the held orb and resolve the cascade
    ///
    /// Returns `None` when no drag was active.
    pub fn end_drag(&mut self) -> Option<CascadeOutcome> {
        let Phase::Dragging { origin, current } = self.phase else {
            return None;
        };
        log::debug!(
            "drag {origin} -> {current} released after {} swaps",
            self.drag_path.len() - 1
        );
        Some(self.run_cascade())
    }

    /// Resolve the cascade from `Ready` (after [`BoardSession::try_swap`])
    pub fn resolve(&mut self) -> Option<CascadeOutcome> {
        if self.phase != Phase::Ready {
            return None;
        }
        Some(self.run_cascade())
    }

    fn run_cascade(&mut self) -> CascadeOutcome {
        self.phase = Phase::Replaying;
        let outcome = self.engine.run(&mut self.grid, self.generator.as_mut());

        self.stats.resolved += 1;
        self.stats.best_combo = self.stats.best_combo.max(outcome.combo_count);
        self.stats.cleared += outcome.removed_count();

        // Nothing to animate
        if outcome.is_empty() {
            self.phase = Phase::Ready;
        }
        outcome
    }

    /// Presentation finished animating the last outcome
    pub fn finish_replay(&mut self) {
        if self.phase == Phase::Replaying {
            self.phase = Phase::Ready;
        }
    }

    /// Fresh board with the configured fill policy; stats are kept
    pub fn reset(&mut self) {
        self.grid = Self::fill(&self.board, self.generator.as_mut());
        self.phase = Phase::Ready;
        self.drag_path.clear();
        log::info!("board reset");
    }
}

impl std::fmt::Debug for BoardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardSession")
            .field("grid", &self.grid)
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
