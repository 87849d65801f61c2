//! Core board logic module - pure, deterministic, and testable
//!
//! This module contains the board model and every board mutation the cascade
//! engine is built from. It has **zero dependencies** on UI, input devices, or
//! I/O, making it:
//!
//! - **Deterministic**: Same generator seed produces identical boards and logs
//! - **Testable**: Every step is a plain function over a [`Grid`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: R x C board of orbs with the orb/cell location invariant
//! - [`matcher`]: Run detection (three or more in a row or column)
//! - [`gravity`]: Per-column collapse with a move log
//! - [`refill`]: Orb generators and refilling of empty cells
//! - [`rng`]: Seeded LCG and the default uniform generator
//! - [`swap`]: Adjacent swaps and swap hints
//! - [`record`]: Removal/move/spawn records shared by gravity, refill and the engine
//!
//! # Example
//!
//! ```
//! use orb_cascade_core::{apply_gravity, detect_matches, refill, Grid, SequenceGenerator};
//! use orb_cascade_types::OrbType;
//!
//! let mut grid = Grid::from_rows(&["FWG", "FWG", "FGW"]).unwrap();
//!
//! // The left column is a vertical run of fire
//! let matches = detect_matches(&grid);
//! assert_eq!(matches.len(), 3);
//!
//! grid.remove_all(&matches);
//! assert!(apply_gravity(&mut grid).is_empty()); // nothing above the cleared column
//!
//! let mut gen = SequenceGenerator::new(vec![OrbType::Heal, OrbType::Dark]);
//! assert_eq!(refill(&mut grid, &mut gen).len(), 3);
//! assert!(grid.is_full());
//! ```

pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod record;
pub mod refill;
pub mod rng;
pub mod swap;

pub use orb_cascade_types as types;

// Re-export commonly used types for convenience
pub use gravity::{apply_gravity, is_settled};
pub use grid::{Grid, GridError, Orb, ParseGridError};
pub use matcher::{detect_matches, runs, scan_line, MatchSet, Run};
pub use record::{OrbMove, OrbSpawn, RemovedOrb};
pub use refill::{refill, OrbGenerator, SequenceGenerator};
pub use rng::{SimpleRng, UniformGenerator};
pub use swap::{matching_swaps, try_swap};
