//! Cascade engine crate - turns a swapped board into a replayable log
//!
//! Built on the pure board operations in `orb-cascade-core`:
//!
//! - [`cascade`]: the `Idle -> Detecting -> Resolving` state machine, combo
//!   counting and the [`Transition`] log
//! - [`session`]: a player's board with the processing guard and drag input
//! - [`config`]: engine/board configuration with environment overrides
//!
//! # Example
//!
//! ```
//! use orb_cascade_engine::{BoardSession, BoardConfig, EngineConfig, FillPolicy};
//!
//! let board = BoardConfig { fill_policy: FillPolicy::NoInitialMatches, ..BoardConfig::default() };
//! let mut session = BoardSession::new(board, EngineConfig::default());
//!
//! // A freshly filled board needs a swap before anything clears
//! let outcome = session.resolve().unwrap();
//! assert_eq!(outcome.combo_count, 0);
//! assert!(!session.is_processing());
//! ```

pub mod cascade;
pub mod config;
pub mod session;

pub use orb_cascade_core as core;
pub use orb_cascade_types as types;

pub use cascade::{CascadeEngine, CascadeOutcome, CascadeState, CascadeSteps, Transition};
pub use config::{BoardConfig, ConfigError, EngineConfig, FillPolicy};
pub use session::{BoardSession, Phase, SessionStats};
