//! Orb Cascade (workspace facade crate).
//!
//! This package exposes `orb_cascade::{core,engine,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use orb_cascade_core as core;
pub use orb_cascade_engine as engine;
pub use orb_cascade_types as types;
