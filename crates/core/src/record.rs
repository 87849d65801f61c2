//! Records of individual board mutations.
//!
//! These are the building blocks of a cascade transition: what was removed,
//! which orbs fell where, and what was spawned. They carry the orb id so a
//! replayer can follow one orb across a whole cascade.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, OrbId, OrbType};

/// An orb cleared from the board by a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemovedOrb {
    pub id: OrbId,
    pub kind: OrbType,
    pub cell: Cell,
}

/// An orb moved by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrbMove {
    pub id: OrbId,
    pub kind: OrbType,
    pub from: Cell,
    pub to: Cell,
}

impl OrbMove {
    /// Rows fallen
    pub fn distance(&self) -> usize {
        self.to.row - self.from.row
    }
}

/// A new orb placed by refill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrbSpawn {
    pub id: OrbId,
    pub kind: OrbType,
    pub cell: Cell,
}
