//! Refill - populating empty cells with new orbs
//!
//! New orb types come from an injected [`OrbGenerator`], so tests can script
//! exact sequences while play uses the seeded [`UniformGenerator`].
//!
//! [`UniformGenerator`]: crate::rng::UniformGenerator

use crate::grid::Grid;
use crate::record::OrbSpawn;
use crate::types::OrbType;

/// Source of orb types for initial fill and refill
///
/// Generators are assumed total: `next_orb` always returns a type.
pub trait OrbGenerator {
    fn next_orb(&mut self) -> OrbType;
}

impl<F> OrbGenerator for F
where
    F: FnMut() -> OrbType,
{
    fn next_orb(&mut self) -> OrbType {
        self()
    }
}

/// Cycles through a fixed list of orb types
///
/// # Examples
///
/// ```
/// use orb_cascade_core::{OrbGenerator, SequenceGenerator};
/// use orb_cascade_core::types::OrbType;
///
/// let mut gen = SequenceGenerator::new(vec![OrbType::Fire, OrbType::Dark]);
/// assert_eq!(gen.next_orb(), OrbType::Fire);
/// assert_eq!(gen.next_orb(), OrbType::Dark);
/// assert_eq!(gen.next_orb(), OrbType::Fire);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    kinds: Vec<OrbType>,
    pos: usize,
}

impl SequenceGenerator {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: Vec<OrbType>) -> Self {
        assert!(!kinds.is_empty(), "sequence generator needs at least one orb type");
        Self { kinds, pos: 0 }
    }

    /// Number of orbs drawn so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl OrbGenerator for SequenceGenerator {
    fn next_orb(&mut self) -> OrbType {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos += 1;
        kind
    }
}

/// Fill every empty cell, row by row then column by column
///
/// Returns the spawned orbs in fill order.
pub fn refill<G: OrbGenerator + ?Sized>(grid: &mut Grid, generator: &mut G) -> Vec<OrbSpawn> {
    let spawned: Vec<OrbSpawn> = grid
        .empty_cells()
        .into_iter()
        .map(|cell| {
            let kind = generator.next_orb();
            let id = grid.spawn(cell, kind);
            OrbSpawn { id, kind, cell }
        })
        .collect();

    log::trace!("refill spawned {} orbs", spawned.len());
    spawned
}
