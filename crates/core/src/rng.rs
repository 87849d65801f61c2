//! RNG module - seeded orb generation
//!
//! Provides a simple LCG for deterministic boards and the default uniform
//! orb generator built on it. The same seed always produces the same board
//! and the same refill sequence.

use crate::refill::OrbGenerator;
use crate::types::OrbType;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of a power-of-two LCG have short periods; use the high half
        (self.next_u32() >> 16) % max
    }

    /// Current RNG state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform orb generator over [`OrbType::ALL`]
///
/// This is the default refill policy.
#[derive(Debug, Clone)]
pub struct UniformGenerator {
    rng: SimpleRng,
}

impl UniformGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Current RNG state; `UniformGenerator::new(state)` continues the sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for UniformGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl OrbGenerator for UniformGenerator {
    fn next_orb(&mut self) -> OrbType {
        OrbType::ALL[self.rng.next_range(OrbType::ALL.len() as u32) as usize]
    }
}
