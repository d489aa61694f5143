//! RNG module - seedable randomness for piece spawning
//!
//! Spawning picks a shape index uniformly from the catalog and an initial
//! rotation uniformly from the four quarter turns. The source of randomness is
//! injected through [`RandomSource`] so games are reproducible from a seed and
//! tests can script exact spawns.

use crate::types::Rotation;

/// A source of uniformly distributed integers
pub trait RandomSource {
    /// Random value in [0, max). `max` is never 0.
    fn next_range(&mut self, max: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current state; a new `SimpleRng` built from it continues the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG cycle with short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Shape index and initial rotation for the next spawned piece
pub fn draw_spawn(rng: &mut impl RandomSource, catalog_len: usize) -> (usize, Rotation) {
    let index = rng.next_range(catalog_len.max(1) as u32) as usize;
    let rotation = Rotation::from_index(rng.next_range(4));
    (index, rotation)
}
