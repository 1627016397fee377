//! RNG module - spawn selection
//!
//! Picks the index of the next piece definition, either cyclically or
//! uniformly at random. Random selection uses a small seeded LCG so a game is
//! reproducible from its seed.

use crate::types::SpawnMode;

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
        // Low LCG bits cycle with short periods; use the high half.
        (self.next_u32() >> 16) % max
    }
}

/// Chooses which piece definition spawns next
#[derive(Debug, Clone)]
pub struct SpawnSelector {
    mode: SpawnMode,
    count: u32,
    seed: u32,
    next_index: u32,
    rng: SimpleRng,
}

impl SpawnSelector {
    /// Create a selector over `count` definitions. `count` must be non-zero.
    pub fn new(mode: SpawnMode, count: usize, seed: u32) -> Self {
        debug_assert!(count > 0, "spawn selector needs at least one definition");
        Self {
            mode,
            count: count.max(1) as u32,
            seed,
            next_index: 0,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn mode(&self) -> SpawnMode {
        self.mode
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Peek at the next index without consuming it
    pub fn peek(&self) -> usize {
        self.clone().draw()
    }

    /// Draw the next definition index
    pub fn draw(&mut self) -> usize {
        match self.mode {
            SpawnMode::Cyclic => {
                let index = self.next_index;
                self.next_index = (self.next_index + 1) % self.count;
                index as usize
            }
            SpawnMode::Random => self.rng.next_range(self.count) as usize,
        }
    }

    /// Rewind to the state right after construction
    pub fn reset(&mut self) {
        self.next_index = 0;
        self.rng = SimpleRng::new(self.seed);
    }
}
