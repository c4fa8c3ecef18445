//! RNG module - injectable piece generation
//!
//! Refill never talks to a global RNG: it draws from a [`PieceSource`]
//! supplied at initialization, so a full resolution cycle is deterministic
//! and replayable given a fixed seed (and testable with a scripted
//! sequence).
//!
//! The default source is a uniform draw over a palette, backed by a simple
//! LCG for deterministic, dependency-free randomness.

use match3_types::PieceType;

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
    ///
    /// Scales by the high bits of the state. The low bits of a
    /// modulus-2^32 LCG have short periods (bit k repeats every 2^(k+1)
    /// draws), so reducing with `%` would cycle through a fixed
    /// permutation for small `max`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// An injectable source of piece types for refill
///
/// Implementations must be deterministic functions of their own state so
/// that two engines constructed with equal sources replay identically.
pub trait PieceSource {
    /// Draw the next piece type
    fn next_type(&mut self) -> PieceType;
}

/// Uniform draw over a palette of piece types, seeded
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: SimpleRng,
    palette: Vec<PieceType>,
}

impl SeededSource {
    /// Uniform draw over the eight color kinds
    pub fn new(seed: u32) -> Self {
        Self::with_palette(seed, &PieceType::COLORS)
    }

    /// Uniform draw over a custom palette
    ///
    /// An empty palette falls back to [`PieceType::COLORS`].
    pub fn with_palette(seed: u32, palette: &[PieceType]) -> Self {
        let palette = if palette.is_empty() {
            PieceType::COLORS.to_vec()
        } else {
            palette.to_vec()
        };
        Self {
            rng: SimpleRng::new(seed),
            palette,
        }
    }
}

impl PieceSource for SeededSource {
    fn next_type(&mut self) -> PieceType {
        let idx = self.rng.next_range(self.palette.len() as u32) as usize;
        self.palette[idx]
    }
}

/// A source that replays a fixed sequence, cycling when it runs out
///
/// Used by tests to force exact board contents and to exercise the
/// bounded-retry path of refill with adversarial sequences.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<PieceType>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<PieceType>) -> Self {
        let script = if script.is_empty() {
            PieceType::COLORS.to_vec()
        } else {
            script
        };
        Self { script, pos: 0 }
    }
}

impl PieceSource for ScriptedSource {
    fn next_type(&mut self) -> PieceType {
        let kind = self.script[self.pos % self.script.len()];
        self.pos += 1;
        kind
    }
}
