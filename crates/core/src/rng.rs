//! RNG module - injectable randomness for piece generation
//!
//! Piece draws are uniform and independent (shape first, then color). The engine
//! only sees the [`Randomizer`] capability, so callers choose the source:
//!
//! - [`SimpleRng`]: seeded LCG, identical sequences for identical seeds
//! - `rand::rngs::StdRng`: entropy-seeded or `seed_from_u64`
//! - [`ScriptedRandomizer`]: replays fixed picks, for tests and demos

use rand::rngs::StdRng;
use rand::Rng;

use crate::types::{Color, ShapeKind};

/// Source of uniform indices
pub trait Randomizer {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: Randomizer + ?Sized> Randomizer for Box<R> {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

impl Randomizer for StdRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of a power-of-two LCG have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current generator state (re-seeding with it resumes the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Randomizer for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

/// Replays a fixed list of picks, wrapping around when exhausted.
///
/// Each pick is reduced modulo the requested range, so an empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomizer {
    picks: Vec<usize>,
    pos: usize,
}

impl ScriptedRandomizer {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, pos: 0 }
    }

    /// Script that yields exactly these pieces, in order, then repeats them
    pub fn for_pieces(pieces: &[(ShapeKind, Color)]) -> Self {
        let picks = pieces
            .iter()
            .flat_map(|&(kind, color)| [shape_index(kind), color_index(color)])
            .collect();
        Self::new(picks)
    }

    /// Number of picks consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl Randomizer for ScriptedRandomizer {
    fn next_index(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        pick % len.max(1)
    }
}

/// Position of a kind in [`ShapeKind::ALL`]
pub fn shape_index(kind: ShapeKind) -> usize {
    ShapeKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default()
}

/// Position of a color in [`Color::ALL`]
pub fn color_index(color: Color) -> usize {
    (color.id() - 1) as usize
}
