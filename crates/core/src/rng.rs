//! RNG module - shape selection sources
//!
//! The engine never reaches for a global random generator. It draws every new
//! piece from a [`ShapeSource`] it was handed, so tests can inject a fixed
//! sequence and a seed reproduces a whole game.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::ShapeKind;

/// Supplies the kind of each newly spawned piece
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<F> ShapeSource for F
where
    F: FnMut() -> ShapeKind,
{
    fn next_shape(&mut self) -> ShapeKind {
        self()
    }
}

/// Uniform choice over the seven templates backed by ChaCha8
#[derive(Debug, Clone)]
pub struct UniformPicker {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl UniformPicker {
    /// Reproducible picker: the same seed yields the same sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Picker seeded from the thread-local generator
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
            seed: None,
        }
    }

    /// Seed this picker was created with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for UniformPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ShapeSource for UniformPicker {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())]
    }
}

/// Cycles through a fixed list of kinds (deterministic games and tests)
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    kinds: Vec<ShapeKind>,
    next: usize,
}

impl ScriptedShapes {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<ShapeKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "scripted shape list must not be empty");
        Self { kinds, next: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: ShapeKind) -> Self {
        Self::new(vec![kind])
    }

    /// Number of shapes handed out so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next += 1;
        kind
    }
}
