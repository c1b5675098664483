//! RNG module - uniform random piece selection
//!
//! Each draw picks one of the seven kinds independently and uniformly; there is
//! no bag and no history. The random source is injectable so a seeded
//! generator replays the same piece sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Uniform piece generator over any `rand` source
#[derive(Debug, Clone)]
pub struct PieceGenerator<R = StdRng> {
    rng: R,
}

impl PieceGenerator<StdRng> {
    /// Deterministic generator for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PieceGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}
