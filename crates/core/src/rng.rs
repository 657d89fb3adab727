//! RNG module - seeded random source and piece randomizers
//!
//! All randomness in a session (next piece, garbage gaps, AI jitter) comes from [`SimpleRng`],
//! a small LCG, so a session is reproducible for a given seed on one machine.
//!
//! Two piece randomizers are available:
//! - [`Randomizer::Uniform`]: every draw picks one of the seven kinds independently
//! - [`Randomizer::SevenBag`]: draws cycle through shuffled bags containing each kind once

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

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
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [-amplitude, amplitude)
    pub fn next_symmetric(&mut self, amplitude: f32) -> f32 {
        (self.next_f32() * 2.0 - 1.0) * amplitude
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomizer {
    /// Independent uniform draw among the seven kinds
    #[default]
    Uniform,
    /// Shuffled bags of seven
    SevenBag,
}

/// Piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    randomizer: Randomizer,
    /// Current bag of pieces (seven-bag only)
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        Self {
            randomizer,
            bag: PieceKind::ALL,
            // Empty bag: the first seven-bag draw shuffles a fresh one.
            bag_index: PieceKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            Randomizer::SevenBag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, Randomizer::Uniform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(10) < 10);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_symmetric_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            let v = rng.next_symmetric(0.2);
            assert!((-0.2..0.2).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_uniform_queue_produces_every_kind() {
        let mut queue = PieceQueue::new(1, Randomizer::Uniform);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let k = queue.draw();
            let i = PieceKind::ALL.iter().position(|&p| p == k).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s), "uniform draws missed a kind: {seen:?}");
    }

    #[test]
    fn test_seven_bag_draws_all_seven() {
        let mut queue = PieceQueue::new(1, Randomizer::SevenBag);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(queue.draw());
        }

        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceQueue::new(42, Randomizer::Uniform);
        let mut b = PieceQueue::new(42, Randomizer::Uniform);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
