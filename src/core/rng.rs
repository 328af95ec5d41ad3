//! Deterministic random number generation for deck shuffling.
//!
//! The same seed always produces the same shuffle, so a game can be
//! replayed or reproduced in a test from its seed alone.
//!
//! ```
//! use omlongo::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut x = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_different_seeds_shuffle_differently() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);

        let mut x: Vec<u32> = (0..52).collect();
        let mut y = x.clone();
        a.shuffle(&mut x);
        b.shuffle(&mut y);

        assert_ne!(x, y);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=10).collect();

        rng.shuffle(&mut data);
        data.sort_unstable();

        assert_eq!(data, (1..=10).collect::<Vec<_>>());
    }
}
