//! Seeded RNG for reproducible table reordering.
//!
//! Greedy selection depends on table order, so exploring alternative decks
//! means reordering the table. Doing it through a seeded ChaCha stream keeps
//! every alternative reproducible from its seed. The seed feeds ChaCha
//! directly, so a given seed gives the same order on every toolchain.
//!
//! ```
//! use deck_quota::core::TableRng;
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut b = a.clone();
//! TableRng::new(7).shuffle(&mut a);
//! TableRng::new(7).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG over ChaCha8.
#[derive(Clone, Debug)]
pub struct TableRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl TableRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
