//! Random generation of 256-bit integers.

use super::U256;
use crate::word::Word;
use rand_core::RngCore;

impl U256 {
    /// Generate a uniformly random [`U256`].
    pub fn random(rng: &mut impl RngCore) -> Self {
        let mut words = [0 as Word; 4];

        for word in words.iter_mut() {
            *word = rng.next_u64();
        }

        Self::from_words(words)
    }
}
