//! A simple pseudorandom number generator.
//!
//! Specifically, the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/> implemented against [rand_core].
//!
//! PCG(32) is the default source of (pseudo)random numbers as it is simple, fast, and has some nice supporting documentation.
//!
//! Each [context](crate::context) stores a source of rng.
//! The context is parameterised to anything which satisfies the [Rng](rand::Rng) trait, though to keep the rest of the library straightforward the rng is fixed to [MinimalPCG32] in the canonical context.
//! Still, revising or parameterising the context is all that's needed for a different source of rng.

use rand::SeedableRng;
use rand_core::{impls, RngCore};

/// State and increment.
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Any odd increment works.
        const INCREMENT: u64 = 1442695040888963407;
        Self {
            state: (u64::from_le_bytes(seed)).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = MinimalPCG32::from_seed(7_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(7_u64.to_le_bytes());

        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn seed_sensitive() {
        let mut a = MinimalPCG32::from_seed(7_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed((1_u64 << 40).to_le_bytes());

        let a_run = (0..8).map(|_| a.next_u32()).collect::<Vec<_>>();
        let b_run = (0..8).map(|_| b.next_u32()).collect::<Vec<_>>();

        assert_ne!(a_run, b_run);
    }
}
