//! # Reproducible random functions
//!
//! This module uses the [`ChaCha8Rng`] RNG from the [rand_chacha] crate
//! to achieve reproducible random number generation in tests and
//! simulations.
//!
//! # Examples
//! ```
//! # use ldpc_80211::rand::*;
//! let mut rng = Rng::seed_from_u64(42);
//! let bits = random_bits(&mut rng, 16);
//! assert_eq!(bits.len(), 16);
//! assert!(bits.iter().all(|&b| b <= 1));
//! ```
use rand_chacha::ChaCha8Rng;
pub use rand_chacha::rand_core::SeedableRng;
pub use rand_core::RngCore;

/// The RNG used throughout this crate for simulations and randomized tests.
pub type Rng = ChaCha8Rng;

/// Generates `len` uniformly distributed unpacked bits.
pub fn random_bits<R: RngCore>(rng: &mut R, len: usize) -> Vec<u8> {
    use rand::Rng as _;
    (0..len).map(|_| u8::from(rng.gen::<bool>())).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reproducible() {
        let a = random_bits(&mut Rng::seed_from_u64(7), 1000);
        let b = random_bits(&mut Rng::seed_from_u64(7), 1000);
        assert_eq!(a, b);
        let ones = a.iter().filter(|&&x| x == 1).count();
        assert!((400..600).contains(&ones));
    }
}
