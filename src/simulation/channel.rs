//! Channel simulation.
//!
//! This module contains the BPSK mapping used by the decoders and simple
//! channel impairments: bit flips, uniform noise and AWGN.

use rand::{distributions::Uniform, seq::index, Rng};
use rand_distr::{Distribution, Normal};
use std::ops::Range;

/// Maps unpacked bits to BPSK symbols.
///
/// The bit 0 is mapped to `+1.0` and the bit 1 to `-1.0`.
pub fn bits_to_signal(bits: &[u8]) -> Vec<f32> {
    bits.iter()
        .map(|&b| if b == 0 { 1.0 } else { -1.0 })
        .collect()
}

/// Flips bits at random positions.
///
/// Exactly `count` distinct positions, chosen uniformly inside `range`, are
/// flipped.
///
/// # Panics
///
/// Panics if `count` is larger than the length of `range` or if `range` is
/// not inside `bits`.
pub fn flip_bits<R: Rng>(rng: &mut R, bits: &mut [u8], range: Range<usize>, count: usize) {
    let bits = &mut bits[range.clone()];
    for j in index::sample(rng, range.len(), count) {
        bits[j] ^= 1;
    }
}

/// Uniform noise.
///
/// Adds noise uniformly distributed in `[-level / 2, level / 2)`.
#[derive(Debug, Clone)]
pub struct UniformNoise {
    distr: Uniform<f32>,
    level: f32,
}

impl UniformNoise {
    /// Creates a new uniform noise source with peak-to-peak amplitude `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is negative.
    pub fn new(level: f32) -> UniformNoise {
        assert!(level >= 0.0);
        UniformNoise {
            distr: Uniform::new(0.0, 1.0),
            level,
        }
    }

    /// Adds noise to a sequence of symbols.
    pub fn add_noise<R: Rng>(&self, rng: &mut R, symbols: &mut [f32]) {
        for x in symbols.iter_mut() {
            *x += (self.distr.sample(rng) - 0.5) * self.level;
        }
    }
}

/// AWGN channel simulation.
///
/// This struct is used to add AWGN to symbols.
#[derive(Debug, Clone)]
pub struct AwgnChannel {
    distr: Normal<f32>,
}

impl AwgnChannel {
    /// Creates a new AWGN channel.
    ///
    /// The channel noise follows a (real) normal distribution with mean zero
    /// and standard deviation sigma.
    ///
    /// # Panics
    ///
    /// This function panics if `noise_sigma` is not a non-negative finite
    /// number.
    pub fn new(noise_sigma: f32) -> AwgnChannel {
        assert!(noise_sigma >= 0.0);
        match Normal::new(0.0, noise_sigma) {
            Ok(distr) => AwgnChannel { distr },
            Err(e) => panic!("invalid noise sigma {noise_sigma}: {e}"),
        }
    }

    /// Adds noise to a sequence of symbols.
    ///
    /// The noise is added in-place to the slice `symbols`. An [Rng] is used as
    /// source of randomness.
    pub fn add_noise<R: Rng>(&self, rng: &mut R, symbols: &mut [f32]) {
        for x in symbols.iter_mut() {
            *x += self.distr.sample(rng);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rand::{Rng as ChaCha, SeedableRng};

    #[test]
    fn signal() {
        assert_eq!(bits_to_signal(&[0, 1, 1, 0]), [1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn flips() {
        let mut rng = ChaCha::seed_from_u64(0);
        for count in 0..=10 {
            let mut bits = vec![0; 100];
            flip_bits(&mut rng, &mut bits, 20..30, count);
            assert_eq!(bits.iter().filter(|&&b| b == 1).count(), count);
            assert!(bits[..20].iter().chain(&bits[30..]).all(|&b| b == 0));
        }
    }

    #[test]
    #[should_panic]
    fn too_many_flips() {
        let mut rng = ChaCha::seed_from_u64(0);
        flip_bits(&mut rng, &mut [0; 10], 0..5, 6);
    }

    #[test]
    fn uniform_noise_bounds() {
        let mut rng = ChaCha::seed_from_u64(1);
        let noise = UniformNoise::new(0.03);
        let mut symbols = vec![1.0; 1000];
        noise.add_noise(&mut rng, &mut symbols);
        assert!(symbols.iter().all(|&x| (x - 1.0).abs() <= 0.0151));
        assert!(symbols.iter().any(|&x| x != 1.0));
    }

    #[test]
    fn build_awgn() {
        let _channel = AwgnChannel::new(0.2);
    }

    #[test]
    #[should_panic]
    fn negative_noise_sigma() {
        let _channel = AwgnChannel::new(-3.5);
    }

    #[test]
    fn zero_noise_sigma() {
        let channel = AwgnChannel::new(0.0);
        let mut rng = ChaCha::seed_from_u64(2);
        let mut symbols = vec![1.0; 1024];
        let symbols_orig = symbols.clone();
        channel.add_noise(&mut rng, &mut symbols);
        assert_eq!(&symbols, &symbols_orig);
    }
}
