//! LDPC belief propagation decoders.
//!
//! This module provides a belief propagation decoder over the Tanner graph of
//! a code, using a flooding message passing schedule and generic over the
//! check node arithmetic. Two arithmetics are available: sum-product and
//! min-sum.
//!
//! The decoders take one received sample per codeword bit. A bit 0 is
//! transmitted as `+1.0` and a bit 1 as `-1.0` (see
//! [`bits_to_signal`](crate::simulation::channel::bits_to_signal)). Decoding
//! stops as soon as the hard decision satisfies all the parity checks.

use std::collections::TryReserveError;
use thiserror::Error;

pub mod arithmetic;
pub mod factory;
pub mod flooding;
pub mod tanner;

pub use flooding::Decoder;

/// Flooding decoder with sum-product arithmetic.
pub type SumProductDecoder = Decoder<arithmetic::SumProduct>;

/// Flooding decoder with min-sum arithmetic.
pub type MinSumDecoder = Decoder<arithmetic::MinSum>;

/// LDPC decoder error.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// The decoder state could not be allocated.
    #[error("could not allocate decoder: {0}")]
    Allocation(#[from] TryReserveError),
    /// The codeword length does not allow packing it into bytes.
    #[error("codeword length {0} is not a multiple of 8")]
    NotByteAligned(usize),
}

/// LDPC decoder output.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DecoderOutput {
    /// Decoded codeword.
    ///
    /// Contains the hard decision bits of the decoded codeword.
    pub codeword: Vec<u8>,
    /// Number of iterations.
    ///
    /// Number of iterations used in decoding, counting from one.
    pub iterations: usize,
}
