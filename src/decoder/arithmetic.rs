//! LDPC decoder arithmetic.
//!
//! This module contains the trait [`DecoderArithmetic`], which defines the
//! check node update rule used by a belief propagation LDPC decoder, and
//! implementors of that trait. The LDPC decoder [`Decoder`](super::Decoder) is
//! generic over the `DecoderArithmetic` trait, so it can be used to obtain
//! monomorphized implementations for different arithmetic rules.
//!
//! Messages are LLRs in `f32`. A positive value favours the bit 0.
//!
//! # References
//!
//! [1] Sarah J. Johnson, Iterative Error Correction: Turbo, Low-Density
//! Parity-Check and Repeat-Accumulate Codes. Cambridge University Press. June
//! 2012.

use super::tanner::Edge;

/// Variable to check messages are clamped to `[-Q_CLAMP, Q_CLAMP]` before
/// they enter a check node update.
pub const Q_CLAMP: f32 = 20.0;

/// LDPC decoder arithmetic.
///
/// This trait models the arithmetic rules for a belief propagation LDPC
/// decoder: how the received samples are turned into channel LLRs, and how
/// the check node messages are computed.
///
/// The methods in this trait depend on `&mut self` so that the decoder
/// arithmetic object can keep scratch buffers between calls.
pub trait DecoderArithmetic: std::fmt::Debug + Send {
    /// Converts a received sample into a channel LLR.
    fn channel_llr(&self, received: f32) -> f32;

    /// Updates the check to variable messages of a check node.
    ///
    /// This function is called with the edges of one check node. It must set
    /// the `r` message of each edge using the `q` messages of the other edges
    /// of the check node.
    fn update_check(&mut self, edges: &mut [Edge]);
}

fn clamp_q(q: f32) -> f32 {
    q.clamp(-Q_CLAMP, Q_CLAMP)
}

/// Sum-product arithmetic.
///
/// The check node messages are computed with the `tanh` rule described in
/// [1]. With `t(x) = tanh(x / 2)`, the message for each edge is
/// `ln((1 + P) / (1 - P))`, where `P` is the product of `t(q)` over the other
/// edges. The values of `t` are saturated to `[-T_MAX, T_MAX]`, so that
/// messages stay finite.
///
/// The received samples are assumed to be BPSK symbols with unit noise
/// variance, so the channel LLR is twice the received sample.
#[derive(Debug, Clone, Default)]
pub struct SumProduct {
    t: Vec<f32>,
}

impl SumProduct {
    /// Saturation value for `tanh(q / 2)`.
    pub const T_MAX: f32 = 0.9999;

    /// Creates a new [`SumProduct`] decoder arithmetic object.
    pub fn new() -> SumProduct {
        SumProduct::default()
    }

    fn t(q: f32) -> f32 {
        (0.5 * clamp_q(q)).tanh().clamp(-Self::T_MAX, Self::T_MAX)
    }
}

impl DecoderArithmetic for SumProduct {
    fn channel_llr(&self, received: f32) -> f32 {
        2.0 * received
    }

    fn update_check(&mut self, edges: &mut [Edge]) {
        self.t.clear();
        self.t.extend(edges.iter().map(|e| Self::t(e.q)));
        for (j, edge) in edges.iter_mut().enumerate() {
            let product = self
                .t
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != j)
                .map(|(_, &t)| t)
                .product::<f32>();
            edge.r = ((1.0 + product) / (1.0 - product)).ln();
        }
    }
}

/// Min-sum arithmetic.
///
/// The check node message for each edge has the product of the signs and the
/// minimum of the magnitudes of the `q` messages of the other edges. The
/// minimum is started at [`MinSum::SEED`]. The sign of zero is positive.
///
/// The received samples are used directly as channel LLRs.
#[derive(Debug, Clone, Default)]
pub struct MinSum {
    q: Vec<f32>,
}

impl MinSum {
    /// Initial value of the minimum.
    pub const SEED: f32 = 1000.0;

    /// Creates a new [`MinSum`] decoder arithmetic object.
    pub fn new() -> MinSum {
        MinSum::default()
    }
}

fn sign(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

impl DecoderArithmetic for MinSum {
    fn channel_llr(&self, received: f32) -> f32 {
        received
    }

    fn update_check(&mut self, edges: &mut [Edge]) {
        self.q.clear();
        self.q.extend(edges.iter().map(|e| clamp_q(e.q)));
        for (j, edge) in edges.iter_mut().enumerate() {
            edge.r = self
                .q
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != j)
                .fold(Self::SEED, |acc, (_, &q)| {
                    sign(q) * sign(acc) * q.abs().min(acc.abs())
                });
        }
    }
}
