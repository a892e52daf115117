//! LDPC decoder with flooding schedule.
//!
//! This module implements a generic belief propagation LDPC decoder with a
//! flooding message passing schedule. In each iteration all the check nodes
//! are updated, then all the variable nodes, and then the hard decision is
//! checked against the parity check equations.

use super::{arithmetic::DecoderArithmetic, tanner::TannerGraph, DecoderOutput, Error};
use crate::{bits::bits_to_bytes_be, codes::Code, table::Table};

/// LDPC belief propagation flooding decoder.
#[derive(Debug, Clone)]
pub struct Decoder<A: DecoderArithmetic> {
    code: &'static Code,
    table: Table,
    arithmetic: A,
    graph: TannerGraph,
    channel: Vec<f32>,
    bits: Vec<u8>,
}

impl<A: DecoderArithmetic> Decoder<A> {
    /// Creates a new flooding LDPC decoder for a code.
    ///
    /// The Tanner graph is built from the full parity check matrix in the
    /// decoder's [`Table`].
    pub fn new(code: &'static Code, arithmetic: A) -> Result<Self, Error> {
        let table = Table::new(code);
        let graph = TannerGraph::new(&table.h)?;
        let n = graph.num_variables();
        let mut channel = Vec::new();
        channel.try_reserve_exact(n)?;
        let mut bits = Vec::new();
        bits.try_reserve_exact(n)?;
        bits.resize(n, 0);
        Ok(Decoder {
            code,
            table,
            arithmetic,
            graph,
            channel,
            bits,
        })
    }

    /// Returns the code used by the decoder.
    pub fn code(&self) -> &'static Code {
        self.code
    }

    /// Returns the code tables owned by the decoder.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Decodes a codeword.
    ///
    /// The parameters are the received samples for the codeword and the
    /// maximum number of iterations to perform. If decoding is successful, the
    /// function returns the hard decision on the decoded codeword and the
    /// number of iterations used in decoding. If the parity checks are still
    /// not satisfied after `max_iterations`, the function returns `None`.
    ///
    /// # Panics
    ///
    /// Panics if the length of `received` is not the codeword length.
    pub fn decode(&mut self, received: &[f32], max_iterations: usize) -> Option<DecoderOutput> {
        assert_eq!(received.len(), self.graph.num_variables());
        self.channel.clear();
        self.channel
            .extend(received.iter().map(|&x| self.arithmetic.channel_llr(x)));
        self.graph.reset(&self.channel);
        for iteration in 1..=max_iterations {
            for edges in self.graph.check_nodes_mut() {
                self.arithmetic.update_check(edges);
            }
            self.graph.update_variables();
            self.graph.hard_decision(&mut self.bits);
            if self.graph.syndrome_is_zero(&self.bits) {
                tracing::debug!(iterations = iteration, "decoding succeeded");
                return Some(DecoderOutput {
                    codeword: self.bits.clone(),
                    iterations: iteration,
                });
            }
        }
        tracing::debug!(max_iterations, "decoding failed");
        None
    }

    /// Decodes a codeword and packs it into bytes.
    ///
    /// This behaves as [`Decoder::decode`], but the decoded codeword is
    /// packed MSB first.
    pub fn decode_bytes(
        &mut self,
        received: &[f32],
        max_iterations: usize,
    ) -> Result<Option<Vec<u8>>, Error> {
        let n = self.graph.num_variables();
        if n % 8 != 0 {
            return Err(Error::NotByteAligned(n));
        }
        Ok(self
            .decode(received, max_iterations)
            .map(|output| bits_to_bytes_be(&output.codeword)))
    }
}

#[cfg(test)]
mod test {
    use super::super::arithmetic::{MinSum, SumProduct};
    use super::*;
    use crate::{
        codes::ieee80211::{BlockLength, IEEE80211Code, Rate},
        encoder::Encoder,
        rand::{random_bits, Rng, SeedableRng},
        simulation::channel::{bits_to_signal, flip_bits, UniformNoise},
    };
    use enum_iterator::all;

    fn code() -> &'static Code {
        IEEE80211Code::new(Rate::R1_2, BlockLength::N648).code()
    }

    fn random_codeword(rng: &mut Rng, encoder: &Encoder) -> Vec<u8> {
        let message = random_bits(rng, encoder.code().message_bits());
        encoder.encode_bits(&message).unwrap()
    }

    fn no_errors<A: DecoderArithmetic>(arithmetic: A) {
        let mut rng = Rng::seed_from_u64(11);
        let encoder = Encoder::new(code()).unwrap();
        let mut decoder = Decoder::new(code(), arithmetic).unwrap();
        for _ in 0..10 {
            let codeword = random_codeword(&mut rng, &encoder);
            let DecoderOutput {
                codeword: decoded,
                iterations,
            } = decoder.decode(&bits_to_signal(&codeword), 100).unwrap();
            assert_eq!(decoded, codeword);
            assert_eq!(iterations, 1);
        }
    }

    #[test]
    fn no_errors_sum_product() {
        no_errors(SumProduct::new());
    }

    #[test]
    fn no_errors_min_sum() {
        no_errors(MinSum::new());
    }

    #[test]
    fn all_codes() {
        let mut rng = Rng::seed_from_u64(12);
        for rate in all::<Rate>() {
            for length in all::<BlockLength>() {
                let code = IEEE80211Code::new(rate, length).code();
                let encoder = Encoder::new(code).unwrap();
                let codeword = random_codeword(&mut rng, &encoder);
                let signal = bits_to_signal(&codeword);
                let mut sp = Decoder::new(code, SumProduct::new()).unwrap();
                assert_eq!(sp.decode(&signal, 10).unwrap().codeword, codeword);
                let mut ms = Decoder::new(code, MinSum::new()).unwrap();
                assert_eq!(ms.decode(&signal, 10).unwrap().codeword, codeword);
            }
        }
    }

    #[test]
    fn bit_flips_min_sum() {
        let mut rng = Rng::seed_from_u64(13);
        let encoder = Encoder::new(code()).unwrap();
        let mut decoder = Decoder::new(code(), MinSum::new()).unwrap();
        for num_flips in [2, 3] {
            for _ in 0..10 {
                let codeword = random_codeword(&mut rng, &encoder);
                let mut corrupted = codeword.clone();
                flip_bits(&mut rng, &mut corrupted, 0..code().message_bits(), num_flips);
                assert_ne!(corrupted, codeword);
                let output = decoder.decode(&bits_to_signal(&corrupted), 100).unwrap();
                assert_eq!(output.codeword, codeword);
            }
        }
    }

    #[test]
    fn bit_flips_and_noise_sum_product() {
        let mut rng = Rng::seed_from_u64(14);
        let encoder = Encoder::new(code()).unwrap();
        let mut decoder = Decoder::new(code(), SumProduct::new()).unwrap();
        let noise = UniformNoise::new(0.03);
        for _ in 0..10 {
            let codeword = random_codeword(&mut rng, &encoder);
            let mut corrupted = codeword.clone();
            flip_bits(&mut rng, &mut corrupted, 0..code().message_bits(), 3);
            let mut signal = bits_to_signal(&corrupted);
            noise.add_noise(&mut rng, &mut signal);
            let output = decoder.decode(&signal, 100).unwrap();
            assert_eq!(output.codeword, codeword);
            assert!(output.iterations >= 1);
        }
    }

    #[test]
    fn decode_failure() {
        let mut rng = Rng::seed_from_u64(15);
        let encoder = Encoder::new(code()).unwrap();
        let mut decoder = Decoder::new(code(), SumProduct::new()).unwrap();
        let mut codeword = random_codeword(&mut rng, &encoder);
        let signal = bits_to_signal(&codeword);
        assert!(decoder.decode(&signal, 0).is_none());
        flip_bits(&mut rng, &mut codeword, 0..code().n(), 200);
        assert!(decoder.decode(&bits_to_signal(&codeword), 5).is_none());
        // the decoder is reusable after a failure
        assert!(decoder.decode(&signal, 5).is_some());
    }

    #[test]
    fn decode_bytes() {
        let mut rng = Rng::seed_from_u64(16);
        let encoder = Encoder::new(code()).unwrap();
        let mut decoder = Decoder::new(code(), MinSum::new()).unwrap();
        let codeword = random_codeword(&mut rng, &encoder);
        let bytes = decoder
            .decode_bytes(&bits_to_signal(&codeword), 10)
            .unwrap()
            .unwrap();
        assert_eq!(bytes.len(), 81);
        assert_eq!(bytes, bits_to_bytes_be(&codeword));
    }

    #[test]
    fn decode_bytes_not_byte_aligned() {
        // N = 15
        static HB: [i16; 6] = [1, 2, 3, 4, 5, 6];
        static SMALL: Code = Code::new(5, 2, 3, &HB);
        let mut decoder = Decoder::new(&SMALL, MinSum::new()).unwrap();
        assert_eq!(decoder.table().h.num_cols(), 15);
        assert_eq!(
            decoder.decode_bytes(&[1.0; 15], 10),
            Err(Error::NotByteAligned(15))
        );
        // the bit interface still works
        let output = decoder.decode(&[1.0; 15], 10).unwrap();
        assert_eq!(output.codeword, vec![0; 15]);
    }

    #[test]
    fn graph_matches_table() {
        let decoder = Decoder::new(code(), SumProduct::new()).unwrap();
        assert_eq!(decoder.table().h, code().h());
        assert_eq!(decoder.graph.num_edges(), decoder.table().h.num_ones());
    }

    #[test]
    #[should_panic]
    fn wrong_length() {
        let mut decoder = Decoder::new(code(), MinSum::new()).unwrap();
        let _ = decoder.decode(&[1.0; 100], 10);
    }

    #[test]
    fn repeated_construction() {
        for _ in 0..50 {
            let decoder = Decoder::new(code(), SumProduct::new()).unwrap();
            drop(decoder);
            let encoder = Encoder::new(code()).unwrap();
            drop(encoder);
        }
    }
}
