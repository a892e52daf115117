//! LDPC decoder factory.
//!
//! This module contains routines to build an LDPC decoder generically over the
//! arithmetic implementation. Such decoders are represented by `Box<dyn
//! LdpcDecoder>`, using the trait [`LdpcDecoder`].

use super::{
    arithmetic::{DecoderArithmetic, MinSum, SumProduct},
    Decoder, DecoderOutput, Error,
};
use crate::codes::Code;
use clap::ValueEnum;

/// Generic LDPC decoder.
///
/// This trait is used to form LDPC decoder trait objects, abstracting over the
/// implementation of the decoder arithmetic.
pub trait LdpcDecoder: std::fmt::Debug + Send {
    /// Returns the code used by the decoder.
    fn code(&self) -> &'static Code;

    /// Decodes a codeword.
    ///
    /// The parameters are the received samples for the codeword and the
    /// maximum number of iterations to perform. If decoding is successful, the
    /// function returns a `Some` containing the hard decision on the decoded
    /// codeword and the number of iterations used in decoding. If decoding is
    /// not successful, the function returns `None`.
    fn decode(&mut self, received: &[f32], max_iterations: usize) -> Option<DecoderOutput>;

    /// Decodes a codeword and packs it into bytes, MSB first.
    fn decode_bytes(
        &mut self,
        received: &[f32],
        max_iterations: usize,
    ) -> Result<Option<Vec<u8>>, Error>;
}

impl<A: DecoderArithmetic> LdpcDecoder for Decoder<A> {
    fn code(&self) -> &'static Code {
        Decoder::code(self)
    }

    fn decode(&mut self, received: &[f32], max_iterations: usize) -> Option<DecoderOutput> {
        Decoder::decode(self, received, max_iterations)
    }

    fn decode_bytes(
        &mut self,
        received: &[f32],
        max_iterations: usize,
    ) -> Result<Option<Vec<u8>>, Error> {
        Decoder::decode_bytes(self, received, max_iterations)
    }
}

/// LDPC decoder implementation.
///
/// This enum lists the LDPC decoder implementations corresponding to different
/// arithmetic rules.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, ValueEnum)]
#[clap(rename_all = "verbatim")]
pub enum DecoderImplementation {
    /// The [`SumProduct`] implementation.
    SumProduct,
    /// The [`MinSum`] implementation.
    MinSum,
}

impl DecoderImplementation {
    /// Builds an LDPC decoder.
    ///
    /// Given a code, this function builds an LDPC decoder corresponding to
    /// this decoder implementation.
    pub fn build_decoder(&self, code: &'static Code) -> Result<Box<dyn LdpcDecoder>, Error> {
        let decoder: Box<dyn LdpcDecoder> = match self {
            DecoderImplementation::SumProduct => Box::new(Decoder::new(code, SumProduct::new())?),
            DecoderImplementation::MinSum => Box::new(Decoder::new(code, MinSum::new())?),
        };
        Ok(decoder)
    }
}

impl std::str::FromStr for DecoderImplementation {
    type Err = String;

    fn from_str(s: &str) -> Result<DecoderImplementation, String> {
        Ok(match s {
            "SumProduct" => DecoderImplementation::SumProduct,
            "MinSum" => DecoderImplementation::MinSum,
            _ => Err(format!("invalid decoder implementation {s}"))?,
        })
    }
}

impl std::fmt::Display for DecoderImplementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                DecoderImplementation::SumProduct => "SumProduct",
                DecoderImplementation::MinSum => "MinSum",
            }
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        codes::ieee80211::{BlockLength, IEEE80211Code, Rate},
        simulation::channel::bits_to_signal,
    };

    #[test]
    fn parse() {
        for implementation in [DecoderImplementation::SumProduct, DecoderImplementation::MinSum] {
            let s = implementation.to_string();
            assert_eq!(s.parse::<DecoderImplementation>().unwrap(), implementation);
        }
        assert!("Phif64".parse::<DecoderImplementation>().is_err());
    }

    #[test]
    fn trait_object() {
        let code = IEEE80211Code::new(Rate::R5_6, BlockLength::N648).code();
        let mut decoder = DecoderImplementation::MinSum.build_decoder(code).unwrap();
        assert_eq!(decoder.code(), code);
        let zero = bits_to_signal(&vec![0; code.n()]);
        let output = decoder.decode(&zero, 10).unwrap();
        assert_eq!(output.codeword, vec![0; code.n()]);
        assert_eq!(
            decoder.decode_bytes(&zero, 10).unwrap().unwrap(),
            vec![0; code.n() / 8]
        );
    }
}
