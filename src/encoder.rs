//! LDPC systematic encoder.
//!
//! This module implements the linear-time encoder of Richardson and Urbanke
//! for the quasi-cyclic codes in [`codes`](crate::codes). The parity check
//! matrix is split into the regions of a [`Table`]:
//!
//! ```text
//! H = [A B T]
//!     [C D E]
//! ```
//!
//! where `T` is lower triangular. A codeword `[s p1 p2]` satisfies
//! `A s + B p1 + T p2 = 0` and `C s + D p1 + E p2 = 0`. For the 802.11 codes
//! the matrix `E T^-1 B + D` is the identity, so that the parity is obtained
//! as
//!
//! ```text
//! p1 = E T^-1 A s + C s
//! p2 = T^-1 (A s + B p1)
//! ```
//!
//! Each product is a sparse matrix-vector product or a forward substitution,
//! so encoding is O(n).

use crate::{
    bits::bytes_to_bits_be,
    codes::Code,
    gf2::{self, GF2},
    table::Table,
};
use ndarray::{s, Array1, ArrayBase, Data, Ix1};
use num_traits::Zero;
use thiserror::Error;

/// LDPC encoder error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The message has more bits than the code can carry.
    #[error("message of {len} bits exceeds the capacity of {capacity} bits")]
    MessageTooLong {
        /// Length of the message in bits.
        len: usize,
        /// Maximum number of bits accepted.
        capacity: usize,
    },
    /// The `T` region of the parity check matrix is not lower triangular, so
    /// the encoder cannot be constructed.
    #[error("the T submatrix of the parity check matrix is not lower triangular")]
    NotLowerTriangular,
}

/// LDPC systematic encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    code: &'static Code,
    table: Table,
}

impl Encoder {
    /// Creates the systematic encoder for a code.
    pub fn new(code: &'static Code) -> Result<Encoder, Error> {
        let table = Table::new(code);
        if !table.t.is_lower_triangular() {
            return Err(Error::NotLowerTriangular);
        }
        Ok(Encoder { code, table })
    }

    /// Returns the code used by the encoder.
    pub fn code(&self) -> &'static Code {
        self.code
    }

    /// Encodes a message into a codeword.
    ///
    /// Messages shorter than [`Code::message_bits`] are padded with zeros at
    /// the end. The codeword is the padded message followed by the parity.
    pub fn encode<S>(&self, message: &ArrayBase<S, Ix1>) -> Result<Array1<GF2>, Error>
    where
        S: Data<Elem = GF2>,
    {
        let k = self.code.message_bits();
        if message.len() > k {
            return Err(too_long(message.len(), k));
        }
        let mut s = Array1::from_elem(k, GF2::zero());
        s.slice_mut(s![..message.len()]).assign(message);

        let Table { a, b, c, e, t, .. } = &self.table;
        let ast = a.mul_vec(&s);
        let cst = c.mul_vec(&s);
        let etinvast = e.mul_vec(&t.substitute(&ast));
        let p1 = etinvast + cst;
        let astbp1 = &ast + &b.mul_vec(&p1);
        let p2 = t.substitute(&astbp1);

        Ok(s.iter().chain(p1.iter()).chain(p2.iter()).copied().collect())
    }

    /// Encodes a message given as unpacked bits.
    ///
    /// Each entry of `bits` is a 0 or a 1. The codeword is returned as
    /// unpacked bits too.
    pub fn encode_bits(&self, bits: &[u8]) -> Result<Vec<u8>, Error> {
        let k = self.code.message_bits();
        if bits.len() > k {
            return Err(too_long(bits.len(), k));
        }
        let codeword = self.encode(&gf2::from_bits(bits))?;
        Ok(gf2::to_bits(&codeword))
    }

    /// Encodes a message given as bytes.
    ///
    /// The bytes are unpacked MSB first. Since [`Code::message_bits`] is not
    /// always a multiple of 8, up to one extra byte is accepted and the bits
    /// that do not fit in the message are dropped. The codeword is returned as
    /// unpacked bits.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, Error> {
        let k = self.code.message_bits();
        let mut bits = bytes_to_bits_be(bytes);
        if bits.len() > k + 8 {
            return Err(too_long(bits.len(), k + 8));
        }
        bits.truncate(k);
        self.encode_bits(&bits)
    }
}

fn too_long(len: usize, capacity: usize) -> Error {
    tracing::warn!(len, capacity, "message does not fit in codeword");
    Error::MessageTooLong { len, capacity }
}
