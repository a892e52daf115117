//! LDPC codes.
//!
//! This module contains the quasi-cyclic code descriptor [`Code`] and the
//! codes defined by standards.

use crate::sparse::{QcRegion, SparseMatrix};

pub mod ieee80211;

/// Quasi-cyclic LDPC code descriptor.
///
/// A code is described by its `mb x nb` base matrix `hb` and the expansion
/// factor `z`. Each base matrix entry is either a cyclic shift in `[0, z)` or
/// a negative value for an all-zero block. The expanded parity check matrix
/// has size `M x N` with `M = mb * z` and `N = nb * z`.
///
/// The code is systematic: the first `kb = nb - mb` block columns carry the
/// message bits, block column `kb` carries the first parity block and the
/// remaining `mb - 1` block columns carry the second parity block.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Code {
    z: usize,
    mb: usize,
    nb: usize,
    hb: &'static [i16],
}

impl Code {
    /// Creates a code descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `hb` does not have `mb * nb` entries or if `mb >= nb`.
    pub const fn new(z: usize, mb: usize, nb: usize, hb: &'static [i16]) -> Code {
        assert!(hb.len() == mb * nb);
        assert!(mb < nb);
        Code { z, mb, nb, hb }
    }

    /// Returns the expansion factor `z` (the size of the circulant blocks).
    pub fn z(&self) -> usize {
        self.z
    }

    /// Returns the height of the base matrix in blocks.
    pub fn mb(&self) -> usize {
        self.mb
    }

    /// Returns the width of the base matrix in blocks.
    pub fn nb(&self) -> usize {
        self.nb
    }

    /// Returns the number of systematic block columns.
    pub fn kb(&self) -> usize {
        self.nb - self.mb
    }

    /// Returns the number of rows `M` of the parity check matrix.
    pub fn m(&self) -> usize {
        self.mb * self.z
    }

    /// Returns the codeword length `N`.
    pub fn n(&self) -> usize {
        self.nb * self.z
    }

    /// Returns the number of message bits per codeword.
    pub fn message_bits(&self) -> usize {
        self.kb() * self.z
    }

    /// Returns the code rate.
    pub fn rate(&self) -> f64 {
        self.kb() as f64 / self.nb as f64
    }

    /// Returns the flattened base matrix, in row-major order.
    pub fn hb(&self) -> &'static [i16] {
        self.hb
    }

    /// Expands a region of the base matrix.
    pub fn expand(&self, region: QcRegion) -> SparseMatrix {
        SparseMatrix::from_qc(self.hb, self.nb, region, self.z)
    }

    /// Constructs the parity check matrix for the code.
    pub fn h(&self) -> SparseMatrix {
        self.expand(QcRegion::new(0, 0, self.nb, self.mb))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static HB: [i16; 6] = [1, 2, 3, 4, 5, 6];

    #[test]
    fn dimensions() {
        let code = Code::new(5, 2, 3, &HB);
        assert_eq!(code.m(), 10);
        assert_eq!(code.n(), 15);
        assert_eq!(code.kb(), 1);
        assert_eq!(code.message_bits(), 5);
        let h = code.h();
        assert_eq!(h.num_rows(), 10);
        assert_eq!(h.num_cols(), 15);
        assert_eq!(h.num_ones(), 30);
    }

    #[test]
    #[should_panic]
    fn wrong_base_matrix_size() {
        let _ = Code::new(5, 3, 3, &HB);
    }
}
