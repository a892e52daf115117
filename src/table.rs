//! Encoder submatrices.
//!
//! The parity check matrix of a code with the 802.11 structure is split into
//! the regions used by the Richardson-Urbanke encoder:
//!
//! ```text
//!     +-------+---+-------+
//!     |   A   | B |   T   |   mb - 1 block rows
//! H = +-------+---+-------+
//!     |   C   | D |   E   |   1 block row
//!     +-------+---+-------+
//!        kb     1   mb - 1  block columns
//! ```
//!
//! `T` is lower triangular with ones on its diagonal.

use crate::{
    codes::Code,
    sparse::{QcRegion, SparseMatrix},
};

/// Expanded regions of a code.
///
/// Each region is an independent [`SparseMatrix`] with column indices
/// relative to its own top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Message columns of all but the last block row.
    pub a: SparseMatrix,
    /// First parity block column, all but the last block row.
    pub b: SparseMatrix,
    /// Message columns of the last block row.
    pub c: SparseMatrix,
    /// First parity block column, last block row.
    pub d: SparseMatrix,
    /// Second parity columns of the last block row.
    pub e: SparseMatrix,
    /// Second parity columns of all but the last block row.
    pub t: SparseMatrix,
    /// Full parity check matrix.
    pub h: SparseMatrix,
}

impl Table {
    /// Expands the regions of a code.
    pub fn new(code: &Code) -> Table {
        let (mb, nb, kb) = (code.mb(), code.nb(), code.kb());
        let table = Table {
            a: code.expand(QcRegion::new(0, 0, kb, mb - 1)),
            b: code.expand(QcRegion::new(kb, 0, 1, mb - 1)),
            c: code.expand(QcRegion::new(0, mb - 1, kb, 1)),
            d: code.expand(QcRegion::new(kb, mb - 1, 1, 1)),
            e: code.expand(QcRegion::new(kb + 1, mb - 1, nb - kb - 1, 1)),
            t: code.expand(QcRegion::new(kb + 1, 0, nb - kb - 1, mb - 1)),
            h: code.h(),
        };
        tracing::debug!(
            m = code.m(),
            n = code.n(),
            z = code.z(),
            ones = table.h.num_ones(),
            "expanded code tables"
        );
        table
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::ieee80211::{BlockLength, IEEE80211Code, Rate};
    use enum_iterator::all;

    #[test]
    fn region_sizes() {
        for rate in all::<Rate>() {
            for length in all::<BlockLength>() {
                let code = IEEE80211Code::new(rate, length).code();
                let (m, n, z, k) = (code.m(), code.n(), code.z(), code.message_bits());
                let table = Table::new(code);
                assert_eq!((table.a.num_rows(), table.a.num_cols()), (m - z, k));
                assert_eq!((table.b.num_rows(), table.b.num_cols()), (m - z, z));
                assert_eq!((table.c.num_rows(), table.c.num_cols()), (z, k));
                assert_eq!((table.d.num_rows(), table.d.num_cols()), (z, z));
                assert_eq!((table.e.num_rows(), table.e.num_cols()), (z, m - z));
                assert_eq!((table.t.num_rows(), table.t.num_cols()), (m - z, m - z));
                assert_eq!((table.h.num_rows(), table.h.num_cols()), (m, n));
                // the regions tile H
                let ones = [&table.a, &table.b, &table.c, &table.d, &table.e, &table.t]
                    .iter()
                    .map(|r| r.num_ones())
                    .sum::<usize>();
                assert_eq!(ones, table.h.num_ones());
            }
        }
    }

    #[test]
    fn t_is_lower_triangular() {
        for rate in all::<Rate>() {
            let code = IEEE80211Code::new(rate, BlockLength::N1944).code();
            let table = Table::new(code);
            assert!(table.t.is_lower_triangular());
            for row in 0..table.t.num_rows() {
                assert!(table.t.contains(row, row));
            }
            // E only touches the last block column
            let first = table.e.num_cols() - code.z();
            assert!(table.e.iter_all().all(|(_, k)| k >= first));
        }
    }

    #[test]
    fn repeated_construction() {
        let code = IEEE80211Code::new(Rate::R2_3, BlockLength::N648).code();
        let first = Table::new(code);
        for _ in 0..100 {
            assert_eq!(Table::new(code), first);
        }
    }
}
