//! Quasi-cyclic expansion.
//!
//! A quasi-cyclic matrix is described by a base matrix whose entries are
//! either a cyclic shift `rot` in `[0, z)` or a negative value meaning an
//! all-zero block. A shift `rot` stands for the `z x z` identity rotated so
//! that row `r` of the block has its one in column `(rot + r) % z`.

use super::SparseMatrix;

/// Rectangular region of a base matrix, in units of blocks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct QcRegion {
    /// First block column of the region.
    pub x_offset: usize,
    /// First block row of the region.
    pub y_offset: usize,
    /// Number of block columns.
    pub width: usize,
    /// Number of block rows.
    pub height: usize,
}

impl QcRegion {
    /// Creates a region from its block offsets and size.
    pub fn new(x_offset: usize, y_offset: usize, width: usize, height: usize) -> QcRegion {
        QcRegion {
            x_offset,
            y_offset,
            width,
            height,
        }
    }
}

impl SparseMatrix {
    /// Expands a region of a quasi-cyclic base matrix.
    ///
    /// The base matrix `qc` is given in row-major order with `qc_width`
    /// entries per row. The result has `region.height * z` rows and
    /// `region.width * z` columns, with column indices relative to the
    /// region. Rows are produced in increasing order. Within a row the
    /// columns follow the base-column order, so a row holds at most one
    /// entry per base-matrix cell.
    ///
    /// No validation is performed: a region that does not fit inside `qc`
    /// causes a panic.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_80211::sparse::{QcRegion, SparseMatrix};
    /// let qc = [0, -1, 1, 2];
    /// let h = SparseMatrix::from_qc(&qc, 2, QcRegion::new(0, 0, 2, 2), 3);
    /// assert_eq!(h.num_rows(), 6);
    /// assert_eq!(h.iter_row(0).copied().collect::<Vec<_>>(), vec![0]);
    /// assert_eq!(h.iter_row(4).copied().collect::<Vec<_>>(), vec![2, 3]);
    /// ```
    pub fn from_qc(qc: &[i16], qc_width: usize, region: QcRegion, z: usize) -> SparseMatrix {
        let mut h = SparseMatrix::new(region.height * z, region.width * z);
        let mut row = 0;
        for base_row in region.y_offset..region.y_offset + region.height {
            let cells = &qc[base_row * qc_width + region.x_offset..][..region.width];
            for row_offset in 0..z {
                for (col, &rot) in cells.iter().enumerate() {
                    // negative entries are empty blocks
                    if let Ok(rot) = usize::try_from(rot) {
                        h.insert(row, col * z + (rot + row_offset) % z);
                    }
                }
                row += 1;
            }
        }
        h
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expand_full_matrix() {
        let qc = [1, 2, 3, 4, 5, 6];
        let z = 5;
        let h = SparseMatrix::from_qc(&qc, 3, QcRegion::new(0, 0, 3, 2), z);
        assert_eq!(h.num_rows(), 10);
        assert_eq!(h.num_cols(), 15);
        for row in 0..10 {
            let base_row = row / z;
            let row_offset = row % z;
            let expected = (0..3)
                .map(|col| col * z + (qc[base_row * 3 + col] as usize + row_offset) % z)
                .collect::<Vec<_>>();
            assert_eq!(h.iter_row(row).copied().collect::<Vec<_>>(), expected);
        }
        // spot check against hand-computed rotations
        assert_eq!(h.iter_row(0).copied().collect::<Vec<_>>(), vec![1, 7, 13]);
        assert_eq!(h.iter_row(4).copied().collect::<Vec<_>>(), vec![0, 6, 12]);
        assert_eq!(h.iter_row(9).copied().collect::<Vec<_>>(), vec![3, 9, 10]);
    }

    #[test]
    fn expand_single_block_column() {
        // base matrix [[1, 2, 3], [4, 5, 6]]; one column wide, two rows tall
        let qc = [1, 2, 3, 4, 5, 6];
        let z = 5;
        let h = SparseMatrix::from_qc(&qc, 3, QcRegion::new(0, 0, 1, 2), z);
        assert_eq!(h.num_rows(), 10);
        for row in 0..10 {
            let rot = if row < z { 1 } else { 4 };
            assert_eq!(h.row_weight(row), 1);
            assert_eq!(
                h.iter_row(row).copied().collect::<Vec<_>>(),
                vec![(rot + row % z) % z]
            );
        }
    }

    #[test]
    fn empty_blocks() {
        let qc = [-1, 0, -1, -1];
        let h = SparseMatrix::from_qc(&qc, 2, QcRegion::new(0, 0, 2, 2), 4);
        assert_eq!(h.num_rows(), 8);
        assert_eq!(h.num_ones(), 4);
        for row in 0..4 {
            assert_eq!(h.iter_row(row).copied().collect::<Vec<_>>(), vec![4 + row]);
        }
        for row in 4..8 {
            assert_eq!(h.row_weight(row), 0);
        }
    }

    #[test]
    fn expand_offset_region() {
        let qc = [1, 2, 3, 4, 5, 6];
        let h = SparseMatrix::from_qc(&qc, 3, QcRegion::new(1, 1, 2, 1), 5);
        assert_eq!(h.num_rows(), 5);
        assert_eq!(h.num_cols(), 10);
        // entries 5 and 6, relative to the region
        assert_eq!(h.iter_row(0).copied().collect::<Vec<_>>(), vec![0, 6]);
        assert_eq!(h.iter_row(2).copied().collect::<Vec<_>>(), vec![2, 8]);
    }
}
