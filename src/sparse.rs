//! # Sparse binary matrix representation and functions
//!
//! This module implements a representation for sparse binary matrices based on
//! the alist format used to handle LDPC parity check matrices, together with
//! the GF(2) matrix-vector routines used by the structured encoder.
//!
//! Quasi-cyclic matrices are built from their base matrix description with
//! [`SparseMatrix::from_qc`].

use crate::gf2::GF2;
use ndarray::{Array1, ArrayBase, Data, Ix1};
use num_traits::Zero;
use std::borrow::Borrow;
use std::slice::Iter;

mod qc;

pub use qc::QcRegion;

/// A sparse binary matrix
///
/// The internal representation for this matrix is based on the alist format.
/// The entries of each row are stored in insertion order, which for matrices
/// built with [`SparseMatrix::from_qc`] is the base-column order.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SparseMatrix {
    rows: Vec<Vec<usize>>,
    cols: Vec<Vec<usize>>,
}

impl SparseMatrix {
    /// Create a new sparse matrix of a given size
    ///
    /// The matrix is inizialized to the zero matrix.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_80211::sparse::SparseMatrix;
    /// let h = SparseMatrix::new(10, 30);
    /// assert_eq!(h.num_rows(), 10);
    /// assert_eq!(h.num_cols(), 30);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> SparseMatrix {
        use std::iter::repeat_with;
        let rows = repeat_with(Vec::new).take(nrows).collect();
        let cols = repeat_with(Vec::new).take(ncols).collect();
        SparseMatrix { rows, cols }
    }

    /// Returns the number of rows of the matrix
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns of the matrix
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Returns the number of entries equal to one in the matrix
    pub fn num_ones(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns the row weight of `row`
    ///
    /// The row weight is defined as the number of entries equal to
    /// one in a particular row. Rows are indexed starting by zero.
    pub fn row_weight(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    /// Returns the column weight of `column`
    ///
    /// The column weight is defined as the number of entries equal to
    /// one in a particular column. Columns are indexed starting by zero.
    pub fn col_weight(&self, col: usize) -> usize {
        self.cols[col].len()
    }

    /// Returns `true` if the entry corresponding to a particular
    /// row and column is a one
    pub fn contains(&self, row: usize, col: usize) -> bool {
        // typically columns are shorter, so we search in the column
        self.cols[col].contains(&row)
    }

    /// Inserts a one in a particular row and column
    ///
    /// # Examples
    /// ```
    /// # use ldpc_80211::sparse::SparseMatrix;
    /// let mut h = SparseMatrix::new(10, 30);
    /// assert!(!h.contains(3, 7));
    /// h.insert(3, 7);
    /// assert!(h.contains(3, 7));
    /// ```
    pub fn insert(&mut self, row: usize, col: usize) {
        self.rows[row].push(col);
        self.cols[col].push(row);
    }

    /// Inserts ones in particular columns of a row
    ///
    /// This effect is as calling `insert()` on each of the elements
    /// of the iterator `cols`.
    pub fn insert_row<T, S>(&mut self, row: usize, cols: T)
    where
        T: Iterator<Item = S>,
        S: Borrow<usize>,
    {
        for col in cols {
            self.insert(row, *col.borrow());
        }
    }

    /// Returns an [Iterator] over the entries equal to one
    /// in a particular row
    pub fn iter_row(&self, row: usize) -> Iter<'_, usize> {
        self.rows[row].iter()
    }

    /// Returns an [Iterator] over all the `(row, column)` pairs of entries
    /// equal to one, in row-major order.
    pub fn iter_all(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(j, r)| r.iter().map(move |&k| (j, k)))
    }

    /// Multiplies the matrix by a column vector over GF(2).
    ///
    /// Each entry of the result is the sum (XOR) of the entries of `x`
    /// addressed by the corresponding row.
    ///
    /// # Panics
    ///
    /// Panics if a row addresses an index outside `x`.
    pub fn mul_vec<S>(&self, x: &ArrayBase<S, Ix1>) -> Array1<GF2>
    where
        S: Data<Elem = GF2>,
    {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&k| x[k]).sum())
            .collect()
    }

    /// Solves `T y = x` over GF(2) by forward substitution.
    ///
    /// The matrix must be lower triangular with ones on its diagonal. Row 0
    /// copies `x[0]`, and each later row adds `x[i]` to the already solved
    /// `y[j]` for the columns `j < i` that it references. The diagonal entry
    /// itself is skipped.
    ///
    /// # Panics
    ///
    /// Panics if the length of `x` is smaller than the number of rows.
    pub fn substitute<S>(&self, x: &ArrayBase<S, Ix1>) -> Array1<GF2>
    where
        S: Data<Elem = GF2>,
    {
        let mut y = Array1::from_elem(self.num_rows(), GF2::zero());
        if self.num_rows() == 0 {
            return y;
        }
        y[0] = x[0];
        for (i, row) in self.rows.iter().enumerate().skip(1) {
            // each row depends on the rows solved before it
            let acc: GF2 = row.iter().filter(|&&j| j < i).map(|&j| y[j]).sum();
            y[i] = acc + x[i];
        }
        y
    }

    /// Returns `true` if no row references a column to the right of the
    /// diagonal.
    pub fn is_lower_triangular(&self) -> bool {
        self.iter_all().all(|(j, k)| k <= j)
    }

    /// Writes the matrix in alist format to a writer
    ///
    /// # Errors
    /// If a call to `write!()` returns an error, this function returns
    /// such an error.
    pub fn write_alist<W: std::fmt::Write>(&self, w: &mut W) -> std::fmt::Result {
        writeln!(w, "{} {}", self.num_cols(), self.num_rows())?;
        let directions = [&self.cols, &self.rows];
        for dir in directions.iter() {
            write!(w, "{} ", dir.iter().map(|el| el.len()).max().unwrap_or(0))?;
        }
        writeln!(w)?;
        for dir in directions.iter() {
            for el in *dir {
                write!(w, "{} ", el.len())?;
            }
            writeln!(w)?;
        }
        for dir in directions.iter() {
            for el in *dir {
                let mut v = el.clone();
                v.sort_unstable();
                for x in &v {
                    write!(w, "{} ", x + 1)?;
                }
                writeln!(w)?;
            }
        }
        Ok(())
    }

    /// Returns a [`String`] with the alist representation of the matrix
    pub fn alist(&self) -> String {
        let mut s = String::new();
        // writing to a String never fails
        let _ = self.write_alist(&mut s);
        s
    }

    /// Returns `true` if `bits` satisfies every parity check of the matrix.
    ///
    /// Stops at the first unsatisfied check.
    pub fn syndrome_is_zero(&self, bits: &[u8]) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().fold(0, |acc, &k| acc ^ bits[k]) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf2;

    #[test]
    fn test_insert() {
        let mut h = SparseMatrix::new(100, 300);
        assert!(!h.contains(27, 154));
        h.insert(27, 154);
        assert!(h.contains(27, 154));
        assert!(!h.contains(28, 154));
        assert_eq!(h.num_ones(), 1);
    }

    #[test]
    fn test_alist() {
        let mut h = SparseMatrix::new(4, 12);
        for j in 0..4 {
            h.insert(j, j);
            h.insert(j, j + 4);
            h.insert(j, j + 8);
        }
        let expected = "12 4
1 3 
1 1 1 1 1 1 1 1 1 1 1 1 
3 3 3 3 
1 
2 
3 
4 
1 
2 
3 
4 
1 
2 
3 
4 
1 5 9 
2 6 10 
3 7 11 
4 8 12 
";
        assert_eq!(h.alist(), expected);
    }

    #[test]
    fn multiply() {
        let mut h = SparseMatrix::new(3, 4);
        h.insert_row(0, [0, 1].iter());
        h.insert_row(1, [1, 2, 3].iter());
        h.insert_row(2, [3].iter());
        let x = gf2::from_bits(&[1, 1, 0, 1]);
        assert_eq!(gf2::to_bits(&h.mul_vec(&x)), [0, 0, 1]);
    }

    #[test]
    fn substitute_solves_lower_triangular() {
        // T = [1 0 0 0; 1 1 0 0; 0 1 1 0; 1 0 1 1]
        let mut t = SparseMatrix::new(4, 4);
        t.insert_row(0, [0].iter());
        t.insert_row(1, [0, 1].iter());
        t.insert_row(2, [1, 2].iter());
        t.insert_row(3, [0, 2, 3].iter());
        assert!(t.is_lower_triangular());
        let x = gf2::from_bits(&[1, 0, 1, 1]);
        let y = t.substitute(&x);
        assert_eq!(gf2::to_bits(&y), [1, 1, 0, 0]);
        // T y must give back x
        assert_eq!(t.mul_vec(&y), x);
    }

    #[test]
    fn not_lower_triangular() {
        let mut t = SparseMatrix::new(2, 2);
        t.insert_row(0, [0, 1].iter());
        t.insert(1, 1);
        assert!(!t.is_lower_triangular());
    }

    #[test]
    fn syndrome() {
        let mut h = SparseMatrix::new(2, 4);
        h.insert_row(0, [0, 1, 2].iter());
        h.insert_row(1, [1, 3].iter());
        assert!(h.syndrome_is_zero(&[1, 1, 0, 1]));
        assert!(!h.syndrome_is_zero(&[1, 0, 0, 1]));
        assert!(h.syndrome_is_zero(&[0; 4]));
    }
}
