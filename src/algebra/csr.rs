#![allow(non_snake_case)]

use crate::algebra::{CsrFormatError, FloatT};
use std::fmt;

/// Sparse matrix in Compressed Sparse Row (CSR) format.
///
/// Derivative results are returned in this form: a single expression
/// gradient is a 1 × n matrix and a constraint Jacobian stacks one row
/// per constraint.
///
/// __Example usage__ : to construct the 2 x 3 matrix
/// ```text
/// A = [1.  0.  2.]
///     [0.  3.  0.]
/// ```
///
/// ```
/// use nlmodel::algebra::CsrMatrix;
///
/// let A : CsrMatrix<f64> = CsrMatrix::new(
///    2,                  // m
///    3,                  // n
///    vec![0, 2, 3],      // rowptr
///    vec![0, 2, 1],      // colval
///    vec![1., 2., 3.],   // nzval
/// );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSR format row pointer.
    ///
    /// This field should have length `m + 1`.  The last entry corresponds
    /// to the number of nonzeros and should agree with the lengths of the
    /// `colval` and `nzval` fields.
    pub rowptr: Vec<usize>,
    /// vector of column indices
    pub colval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CsrMatrix<T>
where
    T: FloatT,
{
    /// `CsrMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   Column indices are not required to be sorted within a
    /// row; derivative rows keep their variables in first-encounter
    /// order.
    pub fn new(m: usize, n: usize, rowptr: Vec<usize>, colval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(colval.len(), nzval.len());
        assert_eq!(rowptr.len(), m + 1);
        assert_eq!(rowptr[m], colval.len());
        CsrMatrix {
            m,
            n,
            rowptr,
            colval,
            nzval,
        }
    }

    /// a 1 × `n` matrix holding a single sparse row
    pub fn single_row(n: usize, colval: Vec<usize>, nzval: Vec<T>) -> Self {
        let nnz = colval.len();
        CsrMatrix::new(1, n, vec![0, nnz], colval, nzval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.rowptr[self.m]
    }

    /// value at `(row, col)`, or `None` if the entry is structurally zero
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        let rng = self.rowptr[row]..self.rowptr[row + 1];
        self.colval[rng.clone()]
            .iter()
            .position(|&c| c == col)
            .map(|k| self.nzval[rng.start + k])
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), CsrFormatError> {
        if self.colval.len() != self.nzval.len() {
            return Err(CsrFormatError::IncompatibleDimension);
        }

        if self.rowptr.is_empty()
            || (self.rowptr.len() - 1) != self.m
            || self.rowptr[self.m] != self.colval.len()
        {
            return Err(CsrFormatError::IncompatibleDimension);
        }

        //check for rowptr monotonicity
        if self.rowptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(CsrFormatError::BadRowptr);
        }

        //check for column values out of bounds
        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(CsrFormatError::BadColval);
        }

        Ok(())
    }
}

impl<T> fmt::Display for CsrMatrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========")?;
        writeln!(f, "CSR Matrix")?;
        writeln!(f, "==========")?;
        writeln!(f, "shape = {} x {}", self.m, self.n)?;
        writeln!(f, "NNZ   = {}", self.nnz())?;
        writeln!(f, "----------")?;
        for i in 0..self.m {
            write!(f, "Row {}:", i)?;
            for k in self.rowptr[i]..self.rowptr[i + 1] {
                write!(f, " ({}, {})", self.colval[k], self.nzval[k])?;
            }
            writeln!(f)?;
        }
        write!(f, "==========")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_matrix() -> CsrMatrix<f64> {
        // [1. 0. 2.]
        // [0. 3. 0.]
        CsrMatrix::new(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1., 2., 3.])
    }

    #[test]
    fn test_check_format() {
        let mut A = test_matrix();
        assert!(A.check_format().is_ok());

        A.rowptr[1] = 3;
        assert!(matches!(A.check_format(), Err(CsrFormatError::BadRowptr)));

        let mut A = test_matrix();
        A.colval[2] = 3;
        assert!(matches!(A.check_format(), Err(CsrFormatError::BadColval)));

        let mut A = test_matrix();
        A.nzval.pop();
        assert!(matches!(
            A.check_format(),
            Err(CsrFormatError::IncompatibleDimension)
        ));
    }

    #[test]
    fn test_get() {
        let A = test_matrix();
        assert_eq!(A.get(0, 0), Some(1.));
        assert_eq!(A.get(0, 1), None);
        assert_eq!(A.get(0, 2), Some(2.));
        assert_eq!(A.get(1, 1), Some(3.));
        assert_eq!(A.nnz(), 3);
    }
}
