//! Dense matrix arithmetic for the regression and correlation solvers.
//!
//! A deliberately small engine: construction, transpose, addition,
//! multiplication, and inversion by Gauss-Jordan elimination with
//! partial pivoting. That is everything the normal-equations solver
//! `(XᵀX)⁻¹Xᵀy` and the partial-correlation inverse need. No
//! decompositions, no sparse storage.

/// Error type for invalid matrix operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Rows of uneven length, or zero rows/columns.
    Malformed,
    /// Operand shapes incompatible with the requested operation.
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// Inversion requires a square matrix.
    NotSquare,
    /// No pivot above the singularity threshold was available.
    Singular,
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::Malformed => write!(f, "matrix rows must be non-empty and equal length"),
            MatrixError::DimensionMismatch { lhs, rhs } => write!(
                f,
                "incompatible dimensions: {}x{} and {}x{}",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MatrixError::NotSquare => write!(f, "operation requires a square matrix"),
            MatrixError::Singular => write!(f, "matrix is singular or near-singular"),
        }
    }
}

impl std::error::Error for MatrixError {}

/// Pivots with absolute value at or below this are treated as zero.
const SINGULARITY_EPS: f64 = 1e-10;

/// A dense row-major matrix of `f64`.
///
/// # Examples
/// ```
/// use psylab::matrix::Matrix;
///
/// let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let inv = a.inverse().unwrap();
/// assert!((inv.get(0, 0) - (-2.0)).abs() < 1e-10);
/// assert!((inv.get(0, 1) - 1.0).abs() < 1e-10);
/// assert!((inv.get(1, 0) - 1.5).abs() < 1e-10);
/// assert!((inv.get(1, 1) - (-0.5)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Builds a matrix from rows, validating that the shape is
    /// rectangular and non-empty.
    ///
    /// # Errors
    /// [`MatrixError::Malformed`] for zero rows, zero columns, or
    /// ragged rows.
    pub fn new(data: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        if data.is_empty() {
            return Err(MatrixError::Malformed);
        }
        let cols = data[0].len();
        if cols == 0 || data.iter().any(|row| row.len() != cols) {
            return Err(MatrixError::Malformed);
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// The n-by-n identity matrix.
    pub fn identity(n: usize) -> Self {
        let data = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Matrix {
            rows: n,
            cols: n,
            data,
        }
    }

    /// An all-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The element at (row, col).
    ///
    /// # Panics
    /// Panics if the indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Borrow the underlying rows.
    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    /// The transpose.
    pub fn transpose(&self) -> Matrix {
        let data = (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.data[i][j]).collect())
            .collect();
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Element-wise sum.
    ///
    /// # Errors
    /// [`MatrixError::DimensionMismatch`] unless both shapes match.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(MatrixError::DimensionMismatch {
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        let data = (0..self.rows)
            .map(|i| {
                (0..self.cols)
                    .map(|j| self.data[i][j] + other.data[i][j])
                    .collect()
            })
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    /// [`MatrixError::DimensionMismatch`] unless `self.cols == other.rows`.
    ///
    /// # Examples
    /// ```
    /// use psylab::matrix::Matrix;
    ///
    /// let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let b = Matrix::new(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.data(), &[vec![19.0, 22.0], vec![43.0, 50.0]]);
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        let mut data = vec![vec![0.0; other.cols]; self.rows];
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.data[i][k];
                if lhs == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    data[i][j] += lhs * other.data[k][j];
                }
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Multiplies by a column vector, returning the result as a `Vec`.
    ///
    /// # Errors
    /// [`MatrixError::DimensionMismatch`] unless `v.len() == self.cols`.
    pub fn multiply_vec(&self, v: &[f64]) -> Result<Vec<f64>, MatrixError> {
        if v.len() != self.cols {
            return Err(MatrixError::DimensionMismatch {
                lhs: (self.rows, self.cols),
                rhs: (v.len(), 1),
            });
        }
        Ok(self
            .data
            .iter()
            .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Inverts the matrix by Gauss-Jordan elimination with partial
    /// pivoting on an augmented `[A | I]` block.
    ///
    /// Each column's pivot is the remaining entry of largest absolute
    /// value; a best pivot at or below 1e-10 reports the matrix as
    /// singular rather than dividing through by numerical noise.
    ///
    /// # Errors
    /// [`MatrixError::NotSquare`] for non-square input,
    /// [`MatrixError::Singular`] when no usable pivot exists.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        if self.rows != self.cols {
            return Err(MatrixError::NotSquare);
        }
        let n = self.rows;

        // augmented rows [A | I], length 2n each
        let mut aug: Vec<Vec<f64>> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut r = Vec::with_capacity(2 * n);
                r.extend_from_slice(row);
                r.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
                r
            })
            .collect();

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&a, &b| {
                    aug[a][col]
                        .abs()
                        .partial_cmp(&aug[b][col].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .ok_or(MatrixError::Singular)?;
            if aug[pivot_row][col].abs() <= SINGULARITY_EPS {
                return Err(MatrixError::Singular);
            }
            aug.swap(col, pivot_row);

            let pivot = aug[col][col];
            for x in aug[col].iter_mut() {
                *x /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = aug[row][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..2 * n {
                    aug[row][j] -= factor * aug[col][j];
                }
            }
        }

        let data = aug.into_iter().map(|row| row[n..].to_vec()).collect();
        Ok(Matrix {
            rows: n,
            cols: n,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.cols(), b.cols());
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                assert!(
                    (a.get(i, j) - b.get(i, j)).abs() <= tol,
                    "mismatch at ({i},{j}): {} vs {}",
                    a.get(i, j),
                    b.get(i, j)
                );
            }
        }
    }

    #[test]
    fn test_new_validation() {
        assert_eq!(Matrix::new(vec![]), Err(MatrixError::Malformed));
        assert_eq!(Matrix::new(vec![vec![]]), Err(MatrixError::Malformed));
        assert_eq!(
            Matrix::new(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MatrixError::Malformed)
        );
        let m = Matrix::new(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.cols(), 3);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.get(0, 1), 4.0);
        assert_eq!(t.get(2, 0), 3.0);
        assert_close(&t.transpose(), &m, 0.0);
    }

    #[test]
    fn test_add() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::new(vec![vec![10.0, 20.0], vec![30.0, 40.0]]).unwrap();
        let c = a.add(&b).unwrap();
        assert_eq!(c.data(), &[vec![11.0, 22.0], vec![33.0, 44.0]]);
        let wrong = Matrix::new(vec![vec![1.0]]).unwrap();
        assert!(a.add(&wrong).is_err());
    }

    #[test]
    fn test_multiply_known_product() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::new(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.data(), &[vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn test_multiply_shapes() {
        let a = Matrix::new(vec![vec![1.0, 2.0, 3.0]]).unwrap(); // 1x3
        let b = Matrix::new(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap(); // 3x1
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.rows(), 1);
        assert_eq!(c.cols(), 1);
        assert_eq!(c.get(0, 0), 14.0);
        assert!(b.multiply(&b).is_err());
    }

    #[test]
    fn test_multiply_identity() {
        let a = Matrix::new(vec![vec![2.0, -1.0], vec![0.5, 3.0]]).unwrap();
        let i = Matrix::identity(2);
        assert_close(&a.multiply(&i).unwrap(), &a, 0.0);
        assert_close(&i.multiply(&a).unwrap(), &a, 0.0);
    }

    #[test]
    fn test_add_zeros_is_identity_element() {
        let a = Matrix::new(vec![vec![2.0, -1.0], vec![0.5, 3.0]]).unwrap();
        let z = Matrix::zeros(2, 2);
        assert_close(&a.add(&z).unwrap(), &a, 0.0);
    }

    #[test]
    fn test_multiply_vec() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let v = a.multiply_vec(&[1.0, 1.0]).unwrap();
        assert_eq!(v, vec![3.0, 7.0]);
        assert!(a.multiply_vec(&[1.0]).is_err());
    }

    #[test]
    fn test_inverse_2x2() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let inv = a.inverse().unwrap();
        let expected =
            Matrix::new(vec![vec![-2.0, 1.0], vec![1.5, -0.5]]).unwrap();
        assert_close(&inv, &expected, 1e-12);
    }

    #[test]
    fn test_inverse_times_self_is_identity() {
        let a = Matrix::new(vec![
            vec![4.0, 7.0, 2.0],
            vec![3.0, 6.0, 1.0],
            vec![2.0, 5.0, 3.0],
        ])
        .unwrap();
        let inv = a.inverse().unwrap();
        assert_close(&a.multiply(&inv).unwrap(), &Matrix::identity(3), 1e-10);
        assert_close(&inv.multiply(&a).unwrap(), &Matrix::identity(3), 1e-10);
    }

    #[test]
    fn test_inverse_identity() {
        let i = Matrix::identity(4);
        assert_close(&i.inverse().unwrap(), &i, 0.0);
    }

    #[test]
    fn test_inverse_singular() {
        // second row is twice the first
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(a.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn test_inverse_near_singular() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![2.0, 4.0 + 1e-13]]).unwrap();
        assert_eq!(a.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn test_inverse_not_square() {
        let a = Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(a.inverse(), Err(MatrixError::NotSquare));
    }

    #[test]
    fn test_inverse_needs_pivoting() {
        // zero in the leading position forces a row swap
        let a = Matrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let inv = a.inverse().unwrap();
        assert_close(&inv, &a, 1e-12);
    }
}
