//! Dense distance matrices and weighted combination.
//!
//! A [`DistanceMatrix`] is the only input the clustering engine accepts:
//! an n×n, symmetric, zero-diagonal, finite, non-negative `f64` matrix.
//! Those invariants are enforced **by construction**, not assumed from
//! input: every constructor runs the same normalization the upstream
//! data pipeline applies before clustering:
//!
//! ```text
//! M ← (M + Mᵀ) / 2        symmetrize accumulated float noise
//! diag(M) ← 0             remove self-distance artifacts
//! ```
//!
//! Several matrices measuring different similarity aspects (sequence
//! identity, gene order, orientation, ...) can be blended into one
//! composite matrix with [`DistanceMatrix::combine`], weighting each by a
//! fraction in `[0, 1]`.

use ndarray::Array2;

use crate::error::{Error, Result};

/// Convert a UI-style percentage weight (0–100) to the fractional weight
/// [`DistanceMatrix::combine`] expects.
#[inline]
pub fn weight_from_percent(percent: f64) -> f64 {
    percent / 100.0
}

/// A validated n×n distance matrix: symmetric, zero diagonal, all entries
/// finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Array2<f64>,
}

impl DistanceMatrix {
    /// Build a distance matrix from a raw square array.
    ///
    /// Rejects non-square and non-finite input, then normalizes:
    /// symmetrizes, zeroes the diagonal, and clamps negative round-off
    /// to `0.0`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the array is not square,
    /// [`Error::NonFiniteDistance`] if any entry is NaN or infinite.
    pub fn from_array(raw: Array2<f64>) -> Result<Self> {
        let (rows, cols) = raw.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: cols,
            });
        }
        if let Some((row, col)) = first_non_finite(&raw) {
            return Err(Error::NonFiniteDistance { row, col });
        }

        let mut data = raw;
        normalize(&mut data);
        Ok(Self { data })
    }

    /// Build a distance matrix from a flat row-major buffer of length n².
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the buffer length is not `n * n`;
    /// otherwise as [`DistanceMatrix::from_array`].
    pub fn from_rows(n: usize, values: Vec<f64>) -> Result<Self> {
        let found = values.len();
        let raw = Array2::from_shape_vec((n, n), values).map_err(|_| {
            Error::DimensionMismatch {
                expected: n * n,
                found,
            }
        })?;
        Self::from_array(raw)
    }

    /// Combine weighted distance matrices into one composite matrix.
    ///
    /// Computes `M = Σ wᵢ·Mᵢ` elementwise, then applies the shared
    /// normalization (symmetrize, zero diagonal). Weights are fractions
    /// in `[0, 1]` (see [`weight_from_percent`]) and need not sum to 1.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `matrices` is empty, the weight
    /// count differs from the matrix count, or any matrix disagrees on
    /// dimension.
    pub fn combine(matrices: &[DistanceMatrix], weights: &[f64]) -> Result<Self> {
        if weights.len() != matrices.len() {
            return Err(Error::DimensionMismatch {
                expected: matrices.len(),
                found: weights.len(),
            });
        }
        let first = matrices.first().ok_or(Error::DimensionMismatch {
            expected: 1,
            found: 0,
        })?;
        let n = first.n();
        for m in &matrices[1..] {
            if m.n() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: m.n(),
                });
            }
        }

        let mut combined = Array2::<f64>::zeros((n, n));
        for (m, &w) in matrices.iter().zip(weights) {
            combined.scaled_add(w, &m.data);
        }

        // Weighted sums of validated matrices stay finite and symmetric,
        // but the normalization is reapplied rather than assumed.
        normalize(&mut combined);
        Ok(Self { data: combined })
    }

    /// Matrix dimension n (number of items).
    #[inline]
    pub fn n(&self) -> usize {
        self.data.nrows()
    }

    /// Distance between items `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[(i, j)]
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

/// Symmetrize, zero the diagonal, and clamp negative round-off.
fn normalize(data: &mut Array2<f64>) {
    let n = data.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let mean = 0.5 * (data[(i, j)] + data[(j, i)]);
            let mean = if mean < 0.0 { 0.0 } else { mean };
            data[(i, j)] = mean;
            data[(j, i)] = mean;
        }
        data[(i, i)] = 0.0;
    }
}

fn first_non_finite(data: &Array2<f64>) -> Option<(usize, usize)> {
    data.indexed_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|((i, j), _)| (i, j))
}
