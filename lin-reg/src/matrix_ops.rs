use nalgebra::DMatrix;

use crate::{LinRegError, Result};

/// Build a matrix from row vectors, checking that it is rectangular and non-empty
pub fn from_rows(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
    if rows.is_empty() || ncols == 0 {
        return Err(LinRegError::EmptyInput);
    }
    if let Some(ragged) = rows.iter().find(|r| r.len() != ncols) {
        return Err(LinRegError::DimensionMismatch {
            expected: (1, ncols),
            found: (1, ragged.len()),
        });
    }

    let data: Vec<f64> = rows.iter().flatten().cloned().collect();
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &data))
}

/// Returns the transpose, so a `r x c` matrix becomes `c x r`.
/// A single row becomes a single column.
pub fn transpose(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    ensure_non_empty(m)?;

    Ok(m.transpose())
}

/// Matrix product `a * b`, requiring `cols(a) == rows(b)`
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    ensure_non_empty(a)?;
    ensure_non_empty(b)?;
    if a.ncols() != b.nrows() {
        return Err(LinRegError::DimensionMismatch {
            expected: (a.ncols(), b.ncols()),
            found: b.shape(),
        });
    }

    Ok(a * b)
}

/// Invert a square matrix with Gauss-Jordan elimination.
///
/// Each pivot row is normalized by its diagonal element which is then
/// eliminated from every other row. There is no row pivoting, so badly
/// conditioned matrices can lose precision even when they are invertible.
///
/// # Arguments:
/// m: The square matrix to invert
/// zero_tolerance: Relative tolerance. A pivot whose magnitude is at or below
/// `zero_tolerance` times the largest magnitude in the same row of `m` is
/// treated as zero, as is a non-finite pivot, and yields
/// [`LinRegError::SingularMatrix`]
pub fn inverse(m: &DMatrix<f64>, zero_tolerance: f64) -> Result<DMatrix<f64>> {
    ensure_non_empty(m)?;
    if !m.is_square() {
        return Err(LinRegError::DimensionMismatch {
            expected: (m.nrows(), m.nrows()),
            found: m.shape(),
        });
    }
    debug!("inverting {}x{} matrix", m.nrows(), m.ncols());

    let n = m.nrows();
    let mut work = m.clone();
    let mut inv = identity(n);

    for j in 0..n {
        let pivot = work[(j, j)];
        let row_scale = m.row(j).amax();
        trace!("pivot {}: {}, row scale: {}", j, pivot, row_scale);
        if !pivot.is_finite() || pivot.abs() <= zero_tolerance * row_scale {
            return Err(LinRegError::SingularMatrix { pivot: j });
        }

        for k in 0..n {
            work[(j, k)] /= pivot;
            inv[(j, k)] /= pivot;
        }

        for i in (0..n).filter(|i| *i != j) {
            let factor = work[(i, j)];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                let w = work[(j, k)];
                let v = inv[(j, k)];
                work[(i, k)] -= factor * w;
                inv[(i, k)] -= factor * v;
            }
        }
    }

    Ok(inv)
}

/// The `n x n` identity matrix
#[inline(always)]
pub fn identity(n: usize) -> DMatrix<f64> {
    DMatrix::identity(n, n)
}

#[inline(always)]
fn ensure_non_empty(m: &DMatrix<f64>) -> Result<()> {
    if m.is_empty() {
        return Err(LinRegError::EmptyInput);
    }
    Ok(())
}
