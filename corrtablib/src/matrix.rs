//! Matrix storage, label resolution and the statistics-engine seam.
//!
//! The renderer never computes correlations itself. A precomputed
//! [`CorrMatrix`] can be rendered directly; raw per-row observations go
//! through a [`CorrelationEngine`] implementation supplied by the caller,
//! which returns the coefficient matrix together with raw and adjusted
//! p-value matrices.

use crate::error::CorrTabError;
use crate::options::{CorrMethod, Deletion, PAdjust};
use crate::Result;

/// A square matrix of correlation coefficients, row-major.
///
/// Conventionally symmetric, but symmetry is not enforced: the renderer
/// reads `(i, j)` directly, so an asymmetric input shows different values
/// depending on the triangle selected.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl CorrMatrix {
    /// Build a matrix from rows, validating squareness.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(CorrTabError::EmptyMatrix);
        }
        let mut values = Vec::with_capacity(dim * dim);
        for (row, cols) in rows.iter().enumerate() {
            if cols.len() != dim {
                return Err(CorrTabError::NotSquare {
                    row,
                    found: cols.len(),
                    expected: dim,
                });
            }
            values.extend_from_slice(cols);
        }
        Ok(Self { dim, values })
    }

    /// Number of rows (= columns = variables).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Value at `(row, col)`. Panics if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.dim + col]
    }
}

/// The two parallel p-value matrices carried through rendering.
///
/// `raw` drives the fading decision (unadjusted p >= 0.05); `adjusted`
/// drives the display text. The original distinction is preserved rather
/// than collapsed because formatting is not reversible and the two can
/// disagree near the significance threshold.
#[derive(Debug, Clone)]
pub struct PValues {
    /// Unadjusted p-values, used for fading decisions
    pub raw: CorrMatrix,
    /// Adjusted p-values, used for display text
    pub adjusted: CorrMatrix,
}

impl PValues {
    /// Pair raw and adjusted matrices, validating that both match `dim`.
    pub fn new(raw: CorrMatrix, adjusted: CorrMatrix, dim: usize) -> Result<Self> {
        for m in [&raw, &adjusted] {
            if m.dim() != dim {
                return Err(CorrTabError::ShapeMismatch {
                    expected: dim,
                    found: m.dim(),
                });
            }
        }
        Ok(Self { raw, adjusted })
    }
}

/// Resolve display labels against the matrix dimension.
///
/// Supplied labels are used only when their count equals `dim`; any other
/// count falls back to generated `V1..Vn` identifiers rather than failing.
pub fn resolve_labels(supplied: &[String], dim: usize) -> Vec<String> {
    if supplied.len() == dim {
        supplied.to_vec()
    } else {
        (1..=dim).map(|i| format!("V{}", i)).collect()
    }
}

/// Output of a correlation engine run.
#[derive(Debug, Clone)]
pub struct EngineResult {
    /// The correlation coefficient matrix
    pub matrix: CorrMatrix,
    /// Raw and adjusted p-value matrices, same shape as `matrix`
    pub p_values: PValues,
}

/// The external statistics collaborator.
///
/// Implementations compute the correlation matrix and both p-value
/// matrices from per-row observations. The call is synchronous and opaque
/// to the renderer; any engine failure surfaces as
/// [`CorrTabError::Engine`].
pub trait CorrelationEngine {
    /// Correlate `observations` (one inner slice per observation, one
    /// column per variable) under the given method, deletion strategy and
    /// p-adjustment.
    fn correlate(
        &self,
        observations: &[Vec<f64>],
        method: CorrMethod,
        deletion: Deletion,
        adjustment: PAdjust,
    ) -> Result<EngineResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_square() {
        let m = CorrMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(m.dim(), 2);
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.get(1, 0), 0.5);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = CorrMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();
        assert!(err.to_string().contains("not square"));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(CorrMatrix::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_asymmetric_reads_position_directly() {
        let m = CorrMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.8, 1.0]]).unwrap();
        assert_eq!(m.get(0, 1), 0.2);
        assert_eq!(m.get(1, 0), 0.8);
    }

    #[test]
    fn test_pvalues_shape_check() {
        let p = CorrMatrix::from_rows(vec![vec![0.0, 0.03], vec![0.03, 0.0]]).unwrap();
        assert!(PValues::new(p.clone(), p.clone(), 2).is_ok());
        assert!(PValues::new(p.clone(), p, 3).is_err());
    }

    #[test]
    fn test_labels_exact_count_used() {
        let labels = vec!["age".to_string(), "income".to_string()];
        assert_eq!(resolve_labels(&labels, 2), labels);
    }

    #[test]
    fn test_labels_mismatch_falls_back() {
        let labels = vec!["age".to_string()];
        assert_eq!(resolve_labels(&labels, 3), vec!["V1", "V2", "V3"]);
        assert_eq!(resolve_labels(&[], 2), vec!["V1", "V2"]);
    }
}
