//! Error types for corrtablib

use thiserror::Error;

/// Errors that can occur while building or rendering a correlation table
#[derive(Error, Debug)]
pub enum CorrTabError {
    /// Unrecognized correlation method selector
    #[error("unknown correlation method '{0}' (expected one of: pearson, spearman, kendall)")]
    UnknownMethod(String),

    /// Unrecognized missing-data deletion selector
    #[error("unknown missing-data deletion '{0}' (expected one of: pairwise, complete)")]
    UnknownDeletion(String),

    /// Unrecognized p-adjustment selector
    #[error(
        "unknown p-adjustment '{0}' (expected one of: holm, hochberg, hommel, bonferroni, BH, BY, fdr, none)"
    )]
    UnknownAdjustment(String),

    /// Unrecognized triangle mode selector
    #[error("unknown triangle mode '{0}' (expected one of: both, upper, lower)")]
    UnknownTriangle(String),

    /// Unrecognized p-value display style selector
    #[error("unknown p-value style '{0}' (expected one of: stars, numeric)")]
    UnknownPStyle(String),

    /// Matrix rows have inconsistent lengths
    #[error("matrix is not square: row {row} has {found} columns, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Matrix has no rows at all
    #[error("matrix has no rows")]
    EmptyMatrix,

    /// A p-value matrix does not match the correlation matrix dimension
    #[error("p-value matrix is {found}x{found} but correlation matrix is {expected}x{expected}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Raw observations need at least two variables to correlate
    #[error("need at least two observation columns, got {0}")]
    TooFewVariables(usize),

    /// The external statistics engine reported a failure
    #[error("correlation engine error: {0}")]
    Engine(String),
}
