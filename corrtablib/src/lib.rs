//! # corrtablib
//!
//! Renders a square correlation matrix (optionally paired with a matching
//! matrix of significance p-values) into a styled HTML table, plus a
//! style-inlined variant for embedding where external stylesheets are not
//! supported (knitr-style documentation renderers, mail clients).
//!
//! ## Overview
//!
//! The library formats matrices; it never computes them. A precomputed
//! matrix renders directly; raw per-row observations are routed through a
//! caller-supplied [`CorrelationEngine`] that returns the coefficient
//! matrix together with raw and adjusted p-value matrices.
//!
//! Per cell, the renderer decides:
//!
//! - which triangle of the matrix carries values (the other half stays in
//!   the grid as blank placeholder cells)
//! - how the diagonal renders (per-variable override strings or blanks)
//! - whether the cell fades (raw p-value not significant)
//! - whether the value is suppressed (|r| under a threshold — restyled
//!   invisible, never removed)
//! - how the value and its p-value are formatted (digits, star vs. numeric
//!   notation, optional leading-zero stripping)
//!
//! Styling is a fixed table of named rules with defaults; overrides either
//! replace a rule or append to it with a `+` prefix. Both output variants
//! are emitted from the same structured table model.
//!
//! ## Example
//!
//! ```rust
//! use corrtablib::{render_matrix, CorrMatrix, RenderOptions, Triangle};
//!
//! let matrix = CorrMatrix::from_rows(vec![
//!     vec![1.00, 0.43, -0.17],
//!     vec![0.43, 1.00, 0.29],
//!     vec![-0.17, 0.29, 1.00],
//! ]).unwrap();
//!
//! let options = RenderOptions::new()
//!     .title("Correlations")
//!     .triangle(Triangle::Lower)
//!     .labels(vec!["age".into(), "income".into(), "score".into()]);
//!
//! let report = render_matrix(&matrix, &options).unwrap();
//! assert!(report.body.contains("<table"));
//! assert!(!report.inline_document.contains("class="));
//! ```

pub mod cell;
pub mod error;
pub mod format;
pub mod matrix;
pub mod options;
pub mod render;
pub mod style;
pub mod table;

pub use cell::{CellContent, CellResult, PText};
pub use error::CorrTabError;
pub use matrix::{resolve_labels, CorrMatrix, CorrelationEngine, EngineResult, PValues};
pub use options::{CorrMethod, Deletion, PAdjust, PStyle, RenderOptions, Triangle};
pub use render::{render_matrix, render_observations, RenderMeta, RenderReport};
pub use style::{StyleRule, StyleSheet};

/// Result type for corrtablib operations
pub type Result<T> = std::result::Result<T, CorrTabError>;
