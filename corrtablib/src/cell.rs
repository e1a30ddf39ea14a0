//! Per-cell decision logic.
//!
//! For every matrix position this module decides what the cell shows and
//! which conditional style tags it carries. Blanking (hidden triangle,
//! missing diagonal override) never removes a cell from the grid, and the
//! suppression threshold only restyles a value, it never deletes it.

use crate::format;
use crate::matrix::{CorrMatrix, PValues};
use crate::options::{PStyle, RenderOptions, Triangle};

/// Formatted p-value text together with its placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PText {
    /// Star notation, appended inline after the value
    Stars(String),
    /// Numeric text, shown parenthesized on a following line
    Numeric(String),
}

/// What a single cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Blank placeholder (hidden triangle half, or diagonal with no override)
    Blank,
    /// Diagonal override text
    Diagonal(String),
    /// A formatted correlation value, optionally with its p-value
    Value {
        text: String,
        p: Option<PText>,
    },
}

/// Content plus the conditional style tags that apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellResult {
    pub content: CellContent,
    /// Raw p at this position was not significant and fading is on
    pub faded: bool,
    /// |r| is below the suppression threshold; text stays, styling hides it
    pub removed: bool,
}

impl CellResult {
    fn blank() -> Self {
        Self {
            content: CellContent::Blank,
            faded: false,
            removed: false,
        }
    }

    /// Whether the cell renders as a blank placeholder.
    pub fn is_blank(&self) -> bool {
        self.content == CellContent::Blank
    }
}

/// Whether position `(i, j)` falls in the visible triangle.
fn visible(i: usize, j: usize, triangle: Triangle) -> bool {
    match triangle {
        Triangle::Both => true,
        Triangle::Upper => j > i,
        Triangle::Lower => i > j,
    }
}

/// Decide content and tags for the cell at `(i, j)`.
///
/// `p_values` is `None` when the matrix was precomputed; in that case p
/// display and fading are disabled no matter what the options request.
pub fn decide(
    i: usize,
    j: usize,
    matrix: &CorrMatrix,
    p_values: Option<&PValues>,
    options: &RenderOptions,
) -> CellResult {
    let dim = matrix.dim();

    if i == j {
        // Diagonal overrides are all-or-nothing: honored only when the
        // vector length matches the dimension exactly.
        if options.diagonal.len() == dim {
            return CellResult {
                content: CellContent::Diagonal(options.diagonal[i].clone()),
                faded: false,
                removed: false,
            };
        }
        return CellResult::blank();
    }

    if !visible(i, j, options.triangle) {
        return CellResult::blank();
    }

    let value = matrix.get(i, j);
    let text = format::format_value(value, options.digits, options.strip_zero_value);

    let p = p_values.filter(|_| options.show_p).map(|pv| {
        let adjusted = pv.adjusted.get(i, j);
        match options.p_style {
            PStyle::Stars => PText::Stars(format::format_p(
                adjusted,
                options.digits,
                false,
                options.strip_zero_p,
            )),
            PStyle::Numeric => PText::Numeric(format::format_p(
                adjusted,
                options.digits,
                true,
                options.strip_zero_p,
            )),
        }
    });

    let faded = p_values
        .map(|pv| format::is_faded(pv.raw.get(i, j), options.fade_ns))
        .unwrap_or(false);

    let removed = options
        .remove_below
        .map(|threshold| value.abs() < threshold.abs())
        .unwrap_or(false);

    CellResult {
        content: CellContent::Value { text, p },
        faded,
        removed,
    }
}
