//! Render options and selector enums.
//!
//! This module contains all configuration types that control what the
//! renderer emits. Selector enums (`CorrMethod`, `Deletion`, `PAdjust`,
//! `Triangle`, `PStyle`) parse from their CLI spellings and reject unknown
//! values with an error naming the accepted set — the only hard failure
//! class in the library.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CorrTabError;

/// Correlation method used by the statistics engine and echoed in the
/// table's summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrMethod {
    #[default]
    Pearson,
    Spearman,
    Kendall,
}

impl CorrMethod {
    /// Lowercase selector spelling, as interpolated into the summary row.
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrMethod::Pearson => "pearson",
            CorrMethod::Spearman => "spearman",
            CorrMethod::Kendall => "kendall",
        }
    }
}

impl FromStr for CorrMethod {
    type Err = CorrTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pearson" => Ok(CorrMethod::Pearson),
            "spearman" => Ok(CorrMethod::Spearman),
            "kendall" => Ok(CorrMethod::Kendall),
            _ => Err(CorrTabError::UnknownMethod(s.to_string())),
        }
    }
}

/// Missing-data deletion strategy used by the statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Deletion {
    /// Pairwise deletion: each coefficient uses all complete pairs
    #[default]
    Pairwise,
    /// Complete-case (listwise) deletion
    Complete,
}

impl Deletion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deletion::Pairwise => "pairwise",
            Deletion::Complete => "complete",
        }
    }
}

impl FromStr for Deletion {
    type Err = CorrTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pairwise" => Ok(Deletion::Pairwise),
            "complete" | "listwise" => Ok(Deletion::Complete),
            _ => Err(CorrTabError::UnknownDeletion(s.to_string())),
        }
    }
}

/// Multiple-comparisons correction applied to p-values before display.
///
/// The correction itself happens in the statistics engine; the renderer only
/// names it in the summary row and keeps adjusted values separate from raw
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PAdjust {
    #[default]
    Holm,
    Hochberg,
    Hommel,
    Bonferroni,
    BenjaminiHochberg,
    BenjaminiYekutieli,
    Fdr,
    None,
}

impl PAdjust {
    pub fn as_str(&self) -> &'static str {
        match self {
            PAdjust::Holm => "holm",
            PAdjust::Hochberg => "hochberg",
            PAdjust::Hommel => "hommel",
            PAdjust::Bonferroni => "bonferroni",
            PAdjust::BenjaminiHochberg => "BH",
            PAdjust::BenjaminiYekutieli => "BY",
            PAdjust::Fdr => "fdr",
            PAdjust::None => "none",
        }
    }
}

impl FromStr for PAdjust {
    type Err = CorrTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // BH/BY are conventionally uppercase but accept any casing
        match s.to_lowercase().as_str() {
            "holm" => Ok(PAdjust::Holm),
            "hochberg" => Ok(PAdjust::Hochberg),
            "hommel" => Ok(PAdjust::Hommel),
            "bonferroni" => Ok(PAdjust::Bonferroni),
            "bh" => Ok(PAdjust::BenjaminiHochberg),
            "by" => Ok(PAdjust::BenjaminiYekutieli),
            "fdr" => Ok(PAdjust::Fdr),
            "none" => Ok(PAdjust::None),
            _ => Err(CorrTabError::UnknownAdjustment(s.to_string())),
        }
    }
}

/// Which half of the off-diagonal matrix carries values; the other half is
/// rendered as blank placeholder cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Triangle {
    #[default]
    Both,
    Upper,
    Lower,
}

impl Triangle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Triangle::Both => "both",
            Triangle::Upper => "upper",
            Triangle::Lower => "lower",
        }
    }
}

impl FromStr for Triangle {
    type Err = CorrTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" => Ok(Triangle::Both),
            "upper" => Ok(Triangle::Upper),
            "lower" => Ok(Triangle::Lower),
            _ => Err(CorrTabError::UnknownTriangle(s.to_string())),
        }
    }
}

/// How p-values are displayed next to the correlation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PStyle {
    /// Star notation appended inline (`***`, `**`, `*`)
    #[default]
    Stars,
    /// Numeric p on a following line, parenthesized in a reduced span
    Numeric,
}

impl PStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PStyle::Stars => "stars",
            PStyle::Numeric => "numeric",
        }
    }
}

impl FromStr for PStyle {
    type Err = CorrTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stars" | "star" => Ok(PStyle::Stars),
            "numeric" | "number" => Ok(PStyle::Numeric),
            _ => Err(CorrTabError::UnknownPStyle(s.to_string())),
        }
    }
}

/// Options controlling a single render call.
///
/// Constructed once per call and immutable for the duration of rendering.
/// Shape mismatches against the matrix (label count, diagonal override
/// count) never fail; they degrade to documented fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Correlation method (echoed in the summary row)
    pub method: CorrMethod,
    /// Missing-data deletion strategy (echoed in the summary row)
    pub deletion: Deletion,
    /// p-adjustment method (echoed in the summary row)
    pub adjustment: PAdjust,
    /// Which triangle of the matrix carries values
    pub triangle: Triangle,
    /// Optional table caption
    pub title: Option<String>,
    /// Display labels, one per variable; ignored unless the count matches
    /// the matrix dimension (fallback: generated `V1..Vn`)
    pub labels: Vec<String>,
    /// Character width at which labels wrap onto a new line
    pub wrap: usize,
    /// Show p-values next to correlation values (requires a p-value matrix)
    pub show_p: bool,
    /// Star vs. numeric p display
    pub p_style: PStyle,
    /// Fade cells whose raw p-value is not significant (p >= 0.05)
    pub fade_ns: bool,
    /// Restyle values with |r| below this threshold as invisible; the text
    /// is still emitted, the cell stays in the grid
    pub remove_below: Option<f64>,
    /// Decimal places for correlation values and numeric p-values
    pub digits: usize,
    /// Per-variable diagonal cell text; honored only when the count equals
    /// the matrix dimension, otherwise diagonal cells are blank
    pub diagonal: Vec<String>,
    /// Style-rule overrides as `(name, css)` pairs; a css value prefixed
    /// with `+` appends to the default rule, otherwise it replaces it
    pub style_overrides: Vec<(String, String)>,
    /// Strip the integer-part zero from formatted correlation values
    pub strip_zero_value: bool,
    /// Strip the integer-part zero from formatted p-values
    pub strip_zero_p: bool,
    /// Remove formatting-only whitespace between markup tags
    pub compact: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            method: CorrMethod::default(),
            deletion: Deletion::default(),
            adjustment: PAdjust::default(),
            triangle: Triangle::default(),
            title: None,
            labels: Vec::new(),
            wrap: 40,
            show_p: true,
            p_style: PStyle::default(),
            fade_ns: true,
            remove_below: None,
            digits: 3,
            diagonal: Vec::new(),
            style_overrides: Vec::new(),
            strip_zero_value: false,
            strip_zero_p: false,
            compact: true,
        }
    }
}

impl RenderOptions {
    /// Defaults: both triangles, stars with fading, 3 digits, compacted markup
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the correlation method
    pub fn method(mut self, method: CorrMethod) -> Self {
        self.method = method;
        self
    }

    /// Builder: set the missing-data deletion strategy
    pub fn deletion(mut self, deletion: Deletion) -> Self {
        self.deletion = deletion;
        self
    }

    /// Builder: set the p-adjustment method
    pub fn adjustment(mut self, adjustment: PAdjust) -> Self {
        self.adjustment = adjustment;
        self
    }

    /// Builder: set the triangle mode
    pub fn triangle(mut self, triangle: Triangle) -> Self {
        self.triangle = triangle;
        self
    }

    /// Builder: set the table caption
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set the display labels
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Builder: set the label wrap width
    pub fn wrap(mut self, wrap: usize) -> Self {
        self.wrap = wrap;
        self
    }

    /// Builder: toggle p-value display
    pub fn show_p(mut self, show: bool) -> Self {
        self.show_p = show;
        self
    }

    /// Builder: set the p display style
    pub fn p_style(mut self, style: PStyle) -> Self {
        self.p_style = style;
        self
    }

    /// Builder: toggle fading of non-significant cells
    pub fn fade_ns(mut self, fade: bool) -> Self {
        self.fade_ns = fade;
        self
    }

    /// Builder: set the suppression threshold
    pub fn remove_below(mut self, threshold: f64) -> Self {
        self.remove_below = Some(threshold);
        self
    }

    /// Builder: set decimal places
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Builder: set the diagonal override strings
    pub fn diagonal(mut self, diagonal: Vec<String>) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Builder: add a style-rule override
    pub fn style_override(mut self, name: impl Into<String>, css: impl Into<String>) -> Self {
        self.style_overrides.push((name.into(), css.into()));
        self
    }

    /// Builder: strip the integer-part zero from values
    pub fn strip_zero_value(mut self, strip: bool) -> Self {
        self.strip_zero_value = strip;
        self
    }

    /// Builder: strip the integer-part zero from p-values
    pub fn strip_zero_p(mut self, strip: bool) -> Self {
        self.strip_zero_p = strip;
        self
    }

    /// Builder: toggle whitespace compaction
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}
