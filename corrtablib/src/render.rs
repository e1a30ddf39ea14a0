//! Render entry points and the output record.

use serde::Serialize;

use crate::error::CorrTabError;
use crate::matrix::{resolve_labels, CorrMatrix, CorrelationEngine, PValues};
use crate::options::RenderOptions;
use crate::style::StyleSheet;
use crate::table::{compact_markup, document, Emit, Table};
use crate::Result;

/// Facts about a finished render, echoed alongside the documents.
#[derive(Debug, Clone, Serialize)]
pub struct RenderMeta {
    /// Matrix dimension (variables)
    pub dim: usize,
    /// Correlation method selector
    pub method: String,
    /// Missing-data deletion selector
    pub deletion: String,
    /// p-adjustment selector
    pub adjustment: String,
    /// Whether a p-value matrix was available
    pub has_p: bool,
}

/// Everything a render call produces.
///
/// All four documents are plain UTF-8 markup. `body` and `full_document`
/// reference the stylesheet through `class` attributes; `inline_document`
/// carries the literal rule text in `style` attributes so it can be
/// embedded where external stylesheets are unavailable.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    /// The style declarations, one per named rule
    pub style_block: String,
    /// The tag-based table markup on its own
    pub body: String,
    /// The tag-based table wrapped in a full HTML document
    pub full_document: String,
    /// The style-inlined table, ready for embedding
    pub inline_document: String,
    /// Render facts
    pub metadata: RenderMeta,
}

/// Render a precomputed correlation matrix.
///
/// With no p-value matrix available, p display and fading are disabled
/// regardless of the requested options.
pub fn render_matrix(matrix: &CorrMatrix, options: &RenderOptions) -> Result<RenderReport> {
    render_inner(matrix, None, options)
}

/// Correlate raw observations through `engine`, then render the result.
///
/// `observations` holds one inner vector per observation, one column per
/// variable; at least two variables are required.
pub fn render_observations(
    observations: &[Vec<f64>],
    options: &RenderOptions,
    engine: &dyn CorrelationEngine,
) -> Result<RenderReport> {
    let cols = observations.first().map(|row| row.len()).unwrap_or(0);
    if cols < 2 {
        return Err(CorrTabError::TooFewVariables(cols));
    }
    let result = engine.correlate(
        observations,
        options.method,
        options.deletion,
        options.adjustment,
    )?;
    let p_values = PValues::new(
        result.p_values.raw,
        result.p_values.adjusted,
        result.matrix.dim(),
    )?;
    render_inner(&result.matrix, Some(&p_values), options)
}

fn render_inner(
    matrix: &CorrMatrix,
    p_values: Option<&PValues>,
    options: &RenderOptions,
) -> Result<RenderReport> {
    let mut sheet = StyleSheet::with_defaults();
    sheet.merge(&options.style_overrides);

    let labels = resolve_labels(&options.labels, matrix.dim());
    let table = Table::build(matrix, p_values, &labels, options);

    let mut body = table.emit(&sheet, Emit::Classed);
    let mut inline_document = table.emit(&sheet, Emit::Inline);
    if options.compact {
        body = compact_markup(&body);
        inline_document = compact_markup(&inline_document);
    }

    let style_block = sheet.render_style_block();
    let full_document = document(&style_block, &body, options.title.as_deref());

    Ok(RenderReport {
        style_block,
        body,
        full_document,
        inline_document,
        metadata: RenderMeta {
            dim: matrix.dim(),
            method: options.method.as_str().to_string(),
            deletion: options.deletion.as_str().to_string(),
            adjustment: options.adjustment.as_str().to_string(),
            has_p: p_values.is_some(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::EngineResult;
    use crate::options::{CorrMethod, Deletion, PAdjust, PStyle, Triangle};

    fn matrix() -> CorrMatrix {
        CorrMatrix::from_rows(vec![
            vec![1.0, 0.43, -0.17],
            vec![0.43, 1.0, 0.29],
            vec![-0.17, 0.29, 1.0],
        ])
        .unwrap()
    }

    /// Fixed-output engine standing in for the statistics collaborator.
    struct StubEngine {
        raw_p: Vec<Vec<f64>>,
        adjusted_p: Vec<Vec<f64>>,
    }

    impl CorrelationEngine for StubEngine {
        fn correlate(
            &self,
            _observations: &[Vec<f64>],
            _method: CorrMethod,
            _deletion: Deletion,
            _adjustment: PAdjust,
        ) -> crate::Result<EngineResult> {
            let m = matrix();
            let raw = CorrMatrix::from_rows(self.raw_p.clone())?;
            let adjusted = CorrMatrix::from_rows(self.adjusted_p.clone())?;
            let dim = m.dim();
            Ok(EngineResult {
                matrix: m,
                p_values: PValues::new(raw, adjusted, dim)?,
            })
        }
    }

    fn stub() -> StubEngine {
        StubEngine {
            raw_p: vec![
                vec![0.0, 0.01, 0.2],
                vec![0.01, 0.0, 0.0004],
                vec![0.2, 0.0004, 0.0],
            ],
            adjusted_p: vec![
                vec![0.0, 0.032, 0.4],
                vec![0.032, 0.0, 0.0004],
                vec![0.4, 0.0004, 0.0],
            ],
        }
    }

    fn observations() -> Vec<Vec<f64>> {
        vec![vec![1.0, 2.0, 3.0], vec![2.0, 1.0, 4.0], vec![3.0, 3.0, 1.0]]
    }

    #[test]
    fn test_render_matrix_report_shape() {
        let report = render_matrix(&matrix(), &RenderOptions::new()).unwrap();
        assert!(report.style_block.contains(".faded"));
        assert!(report.body.starts_with("<table"));
        assert!(report.full_document.contains(&report.body));
        assert!(report.full_document.contains(&report.style_block));
        assert_eq!(report.metadata.dim, 3);
        assert_eq!(report.metadata.method, "pearson");
        assert!(!report.metadata.has_p);
    }

    #[test]
    fn test_precomputed_matrix_disables_p_features() {
        // p display and fading requested but no p matrix exists
        let opts = RenderOptions::new().p_style(PStyle::Numeric);
        let report = render_matrix(&matrix(), &opts).unwrap();
        assert!(!report.body.contains("pval"));
        assert!(!report.body.contains("faded\""));
    }

    #[test]
    fn test_inline_document_has_no_class_keyword() {
        let opts = RenderOptions::new().title("Correlations");
        let report = render_matrix(&matrix(), &opts).unwrap();
        assert!(!report.inline_document.contains("class="));
    }

    #[test]
    fn test_compaction_applied_to_both_variants() {
        let compacted = render_matrix(&matrix(), &RenderOptions::new()).unwrap();
        assert!(!compacted.body.contains(">\n<"));
        assert!(!compacted.inline_document.contains(">\n<"));

        let pretty = render_matrix(&matrix(), &RenderOptions::new().compact(false)).unwrap();
        assert!(pretty.body.contains(">\n<"));
        assert!(pretty.inline_document.contains(">\n<"));
    }

    #[test]
    fn test_observations_path_renders_p() {
        let report =
            render_observations(&observations(), &RenderOptions::new(), &stub()).unwrap();
        assert!(report.metadata.has_p);
        // adjusted p = 0.0004 renders three stars
        assert!(report.body.contains("***"));
        // raw p = 0.2 at (0,2) fades that cell
        assert!(report.body.contains("faded"));
    }

    #[test]
    fn test_observations_numeric_p_text() {
        let opts = RenderOptions::new().p_style(PStyle::Numeric);
        let report = render_observations(&observations(), &opts, &stub()).unwrap();
        // adjusted 0.0004 -> literal threshold text; adjusted 0.032 verbatim
        assert!(report.body.contains("(&lt;0.001)"));
        assert!(report.body.contains("(0.032)"));
    }

    #[test]
    fn test_fading_on_raw_while_displaying_adjusted() {
        // raw 0.01 (significant) vs adjusted 0.032: shown but not faded
        let opts = RenderOptions::new().p_style(PStyle::Numeric).compact(false);
        let report = render_observations(&observations(), &opts, &stub()).unwrap();
        let line = report
            .body
            .lines()
            .find(|l| l.contains("(0.032)"))
            .expect("cell with adjusted p");
        assert!(!line.contains("faded"));
    }

    #[test]
    fn test_too_few_variables() {
        let err = render_observations(&[vec![1.0]], &RenderOptions::new(), &stub()).unwrap_err();
        assert!(err.to_string().contains("two observation columns"));
    }

    #[test]
    fn test_style_override_reaches_style_block() {
        let opts = RenderOptions::new().style_override("table", "+border:red;");
        let report = render_matrix(&matrix(), &opts).unwrap();
        assert!(report
            .style_block
            .contains("table { border-collapse:collapse; border:none;border:red; }"));
    }

    #[test]
    fn test_report_serializes() {
        let report = render_matrix(&matrix(), &RenderOptions::new()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("body").is_some());
        assert!(json.get("inline_document").is_some());
        assert_eq!(json["metadata"]["dim"], 3);
    }

    #[test]
    fn test_triangle_metadata_and_labels() {
        let opts = RenderOptions::new()
            .triangle(Triangle::Upper)
            .labels(vec!["a".into(), "b".into(), "c".into()]);
        let report = render_matrix(&matrix(), &opts).unwrap();
        assert!(report.body.contains(">a</th>"));
        assert!(report.body.contains(">c</th>"));
    }
}
