//! Table assembly and the two markup emitters.
//!
//! The renderer first builds a structured [`Table`] model (caption, header,
//! body rows of [`CellResult`]s, summary row), then emits it twice from the
//! same model: once with `class` attributes referencing the stylesheet's
//! tag names, once with the literal rule text inlined into `style`
//! attributes. Emitting twice instead of rewriting finished markup means a
//! tag name occurring inside a label can never be clobbered.

use crate::cell::{self, CellContent, CellResult, PText};
use crate::matrix::{CorrMatrix, PValues};
use crate::options::{RenderOptions, Triangle};
use crate::style::StyleSheet;

/// Placeholder for blank cells; keeps empty cells visible in the grid.
const NBSP: &str = "&nbsp;";

/// The structured table model both emitters consume.
#[derive(Debug, Clone)]
pub struct Table {
    /// Caption text, already escaped
    pub caption: Option<String>,
    /// Wrapped, escaped column header labels (corner cell excluded)
    pub headers: Vec<String>,
    /// One row per matrix row
    pub rows: Vec<BodyRow>,
    /// Summary line describing method, deletion and adjustment
    pub summary: String,
}

/// A single body row: wrapped label plus one decided cell per column.
#[derive(Debug, Clone)]
pub struct BodyRow {
    pub label: String,
    pub cells: Vec<CellResult>,
}

/// Which attribute form an emitter writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// `class="..."` references into the stylesheet
    Classed,
    /// Literal rule text in `style="..."` attributes
    Inline,
}

/// Escape text destined for markup content.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wrap a label at `width` characters, greedily on word boundaries,
/// inserting `<br>` markers. Words longer than the width are left whole.
fn wrap_label(label: &str, width: usize) -> String {
    if width == 0 || label.len() <= width {
        return escape(label);
    }
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in label.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
        .iter()
        .map(|l| escape(l))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Summary templates keyed by triangle mode.
fn summary_text(options: &RenderOptions) -> String {
    let method = options.method.as_str();
    let deletion = options.deletion.as_str();
    let adjustment = options.adjustment.as_str();
    match options.triangle {
        Triangle::Both => format!(
            "Computed correlation used {}-method with {}-deletion; {}-adjusted p-values shown in the lower triangle only.",
            method, deletion, adjustment
        ),
        Triangle::Lower => format!(
            "Computed correlation used {}-method with {}-deletion; p-values adjusted with {}.",
            method, deletion, adjustment
        ),
        Triangle::Upper => format!(
            "Computed correlation used {}-method with {}-deletion; no p-adjustment applied.",
            method, deletion
        ),
    }
}

impl Table {
    /// Walk the matrix and assemble the full structured model.
    pub fn build(
        matrix: &CorrMatrix,
        p_values: Option<&PValues>,
        labels: &[String],
        options: &RenderOptions,
    ) -> Self {
        let dim = matrix.dim();
        let headers = labels
            .iter()
            .map(|l| wrap_label(l, options.wrap))
            .collect();
        let rows = (0..dim)
            .map(|i| BodyRow {
                label: wrap_label(&labels[i], options.wrap),
                cells: (0..dim)
                    .map(|j| cell::decide(i, j, matrix, p_values, options))
                    .collect(),
            })
            .collect();
        Table {
            caption: options.title.as_deref().map(escape),
            headers,
            rows,
            summary: summary_text(options),
        }
    }

    /// Emit the table markup in the requested attribute form.
    pub fn emit(&self, sheet: &StyleSheet, mode: Emit) -> String {
        let mut out = String::new();
        push_open(&mut out, "table", &[], sheet, mode, true);
        out.push('\n');

        if let Some(caption) = &self.caption {
            push_open(&mut out, "caption", &[], sheet, mode, true);
            out.push_str(caption);
            out.push_str("</caption>\n");
        }

        // Header row: blank corner cell, then one header cell per column
        out.push_str("<tr>\n");
        push_cell(&mut out, "th", &["thead"], NBSP, sheet, mode);
        for header in &self.headers {
            push_cell(&mut out, "th", &["thead", "centered"], header, sheet, mode);
        }
        out.push_str("</tr>\n");

        for row in &self.rows {
            out.push_str("<tr>\n");
            push_cell(
                &mut out,
                "td",
                &["tdata", "firstcol"],
                &row.label,
                sheet,
                mode,
            );
            for cell in &row.cells {
                let mut classes = vec!["tdata", "centered"];
                if cell.faded {
                    classes.push("faded");
                }
                if cell.removed {
                    classes.push("removed");
                }
                let text = cell_text(cell, sheet, mode);
                push_cell(&mut out, "td", &classes, &text, sheet, mode);
            }
            out.push_str("</tr>\n");
        }

        // Summary row spans the label column plus every data column
        out.push_str("<tr>\n");
        push_open(&mut out, "td", &["tdata", "summary"], sheet, mode, false);
        out.push_str(&format!(" colspan=\"{}\">", self.headers.len() + 1));
        out.push_str(&escape(&self.summary));
        out.push_str("</td>\n");
        out.push_str("</tr>\n");

        out.push_str("</table>\n");
        out
    }
}

/// Open an element, writing either a class list or inlined rule text.
///
/// For element-selector rules (table, caption) the inline form pulls the
/// rule keyed by the element name itself.
fn push_open(
    out: &mut String,
    element: &str,
    classes: &[&str],
    sheet: &StyleSheet,
    mode: Emit,
    close: bool,
) {
    out.push('<');
    out.push_str(element);
    match mode {
        Emit::Classed => {
            if !classes.is_empty() {
                out.push_str(" class=\"");
                out.push_str(&classes.join(" "));
                out.push('"');
            }
        }
        Emit::Inline => {
            let css = if classes.is_empty() {
                sheet.rule(element).unwrap_or_default().to_string()
            } else {
                sheet.inline_for(classes)
            };
            if !css.is_empty() {
                out.push_str(" style=\"");
                out.push_str(&css);
                out.push('"');
            }
        }
    }
    if close {
        out.push('>');
    }
}

/// Emit one complete cell element.
fn push_cell(
    out: &mut String,
    element: &str,
    classes: &[&str],
    text: &str,
    sheet: &StyleSheet,
    mode: Emit,
) {
    push_open(out, element, classes, sheet, mode, true);
    out.push_str(text);
    out.push_str("</");
    out.push_str(element);
    out.push_str(">\n");
}

/// Cell text including the p-value span, in the requested attribute form.
fn cell_text(cell: &CellResult, sheet: &StyleSheet, mode: Emit) -> String {
    match &cell.content {
        CellContent::Blank => NBSP.to_string(),
        CellContent::Diagonal(text) => escape(text),
        CellContent::Value { text, p } => match p {
            None => text.clone(),
            Some(PText::Stars(stars)) if stars.is_empty() => text.clone(),
            Some(PText::Stars(stars)) => {
                format!("{}{}", text, span("pval", stars, sheet, mode))
            }
            Some(PText::Numeric(value)) => {
                // "<0.001" carries a literal '<' that must not open a tag
                let parenthesized = format!("({})", escape(value));
                format!("{}<br>{}", text, span("pval", &parenthesized, sheet, mode))
            }
        },
    }
}

/// A styled span around p-value text.
fn span(class: &str, text: &str, sheet: &StyleSheet, mode: Emit) -> String {
    match mode {
        Emit::Classed => format!("<span class=\"{}\">{}</span>", class, text),
        Emit::Inline => format!(
            "<span style=\"{}\">{}</span>",
            sheet.class_css(class).unwrap_or_default(),
            text
        ),
    }
}

/// Remove formatting-only whitespace sitting between markup tags.
pub fn compact_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending = String::new();
    for ch in s.chars() {
        if ch.is_whitespace() {
            pending.push(ch);
            continue;
        }
        if !pending.is_empty() {
            // drop the run only when it separates '>' from '<'
            if !(out.ends_with('>') && ch == '<') {
                out.push_str(&pending);
            }
            pending.clear();
        }
        out.push(ch);
    }
    out
}

/// Wrap the table body and style block into a full HTML document.
pub fn document(style_block: &str, body: &str, title: Option<&str>) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        title.map(escape).unwrap_or_else(|| "Correlations".to_string()),
        style_block,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::resolve_labels;
    use crate::options::PStyle;

    fn matrix(n: usize) -> CorrMatrix {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 1.0 } else { 0.1 * (i + j) as f64 })
                    .collect()
            })
            .collect();
        CorrMatrix::from_rows(rows).unwrap()
    }

    fn build(n: usize, options: &RenderOptions) -> Table {
        let m = matrix(n);
        let labels = resolve_labels(&options.labels, n);
        Table::build(&m, None, &labels, options)
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_header_and_body_cell_counts() {
        // n+1 header cells, n rows of n+1 cells, for every triangle mode
        for triangle in [Triangle::Both, Triangle::Upper, Triangle::Lower] {
            let opts = RenderOptions::new().triangle(triangle).compact(false);
            let table = build(4, &opts);
            let markup = table.emit(&StyleSheet::with_defaults(), Emit::Classed);
            assert_eq!(count(&markup, "<th"), 5);
            // 4 rows * 5 cells + 1 summary cell
            assert_eq!(count(&markup, "<td"), 21);
            // header + 4 body + summary
            assert_eq!(count(&markup, "<tr>"), 6);
        }
    }

    #[test]
    fn test_blank_cells_match_triangle() {
        let opts = RenderOptions::new().triangle(Triangle::Upper);
        let table = build(3, &opts);
        // below-diagonal cells and the diagonal itself are blank: 3 + 3
        let blanks: usize = table
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_blank())
            .count();
        assert_eq!(blanks, 6);
    }

    #[test]
    fn test_caption_present_only_with_title() {
        let opts = RenderOptions::new().title("My <Title>");
        let table = build(2, &opts);
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Classed);
        assert!(markup.contains("<caption>My &lt;Title&gt;</caption>"));

        let table = build(2, &RenderOptions::new());
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Classed);
        assert!(!markup.contains("<caption"));
    }

    #[test]
    fn test_summary_row_spans_all_columns() {
        let table = build(3, &RenderOptions::new());
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Classed);
        assert!(markup.contains("colspan=\"4\""));
        assert!(markup.contains("pearson-method with pairwise-deletion"));
        assert!(markup.contains("lower triangle only"));
    }

    #[test]
    fn test_summary_templates_by_triangle() {
        let lower = build(2, &RenderOptions::new().triangle(Triangle::Lower));
        assert!(lower.summary.contains("p-values adjusted with holm"));
        let upper = build(2, &RenderOptions::new().triangle(Triangle::Upper));
        assert!(upper.summary.contains("no p-adjustment applied"));
    }

    #[test]
    fn test_inline_emit_has_no_class_attribute() {
        let table = build(3, &RenderOptions::new().title("T"));
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Inline);
        assert!(!markup.contains("class="));
        assert!(markup.contains("style=\""));
        assert!(markup.contains("<table style=\"border-collapse:collapse; border:none;\">"));
    }

    #[test]
    fn test_both_emits_share_structure() {
        let table = build(3, &RenderOptions::new());
        let sheet = StyleSheet::with_defaults();
        let classed = table.emit(&sheet, Emit::Classed);
        let inline = table.emit(&sheet, Emit::Inline);
        assert_eq!(count(&classed, "<tr>"), count(&inline, "<tr>"));
        assert_eq!(count(&classed, "<td"), count(&inline, "<td"));
    }

    #[test]
    fn test_wrap_label_inserts_breaks() {
        assert_eq!(wrap_label("tiny", 40), "tiny");
        assert_eq!(
            wrap_label("life satisfaction over time", 15),
            "life<br>satisfaction<br>over time"
        );
        // overlong single word stays whole
        assert_eq!(wrap_label("supercalifragilistic", 5), "supercalifragilistic");
    }

    #[test]
    fn test_label_with_tag_name_survives_inline_emit() {
        // a label containing a tag name must come through untouched
        let opts = RenderOptions::new().labels(vec!["faded score".to_string(), "x".to_string()]);
        let m = matrix(2);
        let labels = resolve_labels(&opts.labels, 2);
        let table = Table::build(&m, None, &labels, &opts);
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Inline);
        assert!(markup.contains("faded score"));
    }

    #[test]
    fn test_compact_markup_strips_between_tags() {
        assert_eq!(compact_markup("<tr>\n<td>a</td>\n</tr>\n"), "<tr><td>a</td></tr>");
        // whitespace inside text content survives
        assert_eq!(compact_markup("<td>a b</td>"), "<td>a b</td>");
    }

    #[test]
    fn test_numeric_p_on_following_line() {
        let m = matrix(2);
        let p = CorrMatrix::from_rows(vec![vec![0.0, 0.032], vec![0.032, 0.0]]).unwrap();
        let pv = PValues::new(p.clone(), p, 2).unwrap();
        let opts = RenderOptions::new().p_style(PStyle::Numeric).fade_ns(false);
        let labels = resolve_labels(&[], 2);
        let table = Table::build(&m, Some(&pv), &labels, &opts);
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Classed);
        assert!(markup.contains("<br><span class=\"pval\">(0.032)</span>"));
    }

    #[test]
    fn test_stars_appended_inline() {
        let m = matrix(2);
        let p = CorrMatrix::from_rows(vec![vec![0.0, 0.004], vec![0.004, 0.0]]).unwrap();
        let pv = PValues::new(p.clone(), p, 2).unwrap();
        let labels = resolve_labels(&[], 2);
        let table = Table::build(&m, Some(&pv), &labels, &RenderOptions::new());
        let markup = table.emit(&StyleSheet::with_defaults(), Emit::Classed);
        assert!(markup.contains("<span class=\"pval\">**</span>"));
    }

    #[test]
    fn test_document_skeleton() {
        let doc = document("table { x }\n", "<table></table>\n", Some("T"));
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<style>\ntable { x }\n</style>"));
        assert!(doc.contains("<title>T</title>"));
        assert!(doc.contains("<body>\n<table></table>"));
    }
}
