//! The named-rule stylesheet and its inline projection table.
//!
//! A [`StyleSheet`] holds a fixed set of named rules with default CSS
//! texts. Caller overrides either replace a rule outright or, with a `+`
//! prefix, append to it; unknown rule names are skipped silently. The same
//! rule table backs both output variants: the style block emitted into the
//! document head, and the literal rule text substituted into `style`
//! attributes by the inline emitter.

/// A single named style rule.
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// Override key ("table", "header-cell", ...)
    pub name: &'static str,
    /// CSS selector emitted in the style block
    pub selector: &'static str,
    /// Class token used in `class="..."` attributes; empty for rules that
    /// target an element selector (table, caption)
    pub class: &'static str,
    /// Current rule text
    pub css: String,
}

/// The fixed rule table with caller overrides applied.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

/// Name, selector, class token and default text for every rule.
const DEFAULT_RULES: [(&str, &str, &str, &str); 10] = [
    (
        "table",
        "table",
        "",
        "border-collapse:collapse; border:none;",
    ),
    (
        "caption",
        "caption",
        "",
        "font-weight:bold; text-align:left;",
    ),
    (
        "header-cell",
        ".thead",
        "thead",
        "border-top:double; font-style:italic; font-weight:normal; padding:0.2cm;",
    ),
    ("data-cell", ".tdata", "tdata", "padding:0.2cm;"),
    (
        "first-column-cell",
        ".firstcol",
        "firstcol",
        "font-style:italic;",
    ),
    (
        "center-alignment",
        ".centered",
        "centered",
        "text-align:center;",
    ),
    (
        "summary-row",
        ".summary",
        "summary",
        "border-bottom:double; font-style:italic; font-size:0.9em; text-align:right;",
    ),
    ("faded-value", ".faded", "faded", "color:#999999;"),
    (
        "p-value-span",
        ".pval",
        "pval",
        "font-style:italic; font-size:0.8em; vertical-align:top;",
    ),
    ("value-removed", ".removed", "removed", "color:#ffffff;"),
];

impl Default for StyleSheet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StyleSheet {
    /// The default rule table, untouched by overrides.
    pub fn with_defaults() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|&(name, selector, class, css)| StyleRule {
                name,
                selector,
                class,
                css: css.to_string(),
            })
            .collect();
        Self { rules }
    }

    /// Apply caller overrides by value.
    ///
    /// A value starting with `+` appends the remainder to the current rule
    /// text; anything else replaces it. Unknown names are ignored.
    pub fn merge(&mut self, overrides: &[(String, String)]) {
        for (name, value) in overrides {
            if let Some(rule) = self.rules.iter_mut().find(|r| r.name == name) {
                if let Some(appended) = value.strip_prefix('+') {
                    rule.css.push_str(appended);
                } else {
                    rule.css = value.clone();
                }
            }
        }
    }

    /// The style block for the document head, one declaration per rule.
    pub fn render_style_block(&self) -> String {
        let mut block = String::new();
        for rule in &self.rules {
            block.push_str(rule.selector);
            block.push_str(" { ");
            block.push_str(&rule.css);
            block.push_str(" }\n");
        }
        block
    }

    /// Current rule text by override name.
    pub fn rule(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.css.as_str())
    }

    /// Current rule text by class token, for the inline emitter.
    pub fn class_css(&self, class: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| !r.class.is_empty() && r.class == class)
            .map(|r| r.css.as_str())
    }

    /// Concatenated rule text for a set of class tokens, in token order.
    pub fn inline_for(&self, classes: &[&str]) -> String {
        let mut css = String::new();
        for class in classes {
            if let Some(text) = self.class_css(class) {
                if !css.is_empty() && !css.ends_with(' ') {
                    css.push(' ');
                }
                css.push_str(text);
            }
        }
        css
    }
}
