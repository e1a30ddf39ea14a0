//! # corrtab
//!
//! CLI for rendering correlation matrices as styled HTML tables.
//!
//! ## Usage
//!
//! ```bash
//! # Render a CSV matrix to a full HTML document on stdout
//! corrtab matrix.csv --title "Correlations"
//!
//! # Lower triangle only, two digits, faded non-significant values off
//! corrtab matrix.csv --triangle lower --digits 2 --no-fade
//!
//! # Style-inlined variant for embedding (no external stylesheet needed)
//! corrtab matrix.csv --output inline
//!
//! # Read from stdin, write to a file
//! cat matrix.csv | corrtab - -o report.html
//!
//! # Override a style rule ('+' prefix appends to the default)
//! corrtab matrix.csv --style "table=+border:1px solid black;"
//! ```
//!
//! The input is a comma-separated square numeric matrix. If the first line
//! is non-numeric it is taken as the variable labels.

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use corrtablib::{
    render_matrix, CorrMatrix, CorrMethod, Deletion, PAdjust, PStyle, RenderOptions, Triangle,
};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("corrtab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders correlation matrices as styled HTML tables")
        .arg(
            Arg::new("input")
                .help("CSV matrix file ('-' for stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Table caption"),
        )
        .arg(
            Arg::new("labels")
                .long("labels")
                .value_delimiter(',')
                .help("Variable labels (comma-separated; must match the matrix dimension)"),
        )
        .arg(
            Arg::new("triangle")
                .long("triangle")
                .default_value("both")
                .help("Which triangle carries values: both, upper, lower"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .default_value("pearson")
                .help("Correlation method: pearson, spearman, kendall"),
        )
        .arg(
            Arg::new("deletion")
                .long("deletion")
                .default_value("pairwise")
                .help("Missing-data deletion: pairwise, complete"),
        )
        .arg(
            Arg::new("adjust")
                .long("adjust")
                .default_value("holm")
                .help("p-adjustment: holm, hochberg, hommel, bonferroni, BH, BY, fdr, none"),
        )
        .arg(
            Arg::new("digits")
                .long("digits")
                .value_parser(clap::value_parser!(usize))
                .default_value("3")
                .help("Decimal places for values and numeric p-values"),
        )
        .arg(
            Arg::new("wrap")
                .long("wrap")
                .value_parser(clap::value_parser!(usize))
                .default_value("40")
                .help("Label wrap width in characters"),
        )
        .arg(
            Arg::new("no-p")
                .long("no-p")
                .action(ArgAction::SetTrue)
                .help("Do not show p-values"),
        )
        .arg(
            Arg::new("p-numeric")
                .long("p-numeric")
                .action(ArgAction::SetTrue)
                .help("Show numeric p-values instead of stars"),
        )
        .arg(
            Arg::new("no-fade")
                .long("no-fade")
                .action(ArgAction::SetTrue)
                .help("Do not fade non-significant values"),
        )
        .arg(
            Arg::new("remove-below")
                .long("remove-below")
                .value_parser(clap::value_parser!(f64))
                .help("Restyle values with |r| below this threshold as invisible"),
        )
        .arg(
            Arg::new("diagonal")
                .long("diagonal")
                .action(ArgAction::Append)
                .help("Diagonal cell text, one per variable (repeatable)"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .action(ArgAction::Append)
                .help("Style override as name=css ('+' prefix on css appends; repeatable)"),
        )
        .arg(
            Arg::new("strip-zero")
                .long("strip-zero")
                .action(ArgAction::SetTrue)
                .help("Strip the integer-part zero from values (0.250 -> .250)"),
        )
        .arg(
            Arg::new("strip-zero-p")
                .long("strip-zero-p")
                .action(ArgAction::SetTrue)
                .help("Strip the integer-part zero from p-values"),
        )
        .arg(
            Arg::new("no-compact")
                .long("no-compact")
                .action(ArgAction::SetTrue)
                .help("Keep formatting whitespace between markup tags"),
        )
        .arg(
            Arg::new("observations")
                .long("observations")
                .action(ArgAction::SetTrue)
                .help("Treat input rows as raw observations instead of a matrix"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_parser(["html", "inline", "body", "css", "json"])
                .default_value("html")
                .help("What to emit: html (full document), inline, body, css, json"),
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .help("Write to this file instead of stdout"),
        )
}

/// Read the input file, or stdin for '-'
fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
    }
}

/// Parse a comma-separated numeric matrix.
///
/// If the first non-empty line does not parse as numbers it is taken as a
/// header row of labels.
fn parse_matrix(text: &str) -> anyhow::Result<(Vec<Vec<f64>>, Vec<String>)> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let parsed: Result<Vec<f64>, _> = fields.iter().map(|f| f.parse::<f64>()).collect();
        match parsed {
            Ok(values) => rows.push(values),
            Err(_) if rows.is_empty() && labels.is_empty() => {
                labels = fields.iter().map(|s| s.to_string()).collect();
            }
            Err(_) => bail!("line {}: expected comma-separated numbers", lineno + 1),
        }
    }

    if rows.is_empty() {
        bail!("input contains no matrix rows");
    }
    Ok((rows, labels))
}

/// Split a `name=css` style override argument
fn parse_style_override(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((name, css)) if !name.is_empty() => Ok((name.to_string(), css.to_string())),
        _ => bail!("invalid style override '{}': expected name=css", arg),
    }
}

/// Build RenderOptions from matches plus any header labels from the input
fn build_options(matches: &ArgMatches, header_labels: Vec<String>) -> anyhow::Result<RenderOptions> {
    let method: CorrMethod = matches
        .get_one::<String>("method")
        .map(String::as_str)
        .unwrap_or("pearson")
        .parse()?;
    let deletion: Deletion = matches
        .get_one::<String>("deletion")
        .map(String::as_str)
        .unwrap_or("pairwise")
        .parse()?;
    let adjustment: PAdjust = matches
        .get_one::<String>("adjust")
        .map(String::as_str)
        .unwrap_or("holm")
        .parse()?;
    let triangle: Triangle = matches
        .get_one::<String>("triangle")
        .map(String::as_str)
        .unwrap_or("both")
        .parse()?;

    // --labels wins over a header row in the input
    let labels = matches
        .get_many::<String>("labels")
        .map(|v| v.cloned().collect())
        .unwrap_or(header_labels);

    let diagonal = matches
        .get_many::<String>("diagonal")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let mut style_overrides = Vec::new();
    if let Some(styles) = matches.get_many::<String>("style") {
        for arg in styles {
            style_overrides.push(parse_style_override(arg)?);
        }
    }

    let mut options = RenderOptions::new()
        .method(method)
        .deletion(deletion)
        .adjustment(adjustment)
        .triangle(triangle)
        .labels(labels)
        .diagonal(diagonal)
        .wrap(*matches.get_one::<usize>("wrap").unwrap_or(&40))
        .digits(*matches.get_one::<usize>("digits").unwrap_or(&3))
        .show_p(!matches.get_flag("no-p"))
        .fade_ns(!matches.get_flag("no-fade"))
        .strip_zero_value(matches.get_flag("strip-zero"))
        .strip_zero_p(matches.get_flag("strip-zero-p"))
        .compact(!matches.get_flag("no-compact"));
    options.style_overrides = style_overrides;

    if matches.get_flag("p-numeric") {
        options = options.p_style(PStyle::Numeric);
    }
    if let Some(threshold) = matches.get_one::<f64>("remove-below") {
        options = options.remove_below(*threshold);
    }
    if let Some(title) = matches.get_one::<String>("title") {
        options = options.title(title.clone());
    }

    Ok(options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");

    if matches.get_flag("observations") {
        // The core ships no statistics engine; correlation from raw
        // observations needs an engine-backed caller of the library.
        bail!(
            "raw observations require a statistics engine; \
             precompute the correlation matrix and pass that instead"
        );
    }

    let text = read_input(input)?;
    let (rows, header_labels) = parse_matrix(&text)?;
    let options = build_options(matches, header_labels)?;

    let matrix = CorrMatrix::from_rows(rows)?;
    let report = render_matrix(&matrix, &options)?;

    let output = match matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("html")
    {
        "inline" => report.inline_document.clone(),
        "body" => report.body.clone(),
        "css" => report.style_block.clone(),
        "json" => serde_json::to_string_pretty(&report)?,
        _ => report.full_document.clone(),
    };

    match matches.get_one::<String>("out") {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("failed to write '{}'", path))?;
        }
        None => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", Style::new().red().bold().apply_to("error:"), e);
            ExitCode::FAILURE
        }
    }
}
