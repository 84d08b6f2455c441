//! Result table rendering for the terminal, JSON and CSV.

use clap::ValueEnum;
use intelli_extract_core::{ResultSet, SchemaProfile, Score, ScoreTier};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CliResult;

/// Output format for `extract` and `inspect`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

/// One row as written to JSON output.
#[derive(Debug, Serialize)]
struct RenderedRow<'a> {
    attribute: &'a str,
    values: Map<String, Value>,
    score: &'a Score,
    tier: ScoreTier,
}

#[derive(Debug, Serialize)]
struct RenderedResult<'a> {
    rows: Vec<RenderedRow<'a>>,
    raw_text: &'a str,
}

/// Render a result set. `raw_text` controls whether the table output
/// appends the raw OCR text; JSON always carries it and CSV never does.
pub fn render(result: &ResultSet, profile: &SchemaProfile, format: OutputFormat, raw_text: bool) -> CliResult<String> {
    match format {
        OutputFormat::Table => Ok(render_table(result, profile, raw_text)),
        OutputFormat::Json => render_json(result, profile),
        OutputFormat::Csv => render_csv(result, profile),
    }
}

fn header(profile: &SchemaProfile) -> Vec<String> {
    let mut columns = vec!["Attribute".to_string()];
    columns.extend(profile.method_labels.iter().cloned());
    columns.push("Score".to_string());
    columns.push("Tier".to_string());
    columns
}

fn cells(result: &ResultSet, profile: &SchemaProfile) -> Vec<Vec<String>> {
    result
        .rows
        .iter()
        .map(|row| {
            let mut line = vec![row.attribute.clone()];
            line.extend(row.values.iter().cloned());
            line.push(row.score.to_string());
            line.push(row.score.tier(profile.score_scale).to_string());
            line
        })
        .collect()
}

fn render_table(result: &ResultSet, profile: &SchemaProfile, raw_text: bool) -> String {
    let header = header(profile);
    let body = cells(result, profile);

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &body {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_line = |line: &[String]| {
        line.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&header));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');

    if body.is_empty() {
        out.push_str("(no attributes extracted)\n");
    }
    for line in &body {
        out.push_str(&format_line(line));
        out.push('\n');
    }

    if raw_text && !result.raw_text.is_empty() {
        out.push_str("\nRaw text:\n");
        out.push_str(&result.raw_text);
        out.push('\n');
    }

    out
}

fn render_json(result: &ResultSet, profile: &SchemaProfile) -> CliResult<String> {
    let rows = result
        .rows
        .iter()
        .map(|row| RenderedRow {
            attribute: &row.attribute,
            values: profile
                .method_labels
                .iter()
                .zip(row.values.iter())
                .map(|(label, value)| (label.clone(), Value::String(value.clone())))
                .collect(),
            score: &row.score,
            tier: row.score.tier(profile.score_scale),
        })
        .collect();

    let rendered = RenderedResult {
        rows,
        raw_text: &result.raw_text,
    };
    Ok(serde_json::to_string_pretty(&rendered)?)
}

fn render_csv(result: &ResultSet, profile: &SchemaProfile) -> CliResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let header: Vec<String> = header(profile).iter().map(|h| h.to_lowercase()).collect();
    writer.write_record(&header)?;
    for line in cells(result, profile) {
        writer.write_record(&line)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
