//! Conversion metadata: row/column stats, parse issues, and the sampled
//! per-column type summary.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::{Value, ValueKind};

use super::coerce::matches_date_shape;

/// At most this many parse issues are retained in [`Metadata::errors`]; the
/// total count is preserved through the warnings list.
pub const MAX_RECORDED_ERRORS: usize = 10;

/// Rows sampled by the type summary pass.
pub(crate) const TYPE_SAMPLE_ROWS: usize = 100;

const RAW_SNIPPET_LEN: usize = 80;

/// A row-level parse error recorded in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseIssue {
    /// 1-based source line number.
    pub line: usize,
    /// Expected-vs-actual description.
    pub message: String,
    /// The offending raw line, truncated.
    pub raw: String,
}

/// Inferred type summary for one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnType {
    /// Column name, after header deduplication.
    pub name: String,
    /// Summary: a single kind name, `mixed (string)`, `mixed (<kinds>)`, or `null`.
    pub inferred: String,
}

/// Metadata attached to every successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Number of parsed data rows in the output.
    pub row_count: usize,
    /// Number of output columns.
    pub column_count: usize,
    /// Detected column names, in output order.
    pub headers: Vec<String>,
    /// Per-column inferred type summary (sampled).
    pub column_types: Vec<ColumnType>,
    /// Total null values produced by coercion.
    pub null_count: usize,
    /// Blank lines dropped during segmentation.
    pub empty_lines_skipped: usize,
    /// Wall-clock conversion time in milliseconds.
    pub processing_time_ms: f64,
    /// Byte length of the serialized output.
    pub output_bytes: usize,
    /// Row-level parse errors, first [`MAX_RECORDED_ERRORS`] only.
    pub errors: Vec<ParseIssue>,
}

/// Truncate a raw line for inclusion in a [`ParseIssue`].
pub(crate) fn truncate_raw(line: &str) -> String {
    if line.chars().count() <= RAW_SNIPPET_LEN {
        line.to_string()
    } else {
        let mut s: String = line.chars().take(RAW_SNIPPET_LEN).collect();
        s.push_str("...");
        s
    }
}

/// Summarize the observed value kinds per column, sampling the first
/// [`TYPE_SAMPLE_ROWS`] rows.
///
/// Nulls are ignored once any non-null kind was observed; a column whose
/// sampled values are all null summarizes as `null`. Strings matching a
/// date-shape pattern count as `date`.
pub(crate) fn summarize_columns(headers: &[String], rows: &[Vec<Value>]) -> Vec<ColumnType> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mut kinds: BTreeSet<&'static str> = BTreeSet::new();
            for row in rows.iter().take(TYPE_SAMPLE_ROWS) {
                match row.get(idx) {
                    Some(Value::Null) | None => {}
                    Some(v @ Value::Utf8(s)) => {
                        if matches_date_shape(s) {
                            kinds.insert(ValueKind::Date.name());
                        } else {
                            kinds.insert(v.kind().name());
                        }
                    }
                    Some(v) => {
                        kinds.insert(v.kind().name());
                    }
                }
            }
            ColumnType {
                name: name.clone(),
                inferred: summarize_kinds(&kinds),
            }
        })
        .collect()
}

fn summarize_kinds(kinds: &BTreeSet<&'static str>) -> String {
    match kinds.len() {
        0 => "null".to_string(),
        1 => kinds.iter().next().map(|k| (*k).to_string()).unwrap_or_default(),
        _ if kinds.contains("string") => "mixed (string)".to_string(),
        _ => {
            let listed: Vec<&str> = kinds.iter().copied().collect();
            format!("mixed ({})", listed.join(", "))
        }
    }
}
