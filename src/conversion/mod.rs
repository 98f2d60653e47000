//! Conversion entrypoints and implementation.
//!
//! Most callers should use [`convert`], which:
//!
//! - validates the input and configuration once up front
//! - segments lines, resolves headers, parses and coerces every data row
//! - shapes and serializes the result as pretty-printed JSON
//! - optionally reports success/failure/alerts to a [`ConversionObserver`]
//!
//! The pipeline stages live under:
//! - [`options`]: configuration
//! - [`metadata`]: result metadata and the column type summary
//! - [`observability`]: observer trait and stock implementations

mod coerce;
mod output;
mod reader;

pub mod metadata;
pub mod observability;
pub mod options;

use std::fmt;
use std::time::Instant;

use crate::error::{ConversionError, ConversionResult};
use crate::types::Value;

pub use metadata::{ColumnType, Metadata, ParseIssue, MAX_RECORDED_ERRORS};
pub use observability::{
    CompositeObserver, ConversionContext, ConversionObserver, ConversionStats, FileObserver,
    Severity, StdErrObserver,
};
pub use options::{ConversionOptions, Delimiter, OutputFormat};
pub use output::LINE_NUMBER_KEY;

/// Row count above which a "consider chunking" warning is emitted.
const LARGE_DATASET_ROWS: usize = 10_000;

/// A successful conversion: serialized output plus metadata and warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Pretty-printed JSON output (2-space indentation).
    pub output: String,
    /// Row/column stats, type summary, and recorded parse issues.
    pub metadata: Metadata,
    /// Non-fatal warnings accumulated during conversion.
    pub warnings: Vec<String>,
}

/// One parsed data row, tagged with its source line number.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedRow {
    pub line: usize,
    pub values: Vec<Value>,
}

/// Convert raw delimited text into JSON under the supplied options.
///
/// This is a pure, synchronous, single call: no I/O, no shared state between
/// invocations, no cancellation. Scheduling it off an interactive thread is the
/// caller's concern. When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and warning counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
pub fn convert(input: &str, options: &ConversionOptions) -> ConversionResult<Conversion> {
    let ctx = ConversionContext {
        format: options.output_format,
        input_bytes: input.len(),
    };

    let result = convert_inner(input, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(conv) => obs.on_success(
                &ctx,
                ConversionStats {
                    rows: conv.metadata.row_count,
                    warnings: conv.warnings.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &ConversionError) -> Severity {
    match e {
        // Input-shape failures: the caller's data, not our machinery.
        ConversionError::EmptyInput
        | ConversionError::InvalidDelimiter
        | ConversionError::NoDataRows
        | ConversionError::NoParsableRows => Severity::Error,
        ConversionError::Serialize(_) => Severity::Critical,
    }
}

fn convert_inner(input: &str, options: &ConversionOptions) -> ConversionResult<Conversion> {
    let started = Instant::now();

    if input.trim().is_empty() {
        return Err(ConversionError::EmptyInput);
    }
    let delimiter = options.resolve_delimiter()?;

    let segmented = reader::segment(input, options);
    if segmented.lines.is_empty() {
        return Err(ConversionError::NoDataRows);
    }

    // Split every retained line once; the first becomes the header row when
    // headers are enabled.
    let split: Vec<(usize, &str, Vec<String>)> = segmented
        .lines
        .iter()
        .map(|line| {
            (
                line.number,
                line.text,
                reader::split_fields(line.text, &delimiter, options.quote_char, options.escape_char),
            )
        })
        .collect();

    let (header_cells, data) = if options.has_headers {
        match split.split_first() {
            Some((first, rest)) => (Some(first.2.as_slice()), rest),
            None => (None, &split[..]),
        }
    } else {
        (None, &split[..])
    };

    let width = match header_cells {
        Some(cells) => cells.len(),
        None => data.first().map(|(_, _, cells)| cells.len()).unwrap_or(0),
    };

    let headers = reader::resolve_headers(header_cells, width, options);
    let column_count = headers.names.len();

    let mut warnings = Vec::new();
    if !headers.duplicates.is_empty() {
        warnings.push(format!(
            "Duplicate header name(s) renamed: {}",
            headers.duplicates.join(", ")
        ));
    }

    let mut rows: Vec<ParsedRow> = Vec::with_capacity(data.len());
    let mut issues: Vec<ParseIssue> = Vec::new();
    let mut error_count = 0usize;
    let mut null_count = 0usize;

    for (line_number, raw_line, cells) in data {
        let mut cells = cells.clone();
        if cells.len() != column_count {
            if options.strict_mode {
                error_count += 1;
                if issues.len() < MAX_RECORDED_ERRORS {
                    issues.push(ParseIssue {
                        line: *line_number,
                        message: format!(
                            "expected {column_count} column(s), got {}",
                            cells.len()
                        ),
                        raw: metadata::truncate_raw(raw_line),
                    });
                }
                continue;
            }
            warnings.push(format!(
                "Line {line_number}: expected {column_count} column(s), got {}; row was {}",
                cells.len(),
                if cells.len() < column_count { "padded" } else { "truncated" }
            ));
            cells.resize(column_count, String::new());
        }

        let values: Vec<Value> = cells
            .iter()
            .map(|cell| {
                let v = coerce::coerce_field(cell, options);
                if v.is_null() {
                    null_count += 1;
                }
                v
            })
            .collect();
        rows.push(ParsedRow {
            line: *line_number,
            values,
        });
    }

    if rows.is_empty() {
        return Err(ConversionError::NoParsableRows);
    }

    let value_rows: Vec<Vec<Value>> = rows.iter().map(|r| r.values.clone()).collect();
    let column_types = metadata::summarize_columns(&headers.names, &value_rows);

    let shaped = output::shape(&headers.names, &rows, options);
    let output = serde_json::to_string_pretty(&shaped)?;

    if rows.len() > LARGE_DATASET_ROWS {
        warnings.push(format!(
            "Large dataset: {} rows parsed; consider chunking the input",
            rows.len()
        ));
    }
    if error_count > 0 {
        warnings.push(format!("{error_count} row(s) could not be parsed"));
    }
    if segmented.empty_skipped > 0 {
        warnings.push(format!("Skipped {} empty line(s)", segmented.empty_skipped));
    }
    if segmented.capped {
        warnings.push(format!(
            "Row limit of {} reached; remaining input was ignored",
            options.max_rows
        ));
    }

    let metadata = Metadata {
        row_count: rows.len(),
        column_count,
        headers: headers.names,
        column_types,
        null_count,
        empty_lines_skipped: segmented.empty_skipped,
        processing_time_ms: started.elapsed().as_secs_f64() * 1_000.0,
        output_bytes: output.len(),
        errors: issues,
    };

    Ok(Conversion {
        output,
        metadata,
        warnings,
    })
}

/// Convenience helper for callers that want an owned request object.
///
/// Useful when enqueueing conversion work in a job system.
#[derive(Clone)]
pub struct ConversionRequest {
    /// Raw delimited text to convert.
    pub input: String,
    /// Options controlling conversion.
    pub options: ConversionOptions,
}

impl fmt::Debug for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRequest")
            .field("input_bytes", &self.input.len())
            .field("options", &self.options)
            .finish()
    }
}

impl ConversionRequest {
    /// Execute the request by calling [`convert`].
    pub fn run(&self) -> ConversionResult<Conversion> {
        convert(&self.input, &self.options)
    }
}
