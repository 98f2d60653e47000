//! Output shaping and serialization.

use serde_json::Value as JsonValue;

use super::ParsedRow;
use super::options::{ConversionOptions, OutputFormat};

/// Key used to tag records with their source line number.
pub const LINE_NUMBER_KEY: &str = "_line";

/// Shape parsed rows into the configured output structure.
pub(crate) fn shape(
    headers: &[String],
    rows: &[ParsedRow],
    opts: &ConversionOptions,
) -> JsonValue {
    match opts.output_format {
        OutputFormat::Records => shape_records(headers, rows, opts.include_line_numbers),
        OutputFormat::Array => shape_array(headers, rows, opts.has_headers),
        OutputFormat::Object => shape_object(headers, rows),
    }
}

fn shape_records(headers: &[String], rows: &[ParsedRow], line_numbers: bool) -> JsonValue {
    let records: Vec<JsonValue> = rows
        .iter()
        .map(|row| {
            let mut map = serde_json::Map::with_capacity(headers.len() + 1);
            if line_numbers {
                map.insert(LINE_NUMBER_KEY.to_string(), JsonValue::from(row.line as u64));
            }
            for (name, value) in headers.iter().zip(row.values.iter()) {
                map.insert(name.clone(), JsonValue::from(value));
            }
            JsonValue::Object(map)
        })
        .collect();
    JsonValue::Array(records)
}

fn shape_array(headers: &[String], rows: &[ParsedRow], with_header_row: bool) -> JsonValue {
    let mut out = Vec::with_capacity(rows.len() + 1);
    if with_header_row {
        out.push(JsonValue::Array(
            headers
                .iter()
                .map(|h| JsonValue::String(h.clone()))
                .collect(),
        ));
    }
    for row in rows {
        out.push(JsonValue::Array(
            row.values.iter().map(JsonValue::from).collect(),
        ));
    }
    JsonValue::Array(out)
}

fn shape_object(headers: &[String], rows: &[ParsedRow]) -> JsonValue {
    let mut map = serde_json::Map::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        let column: Vec<JsonValue> = rows
            .iter()
            .map(|row| row.values.get(idx).map(JsonValue::from).unwrap_or(JsonValue::Null))
            .collect();
        map.insert(name.clone(), JsonValue::Array(column));
    }
    JsonValue::Object(map)
}
