//! Line segmentation, quote/escape-aware field splitting, and header resolution.
//!
//! The field scanner is the only state machine in the pipeline: a single
//! left-to-right pass per line with a "inside quotes" toggle. Escape handling
//! takes precedence over quote toggling, so an escaped quote character lands in
//! the field verbatim.

use std::collections::HashSet;

use super::coerce::strip_outer_quotes;
use super::options::ConversionOptions;

/// One retained input line, tagged with its 1-based source line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Result of line segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segmented<'a> {
    pub lines: Vec<Line<'a>>,
    pub empty_skipped: usize,
    /// Set when `max_rows` stopped collection before the input was exhausted.
    pub capped: bool,
}

/// Split input on CR/LF boundaries, applying empty-line skipping and the row cap.
///
/// A single trailing empty line produced by a terminating newline is dropped.
/// When headers are enabled the header line is collected in addition to the
/// `max_rows` data-row budget.
pub(crate) fn segment<'a>(input: &'a str, opts: &ConversionOptions) -> Segmented<'a> {
    let mut raw: Vec<&str> = input
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    if input.ends_with('\n') {
        raw.pop();
    }

    let limit = if opts.max_rows > 0 {
        opts.max_rows + usize::from(opts.has_headers)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    let mut empty_skipped = 0;
    let mut capped = false;
    for (idx, text) in raw.into_iter().enumerate() {
        if opts.skip_empty_lines && text.trim().is_empty() {
            empty_skipped += 1;
            continue;
        }
        if lines.len() >= limit {
            capped = true;
            break;
        }
        lines.push(Line {
            number: idx + 1,
            text,
        });
    }

    Segmented {
        lines,
        empty_skipped,
        capped,
    }
}

/// Split one line into fields with a single left-to-right scan.
///
/// - the escape character consumes the following character and emits it
///   literally (a trailing escape is emitted as-is);
/// - the quote character toggles the in-quotes state without being emitted;
///   a doubled quote inside a quoted region emits one literal quote;
/// - the (possibly multi-character) delimiter terminates a field only
///   outside quotes.
pub(crate) fn split_fields(line: &str, delimiter: &str, quote: char, escape: char) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let delim: Vec<char> = delimiter.chars().collect();

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == escape {
            match chars.get(i + 1) {
                Some(&next) => {
                    field.push(next);
                    i += 2;
                }
                None => {
                    field.push(c);
                    i += 1;
                }
            }
            continue;
        }
        if c == quote {
            if in_quotes && chars.get(i + 1) == Some(&quote) {
                field.push(quote);
                i += 2;
            } else {
                in_quotes = !in_quotes;
                i += 1;
            }
            continue;
        }
        if !in_quotes && chars[i..].starts_with(delim.as_slice()) {
            fields.push(std::mem::take(&mut field));
            i += delim.len();
            continue;
        }
        field.push(c);
        i += 1;
    }
    fields.push(field);
    fields
}

/// Resolved header set plus the base names that needed deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderSet {
    pub names: Vec<String>,
    pub duplicates: Vec<String>,
}

/// Determine the header set.
///
/// `header_line` is the already-split first line when headers are enabled;
/// `width` is the column count the headers must cover (first data line width
/// when headers are disabled).
pub(crate) fn resolve_headers(
    header_line: Option<&[String]>,
    width: usize,
    opts: &ConversionOptions,
) -> HeaderSet {
    let raw: Vec<String> = match header_line {
        Some(cells) => cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let name = strip_outer_quotes(cell.trim(), opts.quote_char);
                if name.is_empty() {
                    generated_name(i)
                } else {
                    name.to_string()
                }
            })
            .collect(),
        None if !opts.custom_headers.trim().is_empty() => {
            let mut names: Vec<String> = opts
                .custom_headers
                .split(',')
                .map(|s| s.trim().to_string())
                .collect();
            names.truncate(width);
            for i in names.len()..width {
                names.push(generated_name(i));
            }
            // Blank entries in the caller-supplied list fall back too.
            for (i, name) in names.iter_mut().enumerate() {
                if name.is_empty() {
                    *name = generated_name(i);
                }
            }
            names
        }
        None => (0..width).map(generated_name).collect(),
    };

    dedup_headers(raw)
}

fn generated_name(index: usize) -> String {
    format!("column_{}", index + 1)
}

/// Rename repeated header names by appending `_2`, `_3`, ... until unique,
/// checked against every previously seen name.
fn dedup_headers(raw: Vec<String>) -> HeaderSet {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut names = Vec::with_capacity(raw.len());
    let mut duplicates = Vec::new();

    for base in raw {
        if seen.insert(base.clone()) {
            names.push(base);
            continue;
        }
        if !duplicates.contains(&base) {
            duplicates.push(base.clone());
        }
        let mut n = 2;
        let mut candidate = format!("{base}_{n}");
        while !seen.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{base}_{n}");
        }
        names.push(candidate);
    }

    HeaderSet { names, duplicates }
}
