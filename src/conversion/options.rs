//! Conversion configuration.
//!
//! [`ConversionOptions`] is the explicit, fully-defaulted option set the
//! converter receives. It is constructed once per call and never mutated
//! during parsing; [`ConversionOptions::resolve_delimiter`] is the single
//! validation step that runs before any line is read.

use std::fmt;
use std::sync::Arc;

use crate::error::{ConversionError, ConversionResult};

use super::observability::{ConversionObserver, Severity};

/// Symbolic delimiter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// Tab character.
    Tab,
    /// `|`
    Pipe,
    /// Single space.
    Space,
    /// Use [`ConversionOptions::custom_delimiter`] verbatim.
    Custom,
}

impl Delimiter {
    /// Parse a symbolic delimiter name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "comma" => Some(Self::Comma),
            "semicolon" => Some(Self::Semicolon),
            "tab" => Some(Self::Tab),
            "pipe" => Some(Self::Pipe),
            "space" => Some(Self::Space),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Shape of the serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Array of per-row objects, column order preserved (default).
    Records,
    /// Array of arrays; the header row is prepended when headers are enabled.
    Array,
    /// Single object mapping each column name to its full value sequence.
    Object,
}

/// Options controlling conversion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ConversionOptions {
    /// Delimiter selection. `Custom` reads [`Self::custom_delimiter`].
    pub delimiter: Delimiter,
    /// Literal delimiter string used when [`Self::delimiter`] is `Custom`.
    /// May be multiple characters.
    pub custom_delimiter: String,
    /// Treat the first line as the header row.
    pub has_headers: bool,
    /// Drop (and count) blank lines instead of parsing them as rows.
    pub skip_empty_lines: bool,
    /// Trim surrounding whitespace from each field before coercion.
    pub trim_whitespace: bool,
    /// Quote character for the field scanner.
    pub quote_char: char,
    /// Escape character; consumes and emits the following character literally.
    pub escape_char: char,
    /// Output shape.
    pub output_format: OutputFormat,
    /// Attempt integer/decimal/scientific number coercion.
    pub parse_numbers: bool,
    /// Attempt boolean coercion from the fixed token sets.
    pub parse_booleans: bool,
    /// Attempt date-shape detection and normalization.
    pub parse_dates: bool,
    /// Ordered vocabulary of strings coerced to null.
    pub null_values: Vec<String>,
    /// Comma-joined header names used when [`Self::has_headers`] is off.
    pub custom_headers: String,
    /// Reject rows whose field count mismatches the header count instead of
    /// padding/truncating them.
    pub strict_mode: bool,
    /// Tag each record with its 1-based source line number (`Records` output).
    pub include_line_numbers: bool,
    /// Maximum number of data rows to collect; 0 means unlimited.
    pub max_rows: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field("delimiter", &self.delimiter)
            .field("custom_delimiter", &self.custom_delimiter)
            .field("has_headers", &self.has_headers)
            .field("skip_empty_lines", &self.skip_empty_lines)
            .field("trim_whitespace", &self.trim_whitespace)
            .field("quote_char", &self.quote_char)
            .field("escape_char", &self.escape_char)
            .field("output_format", &self.output_format)
            .field("parse_numbers", &self.parse_numbers)
            .field("parse_booleans", &self.parse_booleans)
            .field("parse_dates", &self.parse_dates)
            .field("null_values", &self.null_values)
            .field("custom_headers", &self.custom_headers)
            .field("strict_mode", &self.strict_mode)
            .field("include_line_numbers", &self.include_line_numbers)
            .field("max_rows", &self.max_rows)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            custom_delimiter: String::new(),
            has_headers: true,
            skip_empty_lines: true,
            trim_whitespace: true,
            quote_char: '"',
            escape_char: '\\',
            output_format: OutputFormat::Records,
            parse_numbers: true,
            parse_booleans: true,
            parse_dates: false,
            null_values: vec![
                String::new(),
                "null".to_string(),
                "NULL".to_string(),
                "N/A".to_string(),
            ],
            custom_headers: String::new(),
            strict_mode: false,
            include_line_numbers: false,
            max_rows: 0,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

impl ConversionOptions {
    /// Resolve the symbolic delimiter to its literal string.
    ///
    /// Errors with [`ConversionError::InvalidDelimiter`] when the resolution is
    /// empty (only possible for a blank custom delimiter).
    pub fn resolve_delimiter(&self) -> ConversionResult<String> {
        let literal = match self.delimiter {
            Delimiter::Comma => ",".to_string(),
            Delimiter::Semicolon => ";".to_string(),
            Delimiter::Tab => "\t".to_string(),
            Delimiter::Pipe => "|".to_string(),
            Delimiter::Space => " ".to_string(),
            Delimiter::Custom => self.custom_delimiter.clone(),
        };
        if literal.is_empty() {
            return Err(ConversionError::InvalidDelimiter);
        }
        Ok(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_from_name_accepts_known_names() {
        assert_eq!(Delimiter::from_name("comma"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::from_name(" Tab "), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_name("PIPE"), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::from_name("custom"), Some(Delimiter::Custom));
        assert_eq!(Delimiter::from_name(","), None);
        assert_eq!(Delimiter::from_name(""), None);
    }

    #[test]
    fn named_delimiters_resolve_to_their_literals() {
        for (name, literal) in [
            ("comma", ","),
            ("semicolon", ";"),
            ("tab", "\t"),
            ("pipe", "|"),
            ("space", " "),
        ] {
            let opts = ConversionOptions {
                delimiter: Delimiter::from_name(name).unwrap(),
                ..Default::default()
            };
            assert_eq!(opts.resolve_delimiter().unwrap(), literal, "name {name:?}");
        }
    }
}
