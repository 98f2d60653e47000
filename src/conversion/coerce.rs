//! Field value coercion.
//!
//! An ordered chain of typed-parse attempts; the first success wins. The
//! precedence (null vocabulary, then boolean, then number, then date, then
//! string) is fixed and observable, so reordering it changes output.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Value;

use super::options::ConversionOptions;

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());
static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*\.\d+$").unwrap());
static SCIENTIFIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^-?\d*\.?\d+e[+-]?\d+$").unwrap());

/// Date-shape patterns paired with the chrono formats that validate them.
/// Order matters: the first matching shape is the one validated.
static DATE_SHAPES: Lazy<Vec<(Regex, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), vec!["%Y-%m-%d"]),
        (Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), vec!["%m/%d/%Y"]),
        (Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap(), vec!["%m-%d-%Y"]),
        (Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(), vec!["%Y/%m/%d"]),
        // %y must come first: %Y would accept a two-digit year as-is.
        (
            Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").unwrap(),
            vec!["%m/%d/%y", "%m/%d/%Y"],
        ),
    ]
});

const TRUE_TOKENS: &[&str] = &["true", "TRUE", "yes", "YES", "y", "Y", "1", "on", "ON"];
const FALSE_TOKENS: &[&str] = &["false", "FALSE", "no", "NO", "n", "N", "0", "off", "OFF"];

/// Strip one layer of matching surrounding quote characters.
pub(crate) fn strip_outer_quotes(s: &str, quote: char) -> &str {
    let q = quote.len_utf8();
    if s.len() >= 2 * q && s.starts_with(quote) && s.ends_with(quote) {
        &s[q..s.len() - q]
    } else {
        s
    }
}

/// Coerce one raw field into a typed [`Value`] under the configured options.
pub(crate) fn coerce_field(raw: &str, opts: &ConversionOptions) -> Value {
    let trimmed = if opts.trim_whitespace { raw.trim() } else { raw };
    let value = strip_outer_quotes(trimmed, opts.quote_char);

    if opts.null_values.iter().any(|n| n == value) {
        return Value::Null;
    }

    if opts.parse_booleans {
        if TRUE_TOKENS.contains(&value) {
            return Value::Bool(true);
        }
        if FALSE_TOKENS.contains(&value) {
            return Value::Bool(false);
        }
    }

    if opts.parse_numbers {
        if let Some(v) = parse_number(value) {
            return v;
        }
    }

    if opts.parse_dates {
        if let Some(normalized) = normalize_date(value) {
            return Value::Utf8(normalized);
        }
    }

    Value::Utf8(value.to_string())
}

/// Ordered number parse: integer, then decimal, then scientific notation.
/// Non-finite results (e.g. an overflowing exponent) are rejected.
fn parse_number(value: &str) -> Option<Value> {
    if INTEGER_RE.is_match(value) {
        if let Ok(n) = value.parse::<i64>() {
            return Some(Value::Int64(n));
        }
        // Past i64 range; keep the value numeric if f64 can hold it.
        return finite_float(value);
    }
    if DECIMAL_RE.is_match(value) || SCIENTIFIC_RE.is_match(value) {
        return finite_float(value);
    }
    None
}

fn finite_float(value: &str) -> Option<Value> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(Value::Float64(n)),
        _ => None,
    }
}

/// Returns `true` when the value matches one of the recognized date shapes,
/// without validating the calendar date. Used by the metadata type summary.
pub(crate) fn matches_date_shape(value: &str) -> bool {
    DATE_SHAPES.iter().any(|(re, _)| re.is_match(value))
}

/// Validate a date-shaped value and render it as `YYYY-MM-DDT00:00:00.000Z`.
///
/// Shapes that match but fail calendar validation (e.g. month 13) yield `None`
/// and the value stays a plain string.
fn normalize_date(value: &str) -> Option<String> {
    for (re, formats) in DATE_SHAPES.iter() {
        if !re.is_match(value) {
            continue;
        }
        for fmt in formats {
            if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
                return Some(format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ConversionOptions {
        ConversionOptions::default()
    }

    #[test]
    fn null_vocabulary_wins_over_everything() {
        let opts = defaults();
        for v in ["", "null", "NULL", "N/A"] {
            assert_eq!(coerce_field(v, &opts), Value::Null, "vocab entry {v:?}");
        }
    }

    #[test]
    fn booleans_take_precedence_over_numbers() {
        let opts = defaults();
        // "1"/"0" are boolean tokens and parse before the integer pattern.
        assert_eq!(coerce_field("1", &opts), Value::Bool(true));
        assert_eq!(coerce_field("0", &opts), Value::Bool(false));
        assert_eq!(coerce_field("yes", &opts), Value::Bool(true));
        assert_eq!(coerce_field("OFF", &opts), Value::Bool(false));
        // Token sets are case-sensitive as listed.
        assert_eq!(
            coerce_field("True", &opts),
            Value::Utf8("True".to_string())
        );
    }

    #[test]
    fn number_chain_order() {
        let opts = defaults();
        assert_eq!(coerce_field("30", &opts), Value::Int64(30));
        assert_eq!(coerce_field("-7", &opts), Value::Int64(-7));
        assert_eq!(coerce_field("3.25", &opts), Value::Float64(3.25));
        assert_eq!(coerce_field(".5", &opts), Value::Float64(0.5));
        assert_eq!(coerce_field("1.5e3", &opts), Value::Float64(1500.0));
        assert_eq!(coerce_field("2E-2", &opts), Value::Float64(0.02));
        // Overflowing exponent stays a string.
        assert_eq!(
            coerce_field("1e999", &opts),
            Value::Utf8("1e999".to_string())
        );
        // Integer past i64 range falls back to f64.
        assert_eq!(
            coerce_field("9223372036854775808", &opts),
            Value::Float64(9223372036854775808.0)
        );
    }

    #[test]
    fn date_normalization_requires_opt_in() {
        let mut opts = defaults();
        assert_eq!(
            coerce_field("2024-01-15", &opts),
            Value::Utf8("2024-01-15".to_string())
        );

        opts.parse_dates = true;
        assert_eq!(
            coerce_field("2024-01-15", &opts),
            Value::Utf8("2024-01-15T00:00:00.000Z".to_string())
        );
        assert_eq!(
            coerce_field("01/15/2024", &opts),
            Value::Utf8("2024-01-15T00:00:00.000Z".to_string())
        );
        // Matches the shape but is not a real date.
        assert_eq!(
            coerce_field("2024-13-40", &opts),
            Value::Utf8("2024-13-40".to_string())
        );
    }

    #[test]
    fn dequote_applies_before_null_check() {
        let opts = defaults();
        assert_eq!(
            coerce_field("\"null\"", &opts),
            Value::Null,
            "dequoted value is checked against the vocabulary"
        );
    }

    #[test]
    fn trim_disabled_preserves_whitespace() {
        let opts = ConversionOptions {
            trim_whitespace: false,
            parse_numbers: false,
            parse_booleans: false,
            ..Default::default()
        };
        assert_eq!(
            coerce_field(" x ", &opts),
            Value::Utf8(" x ".to_string())
        );
    }
}
