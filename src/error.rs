use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Error type returned by the converter.
///
/// The first four variants carry fixed, user-facing messages; callers render them
/// verbatim. Conversion never panics on malformed input: every failure mode is a
/// returned `Err`.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input was empty or contained only whitespace.
    #[error("CSV input is required")]
    EmptyInput,

    /// The configured delimiter resolved to an empty string (e.g. a custom
    /// delimiter that was left blank).
    #[error("Invalid delimiter specified")]
    InvalidDelimiter,

    /// No lines remained after segmentation and empty-line filtering.
    #[error("No data rows found")]
    NoDataRows,

    /// Every data row was rejected (e.g. all rows skipped in strict mode).
    #[error("No valid data rows could be parsed")]
    NoParsableRows,

    /// The shaped output could not be serialized to JSON text.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
