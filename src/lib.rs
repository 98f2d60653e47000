//! `csv-to-json` is a small library for converting raw delimited text into
//! type-inferred, pretty-printed JSON under a caller-supplied
//! [`conversion::ConversionOptions`].
//!
//! The primary entrypoint is [`conversion::convert`]: one pure, synchronous
//! call that returns either a [`conversion::Conversion`] (output string +
//! metadata + warnings) or a [`ConversionError`] with a fixed user-facing
//! message. There is no I/O, no shared state between calls, and no
//! cancellation; scheduling off an interactive thread is the caller's concern.
//!
//! ## What the converter handles
//!
//! - **Delimiters**: comma, semicolon, tab, pipe, space, or an arbitrary
//!   (possibly multi-character) custom string.
//! - **Quoting/escaping**: a configurable quote character (outer quotes
//!   stripped, doubled quotes collapsed) and escape character (the following
//!   character is taken literally).
//! - **Headers**: taken from the first row, synthesized (`column_N`), or
//!   caller-supplied; duplicates renamed `name_2`, `name_3`, ...
//! - **Type inference**: null vocabulary, fixed boolean token sets,
//!   integer/decimal/scientific numbers, and (opt-in) date-shape
//!   normalization, applied in that order.
//! - **Output shapes**: array of records (default), array of arrays, or one
//!   column-major object.
//!
//! ## Quick example
//!
//! ```rust
//! use csv_to_json::conversion::{convert, ConversionOptions};
//!
//! # fn main() -> Result<(), csv_to_json::ConversionError> {
//! let conv = convert("name,active,age\nJohn,yes,30", &ConversionOptions::default())?;
//! assert_eq!(conv.metadata.row_count, 1);
//! assert_eq!(conv.metadata.headers, vec!["name", "active", "age"]);
//! assert!(conv.output.contains("\"active\": true"));
//! assert!(conv.output.contains("\"age\": 30"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Choosing an output shape
//!
//! ```rust
//! use csv_to_json::conversion::{convert, ConversionOptions, OutputFormat};
//!
//! # fn main() -> Result<(), csv_to_json::ConversionError> {
//! let opts = ConversionOptions {
//!     output_format: OutputFormat::Object,
//!     ..Default::default()
//! };
//! let conv = convert("id,name\n1,Ada\n2,Bob", &opts)?;
//! let value: serde_json::Value = serde_json::from_str(&conv.output)?;
//! assert_eq!(value["name"], serde_json::json!(["Ada", "Bob"]));
//! # Ok(())
//! # }
//! ```
//!
//! ## Failures are values
//!
//! ```rust
//! use csv_to_json::conversion::{convert, ConversionOptions};
//!
//! let err = convert("", &ConversionOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "CSV input is required");
//! ```
//!
//! ## Observability
//!
//! Conversion outcomes can be reported to a [`conversion::ConversionObserver`]
//! (stderr, file, or composite implementations are provided):
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use csv_to_json::conversion::{convert, ConversionOptions, Severity, StdErrObserver};
//!
//! let opts = ConversionOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     alert_at_or_above: Severity::Critical,
//!     ..Default::default()
//! };
//! // Input failures are reported to the observer and still returned as errors.
//! let _err = convert("   ", &opts).unwrap_err();
//! ```
//!
//! ## Modules
//!
//! - [`conversion`]: the conversion pipeline, options, metadata, observability
//! - [`types`]: the closed value union produced by coercion
//! - [`error`]: error types used across conversion

pub mod conversion;
pub mod error;
pub mod types;

pub use error::{ConversionError, ConversionResult};
