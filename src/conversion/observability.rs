use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConversionError;

use super::options::OutputFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (conversion failed on the input).
    Error,
    /// Critical error (internal serialization failures).
    Critical,
}

/// Context about a conversion attempt.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    /// Output shape requested for the conversion.
    pub format: OutputFormat,
    /// Byte length of the raw input text.
    pub input_bytes: usize,
}

/// Minimal stats reported on successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    /// Number of parsed data rows.
    pub rows: usize,
    /// Number of accumulated non-fatal warnings.
    pub warnings: usize,
}

/// Observer interface for conversion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ConversionObserver: Send + Sync {
    /// Called when conversion succeeds.
    fn on_success(&self, _ctx: &ConversionContext, _stats: ConversionStats) {}

    /// Called when conversion fails.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: Severity, _error: &ConversionError) {}

    /// Called when a conversion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs conversion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConversionObserver for StdErrObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        eprintln!(
            "[convert][ok] format={:?} input_bytes={} rows={} warnings={}",
            ctx.format, ctx.input_bytes, stats.rows, stats.warnings
        );
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        eprintln!(
            "[convert][{:?}] format={:?} input_bytes={} err={}",
            severity, ctx.format, ctx.input_bytes, error
        );
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        eprintln!(
            "[ALERT][convert][{:?}] format={:?} input_bytes={} err={}",
            severity, ctx.format, ctx.input_bytes, error
        );
    }
}

/// Appends conversion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConversionObserver for FileObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        self.append_line(&format!(
            "{} ok format={:?} input_bytes={} rows={} warnings={}",
            unix_ts(),
            ctx.format,
            ctx.input_bytes,
            stats.rows,
            stats.warnings
        ));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={:?} input_bytes={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.input_bytes,
            error
        ));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConversionError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={:?} input_bytes={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.input_bytes,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
