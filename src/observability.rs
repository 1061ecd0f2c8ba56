//! Outcome reporting for session operations.
//!
//! Every import, filter and export reports success or failure to an optional
//! [`SessionObserver`]. Failures at or above a configured [`Severity`] additionally trigger
//! [`SessionObserver::on_alert`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, WorklistError};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational event.
    Info,
    /// Non-fatal problem the user can fix (e.g. nothing to export).
    #[serde(alias = "warn")]
    Warning,
    /// The operation failed.
    Error,
    /// The source could not be read at all.
    Critical,
}

impl Severity {
    /// Severity assigned to a failed operation.
    pub fn for_error(err: &WorklistError) -> Self {
        match err.kind() {
            ErrorKind::SourceRead => Self::Critical,
            ErrorKind::EmptyExport => Self::Warning,
            ErrorKind::MalformedInput | ErrorKind::OperationFailure => Self::Error,
        }
    }
}

/// Which session operation an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Import,
    Filter,
    ExportDocument,
    ExportSpreadsheet,
}

/// Context about an operation attempt.
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub operation: Operation,
    /// Source file name for imports, output file name for exports.
    pub source: Option<String>,
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationStats {
    /// Rows imported, left after filtering, or exported.
    pub rows: usize,
}

/// Observer interface for operation outcomes.
pub trait SessionObserver: Send + Sync {
    /// Called when an operation succeeds.
    fn on_success(&self, _ctx: &OperationContext, _stats: OperationStats) {}

    /// Called when an operation fails.
    fn on_failure(&self, _ctx: &OperationContext, _severity: Severity, _error: &WorklistError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Report `result` to `observer`, alerting when severity reaches `alert_at_or_above`.
pub(crate) fn report<T>(
    observer: Option<&Arc<dyn SessionObserver>>,
    alert_at_or_above: Severity,
    ctx: &OperationContext,
    result: &Result<T, WorklistError>,
    rows: impl FnOnce(&T) -> usize,
) {
    let Some(obs) = observer else {
        return;
    };
    match result {
        Ok(v) => obs.on_success(ctx, OperationStats { rows: rows(v) }),
        Err(e) => {
            let sev = Severity::for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn SessionObserver>>) -> Self {
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

impl SessionObserver for CompositeObserver {
    fn on_success(&self, ctx: &OperationContext, stats: OperationStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards events to the `log` facade under the `pod_worklist` target.
#[derive(Debug, Default)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_success(&self, ctx: &OperationContext, stats: OperationStats) {
        log::info!(
            target: "pod_worklist",
            "[{:?}][ok] source={} rows={}",
            ctx.operation,
            ctx.source.as_deref().unwrap_or("-"),
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        let level = match severity {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error | Severity::Critical => log::Level::Error,
        };
        log::log!(
            target: "pod_worklist",
            level,
            "[{:?}][{:?}] source={} err={}",
            ctx.operation,
            severity,
            ctx.source.as_deref().unwrap_or("-"),
            error
        );
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        log::error!(
            target: "pod_worklist",
            "[ALERT][{:?}][{:?}] source={} err={}",
            ctx.operation,
            severity,
            ctx.source.as_deref().unwrap_or("-"),
            error
        );
    }
}

/// Appends events to a local log file.
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
            let _ = writeln!(f, "{} {line}", timestamp());
        }
    }
}

impl SessionObserver for FileObserver {
    fn on_success(&self, ctx: &OperationContext, stats: OperationStats) {
        self.append_line(&format!(
            "ok op={:?} source={} rows={}",
            ctx.operation,
            ctx.source.as_deref().unwrap_or("-"),
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        self.append_line(&format!(
            "fail severity={:?} op={:?} source={} err={}",
            severity,
            ctx.operation,
            ctx.source.as_deref().unwrap_or("-"),
            error
        ));
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &WorklistError) {
        self.append_line(&format!(
            "ALERT severity={:?} op={:?} source={} err={}",
            severity,
            ctx.operation,
            ctx.source.as_deref().unwrap_or("-"),
            error
        ));
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}
