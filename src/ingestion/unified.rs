//! Unified import entrypoint.
//!
//! Most callers should use [`import_from_path`] or [`import_from_bytes`], which decode a source
//! file into raw rows and normalise them into a [`crate::types::Dataset`].
//!
//! - If [`ImportOptions::format`] is `None`, the source format is inferred from the file
//!   extension.
//! - If a [`crate::observability::SessionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::columns::ColumnRules;
use crate::error::{WorklistError, WorklistResult};
use crate::observability::{report, Operation, OperationContext, SessionObserver, Severity};
use crate::types::Dataset;

use super::{csv, excel, normalize};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Spreadsheet/workbook formats (first sheet only).
    Excel,
    /// Comma-separated values.
    Csv,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Infer the format of a file name from its extension.
    pub fn from_file_name(name: &str) -> WorklistResult<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                WorklistError::malformed(format!("cannot infer format: '{name}' has no extension"))
            })?;
        Self::from_extension(ext).ok_or_else(|| {
            WorklistError::malformed(format!(
                "unsupported file type '.{ext}'; please select an Excel (.xlsx) file"
            ))
        })
    }
}

/// Options controlling import behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ImportOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<SourceFormat>,
    /// Column naming rules used during normalisation.
    pub columns: ColumnRules,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn SessionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("format", &self.format)
            .field("columns", &self.columns)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            format: None,
            columns: ColumnRules::default(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Read a source file into memory and import it.
///
/// # Examples
///
/// ```no_run
/// use pod_worklist::ingestion::{import_from_path, ImportOptions};
///
/// # fn main() -> Result<(), pod_worklist::WorklistError> {
/// let ds = import_from_path("orders.xlsx", &ImportOptions::default())?;
/// println!("rows={} columns={:?}", ds.row_count(), ds.headers);
/// # Ok(())
/// # }
/// ```
pub fn import_from_path(path: impl AsRef<Path>, options: &ImportOptions) -> WorklistResult<Dataset> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match std::fs::read(path) {
        Ok(bytes) => import_from_bytes(&name, &bytes, options),
        Err(e) => {
            let result: WorklistResult<Dataset> = Err(WorklistError::from(e));
            report_import(&name, options, &result);
            result
        }
    }
}

/// Import an in-memory source buffer. `name` is used for format inference and reporting.
pub fn import_from_bytes(name: &str, bytes: &[u8], options: &ImportOptions) -> WorklistResult<Dataset> {
    let result = decode_and_normalize(name, bytes, options);
    report_import(name, options, &result);
    result
}

fn decode_and_normalize(name: &str, bytes: &[u8], options: &ImportOptions) -> WorklistResult<Dataset> {
    let fmt = match options.format {
        Some(f) => f,
        None => SourceFormat::from_file_name(name)?,
    };
    let raw = match fmt {
        SourceFormat::Excel => excel::read_first_sheet(bytes)?,
        SourceFormat::Csv => csv::read_csv(bytes)?,
    };
    normalize::normalize_rows(raw, &options.columns)
}

fn report_import(name: &str, options: &ImportOptions, result: &WorklistResult<Dataset>) {
    let ctx = OperationContext {
        operation: Operation::Import,
        source: Some(name.to_string()),
    };
    report(
        options.observer.as_ref(),
        options.alert_at_or_above,
        &ctx,
        result,
        Dataset::row_count,
    );
}
