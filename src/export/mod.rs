//! Export adapters for the visible rows.
//!
//! Both adapters consume a [`crate::types::VisibleRows`] view, so exports match exactly what the
//! user sees, and derive their file name from the active filters (see [`filename`]).
//!
//! - [`document`]: landscape PDF work list
//! - [`spreadsheet`]: single-sheet XLSX

pub mod document;
pub mod filename;
pub mod spreadsheet;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WorklistResult;

pub use document::export_document;
pub use filename::export_file_name;
pub use spreadsheet::export_spreadsheet;

/// Naming and styling options shared by the export adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// File name stem; filter tokens are appended to it.
    pub base_name: String,
    /// Title printed at the top of the PDF.
    pub document_title: String,
    /// Worksheet name in the XLSX export.
    pub sheet_name: String,
    /// PDF body text size in points.
    pub body_font_size: f32,
    /// PDF cell padding in millimetres.
    pub cell_padding_mm: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_name: "Cased_POD".to_string(),
            document_title: "Cased POD Work List".to_string(),
            sheet_name: "Filtered Orders".to_string(),
            body_font_size: 9.0,
            cell_padding_mm: 3.0,
        }
    }
}

/// A rendered export, held in memory until the caller saves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its derived file name.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> WorklistResult<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
