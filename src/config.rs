//! Session configuration.
//!
//! Every field has a default, so a host only needs to supply what it changes:
//!
//! ```rust
//! use pod_worklist::config::SessionConfig;
//!
//! let cfg = SessionConfig::from_json_str(r#"{ "export": { "base_name": "Limp_POD" } }"#).unwrap();
//! assert_eq!(cfg.export.base_name, "Limp_POD");
//! assert_eq!(cfg.export.sheet_name, "Filtered Orders");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnRules;
use crate::error::{WorklistError, WorklistResult};
use crate::export::ExportOptions;
use crate::observability::Severity;

/// Configuration for a [`crate::session::Session`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub columns: ColumnRules,
    pub export: ExportOptions,
    /// Failures at or above this severity are reported through `on_alert`.
    pub alert_at_or_above: Severity,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: ColumnRules::default(),
            export: ExportOptions::default(),
            alert_at_or_above: Severity::Critical,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> WorklistResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| WorklistError::malformed(format!("invalid configuration: {e}")))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> WorklistResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
