//! Import entrypoints and implementations.
//!
//! Most callers should use [`import_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`ImportOptions`])
//! - decodes the first sheet into raw rows and normalises them into a [`crate::types::Dataset`]
//! - optionally reports success/failure/alerts to a [`crate::observability::SessionObserver`]
//!
//! Format-specific decoders are also available under [`excel`] and [`csv`]; [`normalize`] holds
//! the source-independent column rules.

pub mod csv;
pub mod excel;
pub mod normalize;
pub mod unified;

pub use normalize::normalize_rows;
pub use unified::{import_from_bytes, import_from_path, ImportOptions, SourceFormat};
