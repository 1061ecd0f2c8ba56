//! `pod-worklist` turns print-on-demand order spreadsheets into filtered production work lists.
//!
//! A spreadsheet (or CSV) is imported into an in-memory [`types::Dataset`] that keeps only the
//! columns production cares about. Users narrow it with column filters, search and sort it, read a
//! running quantity total, and export exactly what they see as a PDF work list or an XLSX sheet.
//!
//! The primary entrypoint is [`session::Session`], which holds the imported data and the user's
//! filter and grid state. The lower-level modules can also be used directly.
//!
//! ## What you can import
//!
//! **File formats (auto-detected by extension):**
//!
//! - **Excel/workbooks**: `.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods` (first sheet only)
//! - **CSV**: `.csv`
//!
//! Every cell is imported as text. Dates become `YYYY-MM-DD`, booleans `TRUE`/`FALSE`, and empty
//! cells the empty string.
//!
//! ## Quick example
//!
//! ```rust
//! use pod_worklist::session::Session;
//! use pod_worklist::types::FilterSet;
//! use pod_worklist::processing::QuantitySummary;
//!
//! # fn main() -> Result<(), pod_worklist::WorklistError> {
//! let csv = b"Customer,Bind Method,Spine,ISBN,Title,Qty,Notes\n\
//! Acme,Cased,12,978-1,Alpha,100,rush\n\
//! Globex,Limp,8,978-2,Beta,50,\n\
//! Acme,Cased,3,978-3,Gamma,25,\n";
//!
//! let mut session = Session::default();
//! let ds = session.import_bytes("orders.csv", csv)?;
//! // `Notes` is neither filterable nor always kept.
//! assert_eq!(ds.headers, ["Customer", "Bind Method", "Spine", "ISBN", "Title", "Qty"]);
//!
//! session.apply_filters(FilterSet::new().with("Customer", "acme"))?;
//! session.sort_by_spine()?;
//! assert_eq!(session.quantity_summary()?, QuantitySummary::Total(125));
//! assert_eq!(session.quantity_summary()?.to_string(), "Total Quantity: 125");
//!
//! let xlsx = session.export_spreadsheet()?;
//! assert_eq!(xlsx.filename, "Cased_POD_Customer-acme.xlsx");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`session`]: the stateful import → filter → export workflow
//! - [`ingestion`]: source decoding and column normalisation
//! - [`processing`]: filtering, search, sort and quantity totals
//! - [`export`]: PDF and XLSX adapters plus file naming
//! - [`columns`]: column naming rules
//! - [`config`]: session configuration loaded from JSON
//! - [`observability`]: operation outcome observers
//! - [`types`]: dataset, view and filter types
//! - [`error`]: the error type shared across the crate

pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod numeric;
pub mod observability;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{ErrorKind, WorklistError, WorklistResult};
pub use session::Session;
pub use types::{Dataset, FilterSet, VisibleRows};
