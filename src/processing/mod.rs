//! In-memory data transformations over imported datasets.
//!
//! Currently implemented:
//!
//! - [`apply_filters()`]: case-insensitive column-equality filtering
//! - [`row_matches_search()`]: free-text search across a row's cells
//! - [`sort_rows()`]: numeric-aware column ordering
//! - [`quantity_summary()`]: quantity totals over visible rows
//!
//! ## Example: filter → total
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use pod_worklist::columns::ColumnRules;
//! use pod_worklist::processing::{apply_filters, quantity_summary, QuantitySummary};
//! use pod_worklist::types::{Dataset, FilterSet};
//!
//! let row = |c: &str, q: &str| vec![c.to_string(), q.to_string()];
//! let ds = Arc::new(Dataset::new(
//!     vec!["Customer".to_string(), "Qty".to_string()],
//!     vec![row("Acme", "10"), row("Globex", "4"), row("ACME", "2")],
//!     BTreeMap::new(),
//! ));
//!
//! let filtered = apply_filters(&ds, &FilterSet::new().with("Customer", "acme"));
//! let total = quantity_summary(&filtered.headers, &filtered.rows, &ColumnRules::default());
//! assert_eq!(total, QuantitySummary::Total(12));
//! ```

pub mod filter;
pub mod reduce;
pub mod search;
pub mod sort;

pub use filter::{apply_filters, row_matches};
pub use reduce::{quantity_summary, QuantitySummary};
pub use search::row_matches_search;
pub use sort::{sort_rows, Direction, SortOrder};
