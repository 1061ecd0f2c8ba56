//! The session: one imported order sheet plus everything the user has done to it.
//!
//! A [`Session`] owns the original dataset, the current (filtered) dataset, the active filters
//! and the grid state (search term and sort order). All reads of "what the user sees" go through
//! [`Session::visible_rows`], which the quantity summary and both exports consume.
//!
//! ```no_run
//! use pod_worklist::session::Session;
//! use pod_worklist::types::FilterSet;
//!
//! # fn main() -> Result<(), pod_worklist::WorklistError> {
//! let mut session = Session::default();
//! session.import_path("orders.xlsx")?;
//! session.apply_filters(FilterSet::new().with("Bind Method", "Cased"))?;
//! println!("{}", session.quantity_summary()?);
//! let pdf = session.export_document()?;
//! pdf.write_to_dir(".")?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::SessionConfig;
use crate::error::{WorklistError, WorklistResult};
use crate::export::{self, ExportArtifact};
use crate::ingestion::{import_from_bytes, import_from_path, ImportOptions};
use crate::observability::{report, Operation, OperationContext, SessionObserver};
use crate::processing::{
    apply_filters, quantity_summary, row_matches_search, sort_rows, QuantitySummary, SortOrder,
};
use crate::types::{Dataset, FilterSet, VisibleRows};

/// Dropdown option meaning "no constraint on this column".
pub const ALL: &str = "All";

/// Dropdown options for one filterable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChoice {
    pub column: String,
    /// Sorted distinct values.
    pub values: Vec<String>,
}

impl FilterChoice {
    /// Options as shown in the dropdown: [`ALL`] followed by the values.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL).chain(self.values.iter().map(String::as_str))
    }

    /// Filter value for a selected option; [`ALL`] maps to the empty (unconstrained) value.
    pub fn value_for(option: &str) -> &str {
        if option == ALL { "" } else { option }
    }
}

/// State held while a dataset is loaded.
#[derive(Debug, Clone)]
struct Loaded {
    source: String,
    original: Arc<Dataset>,
    current: Arc<Dataset>,
    filters: FilterSet,
    search: String,
    sort: Option<SortOrder>,
}

/// A single-user worklist session.
pub struct Session {
    config: SessionConfig,
    observer: Option<Arc<dyn SessionObserver>>,
    loaded: Option<Loaded>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("observer_set", &self.observer.is_some())
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            observer: None,
            loaded: None,
        }
    }

    /// Attach an observer for operation outcomes.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// `true` once a file has been imported successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Name of the imported source file.
    pub fn source_name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.source.as_str())
    }

    // ---------------------------------------------------------------------
    // Import
    // ---------------------------------------------------------------------

    /// Read `path` into memory and import it, replacing any loaded dataset.
    ///
    /// On failure the session returns to the pre-import state.
    pub fn import_path(&mut self, path: impl AsRef<Path>) -> WorklistResult<&Dataset> {
        let path = path.as_ref();
        self.loaded = None;
        let dataset = import_from_path(path, &self.import_options())?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.install(name, dataset))
    }

    /// Import an in-memory source buffer, replacing any loaded dataset.
    ///
    /// On failure the session returns to the pre-import state.
    pub fn import_bytes(&mut self, name: &str, bytes: &[u8]) -> WorklistResult<&Dataset> {
        self.loaded = None;
        let dataset = import_from_bytes(name, bytes, &self.import_options())?;
        Ok(self.install(name.to_string(), dataset))
    }

    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            format: None,
            columns: self.config.columns.clone(),
            observer: self.observer.clone(),
            alert_at_or_above: self.config.alert_at_or_above,
        }
    }

    fn install(&mut self, source: String, dataset: Dataset) -> &Dataset {
        let dataset = Arc::new(dataset);
        let loaded = self.loaded.insert(Loaded {
            source,
            original: Arc::clone(&dataset),
            current: dataset,
            filters: FilterSet::new(),
            search: String::new(),
            sort: None,
        });
        loaded.current.as_ref()
    }

    /// Discard the loaded dataset, filters and grid state.
    pub fn back_to_import(&mut self) {
        if let Some(l) = self.loaded.take() {
            log::debug!("discarding session for {}", l.source);
        }
    }

    // ---------------------------------------------------------------------
    // Datasets and filters
    // ---------------------------------------------------------------------

    fn loaded(&self) -> WorklistResult<&Loaded> {
        self.loaded
            .as_ref()
            .ok_or_else(|| WorklistError::operation("no dataset loaded"))
    }

    fn loaded_mut(&mut self) -> WorklistResult<&mut Loaded> {
        self.loaded
            .as_mut()
            .ok_or_else(|| WorklistError::operation("no dataset loaded"))
    }

    /// The dataset as imported.
    pub fn original(&self) -> Option<&Arc<Dataset>> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    /// The dataset after the active filters (the original when none are active).
    pub fn current(&self) -> Option<&Arc<Dataset>> {
        self.loaded.as_ref().map(|l| &l.current)
    }

    /// Active filters in badge order.
    pub fn active_filters(&self) -> Option<&FilterSet> {
        self.loaded.as_ref().map(|l| &l.filters)
    }

    /// Dropdown options for every filterable column, in header order.
    pub fn filter_choices(&self) -> Vec<FilterChoice> {
        let Some(l) = &self.loaded else {
            return Vec::new();
        };
        l.original
            .headers
            .iter()
            .filter_map(|h| {
                let values = l.original.unique_values.get(h)?;
                (!values.is_empty()).then(|| FilterChoice {
                    column: h.clone(),
                    values: values.clone(),
                })
            })
            .collect()
    }

    /// Re-derive the current dataset from the original using `filters`.
    ///
    /// Filters are stored in column order, which is the order badges and export file names use.
    /// Re-rendering the grid clears the search term and sort order.
    pub fn apply_filters(&mut self, mut filters: FilterSet) -> WorklistResult<&Dataset> {
        if let Some(l) = &self.loaded {
            filters.order_by_headers(&l.original.headers);
        }
        let result = self.loaded().map(|l| apply_filters(&l.original, &filters));
        self.report(Operation::Filter, None, &result, |d| d.row_count());

        let current = result?;
        let l = self.loaded_mut()?;
        l.current = current;
        l.filters = filters;
        l.search.clear();
        l.sort = None;
        Ok(l.current.as_ref())
    }

    /// Drop all filters and restore the original dataset verbatim.
    pub fn reset_filters(&mut self) -> WorklistResult<&Dataset> {
        let l = self.loaded_mut()?;
        l.current = Arc::clone(&l.original);
        l.filters = FilterSet::new();
        l.search.clear();
        l.sort = None;
        Ok(l.current.as_ref())
    }

    // ---------------------------------------------------------------------
    // Grid state
    // ---------------------------------------------------------------------

    /// Set the free-text search term (blank clears it).
    pub fn set_search(&mut self, term: impl Into<String>) -> WorklistResult<()> {
        self.loaded_mut()?.search = term.into();
        Ok(())
    }

    pub fn search(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.search.as_str())
    }

    /// Order the visible rows by `order.column`.
    pub fn sort_by(&mut self, order: SortOrder) -> WorklistResult<()> {
        let l = self.loaded_mut()?;
        if l.current.index_of(&order.column).is_none() {
            return Err(WorklistError::operation(format!(
                "column '{}' not found in the table.",
                order.column
            )));
        }
        l.sort = Some(order);
        Ok(())
    }

    /// Sort ascending by the first spine column.
    pub fn sort_by_spine(&mut self) -> WorklistResult<()> {
        let rules = &self.config.columns;
        let l = self
            .loaded
            .as_mut()
            .ok_or_else(|| WorklistError::operation("no dataset loaded"))?;
        let idx = rules
            .spine_index(&l.current.headers)
            .ok_or_else(|| WorklistError::operation("Spine column not found in the table."))?;
        l.sort = Some(SortOrder::ascending(l.current.headers[idx].clone()));
        Ok(())
    }

    pub fn sort_order(&self) -> Option<&SortOrder> {
        self.loaded.as_ref().and_then(|l| l.sort.as_ref())
    }

    /// The rows the user currently sees: current dataset, then search, then sort.
    pub fn visible_rows(&self) -> WorklistResult<VisibleRows<'_>> {
        let l = self.loaded()?;
        let mut view = VisibleRows::all(&l.current);
        if !l.search.trim().is_empty() {
            view.rows.retain(|row| row_matches_search(row, &l.search));
        }
        if let Some(order) = &l.sort {
            if let Some(col) = l.current.index_of(&order.column) {
                sort_rows(
                    &mut view.rows,
                    view.headers,
                    col,
                    order.direction,
                    &self.config.columns,
                );
            }
        }
        Ok(view)
    }

    /// Quantity total over the visible rows.
    pub fn quantity_summary(&self) -> WorklistResult<QuantitySummary> {
        let view = self.visible_rows()?;
        Ok(quantity_summary(view.headers, &view.rows, &self.config.columns))
    }

    // ---------------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------------

    /// Render the visible rows as a PDF work list, stamped with the local time.
    pub fn export_document(&self) -> WorklistResult<ExportArtifact> {
        self.export_document_at(chrono::Local::now().naive_local())
    }

    /// Render the visible rows as a PDF work list stamped with `generated_at`.
    pub fn export_document_at(&self, generated_at: NaiveDateTime) -> WorklistResult<ExportArtifact> {
        let result = self.visible_rows().and_then(|view| {
            let l = self.loaded()?;
            export::export_document(
                &view,
                &l.filters,
                &self.config.export,
                &self.config.columns,
                generated_at,
            )
        });
        self.report_export(Operation::ExportDocument, &result);
        result
    }

    /// Write the visible rows into a single-sheet XLSX workbook.
    pub fn export_spreadsheet(&self) -> WorklistResult<ExportArtifact> {
        let result = self.visible_rows().and_then(|view| {
            let l = self.loaded()?;
            export::export_spreadsheet(&view, &l.filters, &self.config.export)
        });
        self.report_export(Operation::ExportSpreadsheet, &result);
        result
    }

    fn report_export(&self, operation: Operation, result: &WorklistResult<ExportArtifact>) {
        let source = match result {
            Ok(a) => Some(a.filename.clone()),
            Err(_) => None,
        };
        let rows = self.visible_rows().map(|v| v.len()).unwrap_or(0);
        self.report(operation, source, result, |_| rows);
    }

    fn report<T>(
        &self,
        operation: Operation,
        source: Option<String>,
        result: &WorklistResult<T>,
        rows: impl FnOnce(&T) -> usize,
    ) {
        let ctx = OperationContext { operation, source };
        report(
            self.observer.as_ref(),
            self.config.alert_at_or_above,
            &ctx,
            result,
            rows,
        );
    }
}
