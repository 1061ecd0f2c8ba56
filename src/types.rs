//! Core data model types.
//!
//! Import produces an in-memory [`Dataset`] of string cells. Filtering derives new datasets from
//! it using a [`FilterSet`].

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

/// In-memory table of order rows.
///
/// Rows are stored as `Vec<Vec<String>>` in the same order as [`Dataset::headers`]; every row
/// has exactly one value per header (empty string when the source cell was missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Ordered, unique column names.
    pub headers: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<String>>,
    /// Sorted distinct non-empty values per filterable header.
    pub unique_values: BTreeMap<String, Vec<String>>,
    /// Number of rows kept by import.
    pub total_rows: usize,
    /// Number of rows in this (possibly filtered) dataset.
    pub filtered_row_count: usize,
}

impl Dataset {
    /// Create a dataset whose counts both equal `rows.len()`.
    ///
    /// # Panics
    ///
    /// Panics if a row's length differs from the header count.
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        unique_values: BTreeMap<String, Vec<String>>,
    ) -> Self {
        for row in &rows {
            assert!(
                row.len() == headers.len(),
                "row length {} does not match header length {}",
                row.len(),
                headers.len()
            );
        }
        let n = rows.len();
        Self {
            headers,
            rows,
            unique_values,
            total_rows: n,
            filtered_row_count: n,
        }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a header by name, if present.
    pub fn index_of(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Borrow row `idx` as a header-keyed record.
    pub fn record(&self, idx: usize) -> Option<Record<'_>> {
        self.rows.get(idx).map(|values| Record {
            headers: &self.headers,
            values,
        })
    }

    /// Iterate all rows as records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            headers: &self.headers,
            values,
        })
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// Headers, unique values and `total_rows` are preserved; `filtered_row_count` is updated.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            headers: self.headers.clone(),
            filtered_row_count: rows.len(),
            rows,
            unique_values: self.unique_values.clone(),
            total_rows: self.total_rows,
        }
    }

    /// Serialize to the JSON shape consumed by grid front-ends.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data: Vec<Record<'_>> = self.records().collect();
        let mut s = serializer.serialize_struct("Dataset", 5)?;
        s.serialize_field("headers", &self.headers)?;
        s.serialize_field("data", &data)?;
        s.serialize_field("uniqueValues", &self.unique_values)?;
        s.serialize_field("totalRows", &self.total_rows)?;
        s.serialize_field("filteredRowCount", &self.filtered_row_count)?;
        s.end()
    }
}

/// A borrowed view of one row, keyed by header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    /// Value of `header`, if the dataset has that column.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|i| self.values[i].as_str())
    }

    /// Cell values in header order.
    pub fn values(&self) -> &'a [String] {
        self.values
    }

    /// `(header, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(self.values.len()))?;
        for (h, v) in self.iter() {
            m.serialize_entry(h, v)?;
        }
        m.end()
    }
}

/// The rows a user currently sees: filtered, searched and sorted, in display column order.
///
/// Summaries and exports are computed from this view rather than from a stored [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRows<'a> {
    pub headers: &'a [String],
    pub rows: Vec<&'a [String]>,
}

impl<'a> VisibleRows<'a> {
    /// Every row of `dataset`, in stored order.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            headers: &dataset.headers,
            rows: dataset.rows.iter().map(Vec::as_slice).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One column-equality constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub column: String,
    pub value: String,
}

impl ActiveFilter {
    /// Badge text shown for this filter (`"<column>: <value>"`).
    pub fn badge(&self) -> String {
        format!("{}: {}", self.column, self.value)
    }
}

/// Ordered set of column-equality constraints.
///
/// Insertion order is preserved and used for export filenames. Setting an existing column
/// replaces its value in place; an empty value means "no constraint" and is not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<ActiveFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FilterSet::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Constrain `column` to `value`; an empty value removes the constraint.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        if value.is_empty() {
            self.remove(&column);
            return;
        }
        match self.filters.iter_mut().find(|f| f.column == column) {
            Some(existing) => existing.value = value,
            None => self.filters.push(ActiveFilter { column, value }),
        }
    }

    /// Reorder constraints to follow the column order of `headers`.
    ///
    /// Columns missing from `headers` keep their relative order after the known ones.
    pub fn order_by_headers(&mut self, headers: &[String]) {
        self.filters.sort_by_key(|f| {
            headers
                .iter()
                .position(|h| *h == f.column)
                .unwrap_or(usize::MAX)
        });
    }

    /// Drop the constraint on `column`, if any.
    pub fn remove(&mut self, column: &str) {
        self.filters.retain(|f| f.column != column);
    }

    /// Required value for `column`, if constrained.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.filters.iter().all(|f| f.value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Active constraints in badge order.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveFilter> {
        self.filters.iter().filter(|f| !f.value.is_empty())
    }

    /// Badge texts in order.
    pub fn badges(&self) -> Vec<String> {
        self.iter().map(ActiveFilter::badge).collect()
    }
}

impl<C, V> FromIterator<(C, V)> for FilterSet
where
    C: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (c, v) in iter {
            set.set(c, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{Dataset, FilterSet};

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn sample() -> Dataset {
        let mut uv = BTreeMap::new();
        uv.insert("Customer".to_string(), s(&["Acme", "Globex"]));
        Dataset::new(
            s(&["Customer", "Qty"]),
            vec![s(&["Acme", "5"]), s(&["Globex", "7"])],
            uv,
        )
    }

    #[test]
    fn record_lookup_by_header() {
        let ds = sample();
        let rec = ds.record(1).unwrap();
        assert_eq!(rec.get("Customer"), Some("Globex"));
        assert_eq!(rec.get("Qty"), Some("7"));
        assert_eq!(rec.get("Missing"), None);
        assert!(ds.record(2).is_none());
    }

    #[test]
    fn filter_rows_keeps_total_and_updates_filtered_count() {
        let ds = sample();
        let out = ds.filter_rows(|row| row[0] == "Acme");
        assert_eq!(out.total_rows, 2);
        assert_eq!(out.filtered_row_count, 1);
        assert_eq!(out.headers, ds.headers);
        assert_eq!(out.unique_values, ds.unique_values);
    }

    #[test]
    #[should_panic(expected = "row length")]
    fn new_rejects_ragged_rows() {
        let _ = Dataset::new(s(&["a", "b"]), vec![s(&["only one"])], BTreeMap::new());
    }

    #[test]
    fn json_shape_keeps_header_order_in_rows() {
        let json = sample().to_json().unwrap();
        assert!(json.starts_with(r#"{"headers":["Customer","Qty"],"data":[{"Customer":"Acme","Qty":"5"}"#));
        assert!(json.contains(r#""uniqueValues":{"Customer":["Acme","Globex"]}"#));
        assert!(json.ends_with(r#""totalRows":2,"filteredRowCount":2}"#));
    }

    #[test]
    fn filter_set_preserves_order_and_replaces_in_place() {
        let mut f = FilterSet::new()
            .with("Customer", "Acme")
            .with("Spine", "12");
        f.set("Customer", "Globex");
        assert_eq!(f.badges(), vec!["Customer: Globex", "Spine: 12"]);

        f.set("Customer", "");
        assert_eq!(f.get("Customer"), None);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn filter_set_orders_by_header_position() {
        let mut f = FilterSet::new()
            .with("Unknown", "x")
            .with("Spine", "3")
            .with("Customer", "Acme");
        f.order_by_headers(&s(&["Customer", "Bind Method", "Spine"]));
        assert_eq!(f.badges(), vec!["Customer: Acme", "Spine: 3", "Unknown: x"]);
    }

    #[test]
    fn filter_set_of_only_empty_values_is_empty() {
        let f: FilterSet = vec![("Customer", ""), ("H", "")].into_iter().collect();
        assert!(f.is_empty());
    }
}
