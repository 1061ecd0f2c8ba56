//! Column-equality filtering for [`crate::types::Dataset`].

use std::sync::Arc;

use crate::types::{Dataset, FilterSet};

/// Returns `true` if `row` satisfies every non-empty constraint in `filters`.
///
/// Values compare case-insensitively by exact equality. A constraint on a column that is not in
/// `headers` compares against the empty string.
pub fn row_matches(headers: &[String], row: &[String], filters: &FilterSet) -> bool {
    filters.iter().all(|f| {
        let cell = headers
            .iter()
            .position(|h| *h == f.column)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("");
        eq_ignore_case(cell, &f.value)
    })
}

/// Derive the filtered view of `original`.
///
/// An empty filter set returns `original` itself (shared, not copied). Otherwise the result has
/// the same headers and unique values, only matching rows, and an updated `filtered_row_count`.
pub fn apply_filters(original: &Arc<Dataset>, filters: &FilterSet) -> Arc<Dataset> {
    if filters.is_empty() {
        return Arc::clone(original);
    }

    // Resolve column positions once; `None` marks a column the dataset does not have.
    let constraints: Vec<(Option<usize>, String)> = filters
        .iter()
        .map(|f| (original.index_of(&f.column), f.value.to_lowercase()))
        .collect();

    let out = original.filter_rows(|row| {
        constraints.iter().all(|(idx, want)| {
            let cell = idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("");
            cell.to_lowercase() == *want
        })
    });
    log::debug!(
        "filters {:?} kept {} of {} rows",
        filters.badges(),
        out.row_count(),
        original.row_count()
    );
    Arc::new(out)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::{apply_filters, row_matches};
    use crate::types::{Dataset, FilterSet};

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn sample() -> Arc<Dataset> {
        Arc::new(Dataset::new(
            s(&["Customer", "Bind Method", "Qty"]),
            vec![
                s(&["acme", "Cased", "10"]),
                s(&["Globex", "Cased", "5"]),
                s(&["Acme", "Limp", "7"]),
                s(&["Acme Ltd", "Cased", "1"]),
            ],
            BTreeMap::new(),
        ))
    }

    #[test]
    fn empty_filter_set_returns_the_original() {
        let ds = sample();
        let out = apply_filters(&ds, &FilterSet::new());
        assert!(Arc::ptr_eq(&ds, &out));

        let blanks: FilterSet = vec![("Customer", "")].into_iter().collect();
        assert!(Arc::ptr_eq(&ds, &apply_filters(&ds, &blanks)));
    }

    #[test]
    fn equality_is_case_insensitive_and_exact() {
        let ds = sample();
        let out = apply_filters(&ds, &FilterSet::new().with("Customer", "ACME"));
        assert_eq!(out.row_count(), 2);
        // "Acme Ltd" is not a substring match.
        assert!(out.rows.iter().all(|r| r[0].eq_ignore_ascii_case("acme")));
        assert_eq!(out.total_rows, 4);
        assert_eq!(out.filtered_row_count, 2);
    }

    #[test]
    fn constraints_combine_with_and() {
        let ds = sample();
        let filters = FilterSet::new()
            .with("Customer", "Acme")
            .with("Bind Method", "cased");
        let out = apply_filters(&ds, &filters);
        assert_eq!(out.rows, vec![s(&["acme", "Cased", "10"])]);
    }

    #[test]
    fn unknown_column_matches_nothing() {
        let ds = sample();
        let out = apply_filters(&ds, &FilterSet::new().with("Spine", "12"));
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.headers, ds.headers);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let f = FilterSet::new().with("Bind Method", "CASED");
        let once = apply_filters(&ds, &f);
        let twice = apply_filters(&once, &f);
        assert_eq!(once.rows, twice.rows);
    }

    #[test]
    fn row_matches_agrees_with_apply_filters() {
        let ds = sample();
        let f = FilterSet::new().with("Customer", "acme");
        let direct: Vec<_> = ds
            .rows
            .iter()
            .filter(|r| row_matches(&ds.headers, r, &f))
            .cloned()
            .collect();
        assert_eq!(apply_filters(&ds, &f).rows, direct);
    }
}
