//! Turns raw stringified rows into a normalised [`Dataset`].
//!
//! Steps:
//!
//! - trim headers and apply the `Code` → `ISBN` alias
//! - move `ISBN` in front of `Title` when `Title` comes first
//! - project onto the retained columns (filterable matches, then always-kept names)
//! - drop rows with no non-empty retained cell
//! - collect sorted unique values for filterable columns

use std::collections::{BTreeMap, BTreeSet};

use crate::columns::{ColumnRules, ISBN, TITLE};
use crate::error::{WorklistError, WorklistResult};
use crate::numeric::{cmp_numeric_then_text, cmp_text_dictionary};
use crate::types::Dataset;

/// Normalise raw rows (first row = header names) into a [`Dataset`].
///
/// Fails with [`WorklistError::MalformedInput`] if there is no header row or no data row.
pub fn normalize_rows(mut raw: Vec<Vec<String>>, rules: &ColumnRules) -> WorklistResult<Dataset> {
    if raw.len() < 2 {
        return Err(WorklistError::malformed("No data found in the Excel file"));
    }

    let mut data_rows = raw.split_off(1);
    let mut headers: Vec<String> = raw
        .pop()
        .unwrap_or_default()
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if let Some(alias) = &rules.code_alias {
        if let Some(idx) = headers.iter().position(|h| *h == alias.from) {
            headers[idx] = alias.to.clone();
        }
    }

    swap_title_before_isbn(&mut headers, &mut data_rows);

    let (projection, filterable) = retained_columns(&headers, rules);
    let retained: Vec<String> = projection.iter().map(|&i| headers[i].clone()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(data_rows.len());
    let mut dropped = 0usize;
    for row in &data_rows {
        let out: Vec<String> = projection
            .iter()
            .map(|&i| row.get(i).map(|c| c.trim().to_string()).unwrap_or_default())
            .collect();
        if out.iter().any(|c| !c.is_empty()) {
            rows.push(out);
        } else {
            dropped += 1;
        }
    }

    let unique_values = collect_unique_values(&retained, &filterable, &rows, rules);

    log::debug!(
        "normalized {} data rows into {} rows x {} columns ({} empty rows dropped)",
        data_rows.len(),
        rows.len(),
        retained.len(),
        dropped
    );

    Ok(Dataset::new(retained, rows, unique_values))
}

fn swap_title_before_isbn(headers: &mut [String], rows: &mut [Vec<String>]) {
    let title = headers.iter().position(|h| h == TITLE);
    let isbn = headers.iter().position(|h| h == ISBN);
    let (Some(t), Some(i)) = (title, isbn) else {
        return;
    };
    if t >= i {
        return;
    }

    headers.swap(t, i);
    for row in rows.iter_mut() {
        if row.len() <= i {
            row.resize(i + 1, String::new());
        }
        row.swap(t, i);
    }
}

/// Returns source column indexes to keep, in output order, and a parallel "is filterable" mask.
fn retained_columns(headers: &[String], rules: &ColumnRules) -> (Vec<usize>, Vec<bool>) {
    let mut projection: Vec<usize> = Vec::new();
    let mut filterable: Vec<bool> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for (idx, header) in headers.iter().enumerate() {
        if header.is_empty() || !rules.is_filterable(header) {
            continue;
        }
        if seen.insert(header.as_str()) {
            projection.push(idx);
            filterable.push(true);
        } else {
            log::warn!("duplicate column '{header}' at index {idx} ignored");
        }
    }

    for (idx, header) in headers.iter().enumerate() {
        if header.is_empty() || !rules.is_always_kept(header) {
            continue;
        }
        if seen.insert(header.as_str()) {
            projection.push(idx);
            filterable.push(false);
        } else if !rules.is_filterable(header) {
            log::warn!("duplicate column '{header}' at index {idx} ignored");
        }
    }

    (projection, filterable)
}

fn collect_unique_values(
    headers: &[String],
    filterable: &[bool],
    rows: &[Vec<String>],
    rules: &ColumnRules,
) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    for (col, header) in headers.iter().enumerate() {
        if !filterable[col] {
            continue;
        }
        let distinct: BTreeSet<&str> = rows
            .iter()
            .map(|r| r[col].as_str())
            .filter(|v| !v.is_empty())
            .collect();
        let mut values: Vec<String> = distinct.into_iter().map(String::from).collect();
        if rules.is_spine(header) {
            values.sort_by(|a, b| cmp_numeric_then_text(a, b));
        } else {
            values.sort_by(|a, b| cmp_text_dictionary(a, b));
        }
        out.insert(header.clone(), values);
    }
    out
}
