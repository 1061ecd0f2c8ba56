//! Export file names derived from the active filters.
//!
//! Downstream tooling parses these names, so the format is fixed:
//! `<base>[_<Column>-<Value>]*.<ext>`, or `<base>_AllOrders.<ext>` when no filter is active.

use crate::types::FilterSet;

/// Token used when no filter contributes to the name.
pub const ALL_ORDERS: &str = "AllOrders";

/// Build the export file name for `filters`.
///
/// Each active filter contributes `ColumnWithoutWhitespace-Value_with_underscores`. Filters
/// whose badge text (`"column: value"`) does not split into exactly two parts on `:` are
/// skipped.
pub fn export_file_name(base: &str, filters: &FilterSet, ext: &str) -> String {
    let tokens: Vec<String> = filters
        .badges()
        .iter()
        .filter_map(|badge| badge_token(badge))
        .collect();

    let suffix = if tokens.is_empty() {
        ALL_ORDERS.to_string()
    } else {
        tokens.join("_")
    };
    format!("{base}_{suffix}.{ext}")
}

fn badge_token(badge: &str) -> Option<String> {
    let parts: Vec<&str> = badge.trim().split(':').collect();
    let [column, value] = parts.as_slice() else {
        return None;
    };
    let column: String = column.trim().chars().filter(|c| !c.is_whitespace()).collect();
    let value = value.trim().split_whitespace().collect::<Vec<_>>().join("_");
    Some(format!("{column}-{value}"))
}
