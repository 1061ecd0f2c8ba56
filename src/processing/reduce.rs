//! Quantity totals over the visible rows.

use std::fmt;

use serde::Serialize;

use crate::columns::ColumnRules;
use crate::numeric::{group_thousands, leading_int};

/// Result of totalling the quantity column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuantitySummary {
    /// Sum of the integer prefix of every visible quantity cell.
    Total(i64),
    /// The dataset has no `Quantity`/`Qty` column.
    NotApplicable,
}

impl QuantitySummary {
    /// The total, if a quantity column exists.
    pub fn total(&self) -> Option<i64> {
        match self {
            Self::Total(n) => Some(*n),
            Self::NotApplicable => None,
        }
    }
}

impl fmt::Display for QuantitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Total(n) => write!(f, "Total Quantity: {}", group_thousands(*n)),
            Self::NotApplicable => f.write_str("Total Quantity: N/A"),
        }
    }
}

/// Sum the first quantity column over `rows`.
///
/// Cells without a leading integer contribute 0. Returns [`QuantitySummary::NotApplicable`] if
/// `headers` has no quantity column.
pub fn quantity_summary<R: AsRef<[String]>>(
    headers: &[String],
    rows: &[R],
    rules: &ColumnRules,
) -> QuantitySummary {
    let Some(idx) = rules.quantity_index(headers) else {
        return QuantitySummary::NotApplicable;
    };
    let total = rows
        .iter()
        .filter_map(|r| r.as_ref().get(idx))
        .filter_map(|cell| leading_int(cell))
        .fold(0i64, |acc, v| acc.saturating_add(v));
    QuantitySummary::Total(total)
}
