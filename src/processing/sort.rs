//! Column ordering for the visible rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnRules;
use crate::numeric::{leading_float, leading_int, parse_number};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort the visible rows by one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub column: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

/// How a column's cells are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKind {
    /// Leading decimal number, non-numeric as 0.
    Float,
    /// Leading integer, non-numeric as 0.
    Int,
    /// Whole-cell number; blanks first.
    Number,
    /// Case-insensitive text.
    Text,
}

fn kind_for<R: AsRef<[String]>>(
    rows: &[R],
    headers: &[String],
    col: usize,
    rules: &ColumnRules,
) -> SortKind {
    let header = headers.get(col).map(String::as_str).unwrap_or("");
    if rules.spine_index(headers) == Some(col) {
        return SortKind::Float;
    }
    if rules.is_quantity(header) {
        return SortKind::Int;
    }
    let mut cells = rows
        .iter()
        .filter_map(|r| r.as_ref().get(col))
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .peekable();
    if cells.peek().is_some() && cells.all(|c| parse_number(c).is_some()) {
        SortKind::Number
    } else {
        SortKind::Text
    }
}

fn compare(kind: SortKind, a: &str, b: &str) -> Ordering {
    match kind {
        SortKind::Float => {
            let x = leading_float(a).unwrap_or(0.0);
            let y = leading_float(b).unwrap_or(0.0);
            x.total_cmp(&y)
        }
        SortKind::Int => leading_int(a).unwrap_or(0).cmp(&leading_int(b).unwrap_or(0)),
        SortKind::Number => {
            let x = parse_number(a).unwrap_or(f64::NEG_INFINITY);
            let y = parse_number(b).unwrap_or(f64::NEG_INFINITY);
            x.total_cmp(&y)
        }
        SortKind::Text => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Stable-sort `rows` by the column at `col` of `headers`.
///
/// The first spine column ranks by leading decimal, quantity columns by leading integer, columns
/// whose non-empty cells are all numbers numerically, and anything else as case-insensitive text.
pub fn sort_rows<R: AsRef<[String]>>(
    rows: &mut [R],
    headers: &[String],
    col: usize,
    direction: Direction,
    rules: &ColumnRules,
) {
    let kind = kind_for(rows, headers, col, rules);
    rows.sort_by(|a, b| {
        let a = a.as_ref().get(col).map(String::as_str).unwrap_or("");
        let b = b.as_ref().get(col).map(String::as_str).unwrap_or("");
        let ord = compare(kind, a, b);
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::{sort_rows, Direction};
    use crate::columns::ColumnRules;

    fn rows(v: &[&str]) -> Vec<Vec<String>> {
        v.iter().map(|x| vec![x.to_string()]).collect()
    }

    fn h(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn firsts(r: &[Vec<String>]) -> Vec<&str> {
        r.iter().map(|x| x[0].as_str()).collect()
    }

    #[test]
    fn spine_sorts_numerically_with_text_as_zero() {
        let mut r = rows(&["10", "2", "tbc", "1.5"]);
        sort_rows(&mut r, &h(&["Spine"]), 0, Direction::Ascending, &ColumnRules::default());
        assert_eq!(firsts(&r), vec!["tbc", "1.5", "2", "10"]);
    }

    #[test]
    fn quantity_sorts_by_integer_prefix_descending() {
        let mut r = rows(&["9", "100", "20 pcs"]);
        sort_rows(&mut r, &h(&["Qty"]), 0, Direction::Descending, &ColumnRules::default());
        assert_eq!(firsts(&r), vec!["100", "20 pcs", "9"]);
    }

    #[test]
    fn text_sort_ignores_case_and_is_stable() {
        let mut r = vec![
            vec!["beta".to_string(), "1".to_string()],
            vec!["Alpha".to_string(), "2".to_string()],
            vec!["BETA".to_string(), "3".to_string()],
        ];
        sort_rows(&mut r, &h(&["Customer", "Qty"]), 0, Direction::Ascending, &ColumnRules::default());
        let order: Vec<&str> = r.iter().map(|x| x[1].as_str()).collect();
        assert_eq!(order, vec!["2", "1", "3"]);
    }

    #[test]
    fn all_numeric_column_sorts_as_numbers() {
        let mut r = rows(&["234", "1000", "", "98"]);
        sort_rows(&mut r, &h(&["H"]), 0, Direction::Ascending, &ColumnRules::default());
        assert_eq!(firsts(&r), vec!["", "98", "234", "1000"]);
    }

    #[test]
    fn one_text_cell_makes_the_column_text() {
        let mut r = rows(&["234", "1000", "n/a", "98"]);
        sort_rows(&mut r, &h(&["H"]), 0, Direction::Ascending, &ColumnRules::default());
        assert_eq!(firsts(&r), vec!["1000", "234", "98", "n/a"]);
    }

    #[test]
    fn only_the_first_spine_column_uses_the_spine_key() {
        let headers = h(&["Spine", "Spine (cover)"]);
        let mut r: Vec<Vec<String>> = ["10", "9", "tbc"]
            .iter()
            .map(|v| vec![v.to_string(), v.to_string()])
            .collect();

        sort_rows(&mut r, &headers, 1, Direction::Ascending, &ColumnRules::default());
        let second: Vec<&str> = r.iter().map(|x| x[1].as_str()).collect();
        assert_eq!(second, vec!["10", "9", "tbc"]);

        sort_rows(&mut r, &headers, 0, Direction::Ascending, &ColumnRules::default());
        assert_eq!(firsts(&r), vec!["tbc", "9", "10"]);
    }
}
