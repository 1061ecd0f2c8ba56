//! Column naming rules: which headers are filterable, which are always kept, and how special
//! columns (quantity, spine, dimensions) are recognised.
//!
//! The defaults describe the print-production order sheets this crate is built for. Hosts can
//! override them through [`crate::config::SessionConfig`].

use serde::{Deserialize, Serialize};

/// Naming rules applied during import, filtering, sorting and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRules {
    /// Semantic names of filterable columns. A header matches if it contains the name; single
    /// letter names match only a header equal to that letter (either case).
    pub filterable: Vec<String>,
    /// Columns kept (verbatim name match) even though they are not filterable.
    pub always_kept: Vec<String>,
    /// A header named exactly `from` is renamed to `to` on import.
    pub code_alias: Option<CodeAlias>,
    /// Header names recognised as the quantity column, in priority order.
    pub quantity_headers: Vec<String>,
    /// Substring identifying spine-width columns (sorted numerically).
    pub spine_marker: String,
}

/// Header rename applied before any other normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAlias {
    pub from: String,
    pub to: String,
}

pub(crate) const TITLE: &str = "Title";
pub(crate) const ISBN: &str = "ISBN";

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            filterable: [
                "Customer",
                "Customer Order No.",
                "Bind Method",
                "H",
                "W",
                "Spine",
                "Text Paper",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            always_kept: [TITLE, ISBN, "Quantity", "Qty"]
                .into_iter()
                .map(String::from)
                .collect(),
            code_alias: Some(CodeAlias {
                from: "Code".to_string(),
                to: ISBN.to_string(),
            }),
            quantity_headers: vec!["Quantity".to_string(), "Qty".to_string()],
            spine_marker: "Spine".to_string(),
        }
    }
}

impl ColumnRules {
    /// Returns `true` if `header` belongs to the filterable set.
    pub fn is_filterable(&self, header: &str) -> bool {
        self.filterable.iter().any(|entry| matches_entry(header, entry))
    }

    /// Returns `true` if `header` is one of the always-kept names.
    pub fn is_always_kept(&self, header: &str) -> bool {
        self.always_kept.iter().any(|k| k == header)
    }

    /// Returns `true` if `header` is a quantity column (exact, case-sensitive match).
    pub fn is_quantity(&self, header: &str) -> bool {
        self.quantity_headers.iter().any(|q| q == header)
    }

    /// Returns `true` if `header` holds spine widths.
    pub fn is_spine(&self, header: &str) -> bool {
        !self.spine_marker.is_empty() && header.contains(self.spine_marker.as_str())
    }

    /// Index of the first quantity column in `headers`.
    pub fn quantity_index(&self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|h| self.is_quantity(h))
    }

    /// Index of the first spine column in `headers`.
    pub fn spine_index(&self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|h| self.is_spine(h))
    }
}

fn matches_entry(header: &str, entry: &str) -> bool {
    let mut chars = entry.chars();
    match (chars.next(), chars.next()) {
        // Single letters would collide with any header containing them.
        (Some(c), None) => {
            let mut h = header.chars();
            matches!((h.next(), h.next()), (Some(hc), None) if hc.eq_ignore_ascii_case(&c))
        }
        _ => header.contains(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnRules;

    #[test]
    fn substring_entries_match_decorated_headers() {
        let rules = ColumnRules::default();
        assert!(rules.is_filterable("Customer"));
        assert!(rules.is_filterable("Customer Order No."));
        assert!(rules.is_filterable("Spine (mm)"));
        assert!(rules.is_filterable("Text Paper 80gsm"));
        assert!(!rules.is_filterable("Title"));
        assert!(!rules.is_filterable("Quantity"));
    }

    #[test]
    fn single_letter_entries_match_exactly_in_either_case() {
        let rules = ColumnRules::default();
        assert!(rules.is_filterable("H"));
        assert!(rules.is_filterable("h"));
        assert!(rules.is_filterable("w"));
        assert!(!rules.is_filterable("Height"));
        assert!(!rules.is_filterable("Weight"));
        assert!(!rules.is_filterable("HW"));
    }

    #[test]
    fn quantity_match_is_exact_and_case_sensitive() {
        let rules = ColumnRules::default();
        let headers = vec!["qty".to_string(), "Qty".to_string(), "Quantity".to_string()];
        assert_eq!(rules.quantity_index(&headers), Some(1));
        assert!(!rules.is_quantity("Quantity "));
    }

    #[test]
    fn rules_deserialize_with_defaults_for_missing_fields() {
        let rules: ColumnRules = serde_json::from_str(r#"{"spine_marker": "Spine Width"}"#).unwrap();
        assert_eq!(rules.spine_marker, "Spine Width");
        assert_eq!(rules.filterable, ColumnRules::default().filterable);
    }
}
