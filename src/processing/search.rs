//! Free-text row search, as typed into a grid's search box.

/// Returns `true` if every whitespace-separated word of `term` occurs (case-insensitively) in at
/// least one cell of `row`. A blank term matches every row.
pub fn row_matches_search(row: &[String], term: &str) -> bool {
    let words: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
    if words.is_empty() {
        return true;
    }
    let cells: Vec<String> = row.iter().map(|c| c.to_lowercase()).collect();
    words
        .iter()
        .all(|w| cells.iter().any(|c| c.contains(w.as_str())))
}

#[cfg(test)]
mod tests {
    use super::row_matches_search;

    fn row(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn blank_term_matches_everything() {
        assert!(row_matches_search(&row(&["a"]), ""));
        assert!(row_matches_search(&row(&[]), "   "));
    }

    #[test]
    fn words_may_match_different_cells() {
        let r = row(&["Acme Publishing", "Cased", "12"]);
        assert!(row_matches_search(&r, "acme cased"));
        assert!(row_matches_search(&r, "PUB"));
        assert!(!row_matches_search(&r, "acme limp"));
    }
}
