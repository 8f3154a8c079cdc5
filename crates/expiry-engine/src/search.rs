//! Client-side table filtering

/// Whether a row's text matches a search term (case-insensitive substring)
pub fn row_matches(row_text: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty() || row_text.to_lowercase().contains(&term)
}

/// One visibility flag per row; an empty term shows everything
pub fn filter_rows<S: AsRef<str>>(row_texts: &[S], term: &str) -> Vec<bool> {
    row_texts
        .iter()
        .map(|text| row_matches(text.as_ref(), term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_shows_all() {
        let rows = ["1 Calle Falsa 123 Activo", "2 Av. Siempreviva Inactivo"];
        assert_eq!(filter_rows(&rows, ""), vec![true, true]);
        assert_eq!(filter_rows(&rows, "   "), vec![true, true]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let rows = ["1 Calle Falsa 123 Activo", "2 Av. Siempreviva Inactivo"];
        assert_eq!(filter_rows(&rows, "SIEMPRE"), vec![false, true]);
        assert_eq!(filter_rows(&rows, "activo"), vec![true, true]);
    }

    #[test]
    fn test_accented_text() {
        assert!(row_matches("Juan PÉREZ", "pérez"));
        assert!(!row_matches("Juan Perez", "pérez"));
    }
}
