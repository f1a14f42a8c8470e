use super::model::MunicipalityCount;

// ---------------------------------------------------------------------------
// Search filter: which cards are visible
// ---------------------------------------------------------------------------

/// Return indices of entries whose name contains `term`, ignoring case.
///
/// An empty (or all-whitespace) term matches everything.
pub fn matching_indices(counts: &[MunicipalityCount], term: &str) -> Vec<usize> {
    let term = term.trim().to_lowercase();
    counts
        .iter()
        .enumerate()
        .filter(|(_, c)| term.is_empty() || c.name.to_lowercase().contains(&term))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::fallback_counts;

    #[test]
    fn test_empty_term_shows_all() {
        let counts = fallback_counts();
        assert_eq!(matching_indices(&counts, "").len(), counts.len());
        assert_eq!(matching_indices(&counts, "  ").len(), counts.len());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let counts = fallback_counts();
        let hits: Vec<&str> = matching_indices(&counts, "SANTA")
            .into_iter()
            .map(|i| counts[i].name.as_str())
            .collect();
        assert_eq!(hits, vec!["Santa Rosa de Cabal"]);

        let hits = matching_indices(&counts, "ía");
        let names: Vec<&str> = hits.iter().map(|&i| counts[i].name.as_str()).collect();
        assert_eq!(names, vec!["Apía", "Belén de Umbría", "Quinchía"]);
    }

    #[test]
    fn test_idempotent() {
        let counts = fallback_counts();
        assert_eq!(matching_indices(&counts, "ra"), matching_indices(&counts, "ra"));
    }

    #[test]
    fn test_no_match() {
        assert!(matching_indices(&fallback_counts(), "bogotá").is_empty());
    }
}
