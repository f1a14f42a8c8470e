use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::MunicipalityCount;

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Count non-blank values of column `column` across `rows`.
///
/// Rows that are too short or whose value is blank are skipped; they never
/// abort the run. The result is sorted with [`collate_es`].
pub fn count_by_column<R>(rows: &[R], column: usize) -> Vec<MunicipalityCount>
where
    R: AsRef<[String]>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut skipped = 0usize;

    for row in rows {
        match row.as_ref().get(column).map(|v| v.trim()) {
            Some(name) if !name.is_empty() => *counts.entry(name).or_insert(0) += 1,
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} rows without a value in column {column}");
    }

    let mut out: Vec<MunicipalityCount> = counts
        .into_iter()
        .map(|(name, count)| MunicipalityCount::new(name, count))
        .collect();
    sort_collated(&mut out);
    out
}

/// Sort counts alphabetically by name using Spanish collation.
pub fn sort_collated(counts: &mut [MunicipalityCount]) {
    counts.sort_by(|a, b| collate_es(&a.name, &b.name));
}

// ---------------------------------------------------------------------------
// Spanish collation
// ---------------------------------------------------------------------------

/// Compare two strings the way a Spanish reader would alphabetise them.
///
/// * Primary level: base letters, case- and accent-insensitive, with `ñ`
///   as its own letter between `n` and `o`.
/// * Secondary level: unaccented before accented.
/// * Tertiary level: lowercase before uppercase.
/// * Finally the raw strings, so the order is total.
pub fn collate_es(a: &str, b: &str) -> Ordering {
    let (ka, kb) = (CollationKey::new(a), CollationKey::new(b));
    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.secondary.cmp(&kb.secondary))
        .then_with(|| ka.tertiary.cmp(&kb.tertiary))
        .then_with(|| a.cmp(b))
}

const TILDE: char = '\u{0303}';

struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<bool>,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let mut primary = Vec::with_capacity(s.len());
        let mut secondary = Vec::with_capacity(s.len());
        let mut tertiary = Vec::with_capacity(s.len());

        for c in s.nfd() {
            if is_combining_mark(c) {
                let Some(last) = primary.last_mut() else {
                    continue;
                };
                if c == TILDE && *last == weight('n') {
                    // ñ is a letter of its own, not an accented n.
                    *last += 1;
                } else if let Some(accent) = secondary.last_mut() {
                    if *accent == 0 {
                        *accent = c as u32;
                    }
                }
                continue;
            }
            let lower = c.to_lowercase().next().unwrap_or(c);
            primary.push(weight(lower));
            secondary.push(0);
            tertiary.push(c != lower);
        }

        CollationKey {
            primary,
            secondary,
            tertiary,
        }
    }
}

/// Even weights leave a gap after every letter (used for `ñ`).
fn weight(c: char) -> u32 {
    (c as u32) * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_counts_and_orders() {
        let data = rows(&[&["Pereira", "Urbana"], &["Pereira", "Rural"], &["Dosquebradas", "Urbana"]]);
        let counts = count_by_column(&data, 0);
        assert_eq!(
            counts,
            vec![
                MunicipalityCount::new("Dosquebradas", 1),
                MunicipalityCount::new("Pereira", 2),
            ]
        );
    }

    #[test]
    fn test_blank_and_short_rows_are_skipped() {
        let data = rows(&[&["", "Urbana"], &["   "], &[], &["Apía", "Rural"]]);
        let counts = count_by_column(&data, 0);
        assert_eq!(counts, vec![MunicipalityCount::new("Apía", 1)]);

        let second = count_by_column(&data, 1);
        let total: usize = second.iter().map(|c| c.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_values_are_trimmed_before_counting() {
        let data = rows(&[&[" Balboa"], &["Balboa "]]);
        assert_eq!(count_by_column(&data, 0), vec![MunicipalityCount::new("Balboa", 2)]);
    }

    #[test]
    fn test_total_matches_non_blank_rows() {
        let names = ["Marsella", "", "Guática", "Marsella", "Santuario", " ", "Quinchía"];
        let data: Vec<Vec<String>> = names.iter().map(|n| vec![n.to_string()]).collect();
        let counts = count_by_column(&data, 0);
        let total: usize = counts.iter().map(|c| c.count).sum();
        let expected = names.iter().filter(|n| !n.trim().is_empty()).count();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_accents_sort_in_alphabetical_position() {
        let mut names = vec!["Pueblo Rico", "Apía", "Belén de Umbría", "Balboa", "Ágata", "Zulia"];
        names.sort_by(|a, b| collate_es(a, b));
        assert_eq!(
            names,
            vec!["Ágata", "Apía", "Balboa", "Belén de Umbría", "Pueblo Rico", "Zulia"]
        );
    }

    #[test]
    fn test_enye_sorts_after_n() {
        let mut names = vec!["Ñame", "Oso", "Nueva", "nariño"];
        names.sort_by(|a, b| collate_es(a, b));
        assert_eq!(names, vec!["nariño", "Nueva", "Ñame", "Oso"]);
    }

    #[test]
    fn test_case_is_not_primary() {
        assert_eq!(collate_es("apía", "Balboa"), Ordering::Less);
        assert_eq!(collate_es("Mistrató", "marsella"), Ordering::Greater);
    }

    #[test]
    fn test_unaccented_before_accented_when_otherwise_equal() {
        assert_eq!(collate_es("Belen", "Belén"), Ordering::Less);
        assert_eq!(collate_es("Belén", "Belén"), Ordering::Equal);
    }
}
