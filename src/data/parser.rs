use std::sync::OnceLock;

use regex::Regex;

use super::error::IngestError;

// ---------------------------------------------------------------------------
// Row tokenizer
// ---------------------------------------------------------------------------

/// Header substrings that identify the municipality column.
pub const MUNICIPALITY_KEYWORDS: &[&str] = &["municipio", "municipality", "city"];

/// One field at the start of the remaining input: either a quoted span
/// (`""` allowed inside) or everything up to the next comma, followed by the
/// separator that ends it (`,` or end of line).
fn field_regex() -> &'static Regex {
    static FIELD: OnceLock<Regex> = OnceLock::new();
    FIELD.get_or_init(|| {
        Regex::new(r#"^\s*("(?:[^"]|"")*"|[^,]*)\s*(,|$)"#).expect("field pattern is valid")
    })
}

/// Split one CSV line into trimmed, unescaped fields.
///
/// Fields are consumed one at a time, so empty fields (leading, inner or
/// trailing) keep their column position.
///
/// Best-effort: a quoted field that continues on the next physical line is
/// not joined, and an unterminated quote is kept literally.
pub fn split_row(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut rest = line;
    // `[^,]*` followed by `,|$` matches any input, so this always advances.
    while let Some(caps) = field_regex().captures(rest) {
        fields.push(unquote(caps[1].trim()));
        if caps[2].is_empty() {
            break;
        }
        rest = &rest[caps[0].len()..];
    }
    fields
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\"\"", "\"").trim().to_string()
    } else {
        raw.to_string()
    }
}

// ---------------------------------------------------------------------------
// Column resolver
// ---------------------------------------------------------------------------

/// Index of the first header cell containing any of `keywords`
/// (case-insensitive substring match, scanned left to right).
pub fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.to_lowercase();
        keywords.iter().any(|k| h.contains(k))
    })
}

/// Locate the municipality column. Loose on purpose: `Municipality_ID`
/// matches too.
pub fn resolve_column(headers: &[String]) -> Result<usize, IngestError> {
    find_column(headers, MUNICIPALITY_KEYWORDS).ok_or(IngestError::ColumnNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_fields_are_trimmed() {
        assert_eq!(split_row(" Pereira , Urbana ,3"), row(&["Pereira", "Urbana", "3"]));
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        let fields = split_row(r#""Santa, Rosa ""Cabal""",Rural"#);
        assert_eq!(fields, row(&[r#"Santa, Rosa "Cabal""#, "Rural"]));
    }

    #[test]
    fn test_empty_fields_keep_position() {
        assert_eq!(split_row(",Urbana"), row(&["", "Urbana"]));
        assert_eq!(split_row("a,,c,"), row(&["a", "", "c", ""]));
    }

    #[test]
    fn test_leading_empty_fields_keep_position() {
        assert_eq!(split_row(",Pereira"), row(&["", "Pereira"]));
        assert_eq!(split_row(",,Pereira"), row(&["", "", "Pereira"]));
        assert_eq!(split_row(" , ,Pereira,"), row(&["", "", "Pereira", ""]));
    }

    #[test]
    fn test_blank_line_yields_nothing() {
        assert!(split_row("").is_empty());
        assert!(split_row("   \t").is_empty());
    }

    #[test]
    fn test_quoted_field_with_surrounding_spaces() {
        assert_eq!(split_row(r#"  "  Apía " , x"#), row(&["Apía", "x"]));
    }

    #[test]
    fn test_unterminated_quote_is_literal() {
        assert_eq!(split_row(r#""Balboa,Rural"#), row(&["\"Balboa", "Rural"]));
    }

    #[test]
    fn test_empty_quoted_field() {
        assert_eq!(split_row(r#""",b"#), row(&["", "b"]));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let english = row(&["id", "Municipality", "type"]);
        let spanish = row(&["id", "MUNICIPIO", "tipo"]);
        assert_eq!(resolve_column(&english).unwrap(), 1);
        assert_eq!(resolve_column(&spanish).unwrap(), 1);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let headers = row(&["Nombre", "City Code", "Municipio"]);
        assert_eq!(resolve_column(&headers).unwrap(), 1);
    }

    #[test]
    fn test_resolve_matches_loosely() {
        let headers = row(&["Municipality_ID", "Municipality"]);
        assert_eq!(resolve_column(&headers).unwrap(), 0);
    }

    #[test]
    fn test_resolve_missing_column() {
        let headers = row(&["Nombre", "Tipo", "Tecnologia"]);
        assert!(matches!(
            resolve_column(&headers),
            Err(IngestError::ColumnNotFound)
        ));
    }
}
