use std::path::Path;

use super::aggregate::count_by_column;
use super::error::IngestError;
use super::fallback::fallback_counts;
use super::model::{DataSource, LoadOutcome, MunicipalityCount};
use super::parser::{resolve_column, split_row};

// ---------------------------------------------------------------------------
// Text → counts
// ---------------------------------------------------------------------------

/// Validate and aggregate a CSV document.
///
/// Fails on an empty body, on fewer than two non-blank lines, when no header
/// names a municipality column, or when no data row has a municipality.
pub fn ingest(text: &str) -> Result<Vec<MunicipalityCount>, IngestError> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile);
    }

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(IngestError::InsufficientData);
    }

    let headers = split_row(lines[0]);
    let column = resolve_column(&headers)?;
    log::debug!(
        "Municipality column {column} ({:?}), {} data rows",
        headers[column],
        lines.len() - 1
    );

    let rows: Vec<Vec<String>> = lines[1..].iter().map(|l| split_row(l)).collect();
    let counts = count_by_column(&rows, column);
    if counts.is_empty() {
        return Err(IngestError::InsufficientData);
    }
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Fallback boundary
// ---------------------------------------------------------------------------

/// Turn a fetched body (or the error that prevented fetching it) into what
/// the UI shows. Any failure discards everything and substitutes the whole
/// sample dataset.
pub fn load_with_fallback(fetched: Result<String, IngestError>, source: DataSource) -> LoadOutcome {
    match fetched.and_then(|text| ingest(&text)) {
        Ok(counts) => {
            log::info!(
                "Loaded {} municipalities ({} zones) from {source}",
                counts.len(),
                counts.iter().map(|c| c.count).sum::<usize>()
            );
            LoadOutcome {
                counts,
                source,
                error: None,
            }
        }
        Err(e) => {
            log::error!("Failed to load hotspot data, showing sample data: {e}");
            LoadOutcome {
                counts: fallback_counts(),
                source: DataSource::Fallback,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Run the same ingestion on a CSV file from disk.
pub fn load_local_file(path: &Path) -> LoadOutcome {
    let fetched = std::fs::read_to_string(path).map_err(IngestError::from);
    load_with_fallback(fetched, DataSource::LocalFile(path.to_path_buf()))
}
