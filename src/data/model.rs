use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// MunicipalityCount – one aggregated row
// ---------------------------------------------------------------------------

/// Number of WiFi zones registered for one municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct MunicipalityCount {
    /// Trimmed, non-empty municipality name.
    pub name: String,
    /// Occurrences of `name` in the municipality column.
    pub count: usize,
}

impl MunicipalityCount {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// LoadOutcome – what the UI receives after one aggregation run
// ---------------------------------------------------------------------------

/// Where the displayed counts came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Remote CSV fetched over HTTP.
    Live,
    /// CSV picked through File → Open….
    LocalFile(PathBuf),
    /// Embedded sample data, shown after any ingestion failure.
    Fallback,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => write!(f, "datos en línea"),
            DataSource::LocalFile(path) => write!(f, "archivo {}", path.display()),
            DataSource::Fallback => write!(f, "datos de ejemplo"),
        }
    }
}

/// Result of a complete load: either live counts, or the fallback dataset
/// together with the reason the live path failed.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Collated, non-empty list of counts.
    pub counts: Vec<MunicipalityCount>,
    pub source: DataSource,
    /// Human-readable failure summary; only set for `DataSource::Fallback`.
    pub error: Option<String>,
}

impl LoadOutcome {
    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}
