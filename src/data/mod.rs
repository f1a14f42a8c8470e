/// Data layer: ingestion, aggregation, fallback and derived views.
///
/// Architecture:
/// ```text
///  HTTPS GET / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  fetch    │  body text (or IngestError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  parser → aggregate, fallback on any error
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ LoadOutcome │  collated Vec<MunicipalityCount> + error detail
///   └────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ filter, stats │  search matches, headline numbers
///   └──────────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod fallback;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod stats;
