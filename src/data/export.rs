use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::MunicipalityCount;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write the current counts to a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header `name,count`, one row per municipality
/// * `.json` – `[{ "name": "...", "count": 3 }, ...]`
pub fn export_counts(path: &Path, counts: &[MunicipalityCount]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => export_csv(path, counts),
        "json" => export_json(path, counts),
        other => bail!("Unsupported export extension: .{other}"),
    }
}

fn export_csv(path: &Path, counts: &[MunicipalityCount]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for c in counts {
        writer
            .serialize(c)
            .with_context(|| format!("writing row for {}", c.name))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn export_json(path: &Path, counts: &[MunicipalityCount]) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, counts).context("writing JSON")?;
    Ok(())
}
