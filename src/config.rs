use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default location of the hotspot CSV.
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/JosePerdomo16/Pagina_web/main/Zonas_WiFi_Gratuitas_del_Departamento_de_Risaralda_20250903.csv";

/// Lower bound for the download timeout; zero would fail every request.
const MIN_FETCH_TIMEOUT_SECS: u64 = 1;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "risaralda-wifi.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Start-up settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Where the hotspot CSV is downloaded from.
    pub source_url: String,
    /// Whole-request timeout for the download; values below one second
    /// are raised to one.
    pub fetch_timeout_secs: u64,
    /// Whether charts animate when (re)built.
    pub animations: bool,
    /// Grid (true) or list (false) card layout at start-up.
    pub grid_view: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch_timeout_secs: 30,
            animations: true,
            grid_view: true,
        }
    }
}

impl AppConfig {
    /// Load [`CONFIG_FILE`] from the working directory, falling back to
    /// defaults when it is missing or invalid.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded configuration from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading config file")?;
        serde_json::from_str(&text).context("parsing config JSON")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(MIN_FETCH_TIMEOUT_SECS))
    }
}
