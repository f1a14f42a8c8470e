use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::chart::{ChartInput, ChartRegistry};
use crate::config::AppConfig;
use crate::data::fallback::{TECHNOLOGIES, ZONE_TYPES};
use crate::data::fetch::spawn_load;
use crate::data::filter::matching_indices;
use crate::data::model::{LoadOutcome, MunicipalityCount};
use crate::data::pipeline::load_local_file;
use crate::data::stats::Summary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which page is shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Municipalities,
    Charts,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Last completed load (None until the first one finishes).
    pub outcome: Option<LoadOutcome>,

    /// Channel of the load currently in flight.
    pending: Option<Receiver<LoadOutcome>>,

    pub page: Page,

    /// Card search box contents.
    pub search: String,

    /// Indices of cards matching `search` (cached).
    pub visible_indices: Vec<usize>,

    /// Grid (true) or list (false) card layout.
    pub grid_view: bool,

    /// Municipality whose detail panel is open.
    pub selected: Option<String>,

    /// Chart filter: `None` shows every municipality.
    pub chart_filter: Option<String>,

    pub animations: bool,

    pub charts: ChartRegistry,

    pub summary: Option<Summary>,

    /// Whether the user closed the fallback banner.
    pub banner_dismissed: bool,

    /// Status / error message for non-ingestion problems (export…).
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            grid_view: config.grid_view,
            animations: config.animations,
            config,
            outcome: None,
            pending: None,
            page: Page::Municipalities,
            search: String::new(),
            visible_indices: Vec::new(),
            selected: None,
            chart_filter: None,
            charts: ChartRegistry::default(),
            summary: None,
            banner_dismissed: false,
            status_message: None,
        }
    }

    /// Whether a load is in flight.
    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Counts currently displayed (empty while the first load runs).
    pub fn counts(&self) -> &[MunicipalityCount] {
        self.outcome.as_ref().map(|o| o.counts.as_slice()).unwrap_or(&[])
    }

    /// Start downloading the configured CSV. Ignored while a load is
    /// already running.
    pub fn start_remote_load<F>(&mut self, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.loading() {
            return;
        }
        self.pending = Some(spawn_load(
            self.config.source_url.clone(),
            self.config.fetch_timeout(),
            notify,
        ));
    }

    /// Pick up a finished background load, if any.
    pub fn poll(&mut self, now: f64) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.set_outcome(outcome, now);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Loader thread ended without a result");
                self.pending = None;
            }
        }
    }

    /// Load a CSV from disk through the same pipeline. A download still in
    /// flight is abandoned so it cannot overwrite the file's data.
    pub fn load_file(&mut self, path: &Path, now: f64) {
        if self.pending.take().is_some() {
            log::info!("Discarding in-flight download in favour of {}", path.display());
        }
        self.set_outcome(load_local_file(path), now);
    }

    /// Replace everything derived from the previous load.
    pub fn set_outcome(&mut self, outcome: LoadOutcome, now: f64) {
        self.summary = Some(Summary::new(&outcome.counts, ZONE_TYPES, TECHNOLOGIES));
        self.selected = None;
        self.chart_filter = None;
        self.banner_dismissed = false;
        self.outcome = Some(outcome);
        self.refilter();
        self.rebuild_charts(now);
    }

    /// Recompute `visible_indices` after a search change.
    pub fn refilter(&mut self) {
        self.visible_indices = match &self.outcome {
            Some(o) => matching_indices(&o.counts, &self.search),
            None => Vec::new(),
        };
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.refilter();
    }

    pub fn set_animations(&mut self, on: bool, now: f64) {
        self.animations = on;
        self.rebuild_charts(now);
    }

    pub fn set_chart_filter(&mut self, filter: Option<String>, now: f64) {
        self.chart_filter = filter;
        self.rebuild_charts(now);
    }

    /// Open the detail panel for `name`.
    pub fn select(&mut self, name: &str) {
        self.selected = Some(name.to_string());
    }

    /// Drop every chart and build new ones from the current data.
    pub fn rebuild_charts(&mut self, now: f64) {
        let all = self.counts();
        let filtered: Vec<MunicipalityCount> = match &self.chart_filter {
            Some(name) => all.iter().filter(|c| &c.name == name).cloned().collect(),
            None => all.to_vec(),
        };
        let input = ChartInput {
            municipalities: &filtered,
            zone_types: ZONE_TYPES,
            technologies: TECHNOLOGIES,
            animate: self.animations,
        };
        self.charts.rebuild(&input, now);
    }

    /// Error detail to show in the banner, unless dismissed.
    pub fn banner(&self) -> Option<&str> {
        if self.banner_dismissed {
            return None;
        }
        self.outcome.as_ref().and_then(|o| o.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::data::fallback::fallback_counts;
    use crate::data::model::DataSource;

    fn live(counts: Vec<MunicipalityCount>) -> LoadOutcome {
        LoadOutcome {
            counts,
            source: DataSource::Live,
            error: None,
        }
    }

    fn fallback() -> LoadOutcome {
        LoadOutcome {
            counts: fallback_counts(),
            source: DataSource::Fallback,
            error: Some("Error HTTP: 404 - Not Found".into()),
        }
    }

    #[test]
    fn test_set_outcome_resets_views() {
        let mut state = AppState::default();
        state.set_search("pe");
        state.select("Pereira");
        state.set_outcome(fallback(), 0.0);

        assert_eq!(state.selected, None);
        assert_eq!(state.visible_indices.len(), 1);
        assert_eq!(state.summary.as_ref().unwrap().municipalities, 13);
        assert_eq!(state.charts.get(ChartKind::Geography).unwrap().generation, 1);
    }

    #[test]
    fn test_banner_only_for_fallback_until_dismissed() {
        let mut state = AppState::default();
        state.set_outcome(live(vec![MunicipalityCount::new("Balboa", 1)]), 0.0);
        assert_eq!(state.banner(), None);

        state.set_outcome(fallback(), 0.0);
        assert!(state.banner().unwrap().contains("404"));
        state.banner_dismissed = true;
        assert_eq!(state.banner(), None);
    }

    #[test]
    fn test_chart_filter_restricts_municipality_charts() {
        let mut state = AppState::default();
        state.set_outcome(fallback(), 0.0);
        state.set_chart_filter(Some("Balboa".into()), 1.0);

        let bars = &state.charts.get(ChartKind::Municipalities).unwrap().slices;
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].label, "Balboa");
        let radar = &state.charts.get(ChartKind::Geography).unwrap().slices;
        assert_eq!(radar.len(), 1);
        // Breakdown charts are unaffected.
        assert_eq!(state.charts.get(ChartKind::ZoneTypes).unwrap().slices.len(), 2);

        state.set_chart_filter(None, 2.0);
        let bars = &state.charts.get(ChartKind::Municipalities).unwrap().slices;
        assert_eq!(bars.len(), 13);
    }

    #[test]
    fn test_animation_toggle_rebuilds() {
        let mut state = AppState::default();
        state.set_outcome(fallback(), 0.0);
        let before = state.charts.get(ChartKind::Municipalities).unwrap().generation;
        state.set_animations(false, 0.1);
        let after = state.charts.get(ChartKind::Municipalities).unwrap().generation;
        assert_eq!(after, before + 1);
        assert!(!state.charts.is_animating(0.1));
    }

    #[test]
    fn test_load_file_uses_pipeline() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Municipio\nMarsella\nMarsella\nApía").unwrap();
        let mut state = AppState::default();
        state.load_file(file.path(), 0.0);
        assert_eq!(
            state.counts(),
            &[
                MunicipalityCount::new("Apía", 1),
                MunicipalityCount::new("Marsella", 2),
            ]
        );
        assert_eq!(state.banner(), None);
    }

    #[test]
    fn test_local_file_wins_over_in_flight_download() {
        use std::io::Write;

        let (tx, rx) = std::sync::mpsc::channel();
        let mut state = AppState::default();
        state.pending = Some(rx);
        assert!(state.loading());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Municipio\nGuática").unwrap();
        state.load_file(file.path(), 0.0);
        assert!(!state.loading());

        // The download finishing afterwards must not replace the file's data.
        assert!(tx.send(fallback()).is_err());
        state.poll(1.0);
        assert_eq!(state.counts(), &[MunicipalityCount::new("Guática", 1)]);
        assert_eq!(state.banner(), None);
    }

    #[test]
    fn test_poll_without_pending_is_noop() {
        let mut state = AppState::default();
        state.poll(0.0);
        assert!(!state.loading());
        assert!(state.outcome.is_none());
    }
}
