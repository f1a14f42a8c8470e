use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Page};
use crate::ui::{cards, charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WifiZonesApp {
    pub state: AppState,
}

impl WifiZonesApp {
    /// Build the app and start the one start-up download.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        let ctx = cc.egui_ctx.clone();
        state.start_remote_load(move || ctx.request_repaint());
        Self { state }
    }
}

impl eframe::App for WifiZonesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll(ctx.input(|i| i.time));

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search and view ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: banner + current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::error_banner(ui, &mut self.state);
            match self.state.page {
                Page::Municipalities => cards::municipalities_page(ui, &mut self.state),
                Page::Charts => charts::charts_page(ui, &mut self.state),
            }
        });
    }
}
