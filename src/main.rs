mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::WifiZonesApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();
    log::debug!("Using configuration {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zonas WiFi Gratuitas – Risaralda",
        options,
        Box::new(|cc| Ok(Box::new(WifiZonesApp::new(cc, config)))),
    )
}
