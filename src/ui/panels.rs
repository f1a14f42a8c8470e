use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::export_counts;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – search and view controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Zonas WiFi");
    ui.label("Departamento de Risaralda");
    ui.separator();

    ui.strong("Buscar municipio");
    let mut term = state.search.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut term)
            .hint_text("Nombre del municipio…")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_search(&term);
    }
    ui.add_space(6.0);

    ui.checkbox(&mut state.grid_view, "Vista en cuadrícula");
    ui.separator();

    let Some(outcome) = &state.outcome else {
        ui.label("Cargando datos…");
        return;
    };

    let source = RichText::new(format!("Fuente: {}", outcome.source));
    if outcome.is_fallback() {
        ui.label(source.color(Color32::from_rgb(231, 76, 60)));
    } else {
        ui.label(source);
    }
    ui.label(format!(
        "{} municipios, {} zonas",
        outcome.counts.len(),
        outcome.total()
    ));
    ui.label(format!("{} visibles", state.visible_indices.len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let ctx = ui.ctx().clone();
    let now = ctx.input(|i| i.time);

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir CSV…").clicked() {
                open_file_dialog(state, now);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.outcome.is_some(), egui::Button::new("Exportar conteo…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(!state.loading(), egui::Button::new("Recargar desde la web"))
                .clicked()
            {
                let repaint = ctx.clone();
                state.start_remote_load(move || repaint.request_repaint());
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.page, Page::Municipalities, "Municipios");
        ui.selectable_value(&mut state.page, Page::Charts, "Gráficas");

        ui.separator();

        if state.loading() {
            ui.add(egui::Spinner::new());
            ui.label("Cargando datos…");
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Fallback banner
// ---------------------------------------------------------------------------

/// Error banner shown while the fallback dataset is displayed.
pub fn error_banner(ui: &mut Ui, state: &mut AppState) {
    let Some(detail) = state.banner().map(str::to_string) else {
        return;
    };

    let mut dismiss = false;
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(253, 236, 234))
        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(231, 76, 60)))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new("⚠").size(20.0).color(Color32::from_rgb(231, 76, 60)));
                ui.vertical(|ui: &mut Ui| {
                    ui.label(
                        RichText::new("No se pudieron cargar los datos del CSV")
                            .strong()
                            .color(Color32::BLACK),
                    );
                    ui.label(RichText::new(format!("Detalle: {detail}")).color(Color32::BLACK));
                    ui.label(
                        RichText::new("Se muestran datos de ejemplo temporalmente.")
                            .small()
                            .color(Color32::DARK_GRAY),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui: &mut Ui| {
                    if ui.small_button("✖").clicked() {
                        dismiss = true;
                    }
                });
            });
        });
    ui.add_space(6.0);

    if dismiss {
        state.banner_dismissed = true;
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, now: f64) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir CSV de zonas WiFi")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path, now);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar conteo por municipio")
        .set_file_name("zonas_wifi_por_municipio.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    match export_counts(&path, state.counts()) {
        Ok(()) => {
            log::info!("Exported {} rows to {}", state.counts().len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::warn!("Failed to export counts: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
