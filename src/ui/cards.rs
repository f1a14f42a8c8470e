use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ACCENT;
use crate::data::fallback::details_for;
use crate::data::model::MunicipalityCount;
use crate::state::AppState;

const CARD_SIZE: egui::Vec2 = egui::vec2(210.0, 130.0);

/// Fixed facts shown for every municipality.
const MAIN_ZONES: &[&str] = &[
    "Parque principal",
    "Biblioteca municipal",
    "Centro cultural",
    "Plaza de mercado",
    "Coliseo / Estadio",
];
const SCHEDULE: &str = "Lunes a domingo de 6:00 AM a 10:00 PM";
const SPEED: &str = "10–20 Mbps dependiendo de la cantidad de usuarios conectados.";

// ---------------------------------------------------------------------------
// Municipalities page (central panel)
// ---------------------------------------------------------------------------

/// Render the card grid (or list) and, below it, the detail panel.
pub fn municipalities_page(ui: &mut Ui, state: &mut AppState) {
    if state.loading() && state.outcome.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.add(egui::Spinner::new().size(32.0));
        });
        return;
    }

    let visible: Vec<MunicipalityCount> = state
        .visible_indices
        .iter()
        .filter_map(|&i| state.counts().get(i).cloned())
        .collect();

    let mut clicked: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if visible.is_empty() {
                ui.label("No hay municipios que coincidan con la búsqueda.");
            } else if state.grid_view {
                card_grid(ui, &visible, &mut clicked);
            } else {
                card_list(ui, &visible, &mut clicked);
            }

            if let Some(name) = &state.selected {
                ui.add_space(12.0);
                details_panel(ui, name);
            }
        });

    if let Some(name) = clicked {
        state.select(&name);
    }
}

fn card_grid(ui: &mut Ui, visible: &[MunicipalityCount], clicked: &mut Option<String>) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for entry in visible {
            ui.allocate_ui(CARD_SIZE, |ui: &mut Ui| {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_min_size(CARD_SIZE - egui::vec2(16.0, 16.0));
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.label(RichText::new("📶").size(24.0).color(ACCENT));
                        ui.heading(&entry.name);
                        ui.label(format!("{} zonas WiFi registradas", entry.count));
                        if ui.button("ℹ Ver detalles").clicked() {
                            *clicked = Some(entry.name.clone());
                        }
                    });
                });
            });
        }
    });
}

fn card_list(ui: &mut Ui, visible: &[MunicipalityCount], clicked: &mut Option<String>) {
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::remainder())
        .column(Column::auto().at_least(80.0))
        .column(Column::auto())
        .header(22.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Municipio");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Zonas WiFi");
            });
            header.col(|_ui: &mut Ui| {});
        })
        .body(|mut body| {
            for entry in visible {
                body.row(24.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&entry.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(entry.count.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        if ui.small_button("Ver detalles").clicked() {
                            *clicked = Some(entry.name.clone());
                        }
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Detail panel
// ---------------------------------------------------------------------------

fn details_panel(ui: &mut Ui, name: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(format!("Detalles de {name}"));
        ui.label(details_for(name));
        ui.add_space(6.0);

        ui.strong("🗺 Zonas WiFi principales:");
        for zone in MAIN_ZONES {
            ui.label(format!("• {zone}"));
        }
        ui.add_space(6.0);

        ui.strong("🕑 Horarios de disponibilidad:");
        ui.label(SCHEDULE);
        ui.add_space(6.0);

        ui.strong("Velocidad de conexión:");
        ui.label(SPEED);
    });
}
