use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::chart::{self, ChartHandle, ChartKind};
use crate::color::{fill, ACCENT};
use crate::data::aggregate::collate_es;
use crate::data::stats::{Summary, AVERAGE_SPEED};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Charts page (central panel)
// ---------------------------------------------------------------------------

/// Render statistics, the chart filter and the four charts.
pub fn charts_page(ui: &mut Ui, state: &mut AppState) {
    let now = ui.ctx().input(|i| i.time);

    if let Some(summary) = &state.summary {
        stats_row(ui, summary);
        ui.add_space(8.0);
    }

    chart_controls(ui, state, now);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let width = ui.available_width();
            let half = (width - ui.spacing().item_spacing.x) / 2.0;

            if let Some(h) = state.charts.get(ChartKind::Municipalities) {
                chart_frame(ui, h, width, |ui| municipality_bars(ui, h, now));
            }
            ui.horizontal(|ui: &mut Ui| {
                if let Some(h) = state.charts.get(ChartKind::ZoneTypes) {
                    chart_frame(ui, h, half, |ui| doughnut(ui, h, now));
                }
                if let Some(h) = state.charts.get(ChartKind::Technologies) {
                    chart_frame(ui, h, half, |ui| polar_area(ui, h, now));
                }
            });
            if let Some(h) = state.charts.get(ChartKind::Geography) {
                chart_frame(ui, h, width, |ui| radar(ui, h, now));
            }
        });

    if state.charts.is_animating(now) {
        ui.ctx().request_repaint();
    }
}

fn chart_controls(ui: &mut Ui, state: &mut AppState, now: f64) {
    let mut names: Vec<String> = state.counts().iter().map(|c| c.name.clone()).collect();
    names.sort_by(|a, b| collate_es(a, b));

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Filtrar:");
        let current = state
            .chart_filter
            .clone()
            .unwrap_or_else(|| "Todos los municipios".to_string());
        let mut picked: Option<Option<String>> = None;
        egui::ComboBox::from_id_salt("chart_filter")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(state.chart_filter.is_none(), "Todos los municipios")
                    .clicked()
                {
                    picked = Some(None);
                }
                for name in &names {
                    let is_current = state.chart_filter.as_deref() == Some(name.as_str());
                    if ui.selectable_label(is_current, name).clicked() {
                        picked = Some(Some(name.clone()));
                    }
                }
            });
        if let Some(filter) = picked {
            state.set_chart_filter(filter, now);
        }

        ui.separator();

        let mut animations = state.animations;
        if ui.checkbox(&mut animations, "Animaciones").changed() {
            state.set_animations(animations, now);
        }
    });
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

fn stats_row(ui: &mut Ui, summary: &Summary) {
    let top = summary
        .top
        .as_ref()
        .map(|(name, n)| (name.clone(), format!("Municipio con más zonas ({n})")))
        .unwrap_or_else(|| ("–".to_string(), "Municipio con más zonas".to_string()));

    let cards = [
        (summary.total_zones.to_string(), "Total de zonas WiFi".to_string()),
        (summary.municipalities.to_string(), "Municipios con cobertura".to_string()),
        top,
        (summary.urban_label(), "Zonas en áreas urbanas".to_string()),
        (
            summary.main_technology.clone().unwrap_or_else(|| "–".to_string()),
            "Tecnología principal".to_string(),
        ),
        (AVERAGE_SPEED.to_string(), "Velocidad promedio".to_string()),
    ];

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (value, label) in cards {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(150.0);
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(RichText::new(value).size(22.0).strong().color(ACCENT));
                    ui.small(label);
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn chart_frame(ui: &mut Ui, handle: &ChartHandle, width: f32, add: impl FnOnce(&mut Ui)) {
    ui.allocate_ui(egui::vec2(width, CHART_HEIGHT + 40.0), |ui: &mut Ui| {
        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            ui.set_width(width - 16.0);
            ui.strong(handle.kind.title());
            add(ui);
        });
    });
}

/// Plot id that changes with every rebuild so no view state survives it.
fn plot_id(handle: &ChartHandle) -> (&'static str, u64) {
    (handle.kind.title(), handle.generation)
}

fn pie_plot(handle: &ChartHandle) -> Plot<'_> {
    Plot::new(plot_id(handle))
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
}

fn municipality_bars(ui: &mut Ui, handle: &ChartHandle, now: f64) {
    let progress = handle.progress(now);
    let labels: Vec<String> = handle.slices.iter().map(|s| s.label.clone()).collect();

    let bars: Vec<Bar> = handle
        .slices
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new(i as f64, s.value as f64 * progress)
                .name(&s.label)
                .fill(fill(s.color))
                .stroke(Stroke::new(1.0, s.color))
                .width(0.7)
        })
        .collect();

    Plot::new(plot_id(handle))
        .height(CHART_HEIGHT)
        .x_axis_label("Municipios")
        .y_axis_label("Cantidad de zonas")
        .include_y(0.0)
        .include_y(handle.max_value() as f64)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Zonas WiFi"));
        });
}

fn doughnut(ui: &mut Ui, handle: &ChartHandle, now: f64) {
    let shapes = chart::doughnut(&handle.slices, handle.progress(now));
    pie_plot(handle).show(ui, |plot_ui| {
        for (slice, points) in handle.slices.iter().zip(shapes) {
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(points))
                    .name(format!("{} ({})", slice.label, slice.value))
                    .fill_color(fill(slice.color))
                    .stroke(Stroke::new(1.0, slice.color)),
            );
        }
    });
}

fn polar_area(ui: &mut Ui, handle: &ChartHandle, now: f64) {
    let shapes = chart::polar_area(&handle.slices, handle.progress(now));
    pie_plot(handle).show(ui, |plot_ui| {
        for (slice, points) in handle.slices.iter().zip(shapes) {
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(points))
                    .name(format!("{} ({})", slice.label, slice.value))
                    .fill_color(fill(slice.color))
                    .stroke(Stroke::new(1.0, slice.color)),
            );
        }
    });
}

fn radar(ui: &mut Ui, handle: &ChartHandle, now: f64) {
    let n = handle.slices.len();
    let scale = chart::radar_scale(handle.max_value());
    let outline = chart::radar(&handle.slices, scale, handle.progress(now));

    pie_plot(handle).show(ui, |plot_ui| {
        // Concentric guides every 5 zones.
        let rings = (scale / 5.0) as usize;
        for ring in 1..=rings {
            let r = ring as f64 * 5.0 / scale;
            let guide: Vec<[f64; 2]> = (0..=n.max(3))
                .map(|i| chart::spoke_anchor(i, n.max(3), r))
                .collect();
            plot_ui.line(Line::new(PlotPoints::from(guide)).color(Color32::from_gray(90)).width(0.5));
        }
        for (i, slice) in handle.slices.iter().enumerate() {
            let spoke = vec![[0.0, 0.0], chart::spoke_anchor(i, n, 1.0)];
            plot_ui.line(Line::new(PlotPoints::from(spoke)).color(Color32::from_gray(90)).width(0.5));
            let [x, y] = chart::spoke_anchor(i, n, 1.1);
            plot_ui.text(Text::new(PlotPoint::new(x, y), RichText::new(&slice.label).small()));
        }
        if !outline.is_empty() {
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(outline))
                    .name("Zonas WiFi")
                    .fill_color(ACCENT.gamma_multiply(0.2))
                    .stroke(Stroke::new(2.0, ACCENT)),
            );
        }
    });
}
