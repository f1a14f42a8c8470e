use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use eframe::egui::Color32;

use crate::color::{ColorMap, ACCENT};
use crate::data::model::MunicipalityCount;

/// How long a freshly built chart takes to grow in.
pub const ANIMATION: Duration = Duration::from_millis(1000);

// ---------------------------------------------------------------------------
// Chart handles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartKind {
    /// Bar chart of zones per municipality, largest first.
    Municipalities,
    /// Doughnut of urban vs rural zones.
    ZoneTypes,
    /// Polar-area chart of access technologies.
    Technologies,
    /// Radar of zones per municipality.
    Geography,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Municipalities,
        ChartKind::ZoneTypes,
        ChartKind::Technologies,
        ChartKind::Geography,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Municipalities => "Zonas WiFi por Municipio",
            ChartKind::ZoneTypes => "Tipos de zona",
            ChartKind::Technologies => "Tecnologías de conexión",
            ChartKind::Geography => "Distribución geográfica",
        }
    }
}

/// One labelled value of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: usize,
    pub color: Color32,
}

/// A fully built chart. Handles are immutable: any change of data, filter
/// or animation setting produces new ones.
#[derive(Debug, Clone)]
pub struct ChartHandle {
    pub kind: ChartKind,
    pub slices: Vec<Slice>,
    /// Registry generation that built this handle; part of the plot id so a
    /// rebuilt chart never inherits the old one's zoom or bounds.
    pub generation: u64,
    created_at: f64,
    duration: Duration,
}

impl ChartHandle {
    /// Fraction of the grow-in animation completed at time `now` (seconds).
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        ((now - self.created_at) / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.progress(now) < 1.0
    }

    pub fn max_value(&self) -> usize {
        self.slices.iter().map(|s| s.value).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Chart registry
// ---------------------------------------------------------------------------

/// Everything a rebuild needs.
#[derive(Debug, Clone)]
pub struct ChartInput<'a> {
    pub municipalities: &'a [MunicipalityCount],
    pub zone_types: &'a [(&'a str, usize)],
    pub technologies: &'a [(&'a str, usize)],
    pub animate: bool,
}

/// Sole owner of the live chart handles.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<ChartKind, ChartHandle>,
    generation: u64,
}

impl ChartRegistry {
    /// Drop every existing handle, then build a fresh one per chart kind.
    pub fn rebuild(&mut self, input: &ChartInput<'_>, now: f64) {
        self.charts.clear();
        self.generation += 1;

        let duration = if input.animate {
            ANIMATION
        } else {
            Duration::ZERO
        };

        for kind in ChartKind::ALL {
            let slices = match kind {
                ChartKind::Municipalities => municipality_bars(input.municipalities),
                ChartKind::ZoneTypes => categorical(input.zone_types),
                ChartKind::Technologies => categorical(input.technologies),
                ChartKind::Geography => single_series(
                    input
                        .municipalities
                        .iter()
                        .map(|c| (c.name.as_str(), c.count)),
                ),
            };
            self.charts.insert(
                kind,
                ChartHandle {
                    kind,
                    slices,
                    generation: self.generation,
                    created_at: now,
                    duration,
                },
            );
        }
        log::debug!("Rebuilt charts (generation {})", self.generation);
    }

    pub fn get(&self, kind: ChartKind) -> Option<&ChartHandle> {
        self.charts.get(&kind)
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.charts.values().any(|c| c.is_animating(now))
    }
}

fn municipality_bars(counts: &[MunicipalityCount]) -> Vec<Slice> {
    let mut sorted: Vec<&MunicipalityCount> = counts.iter().collect();
    // Stable: ties keep alphabetical order.
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    single_series(sorted.into_iter().map(|c| (c.name.as_str(), c.count)))
}

fn single_series<'a>(items: impl Iterator<Item = (&'a str, usize)>) -> Vec<Slice> {
    items
        .map(|(label, value)| Slice {
            label: label.to_string(),
            value,
            color: ACCENT,
        })
        .collect()
}

fn categorical(items: &[(&str, usize)]) -> Vec<Slice> {
    let colors = ColorMap::new(items.iter().map(|(l, _)| *l));
    items
        .iter()
        .map(|&(label, value)| Slice {
            label: label.to_string(),
            value,
            color: colors.color_for(label),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Geometry (plot coordinates, centre at the origin, angles from 12 o'clock)
// ---------------------------------------------------------------------------

const ARC_STEPS_PER_TURN: f64 = 96.0;

fn polar(angle: f64, radius: f64) -> [f64; 2] {
    // Clockwise from the top, like most pie charts.
    let a = FRAC_PI_2 - angle;
    [radius * a.cos(), radius * a.sin()]
}

/// Outline of an annular sector between `start` and `end` (radians).
pub fn sector(start: f64, end: f64, inner: f64, outer: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * ARC_STEPS_PER_TURN).ceil().max(1.0) as usize;
    let step = (end - start) / steps as f64;

    let mut points: Vec<[f64; 2]> = (0..=steps)
        .map(|i| polar(start + step * i as f64, outer))
        .collect();
    if inner > 0.0 {
        points.extend((0..=steps).rev().map(|i| polar(start + step * i as f64, inner)));
    } else {
        points.push([0.0, 0.0]);
    }
    points
}

/// Doughnut slices: angle proportional to value, swept in with `progress`.
pub fn doughnut(slices: &[Slice], progress: f64) -> Vec<Vec<[f64; 2]>> {
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    slices
        .iter()
        .map(|s| {
            let sweep = TAU * progress * s.value as f64 / total as f64;
            let points = sector(start, start + sweep, 0.5, 1.0);
            start += sweep;
            points
        })
        .collect()
}

/// Polar-area slices: equal angles, radius proportional to value.
pub fn polar_area(slices: &[Slice], progress: f64) -> Vec<Vec<[f64; 2]>> {
    let max = slices.iter().map(|s| s.value).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    let sweep = TAU / slices.len() as f64;
    slices
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let r = progress * s.value as f64 / max as f64;
            sector(sweep * i as f64, sweep * (i + 1) as f64, 0.0, r)
        })
        .collect()
}

/// Closed radar outline: one vertex per slice, radius proportional to value.
pub fn radar(slices: &[Slice], max: f64, progress: f64) -> Vec<[f64; 2]> {
    if slices.is_empty() || max <= 0.0 {
        return Vec::new();
    }
    let step = TAU / slices.len() as f64;
    let mut points: Vec<[f64; 2]> = slices
        .iter()
        .enumerate()
        .map(|(i, s)| polar(step * i as f64, progress * s.value as f64 / max))
        .collect();
    points.push(points[0]);
    points
}

/// Radar grid scale: a multiple of 5 at or above `max`, at least 5.
pub fn radar_scale(max: usize) -> f64 {
    (max.div_ceil(5).max(1) * 5) as f64
}

/// Label anchor for spoke `i` of `n`, just outside the unit circle.
pub fn spoke_anchor(i: usize, n: usize, radius: f64) -> [f64; 2] {
    polar(TAU * i as f64 / n.max(1) as f64, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::{fallback_counts, TECHNOLOGIES, ZONE_TYPES};

    fn input(counts: &[MunicipalityCount], animate: bool) -> ChartInput<'_> {
        ChartInput {
            municipalities: counts,
            zone_types: ZONE_TYPES,
            technologies: TECHNOLOGIES,
            animate,
        }
    }

    #[test]
    fn test_rebuild_replaces_every_handle() {
        let counts = fallback_counts();
        let mut reg = ChartRegistry::default();
        reg.rebuild(&input(&counts, true), 0.0);
        assert_eq!(reg.get(ChartKind::ZoneTypes).unwrap().generation, 1);

        let fewer = vec![MunicipalityCount::new("Pereira", 23)];
        reg.rebuild(&input(&fewer, false), 5.0);
        for kind in ChartKind::ALL {
            let handle = reg.get(kind).unwrap();
            assert_eq!(handle.generation, 2);
            assert!(!handle.is_animating(5.0));
        }
        assert_eq!(reg.get(ChartKind::Municipalities).unwrap().slices.len(), 1);
    }

    #[test]
    fn test_bars_sorted_by_count_descending() {
        let counts = fallback_counts();
        let mut reg = ChartRegistry::default();
        reg.rebuild(&input(&counts, false), 0.0);
        let bars = &reg.get(ChartKind::Municipalities).unwrap().slices;
        assert_eq!(bars[0].label, "Pereira");
        assert_eq!(bars[1].label, "Dosquebradas");
        assert!(bars.windows(2).all(|w| w[0].value >= w[1].value));
        // Ties keep alphabetical order.
        let fours: Vec<&str> = bars
            .iter()
            .filter(|b| b.value == 4)
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(fours, vec!["Apía", "Guática", "Mistrató", "Pueblo Rico"]);
    }

    #[test]
    fn test_animation_progress() {
        let counts = fallback_counts();
        let mut reg = ChartRegistry::default();
        reg.rebuild(&input(&counts, true), 10.0);
        let h = reg.get(ChartKind::ZoneTypes).unwrap();
        assert_eq!(h.progress(10.0), 0.0);
        assert!((h.progress(10.5) - 0.5).abs() < 1e-9);
        assert_eq!(h.progress(12.0), 1.0);
        assert!(reg.is_animating(10.5));
        assert!(!reg.is_animating(11.0));
    }

    #[test]
    fn test_doughnut_closes_full_circle() {
        let slices = categorical(ZONE_TYPES);
        let shapes = doughnut(&slices, 1.0);
        assert_eq!(shapes.len(), 2);
        let last = shapes[1][(shapes[1].len() / 2) - 1];
        // The outer arc of the last slice ends back at 12 o'clock.
        assert!(last[0].abs() < 1e-9 && (last[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_polar_area_radius_scales_with_value() {
        let slices = categorical(TECHNOLOGIES);
        let shapes = polar_area(&slices, 1.0);
        let radius = |pts: &Vec<[f64; 2]>| {
            pts.iter()
                .map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt())
                .fold(0.0, f64::max)
        };
        assert!((radius(&shapes[0]) - 1.0).abs() < 1e-9);
        assert!((radius(&shapes[2]) - 5.0 / 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_radar_is_closed() {
        let slices = single_series([("a", 5), ("b", 10), ("c", 0)].into_iter());
        let pts = radar(&slices, 10.0, 1.0);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], pts[3]);
        assert!(radar(&[], 10.0, 1.0).is_empty());
    }

    #[test]
    fn test_radar_scale() {
        assert_eq!(radar_scale(0), 5.0);
        assert_eq!(radar_scale(23), 25.0);
        assert_eq!(radar_scale(25), 25.0);
    }

    #[test]
    fn test_empty_inputs_draw_nothing() {
        assert!(doughnut(&[], 1.0).is_empty());
        assert!(polar_area(&[], 1.0).is_empty());
    }
}
