use super::model::MunicipalityCount;

/// Label shown for the average connection speed card.
pub const AVERAGE_SPEED: &str = "20 Mbps";

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_zones: usize,
    pub municipalities: usize,
    /// Municipality with the most zones; first one wins on ties.
    pub top: Option<(String, usize)>,
    /// Share of urban zones in percent, `None` without zone-type data.
    pub urban_percent: Option<f64>,
    pub main_technology: Option<String>,
}

impl Summary {
    pub fn new(
        counts: &[MunicipalityCount],
        zone_types: &[(&str, usize)],
        technologies: &[(&str, usize)],
    ) -> Self {
        let total_zones = counts.iter().map(|c| c.count).sum();

        let top = counts.iter().fold(None::<&MunicipalityCount>, |best, c| match best {
            Some(b) if b.count >= c.count => Some(b),
            _ => Some(c),
        });

        let zone_total: usize = zone_types.iter().map(|(_, n)| n).sum();
        let urban_percent = zone_types
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("urbana"))
            .filter(|_| zone_total > 0)
            .map(|(_, n)| *n as f64 * 100.0 / zone_total as f64);

        let main_technology = technologies
            .iter()
            .fold(None::<&(&str, usize)>, |best, t| match best {
                Some(b) if b.1 >= t.1 => Some(b),
                _ => Some(t),
            })
            .map(|(name, _)| name.to_string());

        Summary {
            total_zones,
            municipalities: counts.len(),
            top: top.map(|c| (c.name.clone(), c.count)),
            urban_percent,
            main_technology,
        }
    }

    /// Urban share formatted with one decimal, e.g. `65.0%`.
    pub fn urban_label(&self) -> String {
        self.urban_percent
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_else(|| "–".to_string())
    }
}
