use super::aggregate::sort_collated;
use super::model::MunicipalityCount;

// ---------------------------------------------------------------------------
// Embedded sample data, shown whenever the live CSV cannot be used
// ---------------------------------------------------------------------------

/// One municipality of the sample dataset.
#[derive(Debug, Clone, Copy)]
pub struct FallbackEntry {
    pub name: &'static str,
    pub count: usize,
    pub details: &'static str,
}

pub static FALLBACK_MUNICIPALITIES: &[FallbackEntry] = &[
    FallbackEntry {
        name: "Pereira",
        count: 23,
        details: "Pereira, la capital del departamento, cuenta con 23 zonas WiFi distribuidas en parques, bibliotecas, centros culturales y estaciones de transporte.",
    },
    FallbackEntry {
        name: "Dosquebradas",
        count: 18,
        details: "Dosquebradas ofrece 18 zonas WiFi en lugares estratégicos como el Parque de la Vida, el Estadio Municipal y centros educativos.",
    },
    FallbackEntry {
        name: "Santa Rosa de Cabal",
        count: 12,
        details: "Santa Rosa de Cabal tiene 12 zonas WiFi disponibles, principalmente en termales, áreas turísticas y el parque principal.",
    },
    FallbackEntry {
        name: "La Virginia",
        count: 9,
        details: "La Virginia cuenta con 9 zonas WiFi a lo largo del malecón, en espacios públicos y centros comunitarios.",
    },
    FallbackEntry {
        name: "Marsella",
        count: 7,
        details: "Marsella ofrece 7 zonas WiFi en su parque principal, centros educativos y la casa de la cultura.",
    },
    FallbackEntry {
        name: "Quinchía",
        count: 6,
        details: "Quinchía tiene 6 zonas WiFi disponibles en el casco urbano y veredas cercanas.",
    },
    FallbackEntry {
        name: "Santuario",
        count: 6,
        details: "Santuario cuenta con 6 zonas WiFi en áreas públicas y centros de salud.",
    },
    FallbackEntry {
        name: "Belén de Umbría",
        count: 5,
        details: "Belén de Umbría ofrece 5 zonas WiFi en el parque principal, biblioteca y polideportivo.",
    },
    FallbackEntry {
        name: "Pueblo Rico",
        count: 4,
        details: "Pueblo Rico tiene 4 zonas WiFi disponibles en el centro administrativo y colegios.",
    },
    FallbackEntry {
        name: "Mistrató",
        count: 4,
        details: "Mistrató cuenta con 4 zonas WiFi en el área urbana y puestos de salud.",
    },
    FallbackEntry {
        name: "Guática",
        count: 4,
        details: "Guática ofrece 4 zonas WiFi en espacios públicos y la alcaldía municipal.",
    },
    FallbackEntry {
        name: "Apía",
        count: 4,
        details: "Apía tiene 4 zonas WiFi disponibles en el parque principal y biblioteca.",
    },
    FallbackEntry {
        name: "Balboa",
        count: 3,
        details: "Balboa cuenta con 3 zonas WiFi en el parque principal y casa de la cultura.",
    },
];

/// Sample split of zones by area type (zone-type chart).
pub static ZONE_TYPES: &[(&str, usize)] = &[("URBANA", 65), ("RURAL", 35)];

/// Sample split of zones by access technology (technology chart).
pub static TECHNOLOGIES: &[(&str, usize)] =
    &[("Radio enlace", 80), ("Fibra", 15), ("Satelital", 5)];

/// The sample dataset as collated counts.
pub fn fallback_counts() -> Vec<MunicipalityCount> {
    let mut counts: Vec<MunicipalityCount> = FALLBACK_MUNICIPALITIES
        .iter()
        .map(|e| MunicipalityCount::new(e.name, e.count))
        .collect();
    sort_collated(&mut counts);
    counts
}

/// Descriptive text for a municipality: the sample description when one
/// exists, otherwise a generic template.
pub fn details_for(name: &str) -> String {
    FALLBACK_MUNICIPALITIES
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.details.to_string())
        .unwrap_or_else(|| {
            format!(
                "Información detallada sobre las zonas WiFi en {name}. \
                 Estas zonas están distribuidas en parques, bibliotecas y centros culturales."
            )
        })
}
