use anyhow::{Context, Result};

/// Municipalities and how many hotspots to generate for each.
const MUNICIPALITIES: &[(&str, usize)] = &[
    ("Pereira", 23),
    ("Dosquebradas", 18),
    ("Santa Rosa de Cabal", 12),
    ("La Virginia", 9),
    ("Marsella", 7),
    ("Quinchía", 6),
    ("Santuario", 6),
    ("Belén de Umbría", 5),
    ("Pueblo Rico", 4),
    ("Mistrató", 4),
    ("Guática", 4),
    ("Apía", 4),
    ("Balboa", 3),
];

const PLACES: &[&str] = &[
    "Parque principal",
    "Biblioteca municipal",
    "Centro cultural",
    "Plaza de mercado",
    "Coliseo",
    "Institución educativa",
    "Casa de la cultura",
    "Polideportivo",
];

const TECHNOLOGIES: &[&str] = &["Radio enlace", "Fibra", "Satelital"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Technology weighted roughly 80/15/5.
fn technology(rng: &mut SimpleRng) -> &'static str {
    match rng.next_f64() {
        r if r < 0.80 => TECHNOLOGIES[0],
        r if r < 0.95 => TECHNOLOGIES[1],
        _ => TECHNOLOGIES[2],
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_zonas_wifi.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer
        .write_record(["ID", "Municipio", "Nombre de la zona", "Tipo de zona", "Tecnología"])
        .context("writing header")?;

    let mut id = 0usize;
    for &(municipality, n) in MUNICIPALITIES {
        for _ in 0..n {
            id += 1;
            let place = format!("{}, {municipality}", rng.pick(PLACES));
            let zone_type = if rng.next_f64() < 0.65 { "URBANA" } else { "RURAL" };
            writer
                .write_record([
                    id.to_string().as_str(),
                    municipality,
                    place.as_str(),
                    zone_type,
                    technology(&mut rng),
                ])
                .with_context(|| format!("writing row {id}"))?;
        }
    }
    writer.flush().context("flushing output file")?;

    println!(
        "Wrote {id} hotspots across {} municipalities to {output_path}",
        MUNICIPALITIES.len()
    );
    Ok(())
}
