use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1251;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const REGIONS: &[(&str, f64)] = &[
    ("Москва", 3.2),
    ("Санкт-Петербург", 1.6),
    ("Московская область", 1.1),
    ("Краснодарский край", 0.7),
    ("Республика Татарстан", 0.6),
    ("Свердловская область", 0.55),
    ("Новосибирская область", 0.4),
];

const YEARS: std::ops::RangeInclusive<i32> = 2015..=2022;

/// Render one table: a `Name` header plus one column per year, values
/// scaled per region and drifting upward with mild noise.
fn render_table(
    base: f64,
    yearly_growth: f64,
    noise: f64,
    rng: &mut SimpleRng,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    let mut header = vec!["Name".to_string()];
    header.extend(YEARS.map(|year| year.to_string()));
    writer.write_record(&header)?;

    for &(region, weight) in REGIONS {
        let mut record = vec![region.to_string()];
        for (i, _) in YEARS.enumerate() {
            let trend = base * weight * (1.0 + yearly_growth).powi(i as i32);
            let value = rng.gauss(trend, trend * noise).max(0.0);
            record.push(format!("{value:.1}"));
        }
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().context("finishing CSV buffer")?;
    String::from_utf8(bytes).context("CSV buffer is not UTF-8")
}

fn write_utf8(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

/// housing.csv is deliberately written in Windows-1251 so the loader's
/// fallback chain is exercised on real bytes.
fn write_cp1251(path: &Path, text: &str) -> Result<()> {
    let (bytes, _, _) = WINDOWS_1251.encode(text);
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let budget = render_table(50_000_000_000.0, 0.08, 0.03, &mut rng)?;
    let housing = render_table(24.0, 0.015, 0.01, &mut rng)?;
    let investments = render_table(900_000_000.0, 0.11, 0.08, &mut rng)?;

    write_utf8(Path::new("budget.csv"), &budget)?;
    write_cp1251(Path::new("housing.csv"), &housing)?;
    write_utf8(Path::new("investments.csv"), &investments)?;

    println!(
        "Wrote budget.csv (UTF-8), housing.csv (Windows-1251) and investments.csv (UTF-8) \
         with {} regions over {}..{}",
        REGIONS.len(),
        YEARS.start(),
        YEARS.end(),
    );
    Ok(())
}
