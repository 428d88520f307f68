//! Test data generation.
//!
//! Produces CSVs with the column mix the dashboards expect: a time-of-day
//! column, a couple of continuous metrics, an angle, a bounded strength
//! score, a small categorical, and a binary status flag. Seedable for
//! reproducible fixtures.

use crate::data::DataResult;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Distribution pattern for the continuous columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// Normal distributions for width/height
    Normal,
    /// Exponential-style long tail
    Skewed,
    /// Two-mode mixture
    Bimodal,
    /// Normal width with a skewed height
    Mixed,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::Mixed
    }
}

/// Generation parameters.
#[derive(Clone, Debug)]
pub struct SampleSpec {
    pub rows: usize,
    pub pattern: Pattern,
    /// Distinct labels in the category column (A, B, C, ...)
    pub categories: usize,
    pub seed: u64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            rows: 100_000,
            pattern: Pattern::default(),
            categories: 4,
            seed: 42,
        }
    }
}

/// Generate a CSV string per the spec.
pub fn generate_csv(spec: &SampleSpec) -> String {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let categories = spec.categories.clamp(1, 26);

    let mut out = String::with_capacity(spec.rows * 48 + 64);
    out.push_str("time,width,height,angle,strength,category,status\n");

    for _ in 0..spec.rows {
        let (width, height) = continuous_pair(&mut rng, spec.pattern);
        let seconds: u32 = rng.gen_range(0..86_400);
        let angle: f64 = rng.gen_range(0.0..360.0);
        let strength = normal(&mut rng, 50.0, 20.0).clamp(0.0, 100.0);
        let category = (b'A' + rng.gen_range(0..categories) as u8) as char;
        let status = u8::from(rng.gen_bool(0.7));

        out.push_str(&format!(
            "{:02}:{:02}:{:02},{:.3},{:.3},{:.2},{:.2},{},{}\n",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60,
            width.max(0.1),
            height.max(0.1),
            angle,
            strength,
            category,
            status
        ));
    }

    out
}

/// Generate and write a CSV file.
pub fn write_csv(path: &Path, spec: &SampleSpec) -> DataResult<()> {
    let content = generate_csv(spec);
    std::fs::write(path, content)?;
    tracing::info!(
        "Generated {} rows of {:?} data at {}",
        spec.rows,
        spec.pattern,
        path.display()
    );
    Ok(())
}

fn continuous_pair(rng: &mut StdRng, pattern: Pattern) -> (f64, f64) {
    match pattern {
        Pattern::Normal => (normal(rng, 100.0, 20.0), normal(rng, 50.0, 10.0)),
        Pattern::Skewed => (exponential(rng, 50.0), exponential(rng, 20.0)),
        Pattern::Bimodal => (bimodal(rng), bimodal(rng) / 2.0),
        Pattern::Mixed => (normal(rng, 100.0, 20.0), exponential(rng, 20.0)),
    }
}

/// Box-Muller normal sample.
fn normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn exponential(rng: &mut StdRng, scale: f64) -> f64 {
    let u: f64 = rng.gen_range(f64::EPSILON..1.0);
    -u.ln() * scale
}

fn bimodal(rng: &mut StdRng) -> f64 {
    if rng.gen_bool(0.5) {
        normal(rng, 40.0, 8.0)
    } else {
        normal(rng, 120.0, 12.0)
    }
}
