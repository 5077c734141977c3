use std::path::Path;

use anyhow::{Context, Result};

use shipping_dashboard::config::INPUT_CSV;
use shipping_dashboard::data::model::Shipment;

const ROWS: u32 = 2000;

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * f64::from(hi - lo + 1)) as u32
    }

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(item, w) in choices {
            if roll < w {
                return item;
            }
            roll -= w;
        }
        choices[choices.len() - 1].0
    }
}

fn generate(rng: &mut SimpleRng, id: u32) -> Shipment {
    let warehouse = rng.weighted(&[("A", 1.0), ("B", 1.0), ("C", 1.0), ("D", 1.0), ("F", 2.0)]);
    let mode = rng.weighted(&[("Ship", 0.68), ("Flight", 0.16), ("Road", 0.16)]);
    let importance = rng.weighted(&[("low", 0.48), ("medium", 0.43), ("high", 0.09)]);
    let gender = rng.weighted(&[("F", 0.5), ("M", 0.5)]);

    // two weight clusters, a few cells left blank
    let weight = if rng.next_f64() < 0.02 {
        None
    } else if rng.next_f64() < 0.4 {
        Some(rng.range(1001, 3000))
    } else {
        Some(rng.range(4000, 7846))
    };

    Shipment {
        id,
        warehouse_block: warehouse.to_string(),
        mode_of_shipment: mode.to_string(),
        customer_care_calls: rng.range(2, 7) as u8,
        customer_rating: rng.range(1, 5) as u8,
        cost_of_the_product: rng.range(96, 310),
        prior_purchases: rng.range(2, 10) as u8,
        product_importance: importance.to_string(),
        gender: gender.to_string(),
        discount_offered: rng.range(1, 65) as u8,
        weight_in_gms: weight,
        reached_on_time: u8::from(rng.next_f64() < 0.6),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let output_path = Path::new(INPUT_CSV);
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for id in 1..=ROWS {
        writer.serialize(generate(&mut rng, id))?;
    }
    writer.flush()?;

    log::info!("Wrote {ROWS} shipments to {}", output_path.display());
    Ok(())
}
