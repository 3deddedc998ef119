use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REAL_WORLD_MEAN: f64 = 128.0;
const REAL_WORLD_STD_DEV: f64 = 40.0;
const REAL_WORLD_MAX: f64 = 255.0;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Distribution {
    /// Uniform in `[0, max]`.
    #[default]
    Uniform,
    /// Normal(128, 40) clamped to a byte, rescaled to `[0, max]`.
    RealWorld,
}

impl Distribution {
    pub fn label(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::RealWorld => "real_world",
        }
    }
}

pub fn generate(distribution: Distribution, count: usize, max: u64, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| sample(distribution, max, &mut rng))
        .collect()
}

pub fn sample<R: Rng + ?Sized>(distribution: Distribution, max: u64, rng: &mut R) -> u64 {
    match distribution {
        Distribution::Uniform => rng.random_range(0..=max),
        Distribution::RealWorld => {
            let byte = real_world_byte(rng);
            if max == REAL_WORLD_MAX as u64 {
                byte
            } else {
                ((u128::from(byte) * u128::from(max)) / REAL_WORLD_MAX as u128) as u64
            }
        }
    }
}

fn real_world_byte<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    // Box-Muller; the open interval keeps ln() finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    (REAL_WORLD_MEAN + z * REAL_WORLD_STD_DEV).clamp(0.0, REAL_WORLD_MAX) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        for distribution in [Distribution::Uniform, Distribution::RealWorld] {
            let a = generate(distribution, 256, 255, 7);
            let b = generate(distribution, 256, 255, 7);
            assert_eq!(a, b, "distribution={}", distribution.label());
            assert_eq!(a.len(), 256);
        }
    }

    #[test]
    fn values_stay_in_bounds() {
        for &max in &[0_u64, 1, 255, 65_535, u64::MAX] {
            for distribution in [Distribution::Uniform, Distribution::RealWorld] {
                let data = generate(distribution, 512, max, 0x5EED_2026);
                assert!(data.iter().all(|&v| v <= max), "max={max}");
            }
        }
    }

    #[test]
    fn real_world_centers_near_mean() {
        let data = generate(Distribution::RealWorld, 4096, 255, 11);
        let mean = data.iter().sum::<u64>() as f64 / data.len() as f64;
        assert!((mean - REAL_WORLD_MEAN).abs() < 8.0, "mean={mean}");
    }

    #[test]
    fn zero_count() {
        assert!(generate(Distribution::Uniform, 0, 255, 1).is_empty());
    }
}
