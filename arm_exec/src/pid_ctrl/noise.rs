//! # Noise sources
//!
//! Sensor noise is injected into the controller through the `NoiseSource`
//! trait so that tests can run with no noise and executables can use a real
//! generator.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::fmt::Debug;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of zero-mean noise samples.
pub trait NoiseSource: Debug + Send {
    /// Draw the next sample.
    fn sample(&mut self) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A noise source which is always zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroNoise;

/// Zero-mean gaussian noise with a fixed standard deviation.
#[derive(Debug)]
pub struct GaussianNoise {
    rng: StdRng,
    dist: Normal<f64>,
    std_dev: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl NoiseSource for ZeroNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

impl GaussianNoise {
    /// Create a new gaussian noise source.
    ///
    /// If `seed` is `None` the generator is seeded from system entropy. The
    /// standard deviation must be finite and not negative.
    pub fn new(std_dev: f64, seed: Option<u64>) -> Result<Self, NormalError> {
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(NormalError::BadVariance);
        }

        let dist = Normal::new(0.0, std_dev)?;

        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Ok(Self { rng, dist, std_dev })
    }

    /// The standard deviation of the samples.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_noise() {
        let mut n = ZeroNoise;
        assert!((0..100).all(|_| n.sample() == 0.0));
    }

    #[test]
    fn test_gaussian_noise_seeded() {
        let mut a = GaussianNoise::new(0.2, Some(42)).unwrap();
        let mut b = GaussianNoise::new(0.2, Some(42)).unwrap();

        let a_samples: Vec<f64> = (0..10).map(|_| a.sample()).collect();
        let b_samples: Vec<f64> = (0..10).map(|_| b.sample()).collect();

        assert_eq!(a_samples, b_samples);
        assert_eq!(a.std_dev(), 0.2);
    }

    #[test]
    fn test_gaussian_noise_stats() {
        let mut n = GaussianNoise::new(0.2, Some(1)).unwrap();
        let count = 20_000;

        let samples: Vec<f64> = (0..count).map(|_| n.sample()).collect();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;

        // Loose bounds, the standard error of the mean here is ~0.0014
        assert!(mean.abs() < 0.01, "mean was {}", mean);
        assert!((var.sqrt() - 0.2).abs() < 0.01, "std dev was {}", var.sqrt());
    }

    #[test]
    fn test_gaussian_noise_zero_std_dev() {
        let mut n = GaussianNoise::new(0.0, Some(5)).unwrap();
        assert!((0..100).all(|_| n.sample() == 0.0));
    }

    #[test]
    fn test_gaussian_noise_invalid() {
        assert!(GaussianNoise::new(-1.0, None).is_err());
        assert!(GaussianNoise::new(-0.2, Some(1)).is_err());
        assert!(GaussianNoise::new(f64::NEG_INFINITY, None).is_err());
        assert!(GaussianNoise::new(f64::NAN, None).is_err());
        assert!(GaussianNoise::new(f64::INFINITY, None).is_err());
    }
}
