//! Injectable Gaussian noise source.
//!
//! Every simulated metric gets zero-mean Gaussian jitter so dashboards
//! look alive. The source is a trait so tests can swap in [`ZeroNoise`]
//! and assert exact values, and so the daemon can seed the generator for
//! reproducible demo runs.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Source of zero-mean Gaussian samples.
pub trait NoiseSource: Send + Sync {
    /// Sample N(0, std_dev). A non-positive std_dev yields 0.
    fn gauss(&self, std_dev: f64) -> f64;
}

/// Real Gaussian noise backed by a seedable RNG.
///
/// The RNG sits behind a mutex since polls can arrive concurrently; the
/// critical section is a single sample.
pub struct GaussianNoise {
    rng: Mutex<StdRng>,
}

impl GaussianNoise {
    /// Noise seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Noise with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NoiseSource for GaussianNoise {
    fn gauss(&self, std_dev: f64) -> f64 {
        if std_dev <= 0.0 {
            return 0.0;
        }
        let Ok(normal) = Normal::new(0.0, std_dev) else {
            return 0.0;
        };
        let Ok(mut rng) = self.rng.lock() else {
            return 0.0;
        };
        rng.sample(normal)
    }
}

/// A noise source that never adds anything. Lets tests assert the exact
/// deterministic part of every model formula.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn gauss(&self, _std_dev: f64) -> f64 {
        0.0
    }
}
