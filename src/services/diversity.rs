use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Source of the bounded random bonus added to content scores.
///
/// Injected into the scorer so runs can be made reproducible.
pub trait DiversitySource: Send + Sync {
    /// Draws one perturbation, always finite and non-negative
    fn sample(&self) -> f64;
}

/// Always zero; makes content scoring deterministic
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiversity;

impl DiversitySource for NoDiversity {
    fn sample(&self) -> f64 {
        0.0
    }
}

/// Uniform over `[0, max)` from the thread-local generator
#[derive(Debug, Clone, Copy)]
pub struct UniformDiversity {
    max: f64,
}

impl UniformDiversity {
    pub fn new(max: f64) -> Self {
        Self { max }
    }
}

impl DiversitySource for UniformDiversity {
    fn sample(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        rand::rng().random_range(0.0..self.max)
    }
}

/// Uniform over `[0, max)` from a seeded generator, repeatable across runs
#[derive(Debug)]
pub struct SeededDiversity {
    max: f64,
    rng: Mutex<StdRng>,
}

impl SeededDiversity {
    pub fn new(max: f64, seed: u64) -> Self {
        Self {
            max,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DiversitySource for SeededDiversity {
    fn sample(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0.0..self.max)
    }
}

/// Picks the diversity source for the configured bound and optional seed
pub fn from_settings(max: f64, seed: Option<u64>) -> Arc<dyn DiversitySource> {
    match seed {
        _ if max <= 0.0 => Arc::new(NoDiversity),
        Some(seed) => Arc::new(SeededDiversity::new(max, seed)),
        None => Arc::new(UniformDiversity::new(max)),
    }
}
