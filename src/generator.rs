//! Synthetic one-factor dataset generation.
//!
//! Each factor level `i` has a hidden true mean `intercept + 0.6 * i`, and
//! observations are drawn from a Normal distribution around that mean.

use crate::error::{AnovaError, Result};
use crate::types::{Dataset, GroupLabel};
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution as RandDistribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Increment of the hidden mean from one level to the next.
pub const LEVEL_STEP: f64 = 0.6;

/// Parameters of the synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of factor levels
    pub a: usize,
    /// Observations per level
    pub n: usize,
    /// Hidden linear slope. Stored for reference; the mean model uses `level_step`.
    pub slope: f64,
    /// Mean of level 0
    pub intercept: f64,
    /// Standard deviation of the Gaussian noise
    pub sigma: f64,
    /// RNG seed (if None, the generator is seeded from the OS)
    pub seed: Option<u64>,
    /// Per-level increment of the hidden mean
    pub level_step: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            a: 4,
            n: 10,
            slope: 2.0,
            intercept: 5.0,
            sigma: 1.0,
            seed: Some(42),
            level_step: LEVEL_STEP,
        }
    }
}

impl GeneratorConfig {
    pub fn new(
        a: usize,
        n: usize,
        slope: f64,
        intercept: f64,
        sigma: f64,
        seed: Option<u64>,
    ) -> Self {
        Self {
            a,
            n,
            slope,
            intercept,
            sigma,
            seed,
            level_step: LEVEL_STEP,
        }
    }

    /// The true mean of every level, in level order.
    pub fn hidden_means(&self) -> Vec<f64> {
        (0..self.a)
            .map(|level| self.intercept + self.level_step * level as f64)
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.a == 0 {
            return Err(AnovaError::InvalidInput(
                "number of levels `a` must be at least 1".to_string(),
            ));
        }
        if self.n == 0 {
            return Err(AnovaError::InvalidInput(
                "observations per level `n` must be at least 1".to_string(),
            ));
        }
        GroupLabel::try_from(self.a - 1)?;
        Ok(())
    }
}

/// Generates a dataset with the fixed `0.6` per-level mean step.
///
/// `slope` is accepted for symmetry with the hidden linear model but does not
/// change the generated means.
pub fn generate(
    a: usize,
    n: usize,
    slope: f64,
    intercept: f64,
    sigma: f64,
    seed: Option<u64>,
) -> Result<Dataset> {
    generate_from_config(&GeneratorConfig::new(a, n, slope, intercept, sigma, seed))
}

/// Generates a dataset using a `ChaCha8Rng` built from `config.seed`.
pub fn generate_from_config(config: &GeneratorConfig) -> Result<Dataset> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    generate_with_rng(config, &mut rng)
}

/// Generates a dataset drawing from a caller-owned random generator.
///
/// Observations are grouped by level in ascending order, each level's `n`
/// samples in draw order.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Dataset> {
    config.validate()?;

    let means = config.hidden_means();
    let mut labels = Vec::with_capacity(config.a * config.n);
    let mut values = Vec::with_capacity(config.a * config.n);

    for (level, &mean) in means.iter().enumerate() {
        let label = GroupLabel::try_from(level)?;
        let normal = Normal::new(mean, config.sigma).map_err(|e| {
            AnovaError::InvalidInput(format!("sigma = {}: {}", config.sigma, e))
        })?;
        for _ in 0..config.n {
            labels.push(label);
            values.push(normal.sample(rng));
        }
    }

    debug!(
        levels = config.a,
        per_level = config.n,
        sigma = config.sigma,
        seed = ?config.seed,
        "generated synthetic dataset"
    );

    Dataset::from_columns(labels, Array1::from_vec(values))
}
