//! Generate-then-analyze experiment with a fixed text report.

use crate::anova::{AnovaConfig, AnovaResult, Conclusion, analyze_with};
use crate::error::Result;
use crate::generator::{GeneratorConfig, generate_from_config};
use crate::types::Dataset;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Parameters of one experiment run.
///
/// The default is the demonstration run: 5 levels of 8 observations,
/// intercept 3.0, sigma 1.2, seed 123. When deserializing, an absent
/// `generator` table takes these demo values, but a partially given one fills
/// its missing fields from [`GeneratorConfig::default`] (4 levels of 10,
/// intercept 5.0, sigma 1.0, seed 42).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub generator: GeneratorConfig,
    pub anova: AnovaConfig,
    /// Significance level of the F-test
    pub alpha: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::new(5, 8, 1.5, 3.0, 1.2, Some(123)),
            anova: AnovaConfig::default(),
            alpha: 0.05,
        }
    }
}

/// A generated dataset together with its ANOVA table.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub dataset: Dataset,
    pub result: AnovaResult,
    pub alpha: f64,
}

impl Experiment {
    pub fn conclusion(&self) -> Conclusion {
        self.result.conclusion(self.alpha)
    }

    /// Human-readable printout of the dataset (every row), the ANOVA table and
    /// the decision.
    pub fn report(&self) -> String {
        let alpha = self.alpha;
        let conclusion = match self.conclusion() {
            Conclusion::RejectNull => format!(
                "Conclusion: Reject the null hypothesis – the factor levels influence y (p < {alpha})."
            ),
            Conclusion::FailToRejectNull => format!(
                "Conclusion: Fail to reject the null hypothesis – no significant effect of factor levels (p >= {alpha})."
            ),
        };
        format!(
            "Generated dataset:\n{}\n\nOne-way ANOVA results (manual calculation):\n{}\n\n{}\n",
            self.dataset, self.result, conclusion
        )
    }
}

/// Generates the dataset described by `config` and analyzes it.
pub fn run(config: &ExperimentConfig) -> Result<Experiment> {
    let dataset = generate_from_config(&config.generator)?;
    let result = analyze_with(&dataset, &config.anova)?;

    info!(
        f_statistic = result.f_statistic,
        p_value = result.p_value,
        alpha = config.alpha,
        "experiment finished"
    );

    Ok(Experiment {
        dataset,
        result,
        alpha: config.alpha,
    })
}
