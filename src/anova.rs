//! One-way analysis of variance.
//!
//! Splits the total variability of a [`Dataset`] into a between-group
//! (treatment) and a within-group (error) component and tests the ratio of
//! their mean squares against the F distribution.
//!
//! # Example
//!
//! ```
//! use anova_sim::anova::analyze;
//! use anova_sim::types::Dataset;
//!
//! let dataset = Dataset::from_groups(&[
//!     vec![2.3, 2.5, 2.7, 2.9],
//!     vec![3.2, 3.4, 3.6, 3.8],
//!     vec![4.1, 4.3, 4.5, 4.7],
//! ])
//! .expect("three labelled groups");
//! let result = analyze(&dataset).expect("three groups with replicates");
//! assert_eq!(result.treatment.df, 2);
//! assert_eq!(result.error.df, 9);
//! assert!(result.p_value < 0.05);
//! ```

use crate::distributions::f_survival;
use crate::error::{AnovaError, Result};
use crate::types::{Dataset, GroupLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// How the within-group sum of squares is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorSumOfSquares {
    /// Accumulate `Σ_i Σ_j (y_ij - ȳ_i)²` directly.
    #[default]
    Direct,
    /// Take `SS_total - SS_treatment`, clamped at zero.
    Residual,
}

/// Settings for [`analyze_with`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnovaConfig {
    pub error_ss: ErrorSumOfSquares,
}

/// Sum of squares, degrees of freedom and mean square of one source of variation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceComponent {
    pub sum_of_squares: f64,
    pub df: usize,
    pub mean_square: f64,
}

impl VarianceComponent {
    fn new(sum_of_squares: f64, df: usize) -> Self {
        Self {
            sum_of_squares,
            df,
            mean_square: sum_of_squares / df as f64,
        }
    }
}

/// Size and mean of one factor level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub label: GroupLabel,
    pub count: usize,
    pub mean: f64,
}

/// Outcome of the F-test at a given significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    RejectNull,
    FailToRejectNull,
}

/// Full one-way ANOVA table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    pub total: VarianceComponent,
    pub treatment: VarianceComponent,
    pub error: VarianceComponent,
    pub f_statistic: f64,
    pub p_value: f64,
    pub n_observations: usize,
    /// Per-level summaries in ascending label order
    pub groups: Vec<GroupSummary>,
}

impl AnovaResult {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    pub fn conclusion(&self, alpha: f64) -> Conclusion {
        if self.is_significant(alpha) {
            Conclusion::RejectNull
        } else {
            Conclusion::FailToRejectNull
        }
    }
}

impl fmt::Display for AnovaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SStotal       = {:.4} (df = {})",
            self.total.sum_of_squares, self.total.df
        )?;
        writeln!(
            f,
            "SStreatments  = {:.4} (df = {})",
            self.treatment.sum_of_squares, self.treatment.df
        )?;
        writeln!(
            f,
            "SSerror       = {:.4} (df = {})",
            self.error.sum_of_squares, self.error.df
        )?;
        writeln!(f, "MS_treatments = {:.4}", self.treatment.mean_square)?;
        writeln!(f, "MS_error      = {:.4}", self.error.mean_square)?;
        writeln!(f, "F-statistic   = {:.4}", self.f_statistic)?;
        write!(f, "p-value       = {:.6}", self.p_value)
    }
}

#[derive(Default)]
struct GroupAccumulator {
    values: Vec<f64>,
}

impl GroupAccumulator {
    fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Runs a one-way ANOVA with the default settings.
pub fn analyze(dataset: &Dataset) -> Result<AnovaResult> {
    analyze_with(dataset, &AnovaConfig::default())
}

/// Runs a one-way ANOVA.
///
/// Fails with [`AnovaError::InsufficientData`] when there are fewer than two
/// groups or no more observations than groups, and with
/// [`AnovaError::Computation`] when a NaN or infinite observation makes a sum
/// of squares non-finite.
///
/// A zero within-group mean square is not an error: the F-statistic becomes
/// `+inf` with a p-value of 0, or 0 with a p-value of 1 when every
/// observation is identical.
pub fn analyze_with(dataset: &Dataset, config: &AnovaConfig) -> Result<AnovaResult> {
    let mut partition: BTreeMap<GroupLabel, GroupAccumulator> = BTreeMap::new();
    for obs in dataset.iter() {
        partition.entry(obs.group).or_default().values.push(obs.value);
    }

    let n_groups = partition.len();
    let n_total = dataset.len();
    if n_groups < 2 || n_total <= n_groups {
        return Err(AnovaError::InsufficientData {
            groups: n_groups,
            observations: n_total,
        });
    }

    let values = dataset.values();
    let grand_mean = values.sum() / n_total as f64;

    let groups: Vec<GroupSummary> = partition
        .iter()
        .map(|(&label, acc)| GroupSummary {
            label,
            count: acc.values.len(),
            mean: acc.mean(),
        })
        .collect();

    // SS_total = Σ (y - ȳ)²
    let ss_total = values.mapv(|y| (y - grand_mean).powi(2)).sum();

    // SS_treatment = Σ n_i (ȳ_i - ȳ)²
    let ss_treatment = groups
        .iter()
        .map(|g| g.count as f64 * (g.mean - grand_mean).powi(2))
        .sum::<f64>();

    let ss_error = match config.error_ss {
        ErrorSumOfSquares::Direct => partition
            .values()
            .zip(groups.iter())
            .map(|(acc, g)| {
                acc.values
                    .iter()
                    .map(|&y| (y - g.mean).powi(2))
                    .sum::<f64>()
            })
            .sum::<f64>(),
        ErrorSumOfSquares::Residual => (ss_total - ss_treatment).max(0.0),
    };

    if !(ss_total.is_finite() && ss_treatment.is_finite() && ss_error.is_finite()) {
        return Err(AnovaError::Computation(format!(
            "non-finite sum of squares (total = {ss_total}, treatment = {ss_treatment}, \
             error = {ss_error}); observations must be finite"
        )));
    }

    let treatment = VarianceComponent::new(ss_treatment, n_groups - 1);
    let error = VarianceComponent::new(ss_error, n_total - n_groups);
    let total = VarianceComponent::new(ss_total, n_total - 1);

    let (f_statistic, p_value) = if error.mean_square > 0.0 {
        let f_stat = treatment.mean_square / error.mean_square;
        (f_stat, f_survival(f_stat, treatment.df, error.df)?)
    } else if treatment.mean_square > 0.0 {
        warn!(
            ms_treatment = treatment.mean_square,
            "within-group variance is zero; F-statistic is infinite"
        );
        (f64::INFINITY, 0.0)
    } else {
        warn!("all observations are identical; no variance to decompose");
        (0.0, 1.0)
    };

    debug!(
        groups = n_groups,
        observations = n_total,
        ss_total,
        ss_treatment,
        ss_error,
        f_statistic,
        p_value,
        "one-way ANOVA"
    );

    Ok(AnovaResult {
        total,
        treatment,
        error,
        f_statistic,
        p_value,
        n_observations: n_total,
        groups,
    })
}
