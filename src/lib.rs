//! # anova_sim
//!
//! Synthetic one-factor datasets with a known linear trend, and a one-way
//! analysis of variance to check whether the factor explains the variance of
//! the observations.
//!
//! ## Example
//!
//! ```
//! use anova_sim::prelude::*;
//!
//! let dataset = generate(5, 8, 1.5, 3.0, 1.2, Some(123)).expect("valid parameters");
//! let result = analyze(&dataset).expect("five groups of eight");
//!
//! assert_eq!(result.total.df, 39);
//! assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
//! ```

pub mod anova;
pub mod distributions;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types.
    pub use crate::anova::{
        AnovaConfig, AnovaResult, Conclusion, ErrorSumOfSquares, GroupSummary, VarianceComponent,
        analyze, analyze_with,
    };
    pub use crate::distributions::f_survival;
    pub use crate::error::{AnovaError, Result};
    pub use crate::experiment::{Experiment, ExperimentConfig, run};
    pub use crate::generator::{
        GeneratorConfig, LEVEL_STEP, generate, generate_from_config, generate_with_rng,
    };
    pub use crate::types::{Dataset, GroupLabel, Observation};
}
