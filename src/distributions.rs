//! Reference distributions used to turn test statistics into p-values.

use crate::error::{AnovaError, Result};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Upper-tail probability `P(X > f)` for `X ~ F(df1, df2)`.
///
/// Uses the regularized incomplete beta function through `statrs`.
/// `f = +inf` maps to 0 and `f <= 0` maps to 1.
pub fn f_survival(f: f64, df1: usize, df2: usize) -> Result<f64> {
    if f.is_nan() {
        return Err(AnovaError::Computation("F-statistic is NaN".to_string()));
    }
    let dist = FisherSnedecor::new(df1 as f64, df2 as f64).map_err(|e| {
        AnovaError::Computation(format!("F({df1}, {df2}) distribution: {e}"))
    })?;

    if f == f64::INFINITY {
        return Ok(0.0);
    }
    if f <= 0.0 {
        return Ok(1.0);
    }

    let p = dist.sf(f);
    if !p.is_finite() {
        return Err(AnovaError::Computation(format!(
            "survival function of F({df1}, {df2}) at {f} is not finite"
        )));
    }
    Ok(p.clamp(0.0, 1.0))
}
