use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::error::TrialpowerErr;
use crate::hypothesis_type::HypothesisType;
use crate::power::noncentral_t::noncentral_t_cdf;
use crate::power::types::PowerPoint;

/// Above this many degrees of freedom t quantiles use the Cornish-Fisher
/// expansion around the normal quantile
const QUANTILE_LARGE_DF: f64 = 1e4;

/// Degrees of freedom of the equal-variance two-sample t-test with `n`
/// subjects per group
pub fn degrees_of_freedom(n: f64) -> f64 {
    2. * n - 2.
}

/// Noncentrality parameter for standardized effect `effect_size` with `n`
/// subjects per group
pub fn noncentrality(effect_size: f64, n: f64) -> f64 {
    effect_size * (n / 2.).sqrt()
}

/// Quantile of the central t distribution
pub fn t_quantile(p: f64, df: f64) -> Result<f64, TrialpowerErr> {
    if df > QUANTILE_LARGE_DF {
        let std_normal =
            Normal::new(0.0, 1.0).map_err(|e| TrialpowerErr::Distribution(e.to_string()))?;
        let z = std_normal.inverse_cdf(p);
        let z3 = z * z * z;
        let z5 = z3 * z * z;
        return Ok(z + (z3 + z) / (4. * df) + (5. * z5 + 16. * z3 + 3. * z) / (96. * df * df));
    }
    let t_dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| TrialpowerErr::Distribution(e.to_string()))?;
    Ok(t_dist.inverse_cdf(p))
}

/// Rejection threshold on the t statistic; two-sided tests split alpha
/// between the tails
pub fn critical_value(
    alpha: f64,
    df: f64,
    alternative: HypothesisType,
) -> Result<f64, TrialpowerErr> {
    let p = match alternative {
        HypothesisType::NotEqual => 1. - alpha / 2.,
        HypothesisType::TrtGreater | HypothesisType::TrtLess => 1. - alpha,
    };
    t_quantile(p, df)
}

/// Power of the equal-variance two-sample t-test with `n` subjects per group,
/// unit pooled standard deviation, and standardized effect `effect_size`.
///
/// Arguments are assumed valid (n > 1, alpha in (0, 1), finite effect size);
/// `solve_power` validates queries before calling this.
pub fn ttest_power(
    effect_size: f64,
    n: f64,
    alpha: f64,
    alternative: HypothesisType,
) -> Result<f64, TrialpowerErr> {
    let df = degrees_of_freedom(n);
    let ncp = noncentrality(effect_size, n);
    let crit = critical_value(alpha, df, alternative)?;

    let power = match alternative {
        HypothesisType::NotEqual => {
            (1. - noncentral_t_cdf(crit, df, ncp)) + noncentral_t_cdf(-crit, df, ncp)
        }
        HypothesisType::TrtGreater => 1. - noncentral_t_cdf(crit, df, ncp),
        HypothesisType::TrtLess => noncentral_t_cdf(-crit, df, ncp),
    };
    Ok(power.clamp(0., 1.))
}

/// Power at each per-group sample size, for tracing how power falls off as
/// the experiment shrinks
pub fn power_curve(
    sample_sizes: &[f64],
    effect_size: f64,
    alpha: f64,
    alternative: HypothesisType,
) -> Result<Vec<PowerPoint>, TrialpowerErr> {
    sample_sizes
        .iter()
        .map(|&n| {
            Ok(PowerPoint {
                n,
                power: ttest_power(effect_size, n, alpha, alternative)?,
            })
        })
        .collect()
}
