use statrs::statistics::Statistics;

use crate::error::TrialpowerErr;
use crate::estimation::error::EstimationErr;
use crate::estimation::types::{Arm, EffectEstimate};

/// mean(treatment) - mean(control); None if either arm is empty
pub fn difference_in_means(treatment: &[f64], control: &[f64]) -> Option<f64> {
    if treatment.is_empty() || control.is_empty() {
        return None;
    }
    Some(treatment.mean() - control.mean())
}

/// Difference in means, its standard error
/// sqrt(var(treatment) / n_t + var(control) / n_c) using sample variances,
/// and the ratio of the two as t statistic.
///
/// Fails with `InsufficientData` when either arm has fewer than two
/// observations and `DegenerateVariance` when either arm is constant.
pub fn compute_effect(treatment: &[f64], control: &[f64]) -> Result<EffectEstimate, EstimationErr> {
    let var_treatment = checked_variance(Arm::Treatment, treatment)?;
    let var_control = checked_variance(Arm::Control, control)?;

    let n_treatment = treatment.len();
    let n_control = control.len();
    let estimate = treatment.mean() - control.mean();
    let std_error =
        (var_treatment / n_treatment as f64 + var_control / n_control as f64).sqrt();

    Ok(EffectEstimate {
        estimate,
        std_error,
        t_stat: estimate / std_error,
        n_treatment,
        n_control,
    })
}

/// Cohen's d: difference in means over the pooled standard deviation, the
/// standardized effect size a power query expects
pub fn standardized_effect(treatment: &[f64], control: &[f64]) -> Result<f64, TrialpowerErr> {
    let var_treatment = checked_variance(Arm::Treatment, treatment)?;
    let var_control = checked_variance(Arm::Control, control)?;

    let n_treatment = treatment.len() as f64;
    let n_control = control.len() as f64;
    let pooled_var = ((n_treatment - 1.) * var_treatment + (n_control - 1.) * var_control)
        / (n_treatment + n_control - 2.);
    Ok((treatment.mean() - control.mean()) / pooled_var.sqrt())
}

/// An arm whose standard deviation is at most this fraction of its mean
/// magnitude counts as constant
const DEGENERATE_SD_RATIO: f64 = 1e-10;

fn checked_variance(arm: Arm, values: &[f64]) -> Result<f64, EstimationErr> {
    if values.len() < 2 {
        return Err(EstimationErr::InsufficientData {
            arm,
            n: values.len(),
        });
    }
    let variance = values.variance();
    // Rounding residue from constant inputs is not spread
    if variance == 0. || variance.sqrt() <= DEGENERATE_SD_RATIO * values.mean().abs() {
        return Err(EstimationErr::DegenerateVariance { arm });
    }
    Ok(variance)
}
