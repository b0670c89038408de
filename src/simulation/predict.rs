use statrs::function::erf::erfc;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::data::summary::split_arms;
use crate::data::types::Observation;
use crate::error::TrialpowerErr;
use crate::estimation::effect::standardized_effect;
use crate::estimation::error::EstimationErr;
use crate::estimation::types::Arm;
use crate::hypothesis_type::HypothesisType;
use crate::power::ttest_power::ttest_power;
use crate::simulation::run_sim::subsample_size;
use crate::simulation::types::SimulationSettings;

/// Two-sided significance level matching a rejection threshold on |t|,
/// using the normal approximation (1.96 gives 0.05)
pub fn implied_alpha(critical_value: f64) -> f64 {
    erfc(critical_value * FRAC_1_SQRT_2)
}

/// Closed-form counterpart of `run_trial_sims`: power of the two-sample
/// t-test at the simulated per-group size, taking the standardized effect
/// observed in the full data as the true effect
pub fn predicted_rejection_rate(
    observations: &[Observation],
    settings: &SimulationSettings,
) -> Result<f64, TrialpowerErr> {
    let (treatment, control) = split_arms(
        observations,
        settings.treatment_level,
        settings.control_level,
        settings.outcome,
    )?;
    let effect_size = standardized_effect(&treatment, &control)?;
    let n_treatment = subsample_size(
        Arm::Treatment,
        treatment.len(),
        settings.subsample_size,
        settings.sampling_mode,
    )?;
    let n_control = subsample_size(
        Arm::Control,
        control.len(),
        settings.subsample_size,
        settings.sampling_mode,
    )?;
    for (arm, n) in [(Arm::Treatment, n_treatment), (Arm::Control, n_control)] {
        if n < 2 {
            return Err(EstimationErr::InsufficientData { arm, n }.into());
        }
    }
    // Unequal arms are approximated by their average size
    let n = (n_treatment + n_control) as f64 / 2.;
    ttest_power(
        effect_size,
        n,
        implied_alpha(settings.critical_value),
        HypothesisType::NotEqual,
    )
}
