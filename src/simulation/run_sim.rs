use rand::{Rng, SeedableRng, rngs, seq::SliceRandom};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::data::summary::split_arms;
use crate::data::types::Observation;
use crate::error::TrialpowerErr;
use crate::estimation::effect::{compute_effect, difference_in_means};
use crate::estimation::types::Arm;
use crate::simulation::error::SimulationErr;
use crate::simulation::types::{
    FractionSweepRow, SamplingMode, SimulationResult, SimulationSettings, SubsampleSize, TStat,
    TrialResult,
};

/// Largest number of observations drawn from one arm per replicate
pub const MAX_SUBSAMPLE: usize = 10_000_000;

/// Runs `settings.replicates` simulated trials, each drawing a sub-sample
/// from the treatment and control arms of `observations` and testing the
/// difference in means.
///
/// Replicate i draws from its own generator seeded with seed + i, so the
/// replicate table is reproducible and independent of how replicates are
/// scheduled across threads.
pub fn run_trial_sims(
    observations: &[Observation],
    settings: &SimulationSettings,
) -> Result<SimulationResult, TrialpowerErr> {
    if settings.replicates == 0 {
        return Err(SimulationErr::ZeroReplicates.into());
    }
    if !(settings.critical_value > 0. && settings.critical_value.is_finite()) {
        return Err(SimulationErr::BadCriticalValue(settings.critical_value).into());
    }
    let (treatment, control) = split_arms(
        observations,
        settings.treatment_level,
        settings.control_level,
        settings.outcome,
    )?;
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

    info!(
        replicates = settings.replicates,
        n_treatment,
        n_control,
        seed = settings.seed,
        "running trial simulations"
    );

    //----------------------------------------
    // Simulate trials
    //----------------------------------------
    let replicates: Vec<TrialResult> = (0..settings.replicates)
        .into_par_iter()
        .map(|i| {
            run_single_trial(
                &treatment,
                &control,
                n_treatment,
                n_control,
                settings.sampling_mode,
                settings.seed.wrapping_add(i as u64),
                i,
            )
        })
        .collect();

    //----------------------------------------
    // Aggregate
    //----------------------------------------
    let (rejections, undefined_count) = replicates.iter().fold(
        (0, 0),
        |(rejections, undefined), trial| match trial.rejects(settings.critical_value) {
            Some(true) => (rejections + 1, undefined),
            Some(false) => (rejections, undefined),
            None => (rejections, undefined + 1),
        },
    );
    let n_defined = replicates.len() - undefined_count;
    let rejection_rate = if n_defined == 0 {
        None
    } else {
        Some(rejections as f64 / n_defined as f64)
    };

    if undefined_count > 0 {
        warn!(
            undefined_count,
            n_defined, "some replicates had an undefined t statistic"
        );
    }
    info!(?rejection_rate, rejections, "trial simulations finished");

    Ok(SimulationResult {
        replicates,
        rejection_rate,
        rejections,
        undefined_count,
        n_treatment,
        n_control,
    })
}

/// One simulated trial: draws `n_treatment` and `n_control` outcomes (in that
/// order) from a generator seeded with `seed`, and computes the difference in
/// means and its t statistic
pub fn run_single_trial(
    treatment: &[f64],
    control: &[f64],
    n_treatment: usize,
    n_control: usize,
    sampling_mode: SamplingMode,
    seed: u64,
    replicate: usize,
) -> TrialResult {
    let mut rng = rngs::StdRng::seed_from_u64(seed);
    let treatment_sample = draw(treatment, n_treatment, sampling_mode, &mut rng);
    let control_sample = draw(control, n_control, sampling_mode, &mut rng);

    let t_stat = match compute_effect(&treatment_sample, &control_sample) {
        Ok(effect) => TStat::Value(effect.t_stat),
        Err(e) => TStat::Undefined(e.into()),
    };
    TrialResult {
        replicate,
        estimate: difference_in_means(&treatment_sample, &control_sample),
        t_stat,
    }
}

/// Runs the simulation once per sampling fraction, all with the same seed,
/// tracing the empirical rejection rate against sub-sample size
pub fn sweep_fractions(
    observations: &[Observation],
    settings: &SimulationSettings,
    fractions: &[f64],
) -> Result<Vec<FractionSweepRow>, TrialpowerErr> {
    fractions
        .iter()
        .map(|&fraction| {
            let fraction_settings = SimulationSettings {
                subsample_size: SubsampleSize::Fraction(fraction),
                ..*settings
            };
            Ok(FractionSweepRow {
                fraction,
                result: run_trial_sims(observations, &fraction_settings)?,
            })
        })
        .collect()
}

/// Number of observations to draw from an arm of `available` observations.
///
/// A fraction that rounds to zero subjects is allowed; its replicates all come
/// out undefined. An explicit `PerGroup(0)` is rejected as a configuration
/// error, as is any size above `MAX_SUBSAMPLE`.
pub fn subsample_size(
    arm: Arm,
    available: usize,
    size: SubsampleSize,
    sampling_mode: SamplingMode,
) -> Result<usize, TrialpowerErr> {
    let requested = match size {
        SubsampleSize::Fraction(fraction) => {
            let too_large = sampling_mode == SamplingMode::WithoutReplacement && fraction > 1.;
            if !(fraction > 0. && fraction.is_finite()) || too_large {
                return Err(SimulationErr::BadFraction(fraction).into());
            }
            (fraction * available as f64).round()
        }
        SubsampleSize::PerGroup(0) => {
            return Err(SimulationErr::EmptySubsample { arm }.into());
        }
        SubsampleSize::PerGroup(n) => n as f64,
    };
    // Checked before the cast, which would saturate
    if requested > MAX_SUBSAMPLE as f64 {
        return Err(SimulationErr::SubsampleOverCap {
            arm,
            requested,
            cap: MAX_SUBSAMPLE,
        }
        .into());
    }
    let requested = requested as usize;
    if sampling_mode == SamplingMode::WithoutReplacement && requested > available {
        return Err(SimulationErr::SubsampleTooLarge {
            arm,
            requested,
            available,
        }
        .into());
    }
    Ok(requested)
}

fn draw(values: &[f64], n: usize, sampling_mode: SamplingMode, rng: &mut rngs::StdRng) -> Vec<f64> {
    match sampling_mode {
        SamplingMode::WithoutReplacement => values.choose_multiple(rng, n).copied().collect(),
        SamplingMode::WithReplacement => (0..n)
            .map(|_| values[rng.gen_range(0..values.len())])
            .collect(),
    }
}
