use itertools::Itertools;
use statrs::statistics::Statistics;

use crate::data::error::DataErr;
use crate::data::types::{GroupSummary, Observation, Outcome};
use crate::error::TrialpowerErr;

/// Mean, standard error and count of `outcome` at each price level, ordered
/// by price level
pub fn summarize_groups(observations: &[Observation], outcome: Outcome) -> Vec<GroupSummary> {
    observations
        .iter()
        .map(|o| (o.price_level, outcome.value(o)))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(price_level, _)| *price_level)
        .map(|(price_level, values)| summarize(price_level, &values))
        .collect()
}

fn summarize(price_level: u32, values: &[f64]) -> GroupSummary {
    let n = values.len();
    let std_error = if n < 2 {
        None
    } else {
        Some(values.std_dev() / (n as f64).sqrt())
    };
    GroupSummary {
        price_level,
        n,
        mean: values.mean(),
        std_error,
    }
}

/// Outcome values of every observation at `price_level`, in input order
pub fn arm_outcomes(
    observations: &[Observation],
    price_level: u32,
    outcome: Outcome,
) -> Result<Vec<f64>, TrialpowerErr> {
    let values: Vec<f64> = observations
        .iter()
        .filter(|o| o.price_level == price_level)
        .map(|o| outcome.value(o))
        .collect();
    if values.is_empty() {
        return Err(DataErr::UnknownLevel(price_level).into());
    }
    Ok(values)
}

/// Splits observations into (treatment, control) outcome vectors
pub fn split_arms(
    observations: &[Observation],
    treatment_level: u32,
    control_level: u32,
    outcome: Outcome,
) -> Result<(Vec<f64>, Vec<f64>), TrialpowerErr> {
    if treatment_level == control_level {
        return Err(DataErr::SameLevels(treatment_level).into());
    }
    let treatment = arm_outcomes(observations, treatment_level, outcome)?;
    let control = arm_outcomes(observations, control_level, outcome)?;
    Ok((treatment, control))
}
