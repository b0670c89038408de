use rand::{SeedableRng, distributions::Distribution, rngs};
use statrs::distribution::Uniform;

use crate::data::error::DataErr;
use crate::data::types::{ArmSpec, Observation};
use crate::error::TrialpowerErr;

/// Simulates a pricing experiment: for each arm, `n` subjects shown the
/// arm's price, each converting independently with the arm's conversion
/// rate. Observations are returned arm by arm, in the order given.
pub fn simulate_pricing_experiment(
    arms: &[ArmSpec],
    seed: u64,
) -> Result<Vec<Observation>, TrialpowerErr> {
    if let Some(arm) = arms
        .iter()
        .find(|arm| !(0. ..=1.).contains(&arm.conversion_rate))
    {
        return Err(DataErr::BadConversionRate {
            price_level: arm.price_level,
            rate: arm.conversion_rate,
        }
        .into());
    }

    let mut observations = Vec::with_capacity(arms.iter().map(|arm| arm.n).sum());
    for (i, arm) in arms.iter().enumerate() {
        // Separate stream per arm, so resizing one arm leaves the others alone
        let arm_rng = rngs::StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        let unit_uniform =
            Uniform::new(0.0, 1.0).map_err(|e| TrialpowerErr::Distribution(e.to_string()))?;
        observations.extend(
            unit_uniform
                .sample_iter(arm_rng)
                .take(arm.n)
                .map(|u| Observation::new(arm.price_level, u < arm.conversion_rate)),
        );
    }
    Ok(observations)
}
