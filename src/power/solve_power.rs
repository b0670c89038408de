use tracing::debug;

use crate::computation_target::ComputationTarget;
use crate::error::TrialpowerErr;
use crate::hypothesis_type::HypothesisType;
use crate::power::error::PowerQueryErr;
use crate::power::ttest_power::ttest_power;
use crate::power::types::{PowerQuery, PowerSolution};
use crate::util::root_find::root_find_monotonic;

/// Power at a root-finding solution is within this much of the target
pub const POWER_TOL: f64 = 1e-6;
/// Smallest per-group sample size searched when solving for n
pub const N_MIN: f64 = 2.;
/// Largest per-group sample size searched when solving for n
pub const N_MAX: f64 = 1e9;
/// Largest |effect size| searched when solving for the effect size
pub const EFFECT_SIZE_MAX: f64 = 1e3;
/// Search interval when solving for the significance level
pub const ALPHA_MIN: f64 = 1e-10;
pub const ALPHA_MAX: f64 = 1. - 1e-10;

/// Checks that exactly one field is unknown and the rest are in domain,
/// returning the field to solve for
pub fn validate_query(query: &PowerQuery) -> Result<ComputationTarget, TrialpowerErr> {
    let unknowns: Vec<ComputationTarget> = [
        (query.n.is_none(), ComputationTarget::SampleSize),
        (query.significance_level.is_none(), ComputationTarget::Alpha),
        (query.power.is_none(), ComputationTarget::Power),
        (query.effect_size.is_none(), ComputationTarget::EffectSize),
    ]
    .into_iter()
    .filter_map(|(missing, target)| missing.then_some(target))
    .collect();

    let target = match unknowns.as_slice() {
        [] => return Err(PowerQueryErr::NoUnknown.into()),
        [target] => *target,
        _ => return Err(PowerQueryErr::MultipleUnknowns(unknowns.len()).into()),
    };

    // n must leave positive degrees of freedom (2n - 2 > 0)
    if let Some(n) = query.n {
        if !(n > 1. && n.is_finite()) {
            return Err(PowerQueryErr::OutOfDomain { field: "n", value: n }.into());
        }
    }
    if let Some(alpha) = query.significance_level {
        if !(alpha > 0. && alpha < 1.) {
            return Err(PowerQueryErr::OutOfDomain {
                field: "significance_level",
                value: alpha,
            }
            .into());
        }
    }
    if let Some(power) = query.power {
        if !(power > 0. && power < 1.) {
            return Err(PowerQueryErr::OutOfDomain {
                field: "power",
                value: power,
            }
            .into());
        }
    }
    if let Some(effect_size) = query.effect_size {
        if !effect_size.is_finite() {
            return Err(PowerQueryErr::OutOfDomain {
                field: "effect_size",
                value: effect_size,
            }
            .into());
        }
    }
    Ok(target)
}

/// Solves a two-sample t-test power query for its single unknown field.
///
/// Power is evaluated directly. Sample size, effect size and significance
/// level are found by bisection, exploiting that power increases
/// monotonically in each of them; the returned value is the smallest one
/// (to `POWER_TOL` in power) whose power reaches the requested power.
pub fn solve_power(query: &PowerQuery) -> Result<PowerSolution, TrialpowerErr> {
    let target = validate_query(query)?;
    let alternative = query.alternative;
    debug!(?target, ?query, "solving power query");

    // validate_query guarantees every field except `target` is present
    let n = query.n.unwrap_or(f64::NAN);
    let alpha = query.significance_level.unwrap_or(f64::NAN);
    let power = query.power.unwrap_or(f64::NAN);
    let effect_size = query.effect_size.unwrap_or(f64::NAN);

    let (n, alpha, power, effect_size) = match target {
        ComputationTarget::Power => {
            let power = ttest_power(effect_size, n, alpha, alternative)?;
            (n, alpha, power, effect_size)
        }
        ComputationTarget::SampleSize => {
            let f_power_by_n = |n| ttest_power(effect_size, n, alpha, alternative);
            ensure_attainable(target, power, f_power_by_n(N_MAX)?)?;
            let n = root_find_monotonic(
                |n| f_power_by_n(n).unwrap_or(f64::NAN),
                N_MIN,
                N_MAX,
                power,
                POWER_TOL,
            )?;
            (n, alpha, power, effect_size)
        }
        ComputationTarget::EffectSize => {
            // Search over |effect|, in the direction the alternative favors
            let sign = match alternative {
                HypothesisType::TrtLess => -1.,
                HypothesisType::NotEqual | HypothesisType::TrtGreater => 1.,
            };
            let f_power_by_effect = |d: f64| ttest_power(sign * d, n, alpha, alternative);
            ensure_attainable(target, power, f_power_by_effect(EFFECT_SIZE_MAX)?)?;
            let magnitude = root_find_monotonic(
                |d| f_power_by_effect(d).unwrap_or(f64::NAN),
                0.,
                EFFECT_SIZE_MAX,
                power,
                POWER_TOL,
            )?;
            (n, alpha, power, sign * magnitude)
        }
        ComputationTarget::Alpha => {
            let f_power_by_alpha = |a| ttest_power(effect_size, n, a, alternative);
            ensure_attainable(target, power, f_power_by_alpha(ALPHA_MAX)?)?;
            let alpha = root_find_monotonic(
                |a| f_power_by_alpha(a).unwrap_or(f64::NAN),
                ALPHA_MIN,
                ALPHA_MAX,
                power,
                POWER_TOL,
            )?;
            (n, alpha, power, effect_size)
        }
    };

    let achieved_power = match target {
        ComputationTarget::Power => power,
        _ => ttest_power(effect_size, n, alpha, alternative)?,
    };

    Ok(PowerSolution {
        target,
        n,
        significance_level: alpha,
        power,
        effect_size,
        alternative,
        achieved_power,
    })
}

fn ensure_attainable(
    target: ComputationTarget,
    power: f64,
    max_power: f64,
) -> Result<(), TrialpowerErr> {
    if max_power < power {
        return Err(PowerQueryErr::Unattainable {
            target,
            power,
            max_power,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        n: Option<f64>,
        significance_level: Option<f64>,
        power: Option<f64>,
        effect_size: Option<f64>,
    ) -> PowerQuery {
        PowerQuery {
            n,
            significance_level,
            power,
            effect_size,
            alternative: HypothesisType::NotEqual,
        }
    }

    #[test]
    fn solve_for_power() {
        let solution = solve_power(&query(Some(160.), Some(0.05), None, Some(0.25)))
            .expect("failed to solve for power");
        assert_eq!(solution.target, ComputationTarget::Power);
        assert!((solution.value() - 0.61).abs() < 0.01);
        assert_eq!(solution.power, solution.achieved_power);
    }

    #[test]
    fn solve_for_sample_size() {
        let solution = solve_power(&query(None, Some(0.05), Some(0.8), Some(0.25)))
            .expect("failed to solve for sample size");
        // Standard tables give 253 per group for d = 0.25, 80% power
        assert_eq!(solution.required_n(), 253);
        assert!(solution.achieved_power >= 0.8);
        assert!(solution.achieved_power - 0.8 <= POWER_TOL);
    }

    #[test]
    fn sample_size_round_trip() {
        let solution = solve_power(&query(None, Some(0.05), Some(0.9), Some(0.4)))
            .expect("failed to solve for sample size");
        let rounded = solve_power(&query(
            Some(solution.required_n() as f64),
            Some(0.05),
            None,
            Some(0.4),
        ))
        .expect("failed to solve for power");
        assert!(rounded.power >= 0.9);
    }

    #[test]
    fn solve_for_effect_size() {
        let solution = solve_power(&query(Some(160.), Some(0.05), Some(0.6062), None))
            .expect("failed to solve for effect size");
        assert!((solution.effect_size - 0.25).abs() < 0.001);
    }

    #[test]
    fn solve_for_effect_size_lower_alternative() {
        let mut q = query(Some(100.), Some(0.05), Some(0.8), None);
        q.alternative = HypothesisType::TrtLess;
        let solution = solve_power(&q).expect("failed to solve for effect size");
        assert!(solution.effect_size < 0.);
        assert!(solution.achieved_power >= 0.8);
    }

    #[test]
    fn solve_for_alpha() {
        let solution = solve_power(&query(Some(160.), None, Some(0.6062), Some(0.25)))
            .expect("failed to solve for alpha");
        assert!((solution.significance_level - 0.05).abs() < 0.001);
    }

    #[test]
    fn target_met_at_smallest_design() {
        // Power below alpha is met by any design
        let solution = solve_power(&query(None, Some(0.05), Some(0.01), Some(0.25)))
            .expect("failed to solve for sample size");
        assert_eq!(solution.n, N_MIN);
    }

    #[test]
    fn null_effect_sample_size_unattainable() {
        let res = solve_power(&query(None, Some(0.05), Some(0.8), Some(0.)));
        match res {
            Err(TrialpowerErr::PowerQuery(e)) => {
                assert!(matches!(e, PowerQueryErr::Unattainable { .. }));
                assert!(!e.is_invalid_query());
            }
            other => panic!("expected unattainable error, got {other:?}"),
        }
    }

    #[test]
    fn no_unknown_is_invalid() {
        let res = solve_power(&query(Some(160.), Some(0.05), Some(0.8), Some(0.25)));
        assert!(matches!(
            res,
            Err(TrialpowerErr::PowerQuery(PowerQueryErr::NoUnknown))
        ));
    }

    #[test]
    fn multiple_unknowns_are_invalid() {
        let res = solve_power(&query(Some(160.), None, None, Some(0.25)));
        assert!(matches!(
            res,
            Err(TrialpowerErr::PowerQuery(PowerQueryErr::MultipleUnknowns(2)))
        ));
        let res = solve_power(&query(None, None, None, None));
        assert!(matches!(
            res,
            Err(TrialpowerErr::PowerQuery(PowerQueryErr::MultipleUnknowns(4)))
        ));
    }

    #[test]
    fn out_of_domain_fields() {
        let bad_queries = [
            query(Some(0.), Some(0.05), None, Some(0.25)),
            query(Some(-5.), Some(0.05), None, Some(0.25)),
            query(Some(1.), Some(0.05), None, Some(0.25)),
            query(Some(160.), Some(1.0), None, Some(0.25)),
            query(Some(160.), Some(0.), None, Some(0.25)),
            query(Some(160.), Some(0.05), Some(1.2), None),
            query(Some(160.), Some(0.05), None, Some(f64::NAN)),
        ];
        for q in bad_queries {
            match solve_power(&q) {
                Err(TrialpowerErr::PowerQuery(e)) => assert!(e.is_invalid_query()),
                other => panic!("expected invalid query for {q:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn smallest_valid_n() {
        // n = 1.5 leaves a single degree of freedom
        let solution = solve_power(&query(Some(1.5), Some(0.05), None, Some(0.25)))
            .expect("failed to solve for power");
        assert!(solution.power > 0.04 && solution.power < 0.1);
    }

    #[test]
    fn invalid_query_message() {
        if let Err(e) = solve_power(&query(Some(160.), Some(1.5), None, Some(0.25))) {
            assert_eq!(
                String::from(
                    "while solving power query: invalid query: significance_level is out of \
                    its valid domain; got 1.5"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }
}
