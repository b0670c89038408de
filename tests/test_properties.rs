//! Property-based tests for the power calculator and trial simulator.

use proptest::prelude::*;

use trialpower::compute::*;
use trialpower::error::{PowerQueryErr, TrialpowerErr};

fn alpha_strategy() -> impl Strategy<Value = f64> {
    0.005..0.2f64
}

fn n_strategy() -> impl Strategy<Value = f64> {
    3.0..2000.0f64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Two-sided power grows with |effect size|
    #[test]
    fn power_monotone_in_effect(
        a in 0.0..2.0f64,
        b in 0.0..2.0f64,
        n in n_strategy(),
        alpha in alpha_strategy(),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let p_small = ttest_power(small, n, alpha, HypothesisType::NotEqual).unwrap();
        let p_large = ttest_power(large, n, alpha, HypothesisType::NotEqual).unwrap();
        prop_assert!(p_small <= p_large + 1e-9, "power({small})={p_small} > power({large})={p_large}");
    }

    // 2. Two-sided power depends only on |effect size|
    #[test]
    fn two_sided_power_symmetric(d in 0.0..2.0f64, n in n_strategy(), alpha in alpha_strategy()) {
        let p_pos = ttest_power(d, n, alpha, HypothesisType::NotEqual).unwrap();
        let p_neg = ttest_power(-d, n, alpha, HypothesisType::NotEqual).unwrap();
        prop_assert!((p_pos - p_neg).abs() < 1e-9);
    }

    // 3. No effect means rejecting at the significance level
    #[test]
    fn null_power_is_alpha(n in n_strategy(), alpha in alpha_strategy()) {
        let power = ttest_power(0., n, alpha, HypothesisType::NotEqual).unwrap();
        prop_assert!((power - alpha).abs() < 1e-4, "power={power} alpha={alpha}");
    }

    // 4. Rounding a solved sample size up reaches the target power
    #[test]
    fn solved_n_reaches_target(
        d in 0.1..1.5f64,
        target in 0.5..0.95f64,
        alpha in alpha_strategy(),
    ) {
        let solution = solve_power(&PowerQuery {
            effect_size: Some(d),
            significance_level: Some(alpha),
            power: Some(target),
            ..Default::default()
        })
        .unwrap();
        let power = ttest_power(d, solution.required_n() as f64, alpha, HypothesisType::NotEqual)
            .unwrap();
        prop_assert!(power >= target - 1e-9, "n={} power={power} target={target}", solution.n);
    }

    // 5. Solving for effect size recovers the effect size a power came from
    #[test]
    fn effect_size_round_trip(d in 0.2..1.5f64, n in 10.0..500.0f64, alpha in alpha_strategy()) {
        let power = ttest_power(d, n, alpha, HypothesisType::NotEqual).unwrap();
        prop_assume!(power < 0.999);
        let solution = solve_power(&PowerQuery {
            n: Some(n),
            significance_level: Some(alpha),
            power: Some(power),
            ..Default::default()
        })
        .unwrap();
        prop_assert!((solution.effect_size - d).abs() < 1e-3, "{} vs {d}", solution.effect_size);
    }

    // 6. Queries with two or more unknowns are rejected
    #[test]
    fn too_many_unknowns(mask in 0u8..16) {
        let unknowns = 4 - mask.count_ones() as usize;
        prop_assume!(unknowns >= 2);
        let query = PowerQuery {
            n: (mask & 1 != 0).then_some(100.),
            significance_level: (mask & 2 != 0).then_some(0.05),
            power: (mask & 4 != 0).then_some(0.8),
            effect_size: (mask & 8 != 0).then_some(0.3),
            ..Default::default()
        };
        let res = solve_power(&query);
        prop_assert!(matches!(
            res,
            Err(TrialpowerErr::PowerQuery(PowerQueryErr::MultipleUnknowns(k))) if k == unknowns
        ));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    // 7. Simulations are reproducible from their seed
    #[test]
    fn simulation_reproducible(seed in any::<u64>(), fraction in 0.05..0.5f64) {
        let observations = simulate_pricing_experiment(
            &[
                ArmSpec { price_level: 39, n: 200, conversion_rate: 0.3 },
                ArmSpec { price_level: 99, n: 200, conversion_rate: 0.2 },
            ],
            seed,
        )
        .unwrap();
        let settings = SimulationSettings {
            seed,
            replicates: 40,
            subsample_size: SubsampleSize::Fraction(fraction),
            ..Default::default()
        };
        let first = run_trial_sims(&observations, &settings).unwrap();
        let second = run_trial_sims(&observations, &settings).unwrap();
        prop_assert_eq!(first, second);
    }
}
