//----------------------------------------
// compute mod
//----------------------------------------
pub use crate::computation_target::ComputationTarget;
pub use crate::data::summary::{split_arms, summarize_groups};
pub use crate::data::synthetic::simulate_pricing_experiment;
pub use crate::data::types::{ArmSpec, ExperimentSpec, GroupSummary, Observation, Outcome};
pub use crate::estimation::effect::{compute_effect, difference_in_means, standardized_effect};
pub use crate::estimation::regression::{ols_simple, regress_on_treatment};
pub use crate::estimation::types::{Arm, EffectEstimate, RegressionFit};
pub use crate::hypothesis_type::HypothesisType;
pub use crate::power::solve_power::solve_power;
pub use crate::power::noncentral_t::noncentral_t_cdf;
pub use crate::power::ttest_power::{critical_value, power_curve, ttest_power};
pub use crate::power::types::{PowerPoint, PowerQuery, PowerSolution};
pub use crate::simulation::predict::predicted_rejection_rate;
pub use crate::simulation::run_sim::{run_trial_sims, sweep_fractions};
pub use crate::simulation::types::{
    FractionSweepRow, SamplingMode, SimulationResult, SimulationSettings, SubsampleSize, TStat,
    TrialResult, UndefinedReason,
};
