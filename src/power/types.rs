//----------------------------------------
// power mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::computation_target::ComputationTarget;
use crate::hypothesis_type::HypothesisType;

/// Two-sample t-test design with equal group sizes and unit pooled standard
/// deviation. Exactly one of the four quantities is left as `None` and gets
/// solved for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerQuery {
    /// Sample size per group
    pub n: Option<f64>,
    pub significance_level: Option<f64>,
    pub power: Option<f64>,
    /// Standardized effect size (difference in means over pooled SD)
    pub effect_size: Option<f64>,
    #[serde(default)]
    pub alternative: HypothesisType,
}

/// A fully populated power query, with `target` naming the solved field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSolution {
    pub target: ComputationTarget,
    pub n: f64,
    pub significance_level: f64,
    pub power: f64,
    pub effect_size: f64,
    pub alternative: HypothesisType,
    /// Power evaluated at the solution; at least `power` when solving for
    /// anything other than power itself
    pub achieved_power: f64,
}

impl PowerSolution {
    /// Value of the solved field
    pub fn value(&self) -> f64 {
        match self.target {
            ComputationTarget::SampleSize => self.n,
            ComputationTarget::Alpha => self.significance_level,
            ComputationTarget::Power => self.power,
            ComputationTarget::EffectSize => self.effect_size,
        }
    }

    /// Per-group sample size rounded up to a whole number of subjects
    pub fn required_n(&self) -> u64 {
        self.n.ceil() as u64
    }
}

/// One point of a power curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerPoint {
    pub n: f64,
    pub power: f64,
}
