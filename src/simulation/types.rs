//----------------------------------------
// simulation mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::data::types::Outcome;
use crate::estimation::error::EstimationErr;

/// Size of the sub-sample drawn from each arm per replicate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsampleSize {
    /// Same fraction of each arm, rounded to the nearest subject
    Fraction(f64),
    /// Same absolute number of subjects from each arm
    PerGroup(usize),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    #[default]
    WithoutReplacement,
    WithReplacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub seed: u64,
    pub treatment_level: u32,
    pub control_level: u32,
    pub subsample_size: SubsampleSize,
    pub replicates: usize,
    pub sampling_mode: SamplingMode,
    pub outcome: Outcome,
    /// A replicate rejects the null when |t| exceeds this
    pub critical_value: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: 24601,
            treatment_level: 99,
            control_level: 39,
            subsample_size: SubsampleSize::Fraction(0.2),
            replicates: 1000,
            sampling_mode: SamplingMode::WithoutReplacement,
            outcome: Outcome::Revenue,
            critical_value: 1.96,
        }
    }
}

/// Why a replicate's t statistic could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    InsufficientData,
    DegenerateVariance,
}

impl From<EstimationErr> for UndefinedReason {
    fn from(e: EstimationErr) -> Self {
        match e {
            EstimationErr::InsufficientData { .. } | EstimationErr::TooFewForRegression(_) => {
                UndefinedReason::InsufficientData
            }
            _ => UndefinedReason::DegenerateVariance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TStat {
    Value(f64),
    Undefined(UndefinedReason),
}

/// One simulated trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub replicate: usize,
    /// Difference in means; None only if a sub-sample came out empty
    pub estimate: Option<f64>,
    pub t_stat: TStat,
}

impl TrialResult {
    /// Whether the trial rejects the null; None if its t statistic is undefined
    pub fn rejects(&self, critical_value: f64) -> Option<bool> {
        match self.t_stat {
            TStat::Value(t) => Some(t.abs() > critical_value),
            TStat::Undefined(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Indexed by replicate number
    pub replicates: Vec<TrialResult>,
    /// Rejections over defined replicates; None if every replicate is undefined
    pub rejection_rate: Option<f64>,
    pub rejections: usize,
    pub undefined_count: usize,
    pub n_treatment: usize,
    pub n_control: usize,
}

/// Simulation outcome at one sampling fraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionSweepRow {
    pub fraction: f64,
    pub result: SimulationResult,
}
