//----------------------------------------
// data mod types
//----------------------------------------
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One subject of a pricing experiment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Price shown, in whole currency units; doubles as the treatment label
    pub price_level: u32,
    pub converted: bool,
    /// price_level when converted, zero otherwise
    pub revenue: f64,
}

impl Observation {
    pub fn new(price_level: u32, converted: bool) -> Self {
        let revenue = if converted { price_level as f64 } else { 0. };
        Self {
            price_level,
            converted,
            revenue,
        }
    }
}

/// Response the estimators read off each observation
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Revenue,
    Conversion,
}

impl Outcome {
    pub fn value(&self, observation: &Observation) -> f64 {
        match self {
            Outcome::Revenue => observation.revenue,
            Outcome::Conversion => {
                if observation.converted {
                    1.
                } else {
                    0.
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub price_level: u32,
    pub n: usize,
    pub mean: f64,
    /// Standard error of the mean; None with fewer than two observations
    pub std_error: Option<f64>,
}

/// One arm of a synthetic pricing experiment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmSpec {
    pub price_level: u32,
    pub n: usize,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSpec {
    pub arms: Vec<ArmSpec>,
    pub seed: u64,
}

impl Default for ExperimentSpec {
    fn default() -> Self {
        Self {
            arms: vec![
                ArmSpec {
                    price_level: 39,
                    n: 800,
                    conversion_rate: 0.2,
                },
                ArmSpec {
                    price_level: 99,
                    n: 800,
                    conversion_rate: 0.1,
                },
            ],
            seed: 24601,
        }
    }
}
