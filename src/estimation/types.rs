//----------------------------------------
// estimation mod types
//----------------------------------------
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arm {
    Treatment,
    Control,
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::Treatment => write!(f, "treatment"),
            Arm::Control => write!(f, "control"),
        }
    }
}

/// Difference in means with its unequal-variance standard error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectEstimate {
    pub estimate: f64,
    pub std_error: f64,
    pub t_stat: f64,
    pub n_treatment: usize,
    pub n_control: usize,
}

/// Ordinary least squares fit of y = intercept + slope * x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    pub intercept: f64,
    pub slope: f64,
    /// Classical (homoskedastic) standard error of the slope
    pub slope_std_error: f64,
    pub t_stat: f64,
    /// Two-sided p-value of the slope against t with `residual_df` df
    pub p_value: f64,
    pub residual_df: usize,
    pub n: usize,
}
