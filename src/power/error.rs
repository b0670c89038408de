//----------------------------------------
// power errors
//----------------------------------------
use crate::computation_target::ComputationTarget;
use crate::error::TrialpowerErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowerQueryErr {
    #[error(
        "invalid query: no field left unknown; leave exactly one of n, significance_level, \
        power, effect_size unset"
    )]
    NoUnknown,
    #[error("invalid query: {0} fields left unknown; leave exactly one unset")]
    MultipleUnknowns(usize),
    #[error("invalid query: {field} is out of its valid domain; got {value}")]
    OutOfDomain { field: &'static str, value: f64 },
    #[error(
        "power {power} is unattainable when solving for {target:?} (largest achievable power \
        is {max_power})"
    )]
    Unattainable {
        target: ComputationTarget,
        power: f64,
        max_power: f64,
    },
}

impl PowerQueryErr {
    /// Whether the query itself was malformed, as opposed to well formed but
    /// without a solution
    pub fn is_invalid_query(&self) -> bool {
        !matches!(self, PowerQueryErr::Unattainable { .. })
    }
}

impl From<PowerQueryErr> for TrialpowerErr {
    fn from(e: PowerQueryErr) -> Self {
        TrialpowerErr::PowerQuery(e)
    }
}
