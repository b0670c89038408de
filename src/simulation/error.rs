//----------------------------------------
// simulation errors
//----------------------------------------
use crate::error::TrialpowerErr;
use crate::estimation::types::Arm;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationErr {
    #[error("number of replicates must be at least 1")]
    ZeroReplicates,
    #[error("sampling fraction should be positive, and at most 1 without replacement; got {0}")]
    BadFraction(f64),
    #[error(
        "cannot draw {requested} of {available} {arm} observations without replacement"
    )]
    SubsampleTooLarge {
        arm: Arm,
        requested: usize,
        available: usize,
    },
    #[error("sub-sample of the {arm} arm would be empty")]
    EmptySubsample { arm: Arm },
    #[error("cannot draw {requested} {arm} observations per replicate; at most {cap} are allowed")]
    SubsampleOverCap {
        arm: Arm,
        requested: f64,
        cap: usize,
    },
    #[error("critical value should be positive and finite; got {0}")]
    BadCriticalValue(f64),
}

impl From<SimulationErr> for TrialpowerErr {
    fn from(e: SimulationErr) -> Self {
        TrialpowerErr::Simulation(e)
    }
}
