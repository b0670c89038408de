//----------------------------------------
// Crate error type
//----------------------------------------
pub use crate::data::error::DataErr;
pub use crate::estimation::error::EstimationErr;
pub use crate::power::error::PowerQueryErr;
pub use crate::simulation::error::SimulationErr;
pub use crate::util::error::RootFindErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrialpowerErr {
    #[error("while solving power query: {0}")]
    PowerQuery(PowerQueryErr),
    #[error("while root finding: {0}")]
    RootFind(RootFindErr),
    #[error("while estimating treatment effect: {0}")]
    Estimation(EstimationErr),
    #[error("while preparing experiment data: {0}")]
    Data(DataErr),
    #[error("while running trial simulation: {0}")]
    Simulation(SimulationErr),
    /// Message of a statrs constructor error; each statrs distribution has
    /// its own error type
    #[error("while constructing distribution: {0}")]
    Distribution(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::StudentsT;

    #[test]
    fn distribution_message() {
        let res = StudentsT::new(0.0, 1.0, -1.0)
            .map_err(|e| TrialpowerErr::Distribution(e.to_string()));
        if let Err(e) = res {
            assert!(format!("{}", e).starts_with("while constructing distribution: "));
            assert!(matches!(e, TrialpowerErr::Distribution(msg) if !msg.is_empty()));
        } else {
            panic!()
        }
    }
}
