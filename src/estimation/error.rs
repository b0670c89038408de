//----------------------------------------
// estimation errors
//----------------------------------------
use crate::error::TrialpowerErr;
use crate::estimation::types::Arm;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EstimationErr {
    #[error("{arm} arm has {n} observations; at least 2 are needed")]
    InsufficientData { arm: Arm, n: usize },
    #[error("{arm} arm has zero variance")]
    DegenerateVariance { arm: Arm },
    #[error("residual variance is zero")]
    DegenerateResidualVariance,
    #[error("regression needs at least 3 observations; got {0}")]
    TooFewForRegression(usize),
    #[error("x and y lengths don't match (x length {x_length}, y length {y_length})")]
    LengthMismatch { x_length: usize, y_length: usize },
    #[error("regressor has no variation")]
    ConstantRegressor,
}

impl From<EstimationErr> for TrialpowerErr {
    fn from(e: EstimationErr) -> Self {
        TrialpowerErr::Estimation(e)
    }
}
