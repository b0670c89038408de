//----------------------------------------
// root finding errors
//----------------------------------------
use crate::error::TrialpowerErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RootFindErr {
    #[error("search interval is empty or not finite (lower {lower}, upper {upper})")]
    BadBracket { lower: f64, upper: f64 },
    #[error("target {target} not reached before upper search limit {upper} (f = {f_upper})")]
    NoBracket { target: f64, upper: f64, f_upper: f64 },
    #[error("failed to converge after {0} iterations")]
    FailedToConverge(usize),
    #[error("function evaluated to NaN at {0}")]
    NanEvaluation(f64),
}

impl From<RootFindErr> for TrialpowerErr {
    fn from(e: RootFindErr) -> Self {
        TrialpowerErr::RootFind(e)
    }
}
