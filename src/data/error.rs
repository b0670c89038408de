//----------------------------------------
// data errors
//----------------------------------------
use crate::error::TrialpowerErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataErr {
    #[error("no observations at price level {0}")]
    UnknownLevel(u32),
    #[error("treatment and control price levels must differ; both are {0}")]
    SameLevels(u32),
    #[error("conversion rate for price level {price_level} should be in [0, 1]; got {rate}")]
    BadConversionRate { price_level: u32, rate: f64 },
}

impl From<DataErr> for TrialpowerErr {
    fn from(e: DataErr) -> Self {
        TrialpowerErr::Data(e)
    }
}
