//----------------------------------------
// estimation mod
//----------------------------------------
pub mod effect;
pub mod error;
pub mod regression;
pub mod types;
