//----------------------------------------
// power mod
//----------------------------------------
pub mod error;
pub mod noncentral_t;
pub mod solve_power;
pub mod ttest_power;
pub mod types;
