//----------------------------------------
// simulation mod
//----------------------------------------
pub mod error;
pub mod predict;
pub mod run_sim;
pub mod types;
