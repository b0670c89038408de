//----------------------------------------
// data mod
//----------------------------------------
pub mod error;
pub mod summary;
pub mod synthetic;
pub mod types;
