//----------------------------------------
// Root lib
//----------------------------------------
//! Power analysis for two-arm randomized experiments. Provides a closed-form
//! power / sample size calculator for the two-sample t-test, a seeded Monte
//! Carlo simulator that re-runs an experiment on sub-samples of observed
//! data, and the descriptive statistics and effect estimators both rely on.
//! The worked example throughout is a pricing experiment: subjects see one
//! of two prices and either convert or not.

/// This module houses the public API for solving power queries, estimating
/// effects, and simulating trials
pub mod compute;
mod computation_target;
mod data;
/// This module contains error types
pub mod error;
mod estimation;
mod hypothesis_type;
pub mod logging;
mod power;
mod simulation;
mod util;
