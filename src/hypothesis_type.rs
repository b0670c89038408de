use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, ValueEnum)]
pub enum HypothesisType {
    #[default]
    #[serde(rename = "two-sided")]
    #[value(name = "two-sided")]
    NotEqual,
    #[serde(rename = "greater")]
    #[value(name = "greater")]
    TrtGreater,
    #[serde(rename = "less")]
    #[value(name = "less")]
    TrtLess,
}
