use serde::{Deserialize, Serialize};

/// The field of a power query left unknown, i.e. the one being solved for
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationTarget {
    #[default]
    SampleSize,
    Alpha,
    Power,
    EffectSize,
}
