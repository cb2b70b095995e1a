use serde::{Deserialize, Serialize};
use trainlog_domain::{Language, WeightUnit};

/// Process-wide user preferences. The weight unit only affects
/// display; stored canonical values are never rewritten when it
/// changes.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub weight_unit: WeightUnit,
    pub language: Language,
}
