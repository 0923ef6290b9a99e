use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    #[default]
    Core,
    Advanced,
    Premium,
    Enterprise,
}

impl FeatureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureCategory::Core => "core",
            FeatureCategory::Advanced => "advanced",
            FeatureCategory::Premium => "premium",
            FeatureCategory::Enterprise => "enterprise",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "core" => Some(FeatureCategory::Core),
            "advanced" => Some(FeatureCategory::Advanced),
            "premium" => Some(FeatureCategory::Premium),
            "enterprise" => Some(FeatureCategory::Enterprise),
            _ => None,
        }
    }
}

impl Display for FeatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
