use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Resource kinds a plan can cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LimitationType {
    Packages,
    Storage,
    Users,
    Companies,
    ApiCalls,
    Exports,
}

impl LimitationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitationType::Packages => "packages",
            LimitationType::Storage => "storage",
            LimitationType::Users => "users",
            LimitationType::Companies => "companies",
            LimitationType::ApiCalls => "api_calls",
            LimitationType::Exports => "exports",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "packages" => Some(LimitationType::Packages),
            "storage" => Some(LimitationType::Storage),
            "users" => Some(LimitationType::Users),
            "companies" => Some(LimitationType::Companies),
            "api_calls" => Some(LimitationType::ApiCalls),
            "exports" => Some(LimitationType::Exports),
            _ => None,
        }
    }
}

impl Display for LimitationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a counted limitation resets.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResetPeriod {
    Monthly,
    Yearly,
    #[default]
    None,
}

impl ResetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetPeriod::Monthly => "monthly",
            ResetPeriod::Yearly => "yearly",
            ResetPeriod::None => "none",
        }
    }
}

impl Display for ResetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
