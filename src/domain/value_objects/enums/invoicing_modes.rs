use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoicingMode {
    #[default]
    Automatic,
    Manual,
}

impl InvoicingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoicingMode::Automatic => "automatic",
            InvoicingMode::Manual => "manual",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "automatic" => Some(InvoicingMode::Automatic),
            "manual" => Some(InvoicingMode::Manual),
            _ => None,
        }
    }
}

impl Display for InvoicingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
