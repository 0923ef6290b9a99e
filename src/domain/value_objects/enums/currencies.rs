use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Supported billing currencies. Adding one is a schema change, not runtime
/// configuration.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Currency {
    #[default]
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "FCFA")]
    Fcfa,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Fcfa => "FCFA",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            "FCFA" => Some(Currency::Fcfa),
            _ => None,
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
