use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The test-result selector. Exactly one variant is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TernaryChoice {
    #[default]
    Unknown,
    Positive,
    Negative,
}

impl TernaryChoice {
    pub const ALL: [TernaryChoice; 3] = [Self::Unknown, Self::Positive, Self::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for TernaryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TernaryChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            other => bail!("unknown test result '{}': expected unknown|positive|negative", other),
        }
    }
}
