//! Pricing tier for subscription plans.

use serde::{Deserialize, Serialize};

/// Pricing tier determining which price and feature set applies.
///
/// Defaults to `Ultra` so the highest-value plan is the first thing a
/// visitor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Basic,
    #[default]
    Ultra,
}

impl Tier {
    /// Uppercase label as it appears in outbound support messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Ultra => "ULTRA",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(Self::Basic),
            "ULTRA" => Ok(Self::Ultra),
            _ => Err(format!("invalid tier: {s}")),
        }
    }
}
