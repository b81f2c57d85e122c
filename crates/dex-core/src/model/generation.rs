//! Generation (release cohort) labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the nine release cohorts an item belongs to.
///
/// Serialized with the remote API's wire names (`"generation-i"` …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Generation {
    #[serde(rename = "generation-i")]
    I,
    #[serde(rename = "generation-ii")]
    II,
    #[serde(rename = "generation-iii")]
    III,
    #[serde(rename = "generation-iv")]
    IV,
    #[serde(rename = "generation-v")]
    V,
    #[serde(rename = "generation-vi")]
    VI,
    #[serde(rename = "generation-vii")]
    VII,
    #[serde(rename = "generation-viii")]
    VIII,
    #[serde(rename = "generation-ix")]
    IX,
}

impl Generation {
    /// Every generation in release order.
    pub const ALL: [Generation; 9] = [
        Self::I,
        Self::II,
        Self::III,
        Self::IV,
        Self::V,
        Self::VI,
        Self::VII,
        Self::VIII,
        Self::IX,
    ];

    /// The wire name used by the remote API.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::I => "generation-i",
            Self::II => "generation-ii",
            Self::III => "generation-iii",
            Self::IV => "generation-iv",
            Self::V => "generation-v",
            Self::VI => "generation-vi",
            Self::VII => "generation-vii",
            Self::VIII => "generation-viii",
            Self::IX => "generation-ix",
        }
    }

    /// Roman numeral of the cohort (`"III"`).
    #[must_use]
    pub fn roman(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
            Self::VII => "VII",
            Self::VIII => "VIII",
            Self::IX => "IX",
        }
    }

    /// 1-based ordinal (`I` → 1).
    #[must_use]
    pub fn number(self) -> u8 {
        Self::ALL
            .iter()
            .position(|g| *g == self)
            .map_or(0, |i| i as u8 + 1)
    }

    /// Titles released in this cohort.
    #[must_use]
    pub fn games(self) -> &'static [&'static str] {
        match self {
            Self::I => &["Red", "Green", "Blue", "Yellow"],
            Self::II => &["Gold", "Silver", "Crystal"],
            Self::III => &["Ruby", "Sapphire", "Emerald", "FireRed", "LeafGreen"],
            Self::IV => &["Diamond", "Pearl", "Platinum", "HeartGold", "SoulSilver"],
            Self::V => &["Black", "White", "Black 2", "White 2"],
            Self::VI => &["X", "Y", "Omega Ruby", "Alpha Sapphire"],
            Self::VII => &["Sun", "Moon", "Ultra Sun", "Ultra Moon"],
            Self::VIII => &[
                "Sword",
                "Shield",
                "Brilliant Diamond",
                "Shining Pearl",
                "Legends: Arceus",
            ],
            Self::IX => &["Scarlet", "Violet"],
        }
    }

    /// Display label such as `"Gen III: Ruby / Sapphire / Emerald"`.
    ///
    /// Only the first three titles are listed to keep the label short.
    #[must_use]
    pub fn label(self) -> String {
        let titles: Vec<&str> = self.games().iter().take(3).copied().collect();
        format!("Gen {}: {}", self.roman(), titles.join(" / "))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Generation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.code() == lower)
            .ok_or_else(|| format!("unknown generation: {s}"))
    }
}
