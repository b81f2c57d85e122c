//! Category tags (elemental types).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed set of classification labels attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// The wire code used by the remote API (e.g. `"fire"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    /// Human-readable English label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Electric => "Electric",
            Self::Grass => "Grass",
            Self::Ice => "Ice",
            Self::Fighting => "Fighting",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Flying => "Flying",
            Self::Psychic => "Psychic",
            Self::Bug => "Bug",
            Self::Rock => "Rock",
            Self::Ghost => "Ghost",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Steel => "Steel",
            Self::Fairy => "Fairy",
        }
    }

    /// Japanese label, used when the display language is `ja`.
    #[must_use]
    pub fn label_ja(self) -> &'static str {
        match self {
            Self::Normal => "ノーマル",
            Self::Fire => "ほのお",
            Self::Water => "みず",
            Self::Electric => "でんき",
            Self::Grass => "くさ",
            Self::Ice => "こおり",
            Self::Fighting => "かくとう",
            Self::Poison => "どく",
            Self::Ground => "じめん",
            Self::Flying => "ひこう",
            Self::Psychic => "エスパー",
            Self::Bug => "むし",
            Self::Rock => "いわ",
            Self::Ghost => "ゴースト",
            Self::Dragon => "ドラゴン",
            Self::Dark => "あく",
            Self::Steel => "はがね",
            Self::Fairy => "フェアリー",
        }
    }

    /// Label in the given language, English for anything but Japanese.
    #[must_use]
    pub fn label_for(self, language: &str) -> &'static str {
        if language.starts_with("ja") {
            self.label_ja()
        } else {
            self.label()
        }
    }

    /// Default badge color as `#rrggbb`.
    #[must_use]
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Normal => "#a8a878",
            Self::Fire => "#f08030",
            Self::Water => "#6890f0",
            Self::Electric => "#f8d030",
            Self::Grass => "#78c850",
            Self::Ice => "#98d8d8",
            Self::Fighting => "#c03028",
            Self::Poison => "#a040a0",
            Self::Ground => "#e0c068",
            Self::Flying => "#a890f0",
            Self::Psychic => "#f85888",
            Self::Bug => "#a8b820",
            Self::Rock => "#b8a038",
            Self::Ghost => "#705898",
            Self::Dragon => "#7038f8",
            Self::Dark => "#705848",
            Self::Steel => "#b8b8d0",
            Self::Fairy => "#ee99ac",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == lower)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}
