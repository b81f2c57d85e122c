//! The catalog entry record.

use serde::{Deserialize, Serialize};

use crate::model::{Category, Generation};

/// A single named statistic with its base value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u8,
}

impl Stat {
    /// Short label for the stat in `language`; unknown stats keep their name.
    #[must_use]
    pub fn label(&self, language: &str) -> &str {
        let ja = language == "ja";
        match self.name.as_str() {
            "hp" => "HP",
            "attack" if ja => "こうげき",
            "defense" if ja => "ぼうぎょ",
            "special-attack" if ja => "とくこう",
            "special-defense" if ja => "とくぼう",
            "speed" if ja => "すばやさ",
            "attack" => "Attack",
            "defense" => "Defense",
            "special-attack" => "Sp. Atk",
            "special-defense" => "Sp. Def",
            "speed" => "Speed",
            other => other,
        }
    }
}

/// A single ability, optionally a hidden one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub hidden: bool,
}

/// One stage of an evolution lineage, ancestor first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    pub display_name: String,
}

/// An entry in the registry.
///
/// Height and weight are fixed-point tenths (decimetres and hectograms),
/// exactly as the remote API reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub categories: Vec<Category>,
    pub height: u32,
    pub weight: u32,
    pub image_url: Option<String>,
    pub stats: Vec<Stat>,
    pub description: String,
    pub generation: Option<Generation>,
    #[serde(default)]
    pub evolution: Vec<EvolutionStage>,
    #[serde(default)]
    pub genus: String,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl Item {
    /// Creates an item with the given identity and categories; every other
    /// field starts empty. The display name defaults to the primary name.
    pub fn new(id: u32, name: impl Into<String>, categories: Vec<Category>) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            categories,
            height: 0,
            weight: 0,
            image_url: None,
            stats: Vec::new(),
            description: String::new(),
            generation: None,
            evolution: Vec::new(),
            genus: String::new(),
            abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(self, display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_measurements(self, height: u32, weight: u32) -> Self {
        Self {
            height,
            weight,
            ..self
        }
    }

    #[must_use]
    pub fn with_generation(self, generation: Generation) -> Self {
        Self {
            generation: Some(generation),
            ..self
        }
    }

    /// Zero-padded catalog number, e.g. `"025"`.
    #[must_use]
    pub fn number(&self) -> String {
        format!("{:03}", self.id)
    }

    /// Height in whole units (metres).
    #[must_use]
    pub fn height_units(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in whole units (kilograms).
    #[must_use]
    pub fn weight_units(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Sum of all base stats.
    #[must_use]
    pub fn stat_total(&self) -> u32 {
        self.stats.iter().map(|s| u32::from(s.value)).sum()
    }

    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_labels_are_localized() {
        let stat = Stat {
            name: "special-attack".into(),
            value: 65,
        };
        assert_eq!(stat.label("ja"), "とくこう");
        assert_eq!(stat.label("en"), "Sp. Atk");
        let odd = Stat {
            name: "accuracy".into(),
            value: 1,
        };
        assert_eq!(odd.label("ja"), "accuracy");
    }

    #[test]
    fn new_defaults_display_name_to_name() {
        let item = Item::new(25, "pikachu", vec![Category::Electric]);
        assert_eq!(item.display_name, "pikachu");
        assert!(item.stats.is_empty());
        assert!(item.generation.is_none());
    }

    #[test]
    fn number_is_zero_padded() {
        assert_eq!(Item::new(6, "charizard", vec![Category::Fire]).number(), "006");
        assert_eq!(Item::new(25, "pikachu", vec![Category::Electric]).number(), "025");
        assert_eq!(Item::new(1025, "pecharunt", vec![Category::Poison]).number(), "1025");
    }

    #[test]
    fn units_convert_from_tenths() {
        let item = Item::new(1, "bulbasaur", vec![Category::Grass]).with_measurements(7, 69);
        assert!((item.height_units() - 0.7).abs() < f64::EPSILON);
        assert!((item.weight_units() - 6.9).abs() < 1e-9);
    }

    #[test]
    fn stat_total_sums_values() {
        let mut item = Item::new(1, "bulbasaur", vec![Category::Grass]);
        item.stats = vec![
            Stat {
                name: "hp".into(),
                value: 45,
            },
            Stat {
                name: "attack".into(),
                value: 49,
            },
        ];
        assert_eq!(item.stat_total(), 94);
    }

    #[test]
    fn has_category_checks_membership() {
        let item = Item::new(1, "bulbasaur", vec![Category::Grass, Category::Poison]);
        assert!(item.has_category(Category::Poison));
        assert!(!item.has_category(Category::Fire));
    }
}
