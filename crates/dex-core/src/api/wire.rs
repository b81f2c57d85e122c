//! Raw response documents of the remote API.
//!
//! Only the fields the catalog uses are modelled; everything else in the
//! payloads is ignored by `serde`.

use serde::{Deserialize, Serialize};

/// One row of the collection listing: a name and the URL of its core document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    #[serde(rename = "url")]
    pub detail_url: String,
}

impl IndexEntry {
    /// The identifier encoded as the last path segment of the detail URL.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        id_from_url(&self.detail_url)
    }
}

/// Extracts the trailing numeric path segment (`…/pokemon/25/` → `25`).
#[must_use]
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndexPage {
    #[serde(default)]
    pub results: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NamedRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UrlRef {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AbilitySlot {
    pub ability: NamedRef,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

impl Sprites {
    /// Official artwork when present, the plain front sprite otherwise.
    pub fn best(&self) -> Option<String> {
        self.other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.clone())
            .or_else(|| self.front_default.clone())
    }
}

/// The core attributes document (`/pokemon/{id}`).
#[derive(Debug, Deserialize)]
pub(crate) struct CoreDoc {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalizedName {
    pub name: String,
    pub language: NamedRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlavorText {
    pub flavor_text: String,
    pub language: NamedRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Genus {
    pub genus: String,
    pub language: NamedRef,
}

/// The species document (`/pokemon-species/{id}`).
#[derive(Debug, Deserialize)]
pub(crate) struct SpeciesDoc {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub evolution_chain: Option<UrlRef>,
    #[serde(default)]
    pub generation: Option<NamedRef>,
    #[serde(default)]
    pub genera: Vec<Genus>,
}

impl SpeciesDoc {
    pub fn localized_name(&self, language: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.language.name == language)
            .map(|n| n.name.as_str())
    }

    /// The first flavor text in `language`, cleaned.
    pub fn first_flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|e| e.language.name == language)
            .map(|e| clean_flavor_text(&e.flavor_text))
    }

    /// Every flavor text in `language`, cleaned, joined by a space.
    /// Consecutive repeats (the same text reused across games) are dropped.
    pub fn joined_flavor_text(&self, language: &str) -> String {
        let mut texts: Vec<String> = self
            .flavor_text_entries
            .iter()
            .filter(|e| e.language.name == language)
            .map(|e| clean_flavor_text(&e.flavor_text))
            .collect();
        texts.dedup();
        texts.join(" ")
    }

    pub fn genus(&self, language: &str) -> Option<&str> {
        self.genera
            .iter()
            .find(|g| g.language.name == language)
            .map(|g| g.genus.as_str())
    }
}

/// One node of the evolution-chain tree.
#[derive(Debug, Deserialize)]
pub(crate) struct ChainLink {
    pub species: NamedRef,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// The evolution-chain document.
#[derive(Debug, Deserialize)]
pub(crate) struct ChainDoc {
    pub chain: ChainLink,
}

/// Flavor texts are hard-wrapped for the game screens. A line or page break
/// between two ASCII characters becomes a single space; any other break is
/// dropped, since Japanese text is not separated by spaces.
pub(crate) fn clean_flavor_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for part in raw
        .split(|c: char| c == '\n' || c == '\u{000c}' || c == '\r')
        .map(str::trim)
        .filter(|part| !part.is_empty())
    {
        let ascii_boundary = out.chars().next_back().is_some_and(|c| c.is_ascii())
            && part.starts_with(|c: char| c.is_ascii());
        if ascii_boundary {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_url_reads_trailing_segment() {
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/25/"), Some(25));
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/25"), Some(25));
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/"), None);
        assert_eq!(id_from_url(""), None);
    }

    #[test]
    fn index_entry_deserializes_url_field() {
        let entry: IndexEntry = serde_json::from_str(
            r#"{"name":"bulbasaur","url":"https://pokeapi.co/api/v2/pokemon/1/"}"#,
        )
        .unwrap();
        assert_eq!(entry.name, "bulbasaur");
        assert_eq!(entry.id(), Some(1));
    }

    #[test]
    fn sprites_prefer_official_artwork() {
        let sprites: Sprites = serde_json::from_str(
            r#"{"front_default":"front.png","other":{"official-artwork":{"front_default":"art.png"}}}"#,
        )
        .unwrap();
        assert_eq!(sprites.best().as_deref(), Some("art.png"));

        let plain: Sprites = serde_json::from_str(r#"{"front_default":"front.png"}"#).unwrap();
        assert_eq!(plain.best().as_deref(), Some("front.png"));
    }

    #[test]
    fn clean_flavor_text_joins_lines() {
        assert_eq!(
            clean_flavor_text("A strange seed was\nplanted on its\u{000c}back at birth."),
            "A strange seed was planted on its back at birth."
        );
    }

    #[test]
    fn clean_flavor_text_joins_japanese_without_spaces() {
        assert_eq!(
            clean_flavor_text("うまれたときから　せなかに\nふしぎな　タネが\u{000c}うえてあって"),
            "うまれたときから　せなかにふしぎな　タネがうえてあって"
        );
        assert_eq!(clean_flavor_text("ポケモン\nHP"), "ポケモンHP");
        assert_eq!(clean_flavor_text("\n\n"), "");
    }

    #[test]
    fn species_localization_helpers() {
        let species: SpeciesDoc = serde_json::from_str(
            r#"{
                "names":[{"name":"Pikachu","language":{"name":"en","url":""}},
                         {"name":"ピカチュウ","language":{"name":"ja","url":""}}],
                "flavor_text_entries":[
                    {"flavor_text":"first","language":{"name":"ja","url":""}},
                    {"flavor_text":"first","language":{"name":"ja","url":""}},
                    {"flavor_text":"english","language":{"name":"en","url":""}},
                    {"flavor_text":"second","language":{"name":"ja","url":""}}],
                "genera":[{"genus":"ねずみポケモン","language":{"name":"ja","url":""}}]
            }"#,
        )
        .unwrap();

        assert_eq!(species.localized_name("ja"), Some("ピカチュウ"));
        assert_eq!(species.localized_name("fr"), None);
        assert_eq!(species.first_flavor_text("ja").as_deref(), Some("first"));
        assert_eq!(species.joined_flavor_text("ja"), "first second");
        assert_eq!(species.genus("ja"), Some("ねずみポケモン"));
        assert!(species.evolution_chain.is_none());
    }
}
