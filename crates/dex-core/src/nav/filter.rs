//! Filtering and free-text search over catalog items.
//!
//! Both [`apply_filters`] and [`apply_search`] are pure predicates over the
//! input: they keep input order, never rank, and can be composed in either
//! order with the same result.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::model::{Category, Generation, Item};

/// An inclusive range over a measurement in tenths of a unit.
///
/// Bounds are entered in whole units (metres, kilograms) and stored as
/// `round(bound × 10)` so comparisons against [`Item::height`] and
/// [`Item::weight`] are exact integer comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasureRange {
    pub min_tenths: Option<u32>,
    pub max_tenths: Option<u32>,
}

fn to_tenths(bound: f64) -> u32 {
    // `as` saturates: negative input becomes 0, NaN becomes 0.
    (bound * 10.0).round() as u32
}

impl MeasureRange {
    /// Builds a range from bounds in whole units.
    #[must_use]
    pub fn from_units(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min_tenths: min.map(to_tenths),
            max_tenths: max.map(to_tenths),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_tenths.is_none() && self.max_tenths.is_none()
    }

    /// Whether `tenths` satisfies both bounds.
    #[must_use]
    pub fn contains(&self, tenths: u32) -> bool {
        self.min_tenths.map_or(true, |min| tenths >= min)
            && self.max_tenths.map_or(true, |max| tenths <= max)
    }
}

impl fmt::Display for MeasureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = |t: u32| f64::from(t) / 10.0;
        match (self.min_tenths, self.max_tenths) {
            (Some(min), Some(max)) => write!(f, "{:.1}..{:.1}", units(min), units(max)),
            (Some(min), None) => write!(f, ">= {:.1}", units(min)),
            (None, Some(max)) => write!(f, "<= {:.1}", units(max)),
            (None, None) => write!(f, "any"),
        }
    }
}

/// One active filter condition, as shown in the tag row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTag {
    Category(Category),
    Generation(Generation),
    Height,
    Weight,
}

/// Current filter selection. The default value filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConditions {
    /// Any-of selection. Empty means unconstrained.
    pub categories: Vec<Category>,
    /// Any-of selection. Empty means unconstrained.
    pub generations: Vec<Generation>,
    pub height: MeasureRange,
    pub weight: MeasureRange,
}

impl FilterConditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories(self, categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            ..self
        }
    }

    #[must_use]
    pub fn with_generations(self, generations: impl IntoIterator<Item = Generation>) -> Self {
        Self {
            generations: generations.into_iter().collect(),
            ..self
        }
    }

    #[must_use]
    pub fn with_height(self, height: MeasureRange) -> Self {
        Self { height, ..self }
    }

    #[must_use]
    pub fn with_weight(self, weight: MeasureRange) -> Self {
        Self { weight, ..self }
    }

    /// Adds the category if absent, removes it otherwise.
    #[must_use]
    pub fn toggle_category(self, category: Category) -> Self {
        let mut categories = self.categories.clone();
        match categories.iter().position(|c| *c == category) {
            Some(pos) => {
                categories.remove(pos);
            }
            None => categories.push(category),
        }
        Self { categories, ..self }
    }

    #[must_use]
    pub fn toggle_generation(self, generation: Generation) -> Self {
        let mut generations = self.generations.clone();
        match generations.iter().position(|g| *g == generation) {
            Some(pos) => {
                generations.remove(pos);
            }
            None => generations.push(generation),
        }
        Self {
            generations,
            ..self
        }
    }

    /// Drops a single active condition.
    #[must_use]
    pub fn without_tag(self, tag: FilterTag) -> Self {
        match tag {
            FilterTag::Category(c) => Self {
                categories: self.categories.iter().copied().filter(|x| *x != c).collect(),
                ..self
            },
            FilterTag::Generation(g) => Self {
                generations: self.generations.iter().copied().filter(|x| *x != g).collect(),
                ..self
            },
            FilterTag::Height => Self {
                height: MeasureRange::default(),
                ..self
            },
            FilterTag::Weight => Self {
                weight: MeasureRange::default(),
                ..self
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.generations.is_empty()
            && self.height.is_empty()
            && self.weight.is_empty()
    }

    /// Active conditions in display order: categories, generations, height, weight.
    #[must_use]
    pub fn tags(&self) -> Vec<FilterTag> {
        let mut tags: Vec<FilterTag> = self
            .categories
            .iter()
            .copied()
            .map(FilterTag::Category)
            .collect();
        tags.extend(self.generations.iter().copied().map(FilterTag::Generation));
        if !self.height.is_empty() {
            tags.push(FilterTag::Height);
        }
        if !self.weight.is_empty() {
            tags.push(FilterTag::Weight);
        }
        tags
    }

    /// Human-readable label of a tag.
    #[must_use]
    pub fn describe(&self, tag: FilterTag, language: &str) -> String {
        match tag {
            FilterTag::Category(c) => c.label_for(language).to_owned(),
            FilterTag::Generation(g) => format!("Gen {}", g.roman()),
            FilterTag::Height => format!("Height {} m", self.height),
            FilterTag::Weight => format!("Weight {} kg", self.weight),
        }
    }

    /// Whether a single item satisfies every active condition.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        let category_ok = self.categories.is_empty()
            || item.categories.iter().any(|c| self.categories.contains(c));
        let generation_ok = self.generations.is_empty()
            || item
                .generation
                .is_some_and(|g| self.generations.contains(&g));

        category_ok
            && generation_ok
            && self.height.contains(item.height)
            && self.weight.contains(item.weight)
    }
}

/// Keeps the items satisfying `conditions`, in input order.
pub fn apply_filters<'a, I>(items: I, conditions: &FilterConditions) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().filter(|i| conditions.matches(i)).collect()
}

fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Whether `item` matches an already folded, non-empty query.
fn search_matches(item: &Item, folded: &str) -> bool {
    fold(&item.display_name).contains(folded)
        || fold(&item.name).contains(folded)
        || item.id.to_string().contains(folded)
        || item.number().contains(folded)
}

/// Keeps the items whose localized name, primary name, decimal id or
/// zero-padded id contains `query`, case-insensitively. A blank query keeps
/// everything.
pub fn apply_search<'a, I>(items: I, query: &str) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let query = query.trim();
    if query.is_empty() {
        return items.into_iter().collect();
    }
    let folded = fold(query);
    items
        .into_iter()
        .filter(|i| search_matches(i, &folded))
        .collect()
}
