//! Data model for catalog entries.
//!
//! [`Item`] is the normalized record produced by the remote data client.
//! [`Category`] and [`Generation`] are the two closed vocabularies items are
//! filtered by.

pub mod category;
pub mod generation;
pub mod item;

pub use category::Category;
pub use generation::Generation;
pub use item::{Ability, EvolutionStage, Item, Stat};
