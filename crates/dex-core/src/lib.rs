//! dex core library: UI-agnostic catalog browser logic.
//!
//! `dex-core` fetches a creature registry from a remote API, keeps a local
//! favorites list and computes what each screen shows. It has no terminal
//! code beyond theme colors, so other frontends can reuse it.
//!
//! # Modules
//!
//! - [`model`]: [`Item`] and the [`Category`]/[`Generation`] vocabularies.
//! - [`api`]: remote data client ([`CatalogClient`]) over a [`Transport`] seam.
//! - [`catalog`]: progressive loading and the in-memory [`Catalog`].
//! - [`nav`]: filtering, search, pagination, favorites and history.
//! - [`view`]: per-screen state (list, favorites, detail, routes).
//! - [`config`]: TOML settings, keymap and theme.
//! - [`action`]: user-triggerable actions and their metadata.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod nav;
pub mod view;

pub use error::{CoreError, CoreResult};

pub use api::{CatalogClient, HttpTransport, IndexEntry, Transport};
pub use catalog::{load_catalog, Catalog, LoadEvent, LoadStatus};
pub use model::{Ability, Category, EvolutionStage, Generation, Item, Stat};
pub use nav::favorites::FavoritesStore;
pub use nav::filter::{apply_filters, apply_search, FilterConditions, FilterTag, MeasureRange};
pub use nav::history::History;
pub use nav::pagination::{paginate, total_pages, Pager};
pub use view::{BrowseState, DetailState, DetailView, ListQuery, PageView, ReturnState, Screen};

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
