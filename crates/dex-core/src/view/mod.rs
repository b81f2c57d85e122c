//! View-state coordinators.
//!
//! These types hold what a screen shows, independent of how it is drawn:
//! [`browse`] for the list and favorites screens, [`detail`] for a single
//! item and [`route`] for moving between them.

pub mod browse;
pub mod detail;
pub mod route;

pub use browse::{favorite_items, missing_favorites, BrowseState, PageView};
pub use detail::{neighbor_ids, DetailState, DetailView};
pub use route::{ListQuery, ReturnState, Screen};
