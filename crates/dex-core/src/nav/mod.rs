//! Browsing logic for the catalog.
//!
//! [`filter`] narrows the collection, [`pagination`] slices it,
//! [`favorites`] persists the user's picks and [`history`] remembers where to
//! go back to.

pub mod favorites;
pub mod filter;
pub mod history;
pub mod pagination;
