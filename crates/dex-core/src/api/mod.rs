//! Remote data client for the catalog API.
//!
//! - [`wire`]: the raw JSON documents.
//! - [`transport`]: the async GET seam and its `reqwest` implementation.
//! - [`evolution`]: flattening of evolution-chain trees.
//! - [`client`]: [`CatalogClient`], which joins documents into items.

pub mod client;
pub mod evolution;
pub mod transport;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use client::CatalogClient;
pub use evolution::ChainNode;
pub use transport::{HttpTransport, Transport};
pub use wire::{id_from_url, IndexEntry};
