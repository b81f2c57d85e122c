//! Background fetch tasks.
//!
//! Each task runs on the tokio runtime and reports back to the main event
//! loop through an unbounded mpsc channel. A closed channel means the UI is
//! gone; sends are allowed to fail silently.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use dex_core::{load_catalog, CatalogClient, Item, LoadEvent, Transport};

/// Results of one-off fetches started by the UI.
#[derive(Debug)]
pub enum FetchMessage {
    Detail { id: u32, result: Result<Item, String> },
    Items(Result<Vec<Item>, String>),
}

/// Spawns the incremental catalog loader.
pub fn spawn_catalog_loader<T: Transport + 'static>(
    client: Arc<CatalogClient<T>>,
    batch_size: usize,
    tx: UnboundedSender<LoadEvent>,
) {
    tokio::spawn(async move {
        load_catalog(&*client, batch_size, &tx).await;
    });
}

/// Spawns a full detail fetch for `id`.
pub fn spawn_detail_fetch<T: Transport + 'static>(
    client: Arc<CatalogClient<T>>,
    id: u32,
    tx: UnboundedSender<FetchMessage>,
) {
    tokio::spawn(async move {
        let result = client.fetch_full_detail(id).await.map_err(|e| {
            tracing::warn!(id, error = %e, "detail fetch failed");
            e.to_string()
        });
        let _ = tx.send(FetchMessage::Detail { id, result });
    });
}

/// Spawns a summary fetch for ids missing from the catalog.
pub fn spawn_items_fetch<T: Transport + 'static>(
    client: Arc<CatalogClient<T>>,
    ids: Vec<u32>,
    tx: UnboundedSender<FetchMessage>,
) {
    tokio::spawn(async move {
        let result = client.fetch_items(&ids).await.map_err(|e| {
            tracing::warn!(count = ids.len(), error = %e, "item fetch failed");
            e.to_string()
        });
        let _ = tx.send(FetchMessage::Items(result));
    });
}
