//! Incremental catalog loading.
//!
//! [`load_catalog`] is the producer: it fetches the index, then resolves it in
//! sequential batches, sending a [`LoadEvent`] after each step. [`Catalog`] is
//! the snapshot the UI reads every frame; [`Catalog::apply`] is how events
//! reach it.

use tokio::sync::mpsc::UnboundedSender;

use crate::api::{CatalogClient, IndexEntry, Transport};
use crate::model::Item;

/// Progress reported by [`load_catalog`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    IndexLoaded(Vec<IndexEntry>),
    IndexFailed(String),
    BatchLoaded {
        start: usize,
        items: Vec<Item>,
    },
    BatchFailed {
        start: usize,
        end: usize,
        reason: String,
    },
    Finished,
}

/// Where the loader is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    LoadingIndex,
    LoadingDetails,
    Complete,
    /// A batch failed; incremental loading stopped with what it had.
    Halted,
    /// The index could not be fetched.
    Failed(String),
}

/// Fetches the index and then every batch, strictly one after another.
///
/// Stops early when the receiving side of `tx` is gone or after the first
/// failed batch. Already delivered batches are never retracted.
pub async fn load_catalog<T: Transport>(
    client: &CatalogClient<T>,
    batch_size: usize,
    tx: &UnboundedSender<LoadEvent>,
) {
    let index = match client.fetch_index().await {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!(error = %e, "catalog index failed");
            let _ = tx.send(LoadEvent::IndexFailed(e.to_string()));
            return;
        }
    };

    let total = index.len();
    if tx.send(LoadEvent::IndexLoaded(index.clone())).is_err() {
        tracing::debug!("catalog receiver dropped");
        return;
    }

    let batch_size = batch_size.max(1);
    let mut start = 0;
    while start < total {
        let end = (start + batch_size).min(total);
        match client.fetch_details_batch(&index, start, end).await {
            Ok(items) => {
                if tx.send(LoadEvent::BatchLoaded { start, items }).is_err() {
                    tracing::debug!(start, "catalog receiver dropped");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(start, end, error = %e, "detail batch failed, loading halted");
                let _ = tx.send(LoadEvent::BatchFailed {
                    start,
                    end,
                    reason: e.to_string(),
                });
                return;
            }
        }
        start = end;
    }

    tracing::info!(total, "catalog fully loaded");
    let _ = tx.send(LoadEvent::Finished);
}

/// The in-memory catalog: the index plus every item resolved so far,
/// ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: Vec<IndexEntry>,
    items: Vec<Item>,
    status: LoadStatus,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::IndexLoaded(index) => {
                self.index = index;
                self.status = if self.index.is_empty() {
                    LoadStatus::Complete
                } else {
                    LoadStatus::LoadingDetails
                };
            }
            LoadEvent::IndexFailed(reason) => self.status = LoadStatus::Failed(reason),
            LoadEvent::BatchLoaded { items, .. } => self.merge_items(items),
            LoadEvent::BatchFailed { .. } => self.status = LoadStatus::Halted,
            LoadEvent::Finished => {
                if self.status == LoadStatus::LoadingDetails {
                    self.status = LoadStatus::Complete;
                }
            }
        }
    }

    /// Inserts items in id order. Ids already present are ignored.
    pub fn merge_items(&mut self, items: Vec<Item>) {
        for item in items {
            if let Err(pos) = self.items.binary_search_by_key(&item.id, |i| i.id) {
                self.items.insert(pos, item);
            }
        }
    }

    /// Drops everything and starts over, e.g. before a reload.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn get(&self, id: u32) -> Option<&Item> {
        self.items
            .binary_search_by_key(&id, |i| i.id)
            .ok()
            .map(|pos| &self.items[pos])
    }

    /// `(loaded, total)`; total is the index length.
    pub fn progress(&self) -> (usize, usize) {
        (self.items.len(), self.index.len())
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            LoadStatus::LoadingIndex | LoadStatus::LoadingDetails
        )
    }
}
