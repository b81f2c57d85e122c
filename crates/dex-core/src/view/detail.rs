//! State of the detail screen.

use crate::model::{EvolutionStage, Item};

/// Where a detail fetch stands.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading(u32),
    Loaded(Box<Item>),
    Failed { id: u32, reason: String },
}

/// The detail screen: fetch state plus the selected lineage stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    state: DetailState,
    stage_cursor: usize,
}

impl DetailView {
    /// A view waiting for `id`.
    pub fn loading(id: u32) -> Self {
        Self {
            state: DetailState::Loading(id),
            stage_cursor: 0,
        }
    }

    pub fn id(&self) -> u32 {
        match &self.state {
            DetailState::Loading(id) => *id,
            DetailState::Loaded(item) => item.id,
            DetailState::Failed { id, .. } => *id,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn item(&self) -> Option<&Item> {
        match &self.state {
            DetailState::Loaded(item) => Some(item),
            _ => None,
        }
    }

    /// Applies a fetch result. Results for another id are stale and ignored.
    #[must_use]
    pub fn accept(self, id: u32, result: Result<Item, String>) -> Self {
        if id != self.id() {
            tracing::debug!(id, current = self.id(), "discarding stale detail");
            return self;
        }
        let state = match result {
            Ok(item) => {
                let stage_cursor = item
                    .evolution
                    .iter()
                    .position(|s| s.id == id)
                    .unwrap_or(0);
                return Self {
                    state: DetailState::Loaded(Box::new(item)),
                    stage_cursor,
                };
            }
            Err(reason) => DetailState::Failed { id, reason },
        };
        Self { state, ..self }
    }

    pub fn stage_cursor(&self) -> usize {
        self.stage_cursor
    }

    fn lineage(&self) -> &[EvolutionStage] {
        self.item()
            .map(|item| item.evolution.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn next_stage(self) -> Self {
        let len = self.lineage().len();
        if len == 0 {
            return self;
        }
        Self {
            stage_cursor: (self.stage_cursor + 1).min(len - 1),
            ..self
        }
    }

    #[must_use]
    pub fn prev_stage(self) -> Self {
        Self {
            stage_cursor: self.stage_cursor.saturating_sub(1),
            ..self
        }
    }

    pub fn selected_stage(&self) -> Option<&EvolutionStage> {
        self.lineage().get(self.stage_cursor)
    }
}

/// Ids of the previous and next entries, bounded by `1..=catalog_size`.
pub fn neighbor_ids(id: u32, catalog_size: usize) -> (Option<u32>, Option<u32>) {
    let last = u32::try_from(catalog_size).unwrap_or(u32::MAX);
    let prev = (id > 1).then(|| id - 1);
    let next = (id < last).then(|| id + 1);
    (prev, next)
}
