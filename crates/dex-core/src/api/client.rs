//! The remote data client.
//!
//! [`CatalogClient`] turns the API's documents into [`Item`] records. It owns
//! no state beyond its configuration: nothing is cached and nothing is
//! retried. Every call either returns complete data or an error.

use futures::future::{join_all, try_join_all};
use serde::de::DeserializeOwned;

use crate::api::evolution::{flatten_chain, ChainNode};
use crate::api::transport::{HttpTransport, Transport};
use crate::api::wire::{ChainDoc, CoreDoc, IndexEntry, IndexPage, SpeciesDoc};
use crate::config::settings::ApiConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::{Ability, Category, EvolutionStage, Generation, Item, Stat};

/// Read-only client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    language: String,
    catalog_size: usize,
}

impl CatalogClient<HttpTransport> {
    /// Builds a `reqwest`-backed client from the `[api]` config section.
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            HttpTransport::new(),
            &api.base_url,
            &api.language,
            api.catalog_size,
        )
    }
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T, base_url: &str, language: &str, catalog_size: usize) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_owned(),
            language: language.to_owned(),
            catalog_size,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Language code used to pick localized names and texts.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn index_url(&self) -> String {
        format!("{}/pokemon?limit={}&offset=0", self.base_url, self.catalog_size)
    }

    pub fn item_url(&self, id: u32) -> String {
        format!("{}/pokemon/{id}", self.base_url)
    }

    pub fn species_url(&self, id: u32) -> String {
        format!("{}/pokemon-species/{id}", self.base_url)
    }

    async fn get_doc<D: DeserializeOwned>(&self, url: &str) -> CoreResult<D> {
        let body = self.transport.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| CoreError::Decode {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Fetches the ordered index of the whole catalog.
    ///
    /// # Errors
    ///
    /// [`CoreError::RemoteUnavailable`] for any failure, including a body
    /// that is not a collection listing. Partial data is never returned.
    pub async fn fetch_index(&self) -> CoreResult<Vec<IndexEntry>> {
        let url = self.index_url();
        let page: IndexPage = self.get_doc(&url).await.map_err(|e| match e {
            CoreError::Decode { url, reason } => CoreError::RemoteUnavailable { url, reason },
            other => other,
        })?;
        tracing::info!(entries = page.results.len(), "catalog index loaded");
        Ok(page.results)
    }

    /// Resolves the half-open slice `index[start..end]` into items.
    ///
    /// Bounds are clamped to the index. For each entry the core and species
    /// documents are fetched concurrently, and all entries of the slice run
    /// concurrently. The output is in slice order whatever order the
    /// responses arrive in.
    ///
    /// # Errors
    ///
    /// [`CoreError::DetailBatchFailed`] as soon as any single lookup fails;
    /// the remaining in-flight lookups are dropped.
    pub async fn fetch_details_batch(
        &self,
        index: &[IndexEntry],
        start: usize,
        end: usize,
    ) -> CoreResult<Vec<Item>> {
        let end = end.min(index.len());
        let start = start.min(end);
        let slice = &index[start..end];
        if slice.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(start, end, "fetching detail batch");
        try_join_all(slice.iter().map(|entry| self.fetch_summary(entry)))
            .await
            .map_err(|e| CoreError::DetailBatchFailed {
                start,
                end,
                reason: e.to_string(),
            })
    }

    /// Resolves arbitrary ids as one batch, without needing the index.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch_details_batch`], with bounds `0..ids.len()`.
    pub async fn fetch_items(&self, ids: &[u32]) -> CoreResult<Vec<Item>> {
        let entries: Vec<IndexEntry> = ids
            .iter()
            .map(|id| IndexEntry {
                name: id.to_string(),
                detail_url: self.item_url(*id),
            })
            .collect();
        self.fetch_details_batch(&entries, 0, entries.len()).await
    }

    async fn fetch_summary(&self, entry: &IndexEntry) -> CoreResult<Item> {
        let id = entry.id().ok_or_else(|| CoreError::Decode {
            url: entry.detail_url.clone(),
            reason: "detail URL carries no identifier".to_owned(),
        })?;
        let species_url = self.species_url(id);

        let (core, species) = tokio::try_join!(
            self.get_doc::<CoreDoc>(&entry.detail_url),
            self.get_doc::<SpeciesDoc>(&species_url),
        )?;

        let description = species
            .first_flavor_text(&self.language)
            .unwrap_or_default();
        let mut item = join_documents(core, &species, &self.language, &entry.detail_url)?;
        item.description = description;
        Ok(item)
    }

    /// Fetches one item with the full field set, including its lineage.
    ///
    /// A failed localized-name lookup for a lineage node falls back to that
    /// node's primary name. A failed lineage document leaves the lineage
    /// empty; neither failure fails the call.
    ///
    /// # Errors
    ///
    /// [`CoreError::RemoteUnavailable`] or [`CoreError::Decode`] when the
    /// core or species document cannot be loaded.
    pub async fn fetch_full_detail(&self, id: u32) -> CoreResult<Item> {
        let item_url = self.item_url(id);
        let species_url = self.species_url(id);

        let (core, species) = tokio::try_join!(
            self.get_doc::<CoreDoc>(&item_url),
            self.get_doc::<SpeciesDoc>(&species_url),
        )?;

        let mut item = join_documents(core, &species, &self.language, &item_url)?;
        item.description = species.joined_flavor_text(&self.language);
        item.genus = species.genus(&self.language).unwrap_or_default().to_owned();

        if let Some(chain) = &species.evolution_chain {
            match self.fetch_lineage(&chain.url).await {
                Ok(lineage) => item.evolution = lineage,
                Err(e) => tracing::warn!(id, error = %e, "evolution chain unavailable"),
            }
        }

        Ok(item)
    }

    async fn fetch_lineage(&self, chain_url: &str) -> CoreResult<Vec<EvolutionStage>> {
        let doc: ChainDoc = self.get_doc(chain_url).await?;
        let nodes = flatten_chain(&doc.chain);
        Ok(join_all(nodes.into_iter().map(|node| self.localize_stage(node))).await)
    }

    async fn localize_stage(&self, node: ChainNode) -> EvolutionStage {
        let url = self.species_url(node.id);
        let display_name = match self.get_doc::<SpeciesDoc>(&url).await {
            Ok(species) => species
                .localized_name(&self.language)
                .map(str::to_owned)
                .unwrap_or_else(|| node.name.clone()),
            Err(e) => {
                tracing::debug!(id = node.id, error = %e, "stage name lookup failed");
                node.name.clone()
            }
        };
        EvolutionStage {
            id: node.id,
            name: node.name,
            display_name,
        }
    }
}

/// Joins a core and a species document into an item.
///
/// Unknown category codes are dropped; an item left with no category is a
/// decode error.
fn join_documents(
    core: CoreDoc,
    species: &SpeciesDoc,
    language: &str,
    url: &str,
) -> CoreResult<Item> {
    let categories: Vec<Category> = core
        .types
        .iter()
        .filter_map(|slot| match slot.kind.name.parse() {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::warn!(id = core.id, error = %e, "dropping category");
                None
            }
        })
        .collect();
    if categories.is_empty() {
        return Err(CoreError::Decode {
            url: url.to_owned(),
            reason: "item has no known category".to_owned(),
        });
    }

    let generation = species
        .generation
        .as_ref()
        .and_then(|g| g.name.parse::<Generation>().ok());

    let display_name = species
        .localized_name(language)
        .map(str::to_owned)
        .unwrap_or_else(|| core.name.clone());

    let stats = core
        .stats
        .iter()
        .map(|s| Stat {
            name: s.stat.name.clone(),
            value: u8::try_from(s.base_stat).unwrap_or(u8::MAX),
        })
        .collect();

    let abilities = core
        .abilities
        .iter()
        .map(|a| Ability {
            name: a.ability.name.clone(),
            hidden: a.is_hidden,
        })
        .collect();

    Ok(Item {
        id: core.id,
        image_url: core.sprites.best(),
        name: core.name,
        display_name,
        categories,
        height: core.height,
        weight: core.weight,
        stats,
        description: String::new(),
        generation,
        evolution: Vec::new(),
        genus: String::new(),
        abilities,
    })
}
