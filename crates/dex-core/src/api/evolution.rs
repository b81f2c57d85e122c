//! Flattening of evolution-chain trees.

use crate::api::wire::{id_from_url, ChainLink};

/// Depth beyond which chain nodes are ignored. Real chains are at most three
/// stages deep; the cap only bounds malformed documents.
pub const MAX_CHAIN_DEPTH: usize = 16;

/// A chain node before localization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainNode {
    pub id: u32,
    pub name: String,
}

/// Flattens a chain into ancestor → descendant order.
///
/// Pre-order depth-first: each node is emitted before its children, and
/// children are visited in the order the document declares them. Nodes whose
/// species URL carries no identifier are skipped; their children are still
/// visited.
pub(crate) fn flatten_chain(root: &ChainLink) -> Vec<ChainNode> {
    let mut out = Vec::new();
    visit(root, 0, &mut out);
    out
}

fn visit(link: &ChainLink, depth: usize, out: &mut Vec<ChainNode>) {
    if depth >= MAX_CHAIN_DEPTH {
        tracing::warn!(depth, "evolution chain deeper than cap, truncating");
        return;
    }

    match id_from_url(&link.species.url) {
        Some(id) => out.push(ChainNode {
            id,
            name: link.species.name.clone(),
        }),
        None => tracing::warn!(name = %link.species.name, "chain node without id"),
    }

    for child in &link.evolves_to {
        visit(child, depth + 1, out);
    }
}
