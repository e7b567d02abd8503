//! Candidate site collection for a single mutation family

use crate::catalog::MutationFamily;
use crate::indexer::{index, IndexedNode};

/// Ordinals of every node the family can mutate, in traversal order.
///
/// Ordinals rank all nodes of the family's kind, so a site keeps its ordinal no
/// matter which family found it. An empty result means the family has nothing
/// to mutate in this tree.
pub fn collect(tree: &syn::File, family: &MutationFamily) -> Vec<usize> {
    candidate_nodes(tree, family)
        .into_iter()
        .map(|node| node.ordinal)
        .collect()
}

/// Like [`collect`], keeping the indexed node details
pub fn candidate_nodes(tree: &syn::File, family: &MutationFamily) -> Vec<IndexedNode> {
    index(tree, family.kind())
        .iter()
        .filter(|node| family.matches(node.kind, node.operator))
        .cloned()
        .collect()
}
