//! Deterministic ordinal numbering of operator nodes
//!
//! The walk follows `syn::visit` field order and counts a binary expression only
//! after its operands have been visited, so in `(a + b) * c` the `+` is ordinal 1
//! and the `*` ordinal 2. Two structurally identical trees always receive the same
//! numbering, which makes a (family, ordinal) pair a stable address for a site.

use syn::visit::Visit;

use crate::operators::{NodeKind, OpSpans, OperatorKind};

/// One numbered node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedNode {
    /// 1-based rank among nodes of the indexed kind
    pub ordinal: usize,
    pub kind: NodeKind,
    /// `None` for operators outside the mutable set (`^`, `<<`, ...)
    pub operator: Option<OperatorKind>,
    /// Line of the operator token (1-indexed)
    pub line: usize,
    /// Column of the operator token (1-indexed)
    pub column: usize,
}

/// Ordinal-to-node mapping for a single node kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalMap {
    kind: NodeKind,
    nodes: Vec<IndexedNode>,
}

impl OrdinalMap {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Number of nodes of this kind in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node with the given 1-based ordinal
    pub fn get(&self, ordinal: usize) -> Option<&IndexedNode> {
        ordinal.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedNode> {
        self.nodes.iter()
    }
}

/// Number every node of `kind` in traversal order
pub fn index(tree: &syn::File, kind: NodeKind) -> OrdinalMap {
    let mut indexer = NodeIndexer {
        kind,
        nodes: Vec::new(),
    };
    indexer.visit_file(tree);

    OrdinalMap {
        kind,
        nodes: indexer.nodes,
    }
}

struct NodeIndexer {
    kind: NodeKind,
    nodes: Vec<IndexedNode>,
}

impl<'ast> Visit<'ast> for NodeIndexer {
    fn visit_expr_binary(&mut self, node: &'ast syn::ExprBinary) {
        // Operands first: the parent is counted after its children
        syn::visit::visit_expr_binary(self, node);

        if NodeKind::of(&node.op) == Some(self.kind) {
            let (line, column) = OpSpans::of(&node.op).line_column();
            self.nodes.push(IndexedNode {
                ordinal: self.nodes.len() + 1,
                kind: self.kind,
                operator: OperatorKind::from_bin_op(&node.op),
                line,
                column,
            });
        }
    }
}
