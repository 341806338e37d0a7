//! Dependency graph - Interned node arena with a synthetic root

mod build;
mod order;

pub use build::build_dependency_graph;
pub use order::CycleError;

use std::collections::HashMap;
use std::hash::Hash;

/// Index of a node within a [`Dag`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One graph node: an interned value plus the nodes that depend on it.
///
/// The root node carries no value; every other node wraps exactly one
/// interned `T`. A node may appear as a child of several parents, so the
/// structure is a DAG expressed through shared indices, not a tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    value: Option<T>,
    children: Vec<NodeId>,
}

impl<T: Copy> Node<T> {
    /// The interned value, or `None` for the synthetic root
    pub fn value(&self) -> Option<T> {
        self.value
    }

    /// Nodes that depend on this one
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A DAG over interned values.
///
/// Values are interned by equality of `T` itself; when `T` is an identity
/// handle (as with [`SourceId`](crate::SourceId)) this gives
/// reference-identity semantics: equal-looking sources registered separately
/// intern to separate nodes. Node indices are assigned in first-discovery
/// order, which is what makes traversal deterministic.
#[derive(Debug, Clone)]
pub struct Dag<T> {
    nodes: Vec<Node<T>>,
    index: HashMap<T, NodeId>,
}

impl<T: Copy + Eq + Hash> Dag<T> {
    /// Create a graph holding only the synthetic root
    pub fn new() -> Self {
        Dag {
            nodes: vec![Node {
                value: None,
                children: Vec::new(),
            }],
            index: HashMap::new(),
        }
    }

    /// The synthetic root anchoring nodes with no prerequisites
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Intern a value, creating its node on first sight.
    ///
    /// Returns the node plus whether it was newly created.
    pub fn intern(&mut self, value: T) -> (NodeId, bool) {
        if let Some(&id) = self.index.get(&value) {
            return (id, false);
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value: Some(value),
            children: Vec::new(),
        });
        self.index.insert(value, id);
        (id, true)
    }

    /// Record that `child` depends on `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Look up the node interned for `value`, if any
    pub fn get(&self, value: T) -> Option<NodeId> {
        self.index.get(&value).copied()
    }

    /// Access a node by index
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Total node count, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub(crate) fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }
}

impl<T: Copy + Eq + Hash> Default for Dag<T> {
    fn default() -> Self {
        Dag::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_deduplicates() {
        let mut dag: Dag<u32> = Dag::new();
        let (a, created_a) = dag.intern(7);
        let (b, created_b) = dag.intern(7);
        assert_eq!(a, b);
        assert!(created_a);
        assert!(!created_b);
        assert_eq!(dag.len(), 2);
    }

    #[test]
    fn test_distinct_values_get_distinct_nodes() {
        let mut dag: Dag<u32> = Dag::new();
        let (a, _) = dag.intern(1);
        let (b, _) = dag.intern(2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_shared_child_under_two_parents() {
        let mut dag: Dag<u32> = Dag::new();
        let (a, _) = dag.intern(1);
        let (b, _) = dag.intern(2);
        let (c, _) = dag.intern(3);
        dag.add_child(a, c);
        dag.add_child(b, c);
        assert_eq!(dag.node(a).children(), &[c]);
        assert_eq!(dag.node(b).children(), &[c]);
    }

    #[test]
    fn test_root_has_no_value() {
        let dag: Dag<u32> = Dag::new();
        assert!(dag.node(dag.root()).value().is_none());
        assert!(dag.is_empty());
    }
}
