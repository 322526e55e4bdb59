//! The registry owning every node of the network.

use crate::{
    Edge, Id, Kind,
    error::{AlreadyWired, BindError, KindConflict},
    node::{Comparator, Node, Receive, Sink},
};
use petgraph::{
    Directed, Direction,
    graph::NodeIndex,
    visit::EdgeRef,
};
use std::collections::{BTreeSet, HashMap};

/// The graph type used to represent the network.
///
/// Edges point from a comparator to one of its targets.
pub type Graph = petgraph::stable_graph::StableGraph<Node, Edge, Directed, Index>;

/// The type used for indexing into the graph.
pub type Index = usize;
/// The type used to index into the graph's nodes.
pub type NodeIx = NodeIndex<Index>;

/// Owns the mapping from [`Id`] to node, creating nodes on first reference.
///
/// Nodes are never removed, so iteration over the graph always visits nodes
/// in the order in which they were created.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    graph: Graph,
    indices: HashMap<Id, NodeIx>,
}

/// The bound low and high targets of a comparator.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Targets {
    pub low: NodeIx,
    pub high: NodeIx,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of nodes within the registry.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Look up the graph index of the node with the given id.
    pub fn index_of(&self, id: Id) -> Option<NodeIx> {
        self.indices.get(&id).copied()
    }

    /// Look up the node with the given id.
    pub fn get(&self, id: Id) -> Option<&Node> {
        self.index_of(id).map(|ix| &self.graph[ix])
    }

    pub fn node(&self, ix: NodeIx) -> Option<&Node> {
        self.graph.node_weight(ix)
    }

    pub fn node_mut(&mut self, ix: NodeIx) -> Option<&mut Node> {
        self.graph.node_weight_mut(ix)
    }

    /// Return the index of the node with the given `id`, creating a node of
    /// the given `kind` if no node exists yet.
    ///
    /// Fails if the node exists but is of a different kind.
    pub fn get_or_create(&mut self, id: Id, kind: Kind) -> Result<NodeIx, KindConflict> {
        if let Some(ix) = self.index_of(id) {
            let existing = self.graph[ix].kind();
            if existing != kind {
                return Err(KindConflict {
                    id,
                    existing,
                    requested: kind,
                });
            }
            return Ok(ix);
        }
        let ix = self.graph.add_node(Node::new(id, kind));
        self.indices.insert(id, ix);
        log::trace!("created {kind} {id}");
        Ok(ix)
    }

    /// Route the `source` comparator's low output to `low` and its high
    /// output to `high`.
    ///
    /// This registers `source` as a parent of both targets.
    pub fn bind(&mut self, source: NodeIx, low: NodeIx, high: NodeIx) -> Result<(), BindError> {
        let node = &self.graph[source];
        if node.kind() != Kind::Comparator {
            return Err(KindConflict {
                id: node.id(),
                existing: node.kind(),
                requested: Kind::Comparator,
            }
            .into());
        }
        if self.targets(source).is_some() {
            return Err(AlreadyWired { id: node.id() }.into());
        }
        self.graph.add_edge(source, low, Edge::Low);
        self.graph.add_edge(source, high, Edge::High);
        Ok(())
    }

    /// The targets of the given comparator, or `None` if it is not wired.
    pub fn targets(&self, ix: NodeIx) -> Option<Targets> {
        let mut low = None;
        let mut high = None;
        for e in self.graph.edges_directed(ix, Direction::Outgoing) {
            match e.weight() {
                Edge::Low => low = Some(e.target()),
                Edge::High => high = Some(e.target()),
            }
        }
        Some(Targets {
            low: low?,
            high: high?,
        })
    }

    /// The ids of all comparators that route a value into the given node.
    pub fn parents(&self, ix: NodeIx) -> BTreeSet<Id> {
        self.graph
            .neighbors_directed(ix, Direction::Incoming)
            .map(|p| self.graph[p].id())
            .collect()
    }

    /// Whether any comparator routes a value into the given node.
    pub fn has_parents(&self, ix: NodeIx) -> bool {
        self.graph
            .neighbors_directed(ix, Direction::Incoming)
            .next()
            .is_some()
    }

    /// All comparators in creation order.
    pub fn comparators(&self) -> impl Iterator<Item = (NodeIx, &Comparator)> {
        self.graph
            .node_indices()
            .filter_map(|ix| self.graph[ix].as_comparator().map(|c| (ix, c)))
    }

    /// All sinks in creation order.
    pub fn sinks(&self) -> impl Iterator<Item = (NodeIx, &Sink)> {
        self.graph
            .node_indices()
            .filter_map(|ix| self.graph[ix].as_sink().map(|s| (ix, s)))
    }
}
