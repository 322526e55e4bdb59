//! The nodes of the network and the [`Receive`] trait they share.

use crate::{Id, Kind, Value, error::Overfull};
use serde::{Deserialize, Serialize};

pub use comparator::Comparator;
pub use sink::Sink;

pub mod comparator;
pub mod sink;

/// Implemented by every node capable of receiving routed values.
pub trait Receive {
    /// The id of the node within the network.
    fn id(&self) -> Id;

    /// The role the node plays within the network.
    fn kind(&self) -> Kind;

    /// Accept a single value.
    ///
    /// Receiving never triggers propagation by itself. Whether or not a
    /// full comparator is processed is decided by the
    /// [`Network`][crate::Network].
    fn receive(&mut self, value: Value) -> Result<(), Overfull>;

    /// The values currently held by the node.
    fn values(&self) -> &[Value];
}

/// A node within the network's graph.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Comparator(Comparator),
    Sink(Sink),
}

/// The two values held by a comparator, sorted.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Pair {
    pub low: Value,
    pub high: Value,
}

impl Node {
    /// Create a new, empty node of the given kind.
    pub fn new(id: Id, kind: Kind) -> Self {
        match kind {
            Kind::Comparator => Node::Comparator(Comparator::new(id)),
            Kind::Sink => Node::Sink(Sink::new(id)),
        }
    }

    pub fn as_comparator(&self) -> Option<&Comparator> {
        match self {
            Node::Comparator(c) => Some(c),
            Node::Sink(_) => None,
        }
    }

    pub fn as_comparator_mut(&mut self) -> Option<&mut Comparator> {
        match self {
            Node::Comparator(c) => Some(c),
            Node::Sink(_) => None,
        }
    }

    pub fn as_sink(&self) -> Option<&Sink> {
        match self {
            Node::Sink(s) => Some(s),
            Node::Comparator(_) => None,
        }
    }
}

impl Pair {
    /// Sort the two given values into a pair.
    pub fn new(a: Value, b: Value) -> Self {
        Pair {
            low: a.min(b),
            high: a.max(b),
        }
    }
}

impl Receive for Node {
    fn id(&self) -> Id {
        match self {
            Node::Comparator(c) => c.id(),
            Node::Sink(s) => s.id(),
        }
    }

    fn kind(&self) -> Kind {
        match self {
            Node::Comparator(c) => c.kind(),
            Node::Sink(s) => s.kind(),
        }
    }

    fn receive(&mut self, value: Value) -> Result<(), Overfull> {
        match self {
            Node::Comparator(c) => c.receive(value),
            Node::Sink(s) => s.receive(value),
        }
    }

    fn values(&self) -> &[Value] {
        match self {
            Node::Comparator(c) => c.values(),
            Node::Sink(s) => s.values(),
        }
    }
}

impl From<Comparator> for Node {
    fn from(c: Comparator) -> Self {
        Node::Comparator(c)
    }
}

impl From<Sink> for Node {
    fn from(s: Sink) -> Self {
        Node::Sink(s)
    }
}
