//! Identifiers for the nodes of the network.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniquely identifies a node within the network.
///
/// Bots and outputs are numbered independently, so `bot 0` and `output 0`
/// are distinct nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Id {
    /// The namespace the index was declared in.
    pub space: Space,
    /// The index within the namespace.
    pub index: u32,
}

/// The namespace in which an [`Id`] was declared.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    Bot,
    Output,
}

/// The role a node plays within the network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Buffers two values and forwards their min and max.
    Comparator,
    /// Records every value it receives.
    Sink,
}

impl Id {
    pub const fn new(space: Space, index: u32) -> Self {
        Id { space, index }
    }

    /// Shorthand for an id in the `bot` namespace.
    pub const fn bot(index: u32) -> Self {
        Id::new(Space::Bot, index)
    }

    /// Shorthand for an id in the `output` namespace.
    pub const fn output(index: u32) -> Self {
        Id::new(Space::Output, index)
    }
}

impl Space {
    /// The keyword used for this namespace within instructions.
    pub fn keyword(&self) -> &'static str {
        match self {
            Space::Bot => "bot",
            Space::Output => "output",
        }
    }

    /// The kind of node declared by this namespace.
    pub fn kind(&self) -> Kind {
        match self {
            Space::Bot => Kind::Comparator,
            Space::Output => Kind::Sink,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.space.keyword(), self.index)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Comparator => f.write_str("comparator"),
            Kind::Sink => f.write_str("sink"),
        }
    }
}

impl From<(Space, u32)> for Id {
    fn from((space, index): (Space, u32)) -> Self {
        Id { space, index }
    }
}
