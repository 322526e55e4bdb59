//! A node that buffers two values and forwards their min and max.

use crate::{
    Id, Kind, Value,
    error::Overfull,
    node::{Pair, Receive},
};
use serde::{Deserialize, Serialize};

/// The number of values a comparator buffers before it may be processed.
pub const CAPACITY: usize = 2;

/// Buffers up to two values.
///
/// The comparator's low and high targets are stored as its outgoing edges
/// within the [`Registry`][crate::Registry] graph.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comparator {
    id: Id,
    held: Vec<Value>,
}

impl Comparator {
    pub fn new(id: Id) -> Self {
        Comparator {
            id,
            held: Vec::with_capacity(CAPACITY),
        }
    }

    /// The values currently held, in arrival order.
    pub fn held(&self) -> &[Value] {
        &self.held
    }

    /// Whether the comparator holds both of its values.
    pub fn is_full(&self) -> bool {
        self.held.len() == CAPACITY
    }

    /// Drain both held values, sorted.
    ///
    /// Returns `None` and leaves the held values untouched if the comparator
    /// is not full.
    pub fn take_pair(&mut self) -> Option<Pair> {
        if !self.is_full() {
            return None;
        }
        let pair = Pair::new(self.held[0], self.held[1]);
        self.held.clear();
        Some(pair)
    }
}

impl Receive for Comparator {
    fn id(&self) -> Id {
        self.id
    }

    fn kind(&self) -> Kind {
        Kind::Comparator
    }

    fn receive(&mut self, value: Value) -> Result<(), Overfull> {
        if self.is_full() {
            return Err(Overfull { id: self.id, value });
        }
        self.held.push(value);
        Ok(())
    }

    fn values(&self) -> &[Value] {
        &self.held
    }
}
