use crate::{
    Id, Kind, Value,
    error::Overfull,
    node::Receive,
};
use serde::{Deserialize, Serialize};

/// A terminal node that records every value it receives.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sink {
    id: Id,
    received: Vec<Value>,
}

impl Sink {
    pub fn new(id: Id) -> Self {
        Sink {
            id,
            received: vec![],
        }
    }
}

impl Receive for Sink {
    fn id(&self) -> Id {
        self.id
    }

    fn kind(&self) -> Kind {
        Kind::Sink
    }

    fn receive(&mut self, value: Value) -> Result<(), Overfull> {
        self.received.push(value);
        Ok(())
    }

    fn values(&self) -> &[Value] {
        &self.received
    }
}
