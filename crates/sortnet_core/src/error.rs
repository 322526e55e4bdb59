//! Error types for building and draining a network.

use crate::{Id, Kind, Value};
use thiserror::Error;

/// A line of text matches neither instruction grammar.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid instruction {text:?}")]
pub struct InvalidInstruction {
    pub text: String,
}

/// An instruction within a multi-line input failed to parse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct ParseError {
    /// The 1-based line number.
    pub line: usize,
    pub source: InvalidInstruction,
}

/// An id was referenced as one kind of node after being created as another.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{id} is a {existing}, but was referenced as a {requested}")]
pub struct KindConflict {
    pub id: Id,
    pub existing: Kind,
    pub requested: Kind,
}

/// A comparator was wired for a second time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{id} is already wired")]
pub struct AlreadyWired {
    pub id: Id,
}

/// A comparator received a third value before being processed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{id} already holds two values and cannot receive {value}")]
pub struct Overfull {
    pub id: Id,
    pub value: Value,
}

/// A comparator was processed without two values or without its targets.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{id} is not ready (holds {held} of 2 values, wired: {wired})")]
pub struct NotReady {
    pub id: Id,
    pub held: usize,
    pub wired: bool,
}

/// The wiring routes a comparator's output back into itself.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("wiring contains a cycle through {id}")]
pub struct CycleDetected {
    pub id: Id,
}

/// Errors that may occur while wiring two nodes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error(transparent)]
    KindConflict(#[from] KindConflict),
    #[error(transparent)]
    AlreadyWired(#[from] AlreadyWired),
}

/// Any error produced while building or draining a [`Network`][crate::Network].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    KindConflict(#[from] KindConflict),
    #[error(transparent)]
    AlreadyWired(#[from] AlreadyWired),
    #[error(transparent)]
    Overfull(#[from] Overfull),
    #[error(transparent)]
    NotReady(#[from] NotReady),
    #[error(transparent)]
    CycleDetected(#[from] CycleDetected),
}

impl From<BindError> for Error {
    fn from(err: BindError) -> Self {
        match err {
            BindError::KindConflict(err) => Error::KindConflict(err),
            BindError::AlreadyWired(err) => Error::AlreadyWired(err),
        }
    }
}
