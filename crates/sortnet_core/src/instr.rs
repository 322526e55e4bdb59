//! The instructions used to build a network, along with their line grammar.
//!
//! ```text
//! value <V> goes to bot <B>
//! bot <B> gives low to (bot|output) <L> and high to (bot|output) <H>
//! ```

use crate::{
    Id, Kind, Space, Value,
    error::{InvalidInstruction, ParseError},
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::LazyLock};

static ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^value ([0-9]+) goes to bot ([0-9]+)$").expect("assign pattern is valid")
});

static WIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^bot ([0-9]+) gives low to (bot|output) ([0-9]+) and high to (bot|output) ([0-9]+)$",
    )
    .expect("wire pattern is valid")
});

/// A single step in building the network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Instruction {
    /// Insert `value` into the `target` comparator.
    Assign { target: Id, value: Value },
    /// Route the `source` comparator's low output to `low` and its high
    /// output to `high`, creating each target with the given kind if absent.
    Wire {
        source: Id,
        low: Id,
        low_kind: Kind,
        high: Id,
        high_kind: Kind,
    },
}

impl Instruction {
    pub fn assign(target: Id, value: Value) -> Self {
        Instruction::Assign { target, value }
    }

    /// A wiring instruction where each target's kind is declared by its
    /// namespace.
    pub fn wire(source: Id, low: Id, high: Id) -> Self {
        Instruction::Wire {
            source,
            low,
            low_kind: low.space.kind(),
            high,
            high_kind: high.space.kind(),
        }
    }
}

impl FromStr for Instruction {
    type Err = InvalidInstruction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end();
        let invalid = || InvalidInstruction {
            text: line.to_string(),
        };
        if let Some(caps) = ASSIGN.captures(line) {
            let value = number(&caps, 1).ok_or_else(invalid)?;
            let bot = number(&caps, 2).ok_or_else(invalid)?;
            return Ok(Instruction::assign(Id::bot(bot), value));
        }
        if let Some(caps) = WIRE.captures(line) {
            let source = number(&caps, 1).ok_or_else(invalid)?;
            let low = Id::new(space(&caps[2]), number(&caps, 3).ok_or_else(invalid)?);
            let high = Id::new(space(&caps[4]), number(&caps, 5).ok_or_else(invalid)?);
            return Ok(Instruction::wire(Id::bot(source), low, high));
        }
        Err(invalid())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Assign { target, value } => write!(f, "value {value} goes to {target}"),
            Instruction::Wire {
                source, low, high, ..
            } => write!(f, "{source} gives low to {low} and high to {high}"),
        }
    }
}

/// Parse every non-blank line of `text` into an instruction.
///
/// The whole input is parsed up front so that a malformed line is reported
/// before any node is created.
pub fn parse_lines(text: &str) -> Result<Vec<Instruction>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse().map_err(|source| ParseError {
                line: i + 1,
                source,
            })
        })
        .collect()
}

// Digit-only captures may still overflow.
fn number<T: FromStr>(caps: &Captures, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

fn space(keyword: &str) -> Space {
    match keyword {
        "bot" => Space::Bot,
        _ => Space::Output,
    }
}
