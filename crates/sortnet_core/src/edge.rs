use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes which output of a comparator a connection carries.
///
/// Every wired comparator has exactly one outgoing edge of each variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Carries the smaller of the comparator's two values.
    Low,
    /// Carries the larger of the comparator's two values.
    High,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Low => f.write_str("low"),
            Edge::High => f.write_str("high"),
        }
    }
}
