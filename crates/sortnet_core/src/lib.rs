//! **sortnet** is a push-based network of comparator nodes.
//!
//! The network is built from two kinds of instruction:
//!
//! - **Assignment** instructions insert a value directly into a comparator
//!   ("bot").
//! - **Wiring** instructions connect a comparator's low and high outputs to
//!   other comparators or to terminal sinks ("outputs").
//!
//! Nodes are created on first reference. Propagation is suppressed while
//! instructions are applied. Once the whole stream has been consumed, the
//! network is drained: every comparator without a parent (a **root**) is
//! processed, and its values cascade through the graph until they reach the
//! sinks.
//!
//! ```
//! use sortnet_core::{Goal, Id, Network, instr};
//!
//! let text = "\
//! value 5 goes to bot 2
//! value 3 goes to bot 2
//! bot 2 gives low to output 0 and high to output 1";
//! let mut net = Network::new(Goal::new(3, 5));
//! net.apply_all(instr::parse_lines(text).unwrap()).unwrap();
//! let drained = net.drain().unwrap();
//! assert_eq!(drained.goal_match(), Some(Id::bot(2)));
//! assert_eq!(drained.sink(Id::output(0)), Some(&[3][..]));
//! ```

#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use id::{Id, Kind, Space};
#[doc(inline)]
pub use instr::Instruction;
#[doc(inline)]
pub use network::{Drained, Goal, Network, Propagation, Report};
#[doc(inline)]
pub use node::{Comparator, Node, Pair, Receive, Sink};
#[doc(inline)]
pub use reg::Registry;

pub mod edge;
pub mod error;
pub mod id;
pub mod instr;
pub mod network;
pub mod node;
pub mod reg;
pub mod root;

/// The type of value routed through the network.
pub type Value = u64;
