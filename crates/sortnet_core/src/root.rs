//! Finding the entry points of the final flush.

use crate::reg::{NodeIx, Registry};

/// All comparators that no other comparator routes into, in creation order.
///
/// Every value a root will ever hold arrives via direct assignment, so once
/// all instructions are applied a well-formed root holds both of its values.
/// Every other comparator is reached by draining some root.
pub fn roots(reg: &Registry) -> Vec<NodeIx> {
    reg.comparators()
        .map(|(ix, _)| ix)
        .filter(|&ix| !reg.has_parents(ix))
        .collect()
}
