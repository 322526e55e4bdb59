//! Building a network from instructions and draining it.
//!
//! A [`Network`] is built by applying [`Instruction`]s. While building,
//! values are only buffered: a comparator's wiring may arrive before or
//! after its values, so propagating eagerly could route through targets
//! that are not yet bound.
//!
//! Once every instruction has been applied, [`Network::drain`] consumes the
//! network and processes each root comparator with propagation enabled.
//! Values cascade depth-first through the graph: a comparator's low output
//! is fully propagated before its high output is delivered.

use crate::{
    Id, Instruction, Kind, Value,
    error::{CycleDetected, Error, NotReady},
    node::{Pair, Receive},
    reg::{NodeIx, Registry},
    root,
};
use serde::{Deserialize, Serialize};

/// The unordered pair of values used to flag a comparator of interest.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Goal(Pair);

/// Whether delivering a value to a full, wired comparator processes it.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Propagation {
    /// Only buffer the value. Used while applying instructions.
    Suppressed,
    /// Process comparators as soon as they are ready. Used while draining.
    Enabled,
}

/// A network that is still accepting instructions.
#[derive(Clone, Debug)]
pub struct Network {
    reg: Registry,
    goal: Goal,
    /// Deliveries awaiting propagation, popped from the back.
    pending: Vec<(NodeIx, Value)>,
    /// Comparators whose pair matched the goal, in processing order.
    matches: Vec<Id>,
    processed: usize,
}

/// A network that has been fully drained.
#[derive(Clone, Debug)]
pub struct Drained {
    reg: Registry,
    goal: Goal,
    matches: Vec<Id>,
    processed: usize,
}

/// A serializable summary of a drained network.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Report {
    pub goal: Goal,
    /// Every comparator whose pair matched the goal.
    pub matches: Vec<Id>,
    /// The number of comparators processed.
    pub processed: usize,
    /// The contents of every sink, in creation order.
    pub sinks: Vec<SinkReport>,
    /// Comparators still holding values after the drain.
    pub stranded: Vec<Id>,
}

/// The values received by a single sink.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SinkReport {
    pub id: Id,
    pub values: Vec<Value>,
}

impl Goal {
    /// The order of `a` and `b` does not matter.
    pub fn new(a: Value, b: Value) -> Self {
        Goal(Pair::new(a, b))
    }

    pub fn pair(&self) -> Pair {
        self.0
    }

    /// Whether the sorted `pair` equals the goal.
    pub fn matches(&self, pair: &Pair) -> bool {
        self.0 == *pair
    }

    /// Whether either value of the goal appears within `pair`.
    fn touches(&self, pair: &Pair) -> bool {
        [self.0.low, self.0.high]
            .iter()
            .any(|v| *v == pair.low || *v == pair.high)
    }
}

impl Network {
    /// An empty network that reports comparators matching `goal`.
    pub fn new(goal: Goal) -> Self {
        Network {
            reg: Registry::new(),
            goal,
            pending: vec![],
            matches: vec![],
            processed: 0,
        }
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// The nodes created so far.
    pub fn registry(&self) -> &Registry {
        &self.reg
    }

    /// Apply a single instruction.
    pub fn apply(&mut self, instr: Instruction) -> Result<(), Error> {
        match instr {
            Instruction::Assign { target, value } => self.apply_assign(target, value),
            Instruction::Wire {
                source,
                low,
                low_kind,
                high,
                high_kind,
            } => self.apply_wire(source, low, low_kind, high, high_kind),
        }
    }

    /// Apply each instruction in order, stopping at the first error.
    pub fn apply_all<I>(&mut self, instrs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Instruction>,
    {
        instrs.into_iter().try_for_each(|instr| self.apply(instr))
    }

    /// Insert `value` into the `target` comparator, creating it if absent.
    ///
    /// The comparator is never processed here, even if it becomes full.
    pub fn apply_assign(&mut self, target: Id, value: Value) -> Result<(), Error> {
        log::debug!("inserting {value} into {target}");
        let ix = self.reg.get_or_create(target, Kind::Comparator)?;
        self.deliver(ix, value, Propagation::Suppressed)
    }

    /// Route the `source` comparator's low output to `low` and its high
    /// output to `high`, creating any of the three nodes if absent.
    pub fn apply_wire(
        &mut self,
        source: Id,
        low: Id,
        low_kind: Kind,
        high: Id,
        high_kind: Kind,
    ) -> Result<(), Error> {
        log::debug!("{source} gives low to {low} and high to {high}");
        let source_ix = self.reg.get_or_create(source, Kind::Comparator)?;
        let low_ix = self.reg.get_or_create(low, low_kind)?;
        let high_ix = self.reg.get_or_create(high, high_kind)?;
        self.reg.bind(source_ix, low_ix, high_ix)?;
        Ok(())
    }

    /// Process every root and propagate until all values have settled.
    ///
    /// Fails without processing anything if the wiring contains a cycle.
    pub fn drain(mut self) -> Result<Drained, Error> {
        if let Err(cycle) = petgraph::algo::toposort(self.reg.graph(), None) {
            let id = self.reg.graph()[cycle.node_id()].id();
            return Err(CycleDetected { id }.into());
        }

        let roots = root::roots(&self.reg);
        log::debug!("draining from {} root(s)", roots.len());
        for ix in roots {
            self.process(ix)?;
            self.flush()?;
        }

        let drained = Drained {
            reg: self.reg,
            goal: self.goal,
            matches: self.matches,
            processed: self.processed,
        };
        log::info!("drained after processing {} comparator(s)", drained.processed);
        for id in drained.stranded() {
            log::warn!("{id} still holds values after draining");
        }
        Ok(drained)
    }

    // Whether the node is a full comparator with both targets bound.
    fn is_ready(&self, ix: NodeIx) -> bool {
        let full = self.reg.graph()[ix]
            .as_comparator()
            .is_some_and(|c| c.is_full());
        full && self.reg.targets(ix).is_some()
    }

    fn deliver(&mut self, ix: NodeIx, value: Value, propagation: Propagation) -> Result<(), Error> {
        let Some(node) = self.reg.node_mut(ix) else {
            return Ok(());
        };
        log::trace!("{} is receiving {value}", node.id());
        node.receive(value)?;
        if propagation == Propagation::Enabled && self.is_ready(ix) {
            self.process(ix)?;
        }
        Ok(())
    }

    /// Sort the comparator's pair and queue a delivery to each target.
    ///
    /// The high delivery is queued first so that the low delivery, and
    /// everything it triggers, is handled before it.
    fn process(&mut self, ix: NodeIx) -> Result<(), NotReady> {
        let targets = self.reg.targets(ix);
        let Some(comparator) = self.reg.node_mut(ix).and_then(|n| n.as_comparator_mut()) else {
            return Ok(());
        };
        let id = comparator.id();
        let not_ready = NotReady {
            id,
            held: comparator.held().len(),
            wired: targets.is_some(),
        };
        let Some(targets) = targets else {
            return Err(not_ready);
        };
        let Some(pair) = comparator.take_pair() else {
            return Err(not_ready);
        };

        if self.goal.matches(&pair) {
            log::info!("{id} compares {} with {}, matching the goal", pair.low, pair.high);
            self.matches.push(id);
        } else if self.goal.touches(&pair) {
            log::debug!("{id} holds a goal value ({}, {})", pair.low, pair.high);
        }
        log::debug!(
            "{id} sends {} to {} and {} to {}",
            pair.low,
            self.reg.graph()[targets.low].id(),
            pair.high,
            self.reg.graph()[targets.high].id(),
        );

        self.processed += 1;
        self.pending.push((targets.high, pair.high));
        self.pending.push((targets.low, pair.low));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        while let Some((ix, value)) = self.pending.pop() {
            self.deliver(ix, value, Propagation::Enabled)?;
        }
        Ok(())
    }
}

impl Drained {
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// The first comparator whose pair matched the goal.
    pub fn goal_match(&self) -> Option<Id> {
        self.matches.first().copied()
    }

    /// Every comparator whose pair matched the goal, in processing order.
    pub fn matches(&self) -> &[Id] {
        &self.matches
    }

    /// The number of comparators processed while draining.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// The final state of every node.
    pub fn registry(&self) -> &Registry {
        &self.reg
    }

    /// The values received by the sink with the given id.
    ///
    /// Returns `None` if no sink exists for the id.
    pub fn sink(&self, id: Id) -> Option<&[Value]> {
        self.reg.get(id)?.as_sink().map(|s| s.values())
    }

    /// Every sink along with its values, in creation order.
    pub fn sinks(&self) -> impl Iterator<Item = (Id, &[Value])> {
        self.reg.sinks().map(|(_, s)| (s.id(), s.values()))
    }

    /// Comparators that still hold values.
    ///
    /// This is only non-empty for incomplete input, where some comparator
    /// never received its second value or was never wired.
    pub fn stranded(&self) -> Vec<Id> {
        self.reg
            .comparators()
            .filter(|(_, c)| !c.held().is_empty())
            .map(|(_, c)| c.id())
            .collect()
    }

    /// Summarise the drained network.
    pub fn report(&self) -> Report {
        let sinks = self
            .sinks()
            .map(|(id, values)| SinkReport {
                id,
                values: values.to_vec(),
            })
            .collect();
        Report {
            goal: self.goal,
            matches: self.matches.clone(),
            processed: self.processed,
            sinks,
            stranded: self.stranded(),
        }
    }
}
