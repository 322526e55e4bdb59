//! Combining the contents of a drained network into the final answers.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use sortnet_core::{Drained, Id, Report, Value};
use std::fmt;

/// Both answers, along with the full report they were derived from.
#[derive(Debug, Serialize)]
pub struct Answers {
    #[serde(flatten)]
    pub report: Report,
    /// The outputs multiplied together for `product`.
    pub product_of: Vec<u32>,
    pub product: Value,
}

impl Answers {
    pub fn new(drained: &Drained, outputs: &[u32]) -> Result<Self> {
        Ok(Answers {
            report: drained.report(),
            product_of: outputs.to_vec(),
            product: product(drained, outputs)?,
        })
    }
}

/// Multiply together the first value received by each of the given outputs.
pub fn product(drained: &Drained, outputs: &[u32]) -> Result<Value> {
    let mut product: Value = 1;
    for &index in outputs {
        let id = Id::output(index);
        let values = drained.sink(id).with_context(|| format!("no sink for {id}"))?;
        let Some(&value) = values.first() else {
            bail!("{id} received no values");
        };
        product = product
            .checked_mul(value)
            .with_context(|| format!("product overflowed at {id}"))?;
    }
    Ok(product)
}

impl fmt::Display for Answers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let goal = self.report.goal.pair();
        match self.report.matches.first() {
            Some(id) => writeln!(f, "{id} compares {} with {}", goal.low, goal.high)?,
            None => writeln!(f, "no bot compares {} with {}", goal.low, goal.high)?,
        }
        let outputs = self
            .product_of
            .iter()
            .map(|i| Id::output(*i).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "product of {outputs}: {}", self.product)
    }
}
