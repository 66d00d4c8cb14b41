//! Synthesis requests: encode, ask the oracle, keep the circuit-describing atoms.
//!
//! One call of [`synthesize`] is one attempt for one gate count. Each attempt builds its
//! own [`Encoding`] and hands its formula to the oracle by value, so nothing leaks from
//! one attempt into the next. Retrying with more gates is the caller's decision;
//! [`search`] implements the simplest such policy.

use std::ops::RangeInclusive;

use log::info;

use crate::circuit::Circuit;
use crate::encoder::{Encoder, Encoding, SynthesisConfig};
use crate::error::{ConfigError, ModelError, Result};
use crate::model::Model;
use crate::oracle::{Oracle, Verdict};
use crate::table::TruthTable;

/// Outcome of a synthesis attempt. Unsatisfiability is a regular result, not an error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Synthesis {
    Satisfiable(Solution),
    Unsatisfiable,
}

impl Synthesis {
    pub fn is_sat(&self) -> bool {
        matches!(self, Synthesis::Satisfiable(_))
    }

    pub fn solution(self) -> Option<Solution> {
        match self {
            Synthesis::Satisfiable(solution) => Some(solution),
            Synthesis::Unsatisfiable => None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Solution {
    pub model: Model,
    pub num_input_bits: usize,
    pub num_output_bits: usize,
}

impl Solution {
    pub fn num_gates(&self) -> usize {
        self.model.num_lines()
    }

    pub fn decode(&self) -> Result<Circuit, ModelError> {
        Circuit::decode(self.model.clone(), self.num_input_bits, self.num_output_bits)
    }
}

impl Encoding {
    /// Submits the formula to the oracle and filters the answer down to a [`Model`].
    pub fn solve<O: Oracle>(self, mut oracle: O) -> Result<Synthesis> {
        let formula = self.to_cnf();
        match oracle.solve(formula)? {
            Verdict::Unsat => {
                info!("{} gates: not satisfiable", self.num_gates());
                Ok(Synthesis::Unsatisfiable)
            }
            Verdict::Sat(assignment) => {
                info!("{} gates: satisfiable", self.num_gates());
                let model = Model::from_assignment(self.atoms(), &assignment)?;
                Ok(Synthesis::Satisfiable(Solution {
                    model,
                    num_input_bits: self.num_input_bits(),
                    num_output_bits: self.num_output_bits(),
                }))
            }
        }
    }
}

/// Runs one synthesis attempt with exactly `num_gates` lines.
pub fn synthesize<O: Oracle>(
    table: &TruthTable,
    num_gates: usize,
    config: &SynthesisConfig,
    oracle: O,
) -> Result<Synthesis> {
    Encoder::new(table, num_gates)
        .with_config(config.clone())
        .encode()?
        .solve(oracle)
}

/// Tries every gate count in `gates`, in increasing order, until one is satisfiable.
///
/// The first count must satisfy the encoder's preconditions; it is not silently raised.
pub fn search<O: Oracle>(
    table: &TruthTable,
    gates: RangeInclusive<usize>,
    config: &SynthesisConfig,
    mut oracle: O,
) -> Result<Synthesis> {
    let (from, to) = (*gates.start(), *gates.end());
    if from > to {
        return Err(ConfigError::InvalidGateRange { from, to }.into());
    }
    for num_gates in gates {
        info!("Trying {} gates", num_gates);
        if let Synthesis::Satisfiable(solution) = synthesize(table, num_gates, config, &mut oracle)? {
            return Ok(Synthesis::Satisfiable(solution));
        }
    }
    Ok(Synthesis::Unsatisfiable)
}
