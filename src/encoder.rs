//! Encoding of reversible-circuit synthesis as a satisfiability instance.
//!
//! A circuit with `num_gates` lines is described by three families of atoms
//! (see [`atom`][crate::atom]):
//!
//! - `c[i][j]`: gate `i` is controlled by line `j`, forced false unless `j < i`,
//! - `n[i]`: line `i` carries an unconditional NOT,
//! - `v[i][t]`: the value on line `i` after gate `i` fires, for input pattern `t`.
//!
//! Gate `i` targets line `i` only and may only be controlled by lines above it, so the
//! circuit is evaluated in a single forward pass. For every line `i` and row `t`:
//!
//! ```text
//! propagated(i, t) = AND_{j < i} (v[j][t] | !c[i][j])
//! v[i][t]          = n[i] ^ propagated(i, t) [^ input_bit(t, i) if i < num_input_bits]
//! ```
//!
//! The first `num_input_bits` lines start out holding the row's input pattern, the last
//! `num_output_bits` lines are pinned to the truth table, and the rest are ancillas.

use log::{debug, info};
use varisat::CnfFormula;

use crate::atom::{Atom, AtomTable};
use crate::cnf::to_cnf;
use crate::error::{ConfigError, Result};
use crate::expr::{ExprArena, Idx};
use crate::table::{input_bit, TruthTable};

/// Options of a synthesis request.
#[derive(Debug, Clone, Default)]
pub struct SynthesisConfig {
    /// Accept gate counts too small to keep input and output lines apart.
    ///
    /// When `false` (default), `num_input_bits + num_output_bits > num_gates` is rejected
    /// before the oracle runs.
    pub allow_shared_lines: bool,
}

impl SynthesisConfig {
    pub fn with_allow_shared_lines(mut self, allow: bool) -> Self {
        self.allow_shared_lines = allow;
        self
    }
}

/// Builds the formula for one synthesis attempt.
#[derive(Debug)]
pub struct Encoder<'a> {
    table: &'a TruthTable,
    num_gates: usize,
    config: SynthesisConfig,
}

impl<'a> Encoder<'a> {
    pub fn new(table: &'a TruthTable, num_gates: usize) -> Self {
        Self {
            table,
            num_gates,
            config: SynthesisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks the line layout before anything is encoded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let num_gates = self.num_gates;
        let num_inputs = self.table.num_input_bits();
        let num_outputs = self.table.num_outputs();

        if num_gates == 0 {
            return Err(ConfigError::ZeroGates);
        }
        if num_outputs > num_gates {
            return Err(ConfigError::TooFewGatesForOutputs {
                num_gates,
                num_outputs,
            });
        }
        if num_inputs > num_gates {
            return Err(ConfigError::TooFewGatesForInputs {
                num_gates,
                num_inputs,
            });
        }
        if !self.config.allow_shared_lines && num_inputs + num_outputs > num_gates {
            return Err(ConfigError::SharedLines {
                num_gates,
                num_inputs,
                num_outputs,
            });
        }
        Ok(())
    }

    pub fn encode(self) -> Result<Encoding> {
        self.validate()?;

        let table = self.table;
        let num_gates = self.num_gates;
        let num_rows = table.num_rows();
        let num_input_bits = table.num_input_bits();
        let num_output_bits = table.num_outputs();
        info!(
            "Encoding {} rows ({} input bits, {} output bits) into {} gates",
            num_rows, num_input_bits, num_output_bits, num_gates
        );

        let atoms = AtomTable::new(num_gates, num_rows);
        let mut arena = ExprArena::new();
        let mut assertions = Vec::new();

        // Acyclicity: a gate is only controlled by lines strictly above it.
        for i in 0..num_gates {
            for j in i..num_gates {
                let c = arena.mk_term(Atom::control(i, j));
                assertions.push(arena.mk_not(c));
            }
        }

        // Output pinning.
        let first_output = num_gates - num_output_bits;
        for line in first_output..num_gates {
            for t in 0..num_rows {
                let v = arena.mk_term(Atom::value(line, t));
                let expected = arena.constant(table.output(t, line - first_output));
                assertions.push(arena.mk_eq(v, expected));
            }
        }

        // Gate evolution.
        for i in 0..num_gates {
            let n = arena.mk_term(Atom::not(i));
            for t in 0..num_rows {
                let conditions: Vec<Idx> = (1..=i)
                    .map(|count| {
                        let j = i - count;
                        let v = arena.mk_term(Atom::value(j, t));
                        let c = arena.mk_term(Atom::control(i, j));
                        let not_c = arena.mk_not(c);
                        arena.mk_or(v, not_c)
                    })
                    .collect();
                let propagated = arena.mk_and_many(conditions);

                let mut clause = arena.mk_xor(n, propagated);
                if i < num_input_bits {
                    let bit = arena.constant(input_bit(t, i, num_input_bits));
                    clause = arena.mk_xor(clause, bit);
                }

                let v = arena.mk_term(Atom::value(i, t));
                assertions.push(arena.mk_eq(v, clause));
            }
        }

        debug!(
            "encode: {} atoms, {} expression nodes, {} assertions",
            atoms.len(),
            arena.len(),
            assertions.len()
        );

        Ok(Encoding {
            atoms,
            arena,
            assertions,
            num_input_bits,
            num_output_bits,
        })
    }
}

/// The formula of one synthesis attempt, owned and consumed by a single oracle call.
#[derive(Debug)]
pub struct Encoding {
    atoms: AtomTable,
    arena: ExprArena<Atom>,
    assertions: Vec<Idx>,
    num_input_bits: usize,
    num_output_bits: usize,
}

impl Encoding {
    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    pub fn num_gates(&self) -> usize {
        self.atoms.num_lines()
    }

    pub fn num_input_bits(&self) -> usize {
        self.num_input_bits
    }

    pub fn num_output_bits(&self) -> usize {
        self.num_output_bits
    }

    pub fn num_assertions(&self) -> usize {
        self.assertions.len()
    }

    pub fn to_cnf(&self) -> CnfFormula {
        to_cnf(&self.arena, &self.atoms, &self.assertions)
    }

    /// Returns `true` if the assignment satisfies every constraint.
    pub fn holds<F>(&self, mut assign: F) -> bool
    where
        F: FnMut(Atom) -> bool,
    {
        self.assertions
            .iter()
            .all(|&root| self.arena.eval(root, |&atom| assign(atom)))
    }
}
