//! Error taxonomy for synthesis.
//!
//! Three families are kept apart so that callers can tell them apart in any report:
//! configuration errors (rejected before the oracle runs), malformed models (the
//! encoder/decoder contract was violated), and failures of the oracle itself.
//! An unsatisfiable instance is *not* an error, see [`Synthesis`][crate::synth::Synthesis].

use thiserror::Error;

use crate::atom::Atom;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("malformed model: {0}")]
    Model(#[from] ModelError),
    #[error("satisfiability oracle failed: {0}")]
    Oracle(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Invalid truth table or synthesis parameters.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("truth table has no rows")]
    EmptyTable,
    #[error("truth table has no output columns")]
    NoOutputs,
    #[error("row {row} has {found} output columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("row {row}, column {column}: expected 0 or 1, got {value:?}")]
    InvalidCell { row: usize, column: usize, value: String },
    #[error("number of gates must be positive")]
    ZeroGates,
    #[error("{num_gates} gates cannot carry {num_outputs} output lines")]
    TooFewGatesForOutputs { num_gates: usize, num_outputs: usize },
    #[error("{num_gates} gates cannot carry {num_inputs} input lines")]
    TooFewGatesForInputs { num_gates: usize, num_inputs: usize },
    #[error("{num_inputs} input and {num_outputs} output lines do not fit into {num_gates} gates without sharing lines")]
    SharedLines {
        num_gates: usize,
        num_inputs: usize,
        num_outputs: usize,
    },
    #[error("empty gate range {from}..={to}")]
    InvalidGateRange { from: usize, to: usize },
}

/// The oracle's answer could not be turned into a circuit.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ModelError {
    #[error("cannot parse atom {0:?}")]
    InvalidAtom(String),
    #[error("value atom {0} does not belong to a circuit description")]
    ValueAtom(Atom),
    #[error("model describes {found} lines, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("gate {gate} is controlled by line {line}, which is not above it")]
    NonTriangular { gate: usize, line: usize },
    #[error("decoded circuit does not reproduce the truth table at row {row}")]
    Unfaithful { row: usize },
}
