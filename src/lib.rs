//! # revsynth: SAT-based synthesis of reversible circuits
//!
//! **`revsynth`** finds a reversible circuit of multiply-controlled NOT gates (NOT, CNOT,
//! Toffoli, ...) that reproduces a given truth table, by encoding the search as a
//! satisfiability problem and handing it to a SAT solver.
//!
//! ## Circuit shape
//!
//! A circuit with `n` gates has exactly `n` lines. Gate `i` targets line `i` and may only be
//! controlled by lines `j < i`, so the circuit is acyclic by construction and evaluated in a
//! single pass. The first lines receive the input pattern, the last lines are read as the
//! outputs, and anything in between is an ancilla starting at 0.
//!
//! ## Basic Usage
//!
//! ```rust
//! use revsynth::encoder::SynthesisConfig;
//! use revsynth::oracle::VarisatOracle;
//! use revsynth::render::RenderConfig;
//! use revsynth::synth::synthesize;
//! use revsynth::table::TruthTable;
//!
//! // One input bit, one output bit: the output is the negated input.
//! let table = TruthTable::from_csv("0,1\n1,0\n").unwrap();
//!
//! let res = synthesize(&table, 2, &SynthesisConfig::default(), VarisatOracle).unwrap();
//! let circuit = res.solution().expect("satisfiable").decode().unwrap();
//! assert!(circuit.verify(&table).is_ok());
//!
//! println!("{}", circuit.render(&RenderConfig::default()));
//! ```
//!
//! ## Core Components
//!
//! - **[`encoder`]**: builds the constraints over the `c`/`v`/`n` [`atom`]s.
//! - **[`cnf`]**: turns them into clauses, see also [`expr`].
//! - **[`oracle`]**: the solver boundary.
//! - **[`synth`]**: one attempt per gate count, and a simple retry policy.
//! - **[`circuit`]**, **[`render`]**, **[`histogram`]**: decoding and drawing of a [`model`].
//! - **[`simulate`]**: checks a decoded circuit against its [`table`].

pub mod atom;
pub mod circuit;
pub mod cnf;
pub mod encoder;
pub mod error;
pub mod expr;
pub mod histogram;
pub mod model;
pub mod oracle;
pub mod render;
pub mod simulate;
pub mod synth;
pub mod table;
