//! Forward simulation of decoded circuits.
//!
//! Lines start out holding the row's input pattern (first `num_input_bits` lines) or zero
//! (all others). Gates then fire in index order: gate `i` first applies its unconditional
//! NOT, if any, then flips line `i` when all of its controls hold 1. A gate without
//! controls always flips its target.

use crate::circuit::Circuit;
use crate::error::ModelError;
use crate::table::{input_bit, TruthTable};

/// Line values before any gate fires, for input pattern `row`.
pub fn initial_state(num_lines: usize, num_input_bits: usize, row: usize) -> Vec<bool> {
    (0..num_lines)
        .map(|line| line < num_input_bits && input_bit(row, line, num_input_bits))
        .collect()
}

impl Circuit {
    /// Line values after every gate fired, for input pattern `row`.
    pub fn simulate(&self, row: usize) -> Vec<bool> {
        let model = self.model();
        let mut state = initial_state(self.num_lines(), self.num_input_bits(), row);
        for gate in 0..self.num_lines() {
            if model.has_not(gate) {
                state[gate] ^= true;
            }
            if model.controls_of(gate).all(|line| state[line]) {
                state[gate] ^= true;
            }
        }
        state
    }

    /// Output line values for input pattern `row`.
    pub fn outputs(&self, row: usize) -> Vec<bool> {
        let state = self.simulate(row);
        state[self.num_lines() - self.num_output_bits()..].to_vec()
    }

    /// Checks that the circuit reproduces every row of the table on its output lines.
    pub fn verify(&self, table: &TruthTable) -> Result<(), ModelError> {
        if table.num_outputs() != self.num_output_bits() {
            return Err(ModelError::DimensionMismatch {
                expected: table.num_outputs(),
                found: self.num_output_bits(),
            });
        }
        match (0..table.num_rows()).find(|&row| self.outputs(row) != table.row(row)) {
            Some(row) => Err(ModelError::Unfaithful { row }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::atom::Atom;
    use crate::model::Model;

    #[test]
    fn test_initial_state() {
        assert_eq!(initial_state(4, 2, 2), [true, false, false, false]);
        assert_eq!(initial_state(4, 2, 3), [true, true, false, false]);
        assert_eq!(initial_state(2, 0, 0), [false, false]);
    }

    #[test]
    fn test_simulate_not_gate() {
        // Line 0: input, the NOT cancels its unconditional flip.
        // Line 1: starts at 0, NOT, then flipped when line 0 is 1.
        let model = Model::new(2, [Atom::not(0), Atom::not(1), Atom::control(1, 0)]).unwrap();
        let circuit = Circuit::decode(model, 1, 1).unwrap();
        assert_eq!(circuit.simulate(0), [false, true]);
        assert_eq!(circuit.simulate(1), [true, false]);

        let table = TruthTable::from_csv("0,1\n1,0\n").unwrap();
        assert_eq!(circuit.verify(&table), Ok(()));
    }

    #[test]
    fn test_simulate_toffoli() {
        let model = Model::new(
            3,
            [
                Atom::not(0),
                Atom::not(1),
                Atom::control(1, 0),
                Atom::control(2, 0),
                Atom::control(2, 1),
            ],
        )
        .unwrap();
        let circuit = Circuit::decode(model, 2, 1).unwrap();
        // Line 1 ends up as x1 whenever x0 = 1, so line 2 = x0 & x1.
        let actual: Vec<bool> = (0..4).map(|row| circuit.outputs(row)[0]).collect();
        assert_eq!(actual, [false, false, false, true]);
        assert_eq!(circuit.simulate(3), [true, true, true]);
    }

    #[test]
    fn test_verify_reports_first_bad_row() {
        let model = Model::new(2, [Atom::not(0), Atom::control(1, 0)]).unwrap();
        let circuit = Circuit::decode(model, 1, 1).unwrap();
        // Without n_1 the output copies the input instead of negating it.
        let table = TruthTable::from_csv("0,1\n1,0\n").unwrap();
        assert_eq!(circuit.verify(&table), Err(ModelError::Unfaithful { row: 0 }));

        let wide = TruthTable::from_csv("0,1,1\n1,0,0\n").unwrap();
        assert_eq!(
            circuit.verify(&wide),
            Err(ModelError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
