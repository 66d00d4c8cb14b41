//! The circuit-describing part of a satisfying assignment.
//!
//! A [`Model`] keeps only the *true* atoms of the `c` and `n` families. Value atoms are
//! solver-internal bookkeeping and never enter a model. The textual form (the synthesis
//! result file) lists one atom name per line in atom order:
//!
//! ```text
//! c_1_0
//! c_3_2
//! n_0
//! n_3
//! ```

use std::collections::BTreeSet;
use std::fmt;

use varisat::Lit;

use crate::atom::{Atom, AtomTable};
use crate::error::ModelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Model {
    num_lines: usize,
    atoms: BTreeSet<Atom>,
}

impl Model {
    /// Creates a model of a circuit with `num_lines` lines from its true atoms.
    ///
    /// Fails if an atom is a value atom, refers to a line outside `0..num_lines`,
    /// or controls a gate by a line that is not above it.
    pub fn new(num_lines: usize, atoms: impl IntoIterator<Item = Atom>) -> Result<Self, ModelError> {
        let atoms: BTreeSet<Atom> = atoms.into_iter().collect();
        for &atom in &atoms {
            let highest = match atom {
                Atom::Value { .. } => return Err(ModelError::ValueAtom(atom)),
                Atom::Not { line } => line,
                Atom::Control { gate, line } => {
                    if line >= gate {
                        return Err(ModelError::NonTriangular { gate, line });
                    }
                    gate
                }
            };
            if highest >= num_lines {
                return Err(ModelError::DimensionMismatch {
                    expected: num_lines,
                    found: highest + 1,
                });
            }
        }
        Ok(Self { num_lines, atoms })
    }

    /// Extracts the model from an oracle assignment over the atoms of `table`.
    pub fn from_assignment(table: &AtomTable, assignment: &[Lit]) -> Result<Self, ModelError> {
        let atoms = assignment
            .iter()
            .filter(|lit| lit.is_positive())
            .filter_map(|lit| table.atom(lit.var()))
            .filter(|atom| atom.is_structural());
        Self::new(table.num_lines(), atoms)
    }

    /// Parses a result listing, one atom name per line, in any order.
    pub fn parse(text: &str, num_lines: usize) -> Result<Self, ModelError> {
        let atoms = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::parse::<Atom>)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(num_lines, atoms)
    }

    /// Number of lines implied by the listing alone: highest referenced line plus one.
    pub fn referenced_lines(&self) -> usize {
        self.atoms.iter().map(|a| a.line() + 1).max().unwrap_or(0)
    }
}

impl Model {
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.atoms.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn has_not(&self, line: usize) -> bool {
        self.atoms.contains(&Atom::not(line))
    }

    pub fn has_control(&self, gate: usize, line: usize) -> bool {
        self.atoms.contains(&Atom::control(gate, line))
    }

    /// Lines carrying an unconditional NOT, in increasing order.
    pub fn nots(&self) -> impl Iterator<Item = usize> + '_ {
        self.atoms.iter().filter_map(|atom| match *atom {
            Atom::Not { line } => Some(line),
            _ => None,
        })
    }

    /// All `(gate, line)` control pairs, ordered by gate.
    pub fn controls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.atoms.iter().filter_map(|atom| match *atom {
            Atom::Control { gate, line } => Some((gate, line)),
            _ => None,
        })
    }

    /// Control lines of a single gate, in increasing order.
    pub fn controls_of(&self, gate: usize) -> impl Iterator<Item = usize> + '_ {
        self.controls()
            .filter(move |&(g, _)| g == gate)
            .map(|(_, line)| line)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in &self.atoms {
            writeln!(f, "{}", atom)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_parse_sorts_numerically() {
        let model = Model::parse("n_10\nc_10_2\nc_9_1\n\nn_2\n", 11).unwrap();
        assert_eq!(model.to_string(), "c_9_1\nc_10_2\nn_2\nn_10\n");
        assert_eq!(model.nots().collect::<Vec<_>>(), [2, 10]);
        assert_eq!(model.controls().collect::<Vec<_>>(), [(9, 1), (10, 2)]);
        assert_eq!(model.referenced_lines(), 11);
    }

    #[test]
    fn test_listing_roundtrip() {
        let model = Model::new(4, [Atom::control(3, 0), Atom::control(3, 2), Atom::not(1)]).unwrap();
        let parsed = Model::parse(&model.to_string(), 4).unwrap();
        assert_eq!(parsed, model);
        assert!(parsed.has_control(3, 2));
        assert!(!parsed.has_control(2, 3));
        assert!(parsed.has_not(1));
        assert_eq!(parsed.controls_of(3).collect::<Vec<_>>(), [0, 2]);
    }

    #[test]
    fn test_rejects_value_atoms() {
        assert_eq!(
            Model::parse("n_0\nv_0_1\n", 2),
            Err(ModelError::ValueAtom(Atom::value(0, 1)))
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Model::parse("c_4_1\n", 3),
            Err(ModelError::DimensionMismatch {
                expected: 3,
                found: 5
            })
        );
        assert_eq!(
            Model::parse("n_3\n", 3),
            Err(ModelError::DimensionMismatch {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn test_rejects_non_triangular() {
        assert_eq!(
            Model::parse("c_1_1\n", 3),
            Err(ModelError::NonTriangular { gate: 1, line: 1 })
        );
        assert_eq!(
            Model::parse("c_0_2\n", 3),
            Err(ModelError::NonTriangular { gate: 0, line: 2 })
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            Model::parse("c_1_0\nhello\n", 3),
            Err(ModelError::InvalidAtom("hello".to_string()))
        );
    }

    #[test]
    fn test_from_assignment_filters() {
        let table = AtomTable::new(2, 2);
        let assignment = vec![
            Lit::positive(table.var(Atom::control(1, 0))),
            Lit::negative(table.var(Atom::control(0, 0))),
            Lit::positive(table.var(Atom::value(0, 1))),
            Lit::positive(table.var(Atom::not(1))),
            Lit::negative(table.var(Atom::not(0))),
            // Auxiliary variable past the atom range.
            Lit::positive(varisat::Var::from_index(table.len() + 3)),
        ];
        let model = Model::from_assignment(&table, &assignment).unwrap();
        assert_eq!(model.atoms().collect::<Vec<_>>(), [Atom::control(1, 0), Atom::not(1)]);
        assert_eq!(model.num_lines(), 2);
    }
}
