//! Structured identities of the propositional atoms used by the encoding.
//!
//! Every atom of a synthesis instance is one of three families:
//!
//! - `c_i_j` ([`Atom::Control`]): gate `i` is controlled by line `j`,
//! - `v_i_t` ([`Atom::Value`]): the value carried by line `i` on input pattern `t`,
//! - `n_i` ([`Atom::Not`]): line `i` carries an unconditional NOT.
//!
//! The textual names only exist at the boundary (result files, logs). Internally atoms are
//! compared by their numeric indices, so `c_10_2` sorts after `c_9_1`, and are mapped to
//! solver variables through a dense [`AtomTable`].

use std::fmt;
use std::str::FromStr;

use varisat::Var;

use crate::error::ModelError;

/// A propositional atom of the circuit encoding.
///
/// The derived ordering groups atoms by family (controls, then NOTs, then values)
/// and orders each family by its indices.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Atom {
    /// Gate `gate` is controlled by the value currently on `line`.
    Control { gate: usize, line: usize },
    /// Line `line` carries an unconditional NOT.
    Not { line: usize },
    /// The value carried by `line` when the circuit runs on input pattern `row`.
    Value { line: usize, row: usize },
}

impl Atom {
    pub fn control(gate: usize, line: usize) -> Self {
        Atom::Control { gate, line }
    }

    pub fn not(line: usize) -> Self {
        Atom::Not { line }
    }

    pub fn value(line: usize, row: usize) -> Self {
        Atom::Value { line, row }
    }

    /// Returns the line this atom describes.
    ///
    /// For a control atom this is the *controlled* gate, not the controlling line.
    pub fn line(self) -> usize {
        match self {
            Atom::Control { gate, .. } => gate,
            Atom::Not { line } => line,
            Atom::Value { line, .. } => line,
        }
    }

    /// Returns `true` for the families that describe the physical circuit (`c` and `n`).
    pub fn is_structural(self) -> bool {
        !matches!(self, Atom::Value { .. })
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Control { gate, line } => write!(f, "c_{}_{}", gate, line),
            Atom::Not { line } => write!(f, "n_{}", line),
            Atom::Value { line, row } => write!(f, "v_{}_{}", line, row),
        }
    }
}

impl FromStr for Atom {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidAtom(s.to_string());

        let mut parts = s.split('_');
        let tag = parts.next().ok_or_else(invalid)?;
        let indices = parts
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<usize>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        match (tag, indices.as_slice()) {
            ("c", &[gate, line]) => Ok(Atom::Control { gate, line }),
            ("n", &[line]) => Ok(Atom::Not { line }),
            ("v", &[line, row]) => Ok(Atom::Value { line, row }),
            _ => Err(invalid()),
        }
    }
}

/// Dense bijection between the atoms of one instance and solver variables.
///
/// Layout: all `c` atoms first (row-major by gate), then `v` atoms (row-major by line),
/// then `n` atoms. Variables past [`len`][AtomTable::len] are free for auxiliary use.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AtomTable {
    num_lines: usize,
    num_rows: usize,
}

impl AtomTable {
    pub fn new(num_lines: usize, num_rows: usize) -> Self {
        Self { num_lines, num_rows }
    }

    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Total number of atoms.
    pub fn len(&self) -> usize {
        self.not_offset() + self.num_lines
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn value_offset(&self) -> usize {
        self.num_lines * self.num_lines
    }

    fn not_offset(&self) -> usize {
        self.value_offset() + self.num_lines * self.num_rows
    }

    /// Returns `true` if the atom's indices fit this instance.
    pub fn contains(&self, atom: Atom) -> bool {
        match atom {
            Atom::Control { gate, line } => gate < self.num_lines && line < self.num_lines,
            Atom::Not { line } => line < self.num_lines,
            Atom::Value { line, row } => line < self.num_lines && row < self.num_rows,
        }
    }

    /// Returns the dense index of the atom.
    ///
    /// # Panics
    ///
    /// Panics if the atom does not belong to this instance.
    pub fn index(&self, atom: Atom) -> usize {
        assert!(self.contains(atom), "Atom {} is out of range for {:?}", atom, self);
        match atom {
            Atom::Control { gate, line } => gate * self.num_lines + line,
            Atom::Value { line, row } => self.value_offset() + line * self.num_rows + row,
            Atom::Not { line } => self.not_offset() + line,
        }
    }

    pub fn var(&self, atom: Atom) -> Var {
        Var::from_index(self.index(atom))
    }

    /// Maps a solver variable back to its atom, or `None` for auxiliary variables.
    pub fn atom(&self, var: Var) -> Option<Atom> {
        let index = var.index();
        if index < self.value_offset() {
            Some(Atom::control(index / self.num_lines, index % self.num_lines))
        } else if index < self.not_offset() {
            let index = index - self.value_offset();
            Some(Atom::value(index / self.num_rows, index % self.num_rows))
        } else if index < self.len() {
            Some(Atom::not(index - self.not_offset()))
        } else {
            None
        }
    }

    /// Iterates over all atoms in variable order.
    pub fn iter(&self) -> impl Iterator<Item = Atom> + '_ {
        (0..self.len()).filter_map(move |index| self.atom(Var::from_index(index)))
    }
}
