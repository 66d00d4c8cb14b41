//! Gate-type statistics of a decoded circuit.
//!
//! Every gate column `i >= 1` counts as one `C^k NOT` gate, where `k` is the number of
//! control dots in the column. Unconditional NOTs from column 0 are added to the plain
//! `NOT` bucket. Column 0's own target is not counted as a separate gate.

use std::fmt;

use crate::circuit::Circuit;

/// A multiply-controlled NOT with a given number of controls.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GateType {
    controls: usize,
}

impl GateType {
    pub fn new(controls: usize) -> Self {
        Self { controls }
    }

    pub fn not() -> Self {
        Self::new(0)
    }

    pub fn controls(self) -> usize {
        self.controls
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.controls {
            write!(f, "C")?;
        }
        write!(f, "NOT")
    }
}

/// Occurrence counts per gate type, by descending count.
///
/// Ties keep the order in which the types were first met (gate columns left to right,
/// with the plain `NOT` bucket placed where it first occurred, or last).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GateCounts {
    entries: Vec<(GateType, usize)>,
}

impl GateCounts {
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut entries: Vec<(GateType, usize)> = Vec::new();
        let mut bump = |gate: GateType, count: usize| match entries.iter_mut().find(|(g, _)| *g == gate) {
            Some((_, total)) => *total += count,
            None => entries.push((gate, count)),
        };

        for gate in 1..circuit.num_lines() {
            bump(GateType::new(circuit.num_controls(gate)), 1);
        }
        bump(GateType::not(), circuit.model().nots().count());

        // Stable: equal counts keep their first-encountered order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    pub fn entries(&self) -> &[(GateType, usize)] {
        &self.entries
    }

    pub fn get(&self, gate: GateType) -> usize {
        self.entries
            .iter()
            .find(|(g, _)| *g == gate)
            .map_or(0, |&(_, count)| count)
    }

    /// Total number of gates.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for GateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (gate, count) in &self.entries {
            writeln!(f, "{} gates: {}", gate, count)?;
        }
        Ok(())
    }
}
