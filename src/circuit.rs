//! Decoding of a [`Model`] into a drawable gate matrix.
//!
//! The circuit is drawn as an `n x n` [`Grid`]: row `r` is circuit line `r`, column `i` is
//! gate `i`. Gate `i` always targets line `i`, so its target marker sits on the diagonal.
//! A control of gate `i` by line `j` is a dot at `(j, i)` (note the transposition: the
//! *controlling* line is the row), and cells between a dot and the target are pipes.
//! Unconditional NOTs (`n[i]`) are drawn in column 0 of row `i`.

use std::ops::{Index, IndexMut};

use crate::error::ModelError;
use crate::model::Model;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    /// Plain wire, nothing happens.
    Wire,
    /// NOT target.
    Not,
    /// Control dot.
    Control,
    /// Vertical wire passing a control down to its target.
    Pipe,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LineRole {
    Input,
    Ancilla,
    Output,
}

impl LineRole {
    /// Role of `line` in a circuit of `num_lines` lines.
    ///
    /// When inputs and outputs overlap, the output role wins.
    pub fn classify(line: usize, num_lines: usize, num_inputs: usize, num_outputs: usize) -> Self {
        if line + num_outputs >= num_lines {
            LineRole::Output
        } else if line < num_inputs {
            LineRole::Input
        } else {
            LineRole::Ancilla
        }
    }
}

/// Square matrix of cells, stored row-major.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Wire; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).map(move |row| self[(row, col)])
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.size && col < self.size, "Cell ({}, {}) is out of range", row, col);
        &self.cells[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.size && col < self.size, "Cell ({}, {}) is out of range", row, col);
        &mut self.cells[row * self.size + col]
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Circuit {
    model: Model,
    grid: Grid,
    num_input_bits: usize,
    num_output_bits: usize,
}

impl Circuit {
    /// Lays out `model` on its grid.
    ///
    /// Fails if the circuit has fewer lines than the requested input or output lines.
    pub fn decode(model: Model, num_input_bits: usize, num_output_bits: usize) -> Result<Self, ModelError> {
        let n = model.num_lines();
        for bits in [num_input_bits, num_output_bits] {
            if bits > n {
                return Err(ModelError::DimensionMismatch { expected: n, found: bits });
            }
        }

        let mut grid = Grid::new(n);

        for line in model.nots() {
            grid[(line, 0)] = Cell::Not;
        }
        for i in 0..n {
            grid[(i, i)] = Cell::Not;
        }
        for (gate, line) in model.controls() {
            grid[(line, gate)] = Cell::Control;
        }

        // Pipes only run above the target, down from the topmost dot.
        for col in 1..n {
            let mut seen_control = false;
            for row in 0..col {
                match grid[(row, col)] {
                    Cell::Control => seen_control = true,
                    Cell::Wire if seen_control => grid[(row, col)] = Cell::Pipe,
                    _ => {}
                }
            }
        }

        Ok(Self {
            model,
            grid,
            num_input_bits,
            num_output_bits,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn num_lines(&self) -> usize {
        self.grid.size()
    }

    pub fn num_input_bits(&self) -> usize {
        self.num_input_bits
    }

    pub fn num_output_bits(&self) -> usize {
        self.num_output_bits
    }

    pub fn role(&self, line: usize) -> LineRole {
        LineRole::classify(line, self.num_lines(), self.num_input_bits, self.num_output_bits)
    }

    /// Number of control dots in the column of `gate`.
    pub fn num_controls(&self, gate: usize) -> usize {
        self.grid.column(gate).filter(|&cell| cell == Cell::Control).count()
    }
}
