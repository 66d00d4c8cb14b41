//! Truth tables of multi-output boolean functions.
//!
//! A table is an ordered list of rows, each a fixed-width tuple of output bits.
//! The input pattern of a row is implicit: row `t` stands for the binary representation
//! of `t`, most-significant bit first, zero-padded to [`num_input_bits`][TruthTable::num_input_bits]
//! bits. The row count need not be a power of two.
//!
//! # Example
//!
//! ```
//! use revsynth::table::TruthTable;
//!
//! let table = TruthTable::from_csv("00,1,1\n01,1,0\n10,1,1\n11,0,1\n").unwrap();
//! assert_eq!(table.num_rows(), 4);
//! assert_eq!(table.num_outputs(), 2);
//! assert_eq!(table.num_input_bits(), 2);
//! assert!(table.input_bit(2, 0));
//! assert!(!table.input_bit(2, 1));
//! ```

use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, Result};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    rows: Vec<Vec<bool>>,
    num_outputs: usize,
}

impl TruthTable {
    /// Creates a truth table from its rows of output bits.
    ///
    /// The table must have at least one row and one output column, and all rows
    /// must have the same width.
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, ConfigError> {
        let num_outputs = rows.first().ok_or(ConfigError::EmptyTable)?.len();
        if num_outputs == 0 {
            return Err(ConfigError::NoOutputs);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != num_outputs)
        {
            return Err(ConfigError::RaggedRow {
                row,
                expected: num_outputs,
                found,
            });
        }
        Ok(Self { rows, num_outputs })
    }

    /// Parses comma-separated rows.
    ///
    /// Column 0 is a label for the input pattern and is ignored: inputs are derived from
    /// the row position. Columns 1.. are output bits (`0` or `1`). Blank lines are skipped.
    pub fn from_csv(text: &str) -> Result<Self, ConfigError> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let row = rows.len();
            let bits = line
                .split(',')
                .skip(1)
                .enumerate()
                .map(|(i, cell)| match cell.trim() {
                    "0" => Ok(false),
                    "1" => Ok(true),
                    other => Err(ConfigError::InvalidCell {
                        row,
                        column: i + 1,
                        value: other.to_string(),
                    }),
                })
                .collect::<Result<Vec<bool>, _>>()?;
            rows.push(bits);
        }
        Self::new(rows)
    }

    /// Reads a CSV truth table from a file.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_csv(&text)?)
    }
}

impl TruthTable {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Number of bits needed to index every row: `ceil(log2(num_rows))`.
    pub fn num_input_bits(&self) -> usize {
        let rows = self.rows.len();
        if rows <= 1 {
            0
        } else {
            (usize::BITS - (rows - 1).leading_zeros()) as usize
        }
    }

    /// Output bit `output` of row `row`.
    pub fn output(&self, row: usize, output: usize) -> bool {
        self.rows[row][output]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.rows[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Input bit `bit` of row `row`, where bit 0 is the most significant.
    pub fn input_bit(&self, row: usize, bit: usize) -> bool {
        input_bit(row, bit, self.num_input_bits())
    }
}

/// Bit `bit` (0 = most significant) of `row` zero-padded to `width` bits.
pub fn input_bit(row: usize, bit: usize, width: usize) -> bool {
    assert!(bit < width, "Input bit {} is out of range for width {}", bit, width);
    (row >> (width - 1 - bit)) & 1 == 1
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TruthTable")
            .field("rows", &self.num_rows())
            .field("inputs", &self.num_input_bits())
            .field("outputs", &self.num_outputs)
            .finish()
    }
}

impl fmt::Display for TruthTable {
    /// Formats the table back into its CSV form, with binary input labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.num_input_bits();
        for (t, row) in self.rows.iter().enumerate() {
            if width > 0 {
                write!(f, "{:0width$b}", t, width = width)?;
            } else {
                write!(f, "0")?;
            }
            for &bit in row {
                write!(f, ",{}", bit as u8)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
