//! ASCII rendering of decoded circuits.
//!
//! Each circuit line becomes one text line: a role tag followed by the grid cells, each
//! padded with wire segments. A gate-count section follows after two blank lines.
//!
//! # Example
//!
//! ```
//! use revsynth::atom::Atom;
//! use revsynth::circuit::Circuit;
//! use revsynth::model::Model;
//! use revsynth::render::RenderConfig;
//!
//! let model = Model::new(2, [Atom::control(1, 0), Atom::not(0), Atom::not(1)]).unwrap();
//! let circuit = Circuit::decode(model, 1, 1).unwrap();
//! let text = circuit.render(&RenderConfig::default());
//! assert_eq!(
//!     text,
//!     "|i> -X--o-\n\
//!      |o> -X--X-\n\
//!      \n\
//!      \n\
//!      ===Gate Counts====\n\
//!      NOT gates: 2\n\
//!      CNOT gates: 1\n"
//! );
//! ```

use crate::circuit::{Cell, Circuit, LineRole};
use crate::histogram::GateCounts;

/// Symbols and labels used by [`Circuit::render`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Control dot (default: "o")
    pub control: &'static str,
    /// NOT target (default: "X")
    pub not: &'static str,
    /// Vertical connector (default: "|")
    pub pipe: &'static str,
    /// Plain wire, also used as padding around every cell (default: "-")
    pub wire: &'static str,
    /// Tag of input lines (default: "|i> ")
    pub input_tag: &'static str,
    /// Tag of ancilla lines (default: "|a> ")
    pub ancilla_tag: &'static str,
    /// Tag of output lines (default: "|o> ")
    pub output_tag: &'static str,
    /// Title of the gate-count section (default: "===Gate Counts====")
    pub counts_header: &'static str,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            control: "o",
            not: "X",
            pipe: "|",
            wire: "-",
            input_tag: "|i> ",
            ancilla_tag: "|a> ",
            output_tag: "|o> ",
            counts_header: "===Gate Counts====",
        }
    }
}

impl RenderConfig {
    fn symbol(&self, cell: Cell) -> &'static str {
        match cell {
            Cell::Wire => self.wire,
            Cell::Not => self.not,
            Cell::Control => self.control,
            Cell::Pipe => self.pipe,
        }
    }

    fn tag(&self, role: LineRole) -> &'static str {
        match role {
            LineRole::Input => self.input_tag,
            LineRole::Ancilla => self.ancilla_tag,
            LineRole::Output => self.output_tag,
        }
    }
}

impl Circuit {
    pub fn gate_counts(&self) -> GateCounts {
        GateCounts::from_circuit(self)
    }

    /// Draws only the grid, one text line per circuit line.
    pub fn render_grid(&self, config: &RenderConfig) -> String {
        let mut out = String::new();
        for (line, cells) in self.grid().rows().enumerate() {
            out.push_str(config.tag(self.role(line)));
            for &cell in cells {
                out.push_str(config.wire);
                out.push_str(config.symbol(cell));
                out.push_str(config.wire);
            }
            out.push('\n');
        }
        out
    }

    /// Draws the grid followed by the gate counts.
    pub fn render(&self, config: &RenderConfig) -> String {
        let mut out = self.render_grid(config);
        out.push_str("\n\n");
        out.push_str(config.counts_header);
        out.push('\n');
        out.push_str(&self.gate_counts().to_string());
        out
    }
}
