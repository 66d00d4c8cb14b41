//! Tseitin translation of asserted expressions into CNF.
//!
//! Atoms keep the variables assigned to them by the [`AtomTable`]; every internal
//! node reachable from an assertion gets a fresh auxiliary variable placed after them.
//! Top-level equivalences (`a == b`) are asserted directly, without an auxiliary variable.

use std::io::Write;

use log::debug;
use varisat::{CnfFormula, ExtendFormula, Lit, Var};

use crate::atom::{Atom, AtomTable};
use crate::expr::{Expr, ExprArena, Idx};

struct Tseitin<'a> {
    arena: &'a ExprArena<Atom>,
    table: &'a AtomTable,
    formula: CnfFormula,
    lits: Vec<Option<Lit>>,
    next_var: usize,
    true_lit: Option<Lit>,
}

impl<'a> Tseitin<'a> {
    fn new(arena: &'a ExprArena<Atom>, table: &'a AtomTable) -> Self {
        Self {
            arena,
            table,
            formula: CnfFormula::new(),
            lits: vec![None; arena.len()],
            next_var: table.len(),
            true_lit: None,
        }
    }

    fn fresh(&mut self) -> Lit {
        let var = Var::from_index(self.next_var);
        self.next_var += 1;
        Lit::positive(var)
    }

    fn true_lit(&mut self) -> Lit {
        if let Some(t) = self.true_lit {
            return t;
        }
        let t = self.fresh();
        self.formula.add_clause(&[t]);
        self.true_lit = Some(t);
        t
    }

    /// Marks every node needed to express the assertions.
    fn reachable(&self, assertions: &[Idx]) -> Vec<bool> {
        let mut marked = vec![false; self.arena.len()];
        for &root in assertions {
            match self.arena.get(root) {
                Expr::Eq(a, b) => {
                    marked[a.index()] = true;
                    marked[b.index()] = true;
                }
                _ => marked[root.index()] = true,
            }
        }
        for (idx, expr) in self.arena.iter().rev() {
            if marked[idx.index()] {
                expr.fmap_ref(|child| marked[child.index()] = true);
            }
        }
        marked
    }

    fn lit(&self, idx: Idx) -> Lit {
        self.lits[idx.index()].unwrap_or_else(|| panic!("node {:?} was not translated", idx))
    }

    fn translate(&mut self, idx: Idx) {
        let arena = self.arena;
        let lit = match arena.get(idx).fmap_ref(|&child| self.lit(child)) {
            Expr::Const(true) => self.true_lit(),
            Expr::Const(false) => !self.true_lit(),
            Expr::Term(&atom) => Lit::positive(self.table.var(atom)),
            Expr::Not(a) => !a,
            Expr::And(a, b) => {
                let x = self.fresh();
                self.formula.add_clause(&[!x, a]);
                self.formula.add_clause(&[!x, b]);
                self.formula.add_clause(&[x, !a, !b]);
                x
            }
            Expr::Or(a, b) => {
                let x = self.fresh();
                self.formula.add_clause(&[x, !a]);
                self.formula.add_clause(&[x, !b]);
                self.formula.add_clause(&[!x, a, b]);
                x
            }
            Expr::Xor(a, b) => {
                let x = self.fresh();
                self.formula.add_clause(&[!x, a, b]);
                self.formula.add_clause(&[!x, !a, !b]);
                self.formula.add_clause(&[x, !a, b]);
                self.formula.add_clause(&[x, a, !b]);
                x
            }
            Expr::Eq(a, b) => {
                let x = self.fresh();
                self.formula.add_clause(&[!x, !a, b]);
                self.formula.add_clause(&[!x, a, !b]);
                self.formula.add_clause(&[x, a, b]);
                self.formula.add_clause(&[x, !a, !b]);
                x
            }
        };
        self.lits[idx.index()] = Some(lit);
    }

    fn assert(&mut self, root: Idx) {
        match *self.arena.get(root) {
            Expr::Eq(a, b) => {
                let a = self.lit(a);
                let b = self.lit(b);
                self.formula.add_clause(&[!a, b]);
                self.formula.add_clause(&[a, !b]);
            }
            _ => {
                let x = self.lit(root);
                self.formula.add_clause(&[x]);
            }
        }
    }
}

/// Builds the CNF formula asserting every expression in `assertions`.
pub fn to_cnf(arena: &ExprArena<Atom>, table: &AtomTable, assertions: &[Idx]) -> CnfFormula {
    let mut tseitin = Tseitin::new(arena, table);

    let marked = tseitin.reachable(assertions);
    for (idx, _) in arena.iter() {
        if marked[idx.index()] {
            tseitin.translate(idx);
        }
    }
    for &root in assertions {
        tseitin.assert(root);
    }

    debug!(
        "to_cnf: {} atoms, {} auxiliary variables, {} clauses",
        table.len(),
        tseitin.next_var - table.len(),
        tseitin.formula.len()
    );
    tseitin.formula
}

/// Writes the formula in DIMACS CNF format.
pub fn write_dimacs<W: Write>(formula: &CnfFormula, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "p cnf {} {}", formula.var_count(), formula.len())?;
    for clause in formula.iter() {
        for lit in clause {
            write!(writer, "{} ", lit.to_dimacs())?;
        }
        writeln!(writer, "0")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;
    use varisat::Solver;

    fn solve(formula: &CnfFormula) -> Option<Vec<Lit>> {
        let mut solver = Solver::new();
        solver.add_formula(formula);
        if solver.solve().unwrap() {
            solver.model()
        } else {
            None
        }
    }

    #[test]
    fn test_equivalence_is_enforced() {
        let table = AtomTable::new(2, 1);
        let mut arena = ExprArena::new();
        let n0 = arena.mk_term(Atom::not(0));
        let n1 = arena.mk_term(Atom::not(1));
        let v0 = arena.mk_term(Atom::value(0, 0));
        let x = arena.mk_xor(n0, n1);
        let eq = arena.mk_eq(v0, x);
        let one = arena.one();
        let pin = arena.mk_eq(v0, one);
        let pin_n0 = arena.mk_not(n0);

        let formula = to_cnf(&arena, &table, &[eq, pin, pin_n0]);
        let model = solve(&formula).expect("satisfiable");
        assert!(model.contains(&Lit::positive(table.var(Atom::not(1)))));
        assert!(model.contains(&Lit::negative(table.var(Atom::not(0)))));
        assert!(model.contains(&Lit::positive(table.var(Atom::value(0, 0)))));
    }

    #[test]
    fn test_false_assertion_is_unsat() {
        let table = AtomTable::new(1, 1);
        let mut arena = ExprArena::new();
        let x = arena.mk_term(Atom::not(0));
        let not_x = arena.mk_not(x);
        let contradiction = arena.mk_and(x, not_x);

        let formula = to_cnf(&arena, &table, &[contradiction]);
        assert_eq!(solve(&formula), None);

        let zero = arena.zero();
        let formula = to_cnf(&arena, &table, &[zero]);
        assert_eq!(solve(&formula), None);
    }

    #[test]
    fn test_gates_match_eval() {
        let table = AtomTable::new(3, 1);
        let mut arena = ExprArena::new();
        let a = arena.mk_term(Atom::not(0));
        let b = arena.mk_term(Atom::not(1));
        let c = arena.mk_term(Atom::not(2));
        let ab = arena.mk_or(a, b);
        let f = arena.mk_and(ab, c);
        let f = arena.mk_xor(f, a);

        for bits in 0..8usize {
            let pins: Vec<Idx> = (0..3)
                .map(|i| {
                    let t = arena.mk_term(Atom::not(i));
                    let value = arena.constant(bits >> i & 1 == 1);
                    arena.mk_eq(t, value)
                })
                .collect();
            let expected = arena.eval(f, |atom| bits >> atom.line() & 1 == 1);

            let mut assertions = pins.clone();
            assertions.push(f);
            assert_eq!(solve(&to_cnf(&arena, &table, &assertions)).is_some(), expected);

            let not_f = arena.mk_not(f);
            let mut assertions = pins;
            assertions.push(not_f);
            assert_eq!(solve(&to_cnf(&arena, &table, &assertions)).is_some(), !expected);
        }
    }

    #[test]
    fn test_write_dimacs() {
        let mut formula = CnfFormula::new();
        let x = Lit::from_dimacs(1);
        let y = Lit::from_dimacs(2);
        formula.add_clause(&[x, !y]);
        formula.add_clause(&[y]);

        let mut out = Vec::new();
        write_dimacs(&formula, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }
}
