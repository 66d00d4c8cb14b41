//! The satisfiability oracle boundary.
//!
//! An [`Oracle`] receives a CNF formula by value and answers with a [`Verdict`]:
//! either a satisfying assignment or a proof-less "unsatisfiable". The call is
//! synchronous; callers that need a deadline must impose it around the oracle.

use log::debug;
use varisat::{CnfFormula, Lit, Solver};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verdict {
    /// A satisfying assignment. Variables missing from it are treated as false.
    Sat(Vec<Lit>),
    Unsat,
}

impl Verdict {
    pub fn is_sat(&self) -> bool {
        matches!(self, Verdict::Sat(_))
    }
}

pub trait Oracle {
    fn solve(&mut self, formula: CnfFormula) -> Result<Verdict>;
}

impl<O> Oracle for &mut O
where
    O: Oracle + ?Sized,
{
    fn solve(&mut self, formula: CnfFormula) -> Result<Verdict> {
        (**self).solve(formula)
    }
}

/// Oracle backed by the `varisat` CDCL solver. A fresh solver is created per call.
#[derive(Debug, Default, Copy, Clone)]
pub struct VarisatOracle;

impl Oracle for VarisatOracle {
    fn solve(&mut self, formula: CnfFormula) -> Result<Verdict> {
        debug!(
            "varisat: solving {} variables, {} clauses",
            formula.var_count(),
            formula.len()
        );
        let mut solver = Solver::new();
        solver.add_formula(&formula);
        let sat = solver.solve().map_err(|e| Error::Oracle(e.to_string()))?;
        if !sat {
            return Ok(Verdict::Unsat);
        }
        let model = solver
            .model()
            .ok_or_else(|| Error::Oracle("solver reported SAT without a model".to_string()))?;
        Ok(Verdict::Sat(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;
    use varisat::ExtendFormula;

    #[test]
    fn test_varisat_sat() {
        let mut formula = CnfFormula::new();
        let x = Lit::from_dimacs(1);
        let y = Lit::from_dimacs(2);
        formula.add_clause(&[x, y]);
        formula.add_clause(&[!x]);

        let verdict = VarisatOracle.solve(formula).unwrap();
        println!("verdict = {:?}", verdict);
        match verdict {
            Verdict::Sat(model) => {
                assert!(model.contains(&!x));
                assert!(model.contains(&y));
            }
            Verdict::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn test_varisat_unsat() {
        let mut formula = CnfFormula::new();
        let x = Lit::from_dimacs(1);
        formula.add_clause(&[x]);
        formula.add_clause(&[!x]);

        let verdict = VarisatOracle.solve(formula).unwrap();
        assert_eq!(verdict, Verdict::Unsat);
        assert!(!verdict.is_sat());
    }

    #[test]
    fn test_oracle_by_mut_ref() {
        fn run<O: Oracle>(mut oracle: O) -> Verdict {
            oracle.solve(CnfFormula::new()).unwrap()
        }
        let mut oracle = VarisatOracle;
        assert!(run(&mut oracle).is_sat());
    }
}
