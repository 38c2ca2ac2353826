mod data;
mod dimacs;
mod error;
mod formula;
mod implication_graph;
mod interpretation;
mod model;
mod search;
mod trace;

pub use data::{Lit, Var};
pub use dimacs::render as to_dimacs;
pub use error::{Result, SolverError};
pub use formula::Formula;
pub use model::Model;
pub use search::Solver;
pub use trace::TraceOptions;

impl Solver {
    /// Parses a DIMACS CNF document straight into a solver.
    pub fn from_dimacs(input: &str, trace: TraceOptions) -> Result<Solver> {
        let formula = dimacs::parse(input)?;
        Ok(Solver::new(formula, trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dimacs_solves_end_to_end() {
        let mut solver = Solver::from_dimacs("p cnf 2 2\n1 2 0\n-1 0\n", TraceOptions::none())
            .expect("valid DIMACS input");
        assert!(solver.check_sat());
        let model = solver.get_model();
        assert!(model.satisfies(solver.formula()));
    }

    #[test]
    fn malformed_dimacs_is_rejected_not_panicked() {
        let err = Solver::from_dimacs("not dimacs at all", TraceOptions::none()).unwrap_err();
        assert!(matches!(err, SolverError::MalformedInput { .. }));
    }
}
