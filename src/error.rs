use thiserror::Error;

/// Errors surfaced by the solver and its DIMACS loader.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// `Interpretation::first_atom` was called with no unassigned variables left.
    ///
    /// Reaching this means the search loop asked for a new decision variable
    /// without first checking that the formula was already satisfied or
    /// falsified by a total assignment, which is a bug in the caller, not a
    /// property of the input formula.
    #[error("no remaining atom to branch on")]
    NoRemainingAtom,

    /// The DIMACS text handed to the loader doesn't conform to the format.
    #[error("malformed DIMACS input at line {line}: {detail}")]
    MalformedInput { line: usize, detail: String },
}

pub type Result<T> = std::result::Result<T, SolverError>;
