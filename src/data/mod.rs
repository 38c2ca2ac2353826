mod var;
mod varvec;

pub use var::{Lit, Var};
pub use varvec::VarVec;
