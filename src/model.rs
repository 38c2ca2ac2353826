use crate::data::{Lit, Var};

/// A total Boolean assignment, covering every variable `1..=num_vars`.
#[derive(Debug, Clone)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub(crate) fn from_trail(num_vars: u32, trail: &[Lit]) -> Self {
        let mut values = vec![false; num_vars as usize];
        for &l in trail {
            values[l.var().get() as usize - 1] = l.is_pos();
        }
        Model { values }
    }

    /// The truth value assigned to `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of the model's range.
    pub fn value(&self, var: Var) -> bool {
        self.values[var.get() as usize - 1]
    }

    /// The truth value of a signed literal under this model.
    pub fn lit(&self, l: Lit) -> bool {
        self.value(l.var()) == l.is_pos()
    }

    /// Signed-integer view, `+i` if variable `i` is true, `-i` otherwise.
    pub fn as_vec(&self) -> Vec<i32> {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, &v)| {
                let i = (idx + 1) as i32;
                if v {
                    i
                } else {
                    -i
                }
            })
            .collect()
    }

    /// Substitutes this model into every clause of `f` and checks it's satisfied.
    ///
    /// Used to double-check SAT answers in tests; not part of the hot path.
    pub fn satisfies(&self, f: &crate::formula::Formula) -> bool {
        f.clauses()
            .all(|clause| clause.iter().any(|&l| self.lit(l)))
    }
}
