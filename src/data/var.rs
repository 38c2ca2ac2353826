/// A 1-indexed Boolean variable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(u32);

impl Var {
    pub fn new(i: i32) -> Self {
        assert!(i > 0, "variable indices are 1-indexed");
        let i = i as u32;
        assert_eq!(i & (0b11 << 30), 0, "variable index too large");
        Var(i)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The reserved "no variable" sentinel (index `0`), used internally by
    /// the implication graph to stand in for "the conflict itself" when no
    /// real variable has been implied yet. Never appears in a `Formula`, an
    /// `Interpretation`, or a `Model`; those use `Option<Var>` at their
    /// boundaries instead.
    pub(crate) fn sentinel() -> Self {
        Var(0)
    }
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Literals are represented as u32.
// The LSB is one, iff the literal is negative.
// The MSB is *always* zero.
// The remaining bits represent the variable.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit(u32);

impl Lit {
    pub fn new(lit: i32) -> Self {
        assert_ne!(lit, 0, "literals can't be zero");

        let new_lit_repr = lit.unsigned_abs();
        let new_lit_repr = (new_lit_repr << 1) | ((lit < 0) as u32);
        assert!(new_lit_repr & (1 << 31) == 0, "literal magnitude too large");

        Lit(new_lit_repr)
    }

    pub fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_pos(self) -> bool {
        self.0 & 1 == 0
    }

    pub fn is_neg(self) -> bool {
        self.0 & 1 == 1
    }

    /// Signed DIMACS-style integer, `+v` for positive, `-v` for negative.
    pub fn to_i32(self) -> i32 {
        let v = self.var().get() as i32;
        if self.is_pos() {
            v
        } else {
            -v
        }
    }
}

impl From<Var> for Lit {
    fn from(v: Var) -> Self {
        Lit(v.0 << 1)
    }
}

impl std::ops::Neg for Lit {
    type Output = Lit;

    fn neg(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

impl std::fmt::Debug for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Lit")
            .field(&format!(
                "{}{}",
                if self.is_pos() { "" } else { "-" },
                self.var().get()
            ))
            .finish()
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            if self.is_pos() { "" } else { "-" },
            self.var().get()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_flips_sign_only() {
        let l = Lit::new(5);
        assert_eq!(-l, Lit::new(-5));
        assert_eq!(-(-l), l);
        assert_eq!(l.var(), (-l).var());
    }

    #[test]
    fn to_i32_round_trips() {
        for i in [-7, -1, 1, 3, 42] {
            assert_eq!(Lit::new(i).to_i32(), i);
        }
    }
}
