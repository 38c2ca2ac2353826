use crate::data::{Lit, Var, VarVec};
use crate::error::{Result, SolverError};
use crate::formula::Formula;
use crate::model::Model;

/// A partial assignment: an ordered trail of assigned literals plus, implicitly,
/// the still-unassigned variables (anything not on the trail).
///
/// Mutations are expressed as a mutable trail with push/pop rather than by
/// copying the whole assignment per branch: logically equivalent, cheaper.
#[derive(Debug, Clone)]
pub struct Interpretation {
    trail: Vec<Lit>,
    assigned: VarVec<Option<bool>>,
    num_vars: u32,
}

/// Which clause a unit-propagation/conflict query fired on, so the caller can
/// record reasons in the implication graph.
#[derive(Debug, Clone, Copy)]
pub struct UnitHit {
    pub clause_index: usize,
    pub lit: Lit,
}

impl Interpretation {
    pub fn new(num_vars: u32) -> Self {
        Interpretation {
            trail: Vec::with_capacity(num_vars as usize),
            assigned: VarVec::with_capacity(num_vars as usize, None),
            num_vars,
        }
    }

    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    /// Requires `var(l)` to be currently unassigned.
    pub fn assign(&mut self, l: Lit) {
        debug_assert!(
            self.assigned[l.var()].is_none(),
            "assign called on an already-assigned variable"
        );
        self.assigned[l.var()] = Some(l.is_pos());
        self.trail.push(l);
    }

    /// Requires the trail to be non-empty. Returns the popped literal.
    pub fn pop(&mut self) -> Lit {
        let l = self.trail.pop().expect("pop called on an empty trail");
        self.assigned[l.var()] = None;
        l
    }

    /// Unassigns every trail variable for which `keep` returns false,
    /// preserving the relative order of the ones that remain. Unlike `pop`,
    /// this can remove an entry out of the trail's interior: a backjump can
    /// find a variable above its target still sitting below a lower-level
    /// fact on the trail.
    pub fn retract(&mut self, mut keep: impl FnMut(Var) -> bool) {
        let trail = std::mem::take(&mut self.trail);
        for l in trail {
            if keep(l.var()) {
                self.trail.push(l);
            } else {
                self.assigned[l.var()] = None;
            }
        }
    }

    /// The variable with the smallest index that is still unassigned.
    pub fn first_atom(&self) -> Result<Var> {
        (1..=self.num_vars)
            .map(|i| Var::new(i as i32))
            .find(|&v| self.assigned[v].is_none())
            .ok_or(SolverError::NoRemainingAtom)
    }

    /// `+1` if `l` is on the trail, `-1` if `-l` is, `0` if unassigned.
    pub fn state(&self, l: Lit) -> i32 {
        match self.assigned[l.var()] {
            Some(polarity) if polarity == l.is_pos() => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    pub fn is_satisfied(&self, l: Lit) -> bool {
        self.state(l) == 1
    }

    pub fn is_falsified(&self, l: Lit) -> bool {
        self.state(l) == -1
    }

    fn clause_satisfied(&self, clause: &[Lit]) -> bool {
        clause.iter().any(|&l| self.is_satisfied(l))
    }

    fn clause_falsified(&self, clause: &[Lit]) -> bool {
        clause.iter().all(|&l| self.is_falsified(l))
    }

    /// True iff every clause has a satisfied literal.
    pub fn satisfies(&self, f: &Formula) -> bool {
        f.clauses().all(|c| self.clause_satisfied(c))
    }

    /// The index of a clause all of whose literals are falsified, if any.
    pub fn conflicts(&self, f: &Formula) -> Option<usize> {
        f.clauses().position(|c| self.clause_falsified(c))
    }

    /// The first clause (in order) that is unit under the current
    /// assignment: exactly one unassigned literal, no satisfied literal.
    /// Returns that clause's index and the forced literal.
    pub fn unit(&self, f: &Formula) -> Option<UnitHit> {
        for (clause_index, clause) in f.clauses().enumerate() {
            let mut unassigned = None;
            let mut satisfied = false;
            let mut count_unassigned = 0;
            for &l in clause {
                match self.state(l) {
                    1 => {
                        satisfied = true;
                        break;
                    }
                    0 => {
                        count_unassigned += 1;
                        unassigned = Some(l);
                        if count_unassigned > 1 {
                            break;
                        }
                    }
                    _ => {}
                }
            }
            if !satisfied && count_unassigned == 1 {
                return Some(UnitHit {
                    clause_index,
                    lit: unassigned.unwrap(),
                });
            }
        }
        None
    }

    pub fn is_total(&self) -> bool {
        self.trail.len() as u32 == self.num_vars
    }

    /// Requires the trail to cover every variable.
    pub fn export_model(&self) -> Model {
        debug_assert!(self.is_total(), "export_model called on a partial trail");
        Model::from_trail(self.num_vars, &self.trail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_and_pop_roundtrip() {
        let mut i = Interpretation::new(3);
        i.assign(Lit::new(1));
        i.assign(Lit::new(-2));
        assert_eq!(i.state(Lit::new(1)), 1);
        assert_eq!(i.state(Lit::new(2)), -1);
        assert_eq!(i.state(Lit::new(3)), 0);
        assert_eq!(i.pop(), Lit::new(-2));
        assert_eq!(i.state(Lit::new(2)), 0);
    }

    #[test]
    fn first_atom_is_smallest_unassigned() {
        let mut i = Interpretation::new(3);
        i.assign(Lit::new(1));
        assert_eq!(i.first_atom().unwrap(), Var::new(2));
    }

    #[test]
    fn first_atom_fails_when_exhausted() {
        let mut i = Interpretation::new(1);
        i.assign(Lit::new(1));
        assert_eq!(i.first_atom(), Err(SolverError::NoRemainingAtom));
    }

    #[test]
    fn unit_detection_ignores_satisfied_clauses() {
        let f = Formula::new(2, vec![vec![Lit::new(1), Lit::new(2)], vec![Lit::new(-1), Lit::new(2)]]);
        let mut i = Interpretation::new(2);
        i.assign(Lit::new(1));
        let hit = i.unit(&f).expect("second clause should be unit on 2");
        assert_eq!(hit.lit, Lit::new(2));
        assert_eq!(hit.clause_index, 1);
    }

    #[test]
    fn conflicts_reports_falsified_clause_index() {
        let f = Formula::new(1, vec![vec![Lit::new(1)]]);
        let mut i = Interpretation::new(1);
        i.assign(Lit::new(-1));
        assert_eq!(i.conflicts(&f), Some(0));
    }
}
