use tracing::trace;

use crate::data::{Lit, Var, VarVec};

/// Per-variable decision level and reason-graph metadata.
///
/// Edges are stored as per-variable predecessor lists rather than a dense
/// `n×n` boolean matrix: `O(n + |F|)` space instead of `O(n^2)`, same
/// reachability semantics.
#[derive(Debug)]
pub struct ImplicationGraph {
    decision_level: VarVec<u32>,
    parity: VarVec<Option<Lit>>,
    /// `predecessors[v]` holds every `u` with an edge `u -> v`.
    predecessors: VarVec<Vec<Var>>,
    /// The most recently assigned variable, decided or implied, or the
    /// reserved sentinel variable if nothing has been assigned yet. Conflict
    /// analysis starts here; a conflicting clause found before any assignment
    /// spans into the sentinel itself, which then plays the role of "the
    /// conflict" in the reverse traversal.
    last_atom: Var,
}

impl Default for ImplicationGraph {
    fn default() -> Self {
        ImplicationGraph::new(0)
    }
}

/// The two decisions picked out by conflict analysis: `high` (to be flipped)
/// and `low` (defines the backjump level). `None` means no backjump is
/// possible and the branch is UNSAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackjumpTarget {
    pub high: Var,
    pub low: Var,
}

impl ImplicationGraph {
    pub fn new(num_vars: u32) -> Self {
        ImplicationGraph {
            decision_level: VarVec::with_capacity(num_vars as usize, 0),
            parity: VarVec::with_capacity(num_vars as usize, None),
            predecessors: VarVec::with_capacity(num_vars as usize, Vec::new()),
            last_atom: Var::sentinel(),
        }
    }

    pub fn decision_level(&self, v: Var) -> u32 {
        self.decision_level[v]
    }

    pub fn parity(&self, v: Var) -> Option<Lit> {
        self.parity[v]
    }

    pub fn set_decision(&mut self, l: Lit, d: u32) {
        self.decision_level[l.var()] = d;
        self.parity[l.var()] = Some(l);
        self.last_atom = l.var();
    }

    pub fn connect(&mut self, from: Lit, to: Lit) {
        let (u, v) = (from.var(), to.var());
        if !self.predecessors[v].contains(&u) {
            self.predecessors[v].push(u);
        }
        self.last_atom = v;
    }

    /// Records the antecedents of a clause that just became unit (forcing
    /// `unit`) or fully falsified (then `unit` is the most recently implied
    /// variable's literal). Sets `decision_level[var(unit)]` to the highest
    /// antecedent level, mirroring how the literal was actually derived.
    ///
    /// `span_conflict` calls this a second time for a variable already
    /// spanned by unit propagation, over the falsified clause rather than
    /// the one that implied it; starting `latest` from the level already on
    /// record keeps that second call from discarding the higher level its
    /// real antecedents established.
    pub fn span(&mut self, clause: &[Lit], unit: Lit) {
        let mut latest = self.decision_level[unit.var()];
        for &l in clause {
            if l.var() != unit.var() {
                self.connect(l, unit);
                latest = latest.max(self.decision_level[l.var()]);
            }
        }
        self.set_decision(unit, latest);
    }

    /// `span`, but for a fully falsified clause rather than a unit one: the
    /// "unit" is the graph's own `last_atom`, reused as the conflict's
    /// implied variable.
    pub fn span_conflict(&mut self, clause: &[Lit]) {
        let unit = Lit::from(self.last_atom);
        self.span(clause, unit);
    }

    /// Removes all edges touching `v` and resets its decision level/parity.
    pub fn clear(&mut self, v: Var) {
        self.predecessors[v].clear();
        self.predecessors[Var::sentinel()].retain(|&u| u != v);
        for (other, preds) in self.predecessors.iter_with_var_mut() {
            if other != v {
                preds.retain(|&u| u != v);
            }
        }
        self.decision_level[v] = 0;
        self.parity[v] = None;
    }

    /// Clears every variable not present on `trail`. Idempotent: a second
    /// call finds nothing left to clear.
    pub fn tidy(&mut self, trail: &[Lit]) {
        let on_trail: std::collections::HashSet<Var> = trail.iter().map(|l| l.var()).collect();
        let stale: Vec<Var> = self
            .decision_level
            .iter_with_var()
            .map(|(v, _)| v)
            .filter(|v| !on_trail.contains(v))
            .collect();
        for v in stale {
            self.clear(v);
        }
    }

    /// Reverse-reachability conflict analysis: starting from `last_atom`,
    /// follow predecessor edges back to every reachable source (a variable
    /// with no predecessor, i.e. a decision). Returns the two highest-level
    /// sources found, or `None` if fewer than two exist.
    pub fn find_reason(&self) -> Option<BackjumpTarget> {
        let last_atom = self.last_atom;

        let mut stack = vec![last_atom];
        let mut visited = std::collections::HashSet::new();
        visited.insert(last_atom);
        let mut sources = Vec::new();

        while let Some(x) = stack.pop() {
            let preds = &self.predecessors[x];
            if preds.is_empty() {
                sources.push(x);
                continue;
            }
            for &u in preds {
                if visited.insert(u) {
                    stack.push(u);
                }
            }
        }

        sources.sort_by_key(|&v| std::cmp::Reverse(self.decision_level[v]));
        match sources.as_slice() {
            [high, low, ..] => {
                let (high, low) = if self.decision_level[*high] >= self.decision_level[*low] {
                    (*high, *low)
                } else {
                    (*low, *high)
                };
                trace!(%high, %low, "find_reason picked backjump target");
                Some(BackjumpTarget { high, low })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: i32) -> Var {
        Var::new(i)
    }

    fn l(i: i32) -> Lit {
        Lit::new(i)
    }

    #[test]
    fn span_records_max_antecedent_level() {
        let mut g = ImplicationGraph::new(3);
        g.set_decision(l(1), 1);
        g.set_decision(l(2), 2);
        g.span(&[l(-1), l(-2), l(3)], l(3));
        assert_eq!(g.decision_level(v(3)), 2);
        assert_eq!(g.parity(v(3)), Some(l(3)));
    }

    #[test]
    fn find_reason_picks_two_highest_level_sources() {
        let mut g = ImplicationGraph::new(3);
        g.set_decision(l(1), 1);
        g.set_decision(l(2), 2);
        g.span(&[l(-1), l(-2), l(3)], l(3));
        let target = g.find_reason().expect("two sources reachable");
        assert_eq!(target.high, v(2));
        assert_eq!(target.low, v(1));
    }

    #[test]
    fn find_reason_with_single_source_is_none() {
        let mut g = ImplicationGraph::new(2);
        g.set_decision(l(1), 1);
        g.span(&[l(-1), l(2)], l(2));
        assert_eq!(g.find_reason(), None);
    }

    #[test]
    fn tidy_is_idempotent() {
        let mut g = ImplicationGraph::new(2);
        g.set_decision(l(1), 1);
        g.set_decision(l(2), 2);
        g.tidy(&[l(1)]);
        let after_first = (g.decision_level(v(2)), g.parity(v(2)));
        g.tidy(&[l(1)]);
        assert_eq!((g.decision_level(v(2)), g.parity(v(2))), after_first);
        assert_eq!(after_first, (0, None));
    }
}
