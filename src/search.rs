use tracing::debug;

use crate::data::{Lit, Var};
use crate::formula::Formula;
use crate::implication_graph::ImplicationGraph;
use crate::interpretation::Interpretation;
use crate::model::Model;
use crate::trace::TraceOptions;

/// An untried alternative branch, kept on an explicit stack so the engine
/// can fall back to it chronologically when backjumping can't resolve a
/// conflict. Carries a full trail snapshot rather than a length: a backjump
/// can retract trail entries out of order, so a later fallback can't rebuild
/// this branch's state by popping down to a remembered count.
struct PendingBranch {
    trail_snapshot: Vec<Lit>,
    lit: Lit,
    decision_level: u32,
}

/// Ties a [`Formula`], an [`Interpretation`], and an [`ImplicationGraph`]
/// together into the DPLL search with non-chronological backjumping.
#[derive(Debug)]
pub struct Solver {
    formula: Formula,
    interpretation: Interpretation,
    graph: ImplicationGraph,
    trace: TraceOptions,
}

impl Solver {
    pub fn new(formula: Formula, trace: TraceOptions) -> Self {
        let num_vars = formula.num_vars();
        Solver {
            interpretation: Interpretation::new(num_vars),
            graph: ImplicationGraph::new(num_vars),
            formula,
            trace,
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Decides satisfiability. On success, the solver's trail holds a total
    /// satisfying assignment retrievable through [`Solver::get_model`].
    pub fn check_sat(&mut self) -> bool {
        let mut stack: Vec<PendingBranch> = Vec::new();
        let mut pending_decision: Option<Lit> = None;
        let mut decision_level: u32 = 0;

        loop {
            if let Some(lit) = pending_decision.take() {
                self.graph.set_decision(lit, decision_level);
            }

            if self.interpretation.is_total() && self.interpretation.satisfies(&self.formula) {
                return true;
            }

            if let Some(clause_index) = self.interpretation.conflicts(&self.formula) {
                let clause = self.formula.clause(clause_index).to_vec();
                self.graph.span_conflict(&clause);

                // Reject a target whose two sources tie at the same level:
                // nothing to pop, nothing to flip.
                let target = self.graph.find_reason().filter(|target| {
                    self.graph.decision_level(target.high) > self.graph.decision_level(target.low)
                });

                let Some(target) = target else {
                    match stack.pop() {
                        None => return false,
                        Some(branch) => {
                            self.fall_back_to(branch, &mut decision_level, &mut pending_decision);
                            continue;
                        }
                    }
                };

                if self.trace.contains(TraceOptions::TRACE_BACKJUMPS) {
                    debug!(high = %target.high, low = %target.low, "backjump on {}, {}", target.high, target.low);
                }

                let backjump_level = self.graph.decision_level(target.low);

                // Decision levels aren't non-decreasing along the trail (a
                // clause with no antecedents left on the trail spans at
                // level 0 no matter how deep the search already is), so a
                // variable above `backjump_level` can sit anywhere in the
                // trail, not just at its top. Retract every such variable
                // rather than popping a suffix.
                let to_drop: std::collections::HashSet<Var> = self
                    .interpretation
                    .trail()
                    .iter()
                    .map(|l| l.var())
                    .filter(|&v| self.graph.decision_level(v) > backjump_level)
                    .collect();
                self.interpretation.retract(|v| !to_drop.contains(&v));

                while stack
                    .last()
                    .is_some_and(|b| b.decision_level > backjump_level)
                {
                    stack.pop();
                }

                let flipped = -self
                    .graph
                    .parity(target.high)
                    .expect("a source picked by find_reason always has a recorded parity");

                self.graph.tidy(self.interpretation.trail());
                self.interpretation.assign(flipped);
                self.graph
                    .connect(Lit::from(target.low), Lit::from(target.high));
                self.graph.set_decision(flipped, backjump_level);

                decision_level = backjump_level;
                pending_decision = None;
                continue;
            }

            if let Some(hit) = self.interpretation.unit(&self.formula) {
                if self.trace.contains(TraceOptions::TRACE_PROPAGATIONS) {
                    debug!(lit = %hit.lit, "found unit {}", hit.lit);
                }
                let clause = self.formula.clause(hit.clause_index).to_vec();
                self.graph.span(&clause, hit.lit);
                self.interpretation.assign(hit.lit);
                continue;
            }

            let var = self.interpretation.first_atom().expect(
                "first_atom only fails on an exhausted remaining set, which satisfies() above rules out",
            );
            if self.trace.contains(TraceOptions::TRACE_DECISIONS) {
                debug!(%var, "split on {}", var);
            }
            self.branch_on(var, &mut stack, decision_level);
            decision_level += 1;
            pending_decision = Some(Lit::from(var));
            self.interpretation.assign(Lit::from(var));
        }
    }

    /// Pushes the untried negative phase and assigns the positive phase,
    /// per the "positive phase first, smallest remaining variable first"
    /// tie-break.
    fn branch_on(&self, var: Var, stack: &mut Vec<PendingBranch>, decision_level: u32) {
        stack.push(PendingBranch {
            trail_snapshot: self.interpretation.trail().to_vec(),
            lit: -Lit::from(var),
            decision_level: decision_level + 1,
        });
    }

    fn fall_back_to(
        &mut self,
        branch: PendingBranch,
        decision_level: &mut u32,
        pending_decision: &mut Option<Lit>,
    ) {
        while !self.interpretation.trail().is_empty() {
            self.interpretation.pop();
        }
        for &l in &branch.trail_snapshot {
            self.interpretation.assign(l);
        }
        self.graph.tidy(self.interpretation.trail());
        self.interpretation.assign(branch.lit);
        *pending_decision = Some(branch.lit);
        *decision_level = branch.decision_level;
    }

    /// Requires a prior call to [`Solver::check_sat`] to have returned `true`.
    pub fn get_model(&self) -> Model {
        self.interpretation.export_model()
    }
}
