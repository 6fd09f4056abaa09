//! The DPLL search loop (spec.md §4.7, §4.8, §4.9): backtracking, the
//! DLIS-driven free choice, and the recursive decide/branch procedure.

use crate::data::Lit;
use crate::propagate::{BcpResult, SetResult};
use crate::trail::TrailReason;
use crate::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecisionOutcome {
    Sat,
    Conflict,
}

impl Solver {
    pub(crate) fn is_fully_satisfied(&self) -> bool {
        self.satisfied_count == self.clause_db.len()
    }

    /// spec.md §4.7 — undo the top decision and everything implied after
    /// it. Marks the solver permanently unsatisfiable if there is no
    /// decision left to undo.
    pub(crate) fn backtrack(&mut self) {
        match self.trail.backtrack_literals() {
            Some((_, tail)) => {
                for lit in tail {
                    self.unset(lit);
                }
                self.propagation_queue.clear();
            }
            None => self.unsatisfiable = true,
        }
    }

    /// spec.md §4.8 — the next branching literal, or `None` once the
    /// formula is fully satisfied or every variable is assigned.
    pub(crate) fn free_choice(&self) -> Option<Lit> {
        if self.is_fully_satisfied() {
            return None;
        }
        self.dlis.pick(&self.trail)
    }

    /// spec.md §4.9 — try `candidate` true, then false; recurse on the
    /// DLIS choice after each successful propagation; backtrack out of
    /// whichever branch leads to conflict.
    pub(crate) fn decide(&mut self, candidate: Lit) -> DecisionOutcome {
        for c in [candidate, -candidate] {
            tracing::debug!(literal = ?c, "branching");
            self.trail.assign_lit(c, TrailReason::Decision);

            if let SetResult::Conflict = self.set(c) {
                self.backtrack();
                continue;
            }
            if self.is_fully_satisfied() {
                return DecisionOutcome::Sat;
            }

            if let BcpResult::Conflict = self.bcp() {
                self.backtrack();
                continue;
            }
            if self.is_fully_satisfied() {
                return DecisionOutcome::Sat;
            }

            if let Some(next) = self.free_choice() {
                let _ = self.decide(next);
            }
            if self.is_fully_satisfied() {
                return DecisionOutcome::Sat;
            }

            self.backtrack();
        }

        DecisionOutcome::Conflict
    }
}
