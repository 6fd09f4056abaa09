//! Watch-index maintenance and Boolean constraint propagation
//! (spec.md §4.4, §4.5, §4.6).

use crate::clause::{ClauseIdx, UnsetOutcome, WatchUpdate};
use crate::data::{Lit, Var, VarVec};
use crate::trail::TrailReason;
use crate::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetResult {
    Normal,
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BcpResult {
    Normal,
    Conflict,
}

fn remove_watch(watch_index: &mut VarVec<Vec<ClauseIdx>>, var: Var, idx: ClauseIdx) {
    let bucket = &mut watch_index[var];
    if let Some(pos) = bucket.iter().position(|&i| i == idx) {
        bucket.swap_remove(pos);
    }
}

impl Solver {
    /// spec.md §4.4 — react to `lit` just becoming true: walk a snapshot of
    /// the clauses watching `lit.var()` and re-settle their watches.
    pub(crate) fn set(&mut self, lit: Lit) -> SetResult {
        let snapshot = self.watch_index[lit.var()].clone();

        for idx in snapshot {
            if self.clause_db.get(idx).is_satisfied() {
                continue;
            }

            match self.clause_db.get_mut(idx).watch_update(&self.trail, &mut self.dlis) {
                WatchUpdate::Sat => {
                    self.satisfied_count += 1;
                }
                WatchUpdate::Normal => {
                    let clause = self.clause_db.get(idx);
                    let (prev1, prev2, new1, new2) = (
                        clause.prev_watch1(),
                        clause.prev_watch2(),
                        clause.watch1(),
                        clause.watch2(),
                    );
                    remove_watch(&mut self.watch_index, prev1.var(), idx);
                    if let Some(p2) = prev2 {
                        remove_watch(&mut self.watch_index, p2.var(), idx);
                    }
                    self.watch_index[new1.var()].push(idx);
                    if let Some(n2) = new2 {
                        self.watch_index[n2.var()].push(idx);
                    }
                }
                WatchUpdate::OneLeft => {
                    let r = self
                        .clause_db
                        .get(idx)
                        .last_literal()
                        .expect("one-left clause must record its last literal");
                    if self.trail.is_lit_unsatisfied(r) || self.propagation_queue.contains(&-r) {
                        return SetResult::Conflict;
                    }
                    tracing::trace!(literal = ?r, "queuing forced literal");
                    self.propagation_queue.push(r);
                }
                WatchUpdate::Conflict => return SetResult::Conflict,
            }
        }

        SetResult::Normal
    }

    /// spec.md §4.5 — react to `lit` being rolled back to unassigned during
    /// backtracking. Only clauses currently in the satisfied set need a
    /// recheck; clauses that were never satisfied still watch whatever
    /// unfalsified literals they had before `lit` was assigned.
    pub(crate) fn unset(&mut self, lit: Lit) {
        let snapshot = self.watch_index[lit.var()].clone();

        for idx in snapshot {
            if !self.clause_db.get(idx).is_satisfied() {
                continue;
            }

            match self
                .clause_db
                .get_mut(idx)
                .sat_recheck(&self.trail, lit, &mut self.dlis)
            {
                UnsetOutcome::CausesUnresolved => {
                    self.satisfied_count -= 1;
                }
                UnsetOutcome::Normal => {
                    let clause = self.clause_db.get(idx);
                    let (prev1, prev2, new1, new2) = (
                        clause.prev_watch1(),
                        clause.prev_watch2(),
                        clause.watch1(),
                        clause.watch2(),
                    );
                    remove_watch(&mut self.watch_index, prev1.var(), idx);
                    if let Some(p2) = prev2 {
                        remove_watch(&mut self.watch_index, p2.var(), idx);
                    }
                    self.watch_index[new1.var()].push(idx);
                    if let Some(n2) = new2 {
                        self.watch_index[n2.var()].push(idx);
                    }
                }
            }
        }
    }

    /// spec.md §4.6 — drain the propagation queue to a fixpoint, assigning
    /// each forced literal and re-running `set` for it.
    pub(crate) fn bcp(&mut self) -> BcpResult {
        let mut start = 0usize;
        let mut last_seen = self.propagation_queue.len();

        while last_seen > start {
            for i in start..last_seen {
                let force = self.propagation_queue[i];
                if self.trail.is_lit_unsatisfied(force) {
                    self.propagation_queue.clear();
                    return BcpResult::Conflict;
                }
                if self.trail.is_lit_unassigned(force) {
                    self.trail.assign_lit(force, TrailReason::Implied);
                    tracing::debug!(literal = ?force, "propagated");
                    if let SetResult::Conflict = self.set(force) {
                        self.propagation_queue.clear();
                        return BcpResult::Conflict;
                    }
                }
            }
            start = last_seen;
            last_seen = self.propagation_queue.len();
        }

        self.propagation_queue.clear();
        BcpResult::Normal
    }
}
