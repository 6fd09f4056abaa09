//! Clause storage and the two-watched-literal maintenance protocol
//! (spec.md §4.1, §4.2, §4.3).

use std::collections::HashSet;

use crate::data::Lit;
use crate::dlis::Dlis;
use crate::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ClauseIdx(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchUpdate {
    /// Clause already has a satisfied literal; it joins the satisfied set.
    Sat,
    /// Two fresh unfalsified literals were found; `watch1`/`watch2` moved.
    Normal,
    /// Exactly one unfalsified literal remains; it must be forced true.
    OneLeft,
    /// No unfalsified literal remains.
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnsetOutcome {
    /// The clause is still satisfied by some other literal; watches moved.
    Normal,
    /// No other literal satisfies the clause; it leaves the satisfied set.
    CausesUnresolved,
}

/// One clause: its literals plus the two-watched-literal bookkeeping.
///
/// `prev_watch1`/`prev_watch2` hold the watches as they stood *before* the
/// most recent `watch_update`/`sat_recheck` call, so the caller can find
/// which buckets of the watch index to remove the clause's index from.
#[derive(Debug, Clone)]
pub(crate) struct Clause {
    terms: Vec<Lit>,
    watch1: Lit,
    watch2: Option<Lit>,
    prev_watch1: Lit,
    prev_watch2: Option<Lit>,
    last_literal: Option<Lit>,
    satisfied: bool,
}

impl Clause {
    /// Builds a clause from raw literals, deduplicating repeats and
    /// rejecting tautologies (`Some(l)` and `Some(-l)` both present) by
    /// returning `None`, matching the model builder in spec.md §4.1.
    fn build(mut terms: Vec<Lit>) -> Option<Self> {
        let mut seen = HashSet::new();
        terms.retain(|l| seen.insert(*l));

        if terms.iter().any(|l| seen.contains(&-*l)) {
            return None;
        }

        assert!(!terms.is_empty(), "empty clause added to clause database");

        let watch1 = terms[0];
        let watch2 = terms.get(1).copied();
        Some(Clause {
            terms,
            watch1,
            watch2,
            prev_watch1: watch1,
            prev_watch2: watch2,
            last_literal: None,
            satisfied: false,
        })
    }

    pub(crate) fn terms(&self) -> &[Lit] {
        &self.terms
    }

    pub(crate) fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    pub(crate) fn watch1(&self) -> Lit {
        self.watch1
    }

    pub(crate) fn watch2(&self) -> Option<Lit> {
        self.watch2
    }

    pub(crate) fn prev_watch1(&self) -> Lit {
        self.prev_watch1
    }

    pub(crate) fn prev_watch2(&self) -> Option<Lit> {
        self.prev_watch2
    }

    pub(crate) fn last_literal(&self) -> Option<Lit> {
        self.last_literal
    }

    /// spec.md §4.2 — invoked when a watch of this clause was just
    /// falsified. Unit clauses never reach the `Normal` arm: with only one
    /// term they can have at most one unfalsified literal.
    pub(crate) fn watch_update(&mut self, trail: &Trail, dlis: &mut Dlis) -> WatchUpdate {
        debug_assert!(!self.satisfied);

        if trail.is_clause_satisfied(&self.terms) {
            for &l in &self.terms {
                dlis.release(l);
            }
            self.satisfied = true;
            return WatchUpdate::Sat;
        }

        let unfalsified: Vec<Lit> = self
            .terms
            .iter()
            .copied()
            .filter(|&l| !trail.is_lit_unsatisfied(l))
            .collect();

        match unfalsified.len() {
            0 => WatchUpdate::Conflict,
            1 => {
                self.last_literal = Some(unfalsified[0]);
                WatchUpdate::OneLeft
            }
            _ => {
                self.prev_watch1 = self.watch1;
                self.prev_watch2 = self.watch2;
                self.watch1 = unfalsified[0];
                self.watch2 = Some(unfalsified[1]);
                WatchUpdate::Normal
            }
        }
    }

    /// spec.md §4.3 — invoked while backtracking, for a satisfied clause
    /// that watched the literal `a` now being rolled back.
    pub(crate) fn sat_recheck(&mut self, trail: &Trail, a: Lit, dlis: &mut Dlis) -> UnsetOutcome {
        debug_assert!(self.satisfied);

        if let Some(&still_true) = self.terms.iter().find(|&&l| trail.is_lit_satisfied(l)) {
            self.prev_watch1 = self.watch1;
            self.prev_watch2 = self.watch2;
            self.watch1 = still_true;
            self.watch2 = Some(if self.terms.contains(&a) { a } else { -a });
            UnsetOutcome::Normal
        } else {
            for &l in &self.terms {
                dlis.bump(l);
            }
            self.satisfied = false;
            UnsetOutcome::CausesUnresolved
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ClauseDb {
    clauses: Vec<Clause>,
}

impl ClauseDb {
    /// spec.md §4.1 — builds the clause set, silently discarding
    /// tautologies (clauses containing a literal and its negation).
    pub(crate) fn build(raw_clauses: &[Vec<Lit>]) -> Self {
        let clauses = raw_clauses
            .iter()
            .filter_map(|terms| Clause::build(terms.clone()))
            .collect();
        ClauseDb { clauses }
    }

    pub(crate) fn len(&self) -> usize {
        self.clauses.len()
    }

    pub(crate) fn get(&self, idx: ClauseIdx) -> &Clause {
        &self.clauses[idx.0]
    }

    pub(crate) fn get_mut(&mut self, idx: ClauseIdx) -> &mut Clause {
        &mut self.clauses[idx.0]
    }

    pub(crate) fn iter_idx(&self) -> impl Iterator<Item = (ClauseIdx, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, c)| (ClauseIdx(i), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Var;

    fn lits(raw: &[i32]) -> Vec<Lit> {
        raw.iter().map(|&i| Lit::new(i)).collect()
    }

    #[test]
    fn tautologies_are_discarded() {
        let db = ClauseDb::build(&[lits(&[1, -1, 2])]);
        assert_eq!(db.len(), 0);
    }

    #[test]
    fn duplicate_literals_are_collapsed() {
        let db = ClauseDb::build(&[lits(&[1, 1, 2])]);
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(ClauseIdx(0)).terms(), &lits(&[1, 2]));
    }

    #[test]
    fn watch_update_finds_conflict() {
        let mut trail = Trail::new();
        trail.expand(Var::new(2));
        trail.assign_lit(Lit::new(-1), crate::trail::TrailReason::Decision);
        trail.assign_lit(Lit::new(-2), crate::trail::TrailReason::Decision);

        let mut clause = Clause::build(lits(&[1, 2])).unwrap();
        let mut dlis = Dlis::new();
        dlis.expand(Var::new(2));
        assert_eq!(
            clause.watch_update(&trail, &mut dlis),
            WatchUpdate::Conflict
        );
    }

    #[test]
    fn watch_update_detects_one_left() {
        let mut trail = Trail::new();
        trail.expand(Var::new(2));
        trail.assign_lit(Lit::new(-1), crate::trail::TrailReason::Decision);

        let mut clause = Clause::build(lits(&[1, 2])).unwrap();
        let mut dlis = Dlis::new();
        dlis.expand(Var::new(2));
        assert_eq!(
            clause.watch_update(&trail, &mut dlis),
            WatchUpdate::OneLeft
        );
        assert_eq!(clause.last_literal(), Some(Lit::new(2)));
    }
}
