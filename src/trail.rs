//! The trail (spec.md §3, §4.6, §4.7): the ordered log of assigned literals,
//! plus the decision-position stack used as backtrack anchors.

use crate::data::{Lit, Var, VarVec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrailReason {
    /// A free branching choice; anchors a backtrack level.
    Decision,
    /// Forced by unit propagation.
    Implied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrailElement {
    pub(crate) lit: Lit,
    pub(crate) reason: TrailReason,
}

/// Combines the current partial assignment with the ordered trail and the
/// decision stack (spec.md's `free_decision_list`, stored here as trail
/// positions rather than a parallel literal list).
#[derive(Debug, Clone, Default)]
pub(crate) struct Trail {
    entries: Vec<TrailElement>,
    decision_positions: Vec<usize>,
    assignment: VarVec<Option<bool>>,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn expand(&mut self, max_var: Var) {
        self.assignment.expand(max_var, None);
    }

    pub(crate) fn total_vars(&self) -> usize {
        self.assignment.len()
    }

    pub(crate) fn assignment_complete(&self) -> bool {
        self.entries.len() == self.assignment.len()
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&TrailElement> {
        self.entries.get(idx)
    }

    pub(crate) fn entries(&self) -> &[TrailElement] {
        &self.entries
    }

    pub(crate) fn is_lit_satisfied(&self, lit: Lit) -> bool {
        self.assignment[lit.var()] == Some(lit.is_pos())
    }

    pub(crate) fn is_lit_unsatisfied(&self, lit: Lit) -> bool {
        matches!(self.assignment[lit.var()], Some(v) if v != lit.is_pos())
    }

    pub(crate) fn is_lit_unassigned(&self, lit: Lit) -> bool {
        self.assignment[lit.var()].is_none()
    }

    pub(crate) fn is_clause_satisfied(&self, terms: &[Lit]) -> bool {
        terms.iter().any(|&l| self.is_lit_satisfied(l))
    }

    pub(crate) fn assign_lit(&mut self, lit: Lit, reason: TrailReason) {
        debug_assert!(
            self.is_lit_unassigned(lit),
            "{lit:?} is already assigned, cannot assign again"
        );
        self.entries.push(TrailElement { lit, reason });
        if reason == TrailReason::Decision {
            self.decision_positions.push(self.entries.len() - 1);
        }
        self.assignment[lit.var()] = Some(lit.is_pos());
    }

    fn unassign_var(&mut self, var: Var) {
        debug_assert!(self.assignment[var].is_some());
        self.assignment[var] = None;
    }

    pub(crate) fn last_decision_pos(&self) -> Option<usize> {
        self.decision_positions.last().copied()
    }

    /// spec.md §4.7 — pop the top decision and unassign everything from it
    /// onward, returning the trail length restored to (`k`) and the
    /// literals that were rolled back, in their original order, so the
    /// caller can run the per-clause Unset protocol (spec.md §4.5) against
    /// a trail that already reflects the post-rollback state.
    pub(crate) fn backtrack_literals(&mut self) -> Option<(usize, Vec<Lit>)> {
        let k = self.decision_positions.pop()?;
        let tail: Vec<Lit> = self.entries[k..].iter().map(|e| e.lit).collect();
        for &lit in &tail {
            self.unassign_var(lit.var());
        }
        self.entries.truncate(k);
        Some((k, tail))
    }

    pub(crate) fn unassigned_vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.assignment
            .iter_with_var()
            .filter(|(_, v)| v.is_none())
            .map(|(var, _)| var)
    }

    pub(crate) fn fmt_lit(&self, lit: Lit) -> String {
        match self.assignment[lit.var()] {
            Some(v) if v == lit.is_pos() => format!("\u{1b}[32m{lit}\u{1b}[0m"),
            Some(_) => format!("\u{1b}[31m{lit}\u{1b}[0m"),
            None => lit.to_string(),
        }
    }

    pub(crate) fn fmt_clause(&self, terms: &[Lit]) -> String {
        terms
            .iter()
            .map(|&lit| self.fmt_lit(lit))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_with(n: i32) -> Trail {
        let mut t = Trail::new();
        t.expand(Var::new(n));
        t
    }

    #[test]
    fn assign_and_query() {
        let mut t = trail_with(2);
        t.assign_lit(Lit::new(1), TrailReason::Decision);
        assert!(t.is_lit_satisfied(Lit::new(1)));
        assert!(t.is_lit_unsatisfied(Lit::new(-1)));
        assert!(t.is_lit_unassigned(Lit::new(2)));
        assert_eq!(t.last_decision_pos(), Some(0));
    }

    #[test]
    fn backtrack_undoes_decision_and_implications() {
        let mut t = trail_with(3);
        t.assign_lit(Lit::new(1), TrailReason::Decision);
        t.assign_lit(Lit::new(2), TrailReason::Implied);
        t.assign_lit(Lit::new(3), TrailReason::Implied);

        let (k, tail) = t.backtrack_literals().unwrap();
        assert_eq!(k, 0);
        assert_eq!(tail, vec![Lit::new(1), Lit::new(2), Lit::new(3)]);
        assert!(t.is_lit_unassigned(Lit::new(1)));
        assert!(t.is_lit_unassigned(Lit::new(2)));
        assert!(t.is_lit_unassigned(Lit::new(3)));
        assert_eq!(t.last_decision_pos(), None);
    }

    #[test]
    fn backtrack_only_undoes_up_to_last_decision() {
        let mut t = trail_with(3);
        t.assign_lit(Lit::new(1), TrailReason::Decision);
        t.assign_lit(Lit::new(2), TrailReason::Implied);
        t.assign_lit(Lit::new(-3), TrailReason::Decision);

        let (k, tail) = t.backtrack_literals().unwrap();
        assert_eq!(k, 2);
        assert_eq!(tail, vec![Lit::new(-3)]);
        assert!(t.is_lit_satisfied(Lit::new(1)));
        assert!(t.is_lit_satisfied(Lit::new(2)));
        assert!(t.is_lit_unassigned(Lit::new(3)));
    }
}
