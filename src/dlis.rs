//! DLIS branching (spec.md §4.1, §4.8): per-literal occurrence counts over
//! the clauses that are not yet satisfied, used to pick the next decision.

use crate::data::{Lit, LitVec, Var};
use crate::trail::Trail;

#[derive(Debug, Clone, Default)]
pub(crate) struct Dlis {
    counts: LitVec<i64>,
}

impl Dlis {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn expand(&mut self, max_var: Var) {
        let max_lit = Lit::from(max_var);
        self.counts.expand(max_lit, 0);
        self.counts.expand(-max_lit, 0);
    }

    pub(crate) fn bump(&mut self, lit: Lit) {
        self.counts[lit] += 1;
    }

    /// Called when a clause containing `lit` becomes satisfied, or stops
    /// being satisfied, respectively (spec.md §4.2, §4.3).
    pub(crate) fn release(&mut self, lit: Lit) {
        debug_assert!(self.counts[lit] > 0, "DLIS underflow for {lit:?}");
        self.counts[lit] -= 1;
    }

    pub(crate) fn count(&self, lit: Lit) -> i64 {
        self.counts[lit]
    }

    /// spec.md §4.8 — the literal with the highest count among unassigned
    /// variables; ties favor the lowest signed literal value. Returns
    /// `None` when no variable is unassigned.
    pub(crate) fn pick(&self, trail: &Trail) -> Option<Lit> {
        let mut best: Option<(Lit, i64)> = None;
        for var in trail.unassigned_vars() {
            for lit in [Lit::from(var), -Lit::from(var)] {
                let score = self.count(lit);
                let take = match best {
                    None => true,
                    Some((best_lit, best_score)) => {
                        score > best_score || (score == best_score && lit.get() < best_lit.get())
                    }
                };
                if take {
                    best = Some((lit, score));
                }
            }
        }
        best.map(|(lit, _)| lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::TrailReason;

    #[test]
    fn picks_highest_count() {
        let mut trail = Trail::new();
        trail.expand(Var::new(2));
        let mut dlis = Dlis::new();
        dlis.expand(Var::new(2));
        dlis.bump(Lit::new(1));
        dlis.bump(Lit::new(1));
        dlis.bump(Lit::new(-2));

        assert_eq!(dlis.pick(&trail), Some(Lit::new(1)));
    }

    #[test]
    fn ties_favor_lowest_signed_value() {
        let mut trail = Trail::new();
        trail.expand(Var::new(2));
        let mut dlis = Dlis::new();
        dlis.expand(Var::new(2));
        dlis.bump(Lit::new(2));
        dlis.bump(Lit::new(-1));

        assert_eq!(dlis.pick(&trail), Some(Lit::new(-1)));
    }

    #[test]
    fn skips_assigned_variables() {
        let mut trail = Trail::new();
        trail.expand(Var::new(2));
        trail.assign_lit(Lit::new(1), TrailReason::Decision);
        let mut dlis = Dlis::new();
        dlis.expand(Var::new(2));
        dlis.bump(Lit::new(1));
        dlis.bump(Lit::new(1));
        dlis.bump(Lit::new(-2));

        assert_eq!(dlis.pick(&trail), Some(Lit::new(-2)));
    }

    #[test]
    fn no_unassigned_variables_returns_none() {
        let mut trail = Trail::new();
        trail.expand(Var::new(1));
        trail.assign_lit(Lit::new(1), TrailReason::Decision);
        let dlis = Dlis::new();
        assert_eq!(dlis.pick(&trail), None);
    }
}
