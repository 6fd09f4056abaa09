//! Debug-only state dumps, grounded on the teacher's `solver::log` module.

use tracing::{debug, instrument};

use crate::Solver;

#[allow(unused)]
impl Solver {
    #[instrument(skip_all)]
    pub(crate) fn log_state(&self) {
        #[cfg(debug_assertions)]
        for clause in self.clause_db.iter_idx() {
            let (_, clause) = clause;
            let cls_str = self.trail.fmt_clause(clause.terms());
            debug!(satisfied = clause.is_satisfied(), "{cls_str}");
        }
    }
}
