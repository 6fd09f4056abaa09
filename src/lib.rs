//! A DPLL SAT solver using two-watched-literal Boolean constraint
//! propagation and DLIS branching.
//!
//! The public surface is deliberately small: build a [`Solver`] from a
//! clause list (or a DIMACS document) and call [`Solver::solve`]. There is
//! no incremental interface — clauses are fixed at construction time, and
//! there is no clause learning, restarts, or proof logging.

mod clause;
mod data;
mod decide;
mod dimacs;
mod dlis;
mod format;
mod log;
mod propagate;
mod trail;

pub use data::{Lit, Var};
pub use dimacs::DimacsError;
pub use format::format_result;

use clause::{ClauseDb, ClauseIdx};
use data::VarVec;
use decide::DecisionOutcome;
use dlis::Dlis;
use trail::Trail;

/// The solver state: clause storage, the watch index, DLIS counts, and the
/// trail. Built once via [`Solver::new`] or [`Solver::from_dimacs`]; there
/// is no method to add clauses afterward.
pub struct Solver {
    clause_db: ClauseDb,
    watch_index: VarVec<Vec<ClauseIdx>>,
    dlis: Dlis,
    trail: Trail,
    propagation_queue: Vec<Lit>,
    satisfied_count: usize,
    unsatisfiable: bool,
}

/// A satisfying assignment, readable by variable number.
pub struct Model<'a> {
    trail: &'a Trail,
}

impl Model<'_> {
    /// `true` if `var` (a positive variable number) is assigned true.
    pub fn lit(&self, var: i32) -> bool {
        self.trail.is_lit_satisfied(Lit::new(var))
    }

    /// The full assignment as signed literals, one per variable, in order.
    pub fn assignment(&self) -> Vec<i32> {
        (1..=self.trail.total_vars() as i32)
            .map(|v| if self.lit(v) { v } else { -v })
            .collect()
    }
}

impl std::fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Model").field(&self.assignment()).finish()
    }
}

/// The outcome of [`Solver::solve`].
#[derive(Debug)]
pub enum SolveResult<'a> {
    Sat(Model<'a>),
    Unsat,
}

impl<'a> SolveResult<'a> {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveResult::Unsat)
    }

    /// Panics if the result is `Unsat`.
    pub fn unwrap_sat(self) -> Model<'a> {
        match self {
            SolveResult::Sat(model) => model,
            SolveResult::Unsat => panic!("called `unwrap_sat` on an `Unsat` result"),
        }
    }
}

impl Solver {
    /// Builds a solver from a clause list and a variable count (spec.md
    /// §4.1's model builder). `num_vars` must be at least the highest
    /// variable number used in `clauses`; it need not match exactly, since
    /// unused trailing variables are allowed and simply stay unassigned.
    ///
    /// Tautological clauses (containing both `l` and `-l`) are discarded
    /// silently, matching the original solver's behavior.
    pub fn new(clauses: Vec<Vec<i32>>, num_vars: usize) -> Solver {
        let mut solver = Solver {
            clause_db: ClauseDb::default(),
            watch_index: VarVec::new(),
            dlis: Dlis::new(),
            trail: Trail::new(),
            propagation_queue: Vec::new(),
            satisfied_count: 0,
            unsatisfiable: false,
        };

        if num_vars > 0 {
            let max_var = Var::new(num_vars as i32);
            solver.trail.expand(max_var);
            solver.watch_index.expand(max_var, Vec::new());
            solver.dlis.expand(max_var);
        }

        let raw: Vec<Vec<Lit>> = clauses
            .into_iter()
            .map(|cls| cls.into_iter().map(Lit::new).collect())
            .collect();

        solver.clause_db = ClauseDb::build(&raw);

        for (idx, clause) in solver.clause_db.iter_idx() {
            solver.watch_index[clause.watch1().var()].push(idx);
            if let Some(w2) = clause.watch2() {
                solver.watch_index[w2.var()].push(idx);
            }
            for &lit in clause.terms() {
                solver.dlis.bump(lit);
            }
        }

        solver
    }

    /// Parses a DIMACS CNF document and builds a solver from it.
    pub fn from_dimacs(input: &str) -> Result<Solver, DimacsError> {
        let parsed = dimacs::parse(input)?;
        Ok(Solver::new(parsed.clauses, parsed.num_vars))
    }

    fn model(&self) -> Model<'_> {
        Model { trail: &self.trail }
    }

    /// spec.md §4.9's top-level driver: seed a free choice and run the
    /// recursive decide procedure until the formula is satisfied or every
    /// branch has been exhausted.
    pub fn solve(&mut self) -> SolveResult<'_> {
        if self.is_fully_satisfied() {
            return SolveResult::Sat(self.model());
        }

        let Some(seed) = self.dlis.pick(&self.trail) else {
            return SolveResult::Unsat;
        };

        match self.decide(-seed) {
            DecisionOutcome::Sat => SolveResult::Sat(self.model()),
            DecisionOutcome::Conflict => SolveResult::Unsat,
        }
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.unsatisfiable
    }

    /// The number of variable slots the solver was built with.
    pub fn num_vars(&self) -> usize {
        self.trail.total_vars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_sat() {
        let mut solver = Solver::new(vec![vec![1]], 1);
        assert!(solver.solve().is_sat());
    }

    #[test]
    fn trivial_unsat() {
        let mut solver = Solver::new(vec![vec![1], vec![-1]], 1);
        assert!(solver.solve().is_unsat());
    }

    #[test]
    fn unit_propagation_cascade() {
        let mut solver = Solver::new(vec![vec![1], vec![-1, 2], vec![-2, 3]], 3);
        let result = solver.solve();
        let model = result.unwrap_sat();
        assert_eq!(model.assignment(), vec![1, 2, 3]);
    }

    #[test]
    fn requires_backtracking_out_of_a_bad_branch() {
        // Forces the solver into a conflict on one branch of the first
        // decision before finding the satisfying branch.
        let mut solver = Solver::new(
            vec![vec![1, 2], vec![-1, 3], vec![-1, -3], vec![-2, 4]],
            4,
        );
        let result = solver.solve();
        assert!(result.is_sat());
    }

    #[test]
    fn empty_formula_is_trivially_sat() {
        let mut solver = Solver::new(Vec::new(), 0);
        assert!(solver.solve().is_sat());
    }

    #[test]
    fn pigeonhole_two_into_one_is_unsat() {
        // Variables 1,2 both claim the same slot; clauses force both true
        // and forbid both true at once.
        let mut solver = Solver::new(vec![vec![1], vec![2], vec![-1, -2]], 2);
        assert!(solver.solve().is_unsat());
    }

    #[test]
    fn three_variable_exhaustive_unsat() {
        // All eight clauses over 3 variables: every assignment falsifies
        // one of them.
        let clauses = vec![
            vec![1, 2, 3],
            vec![1, 2, -3],
            vec![1, -2, 3],
            vec![1, -2, -3],
            vec![-1, 2, 3],
            vec![-1, 2, -3],
            vec![-1, -2, 3],
            vec![-1, -2, -3],
        ];
        let mut solver = Solver::new(clauses, 3);
        assert!(solver.solve().is_unsat());
    }

    #[test]
    fn tautology_is_ignored() {
        let mut solver = Solver::new(vec![vec![1, -1, 2], vec![-2]], 2);
        let result = solver.solve();
        let model = result.unwrap_sat();
        assert_eq!(model.assignment()[1], -2);
    }

    #[test]
    fn from_dimacs_parses_and_solves() {
        let cnf = "c trivial\np cnf 2 2\n1 2 0\n-1 0\n";
        let mut solver = Solver::from_dimacs(cnf).unwrap();
        let result = solver.solve();
        let model = result.unwrap_sat();
        assert_eq!(model.assignment(), vec![-1, 2]);
    }
}
