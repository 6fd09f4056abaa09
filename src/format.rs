//! Result formatting (spec.md §6): renders a `SolveResult` the way the
//! CLI prints it.

use std::fmt::Write as _;

use crate::SolveResult;

/// Produces `RESULT: SAT` followed by an `ASSIGNMENT:` line listing every
/// variable `1..=num_vars` as `var=1` or `var=0`, or just `RESULT: UNSAT`.
pub fn format_result(result: &SolveResult<'_>, num_vars: usize) -> String {
    match result {
        SolveResult::Unsat => "RESULT: UNSAT\n".to_string(),
        SolveResult::Sat(model) => {
            let mut out = String::from("RESULT: SAT\n");
            out.push_str("ASSIGNMENT:");
            for var in 1..=num_vars as i32 {
                let bit = model.lit(var) as u8;
                write!(out, " {var}={bit}").expect("writing to a String cannot fail");
            }
            out.push('\n');
            out
        }
    }
}
