//! Command-line entry point: reads a DIMACS CNF file, solves it, and
//! prints the result the way the original tool does.

use std::process::ExitCode;

use dlissat::{format_result, Solver};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "dlissat".to_string());

    let Some(path) = args.next() else {
        eprintln!("usage: {program} <cnf-file>");
        return ExitCode::FAILURE;
    };

    let input = match std::fs::read_to_string(&path) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{program}: failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut solver = match Solver::from_dimacs(&input) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("{program}: failed to parse {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let num_vars = solver.num_vars();
    let result = solver.solve();
    print!("{}", format_result(&result, num_vars));

    ExitCode::SUCCESS
}
