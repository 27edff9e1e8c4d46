//! Command handlers for the `rho` CLI.
//!
//! Shared helpers (`read_file`, `report_outcome`) live here in the module
//! root; each submodule implements one command.

use rhoc::Outcome;

mod debug;
mod repl;
mod run;

pub use debug::{lex_file, parse_file};
pub use repl::run_repl;
pub use run::{run_expr, run_file};

/// Read a file or exit with a readable message.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Print error values to stderr.
pub(super) fn report_outcome(outcome: &Outcome) {
    for error in &outcome.errors {
        eprintln!("{error}");
    }
}
