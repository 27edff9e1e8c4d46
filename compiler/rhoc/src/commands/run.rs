//! `rho run <file>` and `rho -e <code>`.

use rhoc::{render_parse_error, ErrorPolicy, RunOptions, Session, SessionError};

use super::{read_file, report_outcome};

/// Run a script, exiting with status 1 on the first error.
pub fn run_file(path: &str, options: RunOptions) {
    let source = read_file(path);
    run_source(path, &source, options, ErrorPolicy::Halt);
}

/// Run code given on the command line; every statement gets a chance.
pub fn run_expr(code: &str, options: RunOptions) {
    run_source("<expr>", code, options, ErrorPolicy::Continue);
}

fn run_source(label: &str, source: &str, options: RunOptions, policy: ErrorPolicy) {
    let mut session = Session::new(options);
    match session.run_source(source, policy) {
        Ok(outcome) => {
            report_outcome(&outcome);
            if outcome.failed() {
                std::process::exit(1);
            }
        }
        Err(SessionError::Parse(err)) => {
            eprint!("{}", render_parse_error(label, source, &err));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
