//! Interactive read-eval-print loop.

use std::io::{BufRead, IsTerminal, Write};

use rhoc::{render_parse_error, ErrorPolicy, RunOptions, Session};

use super::report_outcome;

const PROMPT: &str = "> ";
const CONTINUATION: &str = "+ ";

/// Read statements from stdin until end of input or `quit()`.
///
/// Lines accumulate while the parser reports the input as incomplete, so
/// multi-line function bodies and blocks can be typed naturally. Prompts
/// are only shown when stdin is a terminal.
pub fn run_repl(options: RunOptions) {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut session = Session::new(options);
    let mut pending = String::new();

    loop {
        if interactive {
            prompt(if pending.is_empty() { PROMPT } else { CONTINUATION });
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {e}");
                std::process::exit(1);
            }
        }
        pending.push_str(&line);

        let program = match session.parse(&pending) {
            Ok(program) => program,
            Err(err) if err.is_incomplete() => continue,
            Err(err) => {
                eprint!("{}", render_parse_error("<stdin>", &pending, &err));
                pending.clear();
                continue;
            }
        };
        pending.clear();

        let outcome = session.run_program(&program, ErrorPolicy::Continue);
        report_outcome(&outcome);
        if outcome.quit {
            return;
        }
    }

    if !pending.trim().is_empty() {
        if let Err(err) = session.parse(&pending) {
            eprint!("{}", render_parse_error("<stdin>", &pending, &err));
        }
    }
}

fn prompt(text: &str) {
    let mut out = std::io::stdout().lock();
    let _ = out.write_all(text.as_bytes());
    let _ = out.flush();
}
