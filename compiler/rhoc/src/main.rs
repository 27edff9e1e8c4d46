//! rho CLI
//!
//! Runs scripts, one-off expressions, or an interactive session.

mod commands;

use commands::{lex_file, parse_file, run_expr, run_file, run_repl};
use rhoc::{init_tracing, RunOptions};

fn main() {
    let mut options = RunOptions::default();
    let args: Vec<String> = std::env::args()
        .skip(1)
        .filter(|arg| match arg.as_str() {
            "--trace" => {
                options.trace = true;
                false
            }
            "--echo" => {
                options.echo_source = true;
                false
            }
            _ => true,
        })
        .collect();

    init_tracing(options.trace);

    let Some(command) = args.first() else {
        run_repl(options);
        return;
    };

    match command.as_str() {
        "run" => {
            if args.len() < 2 {
                eprintln!("Usage: rho run <file.R> [--echo] [--trace]");
                std::process::exit(1);
            }
            run_file(&args[1], options);
        }
        "-e" => {
            if args.len() < 2 {
                eprintln!("Usage: rho -e <code>");
                std::process::exit(1);
            }
            run_expr(&args[1..].join("\n"), options);
        }
        "repl" => run_repl(options),
        "lex" => {
            if args.len() < 2 {
                eprintln!("Usage: rho lex <file.R>");
                std::process::exit(1);
            }
            lex_file(&args[1]);
        }
        "parse" => {
            if args.len() < 2 {
                eprintln!("Usage: rho parse <file.R>");
                std::process::exit(1);
            }
            parse_file(&args[1]);
        }
        "version" | "--version" | "-V" => {
            println!("rho version {}", env!("CARGO_PKG_VERSION"));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        path if std::path::Path::new(path).is_file() => {
            run_file(path, options);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("rho - an R-like interpreter");
    println!();
    println!("Usage: rho [command] [options]");
    println!();
    println!("Commands:");
    println!("  run <file>     Run a script, stopping at the first error");
    println!("  -e <code>      Evaluate code given on the command line");
    println!("  repl           Start an interactive session (default)");
    println!("  lex <file>     Show the token stream");
    println!("  parse <file>   Show the parsed statements");
    println!("  version        Show version information");
    println!("  help           Show this help message");
    println!();
    println!("Options:");
    println!("  --echo         Echo each statement before its result");
    println!("  --trace        Log evaluation (rho_eval=debug) to stderr");
    println!();
    println!("Logging is controlled by RHO_LOG (or RUST_LOG), e.g. RHO_LOG=rho_eval=trace");
}
