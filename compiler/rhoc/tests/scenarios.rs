//! End-to-end scenarios: source text through lexer, parser and evaluator,
//! with output captured the way the console would show it.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use rho_eval::capture_handler;
use rhoc::{ErrorPolicy, RunOptions, Session};

/// Console text for `source`, with error lines interleaved after output.
fn run(source: &str) -> String {
    let mut session = Session::with_handler(capture_handler(), RunOptions::default());
    let outcome = session.run_source(source, ErrorPolicy::Continue).unwrap();
    let mut text = session.handler().take_output();
    for error in outcome.errors {
        text.push_str(&error);
        text.push('\n');
    }
    text
}

#[test]
fn arithmetic_scenario() {
    assert_eq!(
        run("1+2\n2*3.1\n5-1\n7/8\n11%%2\n3^2"),
        "[1] 3\n[1] 6.2\n[1] 4\n[1] 0.875\n[1] 1\n[1] 9\n"
    );
}

#[test]
fn tagged_and_positional_calls() {
    assert_eq!(
        run("b <- function(c, d) { c + d }\nb(c=1, d=2)\nb(3, 4)"),
        "[1] 3\n[1] 7\n"
    );
    assert_eq!(run("f <- function(a, b) a - b\nf(b=2, 1)"), "[1] -1\n");
}

#[test]
fn partial_match_ambiguity() {
    assert_eq!(
        run("f <- function(mean, median) 1\nf(m=3)"),
        "Error in f() : argument m matches multiple formal arguments\n"
    );
}

#[test]
fn defaults_and_missing_arguments() {
    assert_eq!(run("f <- function(a, b=4) a + b\nf(1)"), "[1] 5\n");
    assert_eq!(
        run("f <- function(a, b) a + b\nf(1)"),
        "Error in f() : argument \"b\" is missing, with no default\n"
    );
}

#[test]
fn unused_argument_numbering() {
    assert_eq!(
        run("f <- function(x) { 1 }\nf(1, 2)"),
        "Error in f() : unused argument (pos 2)\n"
    );
}

#[test]
fn ellipsis_forwarding_keeps_order() {
    let program = "g <- function(a, b, c) { c(a, b, c) }\n\
                   f <- function(...) { g(...) }\n\
                   f(3, 1, 2)";
    assert_eq!(run(program), "[1] 3 1 2\n");
}

#[test]
fn dimnames_round_trip() {
    let program = "x <- c(1,2,3,4,5,6)\ndim(x) <- c(2,3)\n\
                   dimnames(x) <- list(c(\"a1\",\"a2\"),c(\"b1\",\"b2\",\"b3\"))\n\
                   dimnames(x) <- list(c(\"z\"))\nx";
    assert_eq!(
        run(program),
        "   b1 b2 b3\na1  1  3  5\na2  2  4  6\n\
         Error: length of 'dimnames' [1] must match that of 'dims' [2]\n"
    );
}

#[test]
fn next_skips_only_current_iteration() {
    let program = "for (x in c(1,2,3,4,5)) {\n  if (x == 4) next\n  print(x)\n}";
    assert_eq!(run(program), "[1] 1\n[1] 2\n[1] 3\n[1] 5\n");
}

#[test]
fn break_ends_the_loop() {
    let program = "i <- 0\nrepeat {\n  i <- i + 1\n  if (i == 3) break\n}\ni";
    assert_eq!(run(program), "[1] 3\n");
}

#[test]
fn errors_do_not_stop_continue_mode() {
    assert_eq!(run("y\n2"), "[1] 2\nError: object 'y' not found\n");
}

#[test]
fn halt_mode_stops_at_first_error() {
    let mut session = Session::with_handler(capture_handler(), RunOptions::default());
    let outcome = session.run_source("1\nnope\n2", ErrorPolicy::Halt).unwrap();
    assert_eq!(outcome.errors, vec!["Error: object 'nope' not found".to_string()]);
    assert_eq!(session.handler().take_output(), "[1] 1\n");
}

#[test]
fn version_statement() {
    let output = run("version");
    assert!(output.contains("$language\n[1] \"rho\"\n"));
    assert!(output.contains(&format!("rho version {}", env!("CARGO_PKG_VERSION"))));
}
