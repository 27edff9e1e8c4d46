//! End-to-end evaluator tests: source text in, console text out.

#![allow(clippy::unwrap_used)]

mod eval_tests;

use rho_ir::SharedInterner;

use crate::{capture_handler, Evaluator};

/// Evaluate `source` the way the driver does: auto-print visible results
/// and errors, stop after `quit()`. Returns everything written.
pub(crate) fn run(source: &str) -> String {
    let interner = SharedInterner::new();
    let tokens = rho_lexer::lex(source, &interner);
    let program = rho_parse::parse(&tokens, &interner).unwrap();
    let handler = capture_handler();
    let mut evaluator = Evaluator::builder(interner)
        .print_handler(handler.clone())
        .build();
    for stmt in &program {
        let value = evaluator.eval_statement(stmt);
        if value.is_error() || !evaluator.is_invisible() {
            handler.write_line(&evaluator.format(&value));
        }
        evaluator.clear_invisible();
        if evaluator.quit_requested() {
            break;
        }
    }
    handler.take_output()
}
