//! rho Eval - tree-walking evaluator for the rho interpreter.
//!
//! # Architecture
//!
//! - [`Environment`]: the chain of [`Frame`]s; callee frames link to the
//!   caller's frame, so name resolution is dynamic
//! - [`match_arguments`]: exact, partial and positional argument matching
//! - [`apply_binary`] / [`apply_unary`]: the vector arithmetic engine
//! - [`format_value`]: console rendering of values
//! - [`Evaluator`]: statement and expression dispatch, calls, builtins,
//!   subscripts and replacement forms
//!
//! Value types and error constructors live in `rho_value` and are
//! re-exported here for convenience.

mod binder;
mod control;
mod environment;
mod evaluator;
mod format;
mod operators;
mod print_handler;

pub use rho_value::{
    ErrorCategory, EvalError, EvalErrorKind, EvalResult, IndexIter, Recursive, Value,
};

pub use binder::{match_arguments, FormalSlot, Matched};
pub use control::{Control, LoopState};
pub use environment::{Environment, Frame, LocalScope};
pub use evaluator::{combine, Evaluator, EvaluatorBuilder, FrameGuard, LoopGuard};
pub use format::{format_number, format_numbers, format_value, quote};
pub use operators::{apply_binary, apply_unary, is_true, scalar_arith, scalar_compare, sequence};
pub use print_handler::{
    capture_handler, console_handler, silent_handler, CaptureSink, ConsoleSink, PrintHandler,
    SharedPrintHandler,
};

#[cfg(test)]
mod tests;
