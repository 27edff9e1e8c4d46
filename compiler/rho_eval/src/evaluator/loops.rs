//! `while`, `repeat` and `for`.
//!
//! Every loop evaluates to an invisible `NULL`.

use rho_ir::{Expr, Name, Stmt};
use rho_value::{invalid_for_sequence, EvalResult, Value};

use super::index::element;
use super::Evaluator;
use crate::operators::is_true;

impl Evaluator {
    pub(crate) fn eval_while(&mut self, cond: &Expr, body: &Stmt) -> EvalResult {
        let mut scoped = self.enter_loop();
        loop {
            let cond = scoped.eval_expr(cond)?;
            if !is_true(&cond) {
                break;
            }
            scoped.eval_stmt(body)?;
            if scoped.take_break() {
                break;
            }
        }
        Ok(Value::Null)
    }

    pub(crate) fn eval_repeat(&mut self, body: &Stmt) -> EvalResult {
        let mut scoped = self.enter_loop();
        loop {
            scoped.eval_stmt(body)?;
            if scoped.take_break() {
                break;
            }
        }
        Ok(Value::Null)
    }

    /// Binds `var` in the active frame to each element in turn. `NULL`
    /// iterates zero times.
    pub(crate) fn eval_for(&mut self, var: Name, iterable: &Expr, body: &Stmt) -> EvalResult {
        let sequence = self.eval_expr(iterable)?;
        if matches!(sequence, Value::Closure(_) | Value::Error(_)) {
            return Err(invalid_for_sequence());
        }
        tracing::trace!(iterations = sequence.len(), "for");

        let mut scoped = self.enter_loop();
        for offset in 0..sequence.len() {
            let Some(item) = element(&sequence, offset) else {
                break;
            };
            scoped.env.define(var, item);
            scoped.eval_stmt(body)?;
            if scoped.take_break() {
                break;
            }
        }
        Ok(Value::Null)
    }
}
