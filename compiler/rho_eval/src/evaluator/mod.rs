//! The tree-walking evaluator.
//!
//! [`Evaluator`] owns the frame chain, the control fields and the output
//! sink. Internally every step returns [`EvalResult`] and failures propagate
//! with `?`; [`Evaluator::eval_statement`] turns a failure into an error
//! value for the driver.

mod assign;
mod builder;
mod builtins;
mod call;
mod index;
mod interned_names;
mod loops;
mod scope_guard;

use std::sync::Arc;

use rho_ir::{BinaryOp, Expr, ExprKind, SharedInterner, Stmt, StmtKind, StringInterner};
use rho_stack::ensure_sufficient_stack;
use rho_value::{
    ellipsis_context, loop_control_outside_loop, na_real, object_not_found, EvalResult, Value,
};

use crate::control::{Control, LoopState};
use crate::environment::Environment;
use crate::format::format_value;
use crate::operators::{apply_binary, apply_unary, is_true};
use crate::print_handler::SharedPrintHandler;

pub use builder::EvaluatorBuilder;
pub use builtins::combine;
pub use scope_guard::{FrameGuard, LoopGuard};

pub(crate) use interned_names::WellKnownNames;

/// Evaluator state: frames, control fields and configuration.
pub struct Evaluator {
    pub(crate) interner: SharedInterner,
    pub(crate) env: Environment,
    pub(crate) names: WellKnownNames,
    pub(crate) control: Control,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) quit_requested: bool,
    /// Log every top-level statement at `info` level.
    pub(crate) trace: bool,
}

impl Evaluator {
    /// Fresh evaluator with an empty root frame, printing to stdout.
    pub fn init(interner: SharedInterner) -> Self {
        EvaluatorBuilder::new(interner).build()
    }

    pub fn builder(interner: SharedInterner) -> EvaluatorBuilder {
        EvaluatorBuilder::new(interner)
    }

    /// Evaluate one top-level statement.
    ///
    /// Failures come back as [`Value::Error`]; the frame chain is restored
    /// to the root either way.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval_statement(&mut self, stmt: &Stmt) -> Value {
        if self.trace {
            tracing::info!(
                statement = %rho_ir::deparse_stmt(stmt, &self.interner),
                "eval"
            );
        }
        match self.eval_stmt(stmt) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "statement failed");
                self.control.loop_state = LoopState::Normal;
                Value::error(err)
            }
        }
    }

    /// Auto-printing of the last result is suppressed.
    pub fn is_invisible(&self) -> bool {
        self.control.invisible
    }

    pub fn clear_invisible(&mut self) {
        self.control.invisible = false;
    }

    /// `quit()` has been evaluated.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Value bound to `name` in the active frame chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let name = self.interner.get(name)?;
        self.env.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Render a value the way auto-printing shows it.
    pub fn format(&self, value: &Value) -> String {
        format_value(value, &self.interner)
    }

    pub(crate) fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_stmt_inner(stmt))
    }

    fn eval_stmt_inner(&mut self, stmt: &Stmt) -> EvalResult {
        match &stmt.kind {
            StmtKind::Assign {
                target,
                value,
                scope,
            } => self.eval_assign(target, value, *scope),
            StmtKind::Expr(expr) => self.eval_expr(expr),
            StmtKind::Empty => Ok(Value::Null),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval_expr(cond)?;
                if is_true(&cond) {
                    self.eval_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_stmt(else_branch)
                } else {
                    self.control.invisible = true;
                    Ok(Value::Null)
                }
            }
            StmtKind::While { cond, body } => self.eval_while(cond, body),
            StmtKind::Repeat { body } => self.eval_repeat(body),
            StmtKind::For {
                var,
                iterable,
                body,
            } => self.eval_for(*var, iterable, body),
            StmtKind::Break => self.signal(LoopState::Break),
            StmtKind::Next => self.signal(LoopState::Next),
            StmtKind::Block(stmts) => self.eval_block(stmts),
            StmtKind::Version => {
                self.control.invisible = false;
                Ok(builtins::version_info())
            }
        }
    }

    /// Statements in order; the value is the last non-empty statement's.
    /// A pending `break`/`next` stops the block.
    fn eval_block(&mut self, stmts: &[Stmt]) -> EvalResult {
        self.control.invisible = false;
        let mut last = Value::Null;
        for stmt in stmts {
            if matches!(stmt.kind, StmtKind::Empty) {
                continue;
            }
            last = self.eval_stmt(stmt)?;
            if self.control.loop_state.is_unwinding() {
                break;
            }
        }
        Ok(last)
    }

    fn signal(&mut self, state: LoopState) -> EvalResult {
        if self.control.loop_state == LoopState::Normal {
            return Err(loop_control_outside_loop());
        }
        self.control.loop_state = state;
        Ok(Value::Null)
    }

    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|err| err.with_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        let value = match &expr.kind {
            ExprKind::Num(n) => Value::num(*n),
            ExprKind::Int(i) => Value::int(*i),
            ExprKind::Str(s) => Value::text(self.interner.lookup(*s)),
            ExprKind::Null | ExprKind::False | ExprKind::Missing => Value::Null,
            ExprKind::True => Value::num(1.0),
            ExprKind::Na => Value::num(na_real()),
            ExprKind::Inf => Value::num(f64::INFINITY),
            ExprKind::NaN => Value::num(f64::NAN),
            ExprKind::Ident(name) => self
                .env
                .lookup(*name)
                .ok_or_else(|| object_not_found(self.interner.lookup(*name)))?,
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right)?,
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                apply_unary(*op, &operand)?
            }
            ExprKind::Index { target, indices } => self.eval_index(target, indices)?,
            ExprKind::ListIndex { target, index } => self.eval_list_index(target, index)?,
            ExprKind::Tagged { value, .. } | ExprKind::Paren(value) => self.eval_expr(value)?,
            ExprKind::Function(func) => Value::closure(Arc::clone(func)),
            ExprKind::Ellipsis => return Err(ellipsis_context()),
            ExprKind::Call { callee, args } => return self.eval_call(callee, args),
        };
        self.control.invisible = false;
        Ok(value)
    }

    /// `&&`/`||` short-circuit and return an operand; everything else is
    /// evaluated left to right and handed to the vector engine.
    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        match op {
            BinaryOp::And | BinaryOp::AndVector => {
                let x = self.eval_expr(left)?;
                if !is_true(&x) {
                    return Ok(Value::Null);
                }
                let y = self.eval_expr(right)?;
                Ok(if is_true(&y) { y } else { Value::Null })
            }
            BinaryOp::Or | BinaryOp::OrVector => {
                let x = self.eval_expr(left)?;
                if is_true(&x) {
                    return Ok(x);
                }
                let y = self.eval_expr(right)?;
                Ok(if is_true(&y) { y } else { Value::Null })
            }
            _ => {
                let x = self.eval_expr(left)?;
                let y = self.eval_expr(right)?;
                apply_binary(op, &x, &y)
            }
        }
    }
}
