//! Turn syntax back into source text.
//!
//! Used when printing closures. Output is normalised: operators get single
//! spaces and blocks are indented by four spaces.

use std::fmt::Write;

use super::{AssignScope, Expr, ExprKind, Formal, FunctionLit, Stmt, StmtKind};
use crate::StringInterner;

/// Render a function literal as `function(x, y = 2) body`.
pub fn deparse_function(func: &FunctionLit, interner: &StringInterner) -> String {
    let mut d = Deparser::new(interner);
    d.function(func);
    d.out
}

/// Render a statement.
pub fn deparse_stmt(stmt: &Stmt, interner: &StringInterner) -> String {
    let mut d = Deparser::new(interner);
    d.stmt(stmt);
    d.out
}

struct Deparser<'a> {
    interner: &'a StringInterner,
    out: String,
    indent: usize,
}

impl<'a> Deparser<'a> {
    fn new(interner: &'a StringInterner) -> Self {
        Deparser {
            interner,
            out: String::new(),
            indent: 0,
        }
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn function(&mut self, func: &FunctionLit) {
        self.push("function(");
        for (i, formal) in func.formals.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            match formal {
                Formal::Param { name, default } => {
                    self.push(self.interner.lookup(*name));
                    if let Some(default) = default {
                        self.push(" = ");
                        self.expr(default);
                    }
                }
                Formal::Ellipsis => self.push("..."),
            }
        }
        self.push(") ");
        self.stmt(&func.body);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign {
                target,
                value,
                scope,
            } => {
                self.expr(target);
                self.push(match scope {
                    AssignScope::Local => " <- ",
                    AssignScope::Super => " <<- ",
                });
                self.expr(value);
            }
            StmtKind::Expr(expr) => self.expr(expr),
            StmtKind::Empty => {}
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.push("if (");
                self.expr(cond);
                self.push(") ");
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.push(" else ");
                    self.stmt(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.push("while (");
                self.expr(cond);
                self.push(") ");
                self.stmt(body);
            }
            StmtKind::Repeat { body } => {
                self.push("repeat ");
                self.stmt(body);
            }
            StmtKind::For {
                var,
                iterable,
                body,
            } => {
                let _ = write!(self.out, "for ({} in ", self.interner.lookup(*var));
                self.expr(iterable);
                self.push(") ");
                self.stmt(body);
            }
            StmtKind::Break => self.push("break"),
            StmtKind::Next => self.push("next"),
            StmtKind::Block(stmts) => {
                self.push("{");
                self.indent += 1;
                for s in stmts.iter().filter(|s| s.kind != StmtKind::Empty) {
                    self.newline();
                    self.stmt(s);
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }
            StmtKind::Version => self.push("version"),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Num(n) => {
                let _ = write!(self.out, "{n}");
            }
            ExprKind::Int(n) => {
                let _ = write!(self.out, "{n}L");
            }
            ExprKind::Str(name) => {
                let _ = write!(self.out, "{:?}", self.interner.lookup(*name));
            }
            ExprKind::Null => self.push("NULL"),
            ExprKind::True => self.push("TRUE"),
            ExprKind::False => self.push("FALSE"),
            ExprKind::Na => self.push("NA"),
            ExprKind::Inf => self.push("Inf"),
            ExprKind::NaN => self.push("NaN"),
            ExprKind::Ident(name) => self.push(self.interner.lookup(*name)),
            ExprKind::Binary { op, left, right } => {
                self.expr(left);
                if op.as_symbol() == ":" || op.as_symbol() == "^" {
                    self.push(op.as_symbol());
                } else {
                    let _ = write!(self.out, " {} ", op.as_symbol());
                }
                self.expr(right);
            }
            ExprKind::Unary { op, operand } => {
                self.push(op.as_symbol());
                self.expr(operand);
            }
            ExprKind::Call { callee, args } => {
                self.expr(callee);
                self.push("(");
                self.comma_list(args);
                self.push(")");
            }
            ExprKind::Index { target, indices } => {
                self.expr(target);
                self.push("[");
                self.comma_list(indices);
                self.push("]");
            }
            ExprKind::ListIndex { target, index } => {
                self.expr(target);
                self.push("[[");
                self.expr(index);
                self.push("]]");
            }
            ExprKind::Tagged { tag, value } => {
                let _ = write!(self.out, "{} = ", self.interner.lookup(*tag));
                self.expr(value);
            }
            ExprKind::Ellipsis => self.push("..."),
            ExprKind::Paren(inner) => {
                self.push("(");
                self.expr(inner);
                self.push(")");
            }
            ExprKind::Function(func) => self.function(func),
            ExprKind::Missing => {}
        }
    }

    fn comma_list(&mut self, exprs: &[Expr]) {
        for (i, e) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(if matches!(e.kind, ExprKind::Missing) { "," } else { ", " });
            }
            self.expr(e);
        }
    }
}
