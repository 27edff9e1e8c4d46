//! Shared front-end types for the rho interpreter.
//!
//! Everything that the lexer, parser and evaluator exchange lives here:
//! source [`Span`]s, interned [`Name`]s, the [`TokenKind`] stream produced
//! by the scanner, and the boxed syntax tree ([`Expr`], [`Stmt`]) consumed by
//! the evaluator.

pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    deparse_function, deparse_stmt, AssignScope, BinaryOp, Expr, ExprKind, Formal, FunctionLit,
    Stmt, StmtKind, UnaryOp,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
