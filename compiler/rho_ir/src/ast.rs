//! Syntax tree consumed by the evaluator.
//!
//! A boxed tree: expressions own their children directly. Function literals
//! are reference-counted because a closure value keeps its literal alive
//! after the statement that created it has been evaluated.

mod deparse;

use std::sync::Arc;

use crate::{Name, Span};

pub use deparse::{deparse_function, deparse_stmt};

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `%%`
    Mod,
    /// `^`
    Pow,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    /// `&&`
    And,
    /// `&`
    AndVector,
    /// `||`
    Or,
    /// `|`
    OrVector,
    /// `a:b`
    Sequence,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%%",
            BinaryOp::Pow => "^",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::AndVector => "&",
            BinaryOp::Or => "||",
            BinaryOp::OrVector => "|",
            BinaryOp::Sequence => ":",
        }
    }

    /// Relational operators compare first elements only.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::Eq
                | BinaryOp::NotEq
        )
    }

    /// Element-wise arithmetic operators.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::Mod
                | BinaryOp::Pow
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The identifier this expression names, if it is a bare symbol.
    pub fn as_ident(&self) -> Option<Name> {
        match self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Num(f64),
    Int(i64),
    Str(Name),
    Null,
    True,
    False,
    Na,
    Inf,
    NaN,
    Ident(Name),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `callee(args)`; arguments may be [`ExprKind::Tagged`] or
    /// [`ExprKind::Ellipsis`].
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `target[i, j, ...]`; omitted positions are [`ExprKind::Missing`].
    Index {
        target: Box<Expr>,
        indices: Vec<Expr>,
    },
    /// `target[[index]]`
    ListIndex {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    /// `tag = value` inside an argument list.
    Tagged {
        tag: Name,
        value: Box<Expr>,
    },
    /// `...` forwarded in an argument list.
    Ellipsis,
    Paren(Box<Expr>),
    Function(Arc<FunctionLit>),
    /// Empty subscript position, as in `m[, 2]`.
    Missing,
}

/// A formal parameter of a function literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Formal {
    Param { name: Name, default: Option<Expr> },
    Ellipsis,
}

impl Formal {
    pub fn name(&self) -> Option<Name> {
        match self {
            Formal::Param { name, .. } => Some(*name),
            Formal::Ellipsis => None,
        }
    }
}

/// `function(formals) body`
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLit {
    pub formals: Vec<Formal>,
    pub body: Stmt,
    pub span: Span,
}

impl FunctionLit {
    pub fn has_ellipsis(&self) -> bool {
        self.formals.iter().any(|f| matches!(f, Formal::Ellipsis))
    }
}

/// Where an assignment stores its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignScope {
    /// `<-`, `->`, `=`: the current frame.
    Local,
    /// `<<-`, `->>`: the nearest enclosing frame binding the name.
    Super,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Both `target <- value` and `value -> target`.
    Assign {
        target: Expr,
        value: Expr,
        scope: AssignScope,
    },
    Expr(Expr),
    Empty,
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    Repeat {
        body: Box<Stmt>,
    },
    For {
        var: Name,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Break,
    Next,
    Block(Vec<Stmt>),
    Version,
}
