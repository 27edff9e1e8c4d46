#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use rho_ir::{AssignScope, BinaryOp, Expr, ExprKind, Formal, StmtKind, UnaryOp};

fn parse_src(source: &str) -> (Vec<Stmt>, StringInterner) {
    let interner = StringInterner::new();
    let tokens = rho_lexer::lex(source, &interner);
    let stmts = parse(&tokens, &interner).unwrap();
    (stmts, interner)
}

fn parse_err(source: &str) -> ParseError {
    let interner = StringInterner::new();
    let tokens = rho_lexer::lex(source, &interner);
    parse(&tokens, &interner).unwrap_err()
}

fn expr_of(stmt: &Stmt) -> &Expr {
    match &stmt.kind {
        StmtKind::Expr(e) => e,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn binary_op(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => (*op, left, right),
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_statements_split_on_newlines_and_semicolons() {
    let (stmts, _) = parse_src("1+2\n2*3.1; 5-1\n\n7/8");
    assert_eq!(stmts.len(), 4);
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let (stmts, _) = parse_src("1 + 2 * 3");
    let (op, left, right) = binary_op(expr_of(&stmts[0]));
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(left.kind, ExprKind::Num(1.0));
    assert_eq!(binary_op(right).0, BinaryOp::Mul);
}

#[test]
fn test_power_binds_tighter_than_negation() {
    let (stmts, _) = parse_src("-2^2");
    let ExprKind::Unary { op, operand } = &expr_of(&stmts[0]).kind else {
        panic!("expected unary");
    };
    assert_eq!(*op, UnaryOp::Neg);
    assert_eq!(binary_op(operand).0, BinaryOp::Pow);
}

#[test]
fn test_power_is_right_associative() {
    let (stmts, _) = parse_src("2^3^2");
    let (op, left, right) = binary_op(expr_of(&stmts[0]));
    assert_eq!(op, BinaryOp::Pow);
    assert_eq!(left.kind, ExprKind::Num(2.0));
    assert_eq!(binary_op(right).0, BinaryOp::Pow);
}

#[test]
fn test_negation_binds_tighter_than_sequence() {
    let (stmts, _) = parse_src("-1:3");
    let (op, left, _) = binary_op(expr_of(&stmts[0]));
    assert_eq!(op, BinaryOp::Sequence);
    assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
}

#[test]
fn test_modulo_binds_tighter_than_multiplication() {
    let (stmts, _) = parse_src("4 * 11 %% 2");
    let (op, _, right) = binary_op(expr_of(&stmts[0]));
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(binary_op(right).0, BinaryOp::Mod);
}

#[test]
fn test_not_is_looser_than_comparison() {
    let (stmts, _) = parse_src("!x == 1");
    let ExprKind::Unary { op, operand } = &expr_of(&stmts[0]).kind else {
        panic!("expected unary");
    };
    assert_eq!(*op, UnaryOp::Not);
    assert_eq!(binary_op(operand).0, BinaryOp::Eq);
}

#[test]
fn test_assignment_forms() {
    let (stmts, interner) = parse_src("x <- 1\ny = 2\n3 -> z\nw <<- 4\n5 ->> v");
    let expected = [
        ("x", AssignScope::Local),
        ("y", AssignScope::Local),
        ("z", AssignScope::Local),
        ("w", AssignScope::Super),
        ("v", AssignScope::Super),
    ];
    for (stmt, (name, expected_scope)) in stmts.iter().zip(expected) {
        let StmtKind::Assign { target, scope, .. } = &stmt.kind else {
            panic!("expected assignment, got {:?}", stmt.kind);
        };
        assert_eq!(target.as_ident(), Some(interner.intern(name)));
        assert_eq!(*scope, expected_scope);
    }
}

#[test]
fn test_attribute_replacement_target_is_call() {
    let (stmts, interner) = parse_src("dim(x) <- c(2, 3)");
    let StmtKind::Assign { target, .. } = &stmts[0].kind else {
        panic!("expected assignment");
    };
    let ExprKind::Call { callee, args } = &target.kind else {
        panic!("expected call target");
    };
    assert_eq!(callee.as_ident(), Some(interner.intern("dim")));
    assert_eq!(args.len(), 1);
}

#[test]
fn test_function_literal_formals() {
    let (stmts, interner) = parse_src("f <- function(a, b = 4, ...) { a + b }");
    let StmtKind::Assign { value, .. } = &stmts[0].kind else {
        panic!("expected assignment");
    };
    let ExprKind::Function(func) = &value.kind else {
        panic!("expected function literal");
    };
    assert_eq!(func.formals.len(), 3);
    assert_eq!(func.formals[0].name(), Some(interner.intern("a")));
    assert!(matches!(
        &func.formals[1],
        Formal::Param { default: Some(_), .. }
    ));
    assert_eq!(func.formals[2], Formal::Ellipsis);
    assert!(matches!(func.body.kind, StmtKind::Block(_)));
}

#[test]
fn test_call_arguments_tagged_and_forwarded() {
    let (stmts, interner) = parse_src("g(1, b = 2, ...)");
    let ExprKind::Call { args, .. } = &expr_of(&stmts[0]).kind else {
        panic!("expected call");
    };
    assert_eq!(args[0].kind, ExprKind::Num(1.0));
    let ExprKind::Tagged { tag, .. } = &args[1].kind else {
        panic!("expected tagged argument");
    };
    assert_eq!(*tag, interner.intern("b"));
    assert_eq!(args[2].kind, ExprKind::Ellipsis);
}

#[test]
fn test_newlines_ignored_inside_parentheses() {
    let (stmts, _) = parse_src("f(1,\n  2\n)\n");
    assert_eq!(stmts.len(), 1);
    let ExprKind::Call { args, .. } = &expr_of(&stmts[0]).kind else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 2);
}

#[test]
fn test_newline_after_operator_continues() {
    let (stmts, _) = parse_src("1 +\n 2");
    assert_eq!(stmts.len(), 1);
    assert_eq!(binary_op(expr_of(&stmts[0])).0, BinaryOp::Add);
}

#[test]
fn test_matrix_subscripts_with_missing_positions() {
    let (stmts, _) = parse_src("m[1, ]\nm[, 2]\nx[]");
    let ExprKind::Index { indices, .. } = &expr_of(&stmts[0]).kind else {
        panic!("expected index");
    };
    assert_eq!(indices.len(), 2);
    assert_eq!(indices[1].kind, ExprKind::Missing);

    let ExprKind::Index { indices, .. } = &expr_of(&stmts[1]).kind else {
        panic!("expected index");
    };
    assert_eq!(indices[0].kind, ExprKind::Missing);

    let ExprKind::Index { indices, .. } = &expr_of(&stmts[2]).kind else {
        panic!("expected index");
    };
    assert!(indices.is_empty());
}

#[test]
fn test_list_index() {
    let (stmts, _) = parse_src("l[[2]]");
    let ExprKind::ListIndex { index, .. } = &expr_of(&stmts[0]).kind else {
        panic!("expected list index");
    };
    assert_eq!(index.kind, ExprKind::Num(2.0));
}

#[test]
fn test_if_else_on_following_line_inside_block() {
    let (stmts, _) = parse_src("{\n if (x) 1\n else 2\n}");
    let StmtKind::Block(body) = &stmts[0].kind else {
        panic!("expected block");
    };
    assert_eq!(body.len(), 1);
    assert!(matches!(
        body[0].kind,
        StmtKind::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn test_loops() {
    let (stmts, interner) =
        parse_src("for (x in c(1,2,3)) { if (x == 2) next; print(x) }\nwhile (i < 3) i <- i + 1\nrepeat break");
    let StmtKind::For { var, body, .. } = &stmts[0].kind else {
        panic!("expected for");
    };
    assert_eq!(*var, interner.intern("x"));
    let StmtKind::Block(inner) = &body.kind else {
        panic!("expected block body");
    };
    assert_eq!(inner.len(), 2);
    assert!(matches!(stmts[1].kind, StmtKind::While { .. }));
    let StmtKind::Repeat { body } = &stmts[2].kind else {
        panic!("expected repeat");
    };
    assert_eq!(body.kind, StmtKind::Break);
}

#[test]
fn test_version_statement() {
    let (stmts, _) = parse_src("version\nversion(1)");
    assert_eq!(stmts[0].kind, StmtKind::Version);
    assert!(matches!(stmts[1].kind, StmtKind::Expr(_)));
}

#[test]
fn test_repeated_formal_is_rejected() {
    assert_eq!(
        parse_err("function(x, x) 1").to_string(),
        "repeated formal argument 'x'"
    );
    assert_eq!(
        parse_err("function(..., ...) 1").to_string(),
        "repeated formal argument '...'"
    );
}

#[test]
fn test_unexpected_token() {
    let err = parse_err("1 2");
    assert_eq!(err.to_string(), "unexpected numeric constant");
    assert!(!err.is_incomplete());
}

#[test]
fn test_incomplete_input() {
    assert!(parse_err("f(1,").is_incomplete());
    assert!(parse_err("x <- ").is_incomplete());
    assert!(parse_err("{ 1").is_incomplete());
}

#[test]
fn test_invalid_token() {
    assert!(matches!(parse_err("1 @ 2"), ParseError::InvalidToken { .. }));
}
