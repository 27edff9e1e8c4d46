//! Expression productions, loosest binding first:
//!
//! `|| |` < `&& &` < `!` < comparison < `+ -` < `* /` < `%%` < `:` <
//! unary `- +` < `^` < postfix call / index.

use std::sync::Arc;

use rho_ir::{BinaryOp, Expr, ExprKind, Formal, FunctionLit, Span, TokenKind, UnaryOp};
use rho_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_or())
    }

    /// Consume the operator and any newlines after it, then parse the
    /// right operand and build the node.
    fn binary_rhs(
        &mut self,
        left: Expr,
        op: BinaryOp,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        self.advance();
        self.skip_newlines();
        let right = operand(self)?;
        let span = left.span.merge(right.span);
        Ok(Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while let Some(op) = match_or_op(self.peek()) {
            left = self.binary_rhs(left, op, Self::parse_and)?;
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while let Some(op) = match_and_op(self.peek()) {
            left = self.binary_rhs(left, op, Self::parse_not)?;
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Bang) {
            let start = self.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_not())?;
            return Ok(unary(UnaryOp::Not, operand, start));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = match_comparison_op(self.peek()) {
            left = self.binary_rhs(left, op, Self::parse_additive)?;
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = match_additive_op(self.peek()) {
            left = self.binary_rhs(left, op, Self::parse_multiplicative)?;
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_special()?;
        while let Some(op) = match_multiplicative_op(self.peek()) {
            left = self.binary_rhs(left, op, Self::parse_special)?;
        }
        Ok(left)
    }

    fn parse_special(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_range()?;
        while self.check(TokenKind::Modulo) {
            left = self.binary_rhs(left, BinaryOp::Mod, Self::parse_range)?;
        }
        Ok(left)
    }

    fn parse_range(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.check(TokenKind::Colon) {
            left = self.binary_rhs(left, BinaryOp::Sequence, Self::parse_unary)?;
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_power(),
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(unary(op, operand, start))
    }

    /// `^` is right associative and its exponent may carry a sign.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_postfix()?;
        if self.check(TokenKind::Caret) {
            return self.binary_rhs(base, BinaryOp::Pow, Self::parse_unary);
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            expr = match self.peek() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_delimited(TokenKind::RParen, Self::parse_call_args)?;
                    let span = self.span_from(expr.span);
                    Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    )
                }
                TokenKind::LBracket => {
                    self.advance();
                    let indices =
                        self.parse_delimited(TokenKind::RBracket, Self::parse_subscripts)?;
                    let span = self.span_from(expr.span);
                    Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            indices,
                        },
                        span,
                    )
                }
                TokenKind::LDoubleBracket => {
                    self.advance();
                    self.bracket_depth += 1;
                    let index = self.parse_expr().and_then(|index| {
                        self.expect(TokenKind::RBracket)?;
                        Ok(index)
                    });
                    self.bracket_depth -= 1;
                    let index = index?;
                    self.expect(TokenKind::RBracket)?;
                    let span = self.span_from(expr.span);
                    Expr::new(
                        ExprKind::ListIndex {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    )
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Run `inner` with newlines suppressed, then consume `close`.
    fn parse_delimited(
        &mut self,
        close: TokenKind,
        inner: fn(&mut Self) -> Result<Vec<Expr>, ParseError>,
    ) -> Result<Vec<Expr>, ParseError> {
        self.bracket_depth += 1;
        let items = inner(self).and_then(|items| {
            self.expect(close)?;
            Ok(items)
        });
        self.bracket_depth -= 1;
        items
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            args.push(self.parse_arg()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }

    /// Subscripts may be left empty: `m[1, ]`, `m[, 2]`.
    fn parse_subscripts(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut indices = Vec::new();
        if self.check(TokenKind::RBracket) {
            return Ok(indices);
        }
        loop {
            if self.check(TokenKind::Comma) || self.check(TokenKind::RBracket) {
                indices.push(Expr::new(ExprKind::Missing, self.peek_token().span));
            } else {
                indices.push(self.parse_arg()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(indices)
    }

    /// One actual argument: `...`, `tag = expr`, or `expr`.
    fn parse_arg(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek_token();
        if tok.kind == TokenKind::Ellipsis {
            self.advance();
            return Ok(Expr::new(ExprKind::Ellipsis, tok.span));
        }
        if let TokenKind::Ident(tag) | TokenKind::Str(tag) = tok.kind {
            if self.peek_nth(1) == TokenKind::Equals {
                self.advance();
                self.advance();
                let value = self.parse_expr()?;
                let span = tok.span.merge(value.span);
                return Ok(Expr::new(
                    ExprKind::Tagged {
                        tag,
                        value: Box::new(value),
                    },
                    span,
                ));
            }
        }
        self.parse_expr()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek_token();
        let kind = match tok.kind {
            TokenKind::Number(n) => ExprKind::Num(n),
            TokenKind::Integer(n) => ExprKind::Int(n),
            TokenKind::Str(s) => ExprKind::Str(s),
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::True => ExprKind::True,
            TokenKind::False => ExprKind::False,
            TokenKind::Null => ExprKind::Null,
            TokenKind::Na => ExprKind::Na,
            TokenKind::Inf => ExprKind::Inf,
            TokenKind::NaN => ExprKind::NaN,
            TokenKind::LParen => {
                self.advance();
                self.bracket_depth += 1;
                let inner = self.parse_expr().and_then(|inner| {
                    self.expect(TokenKind::RParen)?;
                    Ok(inner)
                });
                self.bracket_depth -= 1;
                let inner = inner?;
                return Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    self.span_from(tok.span),
                ));
            }
            TokenKind::Function => return self.parse_function(),
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(Expr::new(kind, tok.span))
    }

    fn parse_function(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance().span;
        self.expect(TokenKind::LParen)?;
        self.bracket_depth += 1;
        let formals = self.parse_formals().and_then(|formals| {
            self.expect(TokenKind::RParen)?;
            Ok(formals)
        });
        self.bracket_depth -= 1;
        let formals = formals?;

        self.skip_newlines();
        let body = self.parse_statement()?;
        let span = self.span_from(start);
        Ok(Expr::new(
            ExprKind::Function(Arc::new(FunctionLit {
                formals,
                body,
                span,
            })),
            span,
        ))
    }

    fn parse_formals(&mut self) -> Result<Vec<Formal>, ParseError> {
        let mut formals: Vec<Formal> = Vec::new();
        while !self.check(TokenKind::RParen) {
            let tok = self.peek_token();
            let formal = match tok.kind {
                TokenKind::Ellipsis => {
                    self.advance();
                    Formal::Ellipsis
                }
                TokenKind::Ident(name) => {
                    self.advance();
                    let default = if self.eat(TokenKind::Equals) {
                        Some(self.parse_expr()?)
                    } else {
                        None
                    };
                    Formal::Param { name, default }
                }
                _ => return Err(self.unexpected("formal argument")),
            };
            let repeated = formals.iter().any(|f| match (f, &formal) {
                (Formal::Ellipsis, Formal::Ellipsis) => true,
                (Formal::Param { name: a, .. }, Formal::Param { name: b, .. }) => a == b,
                _ => false,
            });
            if repeated {
                let name = match formal.name() {
                    Some(name) => self.interner.lookup(name).to_owned(),
                    None => "...".to_owned(),
                };
                return Err(ParseError::RepeatedFormal {
                    name,
                    span: tok.span,
                });
            }
            formals.push(formal);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(formals)
    }
}

fn match_or_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::PipePipe => Some(BinaryOp::Or),
        TokenKind::Pipe => Some(BinaryOp::OrVector),
        _ => None,
    }
}

fn match_and_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::AmpAmp => Some(BinaryOp::And),
        TokenKind::Amp => Some(BinaryOp::AndVector),
        _ => None,
    }
}

fn match_additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn match_multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        _ => None,
    }
}

fn match_comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        _ => None,
    }
}

fn unary(op: UnaryOp, operand: Expr, start: Span) -> Expr {
    let span = start.merge(operand.span);
    Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    )
}
