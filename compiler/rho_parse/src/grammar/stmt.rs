//! Statement productions: control flow, blocks, and assignment.

use rho_ir::{AssignScope, Stmt, StmtKind, TokenKind};
use rho_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse statements until end of input.
    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.check(TokenKind::Eof) {
                break;
            }
            stmts.push(self.parse_statement()?);
            if !matches!(
                self.peek(),
                TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
            ) {
                return Err(self.unexpected("end of statement"));
            }
        }
        Ok(stmts)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let start = self.peek_token().span;
        trace!(pos = self.pos, kind = ?self.peek(), "statement");
        match self.peek() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => {
                self.advance();
                let cond = self.parse_condition()?;
                self.skip_newlines();
                let body = Box::new(self.parse_statement()?);
                Ok(Stmt::new(StmtKind::While { cond, body }, self.span_from(start)))
            }
            TokenKind::Repeat => {
                self.advance();
                self.skip_newlines();
                let body = Box::new(self.parse_statement()?);
                Ok(Stmt::new(StmtKind::Repeat { body }, self.span_from(start)))
            }
            TokenKind::For => self.parse_for(),
            TokenKind::Break => {
                self.advance();
                Ok(Stmt::new(StmtKind::Break, start))
            }
            TokenKind::Next => {
                self.advance();
                Ok(Stmt::new(StmtKind::Next, start))
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Ident(name)
                if name == self.version
                    && matches!(
                        self.token_at(self.significant_from(self.pos) + 1).kind,
                        TokenKind::Newline
                            | TokenKind::Semicolon
                            | TokenKind::Eof
                            | TokenKind::RBrace
                    ) =>
            {
                self.advance();
                Ok(Stmt::new(StmtKind::Version, start))
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `( expr )` after `if` / `while`.
    fn parse_condition(&mut self) -> Result<rho_ir::Expr, ParseError> {
        self.expect(TokenKind::LParen)?;
        self.bracket_depth += 1;
        let cond = self.parse_expr();
        self.bracket_depth -= 1;
        let cond = cond?;
        self.expect(TokenKind::RParen)?;
        Ok(cond)
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let cond = self.parse_condition()?;
        self.skip_newlines();
        let then_branch = Box::new(self.parse_statement()?);

        // `else` may sit on a following line.
        let checkpoint = self.pos;
        self.skip_newlines();
        let else_branch = if self.token_at(self.pos).kind == TokenKind::Else {
            self.advance();
            self.skip_newlines();
            Some(Box::new(self.parse_statement()?))
        } else {
            self.pos = checkpoint;
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            self.span_from(start),
        ))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        self.expect(TokenKind::LParen)?;
        self.bracket_depth += 1;
        let header = self.parse_for_header();
        self.bracket_depth -= 1;
        let (var, iterable) = header?;
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::new(
            StmtKind::For {
                var,
                iterable,
                body,
            },
            self.span_from(start),
        ))
    }

    fn parse_for_header(&mut self) -> Result<(rho_ir::Name, rho_ir::Expr), ParseError> {
        let TokenKind::Ident(var) = self.peek() else {
            return Err(self.unexpected("loop variable"));
        };
        self.advance();
        self.expect(TokenKind::In)?;
        let iterable = self.parse_expr()?;
        Ok((var, iterable))
    }

    /// `{ stmt; stmt ... }`. Newlines are significant inside a block even
    /// when the block itself sits inside parentheses.
    pub(crate) fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let saved_depth = std::mem::replace(&mut self.bracket_depth, 0);
        let body = self.parse_block_body();
        self.bracket_depth = saved_depth;
        let stmts = body?;
        Ok(Stmt::new(StmtKind::Block(stmts), self.span_from(start)))
    }

    fn parse_block_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.check(TokenKind::RBrace) {
                break;
            }
            stmts.push(self.parse_statement()?);
            if !matches!(
                self.peek(),
                TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace
            ) {
                return Err(self.unexpected("'}'"));
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(stmts)
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.peek_token().span;
        let expr = self.parse_expr()?;

        let left_scope = match self.peek() {
            TokenKind::LeftAssign | TokenKind::Equals => Some(AssignScope::Local),
            TokenKind::SuperAssign => Some(AssignScope::Super),
            _ => None,
        };
        if let Some(scope) = left_scope {
            self.advance();
            self.skip_newlines();
            let value = self.parse_expr()?;
            return Ok(Stmt::new(
                StmtKind::Assign {
                    target: expr,
                    value,
                    scope,
                },
                self.span_from(start),
            ));
        }

        let right_scope = match self.peek() {
            TokenKind::RightAssign => Some(AssignScope::Local),
            TokenKind::RightSuperAssign => Some(AssignScope::Super),
            _ => None,
        };
        if let Some(scope) = right_scope {
            self.advance();
            self.skip_newlines();
            let target = self.parse_expr()?;
            return Ok(Stmt::new(
                StmtKind::Assign {
                    target,
                    value: expr,
                    scope,
                },
                self.span_from(start),
            ));
        }

        let span = expr.span;
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }
}
