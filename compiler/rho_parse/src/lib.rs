//! Recursive descent parser for rho.
//!
//! Turns a [`TokenList`] into a sequence of top-level [`Stmt`]s. Newline
//! tokens separate statements except inside `(`/`[` and directly after a
//! binary operator, where the expression is still incomplete.

mod error;
mod grammar;

use rho_ir::{Name, Span, Stmt, StringInterner, Token, TokenKind, TokenList};

pub use error::ParseError;

/// Parse a whole program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<Vec<Stmt>, ParseError> {
    Parser::new(&tokens.tokens, interner).parse_program()
}

/// Parser state: a cursor over the token slice.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    interner: &'a StringInterner,
    /// Open `(` / `[` count; newlines are skipped while nonzero.
    bracket_depth: usize,
    version: Name,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], interner: &'a StringInterner) -> Self {
        Parser {
            tokens,
            pos: 0,
            interner,
            bracket_depth: 0,
            version: interner.intern("version"),
        }
    }

    fn token_at(&self, index: usize) -> Token {
        match self.tokens.get(index).or_else(|| self.tokens.last()) {
            Some(tok) => *tok,
            None => Token::new(TokenKind::Eof, Span::DUMMY),
        }
    }

    /// Index of the next significant token at or after `from`.
    fn significant_from(&self, mut from: usize) -> usize {
        if self.bracket_depth > 0 {
            while self.token_at(from).kind == TokenKind::Newline {
                from += 1;
            }
        }
        from
    }

    fn peek_token(&self) -> Token {
        self.token_at(self.significant_from(self.pos))
    }

    fn peek(&self) -> TokenKind {
        self.peek_token().kind
    }

    /// Look `n` significant tokens past the current one.
    fn peek_nth(&self, n: usize) -> TokenKind {
        let mut index = self.significant_from(self.pos);
        for _ in 0..n {
            index = self.significant_from(index + 1);
        }
        self.token_at(index).kind
    }

    fn advance(&mut self) -> Token {
        self.pos = self.significant_from(self.pos);
        let tok = self.token_at(self.pos);
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn skip_newlines(&mut self) {
        while self.token_at(self.pos).kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.token_at(self.pos).kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.pos += 1;
        }
    }

    /// Span of the most recently consumed token.
    fn prev_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(index) => self.token_at(index).span,
            None => Span::DUMMY,
        }
    }

    fn span_from(&self, start: Span) -> Span {
        start.merge(self.prev_span())
    }

    /// Error for the current token.
    fn unexpected(&self, expected: &'static str) -> ParseError {
        let tok = self.peek_token();
        match tok.kind {
            TokenKind::Eof => ParseError::UnexpectedEof {
                expected,
                span: tok.span,
            },
            TokenKind::Illegal => ParseError::InvalidToken { span: tok.span },
            other => ParseError::Unexpected {
                found: other.describe(),
                expected,
                span: tok.span,
            },
        }
    }
}

#[cfg(test)]
mod tests;
