//! Token kinds produced by the lexer.

use crate::{Name, Span};

/// A lexed token: what it is and where it came from.
///
/// The literal text of any token is recoverable by slicing the source with
/// [`Span::to_range`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kind, with literal payloads interned or decoded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Double-precision literal (`1`, `2.5`, `1e3`, `0x1F`).
    Number(f64),
    /// Integer literal with `L` suffix (`5L`).
    Integer(i64),
    /// String literal, escapes already processed.
    Str(Name),
    Ident(Name),
    True,
    False,
    Null,
    Na,
    Inf,
    NaN,

    // Keywords
    If,
    Else,
    Repeat,
    While,
    Function,
    For,
    In,
    Next,
    Break,

    // Assignment
    /// `<-`
    LeftAssign,
    /// `<<-`
    SuperAssign,
    /// `->`
    RightAssign,
    /// `->>`
    RightSuperAssign,
    /// `=`
    Equals,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    /// `%%`
    Modulo,
    Colon,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    Bang,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,

    // Punctuation
    /// `...`
    Ellipsis,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    /// `[[`
    LDoubleBracket,
    RBracket,

    /// Statement separator.
    Newline,
    /// Characters the scanner could not classify.
    Illegal,
    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Number(_) | TokenKind::Integer(_) => "numeric constant",
            TokenKind::Str(_) => "string constant",
            TokenKind::Ident(_) => "symbol",
            TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::Na
            | TokenKind::Inf
            | TokenKind::NaN => "constant",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Repeat => "'repeat'",
            TokenKind::While => "'while'",
            TokenKind::Function => "'function'",
            TokenKind::For => "'for'",
            TokenKind::In => "'in'",
            TokenKind::Next => "'next'",
            TokenKind::Break => "'break'",
            TokenKind::LeftAssign => "'<-'",
            TokenKind::SuperAssign => "'<<-'",
            TokenKind::RightAssign => "'->'",
            TokenKind::RightSuperAssign => "'->>'",
            TokenKind::Equals => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Modulo => "'%%'",
            TokenKind::Colon => "':'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::Pipe => "'|'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::LDoubleBracket => "'[['",
            TokenKind::RBracket => "']'",
            TokenKind::Newline => "end of line",
            TokenKind::Illegal => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}

/// Token stream, always terminated by a single [`TokenKind::Eof`].
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Get number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate as `(span, kind, literal text)` triples.
    pub fn triples<'a>(
        &'a self,
        source: &'a str,
    ) -> impl Iterator<Item = (Span, TokenKind, &'a str)> + 'a {
        self.tokens.iter().map(move |tok| {
            let text = source.get(tok.span.to_range()).unwrap_or("");
            (tok.span, tok.kind, text)
        })
    }
}
