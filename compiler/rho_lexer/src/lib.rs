//! Lexer for rho using logos with string interning.
//!
//! Newlines are tokens: the parser uses them as statement separators and
//! skips them where an expression is obviously incomplete. `#` comments and
//! horizontal whitespace are dropped.

use logos::Logos;
use rho_ir::{Span, StringInterner, Token, TokenKind, TokenList};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("\n")]
    Newline,

    // === Keywords and constants ===
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("repeat")]
    Repeat,
    #[token("while")]
    While,
    #[token("function")]
    Function,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("next")]
    Next,
    #[token("break")]
    Break,
    #[token("TRUE")]
    True,
    #[token("FALSE")]
    False,
    #[token("NULL")]
    Null,
    #[token("NA")]
    Na,
    #[token("Inf")]
    Inf,
    #[token("NaN")]
    NaN,

    // === Assignment ===
    #[token("<-")]
    LeftAssign,
    #[token("<<-")]
    SuperAssign,
    #[token("->")]
    RightAssign,
    #[token("->>")]
    RightSuperAssign,
    #[token("=")]
    Equals,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("%%")]
    Modulo,
    #[token(":")]
    Colon,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,

    // === Punctuation ===
    #[token("...")]
    Ellipsis,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("[[")]
    LDoubleBracket,
    #[token("]")]
    RBracket,

    // === Literals ===
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| {
        i64::from_str_radix(&lex.slice()[2..], 16).ok().map(|n| n as f64)
    })]
    HexNumber(f64),

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[0-9]+L", |lex| {
        let s = lex.slice();
        s[..s.len() - 1].parse::<i64>().ok()
    })]
    Integer(i64),

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    #[regex(r"[a-zA-Z][a-zA-Z0-9._]*")]
    #[regex(r"\.([a-zA-Z._][a-zA-Z0-9._]*)?")]
    Ident,
}

/// Lex `source` into a token list terminated by [`TokenKind::Eof`].
///
/// Characters that match no rule become [`TokenKind::Illegal`]; reporting
/// them is left to the parser.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let kind = match token_result {
            Ok(raw) => convert_token(raw, logos.slice(), interner),
            Err(()) => TokenKind::Illegal,
        };
        result.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    result.push(Token::new(TokenKind::Eof, Span::point(end)));
    tracing::trace!(tokens = result.len(), "lexed source");
    result
}

fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Newline => TokenKind::Newline,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Repeat => TokenKind::Repeat,
        RawToken::While => TokenKind::While,
        RawToken::Function => TokenKind::Function,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Next => TokenKind::Next,
        RawToken::Break => TokenKind::Break,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Na => TokenKind::Na,
        RawToken::Inf => TokenKind::Inf,
        RawToken::NaN => TokenKind::NaN,
        RawToken::LeftAssign => TokenKind::LeftAssign,
        RawToken::SuperAssign => TokenKind::SuperAssign,
        RawToken::RightAssign => TokenKind::RightAssign,
        RawToken::RightSuperAssign => TokenKind::RightSuperAssign,
        RawToken::Equals => TokenKind::Equals,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Modulo => TokenKind::Modulo,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Amp => TokenKind::Amp,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::LDoubleBracket => TokenKind::LDoubleBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::HexNumber(n) | RawToken::Number(n) => TokenKind::Number(n),
        RawToken::Integer(n) => TokenKind::Integer(n),
        RawToken::Str => {
            // Strip the matching quotes; both delimiters are one byte.
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&unescape_string(content)))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
    }
}

/// Process string escape sequences.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('0') => result.push('\0'),
            Some(c @ ('\\' | '"' | '\'' | '`')) => result.push(c),
            Some(c) => {
                // Unknown escape - keep as-is
                result.push('\\');
                result.push(c);
            }
            None => result.push('\\'),
        }
    }

    result
}
