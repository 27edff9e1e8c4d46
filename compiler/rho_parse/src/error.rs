//! Parse errors.

use rho_ir::Span;
use thiserror::Error;

/// Error produced while building the syntax tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected {found}")]
    Unexpected {
        found: &'static str,
        expected: &'static str,
        span: Span,
    },
    #[error("unexpected end of input")]
    UnexpectedEof { expected: &'static str, span: Span },
    #[error("invalid token")]
    InvalidToken { span: Span },
    #[error("repeated formal argument '{name}'")]
    RepeatedFormal { name: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Unexpected { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::InvalidToken { span }
            | ParseError::RepeatedFormal { span, .. } => *span,
        }
    }

    /// What the parser was looking for, when it knows.
    pub fn expected(&self) -> Option<&'static str> {
        match self {
            ParseError::Unexpected { expected, .. } | ParseError::UnexpectedEof { expected, .. } => {
                Some(expected)
            }
            ParseError::InvalidToken { .. } | ParseError::RepeatedFormal { .. } => None,
        }
    }

    /// True when more input could complete the program.
    ///
    /// The REPL keeps reading lines while this holds.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::UnexpectedEof { .. })
    }
}
