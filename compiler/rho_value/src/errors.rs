//! Runtime error taxonomy.
//!
//! Every recoverable failure is an [`EvalError`] value: the evaluator
//! returns it through `Result` and the public entry point surfaces it as
//! `Value::Error`. Messages follow R's wording so that transcripts compare
//! literally.
//!
//! Factory functions (e.g. `object_not_found()`) are the public API; they
//! populate both `kind` and `message`.

use rho_ir::Span;
use std::fmt;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse grouping of error kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Call matching and dispatch failures.
    IllegalCall,
    /// `dim` / `dimnames` / `class` replacement failures.
    Attribute,
    /// Name resolution failures.
    Lookup,
    /// Operand, subscript and iterable type failures.
    Type,
    /// Core invariant violations. Not reachable from well-formed programs.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::IllegalCall => "illegal call",
            ErrorCategory::Attribute => "attribute",
            ErrorCategory::Lookup => "lookup",
            ErrorCategory::Type => "type",
            ErrorCategory::Internal => "internal",
        })
    }
}

/// Typed error condition with the data its message needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Calls
    FunctionNotFound {
        name: String,
    },
    BuiltinArity {
        name: String,
        got: usize,
        required: usize,
    },
    MultiplePartialMatch {
        tag: String,
    },
    MultipleActualMatch {
        formal: String,
    },
    /// Rendered entries, `name =` for tagged actuals and `pos N` otherwise.
    UnusedArguments {
        entries: Vec<String>,
    },
    MissingArgument {
        name: String,
    },
    NotAFunction,
    EllipsisContext,

    // Attributes
    DimnamesNotList,
    DimnamesNonArray,
    DimnamesLength {
        got: usize,
        dims: usize,
    },
    DimnamesExtent {
        dimension: usize,
    },
    AttributeOnNull,
    InvalidDim,

    // Lookup
    ObjectNotFound {
        name: String,
    },

    // Types
    NonNumericOperand,
    InvalidUnaryOperand,
    NotSubsettable {
        type_name: String,
    },
    InvalidForSequence,
    SequenceTooLong,
    SubscriptOutOfBounds,
    MixedSubscripts,
    InvalidSubscript {
        type_name: String,
    },
    IncorrectDimensions,
    ConcatMixed,
    CatUnsupported {
        position: usize,
        type_name: String,
    },
    InvalidArgument {
        function: String,
        expected: String,
    },
    LoopControlOutsideLoop,
    InvalidAssignmentTarget,

    // Internal
    MissingBody,
    UnexpectedAttributeValue {
        attribute: String,
        type_name: String,
    },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FunctionNotFound { .. }
            | Self::BuiltinArity { .. }
            | Self::MultiplePartialMatch { .. }
            | Self::MultipleActualMatch { .. }
            | Self::UnusedArguments { .. }
            | Self::MissingArgument { .. }
            | Self::NotAFunction
            | Self::EllipsisContext => ErrorCategory::IllegalCall,

            Self::DimnamesNotList
            | Self::DimnamesNonArray
            | Self::DimnamesLength { .. }
            | Self::DimnamesExtent { .. }
            | Self::AttributeOnNull
            | Self::InvalidDim => ErrorCategory::Attribute,

            Self::ObjectNotFound { .. } => ErrorCategory::Lookup,

            Self::NonNumericOperand
            | Self::InvalidUnaryOperand
            | Self::NotSubsettable { .. }
            | Self::InvalidForSequence
            | Self::SequenceTooLong
            | Self::SubscriptOutOfBounds
            | Self::MixedSubscripts
            | Self::InvalidSubscript { .. }
            | Self::IncorrectDimensions
            | Self::ConcatMixed
            | Self::CatUnsupported { .. }
            | Self::InvalidArgument { .. }
            | Self::LoopControlOutsideLoop
            | Self::InvalidAssignmentTarget => ErrorCategory::Type,

            Self::MissingBody | Self::UnexpectedAttributeValue { .. } => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Calls
            Self::FunctionNotFound { name } => write!(f, "could not find function \"{name}\""),
            Self::BuiltinArity {
                name,
                got,
                required,
            } => {
                let arg_word = if *got == 1 { "argument" } else { "arguments" };
                write!(
                    f,
                    "{got} {arg_word} passed to '{name}' which requires {required}"
                )
            }
            Self::MultiplePartialMatch { tag } => {
                write!(f, "argument {tag} matches multiple formal arguments")
            }
            Self::MultipleActualMatch { formal } => {
                write!(f, "formal argument \"{formal}\" matched by multiple actual arguments")
            }
            Self::UnusedArguments { entries } => {
                let noun = if entries.len() == 1 {
                    "unused argument"
                } else {
                    "unused arguments"
                };
                write!(f, "{noun} ({})", entries.join(", "))
            }
            Self::MissingArgument { name } => {
                write!(f, "argument \"{name}\" is missing, with no default")
            }
            Self::NotAFunction => write!(f, "attempt to apply non-function"),
            Self::EllipsisContext => write!(f, "'...' used in an incorrect context"),

            // Attributes
            Self::DimnamesNotList => write!(f, "'dimnames' must be a list"),
            Self::DimnamesNonArray => write!(f, "'dimnames' applied to non-array"),
            Self::DimnamesLength { got, dims } => write!(
                f,
                "length of 'dimnames' [{got}] must match that of 'dims' [{dims}]"
            ),
            Self::DimnamesExtent { dimension } => write!(
                f,
                "length of 'dimnames' [{dimension}] not equal to array extent"
            ),
            Self::AttributeOnNull => write!(f, "attempt to set an attribute on NULL"),
            Self::InvalidDim => write!(f, "invalid second argument, must be vector or NULL"),

            // Lookup
            Self::ObjectNotFound { name } => write!(f, "object '{name}' not found"),

            // Types
            Self::NonNumericOperand => write!(f, "non-numeric argument to binary operator"),
            Self::InvalidUnaryOperand => write!(f, "invalid argument to unary operator"),
            Self::NotSubsettable { type_name } => {
                write!(f, "object of type '{type_name}' is not subsettable")
            }
            Self::InvalidForSequence => write!(f, "invalid for() loop sequence"),
            Self::SequenceTooLong => write!(f, "result would be too long a vector"),
            Self::SubscriptOutOfBounds => write!(f, "subscript out of bounds"),
            Self::MixedSubscripts => write!(f, "can't mix positive and negative subscripts"),
            Self::InvalidSubscript { type_name } => {
                write!(f, "invalid subscript type '{type_name}'")
            }
            Self::IncorrectDimensions => write!(f, "incorrect number of dimensions"),
            Self::ConcatMixed => write!(f, "cannot combine character and numeric values"),
            Self::CatUnsupported {
                position,
                type_name,
            } => write!(
                f,
                "argument {position} (type '{type_name}') cannot be handled by 'cat'"
            ),
            Self::InvalidArgument { function, expected } => {
                write!(f, "invalid argument to '{function}': {expected} expected")
            }
            Self::LoopControlOutsideLoop => {
                write!(f, "no loop for break/next, jumping to top level")
            }
            Self::InvalidAssignmentTarget => {
                write!(f, "invalid (do_set) left-hand side to assignment")
            }

            // Internal
            Self::MissingBody => write!(f, "function body is missing"),
            Self::UnexpectedAttributeValue {
                attribute,
                type_name,
            } => write!(f, "invalid '{attribute}' value of type '{type_name}'"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured condition.
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Name of the innermost function call the error escaped from.
    pub call: Option<String>,
    /// Source location of the failing expression, when known.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            call: None,
            span: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach the call the error escaped from. The innermost call wins.
    #[must_use]
    pub fn with_call(mut self, name: impl Into<String>) -> Self {
        if self.call.is_none() {
            self.call = Some(name.into());
        }
        self
    }

    /// Attach a span unless one is already present.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.call {
            Some(call) => write!(f, "Error in {call}() : {}", self.message),
            None => write!(f, "Error: {}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Calls

#[cold]
pub fn function_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FunctionNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn builtin_arity(name: &str, got: usize, required: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BuiltinArity {
        name: name.to_string(),
        got,
        required,
    })
}

#[cold]
pub fn multiple_partial_match(tag: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MultiplePartialMatch {
        tag: tag.to_string(),
    })
}

#[cold]
pub fn multiple_actual_match(formal: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MultipleActualMatch {
        formal: formal.to_string(),
    })
}

#[cold]
pub fn unused_arguments(entries: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnusedArguments { entries })
}

#[cold]
pub fn missing_argument(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_a_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAFunction)
}

#[cold]
pub fn ellipsis_context() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EllipsisContext)
}

// Attributes

#[cold]
pub fn dimnames_not_list() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DimnamesNotList)
}

#[cold]
pub fn dimnames_non_array() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DimnamesNonArray)
}

#[cold]
pub fn dimnames_length(got: usize, dims: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DimnamesLength { got, dims })
}

/// `dimension` is 1-based.
#[cold]
pub fn dimnames_extent(dimension: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DimnamesExtent { dimension })
}

#[cold]
pub fn attribute_on_null() -> EvalError {
    EvalError::from_kind(EvalErrorKind::AttributeOnNull)
}

#[cold]
pub fn invalid_dim() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidDim)
}

// Lookup

#[cold]
pub fn object_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ObjectNotFound {
        name: name.to_string(),
    })
}

// Types

#[cold]
pub fn non_numeric_operand() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonNumericOperand)
}

#[cold]
pub fn invalid_unary_operand() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOperand)
}

#[cold]
pub fn not_subsettable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotSubsettable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_for_sequence() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidForSequence)
}

#[cold]
pub fn subscript_out_of_bounds() -> EvalError {
    EvalError::from_kind(EvalErrorKind::SubscriptOutOfBounds)
}

#[cold]
pub fn mixed_subscripts() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MixedSubscripts)
}

#[cold]
pub fn invalid_subscript(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSubscript {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn incorrect_dimensions() -> EvalError {
    EvalError::from_kind(EvalErrorKind::IncorrectDimensions)
}

#[cold]
pub fn sequence_too_long() -> EvalError {
    EvalError::from_kind(EvalErrorKind::SequenceTooLong)
}

#[cold]
pub fn concat_mixed() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConcatMixed)
}

/// `position` is 1-based.
#[cold]
pub fn cat_unsupported(position: usize, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CatUnsupported {
        position,
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_argument(function: &str, expected: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        function: function.to_string(),
        expected: expected.to_string(),
    })
}

#[cold]
pub fn loop_control_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopControlOutsideLoop)
}

#[cold]
pub fn invalid_assignment_target() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget)
}

// Internal

#[cold]
pub fn missing_body() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingBody)
}

#[cold]
pub fn unexpected_attribute_value(attribute: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedAttributeValue {
        attribute: attribute.to_string(),
        type_name: type_name.to_string(),
    })
}
