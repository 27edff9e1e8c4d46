//! `EvaluatorBuilder` for creating [`Evaluator`] instances.

use rho_ir::SharedInterner;

use super::{Evaluator, WellKnownNames};
use crate::control::Control;
use crate::environment::Environment;
use crate::print_handler::{console_handler, SharedPrintHandler};

/// Builder for [`Evaluator`].
///
/// The interner must be the one the parser used, since the evaluator
/// resolves identifiers and string literals through it.
pub struct EvaluatorBuilder {
    interner: SharedInterner,
    print_handler: Option<SharedPrintHandler>,
    trace: bool,
}

impl EvaluatorBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        Self {
            interner,
            print_handler: None,
            trace: false,
        }
    }

    /// Where `print` and `cat` write. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Log each top-level statement before evaluating it.
    #[must_use]
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn build(self) -> Evaluator {
        let names = WellKnownNames::new(&self.interner);
        Evaluator {
            env: Environment::new(),
            names,
            control: Control::default(),
            print_handler: self.print_handler.unwrap_or_else(console_handler),
            quit_requested: false,
            trace: self.trace,
            interner: self.interner,
        }
    }
}
