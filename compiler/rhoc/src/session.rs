//! One interpreter session: interner, evaluator and output sink.

use std::path::{Path, PathBuf};

use rho_eval::{console_handler, Evaluator, SharedPrintHandler};
use rho_ir::{SharedInterner, Stmt, StmtKind};
use rho_parse::ParseError;
use thiserror::Error;

/// Command-line switches that shape a session.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Write each statement, deparsed and prefixed with `> `, before its result.
    pub echo_source: bool,
    /// Log every top-level statement and force `rho_eval=debug` tracing.
    pub trace: bool,
}

/// What to do after a statement evaluates to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the error and move on to the next statement (REPL, `-e`).
    Continue,
    /// Stop at the first error (file mode).
    Halt,
}

/// Result of running a chunk of source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Rendered error values, in evaluation order.
    pub errors: Vec<String>,
    /// `quit()` was evaluated; later statements were skipped.
    pub quit: bool,
}

impl Outcome {
    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Failures that prevent a chunk from running at all.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub struct Session {
    interner: SharedInterner,
    evaluator: Evaluator,
    handler: SharedPrintHandler,
    options: RunOptions,
}

impl Session {
    /// Session printing to stdout.
    pub fn new(options: RunOptions) -> Self {
        Self::with_handler(console_handler(), options)
    }

    /// Session writing `print`, `cat` and auto-printed results to `handler`.
    pub fn with_handler(handler: SharedPrintHandler, options: RunOptions) -> Self {
        let interner = SharedInterner::new();
        let evaluator = Evaluator::builder(interner.clone())
            .print_handler(handler.clone())
            .trace(options.trace)
            .build();
        Session {
            interner,
            evaluator,
            handler,
            options,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn handler(&self) -> &SharedPrintHandler {
        &self.handler
    }

    /// Lex and parse `source` with this session's interner.
    pub fn parse(&self, source: &str) -> Result<Vec<Stmt>, ParseError> {
        let tokens = rho_lexer::lex(source, &self.interner);
        rho_parse::parse(&tokens, &self.interner)
    }

    /// Parse `source`, then run it. Nothing runs when parsing fails.
    pub fn run_source(&mut self, source: &str, policy: ErrorPolicy) -> Result<Outcome, SessionError> {
        let program = self.parse(source)?;
        Ok(self.run_program(&program, policy))
    }

    /// Read and run a script file, stopping at the first error.
    pub fn run_file(&mut self, path: &Path) -> Result<Outcome, SessionError> {
        let source = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.run_source(&source, ErrorPolicy::Halt)
    }

    /// Evaluate statements in order, auto-printing visible results.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn run_program(&mut self, program: &[Stmt], policy: ErrorPolicy) -> Outcome {
        let mut outcome = Outcome::default();
        for stmt in program {
            if matches!(stmt.kind, StmtKind::Empty) {
                continue;
            }
            if self.options.echo_source {
                let text = rho_ir::deparse_stmt(stmt, &self.interner);
                self.handler.write_line(&format!("> {text}"));
            }

            let value = self.evaluator.eval_statement(stmt);
            if value.is_error() {
                outcome.errors.push(self.evaluator.format(&value));
                self.evaluator.clear_invisible();
                if policy == ErrorPolicy::Halt {
                    break;
                }
                continue;
            }
            if !self.evaluator.is_invisible() {
                self.handler.write_line(&self.evaluator.format(&value));
            }
            self.evaluator.clear_invisible();

            if self.evaluator.quit_requested() {
                tracing::debug!("quit requested");
                outcome.quit = true;
                break;
            }
        }
        outcome
    }
}
