//! Driver library for the `rho` command.
//!
//! [`Session`] owns one interner and one evaluator and feeds parsed
//! statements through them the way the command line and the REPL do.
//! Parse errors are rendered with source snippets by [`render_parse_error`].

mod diagnostics;
mod session;
mod tracing_setup;

pub use diagnostics::render_parse_error;
pub use session::{ErrorPolicy, Outcome, RunOptions, Session, SessionError};
pub use tracing_setup::init_tracing;
