//! Runtime value domain for the rho interpreter.
//!
//! - [`Value`]: the tagged union every evaluation produces
//! - [`Attributes`]: `dim` / `dimnames` / `class` metadata carried by a value
//! - [`IndexIter`]: cursors that turn a subscript into zero-based offsets
//! - [`EvalError`]: structured runtime errors with R-compatible wording

mod errors;
mod iterator;
mod value;

pub use errors::*;
pub use iterator::{IndexIter, NA_OFFSET};
pub use value::{
    is_na_real, na_real, Attributes, Heap, Integer, Numeric, Recursive, RecursiveBody, Text,
    Value, Vector, NA_INTEGER,
};
