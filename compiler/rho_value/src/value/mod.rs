//! Runtime values for the rho interpreter.
//!
//! Heap payloads are created only through the factory methods on [`Value`]
//! (`Value::numeric_vec`, `Value::list`, ...); [`Heap::new`] is private to
//! this module.

mod attributes;
mod heap;
mod na;
mod recursive;
mod vector;

use std::borrow::Cow;
use std::sync::Arc;

use rho_ir::FunctionLit;

use crate::EvalError;

pub use attributes::Attributes;
pub use heap::Heap;
pub use na::{is_na_real, na_real, NA_INTEGER};
pub use recursive::{Recursive, RecursiveBody};
pub use vector::{Integer, Numeric, Text, Vector};

/// A runtime value (the "datum").
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// `NULL`, also the false sentinel. Length 0.
    #[default]
    Null,
    Numeric(Numeric),
    Integer(Integer),
    Text(Text),
    Recursive(Recursive),
    /// User-defined function. Carries no environment: free variables resolve
    /// through the frame chain live at call time.
    Closure(Arc<FunctionLit>),
    /// Recoverable error signal. Never stored in a frame.
    Error(Heap<EvalError>),
}

impl Value {
    // Factories

    #[inline]
    pub fn num(n: f64) -> Self {
        Value::Numeric(Vector::scalar(n))
    }

    #[inline]
    pub fn numeric_vec(values: Vec<f64>) -> Self {
        Value::Numeric(Vector::from_vec(values))
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Integer(Vector::scalar(n))
    }

    #[inline]
    pub fn integer_vec(values: Vec<i64>) -> Self {
        Value::Integer(Vector::from_vec(values))
    }

    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Vector::scalar(s.into()))
    }

    #[inline]
    pub fn text_vec(values: Vec<String>) -> Self {
        Value::Text(Vector::from_vec(values))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::Recursive(Recursive::list(items))
    }

    #[inline]
    pub fn named_list(items: Vec<Value>, names: Vec<String>) -> Self {
        Value::Recursive(Recursive::named(items, names, false))
    }

    #[inline]
    pub fn closure(func: Arc<FunctionLit>) -> Self {
        Value::Closure(func)
    }

    #[inline]
    pub fn error(err: EvalError) -> Self {
        Value::Error(Heap::new(err))
    }

    // Queries

    /// R `length()`: elements for vectors, items for lists, 0 for `NULL`.
    pub fn len(&self) -> usize {
        match self {
            Value::Null | Value::Error(_) => 0,
            Value::Numeric(v) => v.len(),
            Value::Integer(v) => v.len(),
            Value::Text(v) => v.len(),
            Value::Recursive(r) => r.len(),
            Value::Closure(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Numeric and integer vectors take part in arithmetic.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Numeric(_) | Value::Integer(_))
    }

    /// R `typeof()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Numeric(_) => "double",
            Value::Integer(_) => "integer",
            Value::Text(_) => "character",
            Value::Recursive(r) if r.is_pairlist() => "pairlist",
            Value::Recursive(_) => "list",
            Value::Closure(_) => "closure",
            Value::Error(_) => "error",
        }
    }

    /// Elements as doubles, converting integers (`NA` maps to `NA`).
    pub fn as_doubles(&self) -> Option<Cow<'_, [f64]>> {
        match self {
            Value::Numeric(v) => Some(Cow::Borrowed(v.values())),
            Value::Integer(v) => Some(Cow::Owned(
                v.values()
                    .iter()
                    .map(|&i| if i == NA_INTEGER { na_real() } else { i as f64 })
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Elements as text, without quoting.
    pub fn as_strings(&self) -> Option<Cow<'_, [String]>> {
        match self {
            Value::Text(v) => Some(Cow::Borrowed(v.values())),
            Value::Numeric(_) | Value::Integer(_) => self
                .as_doubles()
                .map(|d| Cow::Owned(d.iter().map(|&x| format_plain_number(x)).collect())),
            _ => None,
        }
    }

    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            Value::Numeric(v) => v.attrs(),
            Value::Integer(v) => v.attrs(),
            Value::Text(v) => v.attrs(),
            Value::Recursive(r) => r.attrs(),
            Value::Null | Value::Closure(_) | Value::Error(_) => None,
        }
    }

    /// Mutable attribute storage; `None` for values that cannot carry
    /// attributes.
    pub fn attrs_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            Value::Numeric(v) => Some(v.attrs_mut()),
            Value::Integer(v) => Some(v.attrs_mut()),
            Value::Text(v) => Some(v.attrs_mut()),
            Value::Recursive(r) => Some(r.attrs_mut()),
            Value::Null | Value::Closure(_) | Value::Error(_) => None,
        }
    }

    /// Release attribute storage left empty by a clear.
    pub fn tidy_attrs(&mut self) {
        match self {
            Value::Numeric(v) => v.tidy_attrs(),
            Value::Integer(v) => v.tidy_attrs(),
            Value::Text(v) => v.tidy_attrs(),
            Value::Recursive(r) => r.tidy_attrs(),
            Value::Null | Value::Closure(_) | Value::Error(_) => {}
        }
    }

    pub fn dim(&self) -> Option<&[i64]> {
        self.attrs()?.dim.as_deref()
    }

    pub fn dimnames(&self) -> Option<&Recursive> {
        self.attrs()?.dimnames.as_ref()
    }

    pub fn explicit_class(&self) -> Option<&str> {
        self.attrs()?.class.as_deref()
    }

    /// R `class()`: the explicit class, else the implicit one.
    pub fn class_names(&self) -> Vec<String> {
        if let Some(class) = self.explicit_class() {
            return vec![class.to_owned()];
        }
        match self.dim().map(<[i64]>::len) {
            Some(2) => return vec!["matrix".to_owned(), "array".to_owned()],
            Some(_) => return vec!["array".to_owned()],
            None => {}
        }
        let implicit = match self {
            Value::Null => "NULL",
            Value::Numeric(_) => "numeric",
            Value::Integer(_) => "integer",
            Value::Text(_) => "character",
            Value::Recursive(r) if r.is_pairlist() => "pairlist",
            Value::Recursive(_) => "list",
            Value::Closure(_) => "function",
            Value::Error(_) => "error",
        };
        vec![implicit.to_owned()]
    }
}

/// Shortest faithful rendering of a number, used for text coercion.
fn format_plain_number(x: f64) -> String {
    if is_na_real(x) {
        "NA".to_owned()
    } else if x.is_nan() {
        "NaN".to_owned()
    } else if x.is_infinite() {
        if x > 0.0 { "Inf" } else { "-Inf" }.to_owned()
    } else {
        format!("{x}")
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Numeric(a), Value::Numeric(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Recursive(a), Value::Recursive(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Arc::ptr_eq(a, b),
            (Value::Error(a), Value::Error(b)) => a.message == b.message,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
