//! Atomic vectors: numeric, integer and text.

use super::attributes::{normalize, Attributes};
use super::Heap;

/// An atomic vector.
///
/// A value built from a literal is *atomic*: it holds one element in
/// `immediate` and no slice. Anything built by `c()`, a sequence, or an
/// operation on a vector carries a slice, even when that slice has a single
/// element. The distinction is observable through truthiness.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T> {
    immediate: T,
    slice: Option<Heap<Vec<T>>>,
    attrs: Option<Box<Attributes>>,
}

/// Double-precision vector.
pub type Numeric = Vector<f64>;
/// Integer vector used for `dim` and `L` literals.
pub type Integer = Vector<i64>;
/// Character vector.
pub type Text = Vector<String>;

impl<T: Clone + Default> Vector<T> {
    /// Single-element atomic value.
    pub fn scalar(value: T) -> Self {
        Vector {
            immediate: value,
            slice: None,
            attrs: None,
        }
    }

    /// Vector form, regardless of length.
    pub fn from_vec(values: Vec<T>) -> Self {
        Vector {
            immediate: values.first().cloned().unwrap_or_default(),
            slice: Some(Heap::new(values)),
            attrs: None,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match &self.slice {
            Some(slice) => slice.len(),
            None => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the value carries a slice rather than a lone immediate.
    pub fn is_vector(&self) -> bool {
        self.slice.is_some()
    }

    pub fn values(&self) -> &[T] {
        match &self.slice {
            Some(slice) => slice,
            None => std::slice::from_ref(&self.immediate),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values().get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.values().first()
    }

    pub fn attrs(&self) -> Option<&Attributes> {
        self.attrs.as_deref()
    }

    /// Attribute storage, created on first use.
    pub fn attrs_mut(&mut self) -> &mut Attributes {
        self.attrs.get_or_insert_with(Box::default)
    }

    /// Drop empty attribute storage after a clear.
    pub fn tidy_attrs(&mut self) {
        normalize(&mut self.attrs);
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Option<Attributes>) -> Self {
        self.attrs = attrs.filter(|a| !a.is_empty()).map(Box::new);
        self
    }

    pub fn map<U: Clone + Default>(&self, f: impl FnMut(&T) -> U) -> Vector<U> {
        let mapped: Vec<U> = self.values().iter().map(f).collect();
        let out = if self.is_vector() {
            Vector::from_vec(mapped)
        } else {
            Vector::scalar(mapped.into_iter().next().unwrap_or_default())
        };
        out.with_attrs(self.attrs().cloned())
    }
}
