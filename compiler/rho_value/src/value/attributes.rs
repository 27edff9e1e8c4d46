//! Attribute storage shared by every vector kind.

use super::Recursive;

/// `dim`, `dimnames` and `class` of a value.
///
/// Attribute replacement mutates this struct in place on the binding that
/// owns the value; nothing is re-inserted into the frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    /// Array extents, one per dimension.
    pub dim: Option<Vec<i64>>,
    /// One entry per dimension: a text vector of labels or `NULL`.
    pub dimnames: Option<Recursive>,
    /// Explicit class.
    pub class: Option<String>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.dim.is_none() && self.dimnames.is_none() && self.class.is_none()
    }
}

/// Drop the box once every attribute has been cleared.
pub(super) fn normalize(attrs: &mut Option<Box<Attributes>>) {
    if attrs.as_ref().is_some_and(|a| a.is_empty()) {
        *attrs = None;
    }
}
