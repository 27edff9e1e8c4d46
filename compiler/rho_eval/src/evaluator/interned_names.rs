//! Names interned once at evaluator construction.
//!
//! Call dispatch and assignment compare these `Name`s (`u32 == u32`) instead
//! of resolving strings on every call.

use rho_ir::{Name, StringInterner};

#[derive(Clone, Copy)]
pub(crate) struct WellKnownNames {
    pub(crate) c: Name,
    pub(crate) dim: Name,
    pub(crate) dimnames: Name,
    pub(crate) class: Name,
    pub(crate) sep: Name,
}

impl WellKnownNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            c: interner.intern("c"),
            dim: interner.intern("dim"),
            dimnames: interner.intern("dimnames"),
            class: interner.intern("class"),
            sep: interner.intern("sep"),
        }
    }

    /// Name of the `n`-th (1-based) variadic slot, `..n`.
    pub(crate) fn dot(interner: &StringInterner, n: usize) -> Name {
        interner.intern(&format!("..{n}"))
    }
}
