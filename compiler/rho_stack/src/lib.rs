//! Stack growth for deep recursion.
//!
//! The parser and the evaluator are plain recursive tree walks. Nested
//! expressions and recursive user functions (`fib <- function(n) ...`) can
//! exhaust the native stack long before any interpreter limit would trigger,
//! so every recursive entry point goes through [`ensure_sufficient_stack`].
//!
//! On native targets this uses `stacker` to allocate a fresh segment when
//! the remaining stack drops below the red zone. On `wasm32` it is a plain
//! call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
