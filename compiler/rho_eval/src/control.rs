//! Per-evaluation control fields: visibility and loop signalling.

/// Loop-control signal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    /// Not inside a loop body.
    #[default]
    Normal,
    /// Inside a loop body, no signal pending.
    Looping,
    /// `break` seen; unwind to the loop.
    Break,
    /// `next` seen; skip to the next iteration.
    Next,
}

impl LoopState {
    /// A signal is pending and the current block must stop.
    #[inline]
    pub fn is_unwinding(self) -> bool {
        matches!(self, LoopState::Break | LoopState::Next)
    }
}

/// Control fields saved and restored around loops and calls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Control {
    /// Suppress auto-printing of the current top-level result.
    pub invisible: bool,
    pub loop_state: LoopState,
}
