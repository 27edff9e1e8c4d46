//! RAII guards for frame and loop state.
//!
//! Both guards hold `&mut Evaluator` and implement `Deref`/`DerefMut`, so
//! evaluation continues through the guard. Restoration happens in `Drop`,
//! which also covers the early returns of `?`.

use std::ops::{Deref, DerefMut};

use super::Evaluator;
use crate::control::{Control, LoopState};
use crate::environment::{Frame, LocalScope};

/// Active for the duration of a closure call.
///
/// Pushes a child of the active frame and clears the loop state, so
/// `break` inside the callee does not reach the caller's loop. Dropping the
/// guard re-activates the caller's frame and loop state; visibility is left
/// as the callee set it.
pub struct FrameGuard<'e> {
    evaluator: &'e mut Evaluator,
    previous: Option<LocalScope<Frame>>,
    loop_state: LoopState,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.evaluator.env.restore(previous);
        }
        self.evaluator.control.loop_state = self.loop_state;
    }
}

impl Deref for FrameGuard<'_> {
    type Target = Evaluator;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

/// Active for the duration of a loop.
///
/// Marks the loop state `Looping`. On drop the saved control fields come
/// back and the loop's result is marked invisible.
pub struct LoopGuard<'e> {
    evaluator: &'e mut Evaluator,
    saved: Control,
}

impl LoopGuard<'_> {
    /// Consume a pending signal after one iteration. Returns `true` when
    /// the loop must stop.
    pub(crate) fn take_break(&mut self) -> bool {
        match self.evaluator.control.loop_state {
            LoopState::Break => true,
            LoopState::Next => {
                self.evaluator.control.loop_state = LoopState::Looping;
                false
            }
            LoopState::Normal | LoopState::Looping => false,
        }
    }
}

impl Drop for LoopGuard<'_> {
    fn drop(&mut self) {
        self.evaluator.control = Control {
            invisible: true,
            ..self.saved
        };
    }
}

impl Deref for LoopGuard<'_> {
    type Target = Evaluator;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for LoopGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl Evaluator {
    /// Enter a fresh frame for a closure call.
    pub fn enter_frame(&mut self) -> FrameGuard<'_> {
        let previous = self.env.push_frame();
        let loop_state = std::mem::take(&mut self.control.loop_state);
        FrameGuard {
            evaluator: self,
            previous: Some(previous),
            loop_state,
        }
    }

    /// Enter a loop body context.
    pub fn enter_loop(&mut self) -> LoopGuard<'_> {
        let saved = self.control;
        self.control.loop_state = LoopState::Looping;
        LoopGuard {
            evaluator: self,
            saved,
        }
    }
}

#[cfg(test)]
mod tests;
