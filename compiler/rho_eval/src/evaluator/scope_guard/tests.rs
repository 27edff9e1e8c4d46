use pretty_assertions::assert_eq;
use rho_ir::SharedInterner;
use rho_value::Value;

use crate::control::LoopState;
use crate::print_handler::silent_handler;
use crate::Evaluator;

fn evaluator() -> Evaluator {
    Evaluator::builder(SharedInterner::new())
        .print_handler(silent_handler())
        .build()
}

#[test]
fn frame_guard_restores_caller_frame() {
    let mut ev = evaluator();
    let x = ev.interner.intern("x");
    assert_eq!(ev.env.depth(), 0);
    {
        let scoped = ev.enter_frame();
        assert_eq!(scoped.env.depth(), 1);
        scoped.env.define(x, Value::num(1.0));
    }
    assert_eq!(ev.env.depth(), 0);
    assert_eq!(ev.env.lookup(x), None);
}

#[test]
fn frame_guard_hides_enclosing_loop() {
    let mut ev = evaluator();
    ev.control.loop_state = LoopState::Looping;
    {
        let mut scoped = ev.enter_frame();
        assert_eq!(scoped.control.loop_state, LoopState::Normal);
        scoped.control.loop_state = LoopState::Break;
    }
    assert_eq!(ev.control.loop_state, LoopState::Looping);
}

#[test]
fn loop_guard_consumes_next_and_stops_on_break() {
    let mut ev = evaluator();
    {
        let mut guard = ev.enter_loop();
        assert_eq!(guard.control.loop_state, LoopState::Looping);
        guard.control.loop_state = LoopState::Next;
        assert!(!guard.take_break());
        assert_eq!(guard.control.loop_state, LoopState::Looping);
        guard.control.loop_state = LoopState::Break;
        assert!(guard.take_break());
    }
    assert_eq!(ev.control.loop_state, LoopState::Normal);
    assert!(ev.is_invisible());
}
