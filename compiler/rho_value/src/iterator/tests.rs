#![allow(clippy::unwrap_used)]

use super::*;
use crate::EvalErrorKind;
use pretty_assertions::assert_eq;

fn offsets(iter: IndexIter) -> Vec<usize> {
    iter.collect()
}

#[test]
fn range_is_inclusive_and_zero_based() {
    let iter = IndexIter::range(2, 4);
    assert_eq!(iter.length(), 3);
    assert_eq!(offsets(iter), vec![1, 2, 3]);
}

#[test]
fn range_from_zero_skips_negative_offsets() {
    let iter = IndexIter::range(0, 2);
    assert_eq!(iter.length(), 2);
    assert_eq!(offsets(iter), vec![0, 1]);
}

#[test]
fn descending_range_is_empty() {
    let iter = IndexIter::range(3, 1);
    assert_eq!(iter.length(), 0);
    assert_eq!(offsets(iter), Vec::<usize>::new());
}

#[test]
fn array_preserves_order_and_repetition() {
    let iter = IndexIter::array(vec![3, 1, 3]);
    assert_eq!(iter.length(), 3);
    assert_eq!(offsets(iter), vec![2, 0, 2]);
}

#[test]
fn full_walks_every_offset() {
    assert_eq!(offsets(IndexIter::full(3)), vec![0, 1, 2]);
}

#[test]
fn zero_scalar_is_empty() {
    let iter = IndexIter::from_subscript(&Value::num(0.0), 5).unwrap();
    assert_eq!(iter, IndexIter::Empty);
}

#[test]
fn scalar_subscript_is_once() {
    let iter = IndexIter::from_subscript(&Value::num(2.0), 5).unwrap();
    assert_eq!(offsets(iter), vec![1]);
}

#[test]
fn zeros_in_vector_are_dropped() {
    let index = Value::numeric_vec(vec![0.0, 1.0, 0.0, 3.0]);
    let iter = IndexIter::from_subscript(&index, 5).unwrap();
    assert_eq!(offsets(iter), vec![0, 2]);
}

#[test]
fn negative_subscripts_exclude() {
    let index = Value::numeric_vec(vec![-1.0, -3.0]);
    let iter = IndexIter::from_subscript(&index, 4).unwrap();
    assert_eq!(offsets(iter), vec![1, 3]);
}

#[test]
fn mixed_signs_are_rejected() {
    let index = Value::numeric_vec(vec![-1.0, 2.0]);
    let err = IndexIter::from_subscript(&index, 4).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MixedSubscripts);
}

#[test]
fn na_subscript_is_out_of_range() {
    let iter = IndexIter::from_subscript(&Value::num(crate::na_real()), 3).unwrap();
    assert_eq!(offsets(iter), vec![NA_OFFSET]);
}

#[test]
fn text_subscript_falls_back_to_empty() {
    let iter = IndexIter::from_subscript(&Value::text("a"), 3).unwrap();
    assert_eq!(iter, IndexIter::Empty);
}

#[test]
fn list_subscript_is_invalid() {
    let err = IndexIter::from_subscript(&Value::list(vec![]), 3).unwrap_err();
    assert_eq!(err.message, "invalid subscript type 'list'");
}

#[test]
fn length_tracks_consumption() {
    let mut iter = IndexIter::array(vec![1, 2, 3]);
    iter.next();
    assert_eq!(iter.length(), 2);
}
