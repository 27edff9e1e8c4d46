#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use rho_value::{EvalErrorKind, Recursive, Value};

use super::{assign_elements, assign_item, set_class, set_dim, set_dimnames};

fn matrix_2x2() -> Value {
    let mut m = Value::numeric_vec(vec![1.0, 2.0, 3.0, 4.0]);
    set_dim(&mut m, &Value::numeric_vec(vec![2.0, 2.0])).unwrap();
    m
}

#[test]
fn dim_truncates_and_clears_dimnames() {
    let mut m = matrix_2x2();
    let names = Value::list(vec![
        Value::text_vec(vec!["a".into(), "b".into()]),
        Value::Null,
    ]);
    assert_eq!(set_dimnames(&mut m, &names), Ok(()));
    assert!(m.dimnames().is_some());

    assert_eq!(set_dim(&mut m, &Value::numeric_vec(vec![4.9, 1.2])), Ok(()));
    assert_eq!(m.dim(), Some(&[4_i64, 1][..]));
    assert!(m.dimnames().is_none());
}

#[test]
fn dim_null_removes_array_shape() {
    let mut m = matrix_2x2();
    assert_eq!(set_dim(&mut m, &Value::Null), Ok(()));
    assert_eq!(m, Value::numeric_vec(vec![1.0, 2.0, 3.0, 4.0]));
    assert!(m.attrs().is_none());
}

#[test]
fn dim_rejects_text_and_null_target() {
    let mut v = Value::numeric_vec(vec![1.0]);
    let err = set_dim(&mut v, &Value::text("x"));
    assert!(matches!(err, Err(ref e) if e.kind == EvalErrorKind::InvalidDim));

    let mut null = Value::Null;
    let err = set_dim(&mut null, &Value::num(1.0));
    assert!(matches!(err, Err(ref e) if e.kind == EvalErrorKind::AttributeOnNull));
}

#[test]
fn dimnames_validation_order() {
    let mut plain = Value::numeric_vec(vec![1.0, 2.0]);
    let err = set_dimnames(&mut plain, &Value::list(vec![Value::Null]));
    assert!(matches!(err, Err(ref e) if e.kind == EvalErrorKind::DimnamesNonArray));

    let mut m = matrix_2x2();
    let err = set_dimnames(&mut m, &Value::num(1.0));
    assert!(matches!(err, Err(ref e) if e.kind == EvalErrorKind::DimnamesNotList));

    let err = set_dimnames(&mut m, &Value::list(vec![Value::Null]));
    assert!(matches!(
        err,
        Err(ref e) if e.message == "length of 'dimnames' [1] must match that of 'dims' [2]"
    ));

    let short = Value::list(vec![Value::text("a"), Value::Null]);
    let err = set_dimnames(&mut m, &short);
    assert!(matches!(err, Err(ref e) if e.kind == EvalErrorKind::DimnamesExtent { dimension: 1 }));
    assert!(m.dimnames().is_none());
}

#[test]
fn dimnames_numbers_become_text() {
    let mut m = matrix_2x2();
    let names = Value::list(vec![Value::Null, Value::numeric_vec(vec![1.0, 2.0])]);
    assert_eq!(set_dimnames(&mut m, &names), Ok(()));
    let stored = m.dimnames().and_then(|d| d.get(1)).cloned();
    assert_eq!(
        stored,
        Some(Value::text_vec(vec!["1".into(), "2".into()]))
    );
}

#[test]
fn class_keeps_first_string_and_null_clears() {
    let mut v = Value::num(1.0);
    let classes = Value::text_vec(vec!["foo".into(), "bar".into()]);
    assert_eq!(set_class(&mut v, &classes), Ok(()));
    assert_eq!(v.explicit_class(), Some("foo"));
    assert_eq!(set_class(&mut v, &Value::Null), Ok(()));
    assert_eq!(v.explicit_class(), None);
    assert!(v.attrs().is_none());

    let err = set_class(&mut v, &Value::num(2.0));
    assert!(matches!(
        err,
        Err(ref e) if matches!(e.kind, EvalErrorKind::UnexpectedAttributeValue { .. })
    ));
}

#[test]
fn element_assignment_recycles_and_grows() {
    let mut v = Value::numeric_vec(vec![1.0, 2.0, 3.0]);
    assert_eq!(
        assign_elements(&mut v, None, &Value::num(0.0)),
        Ok(())
    );
    assert_eq!(v, Value::numeric_vec(vec![0.0, 0.0, 0.0]));

    assert_eq!(assign_elements(&mut v, Some(&Value::num(5.0)), &Value::num(9.0)), Ok(()));
    let Value::Numeric(values) = &v else {
        panic!("numeric expected");
    };
    assert_eq!(values.len(), 5);
    assert!(rho_value::is_na_real(values.values()[3]));
    assert_eq!(values.values()[4], 9.0);
}

#[test]
fn element_assignment_coerces_upward() {
    let mut v = Value::integer_vec(vec![1, 2]);
    assert_eq!(
        assign_elements(&mut v, Some(&Value::num(2.0)), &Value::num(2.5)),
        Ok(())
    );
    assert_eq!(v, Value::numeric_vec(vec![1.0, 2.5]));

    assert_eq!(
        assign_elements(&mut v, Some(&Value::num(1.0)), &Value::text("a")),
        Ok(())
    );
    assert_eq!(v, Value::text_vec(vec!["a".into(), "2.5".into()]));
}

#[test]
fn growing_drops_dim_but_keeps_class() {
    let mut m = matrix_2x2();
    set_class(&mut m, &Value::text("grid")).unwrap();
    assert_eq!(
        assign_elements(&mut m, Some(&Value::num(6.0)), &Value::num(1.0)),
        Ok(())
    );
    assert_eq!(m.dim(), None);
    assert_eq!(m.explicit_class(), Some("grid"));
}

#[test]
fn item_assignment_on_lists() {
    let mut list = Value::named_list(
        vec![Value::num(1.0), Value::num(2.0)],
        vec!["a".into(), "b".into()],
    );
    assert_eq!(assign_item(&mut list, &Value::text("c"), &Value::text("x")), Ok(()));
    assert_eq!(
        list,
        Value::named_list(
            vec![Value::num(1.0), Value::num(2.0), Value::text("x")],
            vec!["a".into(), "b".into(), "c".into()],
        )
    );

    assert_eq!(assign_item(&mut list, &Value::num(1.0), &Value::Null), Ok(()));
    let Value::Recursive(items) = &list else {
        panic!("list expected");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items.position_of("a"), None);
}

#[test]
fn item_assignment_on_atomic_needs_one_value() {
    let mut v = Value::numeric_vec(vec![1.0, 2.0]);
    let err = assign_item(&mut v, &Value::num(1.0), &Value::numeric_vec(vec![1.0, 2.0]));
    assert!(err.is_err());
    assert_eq!(assign_item(&mut v, &Value::num(1.0), &Value::num(7.0)), Ok(()));
    assert_eq!(v, Value::numeric_vec(vec![7.0, 2.0]));
}

#[test]
fn item_assignment_of_list_value_converts_target() {
    let mut v = Value::numeric_vec(vec![1.0]);
    let inner = Value::Recursive(Recursive::list(vec![Value::num(2.0)]));
    assert_eq!(assign_item(&mut v, &Value::num(2.0), &inner), Ok(()));
    assert_eq!(v, Value::list(vec![Value::num(1.0), inner]));
}
