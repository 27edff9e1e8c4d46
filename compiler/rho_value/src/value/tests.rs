#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn literal_is_atomic_and_c_result_is_vector() {
    let Value::Numeric(lit) = Value::num(1.0) else {
        panic!("expected numeric");
    };
    assert!(!lit.is_vector());
    assert_eq!(lit.len(), 1);

    let Value::Numeric(vec) = Value::numeric_vec(vec![1.0]) else {
        panic!("expected numeric");
    };
    assert!(vec.is_vector());
    assert_eq!(vec.values(), &[1.0]);
}

#[test]
fn length_per_kind() {
    assert_eq!(Value::Null.len(), 0);
    assert_eq!(Value::numeric_vec(vec![1.0, 2.0, 3.0]).len(), 3);
    assert_eq!(Value::integer_vec(vec![]).len(), 0);
    assert_eq!(Value::text("a").len(), 1);
    assert_eq!(Value::list(vec![Value::Null, Value::num(1.0)]).len(), 2);
    assert_eq!(
        Value::Recursive(Recursive::cons(Value::num(1.0), Value::Null, Value::Null)).len(),
        2
    );
}

#[test]
fn type_names() {
    assert_eq!(Value::Null.type_name(), "NULL");
    assert_eq!(Value::num(1.0).type_name(), "double");
    assert_eq!(Value::int(1).type_name(), "integer");
    assert_eq!(Value::text("x").type_name(), "character");
    assert_eq!(Value::list(vec![]).type_name(), "list");
    assert_eq!(
        Value::Recursive(Recursive::named(vec![Value::Null], vec![String::new()], true))
            .type_name(),
        "pairlist"
    );
}

#[test]
fn integer_converts_to_doubles_with_na() {
    let v = Value::integer_vec(vec![1, NA_INTEGER, 3]);
    let d = v.as_doubles().unwrap();
    assert_eq!(d[0], 1.0);
    assert!(is_na_real(d[1]));
    assert_eq!(d[2], 3.0);
}

#[test]
fn na_is_distinct_from_nan() {
    assert!(is_na_real(na_real()));
    assert!(na_real().is_nan());
    assert!(!is_na_real(f64::NAN));
}

#[test]
fn attribute_storage_is_created_and_released() {
    let mut v = Value::numeric_vec(vec![1.0, 2.0, 3.0, 4.0]);
    assert!(v.attrs().is_none());

    v.attrs_mut().unwrap().dim = Some(vec![2, 2]);
    assert_eq!(v.dim(), Some(&[2_i64, 2][..]));
    assert_eq!(v.class_names(), vec!["matrix".to_owned(), "array".to_owned()]);

    v.attrs_mut().unwrap().dim = None;
    v.tidy_attrs();
    assert!(v.attrs().is_none());
    assert_eq!(v.class_names(), vec!["numeric".to_owned()]);
}

#[test]
fn null_cannot_carry_attributes() {
    let mut v = Value::Null;
    assert!(v.attrs_mut().is_none());
}

#[test]
fn explicit_class_wins() {
    let mut v = Value::list(vec![]);
    v.attrs_mut().unwrap().class = Some("foo".to_owned());
    assert_eq!(v.class_names(), vec!["foo".to_owned()]);
}

#[test]
fn clones_keep_elements_but_not_attribute_edits() {
    let a = Value::numeric_vec(vec![1.0, 2.0]);
    let mut b = a.clone();
    assert_eq!(a, b);
    if let Value::Numeric(v) = &mut b {
        v.attrs_mut().class = Some("pair".to_owned());
    }
    assert!(a.attrs().is_none());
    assert_eq!(b.as_doubles().unwrap().as_ref(), &[1.0, 2.0]);
}

#[test]
fn named_list_drops_blank_names() {
    let r = Recursive::named(vec![Value::Null, Value::Null], vec![String::new(); 2], false);
    assert!(!r.has_names());

    let r = Recursive::named(
        vec![Value::num(1.0), Value::num(2.0)],
        vec!["a".to_owned(), String::new()],
        false,
    );
    assert_eq!(r.name_at(0), Some("a"));
    assert_eq!(r.name_at(1), None);
    assert_eq!(r.position_of("a"), Some(0));
}

#[test]
fn cons_tag_names_car() {
    let r = Recursive::cons(Value::num(1.0), Value::num(2.0), Value::text("x"));
    assert!(r.is_pairlist());
    assert_eq!(r.name_at(0), Some("x"));
    assert_eq!(r.get(1), Some(&Value::num(2.0)));
}

#[test]
fn text_coercion_of_numbers() {
    let v = Value::numeric_vec(vec![1.0, 2.5, na_real()]);
    let s = v.as_strings().unwrap();
    assert_eq!(s.as_ref(), &["1".to_owned(), "2.5".to_owned(), "NA".to_owned()]);
}
