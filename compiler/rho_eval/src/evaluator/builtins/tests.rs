use pretty_assertions::assert_eq;
use rho_value::{EvalErrorKind, Value};

use super::{combine, lookup_builtin, version_info, BuiltinKind};

#[test]
fn combine_drops_nulls() {
    assert_eq!(combine(vec![Value::Null, Value::Null]), Ok(Value::Null));
    assert_eq!(
        combine(vec![Value::num(1.0), Value::Null, Value::num(2.0)]),
        Ok(Value::numeric_vec(vec![1.0, 2.0]))
    );
}

#[test]
fn combine_single_scalar_is_vector_form() {
    assert_eq!(
        combine(vec![Value::num(3.0)]),
        Ok(Value::numeric_vec(vec![3.0]))
    );
}

#[test]
fn combine_integers_stay_integer() {
    assert_eq!(
        combine(vec![Value::int(1), Value::integer_vec(vec![2, 3])]),
        Ok(Value::integer_vec(vec![1, 2, 3]))
    );
    assert_eq!(
        combine(vec![Value::int(1), Value::num(2.5)]),
        Ok(Value::numeric_vec(vec![1.0, 2.5]))
    );
}

#[test]
fn combine_text_with_numbers_fails() {
    let err = combine(vec![Value::text("a"), Value::num(1.0)]);
    assert!(matches!(err, Err(ref e) if e.kind == EvalErrorKind::ConcatMixed));
}

#[test]
fn combine_with_list_flattens_into_list() {
    let list = Value::named_list(vec![Value::num(1.0)], vec!["a".into()]);
    assert_eq!(
        combine(vec![list, Value::numeric_vec(vec![2.0, 3.0])]),
        Ok(Value::named_list(
            vec![Value::num(1.0), Value::num(2.0), Value::num(3.0)],
            vec!["a".into(), String::new(), String::new()],
        ))
    );
}

#[test]
fn builtin_table_aliases() {
    assert_eq!(lookup_builtin("rm").map(|b| b.kind), Some(BuiltinKind::Remove));
    assert_eq!(lookup_builtin("q").map(|b| b.kind), Some(BuiltinKind::Quit));
    assert!(lookup_builtin("c").is_none());
    assert!(lookup_builtin("sum").is_none());
}

#[test]
fn version_names_the_language() {
    let Value::Recursive(info) = version_info() else {
        panic!("version is a list");
    };
    assert_eq!(info.position_of("language"), Some(2));
    assert_eq!(info.get(2), Some(&Value::text("rho")));
}
