//! Vectorized arithmetic and comparison.
//!
//! Arithmetic recycles the shorter operand; comparisons look only at the
//! first element of each side and return an operand, never a boolean.

use rho_ir::{BinaryOp, UnaryOp};
use rho_value::{
    invalid_unary_operand, is_na_real, na_real, non_numeric_operand, sequence_too_long, EvalResult,
    Value, Vector, NA_INTEGER,
};

/// Apply `op` to two evaluated operands.
///
/// A `NULL` operand short-circuits to `NULL`. `&&`/`||` are accepted here
/// with both sides already evaluated; the evaluator short-circuits them
/// before reaching this point.
pub fn apply_binary(op: BinaryOp, x: &Value, y: &Value) -> EvalResult {
    if x.is_null() || y.is_null() {
        return Ok(Value::Null);
    }
    match op {
        BinaryOp::And | BinaryOp::AndVector => Ok(if is_true(x) && is_true(y) {
            y.clone()
        } else {
            Value::Null
        }),
        BinaryOp::Or | BinaryOp::OrVector => Ok(if is_true(x) {
            x.clone()
        } else if is_true(y) {
            y.clone()
        } else {
            Value::Null
        }),
        BinaryOp::Sequence => sequence(x, y),
        op if op.is_comparison() => compare(op, x, y),
        _ => arithmetic(op, x, y),
    }
}

/// Element-wise arithmetic under the recycling rule.
///
/// The result is always double. It stays atomic only when both inputs are
/// atomic; attributes come from the operand whose length matches the result.
fn arithmetic(op: BinaryOp, x: &Value, y: &Value) -> EvalResult {
    let (Some(a), Some(b)) = (x.as_doubles(), y.as_doubles()) else {
        return Err(non_numeric_operand());
    };
    let (m, n) = (a.len(), b.len());
    let len = if m == 0 || n == 0 { 0 } else { m.max(n) };
    let values: Vec<f64> = (0..len)
        .map(|i| scalar_arith(op, a[i % m], b[i % n]))
        .collect();

    let atomic = !is_vector(x) && !is_vector(y);
    let result = match (atomic, values.first()) {
        (true, Some(&v)) => Vector::scalar(v),
        _ => Vector::from_vec(values),
    };
    let attrs = if m == len { x.attrs() } else { y.attrs() };
    Ok(Value::Numeric(result.with_attrs(attrs.cloned())))
}

fn is_vector(value: &Value) -> bool {
    match value {
        Value::Numeric(v) => v.is_vector(),
        Value::Integer(v) => v.is_vector(),
        _ => true,
    }
}

/// One arithmetic step. `NA` in, `NA` out.
pub fn scalar_arith(op: BinaryOp, a: f64, b: f64) -> f64 {
    if is_na_real(a) || is_na_real(b) {
        return na_real();
    }
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powf(b),
        BinaryOp::Mod => r_modulo(a, b),
        _ => f64::NAN,
    }
}

/// Floating remainder carrying the sign of the divisor.
fn r_modulo(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

/// First-element comparison returning `y` when it holds, else `NULL`.
fn compare(op: BinaryOp, x: &Value, y: &Value) -> EvalResult {
    let (Some(a), Some(b)) = (x.as_doubles(), y.as_doubles()) else {
        return Err(non_numeric_operand());
    };
    let (Some(&a), Some(&b)) = (a.first(), b.first()) else {
        return Ok(Value::Null);
    };
    Ok(if scalar_compare(op, a, b) {
        y.clone()
    } else {
        Value::Null
    })
}

/// Comparisons involving `NaN` or `NA` never hold.
pub fn scalar_compare(op: BinaryOp, a: f64, b: f64) -> bool {
    match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => !a.is_nan() && !b.is_nan() && a != b,
        _ => false,
    }
}

/// Longest `from:to` result, R's limit for a vector built by `:`.
pub(crate) const MAX_SEQUENCE_LEN: i64 = 2_147_483_647;

/// `from:to`, stepping by one from the truncated start. Ascending only: a
/// start above the end yields an empty vector.
pub fn sequence(from: &Value, to: &Value) -> EvalResult {
    let (Some(a), Some(b)) = (from.as_doubles(), to.as_doubles()) else {
        return Err(non_numeric_operand());
    };
    let (Some(&a), Some(&b)) = (a.first(), b.first()) else {
        return Ok(Value::Null);
    };
    if a.is_nan() || b.is_nan() {
        return Err(non_numeric_operand());
    }
    let (a, b) = (a.trunc(), b.trunc());
    if b >= a && b - a >= MAX_SEQUENCE_LEN as f64 {
        return Err(sequence_too_long());
    }
    let (start, end) = (a as i64, b as i64);
    let values = (start..=end).map(|i| i as f64).collect();
    Ok(Value::numeric_vec(values))
}

/// Unary `-`, `+` and `!`.
pub fn apply_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(if is_true(operand) {
            Value::Null
        } else {
            Value::num(1.0)
        }),
        UnaryOp::Plus => match operand {
            Value::Null | Value::Numeric(_) | Value::Integer(_) => Ok(operand.clone()),
            _ => Err(invalid_unary_operand()),
        },
        UnaryOp::Neg => match operand {
            Value::Null => Ok(Value::Null),
            Value::Numeric(v) => Ok(Value::Numeric(v.map(|&x| -x))),
            Value::Integer(v) => Ok(Value::Integer(v.map(|&i| {
                if i == NA_INTEGER {
                    NA_INTEGER
                } else {
                    -i
                }
            }))),
            _ => Err(invalid_unary_operand()),
        },
    }
}

/// Truthiness.
///
/// `NULL` is false. An atomic number is true unless it is `NaN` (zero is
/// true). A numeric vector is false when empty or when its first element is
/// exactly zero. Every other value is false.
pub fn is_true(value: &Value) -> bool {
    match value {
        Value::Numeric(v) => numeric_truth(v.is_vector(), v.first().copied()),
        Value::Integer(v) => numeric_truth(
            v.is_vector(),
            v.first()
                .map(|&i| if i == NA_INTEGER { na_real() } else { i as f64 }),
        ),
        Value::Null
        | Value::Text(_)
        | Value::Recursive(_)
        | Value::Closure(_)
        | Value::Error(_) => false,
    }
}

fn numeric_truth(is_vector: bool, first: Option<f64>) -> bool {
    match (is_vector, first) {
        (false, Some(x)) => !x.is_nan(),
        (true, Some(x)) => x != 0.0,
        (_, None) => false,
    }
}
