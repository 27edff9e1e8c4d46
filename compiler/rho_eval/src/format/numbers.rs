//! R-style number formatting: up to seven significant digits, one shared
//! layout (fixed or scientific) per group of numbers.

use rho_value::is_na_real;

const SIGNIFICANT: usize = 7;
const MAX_DECIMALS: usize = 15;

/// Format every element of `values` with a common layout.
pub fn format_numbers(values: &[f64]) -> Vec<String> {
    let finite: Vec<(usize, i32)> = values
        .iter()
        .filter(|x| x.is_finite())
        .map(|&x| digits_and_exponent(x))
        .collect();

    let decimals = finite
        .iter()
        .map(|&(sig, exp)| (sig as i32 - 1 - exp).max(0) as usize)
        .max()
        .unwrap_or(0)
        .min(MAX_DECIMALS);
    let mantissa = finite.iter().map(|&(sig, _)| sig).max().unwrap_or(1) - 1;

    let fixed_width = values
        .iter()
        .filter(|x| x.is_finite())
        .map(|&x| fixed(x, decimals).len())
        .max()
        .unwrap_or(0);
    let sci_width = values
        .iter()
        .filter(|x| x.is_finite())
        .map(|&x| scientific(x, mantissa).len())
        .max()
        .unwrap_or(0);
    let use_fixed = fixed_width <= sci_width;

    values
        .iter()
        .map(|&x| match special(x) {
            Some(s) => s.to_owned(),
            None if use_fixed => fixed(x, decimals),
            None => scientific(x, mantissa),
        })
        .collect()
}

/// Format one number on its own.
pub fn format_number(x: f64) -> String {
    format_numbers(&[x]).pop().unwrap_or_default()
}

fn special(x: f64) -> Option<&'static str> {
    if is_na_real(x) {
        Some("NA")
    } else if x.is_nan() {
        Some("NaN")
    } else if x == f64::INFINITY {
        Some("Inf")
    } else if x == f64::NEG_INFINITY {
        Some("-Inf")
    } else {
        None
    }
}

/// Significant digits needed (after rounding to seven) and the decimal
/// exponent of a finite number.
fn digits_and_exponent(x: f64) -> (usize, i32) {
    if x == 0.0 {
        return (1, 0);
    }
    let rendered = format!("{:.*e}", SIGNIFICANT - 1, x.abs());
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return (SIGNIFICANT, 0);
    };
    let exponent = exponent.parse().unwrap_or(0);
    let digits = mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .trim_end_matches('0')
        .len()
        .max(1);
    (digits, exponent)
}

fn fixed(x: f64, decimals: usize) -> String {
    let s = format!("{x:.decimals$}");
    // `-0` prints as `0`.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_owned()
    } else {
        s
    }
}

fn scientific(x: f64, mantissa: usize) -> String {
    let rendered = format!("{x:.mantissa$e}");
    match rendered.split_once('e') {
        Some((m, e)) => {
            let exp: i32 = e.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{m}e{sign}{:02}", exp.unsigned_abs())
        }
        None => rendered,
    }
}
