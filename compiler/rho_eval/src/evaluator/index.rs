//! Reading subscripts: `x[i]`, `m[i, j]` and `x[[i]]`.

use rho_ir::{BinaryOp, Expr, ExprKind};
use rho_value::{
    incorrect_dimensions, invalid_subscript, na_real, not_subsettable, sequence_too_long,
    subscript_out_of_bounds, EvalError, EvalResult, IndexIter, Recursive, Value, NA_INTEGER,
    NA_OFFSET,
};

use super::Evaluator;
use crate::operators::{sequence, MAX_SEQUENCE_LEN};

impl Evaluator {
    pub(crate) fn eval_index(&mut self, target: &Expr, indices: &[Expr]) -> EvalResult {
        let value = self.eval_expr(target)?;
        if matches!(value, Value::Null | Value::Closure(_) | Value::Error(_)) {
            return Err(not_subsettable(value.type_name()));
        }
        match indices {
            [] => Ok(value),
            [subscript] => {
                let offsets = self.index_iter(subscript, &value)?;
                Ok(select(&value, offsets))
            }
            [rows, cols] if value.dim().is_some_and(|d| d.len() == 2) => {
                self.index_matrix(&value, rows, cols)
            }
            _ => Err(incorrect_dimensions()),
        }
    }

    pub(crate) fn eval_list_index(&mut self, target: &Expr, index: &Expr) -> EvalResult {
        let value = self.eval_expr(target)?;
        let index = self.eval_expr(index)?;
        item(&value, &index)
    }

    /// Offsets selected by one subscript of `value`.
    ///
    /// `from:to` with non-negative bounds becomes a range cursor without
    /// building the sequence.
    pub(crate) fn index_iter(
        &mut self,
        subscript: &Expr,
        value: &Value,
    ) -> Result<IndexIter, EvalError> {
        match &subscript.kind {
            ExprKind::Missing => Ok(IndexIter::full(value.len())),
            ExprKind::Binary {
                op: BinaryOp::Sequence,
                left,
                right,
            } => {
                let from = self.eval_expr(left)?;
                let to = self.eval_expr(right)?;
                match (scalar_bound(&from), scalar_bound(&to)) {
                    (Some(a), Some(b)) if a >= 0 && b >= 0 => {
                        if b.saturating_sub(a) >= MAX_SEQUENCE_LEN {
                            return Err(sequence_too_long());
                        }
                        Ok(IndexIter::range(a, b))
                    }
                    _ => subscript_iter(&sequence(&from, &to)?, value),
                }
            }
            _ => {
                let index = self.eval_expr(subscript)?;
                subscript_iter(&index, value)
            }
        }
    }

    fn index_matrix(&mut self, value: &Value, rows: &Expr, cols: &Expr) -> EvalResult {
        let (nrow, ncol) = match value.dim() {
            Some(&[nrow, ncol]) => (nrow.max(0) as usize, ncol.max(0) as usize),
            _ => return Err(incorrect_dimensions()),
        };
        // `dim<-` does not check extents against the length, so a cell
        // grid larger than the data has no addressable cells beyond it.
        match nrow.checked_mul(ncol) {
            Some(cells) if cells <= value.len() => {}
            _ => return Err(subscript_out_of_bounds()),
        }
        let row_offsets = self.dimension_offsets(rows, nrow, value.dimnames(), 0)?;
        let col_offsets = self.dimension_offsets(cols, ncol, value.dimnames(), 1)?;

        let mut offsets = Vec::with_capacity(row_offsets.len() * col_offsets.len());
        for &col in &col_offsets {
            for &row in &row_offsets {
                let offset = col
                    .checked_mul(nrow)
                    .and_then(|base| base.checked_add(row))
                    .ok_or_else(subscript_out_of_bounds)?;
                offsets.push(offset);
            }
        }
        let mut result = select(value, offsets.into_iter());
        if row_offsets.len() > 1 && col_offsets.len() > 1 {
            let dimnames = value
                .dimnames()
                .map(|names| subset_dimnames(names, &row_offsets, &col_offsets));
            if let Some(attrs) = result.attrs_mut() {
                attrs.dim = Some(vec![row_offsets.len() as i64, col_offsets.len() as i64]);
                attrs.dimnames = dimnames;
            }
        }
        Ok(result)
    }

    /// Offsets along one dimension. Every offset must fall inside the
    /// extent; labels resolve through `dimnames`.
    fn dimension_offsets(
        &mut self,
        subscript: &Expr,
        extent: usize,
        dimnames: Option<&Recursive>,
        dimension: usize,
    ) -> Result<Vec<usize>, EvalError> {
        if let ExprKind::Missing = subscript.kind {
            return Ok((0..extent).collect());
        }
        let index = self.eval_expr(subscript)?;
        let offsets: Vec<usize> = match (&index, dimnames.and_then(|d| d.get(dimension))) {
            (Value::Text(labels), Some(Value::Text(names))) => labels
                .values()
                .iter()
                .map(|label| {
                    names
                        .values()
                        .iter()
                        .position(|n| n == label)
                        .unwrap_or(NA_OFFSET)
                })
                .collect(),
            (Value::Text(_), _) => return Err(subscript_out_of_bounds()),
            _ => IndexIter::from_subscript(&index, extent)?.collect(),
        };
        if offsets.iter().any(|&o| o >= extent) {
            return Err(subscript_out_of_bounds());
        }
        Ok(offsets)
    }
}

fn scalar_bound(value: &Value) -> Option<i64> {
    match value {
        Value::Numeric(v) if !v.is_vector() => v
            .first()
            .filter(|x| x.is_finite())
            .map(|x| x.trunc() as i64),
        Value::Integer(v) if !v.is_vector() => v.first().copied().filter(|&i| i != NA_INTEGER),
        _ => None,
    }
}

/// Cursor for an evaluated subscript. Text subscripts select list items by
/// name; unknown names select nothing real and read back as NA.
fn subscript_iter(index: &Value, target: &Value) -> Result<IndexIter, EvalError> {
    if let (Value::Text(names), Value::Recursive(list)) = (index, target) {
        if list.has_names() {
            let positions = names
                .values()
                .iter()
                .map(|name| list.position_of(name).map_or(NA_OFFSET, |p| p + 1))
                .collect();
            return Ok(IndexIter::array(positions));
        }
    }
    IndexIter::from_subscript(index, target.len())
}

/// Gather `offsets` out of `value`. The result is always vector form;
/// offsets past the end (and NA offsets) read as NA, or `NULL` for lists.
pub(crate) fn select(value: &Value, offsets: impl Iterator<Item = usize>) -> Value {
    match value {
        Value::Numeric(v) => Value::numeric_vec(
            offsets
                .map(|o| v.get(o).copied().unwrap_or_else(na_real))
                .collect(),
        ),
        Value::Integer(v) => Value::integer_vec(
            offsets
                .map(|o| v.get(o).copied().unwrap_or(NA_INTEGER))
                .collect(),
        ),
        Value::Text(v) => Value::text_vec(
            offsets
                .map(|o| v.get(o).cloned().unwrap_or_else(|| "NA".to_owned()))
                .collect(),
        ),
        Value::Recursive(list) => {
            let (items, names) = offsets
                .map(|o| {
                    let item = list.get(o).cloned().unwrap_or_default();
                    let name = list.name_at(o).unwrap_or_default().to_owned();
                    (item, name)
                })
                .unzip();
            Value::named_list(items, names)
        }
        Value::Null | Value::Closure(_) | Value::Error(_) => Value::Null,
    }
}

/// The element at `offset` as a standalone value: an atomic scalar for
/// vectors, the item itself for lists.
pub(crate) fn element(value: &Value, offset: usize) -> Option<Value> {
    match value {
        Value::Numeric(v) => v.get(offset).map(|&x| Value::num(x)),
        Value::Integer(v) => v.get(offset).map(|&i| Value::int(i)),
        Value::Text(v) => v.get(offset).map(|s| Value::text(s.as_str())),
        Value::Recursive(list) => list.get(offset).cloned(),
        Value::Null | Value::Closure(_) | Value::Error(_) => None,
    }
}

/// Zero-based offset a `[[i]]` subscript names, if it names one.
pub(crate) fn item_offset(value: &Value, index: &Value) -> Result<Option<usize>, EvalError> {
    match index {
        Value::Text(names) => Ok(match value {
            Value::Recursive(list) => names.first().and_then(|n| list.position_of(n)),
            _ => None,
        }),
        Value::Numeric(_) | Value::Integer(_) => {
            let position = index
                .as_doubles()
                .and_then(|d| d.first().copied())
                .filter(|x| x.is_finite() && *x >= 1.0);
            Ok(position.map(|x| x.trunc() as usize - 1))
        }
        Value::Null => Err(subscript_out_of_bounds()),
        Value::Recursive(_) | Value::Closure(_) | Value::Error(_) => {
            Err(invalid_subscript(index.type_name()))
        }
    }
}

/// `x[[i]]`.
pub(crate) fn item(value: &Value, index: &Value) -> EvalResult {
    if matches!(value, Value::Null | Value::Closure(_) | Value::Error(_)) {
        return Err(not_subsettable(value.type_name()));
    }
    item_offset(value, index)?
        .and_then(|offset| element(value, offset))
        .ok_or_else(subscript_out_of_bounds)
}

fn subset_dimnames(dimnames: &Recursive, rows: &[usize], cols: &[usize]) -> Recursive {
    let pick = |entry: Option<&Value>, offsets: &[usize]| match entry {
        Some(names @ Value::Text(_)) => select(names, offsets.iter().copied()),
        _ => Value::Null,
    };
    Recursive::list(vec![
        pick(dimnames.get(0), rows),
        pick(dimnames.get(1), cols),
    ])
}
