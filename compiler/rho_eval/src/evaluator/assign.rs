//! Assignment: `x <- v`, `x <<- v`, `attr(x) <- v`, `x[i] <- v` and
//! `x[[i]] <- v`.
//!
//! Replacement forms evaluate the right-hand side and every subscript
//! first, then mutate the binding in place. Validation runs before any
//! mutation, so a failed replacement leaves the binding untouched.

use rho_ir::{AssignScope, Expr, ExprKind, Name};
use rho_value::{
    attribute_on_null, dimnames_extent, dimnames_length, dimnames_non_array, dimnames_not_list,
    function_not_found, incorrect_dimensions, invalid_argument, invalid_assignment_target,
    invalid_dim, na_real, not_subsettable, object_not_found, subscript_out_of_bounds,
    unexpected_attribute_value, Attributes, EvalError, EvalResult, IndexIter, Recursive, Value,
    NA_INTEGER, NA_OFFSET,
};

use super::index::{element, item_offset};
use super::Evaluator;

/// Attributes with a replacement form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AttributeName {
    Dim,
    Dimnames,
    Class,
}

impl Evaluator {
    pub(crate) fn eval_assign(
        &mut self,
        target: &Expr,
        value: &Expr,
        scope: AssignScope,
    ) -> EvalResult {
        let result = match &target.kind {
            ExprKind::Ident(name) | ExprKind::Str(name) => {
                let value = self.eval_expr(value)?;
                self.bind(*name, value.clone(), scope);
                value
            }
            ExprKind::Call { callee, args } => self.assign_attribute(callee, args, value, scope)?,
            ExprKind::Index { target, indices } => {
                let name = replacement_target(target)?;
                let value = self.eval_expr(value)?;
                let subscript = match indices.as_slice() {
                    [] => None,
                    [index] if matches!(index.kind, ExprKind::Missing) => None,
                    [index] => Some(self.eval_expr(index)?),
                    _ => return Err(incorrect_dimensions()),
                };
                self.modify_binding(name, scope, |target| {
                    assign_elements(target, subscript.as_ref(), &value)
                })?;
                value
            }
            ExprKind::ListIndex { target, index } => {
                let name = replacement_target(target)?;
                let value = self.eval_expr(value)?;
                let index = self.eval_expr(index)?;
                self.modify_binding(name, scope, |target| assign_item(target, &index, &value))?;
                value
            }
            _ => return Err(invalid_assignment_target()),
        };
        self.control.invisible = true;
        Ok(result)
    }

    fn bind(&self, name: Name, value: Value, scope: AssignScope) {
        match scope {
            AssignScope::Local => self.env.define(name, value),
            AssignScope::Super => self.env.assign_super(name, value),
        }
    }

    /// Run `f` on the binding an assignment of `scope` targets.
    fn modify_binding(
        &self,
        name: Name,
        scope: AssignScope,
        f: impl FnOnce(&mut Value) -> Result<(), EvalError>,
    ) -> Result<(), EvalError> {
        let outcome = match scope {
            AssignScope::Local => self.env.modify_local(name, f),
            AssignScope::Super => self.env.modify_super(name, f),
        };
        outcome.unwrap_or_else(|| Err(object_not_found(self.interner.lookup(name))))
    }

    /// `dim(x) <- v`, `dimnames(x) <- v`, `class(x) <- v`.
    fn assign_attribute(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        value: &Expr,
        scope: AssignScope,
    ) -> EvalResult {
        let Some(function) = callee.as_ident() else {
            return Err(invalid_assignment_target());
        };
        let attribute = if function == self.names.dim {
            AttributeName::Dim
        } else if function == self.names.dimnames {
            AttributeName::Dimnames
        } else if function == self.names.class {
            AttributeName::Class
        } else {
            let label = format!("{}<-", self.interner.lookup(function));
            return Err(function_not_found(&label));
        };
        let name = match args {
            [arg] => replacement_target(arg)?,
            _ => return Err(invalid_assignment_target()),
        };

        let value = self.eval_expr(value)?;
        tracing::trace!(?attribute, "attribute replacement");
        self.modify_binding(name, scope, |target| match attribute {
            AttributeName::Dim => set_dim(target, &value),
            AttributeName::Dimnames => set_dimnames(target, &value),
            AttributeName::Class => set_class(target, &value),
        })?;
        Ok(value)
    }
}

/// The variable a replacement form writes back to.
fn replacement_target(target: &Expr) -> Result<Name, EvalError> {
    match target.kind {
        ExprKind::Ident(name) | ExprKind::Str(name) => Ok(name),
        _ => Err(invalid_assignment_target()),
    }
}

fn attributes_of<'v>(
    target: &'v mut Value,
    attribute: &str,
) -> Result<&'v mut Attributes, EvalError> {
    if target.is_null() {
        return Err(attribute_on_null());
    }
    target
        .attrs_mut()
        .ok_or_else(|| invalid_argument(attribute, "vector"))
}

/// Drop attribute storage `clear` leaves empty.
fn clear_attributes(target: &mut Value, clear: impl FnOnce(&mut Attributes)) {
    if let Some(attrs) = target.attrs_mut() {
        clear(attrs);
    }
    target.tidy_attrs();
}

/// `dim(x) <- v`. Extents are truncated toward zero and not checked
/// against the length. A new `dim` discards `dimnames`.
pub(crate) fn set_dim(target: &mut Value, value: &Value) -> Result<(), EvalError> {
    match value {
        Value::Null => {
            if target.is_null() {
                return Err(attribute_on_null());
            }
            clear_attributes(target, |attrs| {
                attrs.dim = None;
                attrs.dimnames = None;
            });
            Ok(())
        }
        Value::Numeric(_) | Value::Integer(_) => {
            let dims: Vec<i64> = value
                .as_doubles()
                .map(|d| d.iter().map(|x| x.trunc() as i64).collect())
                .unwrap_or_default();
            let attrs = attributes_of(target, "dim")?;
            attrs.dim = Some(dims);
            attrs.dimnames = None;
            Ok(())
        }
        _ => Err(invalid_dim()),
    }
}

/// `dimnames(x) <- v`.
///
/// `v` must be a list with one entry per dimension; each entry is `NULL`
/// or a vector with exactly that dimension's extent (numbers are stored as
/// text).
pub(crate) fn set_dimnames(target: &mut Value, value: &Value) -> Result<(), EvalError> {
    if target.is_null() {
        return Err(attribute_on_null());
    }
    if value.is_null() {
        clear_attributes(target, |attrs| attrs.dimnames = None);
        return Ok(());
    }
    let Some(dim) = target.dim().map(<[i64]>::to_vec) else {
        return Err(dimnames_non_array());
    };
    let Value::Recursive(list) = value else {
        return Err(dimnames_not_list());
    };
    if list.len() != dim.len() {
        return Err(dimnames_length(list.len(), dim.len()));
    }

    let mut entries = Vec::with_capacity(list.len());
    for (i, (entry, &extent)) in list.iter().zip(&dim).enumerate() {
        let entry = match entry {
            Value::Null => Value::Null,
            Value::Numeric(_) | Value::Integer(_) | Value::Text(_) => {
                let labels = entry.as_strings().unwrap_or_default().into_owned();
                if labels.len() as i64 != extent {
                    return Err(dimnames_extent(i + 1));
                }
                Value::text_vec(labels)
            }
            other => return Err(unexpected_attribute_value("dimnames", other.type_name())),
        };
        entries.push(entry);
    }

    let dimnames = Recursive::named(entries, list.names(), false);
    attributes_of(target, "dimnames")?.dimnames = Some(dimnames);
    Ok(())
}

/// `class(x) <- v`. Only the first string is kept; `NULL` removes the
/// explicit class.
pub(crate) fn set_class(target: &mut Value, value: &Value) -> Result<(), EvalError> {
    match value {
        Value::Null => {
            if target.is_null() {
                return Err(attribute_on_null());
            }
            clear_attributes(target, |attrs| attrs.class = None);
            Ok(())
        }
        Value::Text(names) => {
            let class = names.first().cloned();
            attributes_of(target, "class")?.class = class;
            target.tidy_attrs();
            Ok(())
        }
        other => Err(unexpected_attribute_value("class", other.type_name())),
    }
}

/// Storage mode of a replacement, in coercion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Mode {
    Integer,
    Numeric,
    Text,
    List,
}

fn mode_of(value: &Value) -> Option<Mode> {
    match value {
        Value::Null => None,
        Value::Integer(_) => Some(Mode::Integer),
        Value::Numeric(_) => Some(Mode::Numeric),
        Value::Text(_) => Some(Mode::Text),
        Value::Recursive(_) | Value::Closure(_) | Value::Error(_) => Some(Mode::List),
    }
}

/// Owned element storage while a replacement is applied.
enum Cells {
    Integer(Vec<i64>),
    Numeric(Vec<f64>),
    Text(Vec<String>),
    List(Vec<Value>, Vec<String>),
}

impl Cells {
    /// Elements of `value` coerced to `mode`.
    fn of(value: &Value, mode: Mode) -> Cells {
        match mode {
            Mode::Integer => Cells::Integer(match value {
                Value::Integer(v) => v.values().to_vec(),
                _ => Vec::new(),
            }),
            Mode::Numeric => Cells::Numeric(
                value
                    .as_doubles()
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_default(),
            ),
            Mode::Text => Cells::Text(
                value
                    .as_strings()
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_default(),
            ),
            Mode::List => match value {
                Value::Recursive(list) => Cells::List(list.iter().cloned().collect(), list.names()),
                Value::Null => Cells::List(Vec::new(), Vec::new()),
                Value::Closure(_) | Value::Error(_) => {
                    Cells::List(vec![value.clone()], vec![String::new()])
                }
                atomic => {
                    let items: Vec<Value> = (0..atomic.len())
                        .filter_map(|offset| element(atomic, offset))
                        .collect();
                    let names = vec![String::new(); items.len()];
                    Cells::List(items, names)
                }
            },
        }
    }

    fn len(&self) -> usize {
        match self {
            Cells::Integer(v) => v.len(),
            Cells::Numeric(v) => v.len(),
            Cells::Text(v) => v.len(),
            Cells::List(v, _) => v.len(),
        }
    }

    /// Pad with NA (`NULL` for lists) up to `len`.
    fn grow(&mut self, len: usize) {
        match self {
            Cells::Integer(v) => v.resize(len, NA_INTEGER),
            Cells::Numeric(v) => v.resize(len, na_real()),
            Cells::Text(v) => v.resize(len, "NA".to_owned()),
            Cells::List(items, names) => {
                items.resize(len, Value::Null);
                names.resize(len, String::new());
            }
        }
    }

    /// Copy element `from` of `source` (same mode) to `offset`.
    fn set(&mut self, offset: usize, source: &Cells, from: usize) {
        match (self, source) {
            (Cells::Integer(dst), Cells::Integer(src)) => dst[offset] = src[from],
            (Cells::Numeric(dst), Cells::Numeric(src)) => dst[offset] = src[from],
            (Cells::Text(dst), Cells::Text(src)) => dst[offset].clone_from(&src[from]),
            (Cells::List(dst, _), Cells::List(src, _)) => dst[offset] = src[from].clone(),
            _ => {}
        }
    }

    fn into_value(self) -> Value {
        match self {
            Cells::Integer(v) => Value::integer_vec(v),
            Cells::Numeric(v) => Value::numeric_vec(v),
            Cells::Text(v) => Value::text_vec(v),
            Cells::List(items, names) => Value::named_list(items, names),
        }
    }
}

/// Rebuild `target` from `cells`, keeping attributes. `dim` and
/// `dimnames` are dropped if the length changed.
fn store(target: &mut Value, cells: Cells) {
    let old_len = target.len();
    let mut attrs = target.attrs().cloned();
    if cells.len() != old_len {
        if let Some(attrs) = attrs.as_mut() {
            attrs.dim = None;
            attrs.dimnames = None;
        }
    }
    let mut value = cells.into_value();
    if let Some(attrs) = attrs {
        if let Some(slot) = value.attrs_mut() {
            *slot = attrs;
        }
        value.tidy_attrs();
    }
    *target = value;
}

/// `x[i] <- v`. `None` selects every element.
///
/// The result's mode is the higher of the two operands'; `v` is recycled
/// over the selected offsets and `x` grows to reach offsets past its end.
pub(crate) fn assign_elements(
    target: &mut Value,
    subscript: Option<&Value>,
    value: &Value,
) -> Result<(), EvalError> {
    if matches!(target, Value::Closure(_) | Value::Error(_)) {
        return Err(not_subsettable(target.type_name()));
    }
    let offsets: Vec<usize> = match subscript {
        None => (0..target.len()).collect(),
        Some(Value::Text(names)) => name_offsets(target, names.values())?,
        Some(index) => IndexIter::from_subscript(index, target.len())?
            .filter(|&o| o != NA_OFFSET)
            .collect(),
    };
    if offsets.is_empty() {
        return Ok(());
    }
    if value.is_empty() {
        return Err(invalid_argument("[<-", "non-empty replacement"));
    }

    let Some(value_mode) = mode_of(value) else {
        return Ok(());
    };
    let mode = mode_of(target).map_or(value_mode, |m| m.max(value_mode));
    let mut cells = Cells::of(target, mode);
    let source = Cells::of(value, mode);

    let end = offsets.iter().copied().max().map_or(0, |m| m + 1);
    if end > cells.len() {
        cells.grow(end);
    }
    if let (Some(Value::Text(names)), Cells::List(_, cell_names)) = (subscript, &mut cells) {
        for (&offset, name) in offsets.iter().zip(names.values()) {
            if cell_names[offset].is_empty() {
                cell_names[offset].clone_from(name);
            }
        }
    }
    for (k, &offset) in offsets.iter().enumerate() {
        cells.set(offset, &source, k % source.len());
    }
    store(target, cells);
    Ok(())
}

/// Offsets for a text subscript on the left of `<-`: existing list names
/// resolve in place, unknown names append.
fn name_offsets(target: &Value, names: &[String]) -> Result<Vec<usize>, EvalError> {
    let list = match target {
        Value::Recursive(list) => Some(list),
        Value::Null => None,
        _ => return Err(invalid_argument("[<-", "list")),
    };
    let mut next = target.len();
    let mut offsets = Vec::with_capacity(names.len());
    for name in names {
        match list.and_then(|l| l.position_of(name)) {
            Some(offset) => offsets.push(offset),
            None => {
                offsets.push(next);
                next += 1;
            }
        }
    }
    Ok(offsets)
}

/// `x[[i]] <- v`.
///
/// On a list the item itself is replaced (`NULL` removes it); on an atomic
/// vector `v` must be a single element.
pub(crate) fn assign_item(
    target: &mut Value,
    index: &Value,
    value: &Value,
) -> Result<(), EvalError> {
    if matches!(target, Value::Closure(_) | Value::Error(_)) {
        return Err(not_subsettable(target.type_name()));
    }
    let becomes_list = matches!(target, Value::Recursive(_))
        || matches!(value, Value::Recursive(_) | Value::Closure(_))
        || (target.is_null() && value.is_null());
    if !becomes_list {
        if value.len() != 1 {
            return Err(invalid_argument("[[<-", "replacement of length one"));
        }
        return assign_elements(target, Some(index), value);
    }

    let Cells::List(mut items, mut names) = Cells::of(target, Mode::List) else {
        return Ok(());
    };
    let offset = match (item_offset(target, index)?, index) {
        (Some(offset), _) => offset,
        (None, Value::Text(_)) => items.len(),
        (None, _) => return Err(subscript_out_of_bounds()),
    };
    if value.is_null() {
        if offset < items.len() {
            items.remove(offset);
            names.remove(offset);
            store(target, Cells::List(items, names));
        }
        return Ok(());
    }
    if offset >= items.len() {
        items.resize(offset + 1, Value::Null);
        names.resize(offset + 1, String::new());
        if let Value::Text(label) = index {
            names[offset] = label.first().cloned().unwrap_or_default();
        }
    }
    items[offset] = value.clone();
    store(target, Cells::List(items, names));
    Ok(())
}

#[cfg(test)]
mod tests;
