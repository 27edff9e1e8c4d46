//! Builtin functions.
//!
//! Builtins are reached only after closure lookup fails, so a user
//! definition of the same name shadows them. `c` is the exception and is
//! dispatched before any lookup.

use rho_ir::{Expr, ExprKind, Name};
use rho_value::{
    builtin_arity, concat_mixed, function_not_found, invalid_argument, not_subsettable,
    object_not_found, EvalResult, Recursive, Value,
};

use super::index::element;
use super::Evaluator;
use crate::format::cat_pieces;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BuiltinKind {
    Print,
    List,
    Pairlist,
    Cat,
    Length,
    Dim,
    Dimnames,
    Typeof,
    Class,
    Names,
    Remove,
    Quit,
    Invisible,
}

struct Builtin {
    name: &'static str,
    kind: BuiltinKind,
    /// Exact argument count, or `None` for variadic builtins.
    arity: Option<usize>,
    /// The result is not auto-printed.
    invisible: bool,
}

const fn builtin(
    name: &'static str,
    kind: BuiltinKind,
    arity: Option<usize>,
    invisible: bool,
) -> Builtin {
    Builtin {
        name,
        kind,
        arity,
        invisible,
    }
}

static BUILTINS: &[Builtin] = &[
    builtin("print", BuiltinKind::Print, Some(1), true),
    builtin("list", BuiltinKind::List, None, false),
    builtin("pairlist", BuiltinKind::Pairlist, None, false),
    builtin("cat", BuiltinKind::Cat, None, true),
    builtin("length", BuiltinKind::Length, Some(1), false),
    builtin("dim", BuiltinKind::Dim, Some(1), false),
    builtin("dimnames", BuiltinKind::Dimnames, Some(1), false),
    builtin("typeof", BuiltinKind::Typeof, Some(1), false),
    builtin("class", BuiltinKind::Class, Some(1), false),
    builtin("names", BuiltinKind::Names, Some(1), false),
    builtin("remove", BuiltinKind::Remove, None, true),
    builtin("rm", BuiltinKind::Remove, None, true),
    builtin("quit", BuiltinKind::Quit, None, true),
    builtin("q", BuiltinKind::Quit, None, true),
    builtin("invisible", BuiltinKind::Invisible, Some(1), true),
];

fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

impl Evaluator {
    pub(crate) fn call_builtin(&mut self, name: Name, args: &[Expr]) -> EvalResult {
        let label = self.interner.lookup(name);
        let Some(builtin) = lookup_builtin(label) else {
            return Err(function_not_found(label));
        };
        if let Some(required) = builtin.arity {
            let got = self.count_actuals(args)?;
            if got != required {
                return Err(builtin_arity(label, got, required).with_call(label));
            }
        }
        tracing::trace!(builtin = label, "call");
        let result = self
            .dispatch_builtin(builtin.kind, args)
            .map_err(|e| e.with_call(label))?;
        self.control.invisible = builtin.invisible;
        Ok(result)
    }

    fn dispatch_builtin(&mut self, kind: BuiltinKind, args: &[Expr]) -> EvalResult {
        match kind {
            BuiltinKind::Length => return self.builtin_length(args),
            BuiltinKind::Remove => return self.builtin_remove(args),
            BuiltinKind::Quit => {
                self.quit_requested = true;
                return Ok(Value::Null);
            }
            _ => {}
        }

        let values = self.eval_actuals(args)?;
        match kind {
            BuiltinKind::Print => {
                let value = single(values);
                self.print_handler.write_line(&self.format(&value));
                Ok(value)
            }
            BuiltinKind::List => {
                let (items, names) = self.split_tags(values);
                Ok(Value::named_list(items, names))
            }
            BuiltinKind::Pairlist => Ok(self.pairlist(values)),
            BuiltinKind::Cat => self.cat(values),
            BuiltinKind::Dim => Ok(single(values)
                .dim()
                .map_or(Value::Null, |dim| Value::integer_vec(dim.to_vec()))),
            BuiltinKind::Dimnames => Ok(single(values)
                .dimnames()
                .map_or(Value::Null, |names| Value::Recursive(names.clone()))),
            BuiltinKind::Typeof => Ok(Value::text(single(values).type_name())),
            BuiltinKind::Class => Ok(Value::text_vec(single(values).class_names())),
            BuiltinKind::Names => Ok(match single(values) {
                Value::Recursive(list) if list.has_names() => Value::text_vec(list.names()),
                _ => Value::Null,
            }),
            BuiltinKind::Invisible => Ok(single(values)),
            BuiltinKind::Length | BuiltinKind::Remove | BuiltinKind::Quit => Ok(Value::Null),
        }
    }

    /// `length(x)`. A single-subscript `x[i]` argument is measured through
    /// its index cursor without materialising the selection.
    fn builtin_length(&mut self, args: &[Expr]) -> EvalResult {
        let arg = match args {
            [Expr {
                kind: ExprKind::Tagged { value, .. },
                ..
            }] => value.as_ref(),
            [arg] => arg,
            _ => {
                let values = self.eval_actuals(args)?;
                return Ok(Value::int(single(values).len() as i64));
            }
        };
        if let ExprKind::Index { target, indices } = &arg.kind {
            if let [subscript] = indices.as_slice() {
                let target = self.eval_expr(target)?;
                if matches!(target, Value::Null | Value::Closure(_) | Value::Error(_)) {
                    return Err(not_subsettable(target.type_name()));
                }
                let offsets = self.index_iter(subscript, &target)?;
                return Ok(Value::int(offsets.length() as i64));
            }
        }
        let value = self.eval_expr(arg)?;
        Ok(Value::int(value.len() as i64))
    }

    /// `remove(x, "y")`: unbind each named object from the active frame.
    fn builtin_remove(&mut self, args: &[Expr]) -> EvalResult {
        for arg in args {
            let name = match arg.kind {
                ExprKind::Ident(name) | ExprKind::Str(name) => name,
                _ => return Err(invalid_argument("remove", "names or character strings")),
            };
            if !self.env.remove(name) {
                return Err(object_not_found(self.interner.lookup(name)));
            }
        }
        Ok(Value::Null)
    }

    /// `c(...)`: concatenate into one vector. Tags are ignored.
    pub(crate) fn builtin_c(&mut self, args: &[Expr]) -> EvalResult {
        let values = self.eval_actuals(args)?;
        combine(values.into_iter().map(|(_, value)| value).collect())
    }

    fn split_tags(&self, values: Vec<(Option<Name>, Value)>) -> (Vec<Value>, Vec<String>) {
        values
            .into_iter()
            .map(|(tag, value)| {
                let name = tag.map_or_else(String::new, |t| self.interner.lookup(t).to_owned());
                (value, name)
            })
            .unzip()
    }

    /// `pairlist(a, b)` with exactly two arguments builds a cons cell whose
    /// tag is the first argument's name; other counts build a tagged
    /// sequence.
    fn pairlist(&self, values: Vec<(Option<Name>, Value)>) -> Value {
        if values.is_empty() {
            return Value::Null;
        }
        if let [(tag, car), (_, cdr)] = values.as_slice() {
            let tag = tag.map_or(Value::Null, |t| Value::text(self.interner.lookup(t)));
            return Value::Recursive(Recursive::cons(car.clone(), cdr.clone(), tag));
        }
        let (items, names) = self.split_tags(values);
        Value::Recursive(Recursive::named(items, names, true))
    }

    /// `cat(...)`: pieces joined by `sep` (a single space unless a `sep=`
    /// argument is given), no trailing newline.
    fn cat(&mut self, values: Vec<(Option<Name>, Value)>) -> EvalResult {
        let mut sep = " ".to_owned();
        let mut pieces = Vec::new();
        let mut position = 0;
        for (tag, value) in values {
            if tag == Some(self.names.sep) {
                sep = match &value {
                    Value::Text(t) => t.first().cloned().unwrap_or_default(),
                    _ => return Err(invalid_argument("cat", "character string")),
                };
                continue;
            }
            position += 1;
            pieces.extend(cat_pieces(&value, position)?);
        }
        self.print_handler.write(&pieces.join(&sep));
        Ok(Value::Null)
    }
}

/// The only value of a one-argument builtin.
fn single(values: Vec<(Option<Name>, Value)>) -> Value {
    values
        .into_iter()
        .next()
        .map(|(_, value)| value)
        .unwrap_or_default()
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Mode {
    Integer,
    Numeric,
    Text,
    List,
}

/// Concatenate `values` the way `c` does.
///
/// `NULL`s vanish. Any list (or function) input makes the result a list of
/// the inputs' elements; otherwise all-integer stays integer, numbers mix to
/// double, and all-text stays text. Text mixed with numbers is an error.
pub fn combine(values: Vec<Value>) -> EvalResult {
    let values: Vec<Value> = values.into_iter().filter(|v| !v.is_null()).collect();
    let mut mode: Option<Mode> = None;
    let mut has_text = false;
    let mut has_number = false;
    for value in &values {
        let this = match value {
            Value::Integer(_) => Mode::Integer,
            Value::Numeric(_) => Mode::Numeric,
            Value::Text(_) => Mode::Text,
            Value::Recursive(_) | Value::Closure(_) | Value::Error(_) => Mode::List,
            Value::Null => continue,
        };
        has_text |= this == Mode::Text;
        has_number |= matches!(this, Mode::Integer | Mode::Numeric);
        mode = Some(mode.map_or(this, |m| m.max(this)));
    }

    match mode {
        None => Ok(Value::Null),
        Some(Mode::List) => {
            let mut items = Vec::new();
            let mut names = Vec::new();
            for value in values {
                match value {
                    Value::Recursive(list) => {
                        names.extend(list.names());
                        items.extend(list.iter().cloned());
                    }
                    Value::Closure(_) | Value::Error(_) => {
                        items.push(value);
                        names.push(String::new());
                    }
                    atomic => {
                        for offset in 0..atomic.len() {
                            if let Some(item) = element(&atomic, offset) {
                                items.push(item);
                                names.push(String::new());
                            }
                        }
                    }
                }
            }
            Ok(Value::named_list(items, names))
        }
        Some(Mode::Text) if has_number => Err(concat_mixed()),
        Some(Mode::Text) => Ok(Value::text_vec(
            values
                .iter()
                .filter_map(Value::as_strings)
                .flat_map(|s| s.into_owned())
                .collect(),
        )),
        Some(Mode::Integer) => Ok(Value::integer_vec(
            values
                .iter()
                .flat_map(|v| match v {
                    Value::Integer(i) => i.values().to_vec(),
                    _ => Vec::new(),
                })
                .collect(),
        )),
        Some(Mode::Numeric) => Ok(Value::numeric_vec(
            values
                .iter()
                .filter_map(Value::as_doubles)
                .flat_map(|d| d.into_owned())
                .collect(),
        )),
    }
}

/// Value of the `version` statement.
pub(crate) fn version_info() -> Value {
    let major = env!("CARGO_PKG_VERSION_MAJOR");
    let minor = env!("CARGO_PKG_VERSION_MINOR");
    let patch = env!("CARGO_PKG_VERSION_PATCH");
    Value::named_list(
        vec![
            Value::text(major),
            Value::text(format!("{minor}.{patch}")),
            Value::text("rho"),
            Value::text(format!("rho version {}", env!("CARGO_PKG_VERSION"))),
        ],
        vec![
            "major".into(),
            "minor".into(),
            "language".into(),
            "version.string".into(),
        ],
    )
}

#[cfg(test)]
mod tests;
