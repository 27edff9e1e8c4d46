//! Printing values the way R's console does.

mod numbers;

use rho_ir::{deparse_function, StringInterner};
use rho_value::{cat_unsupported, EvalError, Recursive, Value, NA_INTEGER};

pub use numbers::{format_number, format_numbers};

const LINE_WIDTH: usize = 80;

/// Render `value` for auto-printing and `print()`. No trailing newline.
pub fn format_value(value: &Value, interner: &StringInterner) -> String {
    let mut printer = Printer {
        interner,
        lines: Vec::new(),
    };
    printer.value(value, "");
    printer.lines.join("\n")
}

/// Quote a string the way `print` shows it.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Pieces `cat` writes for its `position`-th (1-based) argument.
pub(crate) fn cat_pieces(value: &Value, position: usize) -> Result<Vec<String>, EvalError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Numeric(v) => Ok(v.values().iter().map(|&x| format_number(x)).collect()),
        Value::Integer(v) => Ok(v.values().iter().map(|&i| integer_text(i)).collect()),
        Value::Text(v) => Ok(v.values().to_vec()),
        Value::Recursive(r) => {
            let mut pieces = Vec::with_capacity(r.len());
            for item in r.iter() {
                match item {
                    Value::Numeric(_) | Value::Integer(_) | Value::Text(_) if item.len() == 1 => {
                        pieces.extend(cat_pieces(item, position)?);
                    }
                    Value::Null => {}
                    _ => return Err(cat_unsupported(position, "list")),
                }
            }
            Ok(pieces)
        }
        Value::Closure(_) | Value::Error(_) => Err(cat_unsupported(position, value.type_name())),
    }
}

fn integer_text(i: i64) -> String {
    if i == NA_INTEGER {
        "NA".to_owned()
    } else {
        i.to_string()
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

fn pad(s: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{s:<width$}"),
        Align::Right => format!("{s:>width$}"),
    }
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Element strings of an atomic value and how to align them.
fn atomic_cells(value: &Value) -> Option<(Vec<String>, Align)> {
    match value {
        Value::Numeric(v) => Some((format_numbers(v.values()), Align::Right)),
        Value::Integer(v) => Some((
            v.values().iter().map(|&i| integer_text(i)).collect(),
            Align::Right,
        )),
        Value::Text(v) => Some((v.values().iter().map(|s| quote(s)).collect(), Align::Left)),
        _ => None,
    }
}

fn empty_label(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer(0)",
        Value::Text(_) => "character(0)",
        _ => "numeric(0)",
    }
}

struct Printer<'a> {
    interner: &'a StringInterner,
    lines: Vec<String>,
}

impl Printer<'_> {
    fn value(&mut self, value: &Value, prefix: &str) {
        match value {
            Value::Null => self.lines.push("NULL".to_owned()),
            Value::Numeric(_) | Value::Integer(_) | Value::Text(_) => self.atomic(value),
            Value::Recursive(r) => self.list(r, prefix),
            Value::Closure(func) => {
                let text = deparse_function(func, self.interner);
                self.lines.extend(text.lines().map(str::to_owned));
            }
            Value::Error(err) => self.lines.push(err.to_string()),
        }
        if let Some(class) = value.explicit_class() {
            self.lines.push("attr(,\"class\")".to_owned());
            self.lines.push(format!("[1] {}", quote(class)));
        }
    }

    fn atomic(&mut self, value: &Value) {
        let dim = value.dim().unwrap_or_default();
        let extent = dim.iter().try_fold(1_i64, |acc, &d| acc.checked_mul(d));
        let fits = extent.and_then(|e| usize::try_from(e).ok()) == Some(value.len());
        if dim.len() >= 2 && fits {
            self.array(value, dim);
        } else if let Some((cells, align)) = atomic_cells(value) {
            self.vector(cells, align, empty_label(value));
        }
    }

    /// `[k]`-labelled rows wrapped at the console width.
    fn vector(&mut self, cells: Vec<String>, align: Align, empty: &str) {
        if cells.is_empty() {
            self.lines.push(empty.to_owned());
            return;
        }
        let width = cells.iter().map(|c| text_width(c)).max().unwrap_or(0);
        let label_width = format!("[{}]", cells.len()).len();
        let per_line = (LINE_WIDTH.saturating_sub(label_width) / (width + 1)).max(1);
        for (row, chunk) in cells.chunks(per_line).enumerate() {
            let label = format!("[{}]", row * per_line + 1);
            let mut line = pad(&label, label_width, Align::Right);
            for cell in chunk {
                line.push(' ');
                line.push_str(&pad(cell, width, align));
            }
            self.lines.push(line.trim_end().to_owned());
        }
    }

    /// Two-dimensional matrices directly; higher ranks as `, , k` slices.
    fn array(&mut self, value: &Value, dim: &[i64]) {
        let (nrow, ncol) = (dim[0].max(0) as usize, dim[1].max(0) as usize);
        let dimnames = value.dimnames();
        if dim.len() == 2 {
            self.matrix(value, 0, nrow, ncol, dimnames);
            return;
        }
        let slice = nrow * ncol;
        let outer = &dim[2..];
        let slices: usize = outer.iter().map(|&d| d.max(0) as usize).product();
        for s in 0..slices {
            let mut rest = s;
            let mut labels = Vec::with_capacity(outer.len());
            for (k, &d) in outer.iter().enumerate() {
                let d = d.max(1) as usize;
                let index = rest % d;
                rest /= d;
                labels.push(
                    dim_label(dimnames, k + 2, index).unwrap_or_else(|| (index + 1).to_string()),
                );
            }
            self.lines.push(format!(", , {}", labels.join(", ")));
            self.lines.push(String::new());
            self.matrix(value, s * slice, nrow, ncol, dimnames);
            self.lines.push(String::new());
        }
    }

    fn matrix(
        &mut self,
        value: &Value,
        offset: usize,
        nrow: usize,
        ncol: usize,
        dimnames: Option<&Recursive>,
    ) {
        if nrow == 0 || ncol == 0 {
            self.lines.push(format!("<{nrow} x {ncol} matrix>"));
            return;
        }
        let row_labels: Vec<String> = (0..nrow)
            .map(|i| dim_label(dimnames, 0, i).unwrap_or_else(|| format!("[{},]", i + 1)))
            .collect();
        let label_width = row_labels.iter().map(|l| text_width(l)).max().unwrap_or(0);

        let mut columns: Vec<(String, Vec<String>, Align)> = Vec::with_capacity(ncol);
        for j in 0..ncol {
            let start = offset + j * nrow;
            let (cells, align) = column_cells(value, start, nrow);
            let header = dim_label(dimnames, 1, j).unwrap_or_else(|| format!("[,{}]", j + 1));
            columns.push((header, cells, align));
        }

        let widths: Vec<usize> = columns
            .iter()
            .map(|(header, cells, _)| {
                cells
                    .iter()
                    .map(|c| text_width(c))
                    .chain(std::iter::once(text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut header = " ".repeat(label_width);
        for ((name, _, align), &width) in columns.iter().zip(&widths) {
            header.push(' ');
            header.push_str(&pad(name, width, *align));
        }
        self.lines.push(header.trim_end().to_owned());

        for (i, label) in row_labels.iter().enumerate() {
            let mut line = pad(label, label_width, Align::Left);
            for ((_, cells, align), &width) in columns.iter().zip(&widths) {
                line.push(' ');
                line.push_str(&pad(cells.get(i).map_or("", String::as_str), width, *align));
            }
            self.lines.push(line.trim_end().to_owned());
        }
    }

    fn list(&mut self, list: &Recursive, prefix: &str) {
        if list.is_empty() {
            let empty = if list.is_pairlist() {
                "pairlist()"
            } else {
                "list()"
            };
            self.lines.push(empty.to_owned());
            return;
        }
        for (i, item) in list.iter().enumerate() {
            let tag = match list.name_at(i) {
                Some(name) => format!("{prefix}${name}"),
                None => format!("{prefix}[[{}]]", i + 1),
            };
            self.lines.push(tag.clone());
            self.value(item, &tag);
            self.lines.push(String::new());
        }
    }
}

/// Formatted cells of one matrix column.
fn column_cells(value: &Value, start: usize, nrow: usize) -> (Vec<String>, Align) {
    let end = start + nrow;
    match value {
        Value::Numeric(v) => (
            format_numbers(v.values().get(start..end).unwrap_or_default()),
            Align::Right,
        ),
        Value::Integer(v) => (
            v.values()
                .get(start..end)
                .unwrap_or_default()
                .iter()
                .map(|&i| integer_text(i))
                .collect(),
            Align::Right,
        ),
        Value::Text(v) => (
            v.values()
                .get(start..end)
                .unwrap_or_default()
                .iter()
                .map(|s| quote(s))
                .collect(),
            Align::Left,
        ),
        _ => (vec![String::new(); nrow], Align::Left),
    }
}

/// Label `index` of dimension `dimension` from `dimnames`, if one is set.
fn dim_label(dimnames: Option<&Recursive>, dimension: usize, index: usize) -> Option<String> {
    match dimnames?.get(dimension)? {
        Value::Text(names) => names.get(index).cloned(),
        _ => None,
    }
}
