//! Source-annotated rendering of front-end errors.

use ariadne::{Config, Label, Report, ReportKind, Source};
use rho_parse::ParseError;

/// Render `err` against `source` as a plain-text report.
///
/// `path` labels the snippet; the REPL passes `<stdin>`. Color is off so
/// the output is stable when redirected.
pub fn render_parse_error(path: &str, source: &str, err: &ParseError) -> String {
    let range = clamp(err.span().to_range(), source.len());
    let label = match err.expected() {
        Some(expected) => format!("expected {expected}"),
        None => err.to_string(),
    };

    let report = Report::build(ReportKind::Error, path, range.start)
        .with_config(Config::default().with_color(false))
        .with_message(err.to_string())
        .with_label(Label::new((path, range)).with_message(label))
        .finish();

    let mut buf = Vec::new();
    if report.write((path, Source::from(source)), &mut buf).is_err() {
        return format!("{path}: error: {err}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Keep the label inside the source; end-of-input spans sit one past it.
fn clamp(range: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    start..end
}
