//! Diagnostic and error reporting for Aspire.
//! Aspire 的诊断和错误报告。
//!
//! This crate renders parser diagnostics using ariadne.
//! 本 crate 使用 ariadne 库渲染解析器的诊断信息。

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label, Severity};

use ariadne::{ColorGenerator, Config, Label as AriadneLabel, Report, ReportKind, Source};
use std::io::{self, Write};
use std::ops::Range;

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(source: &str, filename: &str, diagnostic: &Diagnostic) -> io::Result<()> {
    render(source, filename, diagnostic, true, io::stderr())
}

/// Render a diagnostic to a string without colors.
/// 将诊断信息渲染为不带颜色的字符串。
pub fn render_to_string(source: &str, filename: &str, diagnostic: &Diagnostic) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render(source, filename, diagnostic, false, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn render<W: Write>(
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    color: bool,
    out: W,
) -> io::Result<()> {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };

    let mut colors = ColorGenerator::new();
    let mut report = Report::build(kind, filename, diagnostic.span.start.0 as usize)
        .with_config(Config::default().with_color(color))
        .with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    for label in &diagnostic.labels {
        let color = colors.next();
        let ariadne_label = AriadneLabel::new((filename, label_range(source, &label.span.range())))
            .with_message(&label.message)
            .with_color(color);
        report = report.with_label(ariadne_label);
    }

    for note in &diagnostic.notes {
        report = report.with_note(note);
    }

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    report.finish().write((filename, Source::from(source)), out)
}

/// Widen an empty range to cover the character at its position so the
/// label has something to underline.
fn label_range(source: &str, range: &Range<usize>) -> Range<usize> {
    if !range.is_empty() {
        return range.clone();
    }
    let start = range.start.min(source.len());
    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}
