//! Error rendering using ariadne
//!
//! Renders Reckon errors with source snippets and labelled spans. The
//! colorless, dependency-free variant lives in
//! [`reckon_core::diagnostics::render_diagnostic`].

use crate::{Diagnostic, Error, Severity, Span};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

/// Name ariadne shows for the expression source.
const SOURCE_ID: &str = "<expr>";

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use reckon::{CompilationOptions, compile_expression, render_error};
///
/// if let Err(e) = compile_expression("1 + * 2", &[], &CompilationOptions::default()) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String
///
/// # Example
/// ```
/// use reckon::{CompilationOptions, compile_expression, render_error_to_string};
///
/// let err = compile_expression("x", &["y"], &CompilationOptions::default()).unwrap_err();
/// assert!(render_error_to_string(&err).contains("undefined variable"));
/// ```
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation {
            diagnostics,
            source,
        } => render_diagnostics(source, diagnostics, writer, use_color),
        Error::Runtime { diagnostic, source } => {
            render_diagnostics(source, core::slice::from_ref(diagnostic), writer, use_color)
        }
        Error::ResourceExceeded(msg) => {
            writeln!(writer, "Resource limit exceeded: {}", msg)
        }
        Error::Api(msg) => {
            writeln!(writer, "API error: {}", msg)
        }
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(ariadne::Config::default().with_color(use_color));

        // Add error code if present
        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        // Argument-name and VM errors have no source position.
        if diag.span != Span::default() {
            let color = colors.next();
            report = report.with_label(
                Label::new((SOURCE_ID, diag.span.0.clone()))
                    .with_message(&diag.message)
                    .with_color(color),
            );
        }

        for related in &diag.related {
            let color = colors.next();
            report = report.with_label(
                Label::new((SOURCE_ID, related.span.0.clone()))
                    .with_message(&related.message)
                    .with_color(color),
            );
        }

        if let Some(help) = &diag.help {
            report = report.with_help(help);
        }

        report.finish().write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}
