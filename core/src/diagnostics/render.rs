use core::fmt;

use alloc::string::ToString;

use crate::String;
use crate::parser::{ParseError, ParseErrorKind};

/// One-based line and character column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// Locate `offset` in `source`. Columns count characters, not bytes.
pub fn line_column(source: &str, offset: usize) -> LineColumn {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line_start = line_start_of(source, offset);
    LineColumn {
        line: before.matches('\n').count() + 1,
        column: before[line_start..].chars().count() + 1,
    }
}

/// Render a parse error as a caret-annotated report.
///
/// ```
/// use reckon_core::{parse, render_diagnostic};
///
/// let error = parse("1 / 0", &[]).unwrap_err();
/// assert!(render_diagnostic(&error).starts_with("error[P008] division by zero"));
/// ```
pub fn render_diagnostic(error: &ParseError) -> String {
    DiagnosticReport::new(error).to_string()
}

/// [`fmt::Display`] adapter behind [`render_diagnostic`].
pub struct DiagnosticReport<'a> {
    error: &'a ParseError,
}

impl<'a> DiagnosticReport<'a> {
    pub fn new(error: &'a ParseError) -> Self {
        Self { error }
    }

    fn argument_name(&self) -> Option<(usize, &'a str)> {
        match &self.error.kind {
            ParseErrorKind::IllegalArgumentName { index, name }
            | ParseErrorKind::DuplicatedArgumentName { index, name, .. } => {
                Some((*index, name.as_str()))
            }
            _ => None,
        }
    }

    fn write_excerpt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.error.source.as_str();
        let start = self.error.span.0.start.min(source.len());
        let end = self.error.span.0.end.clamp(start, source.len());
        // Last byte the span covers; an empty span still marks one column.
        let last = if end > start { end - 1 } else { start };

        let first = line_column(source, start);
        let last_line = first.line
            + source.as_bytes()[start..last]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
        let width = digits(last_line);

        writeln!(f, "{:width$}--> {}:{}", "", first.line, first.column)?;
        writeln!(f, "{:width$} |", "")?;

        let mut line_start = line_start_of(source, start);
        let mut line = first.line;
        loop {
            let line_end = source[line_start..]
                .find('\n')
                .map_or(source.len(), |i| line_start + i);
            let text = source[line_start..line_end].trim_end_matches('\r');
            if text.is_empty() {
                writeln!(f, "{:>width$} |", line)?;
            } else {
                writeln!(f, "{:>width$} | {}", line, text)?;
            }

            let from = start.max(line_start) - line_start;
            let to = end.min(line_start + text.len()).max(line_start) - line_start;
            let pad = text[..from.min(text.len())].chars().count();
            let carets = if end == start {
                1
            } else {
                text.get(from..to).map_or(0, |s| s.chars().count())
            };
            if carets > 0 {
                writeln!(
                    f,
                    "{:width$} | {:pad$}{}",
                    "",
                    "",
                    "^".repeat(carets)
                )?;
            }

            if line_end >= last || line_end == source.len() {
                break;
            }
            line_start = line_end + 1;
            line += 1;
        }
        self.write_help(f, width)
    }

    fn write_help(&self, f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
        if let Some(help) = self.error.to_diagnostic().help {
            writeln!(f, "{:width$} = help: {}", "", help)?;
        }
        Ok(())
    }
}

impl fmt::Display for DiagnosticReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = &self.error.kind;
        writeln!(
            f,
            "error[{}] {}: {}",
            kind.code(),
            kind.category(),
            kind.message()
        )?;
        match self.argument_name() {
            Some((index, name)) => {
                writeln!(f, " --> argument #{} `{}`", index, name)?;
                self.write_help(f, 1)
            }
            None => self.write_excerpt(f),
        }
    }
}

fn line_start_of(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
