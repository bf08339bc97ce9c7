// Common syntax structures shared by the parser, the AST and diagnostics.

use core::ops::Range;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }

    /// Empty span at `offset`, used for end-of-input tokens.
    pub fn empty(offset: usize) -> Self {
        Self(offset..offset)
    }

    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start.min(b.0.start), a.0.end.max(b.0.end))
    }

    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }

    pub fn is_empty(&self) -> bool {
        self.0.start >= self.0.end
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// `+` for `-` and `-` for `+`. Multiplicative operators are returned unchanged.
    pub fn flipped(self) -> Self {
        match self {
            BinaryOp::Add => BinaryOp::Sub,
            BinaryOp::Sub => BinaryOp::Add,
            other => other,
        }
    }

    pub fn is_additive(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub)
    }
}
