//! Parse diagnostics.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::Span;

/// A failure to parse source text, located by byte span and line/column.
#[derive(Debug, Clone, Error)]
#[error("{message} ({line}:{column})")]
pub struct SyntaxError {
    pub message: String,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure.
    pub column: usize,
    pub span: Span,
    /// What the parser would have accepted at this point, if known.
    pub expected: Vec<String>,
    source_code: Arc<NamedSource<String>>,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        source_name: &str,
        source: &str,
        span: Span,
    ) -> Self {
        let (line, column) = line_col(source, span.start);
        Self {
            message: message.into(),
            line,
            column,
            span,
            expected: Vec::new(),
            source_code: Arc::new(NamedSource::new(source_name, source.to_string())),
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source_code.name()
    }
}

/// 1-based line and column of a byte offset.
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("stencil::syntax"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.expected.is_empty() {
            return None;
        }
        Some(Box::new(format!("expected one of: {}", self.expected.join(", "))))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&*self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let len = self.span.len().max(1).min(
            self.source_code
                .inner()
                .len()
                .saturating_sub(self.span.start)
                .max(1),
        );
        let label = LabeledSpan::new(Some(self.message.clone()), self.span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        assert_eq!(line_col("abc", 0), (1, 1));
        assert_eq!(line_col("a\nbc", 3), (2, 2));
        assert_eq!(line_col("a\n", 2), (2, 1));
    }

    #[test]
    fn display_includes_position() {
        let err = SyntaxError::new("Unexpected token", "t.js", "let = 1;", Span::new(4, 5));
        assert_eq!(err.to_string(), "Unexpected token (1:5)");
        assert_eq!(err.source_name(), "t.js");
    }
}
