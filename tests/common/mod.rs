//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stencil::ast::{Node, Span};
use stencil::syntax::{parse, ParseOptions, SyntaxError};

/// A parser that counts its invocations and otherwise defers to the
/// built-in one.
pub fn counting_parser() -> (
    Arc<AtomicUsize>,
    impl Fn(&str, &ParseOptions) -> Result<Node, SyntaxError> + Send + Sync,
) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let parser = move |source: &str, options: &ParseOptions| {
        seen.fetch_add(1, Ordering::SeqCst);
        parse(source, options)
    };
    (count, parser)
}

/// A parser that counts its invocations and always fails.
pub fn failing_parser() -> (
    Arc<AtomicUsize>,
    impl Fn(&str, &ParseOptions) -> Result<Node, SyntaxError> + Send + Sync,
) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let parser = move |source: &str, _options: &ParseOptions| {
        seen.fetch_add(1, Ordering::SeqCst);
        Err(SyntaxError::new("stub failure", "<stub>", source, Span::new(0, 0)))
    };
    (count, parser)
}

pub fn calls(count: &AtomicUsize) -> usize {
    count.load(Ordering::SeqCst)
}

/// Parses a single expression, e.g. a substitution value.
pub fn expr(source: &str) -> Node {
    let program = parse(&format!("{};", source), &ParseOptions::default())
        .unwrap_or_else(|e| panic!("failed to parse `{}`: {}", source, e));
    program.into_body().remove(0).into_statement_expression()
}
