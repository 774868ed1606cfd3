//! Stencil Error Handling
//!
//! A template reports two kinds of failure: its text does not parse, or a
//! substitution cannot be applied to the tree. Parse failures surface lazily,
//! so they carry the location where the template was compiled.

use std::fmt;
use std::panic::Location;

use miette::{Diagnostic, LabeledSpan, SourceCode};
use thiserror::Error;

use crate::syntax::SyntaxError;
use crate::traverse::TraverseError;

#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    /// The template text failed to parse. The parser error is part of the
    /// message, not a cause.
    #[error("{error}\nfrom template declared at {declared_at}")]
    Syntax {
        error: SyntaxError,
        declared_at: &'static Location<'static>,
    },

    /// The walker could not apply a substitution.
    #[error(transparent)]
    Traverse(#[from] TraverseError),
}

impl TemplateError {
    /// Where the failing template was compiled, for syntax errors.
    pub fn declared_at(&self) -> Option<&'static Location<'static>> {
        match self {
            TemplateError::Syntax { declared_at, .. } => Some(*declared_at),
            TemplateError::Traverse(_) => None,
        }
    }

    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            TemplateError::Syntax { error, .. } => Some(error),
            TemplateError::Traverse(_) => None,
        }
    }
}

impl Diagnostic for TemplateError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            TemplateError::Syntax { error, .. } => error.code(),
            TemplateError::Traverse(err) => err.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            TemplateError::Syntax { declared_at, .. } => {
                Some(Box::new(format!("template declared at {}", declared_at)))
            }
            TemplateError::Traverse(err) => err.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            TemplateError::Syntax { error, .. } => error.source_code(),
            TemplateError::Traverse(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            TemplateError::Syntax { error, .. } => error.labels(),
            TemplateError::Traverse(err) => err.labels(),
        }
    }
}
