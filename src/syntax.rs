//! Syntax module for Stencil
//!
//! Turns source text into a `Program` node. The template engine only talks to
//! this module through the [`Parse`] trait, so any parser producing the same
//! node model can stand in for [`SyntaxParser`].

use serde::{Deserialize, Serialize};

use crate::ast::Node;

pub mod error;
pub mod parser;

pub use error::SyntaxError;
pub use parser::parse;

/// Options recognised by the parser.
///
/// Deserializes from camelCase configuration:
///
/// ```rust
/// use stencil::syntax::ParseOptions;
/// let options: ParseOptions =
///     serde_json::from_str(r#"{"allowReturnOutsideFunction": true}"#).unwrap();
/// assert!(options.allow_return_outside_function);
/// assert!(!options.allow_super_outside_method);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Accept `return` at the top level.
    pub allow_return_outside_function: bool,
    /// Accept `super` outside of a class method.
    pub allow_super_outside_method: bool,
    /// Name shown in diagnostics for the parsed text.
    pub source_filename: Option<String>,
}

impl ParseOptions {
    pub(crate) fn source_name(&self) -> &str {
        self.source_filename.as_deref().unwrap_or("<template>")
    }
}

/// A source parser producing a `Program` node.
pub trait Parse {
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<Node, SyntaxError>;
}

/// The built-in parser for the statement and expression subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxParser;

impl Parse for SyntaxParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<Node, SyntaxError> {
        parser::parse(source, options)
    }
}

impl<F> Parse for F
where
    F: Fn(&str, &ParseOptions) -> Result<Node, SyntaxError>,
{
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<Node, SyntaxError> {
        self(source, options)
    }
}
