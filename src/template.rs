//! Template compiler for Stencil
//!
//! A [`Template`] pairs snippet text with parse options. The first call to
//! [`Template::tree`] or [`Template::instantiate`] parses the text, strips it
//! down to bare structure and tags every node as template-authored; the
//! result is cached for the lifetime of the template. Each instantiation then
//! works on its own deep copy, substituting placeholders from the arguments.
//!
//! # Examples
//!
//! ```rust
//! use stencil::ast::builder::{identifier, numeric_literal};
//! use stencil::{compile, Bindings};
//!
//! let template = compile("let NAME = VALUE;");
//! let bindings = Bindings::new()
//!     .with("NAME", identifier("x"))
//!     .with("VALUE", numeric_literal(42.0));
//! let fragment = template.instantiate([bindings]).unwrap();
//! assert_eq!(fragment.to_string(), "let x = 42;");
//! ```

use std::fmt;
use std::panic::Location;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::Node;
use crate::errors::TemplateError;
use crate::syntax::{Parse, ParseOptions, SyntaxParser};
use crate::traverse::{remove_properties, traverse_cheap};

pub mod args;
mod instantiate;
mod visitor;

pub use args::{Arg, Binding, Bindings};
pub use instantiate::Fragment;

// ============================================================================
// OPTIONS
// ============================================================================

/// Caller overrides for the parse options of a template.
///
/// Unset flags fall back to the template defaults, which accept `return`
/// and `super` anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptions {
    pub allow_return_outside_function: Option<bool>,
    pub allow_super_outside_method: Option<bool>,
    pub source_filename: Option<String>,
}

impl TemplateOptions {
    /// Merges the overrides over the template defaults.
    pub fn resolve(&self) -> ParseOptions {
        ParseOptions {
            allow_return_outside_function: self.allow_return_outside_function.unwrap_or(true),
            allow_super_outside_method: self.allow_super_outside_method.unwrap_or(true),
            source_filename: self.source_filename.clone(),
        }
    }
}

impl From<ParseOptions> for TemplateOptions {
    fn from(options: ParseOptions) -> Self {
        Self {
            allow_return_outside_function: Some(options.allow_return_outside_function),
            allow_super_outside_method: Some(options.allow_super_outside_method),
            source_filename: options.source_filename,
        }
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Compiles `code` with the built-in parser and default options.
///
/// Parsing is deferred to first use; a syntax error is reported then, along
/// with the location of this call.
#[track_caller]
pub fn compile(code: impl Into<String>) -> Template {
    Template::with_parser(SyntaxParser, code, TemplateOptions::default())
}

/// Compiles `code` with the built-in parser and caller overrides.
#[track_caller]
pub fn compile_with(code: impl Into<String>, options: TemplateOptions) -> Template {
    Template::with_parser(SyntaxParser, code, options)
}

/// A compiled template: source text plus a lazily built, cached tree.
pub struct Template<P = SyntaxParser> {
    code: String,
    options: ParseOptions,
    declared_at: &'static Location<'static>,
    parser: P,
    tree: OnceCell<Node>,
}

impl<P: Parse> Template<P> {
    /// Compiles `code` with a custom parser.
    #[track_caller]
    pub fn with_parser(parser: P, code: impl Into<String>, options: TemplateOptions) -> Self {
        Self {
            code: code.into(),
            options: options.resolve(),
            declared_at: Location::caller(),
            parser,
            tree: OnceCell::new(),
        }
    }

    /// The cached template tree, parsed on first access.
    ///
    /// A failed parse is not cached; the next call parses again.
    pub fn tree(&self) -> Result<&Node, TemplateError> {
        self.tree.get_or_try_init(|| self.build_tree())
    }

    /// Produces a fresh fragment, substituting placeholders from `args`.
    ///
    /// With no arguments the fragment is a plain copy of the template.
    pub fn instantiate<I>(&self, args: I) -> Result<Fragment, TemplateError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let args = args.into_iter().map(Into::into).collect();
        instantiate::instantiate(self.tree()?, args)
    }

    /// Instantiates without arguments.
    pub fn render(&self) -> Result<Fragment, TemplateError> {
        instantiate::instantiate(self.tree()?, Vec::new())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The resolved options handed to the parser.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Where the template was compiled.
    pub fn declared_at(&self) -> &'static Location<'static> {
        self.declared_at
    }

    fn build_tree(&self) -> Result<Node, TemplateError> {
        let mut tree = self.parser.parse(&self.code, &self.options).map_err(|error| {
            debug!(declared_at = %self.declared_at, %error, "template failed to parse");
            TemplateError::Syntax {
                error,
                declared_at: self.declared_at,
            }
        })?;

        remove_properties(&mut tree);
        traverse_cheap(&mut tree, Node::mark_from_template);

        debug!(
            declared_at = %self.declared_at,
            len = self.code.len(),
            "parsed template"
        );
        Ok(tree)
    }
}

impl<P> fmt::Debug for Template<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("code", &self.code)
            .field("options", &self.options)
            .field("declared_at", &self.declared_at)
            .field("parsed", &self.tree.get().is_some())
            .finish()
    }
}
