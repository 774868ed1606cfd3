//! Stencil compiles source snippets containing placeholders into reusable
//! syntax-tree templates.
//!
//! Placeholders are identifiers, substituted by name from a [`Bindings`]
//! argument or by position as `$0`, `$1`, ...

pub use crate::errors::TemplateError;
pub use crate::template::{compile, compile_with, Arg, Binding, Bindings, Fragment, Template, TemplateOptions};

pub mod ast;
pub mod errors;
pub mod syntax;
pub mod template;
pub mod traverse;
