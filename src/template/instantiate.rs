//! Per-call cloning, substitution and output shaping.

use std::fmt;

use tracing::trace;

use super::visitor::TemplateVisitor;
use super::Arg;
use crate::ast::Node;
use crate::errors::TemplateError;
use crate::traverse::{traverse, traverse_cheap};

/// The output of one instantiation: the top-level statements left after
/// substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Every statement was removed.
    Empty,
    Single(Node),
    Multiple(Vec<Node>),
}

impl Fragment {
    fn from_body(mut body: Vec<Node>) -> Self {
        match body.len() {
            0 => Fragment::Empty,
            1 => Fragment::Single(body.remove(0)),
            _ => Fragment::Multiple(body),
        }
    }

    /// The node of a single-statement fragment.
    pub fn single(&self) -> Option<&Node> {
        match self {
            Fragment::Single(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_single(self) -> Option<Node> {
        match self {
            Fragment::Single(node) => Some(node),
            _ => None,
        }
    }

    /// All statements, in order, whatever the shape.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Fragment::Empty => &[],
            Fragment::Single(node) => std::slice::from_ref(node),
            Fragment::Multiple(nodes) => nodes,
        }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Fragment::Empty => Vec::new(),
            Fragment::Single(node) => vec![node],
            Fragment::Multiple(nodes) => nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fragment::Empty)
    }

    fn shape(&self) -> &'static str {
        match self {
            Fragment::Empty => "empty",
            Fragment::Single(_) => "single",
            Fragment::Multiple(_) => "multiple",
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&node.pretty())?;
        }
        Ok(())
    }
}

pub(super) fn instantiate(tree: &Node, mut args: Vec<Arg>) -> Result<Fragment, TemplateError> {
    let mut working = tree.clone();
    if !args.is_empty() {
        traverse(&mut working, &mut TemplateVisitor, args.as_mut_slice())?;
        traverse_cheap(&mut working, Node::clear_consumed);
    }

    let fragment = Fragment::from_body(working.into_body());
    trace!(
        args = args.len(),
        shape = fragment.shape(),
        "instantiated template"
    );
    Ok(fragment)
}
