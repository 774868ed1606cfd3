//! The visitor's handle on the node being visited.

use crate::ast::Node;

/// What the visitor asked the walker to do with the current node.
#[derive(Debug, Default)]
pub(crate) enum Action {
    #[default]
    Continue,
    Skip,
    Remove,
    Replace(Vec<Node>),
}

/// A node together with its position in the parent.
///
/// Structural changes requested here (`skip`, `remove`, `replace_with`,
/// `replace_inline`) are applied by the walker once the hook returns.
pub struct NodePath<'a> {
    node: &'a mut Node,
    parent: &'static str,
    key: &'static str,
    index: Option<usize>,
    action: Action,
}

impl<'a> NodePath<'a> {
    pub(crate) fn new(
        node: &'a mut Node,
        parent: &'static str,
        key: &'static str,
        index: Option<usize>,
    ) -> Self {
        Self {
            node,
            parent,
            key,
            index,
            action: Action::Continue,
        }
    }

    pub fn node(&self) -> &Node {
        self.node
    }

    pub fn node_mut(&mut self) -> &mut Node {
        self.node
    }

    /// Type name of the parent node.
    pub fn parent_type(&self) -> &'static str {
        self.parent
    }

    /// Name of the parent slot holding this node.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Position within the parent slot, for list slots.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Do not descend into this node. Has no effect once a removal or
    /// replacement was requested.
    pub fn skip(&mut self) {
        if matches!(self.action, Action::Continue) {
            self.action = Action::Skip;
        }
    }

    pub fn remove(&mut self) {
        self.action = Action::Remove;
    }

    /// Replaces this node. The replacement is visited next.
    pub fn replace_with(&mut self, node: Node) {
        self.action = Action::Replace(vec![node]);
    }

    /// Replaces this node with any number of nodes. In a list slot they are
    /// spliced in order; in a statement slot several nodes become a block.
    /// An empty list removes the node.
    pub fn replace_inline(&mut self, nodes: impl Into<Vec<Node>>) {
        self.action = Action::Replace(nodes.into());
    }

    pub fn is_removed(&self) -> bool {
        matches!(self.action, Action::Remove)
    }

    pub(crate) fn take_action(&mut self) -> Action {
        std::mem::take(&mut self.action)
    }
}
