//! Tree walker for Stencil
//!
//! Depth-first traversal with `enter`/`exit` hooks. Visitors change the tree
//! through [`NodePath`]; the walker owns the structural bookkeeping that
//! follows a removal or replacement (re-queueing replacements, statement
//! wrapping, and the parent fix-ups applied when a required child vanishes).

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::{
    builder::{block, expression_statement},
    Node, NodeKind, Slot,
};

pub mod path;

pub use path::NodePath;
use path::Action;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Hooks called for every visited node. Both default to doing nothing.
pub trait Visitor<S: ?Sized> {
    fn enter(&mut self, _path: &mut NodePath<'_>, _state: &mut S) {}

    fn exit(&mut self, _path: &mut NodePath<'_>, _state: &mut S) {}
}

/// Structural failures while applying a visitor's changes.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TraverseError {
    #[error("cannot remove the `{key}` of {parent}: the slot is required")]
    #[diagnostic(code(stencil::traverse::required_slot))]
    RequiredSlot {
        parent: &'static str,
        key: &'static str,
    },

    #[error("cannot place {count} nodes into the `{key}` of {parent}")]
    #[diagnostic(code(stencil::traverse::multiple_nodes))]
    MultipleInSingleSlot {
        parent: &'static str,
        key: &'static str,
        count: usize,
    },

    #[error("cannot place {found} into the `{key}` of {parent}: an expression is required")]
    #[diagnostic(code(stencil::traverse::statement_in_expression))]
    StatementInExpressionSlot {
        parent: &'static str,
        key: &'static str,
        found: &'static str,
    },

    #[error("the traversal root {root} cannot be removed or replaced")]
    #[diagnostic(code(stencil::traverse::detached_root))]
    DetachedRoot { root: &'static str },
}

/// Walks the descendants of `root`; the root itself is not visited.
pub fn traverse<V, S>(root: &mut Node, visitor: &mut V, state: &mut S) -> Result<(), TraverseError>
where
    V: Visitor<S> + ?Sized,
    S: ?Sized,
{
    let mut walker = Walker { visitor, state };
    match walker.children(root)? {
        Effect::None => Ok(()),
        Effect::RemoveSelf | Effect::ReplaceSelf(_) => Err(TraverseError::DetachedRoot {
            root: root.type_name(),
        }),
    }
}

/// Calls `f` on `node` and every descendant, pre-order. No paths, no
/// structural changes.
pub fn traverse_cheap(node: &mut Node, mut f: impl FnMut(&mut Node)) {
    fn walk(node: &mut Node, f: &mut dyn FnMut(&mut Node)) {
        f(node);
        for (_, slot) in node.kind.slots_mut() {
            for child in slot.into_nodes() {
                walk(child, f);
            }
        }
    }
    walk(node, &mut f);
}

/// Strips location, derived data and template markers from a whole tree.
pub fn remove_properties(node: &mut Node) {
    traverse_cheap(node, clear_node);
}

/// Strips location, derived data and template markers from one node.
pub fn clear_node(node: &mut Node) {
    node.span = None;
    node.extra = Default::default();
    node.clear_markers();
}

// ============================================================================
// WALKER
// ============================================================================

/// What happens to a visited node in its slot.
enum Outcome {
    Keep,
    Remove,
    Replace(Vec<Node>),
}

impl From<Action> for Outcome {
    fn from(action: Action) -> Self {
        match action {
            Action::Continue | Action::Skip => Outcome::Keep,
            Action::Remove => Outcome::Remove,
            Action::Replace(nodes) if nodes.is_empty() => Outcome::Remove,
            Action::Replace(nodes) => Outcome::Replace(nodes),
        }
    }
}

/// What a removal inside a node means for the node itself.
enum Effect {
    None,
    RemoveSelf,
    ReplaceSelf(Node),
}

/// The kind of node a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Statement,
    Expression,
    Other,
}

impl Role {
    fn of(parent: &str, key: &str) -> Role {
        match (parent, key) {
            ("Program" | "BlockStatement", "body")
            | ("IfStatement", "consequent" | "alternate")
            | ("WhileStatement", "body") => Role::Statement,
            ("VariableDeclaration", "declarations")
            | ("ObjectExpression", "properties")
            | ("FunctionDeclaration" | "FunctionExpression", "body")
            | ("TryStatement", _)
            | ("CatchClause", "body") => Role::Other,
            _ => Role::Expression,
        }
    }
}

/// Slots that fall back to an empty block when their statement is removed.
fn empties_to_block(parent: &str, key: &str) -> bool {
    matches!(
        (parent, key),
        ("IfStatement", "consequent")
            | ("WhileStatement", "body")
            | ("FunctionDeclaration" | "FunctionExpression", "body")
    )
}

struct Walker<'w, V: ?Sized, S: ?Sized> {
    visitor: &'w mut V,
    state: &'w mut S,
}

impl<'w, V, S> Walker<'w, V, S>
where
    V: Visitor<S> + ?Sized,
    S: ?Sized,
{
    fn visit(
        &mut self,
        node: &mut Node,
        parent: &'static str,
        key: &'static str,
        index: Option<usize>,
    ) -> Result<Outcome, TraverseError> {
        let mut path = NodePath::new(node, parent, key, index);
        self.visitor.enter(&mut path, self.state);
        match path.take_action() {
            Action::Continue => {}
            action => return Ok(action.into()),
        }

        match self.children(node)? {
            Effect::None => {}
            Effect::RemoveSelf => return Ok(Outcome::Remove),
            Effect::ReplaceSelf(other) => return Ok(Outcome::Replace(vec![other])),
        }

        let mut path = NodePath::new(node, parent, key, index);
        self.visitor.exit(&mut path, self.state);
        Ok(path.take_action().into())
    }

    fn children(&mut self, node: &mut Node) -> Result<Effect, TraverseError> {
        let parent = node.type_name();
        let mut removed = None;

        for (key, slot) in node.kind.slots_mut() {
            let role = Role::of(parent, key);
            let hook = match slot {
                Slot::Many(list) => self.visit_list(list, parent, key, role)?,
                Slot::One(child) => self.visit_one(child, parent, key, role)?,
                Slot::Maybe(child) => self.visit_maybe(child, parent, key, role)?,
            };
            if hook {
                removed = Some(key);
                break;
            }
        }

        match removed {
            Some(key) => removal_hook(node, key),
            None => Ok(Effect::None),
        }
    }

    /// Returns true if the removal has to be handled by the parent.
    fn visit_list(
        &mut self,
        list: &mut Vec<Node>,
        parent: &'static str,
        key: &'static str,
        role: Role,
    ) -> Result<bool, TraverseError> {
        let mut index = 0;
        while index < list.len() {
            match self.visit(&mut list[index], parent, key, Some(index))? {
                Outcome::Keep => index += 1,
                Outcome::Remove => {
                    if parent == "VariableDeclaration" && list.len() == 1 {
                        return Ok(true);
                    }
                    list.remove(index);
                }
                Outcome::Replace(nodes) => {
                    let nodes = nodes
                        .into_iter()
                        .map(|n| coerce(n, role, parent, key))
                        .collect::<Result<Vec<_>, _>>()?;
                    list.splice(index..=index, nodes);
                }
            }
        }
        Ok(false)
    }

    fn visit_one(
        &mut self,
        child: &mut Box<Node>,
        parent: &'static str,
        key: &'static str,
        role: Role,
    ) -> Result<bool, TraverseError> {
        loop {
            match self.visit(child, parent, key, None)? {
                Outcome::Keep => return Ok(false),
                Outcome::Remove if empties_to_block(parent, key) => {
                    **child = block(Vec::new());
                    return Ok(false);
                }
                Outcome::Remove => return Ok(true),
                Outcome::Replace(nodes) => **child = single(nodes, role, parent, key)?,
            }
        }
    }

    fn visit_maybe(
        &mut self,
        slot: &mut Option<Box<Node>>,
        parent: &'static str,
        key: &'static str,
        role: Role,
    ) -> Result<bool, TraverseError> {
        loop {
            let Some(child) = slot.as_mut() else {
                return Ok(false);
            };
            match self.visit(child, parent, key, None)? {
                Outcome::Keep => return Ok(false),
                Outcome::Remove => {
                    *slot = None;
                    return Ok(false);
                }
                Outcome::Replace(nodes) => {
                    *slot = Some(Box::new(single(nodes, role, parent, key)?));
                }
            }
        }
    }
}

// ============================================================================
// STRUCTURAL HELPERS
// ============================================================================

/// Fix-ups for a node whose required child was removed.
fn removal_hook(node: &mut Node, key: &'static str) -> Result<Effect, TraverseError> {
    let parent = node.type_name();
    match (&mut node.kind, key) {
        (NodeKind::ExpressionStatement { .. }, "expression")
        | (NodeKind::WhileStatement { .. }, "test")
        | (NodeKind::VariableDeclaration { .. }, "declarations") => Ok(Effect::RemoveSelf),

        (
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. },
            "left" | "right",
        ) => {
            let survivor = if key == "left" { right } else { left };
            let placeholder = Node::new(NodeKind::EmptyStatement);
            Ok(Effect::ReplaceSelf(std::mem::replace(&mut **survivor, placeholder)))
        }

        _ => Err(TraverseError::RequiredSlot { parent, key }),
    }
}

/// Fits replacement nodes into a single-node slot.
fn single(
    nodes: Vec<Node>,
    role: Role,
    parent: &'static str,
    key: &'static str,
) -> Result<Node, TraverseError> {
    let count = nodes.len();
    let mut nodes = nodes.into_iter();
    match (nodes.next(), count) {
        (Some(node), 1) => coerce(node, role, parent, key),
        (Some(first), _) if role == Role::Statement => {
            let body = std::iter::once(first)
                .chain(nodes)
                .map(|n| coerce(n, role, parent, key))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(block(body))
        }
        _ => Err(TraverseError::MultipleInSingleSlot { parent, key, count }),
    }
}

/// Adapts a node to the kind of slot it is placed into.
fn coerce(
    node: Node,
    role: Role,
    parent: &'static str,
    key: &'static str,
) -> Result<Node, TraverseError> {
    match role {
        Role::Statement if node.is_expression() => Ok(expression_statement(node)),
        Role::Expression if node.is_expression_statement() => {
            Ok(node.into_statement_expression())
        }
        Role::Expression if node.is_statement() => {
            Err(TraverseError::StatementInExpressionSlot {
                parent,
                key,
                found: node.type_name(),
            })
        }
        _ => Ok(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::*;
    use crate::ast::{BinaryOperator, Span};
    use crate::syntax::{parse, ParseOptions};

    fn program(source: &str) -> Node {
        parse(source, &ParseOptions::default()).unwrap()
    }

    /// Removes nodes by identifier or type name, replaces identifiers by name.
    struct Rewrite {
        remove: &'static str,
        replace: Option<(&'static str, fn() -> Node)>,
    }

    impl Visitor<Vec<&'static str>> for Rewrite {
        fn enter(&mut self, path: &mut NodePath<'_>, seen: &mut Vec<&'static str>) {
            let type_name = path.node().type_name();
            seen.push(type_name);
            let name = path.node().identifier_name().map(str::to_string);
            if type_name == self.remove || name.as_deref() == Some(self.remove) {
                path.remove();
                return;
            }
            if let (Some((target, make)), Some(name)) = (self.replace, name) {
                if name == target {
                    path.replace_with(make());
                }
            }
        }
    }

    fn call_g() -> Node {
        call(identifier("g"), Vec::new())
    }

    fn b_plus_c() -> Node {
        binary(BinaryOperator::Add, identifier("b"), identifier("c"))
    }

    fn bare_return() -> Node {
        return_statement(None)
    }

    fn rewrite(source: &str, remove: &'static str) -> Result<Node, TraverseError> {
        let mut root = program(source);
        let mut visitor = Rewrite {
            remove,
            replace: None,
        };
        traverse(&mut root, &mut visitor, &mut Vec::new())?;
        Ok(root)
    }

    #[test]
    fn root_is_not_visited() {
        let mut root = program("a;");
        let mut seen = Vec::new();
        let mut visitor = Rewrite {
            remove: "",
            replace: None,
        };
        traverse(&mut root, &mut visitor, &mut seen).unwrap();
        assert_eq!(seen, ["ExpressionStatement", "Identifier"]);
    }

    #[test]
    fn removing_expression_removes_statement() {
        let root = rewrite("a; b;", "a").unwrap();
        assert_eq!(root.pretty(), "b;");
    }

    #[test]
    fn removing_list_element() {
        let root = rewrite("f(a, b);", "a").unwrap();
        assert_eq!(root.pretty(), "f(b);");
    }

    #[test]
    fn removing_binary_side_keeps_other_side() {
        let root = rewrite("x = a + b;", "a").unwrap();
        assert_eq!(root.pretty(), "x = b;");
    }

    #[test]
    fn removing_only_declarator_removes_declaration() {
        let root = rewrite("let a; b();", "VariableDeclarator").unwrap();
        assert_eq!(root.pretty(), "b();");
    }

    #[test]
    fn removing_optional_slot() {
        let root = rewrite("let x = a;", "a").unwrap();
        assert_eq!(root.pretty(), "let x;");
    }

    #[test]
    fn removing_while_test_removes_loop() {
        let root = rewrite("while (a) go(); done();", "a").unwrap();
        assert_eq!(root.pretty(), "done();");
    }

    #[test]
    fn removing_if_consequent_leaves_empty_block() {
        let root = rewrite("if (ok) a;", "a").unwrap();
        assert_eq!(root.pretty(), "if (ok) {}");
    }

    #[test]
    fn removing_required_slot_fails() {
        let err = rewrite("a.b();", "a").unwrap_err();
        assert_eq!(
            err,
            TraverseError::RequiredSlot {
                parent: "MemberExpression",
                key: "object"
            }
        );
    }

    #[test]
    fn expression_in_statement_slot_is_wrapped() {
        let mut root = program("a;");
        let NodeKind::Program { body } = &mut root.kind else {
            panic!("expected program");
        };
        body[0] = identifier("a");

        let mut visitor = Rewrite {
            remove: "",
            replace: Some(("a", call_g)),
        };
        traverse(&mut root, &mut visitor, &mut Vec::new()).unwrap();
        assert_eq!(root.pretty(), "g();");
        assert!(root.body().unwrap()[0].is_expression_statement());
    }

    #[test]
    fn replacement_is_visited_again() {
        let mut root = program("a;");
        let mut seen = Vec::new();
        let mut visitor = Rewrite {
            remove: "",
            replace: Some(("a", b_plus_c)),
        };
        traverse(&mut root, &mut visitor, &mut seen).unwrap();
        assert_eq!(root.pretty(), "b + c;");
        assert_eq!(
            seen,
            [
                "ExpressionStatement",
                "Identifier",
                "BinaryExpression",
                "Identifier",
                "Identifier"
            ]
        );
    }

    #[test]
    fn statement_in_expression_slot_fails() {
        let mut root = program("f(a);");
        let mut visitor = Rewrite {
            remove: "",
            replace: Some(("a", bare_return)),
        };
        let err = traverse(&mut root, &mut visitor, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            TraverseError::StatementInExpressionSlot {
                found: "ReturnStatement",
                ..
            }
        ));
    }

    #[test]
    fn removing_from_detached_root_fails() {
        let mut root = expression_statement(identifier("a"));
        let mut visitor = Rewrite {
            remove: "a",
            replace: None,
        };
        let err = traverse(&mut root, &mut visitor, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err,
            TraverseError::DetachedRoot {
                root: "ExpressionStatement"
            }
        );
    }

    #[test]
    fn remove_properties_strips_whole_tree() {
        let mut root = program("f('x', (y));");
        remove_properties(&mut root);
        assert!(root
            .descendants()
            .iter()
            .all(|n| n.span.is_none() && n.extra.is_empty()));
    }

    #[test]
    fn clear_node_is_shallow() {
        let mut node = call(identifier("f"), Vec::new());
        node.span = Some(Span::new(0, 3));
        if let NodeKind::CallExpression { callee, .. } = &mut node.kind {
            callee.span = Some(Span::new(0, 1));
        }
        clear_node(&mut node);
        assert_eq!(node.span, None);
        assert_eq!(node.children()[0].span, Some(Span::new(0, 1)));
    }

    #[test]
    fn traverse_cheap_includes_root() {
        let mut root = program("a + b;");
        let mut count = 0;
        traverse_cheap(&mut root, |_| count += 1);
        assert_eq!(count, 5);
    }
}
