//! Invocation arguments.

use std::collections::HashMap;

use crate::ast::Node;

/// One argument of a template invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A substitution value, addressable as `$N`.
    Node(Node),
    /// Several values spliced in place of `$N`. An empty list removes the
    /// placeholder.
    Nodes(Vec<Node>),
    /// An absent value. `$N` placeholders pointing at it are left alone.
    Null,
    /// Named substitution values. Only consulted in first position, and never
    /// itself a value for `$0`.
    Named(Bindings),
}

impl Arg {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Arg::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[Node]> {
        match self {
            Arg::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn as_bindings(&self) -> Option<&Bindings> {
        match self {
            Arg::Named(bindings) => Some(bindings),
            _ => None,
        }
    }
}

impl From<Node> for Arg {
    fn from(node: Node) -> Self {
        Arg::Node(node)
    }
}

impl From<Vec<Node>> for Arg {
    fn from(nodes: Vec<Node>) -> Self {
        Arg::Nodes(nodes)
    }
}

impl From<Option<Node>> for Arg {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Arg::Null, Arg::Node)
    }
}

impl From<Bindings> for Arg {
    fn from(bindings: Bindings) -> Self {
        Arg::Named(bindings)
    }
}

/// The value bound to a placeholder name.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Explicit null: the placeholder is removed from the output.
    Null,
    Node(Node),
    /// Spliced in order. In a statement slot that holds one node, several
    /// statements become a block.
    Nodes(Vec<Node>),
}

impl From<Node> for Binding {
    fn from(node: Node) -> Self {
        Binding::Node(node)
    }
}

impl From<Vec<Node>> for Binding {
    fn from(nodes: Vec<Node>) -> Self {
        Binding::Nodes(nodes)
    }
}

impl From<Option<Node>> for Binding {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Binding::Null, Binding::Node)
    }
}

/// Placeholder names mapped to substitution values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(HashMap<String, Binding>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, node: Node) -> Self {
        self.0.insert(name.into(), Binding::Node(node));
        self
    }

    pub fn with_nodes(mut self, name: impl Into<String>, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.0
            .insert(name.into(), Binding::Nodes(nodes.into_iter().collect()));
        self
    }

    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), Binding::Null);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Binding>) -> Option<Binding> {
        self.0.insert(name.into(), value.into())
    }

    /// `None` if the name is unbound.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Binding>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Binding>> Extend<(K, V)> for Bindings {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
