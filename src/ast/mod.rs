//! AST module for Stencil
//!
//! This module provides the syntax-tree node model shared by the parser, the
//! walker and the template engine. Every node carries its kind, optional
//! source location, derived metadata, and the two markers the template engine
//! relies on (`from_template` and `consumed`).

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code as byte offsets.
///
/// # Examples
///
/// ```rust
/// use stencil::ast::Span;
/// let span = Span { start: 0, end: 5 };
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Derived data the parser attaches to a node. Never semantically meaningful:
/// the printer falls back to the node kind when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Extra {
    /// Literal text exactly as written in the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// The expression was wrapped in parentheses in the source.
    #[serde(default, skip_serializing_if = "is_false")]
    pub parenthesized: bool,
}

impl Extra {
    pub fn is_empty(&self) -> bool {
        self.raw.is_none() && !self.parenthesized
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A syntax-tree node.
///
/// Equality ignores the template markers, and cloning never carries the
/// `consumed` marker over to the copy.
#[derive(Debug, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub extra: Extra,
    #[serde(skip)]
    from_template: bool,
    #[serde(skip)]
    consumed: bool,
}

/// The node kinds of the statement and expression subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Program {
        body: Vec<Node>,
    },

    // Statements
    ExpressionStatement {
        expression: Box<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    EmptyStatement,
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<Node>,
    },
    VariableDeclarator {
        id: Box<Node>,
        init: Option<Box<Node>>,
    },
    FunctionDeclaration {
        id: Box<Node>,
        params: Vec<Node>,
        body: Box<Node>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        handler: Option<Box<Node>>,
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        param: Option<Box<Node>>,
        body: Box<Node>,
    },

    // Expressions
    Identifier {
        name: String,
    },
    NumericLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    ThisExpression,
    Super,
    ArrayExpression {
        elements: Vec<Node>,
    },
    ObjectExpression {
        properties: Vec<Node>,
    },
    ObjectProperty {
        key: Box<Node>,
        value: Box<Node>,
        computed: bool,
        shorthand: bool,
    },
    FunctionExpression {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<Node>,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    AssignmentExpression {
        operator: AssignmentOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    NewExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
}

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Rem,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = "in")]
    In,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    RemAssign,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "var" => Some(DeclarationKind::Var),
            "let" => Some(DeclarationKind::Let),
            "const" => Some(DeclarationKind::Const),
            _ => None,
        }
    }
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::BitNot => "~",
            UnaryOperator::TypeOf => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "!" => Some(UnaryOperator::Not),
            "-" => Some(UnaryOperator::Minus),
            "+" => Some(UnaryOperator::Plus),
            "~" => Some(UnaryOperator::BitNot),
            "typeof" => Some(UnaryOperator::TypeOf),
            "void" => Some(UnaryOperator::Void),
            "delete" => Some(UnaryOperator::Delete),
            _ => None,
        }
    }

    /// Keyword operators need a space before their operand.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            UnaryOperator::TypeOf | UnaryOperator::Void | UnaryOperator::Delete
        )
    }
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Rem => "%",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNotEq => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::InstanceOf => "instanceof",
            BinaryOperator::In => "in",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        let op = match text {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Rem,
            "==" => BinaryOperator::Eq,
            "!=" => BinaryOperator::NotEq,
            "===" => BinaryOperator::StrictEq,
            "!==" => BinaryOperator::StrictNotEq,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::LtEq,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::GtEq,
            "instanceof" => BinaryOperator::InstanceOf,
            "in" => BinaryOperator::In,
            _ => return None,
        };
        Some(op)
    }

    /// Binding power, higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::StrictEq
            | BinaryOperator::StrictNotEq => 9,
            BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
            | BinaryOperator::InstanceOf
            | BinaryOperator::In => 10,
            BinaryOperator::Add | BinaryOperator::Sub => 12,
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Rem => 13,
        }
    }
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "&&" => Some(LogicalOperator::And),
            "||" => Some(LogicalOperator::Or),
            _ => None,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            LogicalOperator::Or => 4,
            LogicalOperator::And => 5,
        }
    }
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::RemAssign => "%=",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "=" => Some(AssignmentOperator::Assign),
            "+=" => Some(AssignmentOperator::AddAssign),
            "-=" => Some(AssignmentOperator::SubAssign),
            "*=" => Some(AssignmentOperator::MulAssign),
            "/=" => Some(AssignmentOperator::DivAssign),
            "%=" => Some(AssignmentOperator::RemAssign),
            _ => None,
        }
    }
}

// ============================================================================
// CHILD SLOTS
// ============================================================================

/// A mutable view of one child position of a node.
pub enum Slot<'a> {
    /// A required child.
    One(&'a mut Box<Node>),
    /// A child that may be absent.
    Maybe(&'a mut Option<Box<Node>>),
    /// An ordered list of children.
    Many(&'a mut Vec<Node>),
}

impl<'a> Slot<'a> {
    /// Flattens the slot into the nodes it currently holds.
    pub fn into_nodes(self) -> Vec<&'a mut Node> {
        match self {
            Slot::One(node) => vec![&mut **node],
            Slot::Maybe(node) => node.as_deref_mut().into_iter().collect(),
            Slot::Many(nodes) => nodes.iter_mut().collect(),
        }
    }
}

impl NodeKind {
    /// The ESTree-style type name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::ThrowStatement { .. } => "ThrowStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::TryStatement { .. } => "TryStatement",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::NumericLiteral { .. } => "NumericLiteral",
            NodeKind::StringLiteral { .. } => "StringLiteral",
            NodeKind::BooleanLiteral { .. } => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::ObjectProperty { .. } => "ObjectProperty",
            NodeKind::FunctionExpression { .. } => "FunctionExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::LogicalExpression { .. } => "LogicalExpression",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::NewExpression { .. } => "NewExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
        }
    }

    /// Named child positions in source order.
    pub fn slots_mut(&mut self) -> Vec<(&'static str, Slot<'_>)> {
        use NodeKind::*;
        match self {
            Program { body } | BlockStatement { body } => vec![("body", Slot::Many(body))],
            ExpressionStatement { expression } => vec![("expression", Slot::One(expression))],
            VariableDeclaration { declarations, .. } => {
                vec![("declarations", Slot::Many(declarations))]
            }
            VariableDeclarator { id, init } => {
                vec![("id", Slot::One(id)), ("init", Slot::Maybe(init))]
            }
            FunctionDeclaration { id, params, body } => vec![
                ("id", Slot::One(id)),
                ("params", Slot::Many(params)),
                ("body", Slot::One(body)),
            ],
            ReturnStatement { argument } => vec![("argument", Slot::Maybe(argument))],
            ThrowStatement { argument } => vec![("argument", Slot::One(argument))],
            IfStatement {
                test,
                consequent,
                alternate,
            } => vec![
                ("test", Slot::One(test)),
                ("consequent", Slot::One(consequent)),
                ("alternate", Slot::Maybe(alternate)),
            ],
            WhileStatement { test, body } => {
                vec![("test", Slot::One(test)), ("body", Slot::One(body))]
            }
            TryStatement {
                block,
                handler,
                finalizer,
            } => vec![
                ("block", Slot::One(block)),
                ("handler", Slot::Maybe(handler)),
                ("finalizer", Slot::Maybe(finalizer)),
            ],
            CatchClause { param, body } => {
                vec![("param", Slot::Maybe(param)), ("body", Slot::One(body))]
            }
            ArrayExpression { elements } => vec![("elements", Slot::Many(elements))],
            ObjectExpression { properties } => vec![("properties", Slot::Many(properties))],
            ObjectProperty { key, value, .. } => {
                vec![("key", Slot::One(key)), ("value", Slot::One(value))]
            }
            FunctionExpression { id, params, body } => vec![
                ("id", Slot::Maybe(id)),
                ("params", Slot::Many(params)),
                ("body", Slot::One(body)),
            ],
            UnaryExpression { argument, .. } => vec![("argument", Slot::One(argument))],
            BinaryExpression { left, right, .. }
            | LogicalExpression { left, right, .. }
            | AssignmentExpression { left, right, .. } => {
                vec![("left", Slot::One(left)), ("right", Slot::One(right))]
            }
            ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![
                ("test", Slot::One(test)),
                ("consequent", Slot::One(consequent)),
                ("alternate", Slot::One(alternate)),
            ],
            CallExpression { callee, arguments } | NewExpression { callee, arguments } => vec![
                ("callee", Slot::One(callee)),
                ("arguments", Slot::Many(arguments)),
            ],
            MemberExpression {
                object, property, ..
            } => vec![("object", Slot::One(object)), ("property", Slot::One(property))],
            EmptyStatement
            | Identifier { .. }
            | NumericLiteral { .. }
            | StringLiteral { .. }
            | BooleanLiteral { .. }
            | NullLiteral
            | ThisExpression
            | Super => Vec::new(),
        }
    }
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    /// Creates a node with no location, no derived data and no markers.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: None,
            extra: Extra::default(),
            from_template: false,
            consumed: false,
        }
    }

    /// Creates a node located at `span`.
    pub fn spanned(kind: NodeKind, span: Span) -> Self {
        Self {
            span: Some(span),
            ..Self::new(kind)
        }
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = extra;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Returns the name if this node is an identifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stencil::ast::builder::{identifier, null_literal};
    /// assert_eq!(identifier("x").identifier_name(), Some("x"));
    /// assert_eq!(null_literal().identifier_name(), None);
    /// ```
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, NodeKind::Identifier { .. })
    }

    pub fn is_expression_statement(&self) -> bool {
        matches!(self.kind, NodeKind::ExpressionStatement { .. })
    }

    pub fn is_statement(&self) -> bool {
        use NodeKind::*;
        matches!(
            self.kind,
            ExpressionStatement { .. }
                | BlockStatement { .. }
                | EmptyStatement
                | VariableDeclaration { .. }
                | FunctionDeclaration { .. }
                | ReturnStatement { .. }
                | ThrowStatement { .. }
                | IfStatement { .. }
                | WhileStatement { .. }
                | TryStatement { .. }
        )
    }

    pub fn is_expression(&self) -> bool {
        use NodeKind::*;
        matches!(
            self.kind,
            Identifier { .. }
                | NumericLiteral { .. }
                | StringLiteral { .. }
                | BooleanLiteral { .. }
                | NullLiteral
                | ThisExpression
                | Super
                | ArrayExpression { .. }
                | ObjectExpression { .. }
                | FunctionExpression { .. }
                | UnaryExpression { .. }
                | BinaryExpression { .. }
                | LogicalExpression { .. }
                | AssignmentExpression { .. }
                | ConditionalExpression { .. }
                | CallExpression { .. }
                | NewExpression { .. }
                | MemberExpression { .. }
        )
    }

    /// The inner expression of an `ExpressionStatement`, otherwise the node
    /// itself.
    pub fn statement_expression(&self) -> &Node {
        match &self.kind {
            NodeKind::ExpressionStatement { expression } => expression,
            _ => self,
        }
    }

    /// Like [`Node::statement_expression`], by value. A consumed statement
    /// hands its marker to the expression.
    pub fn into_statement_expression(self) -> Node {
        match self.kind {
            NodeKind::ExpressionStatement { expression } => {
                let mut expression = *expression;
                expression.consumed |= self.consumed;
                expression
            }
            kind => Node { kind, ..self },
        }
    }

    /// The statement list of a `Program` or `BlockStatement`.
    pub fn body(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => Some(body),
            _ => None,
        }
    }

    /// Consumes a `Program` or `BlockStatement` and returns its statements.
    /// Any other node becomes a one-element list.
    pub fn into_body(self) -> Vec<Node> {
        match self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => body,
            _ => vec![self],
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        use NodeKind::*;
        fn opt(node: &Option<Box<Node>>) -> Option<&Node> {
            node.as_deref()
        }
        match &self.kind {
            Program { body } | BlockStatement { body } => body.iter().collect(),
            ExpressionStatement { expression } => vec![&**expression],
            VariableDeclaration { declarations, .. } => declarations.iter().collect(),
            VariableDeclarator { id, init } => std::iter::once(&**id).chain(opt(init)).collect(),
            FunctionDeclaration { id, params, body } => std::iter::once(&**id)
                .chain(params.iter())
                .chain(std::iter::once(&**body))
                .collect(),
            ReturnStatement { argument } => opt(argument).into_iter().collect(),
            ThrowStatement { argument } | UnaryExpression { argument, .. } => vec![&**argument],
            IfStatement {
                test,
                consequent,
                alternate,
            } => vec![&**test, &**consequent]
                .into_iter()
                .chain(opt(alternate))
                .collect(),
            WhileStatement { test, body } => vec![&**test, &**body],
            TryStatement {
                block,
                handler,
                finalizer,
            } => std::iter::once(&**block)
                .chain(opt(handler))
                .chain(opt(finalizer))
                .collect(),
            CatchClause { param, body } => opt(param)
                .into_iter()
                .chain(std::iter::once(&**body))
                .collect(),
            ArrayExpression { elements } => elements.iter().collect(),
            ObjectExpression { properties } => properties.iter().collect(),
            ObjectProperty { key, value, .. } => vec![&**key, &**value],
            FunctionExpression { id, params, body } => opt(id)
                .into_iter()
                .chain(params.iter())
                .chain(std::iter::once(&**body))
                .collect(),
            BinaryExpression { left, right, .. }
            | LogicalExpression { left, right, .. }
            | AssignmentExpression { left, right, .. } => vec![&**left, &**right],
            ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![&**test, &**consequent, &**alternate],
            CallExpression { callee, arguments } | NewExpression { callee, arguments } => {
                std::iter::once(&**callee).chain(arguments.iter()).collect()
            }
            MemberExpression {
                object, property, ..
            } => vec![&**object, &**property],
            EmptyStatement
            | Identifier { .. }
            | NumericLiteral { .. }
            | StringLiteral { .. }
            | BooleanLiteral { .. }
            | NullLiteral
            | ThisExpression
            | Super => Vec::new(),
        }
    }

    /// This node and all of its descendants, in pre-order.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        let mut index = 0;
        while index < out.len() {
            let children = out[index].children();
            out.splice(index + 1..index + 1, children);
            index += 1;
        }
        out
    }

    // ------------------------------------------------------------------------
    // Template markers
    // ------------------------------------------------------------------------

    /// True if this node was authored in template text.
    pub fn from_template(&self) -> bool {
        self.from_template
    }

    /// True while this node is a freshly spliced substitution value. Cleared
    /// before an instantiation returns.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn mark_from_template(&mut self) {
        self.from_template = true;
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    pub(crate) fn clear_consumed(&mut self) {
        self.consumed = false;
    }

    pub(crate) fn clear_markers(&mut self) {
        self.from_template = false;
        self.consumed = false;
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            span: self.span,
            extra: self.extra.clone(),
            from_template: self.from_template,
            consumed: false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.span == other.span && self.extra == other.extra
    }
}

impl From<NodeKind> for Node {
    fn from(kind: NodeKind) -> Self {
        Node::new(kind)
    }
}

// ============================================================================
// MODULE EXPORTS
// ============================================================================

pub mod builder;
pub mod pretty;
