//! # Node Builders
//!
//! Constructors for building syntax nodes by hand, typically substitution
//! values handed to a template. Built nodes carry no span, no derived data and
//! no template markers.

use super::{
    AssignmentOperator, BinaryOperator, DeclarationKind, LogicalOperator, Node, NodeKind,
    UnaryOperator,
};

fn boxed(node: Node) -> Box<Node> {
    Box::new(node)
}

pub fn program(body: Vec<Node>) -> Node {
    Node::new(NodeKind::Program { body })
}

pub fn identifier(name: impl Into<String>) -> Node {
    Node::new(NodeKind::Identifier { name: name.into() })
}

pub fn numeric_literal(value: f64) -> Node {
    Node::new(NodeKind::NumericLiteral { value })
}

pub fn string_literal(value: impl Into<String>) -> Node {
    Node::new(NodeKind::StringLiteral {
        value: value.into(),
    })
}

pub fn boolean_literal(value: bool) -> Node {
    Node::new(NodeKind::BooleanLiteral { value })
}

pub fn null_literal() -> Node {
    Node::new(NodeKind::NullLiteral)
}

pub fn this_expression() -> Node {
    Node::new(NodeKind::ThisExpression)
}

pub fn array(elements: Vec<Node>) -> Node {
    Node::new(NodeKind::ArrayExpression { elements })
}

pub fn object(properties: Vec<Node>) -> Node {
    Node::new(NodeKind::ObjectExpression { properties })
}

pub fn property(key: Node, value: Node) -> Node {
    Node::new(NodeKind::ObjectProperty {
        key: boxed(key),
        value: boxed(value),
        computed: false,
        shorthand: false,
    })
}

pub fn unary(operator: UnaryOperator, argument: Node) -> Node {
    Node::new(NodeKind::UnaryExpression {
        operator,
        argument: boxed(argument),
    })
}

pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
    Node::new(NodeKind::BinaryExpression {
        operator,
        left: boxed(left),
        right: boxed(right),
    })
}

pub fn logical(operator: LogicalOperator, left: Node, right: Node) -> Node {
    Node::new(NodeKind::LogicalExpression {
        operator,
        left: boxed(left),
        right: boxed(right),
    })
}

pub fn assign(left: Node, right: Node) -> Node {
    Node::new(NodeKind::AssignmentExpression {
        operator: AssignmentOperator::Assign,
        left: boxed(left),
        right: boxed(right),
    })
}

pub fn conditional(test: Node, consequent: Node, alternate: Node) -> Node {
    Node::new(NodeKind::ConditionalExpression {
        test: boxed(test),
        consequent: boxed(consequent),
        alternate: boxed(alternate),
    })
}

pub fn call(callee: Node, arguments: Vec<Node>) -> Node {
    Node::new(NodeKind::CallExpression {
        callee: boxed(callee),
        arguments,
    })
}

pub fn new_expression(callee: Node, arguments: Vec<Node>) -> Node {
    Node::new(NodeKind::NewExpression {
        callee: boxed(callee),
        arguments,
    })
}

/// `object.property`
pub fn member(object: Node, property: impl Into<String>) -> Node {
    Node::new(NodeKind::MemberExpression {
        object: boxed(object),
        property: boxed(identifier(property)),
        computed: false,
    })
}

/// `object[property]`
pub fn computed_member(object: Node, property: Node) -> Node {
    Node::new(NodeKind::MemberExpression {
        object: boxed(object),
        property: boxed(property),
        computed: true,
    })
}

pub fn function_expression(id: Option<Node>, params: Vec<Node>, body: Vec<Node>) -> Node {
    Node::new(NodeKind::FunctionExpression {
        id: id.map(boxed),
        params,
        body: boxed(block(body)),
    })
}

pub fn expression_statement(expression: Node) -> Node {
    Node::new(NodeKind::ExpressionStatement {
        expression: boxed(expression),
    })
}

pub fn block(body: Vec<Node>) -> Node {
    Node::new(NodeKind::BlockStatement { body })
}

pub fn empty_statement() -> Node {
    Node::new(NodeKind::EmptyStatement)
}

pub fn variable_declaration(kind: DeclarationKind, declarations: Vec<Node>) -> Node {
    Node::new(NodeKind::VariableDeclaration { kind, declarations })
}

pub fn declarator(id: Node, init: Option<Node>) -> Node {
    Node::new(NodeKind::VariableDeclarator {
        id: boxed(id),
        init: init.map(boxed),
    })
}

pub fn return_statement(argument: Option<Node>) -> Node {
    Node::new(NodeKind::ReturnStatement {
        argument: argument.map(boxed),
    })
}

pub fn throw_statement(argument: Node) -> Node {
    Node::new(NodeKind::ThrowStatement {
        argument: boxed(argument),
    })
}

pub fn if_statement(test: Node, consequent: Node, alternate: Option<Node>) -> Node {
    Node::new(NodeKind::IfStatement {
        test: boxed(test),
        consequent: boxed(consequent),
        alternate: alternate.map(boxed),
    })
}

pub fn while_statement(test: Node, body: Node) -> Node {
    Node::new(NodeKind::WhileStatement {
        test: boxed(test),
        body: boxed(body),
    })
}
