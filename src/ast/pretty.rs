//! Source printer for syntax nodes.
//!
//! Produces compact, two-space indented source. Parentheses are inserted from
//! operator precedence, so trees built or rewritten by hand print correctly
//! even when they never went through the parser.

use std::fmt;

use super::{Node, NodeKind, UnaryOperator};

const INDENT: &str = "  ";

const PREC_ASSIGN: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_UNARY: u8 = 15;
const PREC_POSTFIX: u8 = 18;
const PREC_PRIMARY: u8 = 20;

impl Node {
    /// Pretty-prints the node as source text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stencil::ast::builder::{call, identifier, string_literal};
    /// let node = call(identifier("log"), vec![string_literal("hi")]);
    /// assert_eq!(node.pretty(), "log(\"hi\")");
    /// ```
    pub fn pretty(&self) -> String {
        let mut printer = Printer::default();
        printer.statement(self);
        printer.out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

fn precedence(node: &Node) -> u8 {
    match &node.kind {
        NodeKind::AssignmentExpression { .. } => PREC_ASSIGN,
        NodeKind::ConditionalExpression { .. } => PREC_CONDITIONAL,
        NodeKind::LogicalExpression { operator, .. } => operator.precedence(),
        NodeKind::BinaryExpression { operator, .. } => operator.precedence(),
        NodeKind::UnaryExpression { .. } => PREC_UNARY,
        NodeKind::NumericLiteral { value } if value.is_sign_negative() => PREC_UNARY,
        NodeKind::CallExpression { .. }
        | NodeKind::NewExpression { .. }
        | NodeKind::MemberExpression { .. } => PREC_POSTFIX,
        _ => PREC_PRIMARY,
    }
}

/// An expression statement may not begin with `{` or `function`.
fn needs_statement_parens(expression: &Node) -> bool {
    match &expression.kind {
        NodeKind::ObjectExpression { .. } | NodeKind::FunctionExpression { .. } => true,
        NodeKind::CallExpression { callee, .. } => needs_statement_parens(callee),
        NodeKind::MemberExpression { object, .. } => needs_statement_parens(object),
        NodeKind::BinaryExpression { left, .. }
        | NodeKind::LogicalExpression { left, .. }
        | NodeKind::AssignmentExpression { left, .. } => needs_statement_parens(left),
        NodeKind::ConditionalExpression { test, .. } => needs_statement_parens(test),
        _ => false,
    }
}

/// Keys that may appear unbracketed before the `:` of a property.
fn is_plain_key(key: &Node) -> bool {
    match &key.kind {
        NodeKind::Identifier { .. } | NodeKind::StringLiteral { .. } => true,
        NodeKind::NumericLiteral { value } => !value.is_sign_negative(),
        _ => false,
    }
}

fn is_negative_number(node: &Node) -> bool {
    matches!(&node.kind, NodeKind::NumericLiteral { value } if value.is_sign_negative())
}

fn format_number(value: f64) -> String {
    value.to_string()
}

fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn comma_list(&mut self, nodes: &[Node], min: u8) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expression(node, min);
        }
    }

    fn block(&mut self, body: &[Node]) {
        if body.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.depth += 1;
        for statement in body {
            self.newline();
            self.statement(statement);
        }
        self.depth -= 1;
        self.newline();
        self.push("}");
    }

    fn function(&mut self, id: Option<&Node>, params: &[Node], body: &Node) {
        self.push("function");
        if let Some(id) = id {
            self.push(" ");
            self.expression(id, 0);
        }
        self.push("(");
        self.comma_list(params, 0);
        self.push(") ");
        self.statement(body);
    }

    fn statement(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Program { body } => {
                for (i, statement) in body.iter().enumerate() {
                    if i > 0 {
                        self.newline();
                    }
                    self.statement(statement);
                }
            }
            NodeKind::ExpressionStatement { expression } => {
                if needs_statement_parens(expression) {
                    self.push("(");
                    self.expression(expression, 0);
                    self.push(")");
                } else {
                    self.expression(expression, 0);
                }
                self.push(";");
            }
            NodeKind::BlockStatement { body } => self.block(body),
            NodeKind::EmptyStatement => self.push(";"),
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.push(kind.as_str());
                self.push(" ");
                for (i, declarator) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.statement(declarator);
                }
                self.push(";");
            }
            NodeKind::VariableDeclarator { id, init } => {
                self.expression(id, 0);
                if let Some(init) = init {
                    self.push(" = ");
                    self.expression(init, PREC_ASSIGN);
                }
            }
            NodeKind::FunctionDeclaration { id, params, body } => {
                self.function(Some(&**id), params, body)
            }
            NodeKind::ReturnStatement { argument } => {
                self.push("return");
                if let Some(argument) = argument {
                    self.push(" ");
                    self.expression(argument, 0);
                }
                self.push(";");
            }
            NodeKind::ThrowStatement { argument } => {
                self.push("throw ");
                self.expression(argument, 0);
                self.push(";");
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.push("if (");
                self.expression(test, 0);
                self.push(") ");
                self.statement(consequent);
                if let Some(alternate) = alternate {
                    self.push(" else ");
                    self.statement(alternate);
                }
            }
            NodeKind::WhileStatement { test, body } => {
                self.push("while (");
                self.expression(test, 0);
                self.push(") ");
                self.statement(body);
            }
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.push("try ");
                self.statement(block);
                if let Some(handler) = handler {
                    self.push(" ");
                    self.statement(handler);
                }
                if let Some(finalizer) = finalizer {
                    self.push(" finally ");
                    self.statement(finalizer);
                }
            }
            NodeKind::CatchClause { param, body } => {
                self.push("catch ");
                if let Some(param) = param {
                    self.push("(");
                    self.expression(param, 0);
                    self.push(") ");
                }
                self.statement(body);
            }
            _ => self.expression(node, 0),
        }
    }

    fn expression(&mut self, node: &Node, min: u8) {
        if node.is_statement() {
            return self.statement(node);
        }

        let parens = precedence(node) < min;
        if parens {
            self.push("(");
        }

        match &node.kind {
            NodeKind::Identifier { name } => self.push(name),
            NodeKind::NumericLiteral { value } => match &node.extra.raw {
                Some(raw) => self.push(raw),
                None => self.push(&format_number(*value)),
            },
            NodeKind::StringLiteral { value } => match &node.extra.raw {
                Some(raw) => self.push(raw),
                None => self.push(&quote(value)),
            },
            NodeKind::BooleanLiteral { value } => self.push(if *value { "true" } else { "false" }),
            NodeKind::NullLiteral => self.push("null"),
            NodeKind::ThisExpression => self.push("this"),
            NodeKind::Super => self.push("super"),
            NodeKind::ArrayExpression { elements } => {
                self.push("[");
                self.comma_list(elements, PREC_ASSIGN);
                self.push("]");
            }
            NodeKind::ObjectExpression { properties } => {
                if properties.is_empty() {
                    self.push("{}");
                } else {
                    self.push("{ ");
                    self.comma_list(properties, 0);
                    self.push(" }");
                }
            }
            NodeKind::ObjectProperty {
                key,
                value,
                computed,
                shorthand,
            } => {
                let same_name = key.identifier_name().is_some()
                    && key.identifier_name() == value.identifier_name();
                if *shorthand && same_name {
                    self.expression(value, 0);
                } else {
                    if *computed || !is_plain_key(key) {
                        self.push("[");
                        self.expression(key, PREC_ASSIGN);
                        self.push("]");
                    } else {
                        self.expression(key, 0);
                    }
                    self.push(": ");
                    self.expression(value, PREC_ASSIGN);
                }
            }
            NodeKind::FunctionExpression { id, params, body } => {
                self.function(id.as_deref(), params, body)
            }
            NodeKind::UnaryExpression { operator, argument } => {
                self.push(operator.as_str());
                let sign = |op: &UnaryOperator| matches!(op, UnaryOperator::Minus | UnaryOperator::Plus);
                let stacked_sign = sign(operator)
                    && (is_negative_number(argument)
                        || matches!(&argument.kind, NodeKind::UnaryExpression { operator: inner, .. } if sign(inner)));
                if operator.is_keyword() || stacked_sign {
                    self.push(" ");
                }
                self.expression(argument, PREC_UNARY);
            }
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let prec = operator.precedence();
                self.expression(left, prec);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.expression(right, prec + 1);
            }
            NodeKind::LogicalExpression {
                operator,
                left,
                right,
            } => {
                let prec = operator.precedence();
                self.expression(left, prec);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.expression(right, prec + 1);
            }
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.expression(left, PREC_POSTFIX);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.expression(right, PREC_ASSIGN);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.expression(test, PREC_CONDITIONAL + 1);
                self.push(" ? ");
                self.expression(consequent, PREC_ASSIGN);
                self.push(" : ");
                self.expression(alternate, PREC_ASSIGN);
            }
            NodeKind::CallExpression { callee, arguments } => {
                self.expression(callee, PREC_POSTFIX);
                self.push("(");
                self.comma_list(arguments, PREC_ASSIGN);
                self.push(")");
            }
            NodeKind::NewExpression { callee, arguments } => {
                self.push("new ");
                if matches!(callee.kind, NodeKind::CallExpression { .. }) {
                    self.push("(");
                    self.expression(callee, 0);
                    self.push(")");
                } else {
                    self.expression(callee, PREC_POSTFIX);
                }
                self.push("(");
                self.comma_list(arguments, PREC_ASSIGN);
                self.push(")");
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => {
                // In `1.x` the dot belongs to the number.
                if !*computed && matches!(object.kind, NodeKind::NumericLiteral { .. }) {
                    self.push("(");
                    self.expression(object, 0);
                    self.push(")");
                } else {
                    self.expression(object, PREC_POSTFIX);
                }
                if *computed {
                    self.push("[");
                    self.expression(property, 0);
                    self.push("]");
                } else {
                    self.push(".");
                    self.expression(property, 0);
                }
            }
            _ => self.statement(node),
        }

        if parens {
            self.push(")");
        }
    }
}
