//! Stencil Parser
//!
//! Converts source text into a `Program` node with byte spans on every node.
//! Beyond the grammar, the builder enforces the few semantic rules that depend
//! on parse options: `return` placement, `super` placement, const initializers,
//! try handlers and assignment targets.

use pest::{
    error::{Error, ErrorVariant, InputLocation},
    iterators::Pair,
    Parser,
};
use pest_derive::Parser;

use super::{ParseOptions, SyntaxError};
use crate::ast::{
    AssignmentOperator, BinaryOperator, DeclarationKind, Extra, LogicalOperator, Node, NodeKind,
    Span, UnaryOperator,
};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct StencilGrammar;

type ParseResult<T> = Result<T, SyntaxError>;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses `source` into a `Program` node.
///
/// # Examples
///
/// ```rust
/// use stencil::syntax::{parse, ParseOptions};
/// let program = parse("let x = 1;", &ParseOptions::default()).unwrap();
/// assert_eq!(program.type_name(), "Program");
/// assert_eq!(program.body().map(|b| b.len()), Some(1));
/// ```
pub fn parse(source: &str, options: &ParseOptions) -> Result<Node, SyntaxError> {
    let mut pairs = StencilGrammar::parse(Rule::program, source)
        .map_err(|e| convert_parse_error(e, source, options))?;

    let mut builder = Builder {
        source,
        options,
        function_depth: 0,
    };
    let program = builder.next(&mut pairs, "program", Span::new(0, source.len()))?;
    builder.program(program)
}

// ============================================================================
// NODE BUILDER
// ============================================================================

struct Builder<'s> {
    source: &'s str,
    options: &'s ParseOptions,
    function_depth: usize,
}

impl<'s> Builder<'s> {
    fn program(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let body = self.statements(
            pair.into_inner()
                .filter(|p| p.as_rule() != Rule::EOI),
        )?;
        Ok(Node::spanned(NodeKind::Program { body }, span))
    }

    fn statements<'i>(
        &mut self,
        pairs: impl Iterator<Item = Pair<'i, Rule>>,
    ) -> ParseResult<Vec<Node>> {
        pairs.map(|p| self.statement(p)).collect()
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn statement(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let rule = pair.as_rule();
        let mut inner = significant(pair);

        let kind = match rule {
            Rule::block => NodeKind::BlockStatement {
                body: self.statements(inner)?,
            },

            Rule::empty_statement => NodeKind::EmptyStatement,

            Rule::expression_statement => NodeKind::ExpressionStatement {
                expression: self.boxed_expression(&mut inner, span)?,
            },

            Rule::variable_declaration => {
                let kind_pair = self.next(&mut inner, "declaration kind", span)?;
                let kind = DeclarationKind::from_keyword(kind_pair.as_str()).ok_or_else(|| {
                    self.error(
                        format!("Unknown declaration kind `{}`", kind_pair.as_str()),
                        get_span(&kind_pair),
                    )
                })?;
                let declarations = inner
                    .map(|p| self.declarator(p, kind))
                    .collect::<ParseResult<Vec<_>>>()?;
                NodeKind::VariableDeclaration { kind, declarations }
            }

            Rule::function_declaration => {
                let id = self.next(&mut inner, "function name", span)?;
                let id = Box::new(self.identifier(id));
                let params = self.params(self.next(&mut inner, "parameter list", span)?);
                let body = self.next(&mut inner, "function body", span)?;
                let body = self.function_body(body)?;
                NodeKind::FunctionDeclaration { id, params, body }
            }

            Rule::return_statement => {
                if self.function_depth == 0 && !self.options.allow_return_outside_function {
                    return Err(self.error("'return' outside of function", span));
                }
                let argument = inner
                    .next()
                    .map(|p| self.expression(p).map(Box::new))
                    .transpose()?;
                NodeKind::ReturnStatement { argument }
            }

            Rule::throw_statement => NodeKind::ThrowStatement {
                argument: self.boxed_expression(&mut inner, span)?,
            },

            Rule::if_statement => {
                let test = self.boxed_expression(&mut inner, span)?;
                let consequent = self.next(&mut inner, "statement", span)?;
                let consequent = Box::new(self.statement(consequent)?);
                let alternate = inner
                    .next()
                    .map(|p| self.statement(p).map(Box::new))
                    .transpose()?;
                NodeKind::IfStatement {
                    test,
                    consequent,
                    alternate,
                }
            }

            Rule::while_statement => {
                let test = self.boxed_expression(&mut inner, span)?;
                let body = self.next(&mut inner, "loop body", span)?;
                NodeKind::WhileStatement {
                    test,
                    body: Box::new(self.statement(body)?),
                }
            }

            Rule::try_statement => {
                let block = self.next(&mut inner, "try block", span)?;
                let block = Box::new(self.statement(block)?);
                let mut handler = None;
                let mut finalizer = None;
                for clause in inner {
                    match clause.as_rule() {
                        Rule::catch_clause => handler = Some(Box::new(self.catch_clause(clause)?)),
                        _ => {
                            let body = self.next(&mut significant(clause), "finally block", span)?;
                            finalizer = Some(Box::new(self.statement(body)?));
                        }
                    }
                }
                if handler.is_none() && finalizer.is_none() {
                    return Err(self.error("Missing catch or finally clause", span));
                }
                NodeKind::TryStatement {
                    block,
                    handler,
                    finalizer,
                }
            }

            rule => {
                return Err(self.error(format!("Unsupported statement: {:?}", rule), span));
            }
        };

        Ok(Node::spanned(kind, span))
    }

    fn declarator(&mut self, pair: Pair<'_, Rule>, kind: DeclarationKind) -> ParseResult<Node> {
        let span = get_span(&pair);
        let mut inner = pair.into_inner();
        let id = Box::new(self.identifier(self.next(&mut inner, "binding name", span)?));
        let init = inner
            .next()
            .map(|p| self.expression(p).map(Box::new))
            .transpose()?;
        if kind == DeclarationKind::Const && init.is_none() {
            return Err(self.error("Missing initializer in const declaration", span));
        }
        Ok(Node::spanned(NodeKind::VariableDeclarator { id, init }, span))
    }

    fn catch_clause(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let mut param = None;
        let mut body = None;
        for part in significant(pair) {
            match part.as_rule() {
                Rule::identifier => param = Some(Box::new(self.identifier(part))),
                _ => body = Some(Box::new(self.statement(part)?)),
            }
        }
        let body = body.ok_or_else(|| self.error("Missing catch block", span))?;
        Ok(Node::spanned(NodeKind::CatchClause { param, body }, span))
    }

    fn params(&self, pair: Pair<'_, Rule>) -> Vec<Node> {
        pair.into_inner().map(|p| self.identifier(p)).collect()
    }

    fn function_body(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Box<Node>> {
        self.function_depth += 1;
        let body = self.statement(pair);
        self.function_depth -= 1;
        body.map(Box::new)
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn boxed_expression<'i>(
        &mut self,
        pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
        span: Span,
    ) -> ParseResult<Box<Node>> {
        let pair = self.next(pairs, "expression", span)?;
        self.expression(pair).map(Box::new)
    }

    fn expression(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        match pair.as_rule() {
            Rule::assignment => self.assignment(pair),

            Rule::conditional => {
                let mut inner = pair.into_inner();
                let test = self.boxed_expression(&mut inner, span)?;
                match inner.next() {
                    None => Ok(*test),
                    Some(consequent) => {
                        let consequent = Box::new(self.expression(consequent)?);
                        let alternate = self.boxed_expression(&mut inner, span)?;
                        Ok(Node::spanned(
                            NodeKind::ConditionalExpression {
                                test,
                                consequent,
                                alternate,
                            },
                            span,
                        ))
                    }
                }
            }

            Rule::logical_or
            | Rule::logical_and
            | Rule::equality
            | Rule::relational
            | Rule::additive
            | Rule::multiplicative => self.binary_chain(pair),

            Rule::unary => self.unary(pair),
            Rule::postfix | Rule::new_callee => self.postfix(pair),

            Rule::new_expression => {
                let mut inner = significant(pair);
                let callee = self.boxed_expression(&mut inner, span)?;
                let arguments = match inner.next() {
                    Some(args) => self.arguments(args)?,
                    None => Vec::new(),
                };
                Ok(Node::spanned(
                    NodeKind::NewExpression { callee, arguments },
                    span,
                ))
            }

            Rule::function_expression => {
                let mut id = None;
                let mut params = Vec::new();
                let mut body = None;
                for part in significant(pair) {
                    match part.as_rule() {
                        Rule::identifier => id = Some(Box::new(self.identifier(part))),
                        Rule::params => params = self.params(part),
                        _ => body = Some(self.function_body(part)?),
                    }
                }
                let body = body.ok_or_else(|| self.error("Missing function body", span))?;
                Ok(Node::spanned(
                    NodeKind::FunctionExpression { id, params, body },
                    span,
                ))
            }

            Rule::parenthesized => {
                let mut inner = pair.into_inner();
                let mut node = *self.boxed_expression(&mut inner, span)?;
                node.extra.parenthesized = true;
                Ok(node)
            }

            Rule::array => {
                let elements = pair
                    .into_inner()
                    .map(|p| self.expression(p))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(Node::spanned(NodeKind::ArrayExpression { elements }, span))
            }

            Rule::object => {
                let properties = pair
                    .into_inner()
                    .map(|p| self.property(p))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(Node::spanned(NodeKind::ObjectExpression { properties }, span))
            }

            Rule::number => {
                let text = pair.as_str();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| self.error(format!("Invalid number `{}`", text), span))?;
                Ok(literal(NodeKind::NumericLiteral { value }, text, span))
            }

            Rule::string => {
                let text = pair.as_str();
                let value = self.unescape_string(text, span)?;
                Ok(literal(NodeKind::StringLiteral { value }, text, span))
            }

            Rule::boolean => Ok(Node::spanned(
                NodeKind::BooleanLiteral {
                    value: pair.as_str() == "true",
                },
                span,
            )),

            Rule::null => Ok(Node::spanned(NodeKind::NullLiteral, span)),
            Rule::this => Ok(Node::spanned(NodeKind::ThisExpression, span)),

            Rule::super_keyword => {
                if !self.options.allow_super_outside_method {
                    return Err(self.error(
                        "'super' is only allowed in object methods and classes",
                        span,
                    ));
                }
                Ok(Node::spanned(NodeKind::Super, span))
            }

            Rule::identifier | Rule::property_name => Ok(self.identifier(pair)),

            rule => Err(self.error(format!("Unsupported expression: {:?}", rule), span)),
        }
    }

    fn assignment(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let mut inner = pair.into_inner();
        let left = self.boxed_expression(&mut inner, span)?;
        let Some(operator) = inner.next() else {
            return Ok(*left);
        };

        let is_target = matches!(
            left.kind,
            NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. }
        ) && !left.extra.parenthesized;
        if !is_target {
            return Err(self.error(
                "Invalid left-hand side in assignment expression",
                left.span.unwrap_or(span),
            ));
        }

        let operator = AssignmentOperator::from_token(operator.as_str()).ok_or_else(|| {
            self.error(
                format!("Unknown operator `{}`", operator.as_str()),
                get_span(&operator),
            )
        })?;
        let right = self.boxed_expression(&mut inner, span)?;
        Ok(Node::spanned(
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            },
            span,
        ))
    }

    /// Folds `operand (operator operand)*` to the left.
    fn binary_chain(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let mut inner = pair.into_inner();
        let mut left = *self.boxed_expression(&mut inner, span)?;

        while let Some(operator) = inner.next() {
            let right = *self.boxed_expression(&mut inner, span)?;
            let joined = join(&left, &right, span);
            let token = operator.as_str();
            let kind = if let Some(operator) = LogicalOperator::from_token(token) {
                NodeKind::LogicalExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            } else if let Some(operator) = BinaryOperator::from_token(token) {
                NodeKind::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            } else {
                return Err(self.error(
                    format!("Unknown operator `{}`", token),
                    get_span(&operator),
                ));
            };
            left = Node::spanned(kind, joined);
        }

        Ok(left)
    }

    fn unary(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let mut operators = Vec::new();
        let mut operand = None;
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::unary_operator => operators.push(part),
                _ => operand = Some(self.expression(part)?),
            }
        }
        let mut node = operand.ok_or_else(|| self.error("Missing operand", span))?;

        for operator in operators.into_iter().rev() {
            let start = operator.as_span().start();
            let token = operator.as_str();
            let operator = UnaryOperator::from_token(token).ok_or_else(|| {
                self.error(format!("Unknown operator `{}`", token), get_span(&operator))
            })?;
            let end = node.span.map_or(span.end, |s| s.end);
            node = Node::spanned(
                NodeKind::UnaryExpression {
                    operator,
                    argument: Box::new(node),
                },
                Span::new(start, end),
            );
        }

        Ok(node)
    }

    /// Folds call, member and computed-member suffixes onto a primary.
    fn postfix(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        let mut inner = pair.into_inner();
        let mut node = *self.boxed_expression(&mut inner, span)?;
        let start = node.span.map_or(span.start, |s| s.start);

        for suffix in inner {
            let end = suffix.as_span().end();
            let rule = suffix.as_rule();
            let kind = match rule {
                Rule::call_arguments => NodeKind::CallExpression {
                    callee: Box::new(node),
                    arguments: self.arguments(suffix)?,
                },
                Rule::member_access | Rule::computed_access => {
                    let suffix_span = get_span(&suffix);
                    let property = self.next(&mut suffix.into_inner(), "property", suffix_span)?;
                    NodeKind::MemberExpression {
                        object: Box::new(node),
                        property: Box::new(self.expression(property)?),
                        computed: rule == Rule::computed_access,
                    }
                }
                rule => {
                    return Err(self.error(format!("Unsupported suffix: {:?}", rule), span));
                }
            };
            node = Node::spanned(kind, Span::new(start, end));
        }

        Ok(node)
    }

    fn arguments(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Vec<Node>> {
        pair.into_inner().map(|p| self.expression(p)).collect()
    }

    fn property(&mut self, pair: Pair<'_, Rule>) -> ParseResult<Node> {
        let span = get_span(&pair);
        match pair.as_rule() {
            Rule::shorthand_property => {
                let name = self.next(&mut pair.into_inner(), "property name", span)?;
                let key = self.identifier(name);
                Ok(Node::spanned(
                    NodeKind::ObjectProperty {
                        value: Box::new(key.clone()),
                        key: Box::new(key),
                        computed: false,
                        shorthand: true,
                    },
                    span,
                ))
            }
            _ => {
                let mut inner = pair.into_inner();
                let key = self.next(&mut inner, "property key", span)?;
                let computed = key.as_rule() == Rule::computed_key;
                let key = if computed {
                    let key_span = get_span(&key);
                    self.boxed_expression(&mut key.into_inner(), key_span)?
                } else {
                    Box::new(self.expression(key)?)
                };
                let value = self.boxed_expression(&mut inner, span)?;
                Ok(Node::spanned(
                    NodeKind::ObjectProperty {
                        key,
                        value,
                        computed,
                        shorthand: false,
                    },
                    span,
                ))
            }
        }
    }

    fn identifier(&self, pair: Pair<'_, Rule>) -> Node {
        Node::spanned(
            NodeKind::Identifier {
                name: pair.as_str().to_string(),
            },
            get_span(&pair),
        )
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn next<'i>(
        &self,
        pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
        element: &str,
        span: Span,
    ) -> ParseResult<Pair<'i, Rule>> {
        pairs
            .next()
            .ok_or_else(|| self.error(format!("Missing {}", element), span))
    }

    fn error(&self, message: impl Into<String>, span: Span) -> SyntaxError {
        SyntaxError::new(message, self.options.source_name(), self.source, span)
    }

    fn unescape_string(&self, text: &str, span: Span) -> ParseResult<String> {
        // Remove surrounding quotes
        let inner = &text[1..text.len() - 1];
        let mut result = String::with_capacity(inner.len());
        let mut chars = inner.chars();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                result.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('b') => result.push('\u{8}'),
                Some('f') => result.push('\u{c}'),
                Some('v') => result.push('\u{b}'),
                Some('0') => result.push('\0'),
                Some('x') => result.push(self.code_point(&mut chars, 2, span)?),
                Some('u') => result.push(self.code_point(&mut chars, 4, span)?),
                Some('\n') => {}
                Some(other) => result.push(other),
                None => result.push('\\'),
            }
        }

        Ok(result)
    }

    fn code_point(
        &self,
        chars: &mut std::str::Chars<'_>,
        digits: usize,
        span: Span,
    ) -> ParseResult<char> {
        let hex: String = chars.by_ref().take(digits).collect();
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|_| hex.len() == digits)
            .and_then(char::from_u32)
            .ok_or_else(|| self.error("Bad character escape sequence", span))
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn significant(pair: Pair<'_, Rule>) -> impl Iterator<Item = Pair<'_, Rule>> {
    pair.into_inner().filter(|p| !is_keyword(p.as_rule()))
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_function
            | Rule::kw_return
            | Rule::kw_throw
            | Rule::kw_if
            | Rule::kw_else
            | Rule::kw_while
            | Rule::kw_try
            | Rule::kw_catch
            | Rule::kw_finally
            | Rule::kw_new
    )
}

fn get_span(pair: &Pair<'_, Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}

fn join(left: &Node, right: &Node, fallback: Span) -> Span {
    match (left.span, right.span) {
        (Some(left), Some(right)) => left.to(right),
        _ => fallback,
    }
}

fn literal(kind: NodeKind, raw: &str, span: Span) -> Node {
    Node::spanned(kind, span).with_extra(Extra {
        raw: Some(raw.to_string()),
        parenthesized: false,
    })
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &str, options: &ParseOptions) -> SyntaxError {
    let span = match error.location {
        InputLocation::Pos(pos) => Span::new(pos, pos),
        InputLocation::Span((start, end)) => Span::new(start, end),
    };

    let expected = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            let mut names: Vec<String> = positives.iter().map(describe_rule).collect();
            names.dedup();
            names
        }
        ErrorVariant::CustomError { .. } => Vec::new(),
    };

    let message = if span.start >= source.len() {
        "Unexpected end of input"
    } else {
        "Unexpected token"
    };

    SyntaxError::new(message, options.source_name(), source, span).with_expected(expected)
}

fn describe_rule(rule: &Rule) -> String {
    let name = match rule {
        Rule::EOI => "end of input",
        Rule::identifier | Rule::property_name => "identifier",
        Rule::assignment_operator => "`=`",
        Rule::or_operator | Rule::and_operator => "logical operator",
        Rule::equality_operator | Rule::relational_operator => "comparison",
        Rule::additive_operator | Rule::multiplicative_operator => "arithmetic operator",
        Rule::unary_operator => "unary operator",
        Rule::call_arguments => "`(`",
        Rule::member_access => "`.`",
        Rule::computed_access => "`[`",
        Rule::declarator => "binding name",
        other => return format!("{:?}", other).replace('_', " "),
    };
    name.to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(source: &str) -> ParseResult<Node> {
        parse(source, &ParseOptions::default())
    }

    fn first_statement(source: &str) -> Node {
        parse_default(source).unwrap().into_body().remove(0)
    }

    #[test]
    fn test_empty_input() {
        let program = parse_default("").unwrap();
        assert_eq!(program.body().map(|b| b.len()), Some(0));
        assert_eq!(program.span, Some(Span::new(0, 0)));
    }

    #[test]
    fn test_comments_are_skipped() {
        let program = parse_default("// lead\nfoo(); /* mid */ bar();").unwrap();
        assert_eq!(program.body().map(|b| b.len()), Some(2));
    }

    #[test]
    fn test_binary_is_left_associative() {
        let stmt = first_statement("a - b - c;");
        let NodeKind::ExpressionStatement { expression } = stmt.kind else {
            panic!("expected expression statement");
        };
        let NodeKind::BinaryExpression { left, right, .. } = expression.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(left.type_name(), "BinaryExpression");
        assert_eq!(right.identifier_name(), Some("c"));
    }

    #[test]
    fn test_spans_cover_source() {
        let stmt = first_statement("  foo(bar);");
        assert_eq!(stmt.span, Some(Span::new(2, 11)));
        let NodeKind::ExpressionStatement { expression } = &stmt.kind else {
            panic!("expected expression statement");
        };
        assert_eq!(expression.span, Some(Span::new(2, 10)));
    }

    #[test]
    fn test_literals_keep_raw_text() {
        let stmt = first_statement("x = 'a\\nb';");
        let literal = stmt
            .descendants()
            .into_iter()
            .find(|n| n.type_name() == "StringLiteral")
            .cloned()
            .unwrap();
        assert_eq!(literal.extra.raw.as_deref(), Some("'a\\nb'"));
        assert_eq!(
            literal.kind,
            NodeKind::StringLiteral {
                value: "a\nb".into()
            }
        );
    }

    #[test]
    fn test_keyword_prefixed_identifiers() {
        let stmt = first_statement("index + newValue + thisOne;");
        let names: Vec<_> = stmt
            .descendants()
            .into_iter()
            .filter_map(|n| n.identifier_name())
            .collect();
        assert_eq!(names, ["index", "newValue", "thisOne"]);
    }

    #[test]
    fn test_return_outside_function() {
        let err = parse_default("return 1;").unwrap_err();
        assert_eq!(err.message, "'return' outside of function");
        assert_eq!((err.line, err.column), (1, 1));

        let allowed = ParseOptions {
            allow_return_outside_function: true,
            ..ParseOptions::default()
        };
        assert!(parse("return 1;", &allowed).is_ok());
        assert!(parse_default("function f() { return 1; }").is_ok());
    }

    #[test]
    fn test_super_outside_method() {
        assert!(parse_default("super.run();").is_err());
        let allowed = ParseOptions {
            allow_super_outside_method: true,
            ..ParseOptions::default()
        };
        assert!(parse("super.run();", &allowed).is_ok());
    }

    #[test]
    fn test_const_requires_initializer() {
        let err = parse_default("const x;").unwrap_err();
        assert_eq!(err.message, "Missing initializer in const declaration");
        assert!(parse_default("let x;").is_ok());
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_default("a + b = c;").unwrap_err();
        assert_eq!(err.message, "Invalid left-hand side in assignment expression");
        assert!(parse_default("a.b = c;").is_ok());
    }

    #[test]
    fn test_unexpected_token_position() {
        let err = parse_default("let x = ;").unwrap_err();
        assert_eq!(err.message, "Unexpected token");
        assert_eq!((err.line, err.column), (1, 9));
        assert!(!err.expected.is_empty());
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = parse_default("foo(").unwrap_err();
        assert_eq!(err.message, "Unexpected end of input");
    }

    #[test]
    fn test_source_filename_in_error() {
        let options = ParseOptions {
            source_filename: Some("gen.js".into()),
            ..ParseOptions::default()
        };
        let err = parse("(", &options).unwrap_err();
        assert_eq!(err.source_name(), "gen.js");
    }
}
