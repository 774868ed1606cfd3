//! Placeholder substitution.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Arg, Binding};
use crate::ast::Node;
use crate::traverse::{clear_node, NodePath, Visitor};

static POSITIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$(\d+)$").expect("positional placeholder pattern is valid"));

/// Rewrites template-authored identifiers from the invocation arguments.
pub(super) struct TemplateVisitor;

impl Visitor<[Arg]> for TemplateVisitor {
    fn enter(&mut self, path: &mut NodePath<'_>, args: &mut [Arg]) {
        let node = path.node();
        // Values spliced in by an earlier substitution are opaque.
        if node.is_consumed() || node.statement_expression().is_consumed() {
            path.skip();
            return;
        }

        let target = node.statement_expression();
        if !target.from_template() {
            return;
        }
        let Some(name) = target.identifier_name() else {
            return;
        };

        match resolve(name, args) {
            Resolution::Unresolved => {}
            Resolution::Remove => path.remove(),
            Resolution::Replace(value) => path.replace_with(consumed_copy(value)),
            Resolution::ReplaceMany(values) => {
                path.replace_inline(values.iter().map(consumed_copy).collect::<Vec<_>>())
            }
        }
    }

    fn exit(&mut self, path: &mut NodePath<'_>, _args: &mut [Arg]) {
        if path.node().span.is_none() {
            clear_node(path.node_mut());
        }
    }
}

enum Resolution<'a> {
    Unresolved,
    Remove,
    Replace(&'a Node),
    ReplaceMany(&'a [Node]),
}

fn consumed_copy(value: &Node) -> Node {
    let mut copy = value.clone();
    copy.mark_consumed();
    copy
}

/// Named bindings first, then `$N` against node arguments.
fn resolve<'a>(name: &str, args: &'a [Arg]) -> Resolution<'a> {
    if let Some(bindings) = args.first().and_then(Arg::as_bindings) {
        match bindings.get(name) {
            Some(Binding::Node(value)) => return Resolution::Replace(value),
            Some(Binding::Nodes(values)) => return Resolution::ReplaceMany(values),
            Some(Binding::Null) => return Resolution::Remove,
            None => {}
        }
    }

    match positional_index(name).and_then(|index| args.get(index)) {
        Some(Arg::Node(value)) => Resolution::Replace(value),
        Some(Arg::Nodes(values)) => Resolution::ReplaceMany(values),
        _ => Resolution::Unresolved,
    }
}

fn positional_index(name: &str) -> Option<usize> {
    POSITIONAL.captures(name)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::{identifier, program, string_literal};
    use crate::ast::{Extra, Span};
    use crate::template::Bindings;
    use crate::traverse::traverse;

    #[test]
    fn positional_pattern() {
        assert_eq!(positional_index("$0"), Some(0));
        assert_eq!(positional_index("$12"), Some(12));
        assert_eq!(positional_index("$"), None);
        assert_eq!(positional_index("$a"), None);
        assert_eq!(positional_index("x$1"), None);
        assert_eq!(positional_index("$99999999999999999999999"), None);
    }

    #[test]
    fn named_lookup_wins_over_positional() {
        let args = [
            Arg::Named(Bindings::new().with("$1", identifier("named"))),
            Arg::Node(identifier("positional")),
        ];
        assert!(matches!(
            resolve("$1", &args),
            Resolution::Replace(node) if node.identifier_name() == Some("named")
        ));
    }

    #[test]
    fn mapping_is_never_positional() {
        let args = [Arg::Named(Bindings::new())];
        assert!(matches!(resolve("$0", &args), Resolution::Unresolved));
    }

    #[test]
    fn lists_resolve_by_name_and_position() {
        let list = vec![identifier("a"), identifier("b")];
        let args = [
            Arg::Named(Bindings::new().with_nodes("ARGS", list.clone())),
            Arg::Nodes(list),
        ];
        assert!(matches!(resolve("ARGS", &args), Resolution::ReplaceMany(nodes) if nodes.len() == 2));
        assert!(matches!(resolve("$1", &args), Resolution::ReplaceMany(nodes) if nodes.len() == 2));
    }

    #[test]
    fn positional_null_is_unresolved() {
        let args = [Arg::Null];
        assert!(matches!(resolve("$0", &args), Resolution::Unresolved));
    }

    #[test]
    fn exit_clears_unlocated_nodes_only() {
        let raw = Extra {
            raw: Some("'a'".into()),
            parenthesized: false,
        };
        let mut located = string_literal("a").with_extra(raw.clone());
        located.span = Some(Span::new(0, 3));
        let synthetic = string_literal("b").with_extra(raw);

        let mut root = program(vec![
            crate::ast::builder::expression_statement(located),
            crate::ast::builder::expression_statement(synthetic),
        ]);
        let mut args = [Arg::Null];
        traverse(&mut root, &mut TemplateVisitor, &mut args[..]).unwrap();

        let literals: Vec<_> = root
            .descendants()
            .into_iter()
            .filter(|n| n.type_name() == "StringLiteral")
            .collect();
        assert_eq!(literals[0].extra.raw.as_deref(), Some("'a'"));
        assert_eq!(literals[1].extra.raw, None);
    }
}
