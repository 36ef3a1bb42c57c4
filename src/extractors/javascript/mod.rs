//! JavaScript / TypeScript Extractor
//!
//! Serves JS, JSX, TS and TSX: the TypeScript grammars share the JavaScript node
//! kinds for calls, member access and `new`.
//!
//! Emission policy: only member-access, call and constructor targets become tokens.
//! Free-standing identifier references are never emitted; the object of a member
//! access is (`navigator` in `navigator.share()`), because it names the API surface.
//!
//! Every token carries the span of its enclosing expression. A member expression
//! used as a callee (`a.b()`) or constructor (`new a.B()`) takes the span of the
//! call, so `foo.bar()` yields `bar` and `foo` both spanning `foo.bar()`.

mod fallback;

use crate::extractors::base::{BaseExtractor, ExtractorConfig, Span, Token, TokenKind};
use crate::language::LanguageKind;
use tracing::debug;
use tree_sitter::Node;

use fallback::scan_dotted_chains;

pub struct JavaScriptExtractor<'a> {
    base: BaseExtractor<'a>,
}

/// Node kinds the visitor dispatches on
enum ScriptNode<'t> {
    Call { node: Node<'t>, callee: Node<'t> },
    Member { node: Node<'t>, object: Node<'t>, property: Node<'t> },
    New { node: Node<'t>, constructor: Node<'t> },
    Other,
}

impl<'t> ScriptNode<'t> {
    fn classify(node: Node<'t>) -> Self {
        match node.kind() {
            "call_expression" => match node.child_by_field_name("function") {
                Some(callee) => ScriptNode::Call { node, callee },
                None => ScriptNode::Other,
            },
            "member_expression" => match (
                node.child_by_field_name("object"),
                node.child_by_field_name("property"),
            ) {
                (Some(object), Some(property)) => ScriptNode::Member {
                    node,
                    object,
                    property,
                },
                _ => ScriptNode::Other,
            },
            "new_expression" => match node.child_by_field_name("constructor") {
                Some(constructor) => ScriptNode::New { node, constructor },
                None => ScriptNode::Other,
            },
            _ => ScriptNode::Other,
        }
    }
}

impl<'a> JavaScriptExtractor<'a> {
    pub fn new(language: LanguageKind, content: &'a str, config: ExtractorConfig) -> Self {
        Self {
            base: BaseExtractor::new(language, content, config),
        }
    }

    /// Extract candidate feature tokens; never fails
    pub fn extract_tokens(self) -> Vec<Token> {
        self.extract_tokens_counted().0
    }

    /// Tokens plus the number of AST nodes visited to find them
    pub(crate) fn extract_tokens_counted(mut self) -> (Vec<Token>, usize) {
        let content = self.base.content;
        let Some(tree) = self.base.parse(content) else {
            debug!("{} parse produced no tree, scanning dotted chains", self.base.language);
            return (scan_dotted_chains(content), 0);
        };

        let root = tree.root_node();
        self.base.walk_tree(root, &mut |base, node| visit_node(base, node));

        let has_error = self.base.has_error(&root);
        let visited = self.base.visited_nodes();
        let tokens = self.base.into_tokens();
        if tokens.is_empty() && has_error {
            debug!("Script parse recovered nothing useful, scanning dotted chains");
            return (scan_dotted_chains(content), visited);
        }
        (tokens, visited)
    }
}

fn visit_node(base: &mut BaseExtractor, node: Node) {
    match ScriptNode::classify(node) {
        ScriptNode::Call { node, callee } => visit_call(base, node, callee),
        ScriptNode::Member {
            node,
            object,
            property,
        } => visit_member(base, node, object, property),
        ScriptNode::New { node, constructor } => visit_new(base, node, constructor),
        ScriptNode::Other => {}
    }
}

/// `foo()` emits `foo`; `obj.method()` emits `method`
fn visit_call(base: &mut BaseExtractor, node: Node, callee: Node) {
    let span = Some(Span::from_node(&node));
    match callee.kind() {
        "identifier" => {
            let name = base.get_node_text(&callee);
            base.push_token(name, TokenKind::CallCallee, span);
        }
        "member_expression" => {
            if let Some(property) = callee.child_by_field_name("property") {
                let name = base.get_node_text(&property);
                base.push_token(name, TokenKind::CallCallee, span);
            }
        }
        _ => {}
    }
}

/// `object.property` emits `property` and, for a plain identifier object, `object`
fn visit_member(base: &mut BaseExtractor, node: Node, object: Node, property: Node) {
    let span = Some(enclosing_span(node));

    let name = base.get_node_text(&property);
    base.push_token(name, TokenKind::MemberAccess, span);

    if object.kind() == "identifier" {
        let name = base.get_node_text(&object);
        base.push_token(name, TokenKind::Identifier, span);
    }
}

/// `new Foo()` emits `Foo`; `new ns.Foo()` emits `Foo`
fn visit_new(base: &mut BaseExtractor, node: Node, constructor: Node) {
    let span = Some(Span::from_node(&node));
    let target = match constructor.kind() {
        "identifier" => Some(constructor),
        "member_expression" => constructor.child_by_field_name("property"),
        _ => None,
    };
    if let Some(target) = target {
        let name = base.get_node_text(&target);
        base.push_token(name, TokenKind::CallCallee, span);
    }
}

/// Span of the call / `new` expression a member expression is the target of,
/// otherwise the member expression's own span
fn enclosing_span(node: Node) -> Span {
    if let Some(parent) = node.parent() {
        let field = match parent.kind() {
            "call_expression" => Some("function"),
            "new_expression" => Some("constructor"),
            _ => None,
        };
        if let Some(target) = field.and_then(|f| parent.child_by_field_name(f)) {
            if target.id() == node.id() {
                return Span::from_node(&parent);
            }
        }
    }
    Span::from_node(&node)
}
