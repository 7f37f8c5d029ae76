//! Parsing Python source into syntax trees

use crate::common::{first_syntax_error, node_to_text, start_line};
use tree_sitter::{Node, Parser, Tree};

/// A syntax error found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub message: String,
    /// 1-based line of the offending token
    pub line: usize,
}

/// Python source together with its syntax tree
pub struct ParsedSource {
    source: String,
    tree: Tree,
}

impl ParsedSource {
    /// Parse source, rejecting error nodes and Python 2 statements
    pub fn parse(source: String) -> Result<Self, SyntaxIssue> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| SyntaxIssue {
                message: format!("failed to load Python grammar: {e}"),
                line: 1,
            })?;

        let tree = parser.parse(&source, None).ok_or_else(|| SyntaxIssue {
            message: "parser produced no syntax tree".to_string(),
            line: 1,
        })?;

        if let Some(error_node) = first_syntax_error(tree.root_node()) {
            return Err(describe_error(error_node, &source));
        }
        if let Some(statement) = first_legacy_statement(tree.root_node()) {
            return Err(describe_legacy(statement));
        }

        Ok(Self { source, tree })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The `module` node
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Statement forms the grammar accepts but Python 3 rejects
const LEGACY_STATEMENTS: &[(&str, &str)] = &[("print_statement", "print"), ("exec_statement", "exec")];

/// First Python 2 statement in document order
fn first_legacy_statement(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if LEGACY_STATEMENTS.iter().any(|(kind, _)| node.kind() == *kind) {
            return Some(node);
        }
        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return None;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

fn describe_legacy(node: Node) -> SyntaxIssue {
    let keyword = LEGACY_STATEMENTS
        .iter()
        .find(|(kind, _)| node.kind() == *kind)
        .map_or("print", |(_, keyword)| *keyword);

    SyntaxIssue {
        message: format!(
            "Missing parentheses in call to '{keyword}'. Did you mean {keyword}(...)?"
        ),
        line: start_line(node),
    }
}

fn describe_error(node: Node, source: &str) -> SyntaxIssue {
    let message = if node.is_missing() {
        format!("expected '{}'", node.kind())
    } else {
        let text = node_to_text(node, source);
        match text.split_whitespace().next() {
            Some(token) if text.len() <= 40 => format!("invalid syntax near '{token}'"),
            _ => "invalid syntax".to_string(),
        }
    };

    SyntaxIssue {
        message,
        line: start_line(node),
    }
}
