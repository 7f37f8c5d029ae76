//! Language-agnostic tree-sitter helpers

use tree_sitter::Node;

/// Source text covered by a node
pub fn node_to_text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Text of a node's field, if present
pub fn field_text<'s>(node: Node, field: &str, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name(field)
        .map(|child| node_to_text(child, source))
}

/// First error or missing node in document order
pub fn first_syntax_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_syntax_error)
}

/// 1-based line number a node starts on
pub fn start_line(node: Node) -> usize {
    node.start_position().row + 1
}

/// 1-based line number a node ends on
pub fn end_line(node: Node) -> usize {
    node.end_position().row + 1
}
