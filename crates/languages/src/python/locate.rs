//! Locating function and method definitions in a parsed file

use super::utils::{definition_name, unwrap_decorated};
use carron_core::{AdapterError, ParsedTarget};
use tree_sitter::Node;

/// Find the definition node a file-backed target names
///
/// Scans top-level statements in declaration order; the first match wins.
/// For `Class.method` targets the first class with the right name is
/// searched and a missing method is reported against it, distinct from a
/// missing class.
pub fn find_definition<'t>(
    root: Node<'t>,
    target: &ParsedTarget,
    source: &str,
) -> Result<Node<'t>, AdapterError> {
    let attribute = target.attribute_name();

    for node in root.named_children(&mut root.walk()) {
        let node = unwrap_decorated(node);

        match target.class_name() {
            None => {
                if is_function_named(node, attribute, source) {
                    return Ok(node);
                }
            }
            Some(class_name) => {
                if node.kind() == "class_definition"
                    && definition_name(node, source) == Some(class_name)
                {
                    return find_method(node, class_name, attribute, source);
                }
            }
        }
    }

    Err(match target.class_name() {
        None => AdapterError::target_resolution(format!("Function '{attribute}' not found")),
        Some(class_name) => {
            AdapterError::target_resolution(format!("Class '{class_name}' not found"))
        }
    })
}

fn find_method<'t>(
    class_node: Node<'t>,
    class_name: &str,
    attribute: &str,
    source: &str,
) -> Result<Node<'t>, AdapterError> {
    if let Some(body) = class_node.child_by_field_name("body") {
        for child in body.named_children(&mut body.walk()) {
            let child = unwrap_decorated(child);
            if is_function_named(child, attribute, source) {
                return Ok(child);
            }
        }
    }

    Err(AdapterError::target_resolution(format!(
        "Method '{class_name}.{attribute}' not found"
    )))
}

/// Plain and async functions share the `function_definition` node kind
fn is_function_named(node: Node, name: &str, source: &str) -> bool {
    node.kind() == "function_definition" && definition_name(node, source) == Some(name)
}
