//! Test suite for the Python adapter internals

mod locate_tests;

use super::parsing::ParsedSource;
use crate::definition::Definition;
use tree_sitter::Node;

/// Parse source that is expected to be valid
pub fn parse(source: &str) -> ParsedSource {
    ParsedSource::parse(source.to_string()).expect("test source should parse")
}

/// First function definition in document order, searching nested blocks
pub fn first_function(node: Node) -> Option<Node> {
    if node.kind() == "function_definition" {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_function)
}

/// Build the definition of the first function in `source`
pub fn definition_of_first_function(source: &str) -> Definition {
    let parsed = parse(source);
    let node = first_function(parsed.root()).expect("source should contain a function");
    super::utils::build_definition(node, None, parsed.source())
}
