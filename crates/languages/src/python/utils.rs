//! Python-specific helpers for reading definitions out of syntax trees

use crate::common::{end_line, field_text, node_to_text, start_line};
use crate::definition::{Definition, Parameter, ParameterKind};
use tree_sitter::Node;

/// Extract parameters from a Python `parameters` node
///
/// Handles:
/// - Simple identifiers (self, name)
/// - Typed parameters (name: Type)
/// - Default parameters (name=value)
/// - Typed default parameters (name: Type = value)
/// - Variadic (*args, **kwargs), optionally typed
/// - Positional-only separator (/)
/// - Keyword-only marker (*)
pub fn extract_python_parameters(params_node: Node, source: &str) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = Vec::new();
    let mut keyword_only = false;

    let plain_kind = |keyword_only: bool| {
        if keyword_only {
            ParameterKind::KeywordOnly
        } else {
            ParameterKind::PositionalOrKeyword
        }
    };

    for child in params_node.named_children(&mut params_node.walk()) {
        match child.kind() {
            "identifier" => {
                parameters.push(Parameter::new(
                    node_to_text(child, source),
                    plain_kind(keyword_only),
                ));
            }
            "typed_parameter" => {
                // First named child is the identifier or splat pattern,
                // the annotation is the "type" field
                let Some(inner) = child.named_child(0) else {
                    continue;
                };
                let mut param = match inner.kind() {
                    "identifier" => {
                        Parameter::new(node_to_text(inner, source), plain_kind(keyword_only))
                    }
                    "list_splat_pattern" => {
                        keyword_only = true;
                        Parameter::new(splat_name(inner, source), ParameterKind::VarPositional)
                    }
                    "dictionary_splat_pattern" => {
                        Parameter::new(splat_name(inner, source), ParameterKind::VarKeyword)
                    }
                    _ => continue,
                };
                param.annotation = field_text(child, "type", source).map(str::to_string);
                parameters.push(param);
            }
            "default_parameter" | "typed_default_parameter" => {
                let Some(name) = child
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                else {
                    continue;
                };
                let mut param = Parameter::new(node_to_text(name, source), plain_kind(keyword_only));
                param.annotation = field_text(child, "type", source).map(str::to_string);
                param.default = field_text(child, "value", source).map(str::to_string);
                parameters.push(param);
            }
            "list_splat_pattern" => {
                keyword_only = true;
                parameters.push(Parameter::new(
                    splat_name(child, source),
                    ParameterKind::VarPositional,
                ));
            }
            "dictionary_splat_pattern" => {
                parameters.push(Parameter::new(
                    splat_name(child, source),
                    ParameterKind::VarKeyword,
                ));
            }
            // def f(a, /, b): everything declared so far is positional-only
            "positional_separator" => {
                for param in parameters
                    .iter_mut()
                    .filter(|p| p.kind == ParameterKind::PositionalOrKeyword)
                {
                    param.kind = ParameterKind::PositionalOnly;
                }
            }
            // def f(*, a, b): a bare * starts keyword-only parameters
            "keyword_separator" => keyword_only = true,
            _ => {}
        }
    }

    parameters
}

fn splat_name(node: Node, source: &str) -> String {
    node.named_child(0)
        .map(|n| node_to_text(n, source).to_string())
        .unwrap_or_else(|| node_to_text(node, source).trim_start_matches('*').to_string())
}

/// Extract the docstring from a function or class body
///
/// Python docstrings are the first statement of the body when it is a
/// plain string literal.
pub fn extract_docstring(node: Node, source: &str) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let first_stmt = body.named_child(0)?;

    if first_stmt.kind() != "expression_statement" {
        return None;
    }

    let expr = first_stmt.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }

    let mut content = String::new();
    let mut saw_content = false;
    for part in expr.named_children(&mut expr.walk()) {
        match part.kind() {
            "string_content" => {
                saw_content = true;
                content.push_str(node_to_text(part, source));
            }
            // f-strings are not docstrings
            "interpolation" => return None,
            _ => {}
        }
    }

    if saw_content {
        Some(content)
    } else {
        Some(normalize_docstring(node_to_text(expr, source)))
    }
}

/// Normalize a docstring by stripping quotes and whitespace
fn normalize_docstring(text: &str) -> String {
    text.trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .trim_start_matches("\"\"\"")
        .trim_start_matches("'''")
        .trim_start_matches('"')
        .trim_start_matches('\'')
        .trim_end_matches("\"\"\"")
        .trim_end_matches("'''")
        .trim_end_matches('"')
        .trim_end_matches('\'')
        .trim()
        .to_string()
}

/// Extract decorators from a function or class definition
///
/// Python decorators appear on the parent `decorated_definition` node.
pub fn extract_decorators(node: Node, source: &str) -> Vec<String> {
    let mut decorators = Vec::new();

    if let Some(parent) = node.parent() {
        if parent.kind() == "decorated_definition" {
            for child in parent.named_children(&mut parent.walk()) {
                if child.kind() == "decorator" {
                    let text = node_to_text(child, source);
                    decorators.push(text.trim_start_matches('@').trim().to_string());
                }
            }
        }
    }

    decorators
}

/// Check if a function node is async
pub fn is_async_function(node: Node) -> bool {
    for child in node.children(&mut node.walk()) {
        if child.kind() == "async" {
            return true;
        }
        // Stop after reaching the function keyword
        if child.kind() == "def" {
            break;
        }
    }
    false
}

/// Unwrap a `decorated_definition` to the function or class it decorates
pub fn unwrap_decorated(node: Node) -> Node {
    if node.kind() == "decorated_definition" {
        if let Some(definition) = node.child_by_field_name("definition") {
            return definition;
        }
    }
    node
}

/// Name of a function or class definition node
pub fn definition_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    field_text(node, "name", source)
}

/// Copy a `function_definition` node into an owned [`Definition`]
pub fn build_definition(function_node: Node, class_name: Option<&str>, source: &str) -> Definition {
    let outer = function_node
        .parent()
        .filter(|p| p.kind() == "decorated_definition")
        .unwrap_or(function_node);

    let parameters = function_node
        .child_by_field_name("parameters")
        .map(|params| extract_python_parameters(params, source))
        .unwrap_or_default();

    Definition {
        name: definition_name(function_node, source)
            .unwrap_or_default()
            .to_string(),
        class_name: class_name.map(str::to_string),
        is_async: is_async_function(function_node),
        decorators: extract_decorators(function_node, source),
        start_line: start_line(function_node),
        end_line: end_line(function_node),
        parameters,
        return_type: field_text(function_node, "return_type", source).map(str::to_string),
        docstring: extract_docstring(function_node, source),
        source_text: node_to_text(outer, source).to_string(),
    }
}
