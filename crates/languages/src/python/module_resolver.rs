//! Static module resolution for import-backed targets
//!
//! Modules are found on a list of search roots the way the import system's
//! path finder would find them, then parsed rather than executed. Module
//! attributes are the names bound at the module's top level.

use super::module_path::{is_valid_module_path, locate_module, ModuleLocation};
use super::parsing::ParsedSource;
use super::utils::{build_definition, definition_name, extract_docstring, unwrap_decorated};
use crate::common::node_to_text;
use crate::definition::first_doc_line;
use crate::summary::TargetKind;
use crate::symbol::{
    DescribeError, ResolveFailure, Symbol, SymbolDescription, SymbolKind, SymbolResolver,
};
use carron_core::PythonConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::Node;

/// Environment variable holding extra search roots
pub const PYTHONPATH_ENV: &str = "PYTHONPATH";

/// Resolves module targets by locating and parsing module source
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    search_paths: Vec<PathBuf>,
}

/// What a name is bound to at module or class scope
#[derive(Clone, Copy)]
enum Binding<'t> {
    Function(Node<'t>),
    Class(Node<'t>),
    Value,
}

impl ModuleResolver {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Build a resolver from configuration, appending `PYTHONPATH` if enabled
    pub fn from_config(config: &PythonConfig) -> Self {
        let mut search_paths: Vec<PathBuf> =
            config.search_paths.iter().map(PathBuf::from).collect();

        if config.use_pythonpath {
            if let Some(value) = std::env::var_os(PYTHONPATH_ENV) {
                search_paths.extend(
                    std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()),
                );
            }
        }

        Self::new(search_paths)
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the module on the search roots
    ///
    /// A regular module in any root wins over a namespace directory.
    fn find_module(&self, module: &str) -> Result<ModuleLocation, ResolveFailure> {
        if !is_valid_module_path(module) {
            return Err(ResolveFailure::Import(format!(
                "ValueError: invalid module name '{module}'"
            )));
        }

        let mut namespace = None;
        for root in &self.search_paths {
            match locate_module(root, module) {
                Some(found @ ModuleLocation::Source(_)) => return Ok(found),
                Some(found @ ModuleLocation::Namespace(_)) => {
                    namespace.get_or_insert(found);
                }
                None => {}
            }
        }

        namespace.ok_or_else(|| {
            ResolveFailure::Import(format!(
                "ModuleNotFoundError: No module named '{module}'"
            ))
        })
    }

    fn load_module(path: &Path) -> Result<ParsedSource, ResolveFailure> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => ResolveFailure::Import(format!(
                "SyntaxError: (unicode error) source is not valid UTF-8 ({file_name})"
            )),
            _ => ResolveFailure::Import(format!("OSError: {e}: '{}'", path.display())),
        })?;

        ParsedSource::parse(source).map_err(|issue| {
            ResolveFailure::Import(format!(
                "SyntaxError: {} ({file_name}, line {})",
                issue.message, issue.line
            ))
        })
    }
}

impl SymbolResolver for ModuleResolver {
    fn resolve_symbol(
        &self,
        module: &str,
        class_name: Option<&str>,
        attribute: &str,
    ) -> Result<Symbol, ResolveFailure> {
        let origin = match self.find_module(module)? {
            ModuleLocation::Source(path) => path,
            ModuleLocation::Namespace(dir) => {
                debug!("Module '{module}' is a namespace package at {}", dir.display());
                let missing = class_name.unwrap_or(attribute);
                return Err(ResolveFailure::Attribute(format!(
                    "AttributeError: module '{module}' has no attribute '{missing}'"
                )));
            }
        };

        debug!("Resolved module '{module}' to {}", origin.display());
        let parsed = Self::load_module(&origin)?;
        let source = parsed.source();
        let root = parsed.root();

        let Some(class_name) = class_name else {
            let binding = last_binding(root, attribute, source).ok_or_else(|| {
                ResolveFailure::Attribute(format!(
                    "AttributeError: module '{module}' has no attribute '{attribute}'"
                ))
            })?;
            return Ok(symbol_for(module, &origin, attribute, None, binding, source));
        };

        let class_node = match last_binding(root, class_name, source) {
            Some(Binding::Class(node)) => node,
            Some(_) => {
                return Err(ResolveFailure::Attribute(format!(
                    "AttributeError: '{module}.{class_name}' is not a class definition"
                )))
            }
            None => {
                return Err(ResolveFailure::Attribute(format!(
                    "AttributeError: module '{module}' has no attribute '{class_name}'"
                )))
            }
        };

        let binding = class_attribute(root, class_node, attribute, source, &mut Vec::new())
            .ok_or_else(|| {
                ResolveFailure::Attribute(format!(
                    "AttributeError: type object '{class_name}' has no attribute '{attribute}'"
                ))
            })?;

        let qualified_name = format!("{class_name}.{attribute}");
        Ok(symbol_for(
            module,
            &origin,
            &qualified_name,
            Some(class_name),
            binding,
            source,
        ))
    }

    fn describe_symbol(&self, symbol: &Symbol) -> Result<SymbolDescription, DescribeError> {
        let doc = first_doc_line(symbol.docstring());

        match symbol.kind() {
            SymbolKind::Function | SymbolKind::Method => {
                let definition = symbol
                    .definition()
                    .ok_or_else(|| DescribeError::NoSignature(symbol.qualified_name().to_string()))?;
                let kind = if symbol.kind() == SymbolKind::Method {
                    TargetKind::Method
                } else {
                    TargetKind::Function
                };
                Ok(SymbolDescription {
                    kind,
                    signature: Some(definition.full_signature()),
                    doc,
                })
            }
            SymbolKind::Class => {
                // Constructor signature without the instance parameter
                let signature = symbol
                    .definition()
                    .map(|init| init.bound_signature())
                    .unwrap_or_else(|| "()".to_string());
                Ok(SymbolDescription {
                    kind: TargetKind::Unknown,
                    signature: Some(signature),
                    doc,
                })
            }
            SymbolKind::Value => Err(DescribeError::NotCallable(
                symbol.qualified_name().to_string(),
            )),
        }
    }
}

fn symbol_for(
    module: &str,
    origin: &Path,
    qualified_name: &str,
    class_name: Option<&str>,
    binding: Binding,
    source: &str,
) -> Symbol {
    match binding {
        Binding::Function(node) => {
            let definition = build_definition(node, class_name, source);
            let kind = if class_name.is_some() {
                SymbolKind::Method
            } else {
                SymbolKind::Function
            };
            let docstring = definition.docstring.clone();
            Symbol::new(module, origin, qualified_name, kind)
                .with_docstring(docstring)
                .with_definition(definition)
        }
        Binding::Class(node) => {
            let name = definition_name(node, source).unwrap_or(qualified_name);
            let init = node.child_by_field_name("body").and_then(|body| {
                match last_binding(body, "__init__", source) {
                    Some(Binding::Function(init)) => Some(build_definition(init, Some(name), source)),
                    _ => None,
                }
            });
            let symbol = Symbol::new(module, origin, qualified_name, SymbolKind::Class)
                .with_docstring(extract_docstring(node, source));
            match init {
                Some(init) => symbol.with_definition(init),
                None => symbol,
            }
        }
        Binding::Value => Symbol::new(module, origin, qualified_name, SymbolKind::Value),
    }
}

/// Look up an attribute on a class, then on its bases in the same module
///
/// Bases are searched depth-first, left to right. Bases that are not
/// classes defined in `module_root` are skipped.
fn class_attribute<'t>(
    module_root: Node<'t>,
    class_node: Node<'t>,
    attribute: &str,
    source: &str,
    visited: &mut Vec<usize>,
) -> Option<Binding<'t>> {
    if visited.contains(&class_node.id()) {
        return None;
    }
    visited.push(class_node.id());

    let own = class_node
        .child_by_field_name("body")
        .and_then(|body| last_binding(body, attribute, source));
    if own.is_some() {
        return own;
    }

    let bases = class_node.child_by_field_name("superclasses")?;
    let mut cursor = bases.walk();
    let base_names: Vec<&str> = bases
        .named_children(&mut cursor)
        .filter(|base| base.kind() == "identifier")
        .map(|base| node_to_text(base, source))
        .collect();

    base_names.into_iter().find_map(|base| {
        match last_binding(module_root, base, source) {
            Some(Binding::Class(base_node)) => {
                debug!("Looking up '{attribute}' on base class '{base}'");
                class_attribute(module_root, base_node, attribute, source, visited)
            }
            _ => None,
        }
    })
}

/// Blocks nested in a compound statement that execute at the enclosing scope
///
/// Covers `if`/`elif`/`else`, `try`/`except`/`else`/`finally` and `with`.
fn scope_blocks(statement: Node) -> Vec<Node> {
    let mut blocks = Vec::new();
    for child in statement.named_children(&mut statement.walk()) {
        match child.kind() {
            "block" => blocks.push(child),
            "elif_clause" | "else_clause" | "except_clause" | "except_group_clause"
            | "finally_clause" => blocks.extend(
                child
                    .named_children(&mut child.walk())
                    .filter(|inner| inner.kind() == "block"),
            ),
            _ => {}
        }
    }
    blocks
}

/// The last binding of `name` in a block, including bindings made inside
/// conditional, `try` and `with` statements at the same scope
fn last_binding<'t>(block: Node<'t>, name: &str, source: &str) -> Option<Binding<'t>> {
    let mut found = None;

    for statement in block.named_children(&mut block.walk()) {
        let statement = unwrap_decorated(statement);
        match statement.kind() {
            "if_statement" | "try_statement" | "with_statement" => {
                for nested in scope_blocks(statement) {
                    if let Some(binding) = last_binding(nested, name, source) {
                        found = Some(binding);
                    }
                }
            }
            "function_definition" if definition_name(statement, source) == Some(name) => {
                found = Some(Binding::Function(statement));
            }
            "class_definition" if definition_name(statement, source) == Some(name) => {
                found = Some(Binding::Class(statement));
            }
            "expression_statement" => {
                let binds = statement
                    .named_children(&mut statement.walk())
                    .filter(|expr| expr.kind() == "assignment")
                    .any(|assignment| assignment_binds(assignment, name, source));
                if binds {
                    found = Some(Binding::Value);
                }
            }
            "import_statement" | "import_from_statement" => {
                if import_binds(statement, name, source) {
                    found = Some(Binding::Value);
                }
            }
            _ => {}
        }
    }

    found
}

/// Whether an assignment binds `name`, following chained assignments
///
/// Bare annotations (`x: int`) bind nothing.
fn assignment_binds(assignment: Node, name: &str, source: &str) -> bool {
    let Some(right) = assignment.child_by_field_name("right") else {
        return false;
    };

    let left_binds = assignment
        .child_by_field_name("left")
        .is_some_and(|left| target_binds(left, name, source));

    left_binds || (right.kind() == "assignment" && assignment_binds(right, name, source))
}

fn target_binds(target: Node, name: &str, source: &str) -> bool {
    match target.kind() {
        "identifier" => node_to_text(target, source) == name,
        "pattern_list" | "tuple_pattern" | "list_pattern" => target
            .named_children(&mut target.walk())
            .any(|child| target_binds(child, name, source)),
        _ => false,
    }
}

/// Whether an `import` or `from ... import` statement binds `name`
fn import_binds(statement: Node, name: &str, source: &str) -> bool {
    let is_from = statement.kind() == "import_from_statement";
    let mut cursor = statement.walk();

    let names: Vec<Node> = statement
        .children_by_field_name("name", &mut cursor)
        .collect();

    names.into_iter().any(|imported| match imported.kind() {
        "aliased_import" => field_is(imported, "alias", name, source),
        // `import a.b` binds `a`; `from m import a` binds `a`
        "dotted_name" => {
            let text = node_to_text(imported, source);
            let bound = if is_from {
                text.rsplit('.').next()
            } else {
                text.split('.').next()
            };
            bound.map(str::trim) == Some(name)
        }
        _ => false,
    })
}

fn field_is(node: Node, field: &str, expected: &str, source: &str) -> bool {
    node.child_by_field_name(field)
        .is_some_and(|child| node_to_text(child, source) == expected)
}
