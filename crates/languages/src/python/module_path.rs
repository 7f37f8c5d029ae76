//! Mapping Python module paths to files
//!
//! The inverse of deriving a module path from a file: given a dotted module
//! path and a search root, produce the files that could define it.

use std::path::{Path, PathBuf};

/// Where a module was found under a search root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleLocation {
    /// Regular module or package with source
    Source(PathBuf),
    /// Directory without `__init__.py`
    Namespace(PathBuf),
}

/// Check that a module path is a dotted sequence of identifiers
pub fn is_valid_module_path(module: &str) -> bool {
    !module.is_empty() && module.split('.').all(is_identifier)
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Locate a module under a single search root
///
/// A package (`a/b/__init__.py`) takes precedence over a module file
/// (`a/b.py`) in the same directory. A bare directory is reported as a
/// namespace package.
///
/// # Examples
/// - `utils` -> `<root>/utils/__init__.py` or `<root>/utils.py`
/// - `utils.helpers` -> `<root>/utils/helpers/__init__.py` or `<root>/utils/helpers.py`
pub fn locate_module(root: &Path, module: &str) -> Option<ModuleLocation> {
    let relative: PathBuf = module.split('.').collect();
    let package_dir = root.join(&relative);

    let init = package_dir.join("__init__.py");
    if init.is_file() {
        return Some(ModuleLocation::Source(init));
    }

    let module_file = package_dir.with_extension("py");
    if module_file.is_file() {
        return Some(ModuleLocation::Source(module_file));
    }

    if package_dir.is_dir() {
        return Some(ModuleLocation::Namespace(package_dir));
    }

    None
}
