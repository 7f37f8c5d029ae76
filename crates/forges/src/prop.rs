//! Property-test forge for function-level targets

use crate::context::GenerationContext;
use crate::render::{header_comment, python_string};
use crate::{Forge, ForgeDescriptor, ForgeKind};
use carron_core::{generated_test_filename, GeneratedArtifact, GenerationResult, SourceKind};
use carron_languages::ResolvedPayload;
use std::fmt::Write;
use tracing::debug;

inventory::submit! {
    ForgeDescriptor {
        kind: ForgeKind::Prop,
        factory: create_prop_forge,
    }
}

fn create_prop_forge() -> Box<dyn Forge> {
    Box::new(PropForge)
}

/// Emits a test file that loads the target, checks it is callable and
/// holds a placeholder property test
#[derive(Debug, Default, Clone, Copy)]
pub struct PropForge;

impl Forge for PropForge {
    fn kind(&self) -> ForgeKind {
        ForgeKind::Prop
    }

    fn generate(&self, context: &GenerationContext) -> GenerationResult {
        let filename = generated_test_filename(context.target.as_str());
        let mut content = header_comment(self.kind().as_ref(), context);
        let mut diagnostics = Vec::new();

        match context.validated.as_ref() {
            Some(validated) => {
                let target = validated.target();
                let loader = match (target.source_kind(), validated.payload()) {
                    (SourceKind::File, ResolvedPayload::Syntax(source)) => {
                        file_loader(&source.path.display().to_string())
                    }
                    _ => module_loader(target.locator()),
                };
                content.push('\n');
                content.push_str(&loader);
                content.push_str(&target_getter(target.class_name(), target.attribute_name()));
                content.push_str(CALLABLE_TEST);
            }
            None => {
                debug!("No validated payload for {}; skipping loader", context.target);
                diagnostics.push(format!(
                    "Target {} was not validated; emitted placeholder test only",
                    context.target
                ));
            }
        }

        content.push_str(PROPERTY_PLACEHOLDER);

        GenerationResult {
            artifacts: vec![GeneratedArtifact::new(filename, content)],
            diagnostics,
        }
    }
}

const CALLABLE_TEST: &str = "

def test_target_is_callable():
    assert callable(_load_target())
";

const PROPERTY_PLACEHOLDER: &str = "

def test_placeholder_property():
    assert True
";

fn file_loader(path: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "import importlib.util");
    let _ = writeln!(out);
    let _ = writeln!(out, "_TARGET_PATH = {}", python_string(path));
    let _ = writeln!(out);
    let _ = writeln!(out);
    let _ = writeln!(out, "def _load_module():");
    let _ = writeln!(
        out,
        "    spec = importlib.util.spec_from_file_location(\"_carron_target\", _TARGET_PATH)"
    );
    let _ = writeln!(out, "    module = importlib.util.module_from_spec(spec)");
    let _ = writeln!(out, "    spec.loader.exec_module(module)");
    let _ = writeln!(out, "    return module");
    out
}

fn module_loader(module: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "import importlib");
    let _ = writeln!(out);
    let _ = writeln!(out);
    let _ = writeln!(out, "def _load_module():");
    let _ = writeln!(out, "    return importlib.import_module({})", python_string(module));
    out
}

fn target_getter(class_name: Option<&str>, attribute: &str) -> String {
    let lookup = match class_name {
        Some(class_name) => format!(
            "getattr(getattr(_load_module(), {}), {})",
            python_string(class_name),
            python_string(attribute)
        ),
        None => format!("getattr(_load_module(), {})", python_string(attribute)),
    };

    format!("\n\ndef _load_target():\n    return {lookup}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unvalidated_target_gets_placeholder_only() {
        let result = PropForge.generate(&GenerationContext::new("m.py:f"));

        assert_eq!(result.artifacts.len(), 1);
        let artifact = &result.artifacts[0];
        assert_eq!(artifact.relative_path, "test_m_py_f.py");
        assert!(artifact.content.contains("def test_placeholder_property():"));
        assert!(!artifact.content.contains("_load_target"));
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_method_getter() {
        assert_eq!(
            target_getter(Some("Greeter"), "greet"),
            "\n\ndef _load_target():\n    return getattr(getattr(_load_module(), \"Greeter\"), \"greet\")\n"
        );
    }

    #[test]
    fn test_module_loader_imports_by_name() {
        let loader = module_loader("pkg.shapes");
        assert!(loader.contains("importlib.import_module(\"pkg.shapes\")"));
    }
}
