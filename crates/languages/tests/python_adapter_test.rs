//! Integration tests for the Python adapter

use carron_core::{AdapterError, ParsedTarget, TargetRef};
use carron_languages::{
    Adapter, DescribeError, ModuleResolver, PythonAdapter, ResolveFailure, ResolvedPayload,
    Symbol, SymbolDescription, SymbolKind, SymbolResolver, TargetKind,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE: &str = r#"
def ok(a, b=2, *rest, flag, **options):
    """Return something fine.

    Details follow.
    """
    return a

async def fetch(url):
    return url

@property
def decorated(self):
    pass

class Greeter:
    def greet(self, name):
        """Say hello."""
        return name
"#;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("sample.py"), SAMPLE).unwrap();
        fs::write(dir.path().join("broken.py"), "def broken(:\n    pass\n").unwrap();
        fs::write(dir.path().join("legacy.py"), "def ok():\n    print \"hi\"\n    return 1\n").unwrap();
        fs::write(dir.path().join("latin1.py"), b"def ok():\n    return '\xe9'\n").unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/__init__.py"), "").unwrap();
        fs::write(
            dir.path().join("pkg/shapes.py"),
            "class Square:\n    def area(self, side: float) -> float:\n        \"\"\"Area.\"\"\"\n        return side * side\n\nclass Cube(Square):\n    pass\n\nLIMIT = 3\n",
        )
        .unwrap();
        Self { dir }
    }

    fn file(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn adapter(&self) -> PythonAdapter {
        PythonAdapter::with_resolver(Box::new(ModuleResolver::new(vec![self
            .dir
            .path()
            .to_path_buf()])))
    }
}

fn parse(adapter: &PythonAdapter, raw: &str) -> ParsedTarget {
    adapter.parse(&TargetRef::from(raw)).expect("target should parse")
}

#[test]
fn test_syntax_error_fails_both_operations() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, &format!("{}:broken", project.file("broken.py")));

    let err = adapter.validate(&target).unwrap_err();
    assert!(err.is_invalid_source(), "unexpected error: {err}");
    let AdapterError::InvalidSource { path, line, .. } = &err else {
        panic!("expected invalid source error");
    };
    assert_eq!(path, &project.file("broken.py"));
    assert_eq!(*line, 1);

    let err = adapter.summarize(&target).unwrap_err();
    assert!(err.is_invalid_source());
}

#[test]
fn test_python2_statement_fails_file_and_module_validation() {
    let project = Project::new();
    let adapter = project.adapter();

    let target = parse(&adapter, &format!("{}:ok", project.file("legacy.py")));
    let err = adapter.validate(&target).unwrap_err();
    let AdapterError::InvalidSource { line, .. } = &err else {
        panic!("expected invalid source error, got {err}");
    };
    assert_eq!(*line, 2);
    assert!(adapter.summarize(&target).unwrap_err().is_invalid_source());

    let target = parse(&adapter, "legacy:ok");
    let err = adapter.validate(&target).unwrap_err();
    assert!(err.is_resolution_error());
    assert!(
        err.to_string()
            .starts_with("Failed to import module 'legacy': SyntaxError: "),
        "{err}"
    );

    let summary = adapter.summarize(&target).unwrap();
    assert!(!summary.found);
    assert!(!summary.importable);
}

#[test]
fn test_undecodable_file_is_invalid_source() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, &format!("{}:ok", project.file("latin1.py")));

    let err = adapter.validate(&target).unwrap_err();
    let AdapterError::InvalidSource { line, .. } = &err else {
        panic!("expected invalid source error, got {err}");
    };
    assert_eq!(*line, 2);
    assert!(adapter.summarize(&target).unwrap_err().is_invalid_source());
}

#[test]
fn test_missing_file_fails_both_operations() {
    let project = Project::new();
    let adapter = project.adapter();
    let missing = project.file("missing.py");
    let target = parse(&adapter, &format!("{missing}:f"));

    let err = adapter.validate(&target).unwrap_err();
    assert_eq!(err.to_string(), format!("File not found: {missing}"));
    assert!(err.is_resolution_error());

    assert!(adapter.summarize(&target).is_err());
}

#[test]
fn test_file_function_validates_and_summarizes() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, &format!("{}:ok", project.file("sample.py")));

    let validated = adapter.validate(&target).unwrap();
    assert_eq!(validated.target(), &target);
    let ResolvedPayload::Syntax(source) = validated.payload() else {
        panic!("file targets should carry a syntax payload");
    };
    assert_eq!(source.path, PathBuf::from(project.file("sample.py")));
    assert_eq!(source.definition.name, "ok");
    assert_eq!(source.definition.start_line, 2);

    let summary = adapter.summarize(&target).unwrap();
    assert!(summary.found);
    assert!(!summary.importable);
    assert_eq!(summary.kind, TargetKind::Function);
    assert_eq!(
        summary.signature.as_deref(),
        Some("(a, b, *rest, flag, **options)")
    );
    assert_eq!(summary.short_doc.as_deref(), Some("Return something fine."));
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn test_async_and_decorated_functions_are_found() {
    let project = Project::new();
    let adapter = project.adapter();

    for name in ["fetch", "decorated"] {
        let target = parse(&adapter, &format!("{}:{name}", project.file("sample.py")));
        let validated = adapter.validate(&target).unwrap();
        let definition = validated.payload().definition().unwrap();
        assert_eq!(definition.name, name);
    }

    let target = parse(&adapter, &format!("{}:fetch", project.file("sample.py")));
    let validated = adapter.validate(&target).unwrap();
    assert!(validated.payload().definition().unwrap().is_async);
}

#[test]
fn test_file_method_and_missing_nodes() {
    let project = Project::new();
    let adapter = project.adapter();
    let sample = project.file("sample.py");

    let method = parse(&adapter, &format!("{sample}:Greeter.greet"));
    let summary = adapter.summarize(&method).unwrap();
    assert_eq!(summary.kind, TargetKind::Method);
    assert_eq!(summary.signature.as_deref(), Some("(self, name)"));
    assert_eq!(summary.short_doc.as_deref(), Some("Say hello."));

    let missing_method = parse(&adapter, &format!("{sample}:Greeter.wave"));
    assert_eq!(
        adapter.validate(&missing_method).unwrap_err().to_string(),
        "Method 'Greeter.wave' not found"
    );
    let summary = adapter.summarize(&missing_method).unwrap();
    assert!(!summary.found);
    assert_eq!(summary.diagnostics, vec!["Method 'Greeter.wave' not found"]);

    let missing_class = parse(&adapter, &format!("{sample}:Waver.wave"));
    assert_eq!(
        adapter.validate(&missing_class).unwrap_err().to_string(),
        "Class 'Waver' not found"
    );
}

#[test]
fn test_missing_module_summary_and_validation() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, "pkg.missing_module:fn");

    let summary = adapter.summarize(&target).unwrap();
    assert!(!summary.found);
    assert!(!summary.importable);
    assert_eq!(summary.kind, TargetKind::Unknown);
    assert_eq!(
        summary.diagnostics,
        vec!["Import failed: ModuleNotFoundError: No module named 'pkg.missing_module'"]
    );

    let err = adapter.validate(&target).unwrap_err();
    assert!(err.is_resolution_error());
    assert_eq!(
        err.to_string(),
        "Failed to import module 'pkg.missing_module': ModuleNotFoundError: No module named 'pkg.missing_module'"
    );
}

#[test]
fn test_module_method_target() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, "pkg.shapes:Square.area");

    let summary = adapter.summarize(&target).unwrap();
    assert!(summary.found);
    assert!(summary.importable);
    assert_eq!(summary.kind, TargetKind::Method);
    assert_eq!(
        summary.signature.as_deref(),
        Some("(self, side: float) -> float")
    );
    assert_eq!(summary.short_doc.as_deref(), Some("Area."));

    let validated = adapter.validate(&target).unwrap();
    let ResolvedPayload::Symbol(symbol) = validated.payload() else {
        panic!("module targets should carry a symbol payload");
    };
    assert_eq!(symbol.kind(), SymbolKind::Method);
    assert_eq!(
        validated.payload().origin(),
        project.dir.path().join("pkg/shapes.py")
    );
}

#[test]
fn test_inherited_module_method_validates() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, "pkg.shapes:Cube.area");

    let validated = adapter.validate(&target).unwrap();
    let ResolvedPayload::Symbol(symbol) = validated.payload() else {
        panic!("module targets should carry a symbol payload");
    };
    assert_eq!(symbol.kind(), SymbolKind::Method);
    assert_eq!(symbol.qualified_name(), "Cube.area");

    let summary = adapter.summarize(&target).unwrap();
    assert!(summary.found);
    assert_eq!(summary.kind, TargetKind::Method);
    assert_eq!(summary.short_doc.as_deref(), Some("Area."));
}

#[test]
fn test_module_missing_attribute() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, "pkg.shapes:circle");

    let summary = adapter.summarize(&target).unwrap();
    assert!(!summary.found);
    assert!(summary.importable);
    assert_eq!(
        summary.diagnostics,
        vec!["Symbol not found: AttributeError: module 'pkg.shapes' has no attribute 'circle'"]
    );

    assert_eq!(
        adapter.validate(&target).unwrap_err().to_string(),
        "Symbol 'circle' not found in module 'pkg.shapes': AttributeError: module 'pkg.shapes' has no attribute 'circle'"
    );
}

#[test]
fn test_non_callable_value_degrades_summary() {
    let project = Project::new();
    let adapter = project.adapter();
    let target = parse(&adapter, "pkg.shapes:LIMIT");

    let summary = adapter.summarize(&target).unwrap();
    assert!(summary.found);
    assert!(summary.importable);
    assert_eq!(summary.kind, TargetKind::Unknown);
    assert_eq!(summary.signature, None);
    assert_eq!(summary.diagnostics.len(), 1);

    // Strict validation only requires the attribute to exist
    assert!(adapter.validate(&target).is_ok());
}

/// Resolver that finds every symbol but can describe none of them
struct OpaqueResolver;

impl SymbolResolver for OpaqueResolver {
    fn resolve_symbol(
        &self,
        module: &str,
        class_name: Option<&str>,
        attribute: &str,
    ) -> Result<Symbol, ResolveFailure> {
        let qualified_name = match class_name {
            Some(class_name) => format!("{class_name}.{attribute}"),
            None => attribute.to_string(),
        };
        Ok(Symbol::new(
            module,
            Path::new("/opaque.py"),
            qualified_name,
            SymbolKind::Function,
        ))
    }

    fn describe_symbol(&self, symbol: &Symbol) -> Result<SymbolDescription, DescribeError> {
        Err(DescribeError::NoSignature(symbol.qualified_name().to_string()))
    }
}

#[test]
fn test_describe_failure_keeps_method_kind() {
    let adapter = PythonAdapter::with_resolver(Box::new(OpaqueResolver));

    let method = parse(&adapter, "anything:Thing.run");
    let summary = adapter.summarize(&method).unwrap();
    assert!(summary.found);
    assert_eq!(summary.kind, TargetKind::Method);
    assert_eq!(summary.signature, None);
    assert_eq!(summary.short_doc, None);
    assert_eq!(summary.diagnostics.len(), 1);

    let function = parse(&adapter, "anything:run");
    let summary = adapter.summarize(&function).unwrap();
    assert_eq!(summary.kind, TargetKind::Unknown);
}

#[test]
fn test_malformed_targets_fail_to_parse() {
    let project = Project::new();
    let adapter = project.adapter();

    for raw in ["no_separator", ":f", "mod:", "mod:A.b.c", "mod:.b"] {
        let err = adapter.parse(&TargetRef::from(raw)).unwrap_err();
        assert!(
            matches!(err, AdapterError::TargetParse(_)),
            "{raw} gave {err:?}"
        );
    }
}
