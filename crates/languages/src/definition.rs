//! Owned snapshots of function definitions
//!
//! Syntax nodes borrow the tree they were parsed from, so resolved
//! definitions are copied out into these types before leaving the adapter.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// How a parameter binds its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterKind {
    /// Declared before a `/` marker
    PositionalOnly,
    PositionalOrKeyword,
    /// `*args`
    VarPositional,
    /// Declared after `*` or `*args`
    KeywordOnly,
    /// `**kwargs`
    VarKeyword,
}

/// A single declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub annotation: Option<String>,
    pub default: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            annotation: None,
            default: None,
        }
    }

    /// Render the parameter the way a runtime signature prints it
    fn render_full(&self) -> String {
        let prefix = match self.kind {
            ParameterKind::VarPositional => "*",
            ParameterKind::VarKeyword => "**",
            _ => "",
        };
        let mut out = format!("{prefix}{}", self.name);
        if let Some(annotation) = &self.annotation {
            out.push_str(": ");
            out.push_str(annotation);
        }
        match (&self.annotation, &self.default) {
            (Some(_), Some(default)) => {
                out.push_str(" = ");
                out.push_str(default);
            }
            (None, Some(default)) => {
                out.push('=');
                out.push_str(default);
            }
            _ => {}
        }
        out
    }
}

/// A function or method definition located in source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    /// Enclosing class for methods
    pub class_name: Option<String>,
    pub is_async: bool,
    pub decorators: Vec<String>,
    /// 1-based line of the `def` keyword
    pub start_line: usize,
    /// 1-based last line of the body
    pub end_line: usize,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    /// Docstring with quotes stripped
    pub docstring: Option<String>,
    /// Source text including decorators
    pub source_text: String,
}

impl Definition {
    /// Parameter names only, in declaration order
    ///
    /// Renders positional names, then `*vararg`, then keyword-only names,
    /// then `**kwarg`: `(a, b, *args, key, **kwargs)`.
    pub fn parameter_names_signature(&self) -> String {
        let of_kind = |kinds: &[ParameterKind], prefix: &str| -> Vec<String> {
            self.parameters
                .iter()
                .filter(|p| kinds.contains(&p.kind))
                .map(|p| format!("{prefix}{}", p.name))
                .collect()
        };

        let mut parts = of_kind(
            &[
                ParameterKind::PositionalOnly,
                ParameterKind::PositionalOrKeyword,
            ],
            "",
        );
        parts.extend(of_kind(&[ParameterKind::VarPositional], "*"));
        parts.extend(of_kind(&[ParameterKind::KeywordOnly], ""));
        parts.extend(of_kind(&[ParameterKind::VarKeyword], "**"));

        format!("({})", parts.join(", "))
    }

    /// Full signature with markers, annotations, defaults and return type
    ///
    /// `(a, /, b: int = 1, *, c, **kw) -> str`
    pub fn full_signature(&self) -> String {
        render_full_signature(&self.parameters, self.return_type.as_deref())
    }

    /// Signature as seen through an instance or a class constructor
    pub fn bound_signature(&self) -> String {
        render_full_signature(
            self.parameters.get(1..).unwrap_or_default(),
            self.return_type.as_deref(),
        )
    }
}

fn render_full_signature(parameters: &[Parameter], return_type: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(parameters.len() + 2);
    let has_var_positional = parameters
        .iter()
        .any(|p| p.kind == ParameterKind::VarPositional);
    let mut seen_keyword_only = false;

    for (index, param) in parameters.iter().enumerate() {
        if param.kind == ParameterKind::KeywordOnly && !seen_keyword_only {
            seen_keyword_only = true;
            if !has_var_positional {
                parts.push("*".to_string());
            }
        }
        parts.push(param.render_full());

        let next_is_positional_only = parameters
            .get(index + 1)
            .is_some_and(|p| p.kind == ParameterKind::PositionalOnly);
        if param.kind == ParameterKind::PositionalOnly && !next_is_positional_only {
            parts.push("/".to_string());
        }
    }

    let mut out = format!("({})", parts.join(", "));
    if let Some(return_type) = return_type {
        out.push_str(" -> ");
        out.push_str(return_type);
    }
    out
}

/// First non-blank line of a docstring, trimmed
pub fn first_doc_line(doc: Option<&str>) -> Option<String> {
    doc?.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
