//! Helpers for emitting Python source text

use crate::context::GenerationContext;
use std::fmt::Write;

/// Header comment recording what a file was generated from
///
/// Kind and signature are only recorded when the target was found.
pub fn header_comment(forge: &str, context: &GenerationContext) -> String {
    let mut header = String::new();
    let _ = writeln!(header, "# Generated by carron ({forge} forge). Do not edit by hand.");
    let _ = writeln!(header, "# Target: {}", single_line(context.target.as_str()));

    if let Some(summary) = context.summary.as_ref().filter(|s| s.found) {
        let _ = writeln!(header, "# Kind: {}", summary.kind);
        if let Some(signature) = &summary.signature {
            let _ = writeln!(header, "# Signature: {}", single_line(signature));
        }
        if let Some(doc) = &summary.short_doc {
            let _ = writeln!(header, "# Summary: {}", single_line(doc));
        }
    }

    header
}

/// Collapse whitespace runs so text fits on one comment line
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Quote text as a Python string literal
pub fn python_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use carron_languages::{TargetKind, TargetSummary};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_python_string_escapes() {
        assert_eq!(python_string("plain"), "\"plain\"");
        assert_eq!(python_string(r"C:\src\m.py"), r#""C:\\src\\m.py""#);
        assert_eq!(python_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(python_string("\u{7}"), r#""\u0007""#);
    }

    #[test]
    fn test_single_line_collapses_whitespace() {
        assert_eq!(single_line("(a,\n    b=1)"), "(a, b=1)");
    }

    #[test]
    fn test_header_without_summary() {
        let context = GenerationContext::new("m.py:f");
        assert_eq!(
            header_comment("prop", &context),
            "# Generated by carron (prop forge). Do not edit by hand.\n# Target: m.py:f\n"
        );
    }

    #[test]
    fn test_header_with_summary() {
        let summary = TargetSummary {
            found: true,
            importable: true,
            kind: TargetKind::Method,
            signature: Some("(self, x)".to_string()),
            short_doc: Some("Do the thing.".to_string()),
            diagnostics: Vec::new(),
        };
        let context = GenerationContext::new("pkg.m:C.run").with_summary(summary);

        let header = header_comment("diff", &context);
        assert!(header.contains("# Kind: method\n"));
        assert!(header.contains("# Signature: (self, x)\n"));
        assert!(header.contains("# Summary: Do the thing.\n"));
    }

    #[test]
    fn test_header_skips_unfound_summary() {
        let context = GenerationContext::new("pkg.m:missing")
            .with_summary(TargetSummary::not_found(true, "Symbol not found"));
        let header = header_comment("diff", &context);
        assert!(!header.contains("# Kind"));
    }
}
