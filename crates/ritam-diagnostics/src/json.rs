// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Produces structured JSON that editors and build tools can parse. Each
//! diagnostic carries its code, exact location (line/column) and the same
//! source snippet the terminal message shows.

use serde::Serialize;

use ritam_ast::LineMap;

use crate::codes::ErrorCodeRegistry;
use crate::{render_snippet, Diagnostic};

/// A complete JSON diagnostic report for one compilation run.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The file that was compiled.
    pub file: String,
    /// Whether compilation succeeded (no errors).
    pub success: bool,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
}

/// A single diagnostic in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Syntax").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let line_map = LineMap::new(source);
    let json_diags: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| to_json_diagnostic(d, source, &line_map, &registry))
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: json_diags.is_empty(),
        error_count: json_diags.len(),
        diagnostics: json_diags,
    }
}

fn to_json_diagnostic(
    diag: &Diagnostic,
    source: &str,
    line_map: &LineMap,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_deref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let primary = diag.primary_label();
    let snippet = primary.and_then(|l| render_snippet(source, line_map, l.line, l.column));

    JsonDiagnostic {
        code,
        category,
        message: diag.message.clone(),
        line: primary.map(|l| l.line),
        column: primary.map(|l| l.column),
        snippet,
        hint: diag.help.clone(),
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_for_one_error() {
        let src = "var x = 1\npritn x";
        let diag = Diagnostic::error("Unexpected token 'pritn'")
            .with_code("E0100")
            .with_label(2, 1, 5, None)
            .with_help("Did you mean \"print\"?");
        let report = to_json_report(&[diag], src, "main.rt");
        assert!(!report.success);
        assert_eq!(report.error_count, 1);

        let value: serde_json::Value = serde_json::from_str(&to_json_string(&report)).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["file"], "main.rt");
        let first = &value["diagnostics"][0];
        assert_eq!(first["code"], "E0100");
        assert_eq!(first["category"], "Syntax");
        assert_eq!(first["line"], 2);
        assert_eq!(first["column"], 1);
        assert_eq!(first["snippet"], "2 | pritn x\n  | ^");
        assert_eq!(first["hint"], "Did you mean \"print\"?");
        assert_eq!(value["error_count"], 1);
    }

    #[test]
    fn empty_report_is_success() {
        let report = to_json_report(&[], "", "empty.rt");
        assert!(report.success);
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["diagnostics"], serde_json::json!([]));
    }
}
