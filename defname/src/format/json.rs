use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::lint::LintRun;

#[derive(Debug, Serialize)]
struct JsonFileReport<'a> {
    path: String,
    diagnostics: &'a [Diagnostic],
}

/// Every linted file with its diagnostics, as a pretty-printed JSON array.
pub fn render_json(run: &LintRun) -> String {
    let files = run
        .reports
        .iter()
        .map(|report| JsonFileReport {
            path: super::pretty::display_path(&report.path, None),
            diagnostics: &report.diagnostics,
        })
        .collect::<Vec<_>>();
    serde_json::to_string_pretty(&files).unwrap_or_else(|_| "[]".to_string())
}
