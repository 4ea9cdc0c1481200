use std::path::Path;

use path_slash::PathExt;

use crate::diagnostic::{FileReport, LineIndex};
use crate::lint::LintRun;

use super::codeframe::render_code_frame;
use super::colors::Palette;

/// Human-readable report: diagnostics grouped per file, each with a code frame.
pub fn render_pretty(run: &LintRun, palette: Palette, cwd: Option<&Path>) -> String {
    let mut out: Vec<String> = vec![];
    run.reports
        .iter()
        .filter(|report| !report.diagnostics.is_empty())
        .for_each(|report| {
            out.push(palette.path(&display_path(&report.path, cwd)));
            out.extend(render_file(report, palette));
            out.push(String::new());
        });

    let problems = run.problem_count();
    if problems == 0 {
        out.push(palette.success("No problems found."));
    } else {
        let noun = if problems == 1 { "problem" } else { "problems" };
        out.push(palette.warn(&format!("{problems} {noun}")));
    }
    out.join("\n")
}

fn render_file(report: &FileReport, palette: Palette) -> Vec<String> {
    let source = std::fs::read_to_string(&report.path)
        .ok()
        .map(|text| LineIndex::new(&text));
    report
        .diagnostics
        .iter()
        .flat_map(|diagnostic| {
            let mut lines = vec![format!(
                "  {}  {}  {}  {}",
                palette.dim(&format!("{}:{}", diagnostic.line, diagnostic.column)),
                palette.warn("warning"),
                diagnostic.message,
                palette.gray(diagnostic.rule_id)
            )];
            if let Some(source) = source.as_ref() {
                lines.extend(render_code_frame(
                    source,
                    diagnostic.line,
                    diagnostic.column,
                    palette,
                ));
            }
            lines
        })
        .collect()
}

pub fn display_path(path: &Path, cwd: Option<&Path>) -> String {
    let shown = cwd
        .and_then(|cwd| path.strip_prefix(cwd).ok())
        .unwrap_or(path);
    shown.to_slash_lossy().to_string()
}
