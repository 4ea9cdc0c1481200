use std::path::{Path, PathBuf};

use globset::GlobSet;
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use crate::diagnostic::{Diagnostic, FileReport, LineIndex};
use crate::error::DefnameError;
use crate::export_map::ExportMapResolver;
use crate::rule::{CheckOutcome, NoRenameDefault, RULE_NAME, RuleOptions};

const SOURCE_EXTS: [&str; 8] = ["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

const FILE_EXTS: [&str; 9] = [
    "", ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts",
];

/// Diagnostic channel for one file.
#[derive(Debug)]
pub struct LintContext {
    path: PathBuf,
    line_index: LineIndex,
    diagnostics: Vec<Diagnostic>,
    outcomes: Vec<(Span, CheckOutcome)>,
}

impl LintContext {
    pub fn new(path: &Path, source_text: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            line_index: LineIndex::new(source_text),
            diagnostics: vec![],
            outcomes: vec![],
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn report(&mut self, span: Span, message: String) {
        let (line, column) = self.line_index.position(span.start);
        let (end_line, end_column) = self.line_index.position(span.end);
        self.diagnostics.push(Diagnostic {
            rule_id: RULE_NAME,
            message,
            line,
            column,
            end_line,
            end_column,
            span,
        });
    }

    pub fn record(&mut self, span: Span, outcome: CheckOutcome) {
        self.outcomes.push((span, outcome));
    }

    pub fn into_report(self) -> FileReport {
        FileReport {
            path: self.path,
            diagnostics: self.diagnostics,
            outcomes: self.outcomes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LintSettings {
    pub options: RuleOptions,
    /// Matched against paths relative to `project_root` when it is set.
    pub exclude: GlobSet,
    pub project_root: Option<PathBuf>,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            options: RuleOptions::default(),
            exclude: GlobSet::empty(),
            project_root: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct LintRun {
    pub reports: Vec<FileReport>,
    pub failures: Vec<DefnameError>,
}

impl LintRun {
    pub fn problem_count(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics.len()).sum()
    }
}

pub fn lint_source(
    path: &Path,
    source_text: &str,
    options: RuleOptions,
    resolver: &mut dyn ExportMapResolver,
) -> Result<FileReport, DefnameError> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_default();
    let parsed = Parser::new(&allocator, source_text, source_type).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(DefnameError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut ctx = LintContext::new(path, source_text);
    NoRenameDefault::new(options, &mut ctx, resolver).visit_program(&parsed.program);
    Ok(ctx.into_report())
}

pub fn lint_file(
    path: &Path,
    options: RuleOptions,
    resolver: &mut dyn ExportMapResolver,
) -> Result<FileReport, DefnameError> {
    let source_text = std::fs::read_to_string(path).map_err(|source| DefnameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    lint_source(path, &source_text, options, resolver)
}

pub fn lint_paths(
    paths: &[PathBuf],
    settings: &LintSettings,
    resolver: &mut dyn ExportMapResolver,
) -> LintRun {
    let files = {
        let _span = crate::profile::span("collect files");
        collect_source_files(paths, &settings.exclude, settings.project_root.as_deref())
    };
    let _span = crate::profile::span("lint");
    files
        .iter()
        .map(|file| lint_file(file, settings.options, resolver))
        .fold(LintRun::default(), |mut run, result| {
            match result {
                Ok(report) => run.reports.push(report),
                Err(err) => run.failures.push(err),
            }
            run
        })
}

/// Expands directories into absolute JS/TS source file paths, honouring `.gitignore`
/// and `exclude`.
pub fn collect_source_files(
    paths: &[PathBuf],
    exclude: &GlobSet,
    project_root: Option<&Path>,
) -> Vec<PathBuf> {
    let mut out = paths
        .iter()
        .map(|path| absolute_path(path))
        .flat_map(|path| {
            if path.is_dir() {
                ignore::WalkBuilder::new(&path)
                    .build()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
                    .map(|entry| entry.into_path())
                    .collect::<Vec<_>>()
            } else {
                vec![path]
            }
        })
        .filter(|path| looks_like_source_file(path))
        .filter(|path| !is_excluded(path, exclude, project_root))
        .collect::<Vec<_>>();
    out.sort();
    out.dedup();
    out
}

fn absolute_path(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

fn is_excluded(path: &Path, exclude: &GlobSet, project_root: Option<&Path>) -> bool {
    let relative = project_root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);
    exclude.is_match(relative)
}

pub fn looks_like_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTS.contains(&ext))
}

pub fn try_resolve_file(candidate_base: &Path) -> Option<PathBuf> {
    FILE_EXTS
        .iter()
        .map(|ext| PathBuf::from(format!("{}{}", candidate_base.to_string_lossy(), ext)))
        .chain(
            FILE_EXTS[1..]
                .iter()
                .map(|ext| candidate_base.join(format!("index{ext}"))),
        )
        .find(|full| full.is_file())
        .map(|full| dunce::canonicalize(&full).unwrap_or(full))
}
