use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

pub mod builder;
pub mod fs_resolver;
pub mod memory;


pub use fs_resolver::FsExportMapResolver;
pub use memory::MemoryExportMapResolver;

/// Immutable snapshot of what one module exports.
#[derive(Debug, Clone, Default)]
pub struct ExportMap {
    pub path: PathBuf,
    pub exports: IndexMap<String, ExportEntry>,
    pub errors: Vec<ModuleError>,
}

/// The statement an exported name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEntry {
    /// `export default <declaration>`
    DefaultDeclaration(DefaultExportDeclaration),
    /// `export { a as b }`, `export { a as b } from '…'`, or `export const/function/class`.
    /// Holds every specifier of the statement; declarations carry none.
    Named { specifiers: Vec<ExportSpecifierRef> },
    /// `export * as ns from '…'`
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifierRef {
    pub local: String,
    pub exported: String,
}

/// How the `default` export of a module was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExportDeclaration {
    /// `export default foo = bar`; `target` is set only for a plain identifier on the left.
    Assignment { target: Option<String> },
    /// `export default wrap(inner, …)`; only the first argument is kept.
    Call {
        first_argument: Option<Box<DefaultExportDeclaration>>,
    },
    Class { name: Option<String> },
    /// `export { local as default }`
    ExportSpecifier { local: String },
    Function { name: Option<String> },
    /// `export default foo`
    Identifier { name: String },
    Unsupported { kind: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleError {
    pub message: String,
}

impl ExportMap {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    pub fn failed(path: &Path, errors: Vec<ModuleError>) -> Self {
        Self {
            path: path.to_path_buf(),
            exports: IndexMap::new(),
            errors,
        }
    }
}

impl ModuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns a module specifier written in `importing_file` into the target's export map.
///
/// `None` means no check is possible: the specifier did not resolve, or resolved to
/// something that is not analysed (ignored path, non-JS file). Callers must tolerate
/// repeated calls for the same specifier and must not assume results are cached.
pub trait ExportMapResolver {
    fn resolve(&mut self, specifier: &str, importing_file: &Path) -> Option<Arc<ExportMap>>;
}
