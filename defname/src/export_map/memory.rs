use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::{ExportMap, ExportMapResolver, builder};

/// Serves export maps for modules held in memory, keyed by path.
///
/// Relative specifiers are joined onto the importing file's directory and tried with
/// the usual JS/TS extensions, then as a directory index. Anything else is unresolved.
#[derive(Debug, Default)]
pub struct MemoryExportMapResolver {
    modules: HashMap<PathBuf, Arc<ExportMap>>,
    lookups: usize,
}

const CANDIDATE_EXTS: [&str; 9] = [
    "", ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts",
];

impl MemoryExportMapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source_text` as the module at `path`.
    pub fn insert_source(&mut self, path: impl Into<PathBuf>, source_text: &str) {
        let path = normalize(&path.into());
        let export_map = builder::build_from_source(&path, source_text);
        self.modules.insert(path, Arc::new(export_map));
    }

    pub fn insert(&mut self, export_map: ExportMap) {
        self.modules
            .insert(normalize(&export_map.path), Arc::new(export_map));
    }

    /// Number of `resolve` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    fn find(&self, base: &Path) -> Option<Arc<ExportMap>> {
        let base_text = base.to_string_lossy();
        CANDIDATE_EXTS
            .iter()
            .map(|ext| PathBuf::from(format!("{base_text}{ext}")))
            .chain(
                CANDIDATE_EXTS[1..]
                    .iter()
                    .map(|ext| base.join(format!("index{ext}"))),
            )
            .find_map(|candidate| self.modules.get(&candidate).cloned())
    }
}

impl ExportMapResolver for MemoryExportMapResolver {
    fn resolve(&mut self, specifier: &str, importing_file: &Path) -> Option<Arc<ExportMap>> {
        self.lookups += 1;
        if !(specifier.starts_with("./") || specifier.starts_with("../")) {
            return None;
        }
        let from_dir = importing_file.parent().unwrap_or_else(|| Path::new(""));
        self.find(&normalize(&from_dir.join(specifier)))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
