use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use oxc_resolver::{
    ResolveContext, ResolveOptions, Resolver, TsConfig, TsconfigDiscovery, TsconfigOptions,
    TsconfigReferences,
};
use regex::Regex;

use super::{ExportMap, ExportMapResolver, ModuleError, builder};
use crate::error::DefnameError;

const RESOLVE_EXTS: [&str; 9] = [
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts", ".json",
];

/// Resolves specifiers on disk and parses the target module.
///
/// Export maps are cached per canonical path for the lifetime of the resolver.
#[derive(Debug)]
pub struct FsExportMapResolver {
    project_root: PathBuf,
    ignore: Vec<Regex>,
    resolvers_by_dir: HashMap<PathBuf, CachedResolver>,
    export_maps: HashMap<PathBuf, Arc<ExportMap>>,
    skipped: Option<Vec<SkippedModule>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModule {
    pub specifier: String,
    pub importing_file: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unresolved,
    Ignored(PathBuf),
    NotSource(PathBuf),
}

#[derive(Debug)]
struct CachedResolver {
    tsconfig: Option<Arc<TsConfig>>,
    resolver: Resolver,
}

impl FsExportMapResolver {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: dunce::canonicalize(project_root)
                .unwrap_or_else(|_| project_root.to_path_buf()),
            ignore: vec![],
            resolvers_by_dir: HashMap::new(),
            export_maps: HashMap::new(),
            skipped: None,
        }
    }

    /// Keep a list of specifiers that produced no export map, for [`Self::skipped`].
    pub fn recording_skips(mut self) -> Self {
        self.skipped = Some(vec![]);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self, DefnameError> {
        self.ignore = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| DefnameError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Specifiers that produced no export map, in the order they were seen.
    /// Empty unless the resolver was built with [`Self::recording_skips`].
    pub fn skipped(&self) -> &[SkippedModule] {
        self.skipped.as_deref().unwrap_or_default()
    }

    fn resolve_path(&mut self, specifier: &str, importing_file: &Path) -> Option<PathBuf> {
        let raw_specifier = specifier.trim();
        if raw_specifier.is_empty() {
            return None;
        }
        if let Some(rel) = raw_specifier.strip_prefix('/') {
            return crate::lint::try_resolve_file(&self.project_root.join(rel));
        }

        let importing_file = if importing_file.is_absolute() {
            importing_file.to_path_buf()
        } else {
            self.project_root.join(importing_file)
        };
        let from_dir = importing_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.project_root.clone());
        let project_root = self.project_root.clone();
        let cached = self
            .resolvers_by_dir
            .entry(from_dir.clone())
            .or_insert_with(|| build_cached_resolver(&from_dir, &project_root));

        let mut resolve_context = ResolveContext::default();
        cached
            .resolver
            .resolve_with_context(
                &from_dir,
                raw_specifier,
                cached.tsconfig.as_deref(),
                &mut resolve_context,
            )
            .ok()
            .map(|resolution| resolution.into_path_buf())
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.ignore.iter().any(|re| re.is_match(&text))
    }

    fn load(&mut self, path: PathBuf) -> Arc<ExportMap> {
        let canonical = dunce::canonicalize(&path).unwrap_or(path);
        if let Some(hit) = self.export_maps.get(&canonical) {
            return Arc::clone(hit);
        }
        let _span = crate::profile::span("export map");
        let export_map = match std::fs::read_to_string(&canonical) {
            Ok(source_text) => builder::build_from_source(&canonical, &source_text),
            Err(err) => ExportMap::failed(&canonical, vec![ModuleError::new(err.to_string())]),
        };
        let export_map = Arc::new(export_map);
        self.export_maps
            .insert(canonical, Arc::clone(&export_map));
        export_map
    }

    fn skip(&mut self, specifier: &str, importing_file: &Path, reason: SkipReason) {
        let Some(skipped) = self.skipped.as_mut() else {
            return;
        };
        skipped.push(SkippedModule {
            specifier: specifier.to_string(),
            importing_file: importing_file.to_path_buf(),
            reason,
        });
    }
}

impl ExportMapResolver for FsExportMapResolver {
    fn resolve(&mut self, specifier: &str, importing_file: &Path) -> Option<Arc<ExportMap>> {
        let Some(resolved) = self.resolve_path(specifier, importing_file) else {
            self.skip(specifier, importing_file, SkipReason::Unresolved);
            return None;
        };
        if !crate::lint::looks_like_source_file(&resolved) {
            self.skip(specifier, importing_file, SkipReason::NotSource(resolved));
            return None;
        }
        if self.is_ignored(&resolved) {
            self.skip(specifier, importing_file, SkipReason::Ignored(resolved));
            return None;
        }
        Some(self.load(resolved))
    }
}

fn build_cached_resolver(from_dir: &Path, project_root: &Path) -> CachedResolver {
    let tsconfig_path = find_tsconfig_json(from_dir, project_root);
    let tsconfig = tsconfig_path.as_deref().and_then(load_tsconfig);
    let resolver = build_oxc_resolver(tsconfig_path.as_deref());
    CachedResolver { tsconfig, resolver }
}

fn build_oxc_resolver(tsconfig_path: Option<&Path>) -> Resolver {
    let extensions = RESOLVE_EXTS
        .into_iter()
        .map(|ext| ext.to_string())
        .collect::<Vec<_>>();
    let tsconfig = tsconfig_path.map(|path| {
        TsconfigDiscovery::Manual(TsconfigOptions {
            config_file: path.to_path_buf(),
            references: TsconfigReferences::Disabled,
        })
    });
    Resolver::new(ResolveOptions {
        extensions,
        tsconfig,
        ..Default::default()
    })
}

fn find_tsconfig_json(from_dir: &Path, project_root: &Path) -> Option<PathBuf> {
    std::iter::successors(Some(from_dir), |dir| dir.parent())
        .take_while(|dir| dir.starts_with(project_root))
        .find_map(|dir| {
            let candidate = dir.join("tsconfig.json");
            candidate.exists().then_some(candidate)
        })
}

fn load_tsconfig(tsconfig_path: &Path) -> Option<Arc<TsConfig>> {
    let raw = std::fs::read_to_string(tsconfig_path).ok()?;
    let value = json5::from_str::<serde_json::Value>(&raw).ok()?;
    let normalized_json = serde_json::to_string(&value).ok()?;
    let mut tsconfig = TsConfig::parse(true, tsconfig_path, normalized_json).ok()?;
    absolutize_tsconfig_paths(&mut tsconfig);
    Some(Arc::new(tsconfig))
}

fn absolutize_tsconfig_paths(tsconfig: &mut TsConfig) {
    let tsconfig_dir = tsconfig.directory().to_path_buf();
    let base_dir = tsconfig
        .compiler_options
        .base_url
        .as_ref()
        .map(|base_url| {
            if base_url.is_absolute() {
                base_url.to_path_buf()
            } else {
                tsconfig_dir.join(base_url)
            }
        })
        .unwrap_or_else(|| tsconfig_dir.clone());

    if let Some(base_url) = tsconfig.compiler_options.base_url.as_mut()
        && !base_url.is_absolute()
    {
        *base_url = tsconfig_dir.join(&*base_url);
    };

    if let Some(paths) = tsconfig.compiler_options.paths.as_mut() {
        paths.values_mut().for_each(|targets| {
            targets
                .iter_mut()
                .filter(|p| !p.is_absolute())
                .for_each(|p| {
                    *p = base_dir.join(&*p);
                });
        });
    }
}
