use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::DefnameError;
use crate::rule::RuleOptions;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DefnameConfig {
    pub no_rename_default: Option<RuleOptions>,
    /// Regexes matched against resolved module paths; matching modules are not analysed.
    pub ignore: Option<Vec<String>>,
    /// Globs for files that should not be linted.
    pub exclude: Option<Vec<String>>,
}

impl DefnameConfig {
    pub fn rule_options(&self) -> RuleOptions {
        self.no_rename_default.unwrap_or_default()
    }
}

pub fn find_project_root(start: &Path) -> PathBuf {
    git2::Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| start.to_path_buf())
}

pub fn discover_config_path(project_root: &Path) -> Option<PathBuf> {
    let names = [
        "defname.toml",
        "defname.config.json",
        "defname.config.json5",
        "defname.config.jsonc",
        "defname.config.yaml",
        "defname.config.yml",
        ".defnamerc",
        ".defnamerc.json",
        ".defnamerc.json5",
        ".defnamerc.yaml",
        ".defnamerc.yml",
    ];
    names
        .into_iter()
        .map(|name| project_root.join(name))
        .find(|p| p.exists())
}

pub fn load_config(project_root: &Path) -> Result<DefnameConfig, DefnameError> {
    if let Some(path) = discover_config_path(project_root) {
        return load_config_from_path(&path);
    }
    load_package_json_config(project_root)
}

pub fn load_config_from_path(path: &Path) -> Result<DefnameConfig, DefnameError> {
    let file_name = path
        .file_name()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let ext = path
        .extension()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" | "json5" | "jsonc" => load_json_config(path),
        "yaml" | "yml" => load_yaml_config(path),
        "toml" => load_toml_config(path),
        _ if file_name == ".defnamerc" => load_json_config(path),
        _ => Ok(DefnameConfig::default()),
    }
}

pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet, DefnameError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| DefnameError::InvalidPattern {
            pattern: pattern.clone(),
            message: err.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|err| DefnameError::InvalidPattern {
        pattern: patterns.join(", "),
        message: err.to_string(),
    })
}

fn read_config_text(path: &Path) -> Result<String, DefnameError> {
    std::fs::read_to_string(path).map_err(|source| DefnameError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json_config(path: &Path) -> Result<DefnameConfig, DefnameError> {
    let raw = read_config_text(path)?;
    json5::from_str::<DefnameConfig>(&raw)
        .or_else(|_| serde_json::from_str::<DefnameConfig>(&raw))
        .map_err(|err| DefnameError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn load_yaml_config(path: &Path) -> Result<DefnameConfig, DefnameError> {
    let raw = read_config_text(path)?;
    serde_yaml::from_str::<DefnameConfig>(&raw).map_err(|err| DefnameError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn load_toml_config(path: &Path) -> Result<DefnameConfig, DefnameError> {
    let raw = read_config_text(path)?;
    let toml_value =
        toml::from_str::<toml::Value>(&raw).map_err(|err| DefnameError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    let json_value = serde_json::to_value(toml_value).map_err(|err| DefnameError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let normalized = normalize_keys_to_camel_case(&json_value);
    serde_json::from_value::<DefnameConfig>(normalized).map_err(|err| DefnameError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// The `"defname"` key of `package.json`, when present.
fn load_package_json_config(project_root: &Path) -> Result<DefnameConfig, DefnameError> {
    let path = project_root.join("package.json");
    if !path.exists() {
        return Ok(DefnameConfig::default());
    }
    let raw = read_config_text(&path)?;
    let package = serde_json::from_str::<JsonValue>(&raw).map_err(|err| {
        DefnameError::ConfigParse {
            path: path.clone(),
            message: err.to_string(),
        }
    })?;
    let Some(section) = package.get("defname") else {
        return Ok(DefnameConfig::default());
    };
    serde_json::from_value::<DefnameConfig>(section.clone()).map_err(|err| {
        DefnameError::ConfigParse {
            path: path.clone(),
            message: err.to_string(),
        }
    })
}

fn normalize_keys_to_camel_case(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(
            object
                .iter()
                .map(|(key, value)| (camel_case_key(key), normalize_keys_to_camel_case(value)))
                .collect(),
        ),
        JsonValue::Array(array) => {
            JsonValue::Array(array.iter().map(normalize_keys_to_camel_case).collect())
        }
        other => other.clone(),
    }
}

fn camel_case_key(key: &str) -> String {
    if !key.contains('_') {
        return key.to_string();
    }

    let mut segments = key.split('_').filter(|segment| !segment.is_empty());
    let Some(first_segment) = segments.next() else {
        return key.to_string();
    };

    let mut normalized_key = String::from(first_segment);
    for segment in segments {
        let mut chars = segment.chars();
        let Some(first_char) = chars.next() else {
            continue;
        };
        normalized_key.push(first_char.to_ascii_uppercase());
        normalized_key.extend(chars);
    }
    normalized_key
}
