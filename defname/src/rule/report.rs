use super::{Binding, BindingForm};
use crate::export_map::ModuleError;

/// Advisory text for a binding whose local name differs from the export's own name.
pub fn mismatch_message(file_name: &str, canonical: &str, binding: &Binding<'_>) -> String {
    let local = binding.local;
    let target = binding.target;
    let (verb, suggestion) = match binding.form {
        BindingForm::ModuleDefault => ("imports", format!("import {canonical} from '{target}'")),
        BindingForm::NamedAsDefault => (
            "imports",
            format!("import {{ default as {canonical} }} from '{target}'"),
        ),
        BindingForm::RequireFull => (
            "requires",
            format!("const {canonical} = require('{target}')"),
        ),
        BindingForm::RequireDestructured => (
            "requires",
            format!("const {{ default: {canonical} }} = require('{target}')"),
        ),
    };
    format!(
        "Caution: `{file_name}` has a default export `{canonical}`. This {verb} `{canonical}` as `{local}`. Check if you meant to write `{suggestion}` instead."
    )
}

pub fn module_errors_message(specifier: &str, errors: &[ModuleError]) -> String {
    let joined = errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Parse errors in imported module '{specifier}': {joined}")
}
