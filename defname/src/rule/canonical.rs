use crate::export_map::DefaultExportDeclaration;

/// The name a module's author gave its default export, if it can be determined.
///
/// `prevent_renaming_bindings` decides whether a bare identifier or an assignment
/// (`export default foo`, `export default foo = bar`) names the export. Call expressions
/// are looked through via their first argument, so `export default connect(Foo)` is `Foo`.
pub fn resolve_canonical_name(
    declaration: &DefaultExportDeclaration,
    prevent_renaming_bindings: bool,
) -> Option<&str> {
    let name = match declaration {
        DefaultExportDeclaration::Assignment { target } => {
            if !prevent_renaming_bindings {
                return None;
            }
            target.as_deref()
        }
        DefaultExportDeclaration::Call { first_argument } => {
            return first_argument
                .as_deref()
                .and_then(|inner| resolve_canonical_name(inner, prevent_renaming_bindings));
        }
        DefaultExportDeclaration::Class { name } => name.as_deref(),
        DefaultExportDeclaration::ExportSpecifier { local } => Some(local.as_str()),
        DefaultExportDeclaration::Function { name } => name.as_deref(),
        DefaultExportDeclaration::Identifier { name } => {
            prevent_renaming_bindings.then_some(name.as_str())
        }
        DefaultExportDeclaration::Unsupported { .. } => None,
    };
    name.filter(|name| is_usable_name(name))
}

/// Short label for the innermost form of a default export, used in skip summaries.
pub fn form_label(declaration: &DefaultExportDeclaration) -> &'static str {
    match declaration {
        DefaultExportDeclaration::Assignment { .. } => "assignment",
        DefaultExportDeclaration::Call {
            first_argument: Some(inner),
        } => form_label(inner),
        DefaultExportDeclaration::Call {
            first_argument: None,
        } => "call without arguments",
        DefaultExportDeclaration::Class { name: None } => "anonymous class",
        DefaultExportDeclaration::Class { name: Some(_) } => "class",
        DefaultExportDeclaration::ExportSpecifier { .. } => "export specifier",
        DefaultExportDeclaration::Function { name: None } => "anonymous function",
        DefaultExportDeclaration::Function { name: Some(_) } => "function",
        DefaultExportDeclaration::Identifier { .. } => "identifier",
        DefaultExportDeclaration::Unsupported { kind } => *kind,
    }
}

// `default` itself shows up as the local of `export { default } from './x'`.
fn is_usable_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && name != "default"
}
