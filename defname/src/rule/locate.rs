use std::borrow::Cow;

use crate::export_map::{DefaultExportDeclaration, ExportEntry, ExportMap};

/// Finds the declaration behind a module's `default` export.
pub fn locate_default_declaration(
    export_map: &ExportMap,
) -> Option<Cow<'_, DefaultExportDeclaration>> {
    match export_map.exports.get("default")? {
        ExportEntry::DefaultDeclaration(declaration) => Some(Cow::Borrowed(declaration)),
        ExportEntry::Named { specifiers } => specifiers
            .iter()
            .find(|spec| spec.exported == "default")
            .map(|spec| {
                Cow::Owned(DefaultExportDeclaration::ExportSpecifier {
                    local: spec.local.clone(),
                })
            }),
        ExportEntry::Namespace => None,
    }
}
