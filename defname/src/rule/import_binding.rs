use oxc_ast::ast::{ImportDeclarationSpecifier, StringLiteral};

use super::{Binding, BindingForm};
use crate::export_map::builder::module_export_name_as_str;

/// `import X from '…'` and `import { default as X } from '…'`; other specifiers are ignored.
pub fn extract<'s>(
    specifier: &'s ImportDeclarationSpecifier<'_>,
    source: &'s StringLiteral<'_>,
) -> Option<Binding<'s>> {
    let (local, form, span) = match specifier {
        ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
            (spec.local.name.as_str(), BindingForm::ModuleDefault, spec.span)
        }
        ImportDeclarationSpecifier::ImportSpecifier(spec)
            if module_export_name_as_str(&spec.imported) == "default" =>
        {
            (spec.local.name.as_str(), BindingForm::NamedAsDefault, spec.span)
        }
        _ => return None,
    };
    Some(Binding {
        local,
        form,
        span,
        target: source.value.as_str(),
        target_span: source.span,
    })
}
