use oxc_ast::ast::{ImportDeclaration, VariableDeclarator};
use oxc_ast_visit::{Visit, walk};
use oxc_span::Span;
use serde::{Deserialize, Serialize};

use crate::export_map::ExportMapResolver;
use crate::lint::LintContext;

pub mod canonical;
pub mod import_binding;
pub mod locate;
pub mod report;
pub mod require_binding;

#[cfg(test)]
mod binding_test;

pub const RULE_NAME: &str = "no-rename-default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RuleOptions {
    /// Also check `require` bindings.
    pub commonjs: bool,
    /// Treat `export default someLocal` and `export default a = b` as naming the export.
    /// When off those forms are considered deliberately unnamed and never reported.
    pub prevent_renaming_bindings: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            commonjs: false,
            prevent_renaming_bindings: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    ImportDefaultSpecifier,
    ImportSpecifier,
    VariableDeclarator,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub fixable: bool,
    pub listens_for: Vec<NodeKind>,
    pub schema: serde_json::Value,
}

pub fn meta() -> RuleMeta {
    RuleMeta {
        name: RULE_NAME,
        kind: "suggestion",
        description: "Warn when a default export is imported under a different name than the exporting module gives it.",
        fixable: false,
        listens_for: vec![
            NodeKind::ImportDefaultSpecifier,
            NodeKind::ImportSpecifier,
            NodeKind::VariableDeclarator,
        ],
        schema: serde_json::json!([{
            "type": "object",
            "properties": {
                "commonjs": { "type": "boolean", "default": false },
                "preventRenamingBindings": { "type": "boolean", "default": true },
            },
            "additionalProperties": false,
        }]),
    }
}

/// Import forms that bind a module's default export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingForm {
    /// `import X from '…'`
    ModuleDefault,
    /// `import { default as X } from '…'`
    NamedAsDefault,
    /// `const X = require('…')`
    RequireFull,
    /// `const { default: X } = require('…')`
    RequireDestructured,
}

/// A local name bound to some module's default export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'s> {
    pub local: &'s str,
    pub form: BindingForm,
    pub span: Span,
    pub target: &'s str,
    pub target_span: Span,
}

/// What happened when one binding was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Reported,
    NameMatch,
    /// The target could not be resolved or was ignored.
    Unresolvable,
    /// The target resolved but had errors; those were reported instead.
    ModuleErrors,
    NoDefaultExport,
    /// The default export exists but its name cannot be determined.
    UndeterminedName { form: &'static str },
}

pub struct NoRenameDefault<'c, 'r> {
    options: RuleOptions,
    ctx: &'c mut LintContext,
    resolver: &'r mut dyn ExportMapResolver,
}

impl<'c, 'r> NoRenameDefault<'c, 'r> {
    pub fn new(
        options: RuleOptions,
        ctx: &'c mut LintContext,
        resolver: &'r mut dyn ExportMapResolver,
    ) -> Self {
        Self {
            options,
            ctx,
            resolver,
        }
    }

    fn check(&mut self, binding: &Binding<'_>) -> CheckOutcome {
        let Some(export_map) = self.resolver.resolve(binding.target, self.ctx.path()) else {
            return CheckOutcome::Unresolvable;
        };
        if export_map.has_errors() {
            self.ctx.report(
                binding.target_span,
                report::module_errors_message(binding.target, &export_map.errors),
            );
            return CheckOutcome::ModuleErrors;
        }
        let Some(declaration) = locate::locate_default_declaration(&export_map) else {
            return CheckOutcome::NoDefaultExport;
        };
        let Some(canonical) = canonical::resolve_canonical_name(
            &declaration,
            self.options.prevent_renaming_bindings,
        ) else {
            return CheckOutcome::UndeterminedName {
                form: canonical::form_label(&declaration),
            };
        };
        if canonical == binding.local {
            return CheckOutcome::NameMatch;
        }
        self.ctx.report(
            binding.span,
            report::mismatch_message(&export_map.file_name(), canonical, binding),
        );
        CheckOutcome::Reported
    }

    fn check_and_record(&mut self, binding: Binding<'_>) {
        let outcome = self.check(&binding);
        self.ctx.record(binding.span, outcome);
    }
}

impl<'a> Visit<'a> for NoRenameDefault<'_, '_> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if let Some(specifiers) = it.specifiers.as_ref() {
            specifiers
                .iter()
                .filter_map(|spec| import_binding::extract(spec, &it.source))
                .for_each(|binding| self.check_and_record(binding));
        }
        walk::walk_import_declaration(self, it);
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if self.options.commonjs
            && let Some(binding) = require_binding::extract(it)
        {
            self.check_and_record(binding);
        }
        walk::walk_variable_declarator(self, it);
    }
}
