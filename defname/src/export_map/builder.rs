use std::path::Path;

use indexmap::IndexMap;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, AssignmentTarget, BindingPattern, BindingPatternKind, Declaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression, ModuleExportName, Program,
    Statement,
};
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::{
    DefaultExportDeclaration, ExportEntry, ExportMap, ExportSpecifierRef, ModuleError,
};

pub fn build_from_source(path: &Path, source_text: &str) -> ExportMap {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_default();
    let parsed = Parser::new(&allocator, source_text, source_type).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let mut errors = parsed
            .errors
            .iter()
            .map(|e| ModuleError::new(e.to_string()))
            .collect::<Vec<_>>();
        if errors.is_empty() {
            errors.push(ModuleError::new("parser aborted"));
        }
        return ExportMap::failed(path, errors);
    }
    build_from_program(path, &parsed.program)
}

pub fn build_from_program(path: &Path, program: &Program<'_>) -> ExportMap {
    let mut exports: IndexMap<String, ExportEntry> = IndexMap::new();
    for statement in &program.body {
        match statement {
            Statement::ExportDefaultDeclaration(it) => {
                exports.insert(
                    "default".to_string(),
                    ExportEntry::DefaultDeclaration(convert_default_kind(&it.declaration)),
                );
            }
            Statement::ExportNamedDeclaration(it) => record_named(it, &mut exports),
            Statement::ExportAllDeclaration(it) => {
                if let Some(name) = it.exported.as_ref().map(module_export_name_as_str) {
                    exports.insert(name.to_string(), ExportEntry::Namespace);
                }
            }
            _ => {}
        }
    }
    ExportMap {
        path: path.to_path_buf(),
        exports,
        errors: vec![],
    }
}

fn record_named(it: &ExportNamedDeclaration<'_>, exports: &mut IndexMap<String, ExportEntry>) {
    if let Some(decl) = &it.declaration {
        declared_names(decl).into_iter().for_each(|name| {
            exports.insert(name, ExportEntry::Named { specifiers: vec![] });
        });
    }

    let specifiers = it
        .specifiers
        .iter()
        .map(|spec| ExportSpecifierRef {
            local: module_export_name_as_str(&spec.local).to_string(),
            exported: module_export_name_as_str(&spec.exported).to_string(),
        })
        .collect::<Vec<_>>();
    specifiers.iter().for_each(|spec| {
        exports.insert(
            spec.exported.clone(),
            ExportEntry::Named {
                specifiers: specifiers.clone(),
            },
        );
    });
}

fn declared_names(decl: &Declaration<'_>) -> Vec<String> {
    let mut out = vec![];
    match decl {
        Declaration::VariableDeclaration(var) => var
            .declarations
            .iter()
            .for_each(|declarator| collect_pattern_names(&declarator.id, &mut out)),
        Declaration::FunctionDeclaration(func) => {
            out.extend(func.id.as_ref().map(|id| id.name.to_string()));
        }
        Declaration::ClassDeclaration(class) => {
            out.extend(class.id.as_ref().map(|id| id.name.to_string()));
        }
        Declaration::TSTypeAliasDeclaration(alias) => out.push(alias.id.name.to_string()),
        Declaration::TSInterfaceDeclaration(iface) => out.push(iface.id.name.to_string()),
        Declaration::TSEnumDeclaration(en) => out.push(en.id.name.to_string()),
        _ => {}
    }
    out
}

fn collect_pattern_names(pattern: &BindingPattern<'_>, out: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => out.push(ident.name.to_string()),
        BindingPatternKind::ObjectPattern(obj) => {
            obj.properties
                .iter()
                .for_each(|prop| collect_pattern_names(&prop.value, out));
            if let Some(rest) = &obj.rest {
                collect_pattern_names(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(arr) => {
            arr.elements
                .iter()
                .flatten()
                .for_each(|el| collect_pattern_names(el, out));
            if let Some(rest) = &arr.rest {
                collect_pattern_names(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => collect_pattern_names(&assign.left, out),
    }
}

fn convert_default_kind(kind: &ExportDefaultDeclarationKind<'_>) -> DefaultExportDeclaration {
    match kind {
        ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
            DefaultExportDeclaration::Function {
                name: func.id.as_ref().map(|id| id.name.to_string()),
            }
        }
        ExportDefaultDeclarationKind::ClassDeclaration(class) => DefaultExportDeclaration::Class {
            name: class.id.as_ref().map(|id| id.name.to_string()),
        },
        ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => {
            DefaultExportDeclaration::Unsupported {
                kind: "interface declaration",
            }
        }
        _ => kind
            .as_expression()
            .map(convert_expression)
            .unwrap_or(DefaultExportDeclaration::Unsupported {
                kind: "declaration",
            }),
    }
}

fn convert_expression(expr: &Expression<'_>) -> DefaultExportDeclaration {
    match strip_parens(expr) {
        Expression::Identifier(ident) => DefaultExportDeclaration::Identifier {
            name: ident.name.to_string(),
        },
        Expression::AssignmentExpression(assign) => DefaultExportDeclaration::Assignment {
            target: match &assign.left {
                AssignmentTarget::AssignmentTargetIdentifier(ident) => Some(ident.name.to_string()),
                _ => None,
            },
        },
        Expression::CallExpression(call) => DefaultExportDeclaration::Call {
            first_argument: call
                .arguments
                .first()
                .map(|arg| Box::new(convert_argument(arg))),
        },
        other => DefaultExportDeclaration::Unsupported {
            kind: expression_kind_label(other),
        },
    }
}

fn convert_argument(arg: &Argument<'_>) -> DefaultExportDeclaration {
    if let Argument::SpreadElement(_) = arg {
        return DefaultExportDeclaration::Unsupported {
            kind: "spread element",
        };
    }
    arg.as_expression()
        .map(convert_expression)
        .unwrap_or(DefaultExportDeclaration::Unsupported { kind: "argument" })
}

fn strip_parens<'e, 'a>(mut expr: &'e Expression<'a>) -> &'e Expression<'a> {
    while let Expression::ParenthesizedExpression(inner) = expr {
        expr = &inner.expression;
    }
    expr
}

fn expression_kind_label(expr: &Expression<'_>) -> &'static str {
    match expr {
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegExpLiteral(_)
        | Expression::TemplateLiteral(_) => "literal",
        Expression::ObjectExpression(_) => "object expression",
        Expression::ArrayExpression(_) => "array expression",
        Expression::ArrowFunctionExpression(_) => "arrow function",
        Expression::FunctionExpression(_) => "function expression",
        Expression::ClassExpression(_) => "class expression",
        Expression::BinaryExpression(_) | Expression::LogicalExpression(_) => "binary expression",
        Expression::StaticMemberExpression(_)
        | Expression::ComputedMemberExpression(_)
        | Expression::PrivateFieldExpression(_) => "member expression",
        Expression::NewExpression(_) => "new expression",
        _ => "expression",
    }
}

pub(crate) fn module_export_name_as_str<'a>(name: &ModuleExportName<'a>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(it) => it.name.as_str(),
        ModuleExportName::IdentifierReference(it) => it.name.as_str(),
        ModuleExportName::StringLiteral(it) => it.value.as_str(),
    }
}
