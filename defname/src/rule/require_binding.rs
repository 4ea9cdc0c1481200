use oxc_ast::ast::{
    Argument, BindingPattern, BindingPatternKind, BindingProperty, Expression, PropertyKey,
    VariableDeclarator,
};
use oxc_span::Span;

use super::{Binding, BindingForm};

/// `const X = require('…')` and `const { default: X } = require('…')`.
///
/// Anything else is skipped: a non-`require` initializer, an argument count other than
/// one, a non-string argument, or a pattern without a `default` key.
pub fn extract<'s>(declarator: &'s VariableDeclarator<'_>) -> Option<Binding<'s>> {
    let init = declarator.init.as_ref()?;
    let (target, target_span) = require_string_specifier(init)?;
    let (local, form) = match &declarator.id.kind {
        BindingPatternKind::BindingIdentifier(ident) => {
            (ident.name.as_str(), BindingForm::RequireFull)
        }
        BindingPatternKind::ObjectPattern(obj) => {
            let property = obj
                .properties
                .iter()
                .find(|prop| property_key_text(prop) == Some("default"))?;
            (
                pattern_local_name(&property.value)?,
                BindingForm::RequireDestructured,
            )
        }
        _ => return None,
    };
    Some(Binding {
        local,
        form,
        span: declarator.span,
        target,
        target_span,
    })
}

fn require_string_specifier<'s>(init: &'s Expression<'_>) -> Option<(&'s str, Span)> {
    let Expression::CallExpression(call) = init else {
        return None;
    };
    let is_require = matches!(
        &call.callee,
        Expression::Identifier(ident) if ident.name.as_str() == "require"
    );
    if !is_require || call.arguments.len() != 1 {
        return None;
    }
    match call.arguments.first()? {
        Argument::StringLiteral(lit) => Some((lit.value.as_str(), lit.span)),
        _ => None,
    }
}

fn property_key_text<'s>(property: &'s BindingProperty<'_>) -> Option<&'s str> {
    match &property.key {
        PropertyKey::StaticIdentifier(ident) if !property.computed => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

fn pattern_local_name<'s>(pattern: &'s BindingPattern<'_>) -> Option<&'s str> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.as_str()),
        BindingPatternKind::AssignmentPattern(assign) => match &assign.left.kind {
            BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.as_str()),
            _ => None,
        },
        _ => None,
    }
}
