use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::{BindingForm, import_binding, require_binding};

fn import_bindings(source_text: &str) -> Vec<(String, BindingForm, String)> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path("index.mjs").unwrap();
    let parsed = Parser::new(&allocator, source_text, source_type).parse();
    assert!(parsed.errors.is_empty());
    parsed
        .program
        .body
        .iter()
        .filter_map(|statement| match statement {
            Statement::ImportDeclaration(it) => Some(it),
            _ => None,
        })
        .flat_map(|it| {
            it.specifiers
                .iter()
                .flatten()
                .filter_map(|spec| import_binding::extract(spec, &it.source))
                .map(|b| (b.local.to_string(), b.form, b.target.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn require_of(source_text: &str) -> Option<(String, BindingForm, String)> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path("index.cjs").unwrap();
    let parsed = Parser::new(&allocator, source_text, source_type).parse();
    assert!(parsed.errors.is_empty());
    let Some(Statement::VariableDeclaration(decl)) = parsed.program.body.first() else {
        panic!("expected a variable declaration");
    };
    require_binding::extract(&decl.declarations[0])
        .map(|b| (b.local.to_string(), b.form, b.target.to_string()))
}

fn binding(local: &str, form: BindingForm, target: &str) -> (String, BindingForm, String) {
    (local.to_string(), form, target.to_string())
}

#[test]
fn default_specifier() {
    assert_eq!(
        import_bindings("import Foo from './foo';"),
        vec![binding("Foo", BindingForm::ModuleDefault, "./foo")]
    );
}

#[test]
fn named_default_specifier_only_when_imported_is_default() {
    assert_eq!(
        import_bindings("import { default as Foo, bar, baz as qux } from './foo';"),
        vec![binding("Foo", BindingForm::NamedAsDefault, "./foo")]
    );
}

#[test]
fn string_named_default_specifier() {
    assert_eq!(
        import_bindings("import { 'default' as Foo } from './foo';"),
        vec![binding("Foo", BindingForm::NamedAsDefault, "./foo")]
    );
}

#[test]
fn namespace_and_side_effect_imports_are_ignored() {
    assert!(import_bindings("import * as ns from './foo';\nimport './bar';").is_empty());
}

#[test]
fn default_alongside_named() {
    assert_eq!(
        import_bindings("import Foo, { a } from './foo';"),
        vec![binding("Foo", BindingForm::ModuleDefault, "./foo")]
    );
}

#[test]
fn full_require() {
    assert_eq!(
        require_of("const foo = require('./foo');"),
        Some(binding("foo", BindingForm::RequireFull, "./foo"))
    );
}

#[test]
fn destructured_require() {
    assert_eq!(
        require_of("const { default: foo, other } = require('./foo');"),
        Some(binding("foo", BindingForm::RequireDestructured, "./foo"))
    );
    assert_eq!(
        require_of("const { 'default': foo } = require('./foo');"),
        Some(binding("foo", BindingForm::RequireDestructured, "./foo"))
    );
    assert_eq!(
        require_of("const { default: foo = null } = require('./foo');"),
        Some(binding("foo", BindingForm::RequireDestructured, "./foo"))
    );
}

#[test]
fn require_shapes_that_are_skipped() {
    [
        "const foo = load('./foo');",
        "const foo = require('./foo', 1);",
        "const foo = require();",
        "const foo = require(name);",
        "const foo = require(`./foo`);",
        "const foo = require('./foo').bar;",
        "const [foo] = require('./foo');",
        "const { bar } = require('./foo');",
        "const { [key]: foo } = require('./foo');",
        "const { default: { foo } } = require('./foo');",
        "let foo;",
    ]
    .into_iter()
    .for_each(|source_text| {
        assert_eq!(require_of(source_text), None, "{source_text}");
    });
}
