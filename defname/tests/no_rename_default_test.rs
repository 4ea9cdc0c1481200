use std::path::{Path, PathBuf};

use defname::config::build_exclude_set;
use defname::export_map::FsExportMapResolver;
use defname::export_map::fs_resolver::SkipReason;
use defname::lint::{LintRun, LintSettings, lint_file, lint_paths};
use defname::rule::{CheckOutcome, RuleOptions};

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn lint_one(root: &Path, rel: &str, options: RuleOptions) -> Vec<String> {
    let mut resolver = FsExportMapResolver::new(root);
    lint_file(&root.join(rel), options, &mut resolver)
        .unwrap()
        .diagnostics
        .into_iter()
        .map(|d| d.message)
        .collect()
}

fn commonjs() -> RuleOptions {
    RuleOptions {
        commonjs: true,
        ..RuleOptions::default()
    }
}

#[test]
fn named_function_default_matches_or_reports() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("m.js"), "export default function foo() {}\n");
    write_file(&root.join("ok.js"), "import foo from './m';\n");
    write_file(&root.join("bad.js"), "import bar from './m';\n");

    assert!(lint_one(root, "ok.js", RuleOptions::default()).is_empty());
    assert_eq!(
        lint_one(root, "bad.js", RuleOptions::default()),
        vec!["Caution: `m.js` has a default export `foo`. This imports `foo` as `bar`. Check if you meant to write `import foo from './m'` instead.".to_string()]
    );
}

#[test]
fn message_uses_resolved_basename_not_specifier() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("widgets/index.ts"), "export default class Widget {}\n");
    write_file(&root.join("app.ts"), "import Thing from './widgets';\n");

    assert_eq!(
        lint_one(root, "app.ts", RuleOptions::default()),
        vec!["Caution: `index.ts` has a default export `Widget`. This imports `Widget` as `Thing`. Check if you meant to write `import Widget from './widgets'` instead.".to_string()]
    );
}

#[test]
fn unsupported_expression_is_never_reported() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("m.js"), "export default 1 + 1;\n");
    write_file(
        &root.join("a.js"),
        "import anything from './m';\nconst { default: other } = require('./m');\n",
    );

    assert!(lint_one(root, "a.js", RuleOptions::default()).is_empty());
    assert!(lint_one(root, "a.js", commonjs()).is_empty());
}

#[test]
fn destructured_require_needs_commonjs() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("m.js"), "export default function foo() {}\n");
    write_file(&root.join("a.cjs"), "const { default: bar } = require('./m');\n");

    assert!(lint_one(root, "a.cjs", RuleOptions::default()).is_empty());
    assert_eq!(
        lint_one(root, "a.cjs", commonjs()),
        vec!["Caution: `m.js` has a default export `foo`. This requires `foo` as `bar`. Check if you meant to write `const { default: foo } = require('./m')` instead.".to_string()]
    );
}

#[test]
fn prevent_renaming_bindings_controls_identifier_exports() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(
        &root.join("m.js"),
        "const myLocalVar = 1;\nexport default myLocalVar;\n",
    );
    write_file(&root.join("a.js"), "import somethingElse from './m';\n");
    write_file(&root.join("b.js"), "import myLocalVar from './m';\n");

    let allow = RuleOptions {
        prevent_renaming_bindings: false,
        ..RuleOptions::default()
    };
    assert!(lint_one(root, "a.js", allow).is_empty());
    assert!(lint_one(root, "b.js", allow).is_empty());
    assert_eq!(lint_one(root, "a.js", RuleOptions::default()).len(), 1);
    assert!(lint_one(root, "b.js", RuleOptions::default()).is_empty());
}

#[test]
fn renamed_specifier_export_uses_local_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(
        &root.join("m.js"),
        "function helper() {}\nexport { helper as default };\n",
    );
    write_file(&root.join("a.js"), "import { default as util } from './m';\n");

    assert_eq!(
        lint_one(root, "a.js", RuleOptions::default()),
        vec!["Caution: `m.js` has a default export `helper`. This imports `helper` as `util`. Check if you meant to write `import { default as helper } from './m'` instead.".to_string()]
    );
}

#[test]
fn resolver_errors_are_surfaced_and_suppress_the_check() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("broken.js"), "export default function foo( {\n");
    write_file(&root.join("a.js"), "import bar from './broken';\n");

    let messages = lint_one(root, "a.js", RuleOptions::default());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Parse errors in imported module './broken': "));
    assert!(!messages[0].contains("Caution"));
}

#[test]
fn unresolvable_and_non_source_targets_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("data.json"), "{}\n");
    write_file(
        &root.join("a.js"),
        "import missing from './missing';\nimport data from './data.json';\n",
    );

    let mut resolver = FsExportMapResolver::new(root).recording_skips();
    let report = lint_file(&root.join("a.js"), RuleOptions::default(), &mut resolver).unwrap();
    assert!(report.diagnostics.is_empty());
    assert_eq!(
        report
            .outcomes
            .iter()
            .map(|(_, outcome)| outcome.clone())
            .collect::<Vec<_>>(),
        vec![CheckOutcome::Unresolvable, CheckOutcome::Unresolvable]
    );
    let reasons = resolver
        .skipped()
        .iter()
        .map(|skipped| skipped.reason.clone())
        .collect::<Vec<_>>();
    assert_eq!(reasons[0], SkipReason::Unresolved);
    assert!(matches!(reasons[1], SkipReason::NotSource(_)));
}

#[test]
fn ignore_patterns_skip_matching_modules() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("vendor/lib.js"), "export default function lib() {}\n");
    write_file(&root.join("a.js"), "import other from './vendor/lib';\n");

    let mut resolver = FsExportMapResolver::new(root)
        .recording_skips()
        .with_ignore_patterns(&["/vendor/".to_string()])
        .unwrap();
    let report = lint_file(&root.join("a.js"), RuleOptions::default(), &mut resolver).unwrap();
    assert!(report.diagnostics.is_empty());
    assert!(matches!(
        resolver.skipped()[0].reason,
        SkipReason::Ignored(_)
    ));
}

#[test]
fn invalid_ignore_pattern_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = FsExportMapResolver::new(dir.path()).with_ignore_patterns(&["(".to_string()]);
    assert!(result.is_err());
}

#[test]
fn tsconfig_path_aliases_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(
        &root.join("tsconfig.json"),
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@app/*": ["src/app/*"], }, }, }"#,
    );
    write_file(
        &root.join("src/app/store.ts"),
        "function createStore() {}\nexport default createStore;\n",
    );
    write_file(&root.join("src/main.ts"), "import makeStore from '@app/store';\n");

    assert_eq!(
        lint_one(root, "src/main.ts", RuleOptions::default()),
        vec!["Caution: `store.ts` has a default export `createStore`. This imports `createStore` as `makeStore`. Check if you meant to write `import createStore from '@app/store'` instead.".to_string()]
    );
}

#[test]
fn project_root_absolute_specifiers_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("lib/m.js"), "export default function foo() {}\n");
    write_file(&root.join("src/a.js"), "import bar from '/lib/m';\n");

    assert_eq!(lint_one(root, "src/a.js", RuleOptions::default()).len(), 1);
}

fn messages_of(run: &LintRun) -> Vec<(PathBuf, String)> {
    run.reports
        .iter()
        .flat_map(|report| {
            report
                .diagnostics
                .iter()
                .map(|d| (report.path.clone(), d.message.clone()))
        })
        .collect()
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("m.js"), "export default function foo() {}\n");
    write_file(&root.join("a.js"), "import bar from './m';\n");
    write_file(&root.join("b.js"), "import { default as baz } from './m';\n");

    let settings = LintSettings::default();
    let mut shared = FsExportMapResolver::new(root);
    let first = lint_paths(&[root.to_path_buf()], &settings, &mut shared);
    let second = lint_paths(&[root.to_path_buf()], &settings, &mut shared);
    let mut fresh = FsExportMapResolver::new(root);
    let third = lint_paths(&[root.to_path_buf()], &settings, &mut fresh);

    assert_eq!(first.problem_count(), 2);
    assert_eq!(messages_of(&first), messages_of(&second));
    assert_eq!(messages_of(&first), messages_of(&third));
}

#[test]
fn directory_walk_applies_excludes_and_reports_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = &dunce::canonicalize(dir.path()).unwrap();
    write_file(&root.join("m.js"), "export default function foo() {}\n");
    write_file(&root.join("src/a.js"), "import bar from '../m';\n");
    write_file(&root.join("generated/b.js"), "import baz from '../m';\n");
    write_file(&root.join("src/broken.js"), "import { from '../m';\n");
    write_file(&root.join("README.md"), "# readme\n");

    let settings = LintSettings {
        options: RuleOptions::default(),
        exclude: build_exclude_set(&["generated/**".to_string()]).unwrap(),
        project_root: Some(root.to_path_buf()),
    };
    let mut resolver = FsExportMapResolver::new(root);
    let run = lint_paths(&[root.to_path_buf()], &settings, &mut resolver);

    let linted = run
        .reports
        .iter()
        .map(|report| report.path.strip_prefix(root).unwrap().to_path_buf())
        .collect::<Vec<_>>();
    assert_eq!(linted, vec![PathBuf::from("m.js"), PathBuf::from("src/a.js")]);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.problem_count(), 1);
}

// The only test here that changes the working directory.
#[test]
fn relative_paths_from_the_project_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dunce::canonicalize(dir.path()).unwrap();
    write_file(
        &root.join("tsconfig.json"),
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@app/*": ["src/app/*"] } } }"#,
    );
    write_file(
        &root.join("src/app/store.ts"),
        "export default function createStore() {}\n",
    );
    write_file(&root.join("src/main.ts"), "import makeStore from '@app/store';\n");
    write_file(
        &root.join("generated/b.ts"),
        "import other from '../src/app/store';\n",
    );

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&root).unwrap();
    let settings = LintSettings {
        options: RuleOptions::default(),
        exclude: build_exclude_set(&["generated/**".to_string()]).unwrap(),
        project_root: Some(root.clone()),
    };
    let mut resolver = FsExportMapResolver::new(Path::new(".")).recording_skips();
    let run = lint_paths(&[PathBuf::from(".")], &settings, &mut resolver);
    std::env::set_current_dir(previous).unwrap();

    let linted = run
        .reports
        .iter()
        .map(|report| report.path.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        linted,
        vec![root.join("src/app/store.ts"), root.join("src/main.ts")]
    );
    assert!(resolver.skipped().is_empty(), "{:?}", resolver.skipped());
    assert_eq!(
        messages_of(&run)
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>(),
        vec!["Caution: `store.ts` has a default export `createStore`. This imports `createStore` as `makeStore`. Check if you meant to write `import createStore from '@app/store'` instead.".to_string()]
    );
}

#[test]
fn skips_are_not_kept_unless_requested() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("a.js"), "import missing from './missing';\n");

    let mut resolver = FsExportMapResolver::new(root);
    let report = lint_file(&root.join("a.js"), RuleOptions::default(), &mut resolver).unwrap();
    assert_eq!(report.outcomes[0].1, CheckOutcome::Unresolvable);
    assert!(resolver.skipped().is_empty());
}
