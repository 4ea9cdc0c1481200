use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;

use defname::args::Cli;
use defname::config::{
    build_exclude_set, discover_config_path, find_project_root, load_config, load_config_from_path,
};
use defname::export_map::FsExportMapResolver;
use defname::export_map::fs_resolver::SkipReason;
use defname::format::OutputFormat;
use defname::format::colors::Palette;
use defname::lint::{LintRun, LintSettings, lint_paths};
use defname::rule::CheckOutcome;

fn main() {
    let cli = Cli::parse();
    if cli.print_rule {
        match serde_json::to_string_pretty(&defname::rule::meta()) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("defname: {err}");
                std::process::exit(2);
            }
        }
        return;
    }
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_root = find_project_root(&cwd);
    let config_path = cli
        .config
        .clone()
        .or_else(|| discover_config_path(&project_root));
    let loaded = match cli.config.as_deref() {
        Some(path) => load_config_from_path(path),
        None => load_config(&project_root),
    };
    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("defname: {err}");
            return 2;
        }
    };

    let options = cli.rule_options(&cfg);
    let exclude = match build_exclude_set(cfg.exclude.as_deref().unwrap_or_default()) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("defname: {err}");
            return 2;
        }
    };
    let resolver = FsExportMapResolver::new(&project_root);
    let resolver = if cli.verbose {
        resolver.recording_skips()
    } else {
        resolver
    };
    let ignore = cfg.ignore.as_deref().unwrap_or_default();
    let mut resolver = match resolver.with_ignore_patterns(ignore) {
        Ok(resolver) => resolver,
        Err(err) => {
            eprintln!("defname: {err}");
            return 2;
        }
    };

    if cli.verbose {
        eprintln!(
            "defname {}: project_root={} config={} commonjs={} prevent_renaming_bindings={}",
            defname::version(),
            project_root.to_string_lossy(),
            config_path
                .as_deref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "<none>".to_string()),
            options.commonjs,
            options.prevent_renaming_bindings
        );
    }

    let settings = LintSettings {
        options,
        exclude,
        project_root: Some(project_root.clone()),
    };
    let run = lint_paths(&cli.paths, &settings, &mut resolver);
    run.failures
        .iter()
        .for_each(|err| eprintln!("defname: {err}"));
    if cli.verbose {
        print_verbose_summary(&run, &resolver);
    }

    match cli.format {
        OutputFormat::Pretty => println!(
            "{}",
            defname::format::pretty::render_pretty(&run, Palette::detect(), Some(&cwd))
        ),
        OutputFormat::Json => println!("{}", defname::format::json::render_json(&run)),
    }

    if !run.failures.is_empty() {
        2
    } else if run.problem_count() > 0 {
        1
    } else {
        0
    }
}

fn print_verbose_summary(run: &LintRun, resolver: &FsExportMapResolver) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    run.reports
        .iter()
        .flat_map(|report| report.outcomes.iter())
        .for_each(|(_, outcome)| *counts.entry(outcome_label(outcome)).or_default() += 1);
    eprintln!(
        "defname: linted {} file(s), {} binding(s) checked",
        run.reports.len(),
        counts.values().sum::<usize>()
    );
    counts
        .iter()
        .for_each(|(label, count)| eprintln!("defname:   {label}: {count}"));
    resolver.skipped().iter().for_each(|skipped| {
        let reason = match &skipped.reason {
            SkipReason::Unresolved => "unresolved".to_string(),
            SkipReason::Ignored(path) => format!("ignored ({})", path.to_string_lossy()),
            SkipReason::NotSource(path) => format!("not a source file ({})", path.to_string_lossy()),
        };
        eprintln!(
            "defname: skipped {:?} from {}: {reason}",
            skipped.specifier,
            skipped.importing_file.to_string_lossy()
        );
    });
}

fn outcome_label(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Reported => "reported".to_string(),
        CheckOutcome::NameMatch => "name matches".to_string(),
        CheckOutcome::Unresolvable => "module unresolvable".to_string(),
        CheckOutcome::ModuleErrors => "module has errors".to_string(),
        CheckOutcome::NoDefaultExport => "no default export".to_string(),
        CheckOutcome::UndeterminedName { form } => format!("name undetermined ({form})"),
    }
}
