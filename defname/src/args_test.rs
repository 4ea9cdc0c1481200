use clap::Parser;

use crate::args::Cli;
use crate::config::DefnameConfig;
use crate::format::OutputFormat;
use crate::rule::RuleOptions;

#[test]
fn defaults_come_from_config() {
    let cli = Cli::parse_from(["defname"]);
    assert_eq!(cli.paths, vec![std::path::PathBuf::from(".")]);
    assert_eq!(cli.format, OutputFormat::Pretty);
    assert_eq!(
        cli.rule_options(&DefnameConfig::default()),
        RuleOptions::default()
    );

    let cfg = DefnameConfig {
        no_rename_default: Some(RuleOptions {
            commonjs: true,
            prevent_renaming_bindings: false,
        }),
        ..Default::default()
    };
    assert_eq!(
        cli.rule_options(&cfg),
        RuleOptions {
            commonjs: true,
            prevent_renaming_bindings: false,
        }
    );
}

#[test]
fn flags_override_config() {
    let cli = Cli::parse_from([
        "defname",
        "--commonjs",
        "--prevent-renaming-bindings=false",
        "--format",
        "json",
        "src",
    ]);
    assert_eq!(cli.paths, vec![std::path::PathBuf::from("src")]);
    assert_eq!(cli.format, OutputFormat::Json);
    let cfg = DefnameConfig {
        no_rename_default: Some(RuleOptions {
            commonjs: false,
            prevent_renaming_bindings: true,
        }),
        ..Default::default()
    };
    assert_eq!(
        cli.rule_options(&cfg),
        RuleOptions {
            commonjs: true,
            prevent_renaming_bindings: false,
        }
    );
}
