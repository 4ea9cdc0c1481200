use std::path::PathBuf;

use clap::Parser;

use crate::config::DefnameConfig;
use crate::format::OutputFormat;
use crate::rule::RuleOptions;

#[derive(Debug, Clone, Parser, Default)]
#[command(
    name = "defname",
    version,
    about = "Flag imports that rename a module's default export"
)]
pub struct Cli {
    /// Files or directories to lint.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Also check `require` bindings.
    #[arg(
        long = "commonjs",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub commonjs: Option<bool>,

    /// Treat bare identifier and assignment default exports as named.
    #[arg(
        long = "prevent-renaming-bindings",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub prevent_renaming_bindings: Option<bool>,

    /// Config file to use instead of the discovered one.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Print the rule descriptor as JSON and exit.
    #[arg(long = "print-rule")]
    pub print_rule: bool,
}

impl Cli {
    /// Config-file options with command-line overrides applied.
    pub fn rule_options(&self, cfg: &DefnameConfig) -> RuleOptions {
        let base = cfg.rule_options();
        RuleOptions {
            commonjs: self.commonjs.unwrap_or(base.commonjs),
            prevent_renaming_bindings: self
                .prevent_renaming_bindings
                .unwrap_or(base.prevent_renaming_bindings),
        }
    }
}
