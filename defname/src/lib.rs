pub mod args;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod export_map;
pub mod format;
pub mod lint;
pub mod profile;
pub mod rule;

#[cfg(test)]
mod args_test;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
