pub mod ansi;
pub mod codeframe;
pub mod colors;
pub mod json;
pub mod pretty;
pub mod terminal;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}
