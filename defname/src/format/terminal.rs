use std::io::IsTerminal;

pub fn is_output_terminal() -> bool {
    std::io::stdout().is_terminal() || std::io::stderr().is_terminal()
}
