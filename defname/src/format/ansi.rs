pub fn bold(text: &str) -> String {
    format!("\u{1b}[1m{text}\u{1b}[22m")
}

pub fn dim(text: &str) -> String {
    format!("\u{1b}[2m{text}\u{1b}[22m")
}

pub fn red(text: &str) -> String {
    format!("\u{1b}[31m{text}\u{1b}[39m")
}

pub fn yellow(text: &str) -> String {
    format!("\u{1b}[33m{text}\u{1b}[39m")
}

pub fn gray(text: &str) -> String {
    format!("\u{1b}[90m{text}\u{1b}[39m")
}

pub fn underline(text: &str) -> String {
    format!("\u{1b}[4m{text}\u{1b}[24m")
}
