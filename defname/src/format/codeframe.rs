use crate::diagnostic::LineIndex;

use super::colors::Palette;

/// The source line at `line` with a pointer, and a caret under `column`.
pub fn render_code_frame(
    source: &LineIndex,
    line: usize,
    column: usize,
    palette: Palette,
) -> Vec<String> {
    let Some(text) = source.line_text(line) else {
        return vec![];
    };
    let num = line.to_string();
    let caret_offset = text
        .chars()
        .take(column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect::<String>();
    vec![
        format!(
            "  {} {} {} {}",
            palette.red(">"),
            palette.dim(&num),
            palette.dim("|"),
            palette.yellow(text)
        ),
        format!(
            "    {} {} {}{}",
            " ".repeat(num.len()),
            palette.dim("|"),
            caret_offset,
            palette.red("^")
        ),
    ]
}
