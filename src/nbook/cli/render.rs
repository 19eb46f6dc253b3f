//! # Rendering
//!
//! Plain functions from library values to strings. Width math is
//! Unicode-aware so wide titles keep the columns aligned; color is applied
//! last and can be switched off for tests and pipes.

use super::styles::{paint, HEADER, INDEX, MUTED, TITLE};
use colored::Colorize;
use nbook::notebook::{Column, Notebook, TableModel};
use nbook::session::MessageLevel;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TITLE_WIDTH: usize = 30;
const INDEX_WIDTH: usize = 5;

/// One line per note: 1-based row, title column, then as much of the text as fits.
pub fn render_table(model: &dyn TableModel, use_color: bool) -> String {
    if model.row_count() == 0 {
        return format!("{}\n", paint(&MUTED, "No notes yet.", use_color));
    }

    let text_width = LINE_WIDTH.saturating_sub(INDEX_WIDTH + TITLE_WIDTH + 2);
    let mut out = String::new();

    let header = format!(
        "{}{}  {}",
        " ".repeat(INDEX_WIDTH),
        pad_to_width(model.header(Column::Title.index()).unwrap_or(""), TITLE_WIDTH),
        model.header(Column::Text.index()).unwrap_or("")
    );
    out.push_str(&paint(&HEADER, header.trim_end(), use_color));
    out.push('\n');

    for row in 0..model.row_count() {
        let index = format!("{:>3}. ", row + 1);
        let title = single_line(model.cell(row, Column::Title.index()).unwrap_or(""));
        let text = single_line(model.cell(row, Column::Text.index()).unwrap_or(""));

        let title = pad_to_width(&truncate_to_width(&title, TITLE_WIDTH), TITLE_WIDTH);
        let text = truncate_to_width(&text, text_width);

        out.push_str(&format!(
            "{}{}  {}\n",
            paint(&INDEX, &index, use_color),
            paint(&TITLE, &title, use_color),
            text
        ));
    }
    out
}

/// Every note in full, separated by a rule.
pub fn render_full(notebook: &Notebook, use_color: bool) -> String {
    if notebook.is_empty() {
        return format!("{}\n", paint(&MUTED, "No notes yet.", use_color));
    }

    let mut out = String::new();
    for (i, note) in notebook.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        out.push_str(&format!(
            "{} {}\n",
            paint(&INDEX, &format!("{}.", i + 1), use_color),
            paint(&TITLE, note.title(), use_color)
        ));
        out.push_str("--------------------------------\n");
        out.push_str(note.text());
        out.push('\n');
    }
    out
}

pub fn render_message(level: MessageLevel, message: &str, use_color: bool) -> String {
    if !use_color {
        return message.to_string();
    }
    match level {
        MessageLevel::Info => message.dimmed().to_string(),
        MessageLevel::Success => message.green().to_string(),
        MessageLevel::Warning => message.yellow().to_string(),
        MessageLevel::Error => message.red().to_string(),
    }
}

/// Errors go to stderr, everything else to stdout.
pub fn print_message(level: MessageLevel, message: &str) {
    let use_color = colored::control::SHOULD_COLORIZE.should_colorize();
    let line = render_message(level, message, use_color);
    match level {
        MessageLevel::Error => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

fn single_line(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbook::model::Note;

    fn notebook(notes: &[(&str, &str)]) -> Notebook {
        notes.iter().map(|(t, b)| Note::new(*t, *b)).collect()
    }

    #[test]
    fn test_render_empty_table() {
        let output = render_table(&Notebook::new(), false);
        assert_eq!(output.trim(), "No notes yet.");
    }

    #[test]
    fn test_render_table_rows_are_one_based() {
        let nb = notebook(&[("Groceries", "Milk"), ("Call", "Mom")]);
        let output = render_table(&nb, false);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Title") && lines[0].contains("Text"));
        assert!(lines[1].starts_with("  1. Groceries"));
        assert!(lines[1].ends_with("Milk"));
        assert!(lines[2].starts_with("  2. Call"));
    }

    #[test]
    fn test_render_table_flattens_multiline_text() {
        let nb = notebook(&[("List", "eggs\nbread")]);
        let output = render_table(&nb, false);
        assert!(output.contains("eggs bread"));
    }

    #[test]
    fn test_long_title_is_truncated_and_columns_align() {
        let long = "x".repeat(TITLE_WIDTH + 10);
        let nb = notebook(&[(long.as_str(), "a"), ("short", "b")]);
        let output = render_table(&nb, false);
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[1].contains('…'));
        let before = |line: &str, cell: &str| line.split(cell).next().unwrap_or("").width();
        assert_eq!(before(lines[1], "  a"), before(lines[2], "  b"));
    }

    #[test]
    fn test_truncate_wide_chars() {
        let s = truncate_to_width("日本語のタイトル", 7);
        assert!(s.width() <= 7);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn test_truncate_leaves_fitting_text() {
        assert_eq!(truncate_to_width("fits", 4), "fits");
    }

    #[test]
    fn test_render_full() {
        let nb = notebook(&[("One", "first"), ("Two", "second")]);
        let output = render_full(&nb, false);
        assert!(output.starts_with("1. One\n"));
        assert!(output.contains("================================"));
        assert!(output.contains("2. Two\n--------------------------------\nsecond\n"));
    }

    #[test]
    fn test_render_message_plain() {
        assert_eq!(render_message(MessageLevel::Error, "boom", false), "boom");
    }
}
