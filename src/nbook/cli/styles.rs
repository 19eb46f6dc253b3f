use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static PROMPT: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());

/// Applies `style` only when colors are wanted, so tests can render plain text.
pub fn paint(style: &Style, text: &str, use_color: bool) -> String {
    if use_color {
        style.apply_to(text).force_styling(true).to_string()
    } else {
        text.to_string()
    }
}
