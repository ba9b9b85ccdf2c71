//! Colored message helpers shared by the commands.
//!
//! Color is only emitted when the caller says the destination supports it,
//! so redirected output stays plain.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes `text` in the color configured for `entry`.
pub fn write_styled<W: Write + ?Sized>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let color = theme.get(&entry).and_then(|style| style.fg.as_ref());
    match color {
        Some(color) if supports_color => write!(writer, "{}", text.color(color.to_ansi_color())),
        _ => write!(writer, "{}", text),
    }
}

fn print_message<W: Write + ?Sized>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    write_styled(writer, &format!("{}{}", prefix, msg), entry, theme, supports_color)?;
    writeln!(writer)
}

pub fn print_info_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "Warning: ", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "Error: ", msg, ThemeEntry::Error, theme, supports_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_output_without_color_support() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_error_message(&mut out, "boom", &theme, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error: boom\n");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_success_message(&mut out, "done", &theme, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("done"));
    }
}
