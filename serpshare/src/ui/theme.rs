//! Module for managing the application's command-line interface (CLI) theme.
//!
//! Users can recolor the logical parts of the output with a YAML file mapping
//! each entry to a 16-color ANSI name. Entries the file leaves out keep their
//! default color.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles above each table.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// The target domain when it is highlighted in a summary.
    TargetDomain,
    /// Labels in the summary block.
    SummaryLabel,
    /// Values in the summary block.
    SummaryValue,
}

const ALL_ENTRIES: [ThemeEntry; 8] = [
    ThemeEntry::Header,
    ThemeEntry::Success,
    ThemeEntry::Info,
    ThemeEntry::Warn,
    ThemeEntry::Error,
    ThemeEntry::TargetDomain,
    ThemeEntry::SummaryLabel,
    ThemeEntry::SummaryValue,
];

/// A named ANSI color used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    /// Converts the color into its `owo_colors::AnsiColors` counterpart.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }
}

/// Style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn named(color: &str) -> Self {
        ThemeStyle { fg: Some(ThemeColor::Named(color.to_string())) }
    }

    /// Loads a theme file and fills missing entries from the default theme.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns the built-in color mapping.
    pub fn default_theme_map() -> ThemeMap {
        let mut theme: ThemeMap = ALL_ENTRIES.iter().map(|e| (*e, Self::named("white"))).collect();
        theme.insert(ThemeEntry::Header, Self::named("brightcyan"));
        theme.insert(ThemeEntry::Success, Self::named("green"));
        theme.insert(ThemeEntry::Info, Self::named("brightblack"));
        theme.insert(ThemeEntry::Warn, Self::named("yellow"));
        theme.insert(ThemeEntry::Error, Self::named("red"));
        theme.insert(ThemeEntry::TargetDomain, Self::named("brightgreen"));
        theme
    }
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}
