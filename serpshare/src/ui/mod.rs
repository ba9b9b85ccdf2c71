//! Terminal rendering: themes, message helpers and report tables.

pub mod output_format;
pub mod report_tables;
pub mod theme;
