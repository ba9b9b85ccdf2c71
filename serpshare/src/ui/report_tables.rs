//! Table rendering of an `AnalysisReport`.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use std::io::{self, Write};

use serpshare_core::{AggregatedDomain, AnalysisReport, CandidateRow, FeatureImportance};

use crate::ui::output_format::write_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn align_numeric_columns(table: &mut Table, from: usize) {
    let count = table.column_count();
    for index in from..count {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Per-result view: domain, rank, logit, share, volume.
pub fn candidate_table(rows: &[CandidateRow]) -> Table {
    let mut table = new_table(&["domain", "rank_absolute", "logit", "domain_share", "ai_potential_volume"]);
    for row in rows {
        table.add_row(vec![
            row.domain.clone(),
            row.rank_absolute.to_string(),
            format!("{:.2}", row.logit),
            format!("{:.3}", row.domain_share),
            format!("{:.1}", row.ai_potential_volume),
        ]);
    }
    align_numeric_columns(&mut table, 1);
    table
}

/// Per-domain view.
pub fn domain_table(rows: &[AggregatedDomain]) -> Table {
    let mut table = new_table(&[
        "domain",
        "appearances",
        "best_rank",
        "worst_rank",
        "avg_rank",
        "avg_logit",
        "max_logit",
        "total_domain_share",
        "total_ai_volume",
    ]);
    for row in rows {
        table.add_row(vec![
            row.domain.clone(),
            row.appearances.to_string(),
            row.best_rank.to_string(),
            row.worst_rank.to_string(),
            format!("{:.1}", row.avg_rank),
            format!("{:.2}", row.avg_logit),
            format!("{:.2}", row.max_logit),
            format!("{:.3}", row.total_domain_share),
            format!("{:.1}", row.total_ai_volume),
        ]);
    }
    align_numeric_columns(&mut table, 1);
    table
}

pub fn importance_table(rows: &[FeatureImportance]) -> Table {
    let mut table = new_table(&["feature", "lambda", "enabled"]);
    for row in rows {
        table.add_row(vec![
            row.feature.clone(),
            row.lambda.to_string(),
            if row.enabled { "yes".to_string() } else { "no".to_string() },
        ]);
    }
    align_numeric_columns(&mut table, 1);
    table
}

/// Writes a colored section title followed by `table`.
pub fn print_section<W: Write>(
    writer: &mut W,
    title: &str,
    table: &Table,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    write_styled(writer, title, ThemeEntry::Header, theme, supports_color)?;
    writeln!(writer)?;
    writeln!(writer, "{}", table)
}

fn summary_line<W: Write>(writer: &mut W, label: &str, value: &str, theme: &ThemeMap, color: bool) -> io::Result<()> {
    write!(writer, "   - ")?;
    write_styled(writer, label, ThemeEntry::SummaryLabel, theme, color)?;
    write!(writer, ": ")?;
    write_styled(writer, value, ThemeEntry::SummaryValue, theme, color)?;
    writeln!(writer)
}

/// Totals, top share and the target domain block.
pub fn print_summary<W: Write>(
    writer: &mut W,
    report: &AnalysisReport,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    write_styled(writer, "Summary", ThemeEntry::Header, theme, supports_color)?;
    writeln!(writer)?;
    summary_line(writer, "Keyword", &report.keyword, theme, supports_color)?;
    summary_line(writer, "Total AI Potential Volume", &format!("{:.1}", report.total_volume), theme, supports_color)?;

    let Some(target) = &report.target_domain else {
        summary_line(writer, "Top domain share", &format!("{:.3}", report.top_share), theme, supports_color)?;
        let top_volume = report.top_share * report.total_volume;
        summary_line(writer, "Top domain potential", &format!("{:.1}", top_volume), theme, supports_color)?;
        return Ok(());
    };

    write!(writer, "   - ")?;
    write_styled(writer, "Target domain", ThemeEntry::SummaryLabel, theme, supports_color)?;
    write!(writer, ": ")?;
    write_styled(writer, target, ThemeEntry::TargetDomain, theme, supports_color)?;
    writeln!(writer)?;

    match &report.target_domain_stats {
        Some(stats) => {
            summary_line(writer, "Appearances", &stats.appearances.to_string(), theme, supports_color)?;
            summary_line(
                writer,
                "Rank range",
                &format!("{}-{} (avg {:.1})", stats.best_rank, stats.worst_rank, stats.avg_rank),
                theme,
                supports_color,
            )?;
            summary_line(writer, "Domain share", &format!("{:.3}", stats.total_domain_share), theme, supports_color)?;
            summary_line(writer, "AI potential volume", &format!("{:.1}", stats.total_ai_volume), theme, supports_color)?;
            summary_line(
                writer,
                "Logit (min/avg/max)",
                &format!("{:.2} / {:.2} / {:.2}", stats.min_logit, stats.avg_logit, stats.max_logit),
                theme,
                supports_color,
            )
        }
        None => summary_line(writer, "Domain share", "0.000 (not in SERP)", theme, supports_color),
    }
}
