//! `analyze` command: loads query data, runs the attribution pipeline and
//! renders the report.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};

use serpshare_core::{analyze, load_query, AnalysisOptions, AnalysisReport, SortOrder};

use crate::cli::{AnalyzeCommand, SortChoice, ViewChoice};
use crate::commands::{info_msg, resolve_model_config, warn_msg};
use crate::ui::output_format::print_success_message;
use crate::ui::report_tables::{candidate_table, domain_table, importance_table, print_section, print_summary};
use crate::ui::theme::ThemeMap;

pub fn run_analyze(cmd: &AnalyzeCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    info!("Starting analyze for {}", cmd.input.display());
    let config = resolve_model_config(&cmd.model)?;
    let query = load_query(&cmd.input)?;

    if !quiet && !cmd.json {
        info_msg(
            format!(
                "Loaded '{}': AI volume {}, {} SERP results.",
                query.keyword,
                query.volume(),
                query.candidates.len()
            ),
            theme,
        );
    }

    let options = AnalysisOptions {
        target_domain: cmd.domain.clone(),
        top: Some(cmd.top),
        sort: match cmd.sort {
            SortChoice::Volume => SortOrder::Volume,
            SortChoice::Rank => SortOrder::Rank,
        },
    };
    let report = analyze(&query, &config, &options)
        .with_context(|| format!("Analysis failed for keyword '{}'", query.keyword))?;
    debug!("Report has {} candidate rows and {} domain rows.", report.candidates.len(), report.domains.len());

    if let (Some(target), None) = (&report.target_domain, &report.target_domain_stats) {
        if !quiet {
            warn_msg(format!("Domain '{}' does not appear in the SERP for '{}'.", target, report.keyword), theme);
        }
    }

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    if cmd.json {
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to serialize report")?;
        writeln!(writer)?;
        return Ok(());
    }

    render_tables(&mut writer, cmd, &report, theme, supports_color)?;
    if !quiet {
        print_success_message(&mut io::stderr(), "Analysis completed.", theme, io::stderr().is_terminal())?;
    }
    Ok(())
}

fn render_tables<W: Write>(
    writer: &mut W,
    cmd: &AnalyzeCommand,
    report: &AnalysisReport,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    if cmd.show_importance {
        print_section(writer, "Feature Importance Weights", &importance_table(&report.feature_importance), theme, supports_color)?;
    }
    if matches!(cmd.view, ViewChoice::Normal | ViewChoice::Both) {
        let title = format!("Top {} Results by {}", report.candidates.len(), sort_label(cmd.sort));
        print_section(writer, &title, &candidate_table(&report.candidates), theme, supports_color)?;
    }
    if matches!(cmd.view, ViewChoice::Aggregated | ViewChoice::Both) {
        let title = format!("Top {} Domains by AI Potential Volume", report.domains.len());
        print_section(writer, &title, &domain_table(&report.domains), theme, supports_color)?;
    }
    print_summary(writer, report, theme, supports_color)?;
    Ok(())
}

fn sort_label(sort: SortChoice) -> &'static str {
    match sort {
        SortChoice::Volume => "AI Potential Volume",
        SortChoice::Rank => "Rank",
    }
}
