//! `importance` command: prints the weights the model would use.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use serpshare_core::AttributionModel;

use crate::cli::ModelArgs;
use crate::commands::resolve_model_config;
use crate::ui::report_tables::{importance_table, print_section};
use crate::ui::theme::ThemeMap;

pub fn run_importance(args: &ModelArgs, theme: &ThemeMap) -> Result<()> {
    let config = resolve_model_config(args)?;
    let model = AttributionModel::new(config.weights);

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    print_section(
        &mut writer,
        "Feature Importance Weights",
        &importance_table(&model.feature_importance()),
        theme,
        supports_color,
    )?;
    writeln!(writer, "visibility decay (alpha): {}", config.alpha)?;
    Ok(())
}
