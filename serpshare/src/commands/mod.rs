//! Command implementations and the helpers they share.

pub mod analyze;
pub mod importance;

use anyhow::Result;
use is_terminal::IsTerminal;
use log::debug;
use std::io;

use serpshare_core::{merge_config, ModelConfig, ResolvedConfig, WeightsConfig};

use crate::cli::ModelArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Resolves the model settings: built-in defaults, then `--config`, then flags.
pub fn resolve_model_config(args: &ModelArgs) -> Result<ResolvedConfig> {
    let mut config = ModelConfig::load_default()?;

    if let Some(path) = &args.config {
        config = merge_config(config, Some(ModelConfig::load_from_file(path)?));
    }

    let lambdas = match &args.weights {
        Some(values) => Some(
            <[f64; 5]>::try_from(values.as_slice())
                .map_err(|_| anyhow::anyhow!("Must provide exactly 5 weight values, got {}", values.len()))?,
        ),
        None => None,
    };
    let flags = ModelConfig {
        weights: lambdas.map(WeightsConfig::from_lambdas).unwrap_or_default(),
        visibility_decay: args.alpha,
        max_features: None,
    };
    config = merge_config(config, Some(flags));

    let resolved = config.resolve()?;
    debug!("Resolved model configuration: {:?}", resolved);
    Ok(resolved)
}
