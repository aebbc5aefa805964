use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use retainer_core::config::{Config, WarnLevel};
use retainer_core::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (retainer.yaml merged with defaults)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    if json {
        print_json(&config)?;
    } else {
        print!("{}", serde_yaml::to_string(&config)?);
        println!("# data directory: {}", config.data_dir(root).display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let data_dir = config.data_dir(root);
    let mut warnings = config.validate();
    warnings.extend(config.check_data_files(root));
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        let value = serde_json::json!({
            "config": paths::config_path(root),
            "data_dir": data_dir,
            "keep": config.retention.keep,
            "warnings": warnings,
        });
        print_json(&value)?;
    } else {
        println!("Data directory: {}", data_dir.display());
        println!("Releases kept per project/environment: {}", config.retention.keep);
        if warnings.is_empty() {
            println!("Config is valid. All data files present.");
        }
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if errors > 0 {
        anyhow::bail!("config validation found {errors} error(s)");
    }
    Ok(())
}
