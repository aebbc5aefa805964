pub mod config;
pub mod expired;
pub mod retain;

use anyhow::Context;
use clap::Args;
use retainer_core::config::Config;
use retainer_core::loader::DataSet;
use retainer_core::RetentionOptions;
use std::path::{Path, PathBuf};

/// Inputs shared by every command that runs the retention engine.
#[derive(Args, Debug, Clone)]
pub struct RetentionArgs {
    /// Releases to keep per project/environment pair (overrides retainer.yaml)
    #[arg(long, short = 'k', allow_negative_numbers = true)]
    pub keep: Option<i64>,

    /// Directory holding Projects.json, Releases.json, Environments.json and Deployments.json
    #[arg(long, env = "RETAINER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl RetentionArgs {
    /// Merge flags over `retainer.yaml`, load the data set and validate it.
    pub fn load_options(&self, root: &Path) -> anyhow::Result<RetentionOptions> {
        let config = Config::load(root).context("failed to load config")?;
        let keep = self.keep.unwrap_or(config.retention.keep);
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => config.data_dir(root),
        };

        tracing::debug!(keep, dir = %dir.display(), "resolved retention inputs");

        let set = DataSet::load(&dir, &config.data)
            .with_context(|| format!("failed to load data from {}", dir.display()))?;
        set.into_options(keep).context("invalid retention options")
    }
}
