use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "retainer.yaml";

pub const DATA_DIR: &str = "data";
pub const PROJECTS_FILE: &str = "Projects.json";
pub const RELEASES_FILE: &str = "Releases.json";
pub const ENVIRONMENTS_FILE: &str = "Environments.json";
pub const DEPLOYMENTS_FILE: &str = "Deployments.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured data directory against the project root.
/// Absolute paths are returned unchanged.
pub fn data_dir(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
