use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// RetentionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Releases to keep per project/environment pair.
    #[serde(default = "default_keep")]
    pub keep: i64,
}

fn default_keep() -> i64 {
    1
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            keep: default_keep(),
        }
    }
}

// ---------------------------------------------------------------------------
// DataConfig
// ---------------------------------------------------------------------------

/// Where the four entity collections are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_projects")]
    pub projects: String,
    #[serde(default = "default_releases")]
    pub releases: String,
    #[serde(default = "default_environments")]
    pub environments: String,
    #[serde(default = "default_deployments")]
    pub deployments: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(paths::DATA_DIR)
}

fn default_projects() -> String {
    paths::PROJECTS_FILE.to_string()
}

fn default_releases() -> String {
    paths::RELEASES_FILE.to_string()
}

fn default_environments() -> String {
    paths::ENVIRONMENTS_FILE.to_string()
}

fn default_deployments() -> String {
    paths::DEPLOYMENTS_FILE.to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            projects: default_projects(),
            releases: default_releases(),
            environments: default_environments(),
            deployments: default_deployments(),
        }
    }
}

impl DataConfig {
    fn file_names(&self) -> [(&'static str, &str); 4] {
        [
            ("projects", self.projects.as_str()),
            ("releases", self.releases.as_str()),
            ("environments", self.environments.as_str()),
            ("deployments", self.deployments.as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub data: DataConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            retention: RetentionConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    /// Load `retainer.yaml` from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn data_dir(&self, root: &Path) -> PathBuf {
        paths::data_dir(root, &self.data.dir)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {} (expected 1)", self.version),
            });
        }

        if self.retention.keep <= 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "retention.keep must be greater than zero, got {}",
                    self.retention.keep
                ),
            });
        }

        for (key, name) in self.data.file_names() {
            if name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("data.{key} has an empty file name"),
                });
            }
        }

        warnings
    }

    /// Warn about data files missing from the resolved data directory.
    /// Loading would fail on the first one reported here.
    pub fn check_data_files(&self, root: &Path) -> Vec<ConfigWarning> {
        let dir = self.data_dir(root);
        self.data
            .file_names()
            .into_iter()
            .filter(|(_, name)| !name.trim().is_empty())
            .filter(|(_, name)| !dir.join(name).is_file())
            .map(|(key, name)| ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "data.{key}: {} does not exist",
                    dir.join(name).display()
                ),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.retention.keep, 1);
        assert_eq!(parsed.data.dir, PathBuf::from("data"));
        assert_eq!(parsed.data.deployments, "Deployments.json");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.retention.keep, 1);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("retainer.yaml"),
            "retention:\n  keep: 3\ndata:\n  dir: fixtures\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.retention.keep, 3);
        assert_eq!(cfg.data_dir(dir.path()), dir.path().join("fixtures"));
        assert_eq!(cfg.data.releases, "Releases.json");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("retainer.yaml"), "retention: [").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn validate_flags_bad_keep() {
        let mut cfg = Config::default();
        cfg.retention.keep = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert!(warnings[0].message.contains("retention.keep"));
    }

    #[test]
    fn check_data_files_reports_missing() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        for file in ["Projects.json", "Releases.json", "Environments.json"] {
            std::fs::write(data.join(file), "[]").unwrap();
        }

        let warnings = Config::default().check_data_files(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(warnings[0].message.starts_with("data.deployments:"));

        std::fs::write(data.join("Deployments.json"), "[]").unwrap();
        assert!(Config::default().check_data_files(dir.path()).is_empty());
    }

    #[test]
    fn validate_flags_empty_file_name_and_version() {
        let mut cfg = Config::default();
        cfg.version = 2;
        cfg.data.environments = "  ".to_string();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert_eq!(warnings[1].level, WarnLevel::Error);
        assert!(warnings[1].message.contains("data.environments"));
    }
}
