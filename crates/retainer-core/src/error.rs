use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One of the four entity collections a `RetentionOptions` bundle requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Deployments,
    Environments,
    Projects,
    Releases,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Deployments => "Deployments",
            Collection::Environments => "Environments",
            Collection::Projects => "Projects",
            Collection::Releases => "Releases",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum RetainerError {
    #[error("{0} list cannot be absent")]
    MissingCollection(Collection),

    #[error("NumOfReleasesToKeep must be greater than zero (got {0})")]
    InvalidRetentionCount(i64),

    #[error("data file not found: {}", .0.display())]
    DataFileNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RetainerError>;
