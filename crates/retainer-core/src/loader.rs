use crate::config::DataConfig;
use crate::error::{Result, RetainerError};
use crate::options::RetentionOptions;
use crate::types::{Deployment, Environment, Project, Release};
use serde::de::DeserializeOwned;
use std::path::Path;

// ---------------------------------------------------------------------------
// DataSet
// ---------------------------------------------------------------------------

/// The four entity collections as read from disk.
///
/// A file holding JSON `null` leaves its collection absent; turning the set
/// into [`RetentionOptions`] then fails with a missing-collection error.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub projects: Option<Vec<Project>>,
    pub releases: Option<Vec<Release>>,
    pub environments: Option<Vec<Environment>>,
    pub deployments: Option<Vec<Deployment>>,
}

impl DataSet {
    pub fn load(dir: &Path, files: &DataConfig) -> Result<Self> {
        let set = Self {
            projects: read_json(dir, &files.projects)?,
            releases: read_json(dir, &files.releases)?,
            environments: read_json(dir, &files.environments)?,
            deployments: read_json(dir, &files.deployments)?,
        };
        tracing::debug!(
            dir = %dir.display(),
            projects = set.projects.as_ref().map_or(0, Vec::len),
            releases = set.releases.as_ref().map_or(0, Vec::len),
            environments = set.environments.as_ref().map_or(0, Vec::len),
            deployments = set.deployments.as_ref().map_or(0, Vec::len),
            "loaded data set"
        );
        Ok(set)
    }

    pub fn into_options(self, num_of_releases_to_keep: i64) -> Result<RetentionOptions> {
        RetentionOptions::builder()
            .collections(
                self.releases,
                self.deployments,
                self.environments,
                self.projects,
            )
            .num_of_releases_to_keep(num_of_releases_to_keep)
            .build()
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Option<Vec<T>>> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(RetainerError::DataFileNotFound(path));
    }
    let data = std::fs::read(&path)?;
    let items: Option<Vec<T>> = serde_json::from_slice(&data)?;
    Ok(items)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{expired_releases, retain_releases};
    use crate::error::Collection;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
    }

    fn write_set(dir: &Path, deployments: &str) {
        std::fs::write(dir.join("Projects.json"), r#"[{"Id":"Project-1"}]"#).unwrap();
        std::fs::write(dir.join("Environments.json"), r#"[{"Id":"Environment-1"}]"#).unwrap();
        std::fs::write(
            dir.join("Releases.json"),
            r#"[{"Id":"Release-1","ProjectId":"Project-1","Version":"1.0.0","Created":"2000-01-01T08:00:00"}]"#,
        )
        .unwrap();
        std::fs::write(dir.join("Deployments.json"), deployments).unwrap();
    }

    #[test]
    fn loads_sample_data() {
        let set = DataSet::load(&sample_dir(), &DataConfig::default()).unwrap();
        assert_eq!(set.projects.as_ref().map(Vec::len), Some(2));
        assert_eq!(set.environments.as_ref().map(Vec::len), Some(2));
        assert_eq!(set.releases.as_ref().map(Vec::len), Some(8));
        assert_eq!(set.deployments.as_ref().map(Vec::len), Some(12));
    }

    #[test]
    fn sample_data_keep_two() {
        let options = DataSet::load(&sample_dir(), &DataConfig::default())
            .unwrap()
            .into_options(2)
            .unwrap();
        let retention = retain_releases(&options);

        let ids: Vec<&str> = retention.releases.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            ["Release-2", "Release-1", "Release-1", "Release-6", "Release-7", "Release-6"]
        );
        let lines: Vec<String> = retention.events.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines[0],
            "'Release-2' kept because it was most recently deployed to 'Environment-1'"
        );
        assert_eq!(
            lines[2],
            "'Release-1' kept because it was most recently deployed to 'Environment-2'"
        );

        let expired: Vec<&str> = expired_releases(&options, &retention)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(expired, ["Release-3", "Release-4", "Release-5", "Release-8"]);
    }

    #[test]
    fn sample_data_keep_one() {
        let options = DataSet::load(&sample_dir(), &DataConfig::default())
            .unwrap()
            .into_options(1)
            .unwrap();
        let ids: Vec<String> = retain_releases(&options)
            .releases
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["Release-2", "Release-1", "Release-6", "Release-6"]);
    }

    #[test]
    fn missing_file_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let err = DataSet::load(dir.path(), &DataConfig::default()).unwrap_err();
        match err {
            RetainerError::DataFileNotFound(path) => {
                assert_eq!(path, dir.path().join("Projects.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_collection_rejected_by_options() {
        let dir = TempDir::new().unwrap();
        write_set(dir.path(), "null");
        let set = DataSet::load(dir.path(), &DataConfig::default()).unwrap();
        assert!(set.deployments.is_none());
        let err = set.into_options(1).unwrap_err();
        assert!(matches!(
            err,
            RetainerError::MissingCollection(Collection::Deployments)
        ));
    }

    #[test]
    fn empty_collection_accepted() {
        let dir = TempDir::new().unwrap();
        write_set(dir.path(), "[]");
        let options = DataSet::load(dir.path(), &DataConfig::default())
            .unwrap()
            .into_options(1)
            .unwrap();
        assert!(retain_releases(&options).is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_set(dir.path(), "[{");
        let err = DataSet::load(dir.path(), &DataConfig::default()).unwrap_err();
        assert!(matches!(err, RetainerError::Json(_)));
    }
}
