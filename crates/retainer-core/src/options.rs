use crate::error::{Collection, Result, RetainerError};
use crate::types::{Deployment, Environment, Project, Release};

// ---------------------------------------------------------------------------
// RetentionOptions
// ---------------------------------------------------------------------------

/// Validated, immutable input to [`crate::engine::retain_releases`].
///
/// Every collection is present (possibly empty) and the retention count is at
/// least one. Referential integrity is not checked here: orphaned releases and
/// dangling deployments are excluded by the engine, not rejected.
#[derive(Debug, Clone)]
pub struct RetentionOptions {
    releases: Vec<Release>,
    deployments: Vec<Deployment>,
    environments: Vec<Environment>,
    projects: Vec<Project>,
    num_of_releases_to_keep: usize,
}

impl RetentionOptions {
    pub fn new(
        releases: Vec<Release>,
        deployments: Vec<Deployment>,
        environments: Vec<Environment>,
        projects: Vec<Project>,
        num_of_releases_to_keep: i64,
    ) -> Result<Self> {
        RetentionOptionsBuilder::new()
            .releases(releases)
            .deployments(deployments)
            .environments(environments)
            .projects(projects)
            .num_of_releases_to_keep(num_of_releases_to_keep)
            .build()
    }

    pub fn builder() -> RetentionOptionsBuilder {
        RetentionOptionsBuilder::new()
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn deployments(&self) -> &[Deployment] {
        &self.deployments
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn num_of_releases_to_keep(&self) -> usize {
        self.num_of_releases_to_keep
    }
}

// ---------------------------------------------------------------------------
// RetentionOptionsBuilder
// ---------------------------------------------------------------------------

/// Collects the inputs for [`RetentionOptions`].
///
/// A collection that was never supplied is absent, which is distinct from an
/// empty one: `build()` rejects the former and accepts the latter.
#[derive(Debug, Clone, Default)]
pub struct RetentionOptionsBuilder {
    releases: Option<Vec<Release>>,
    deployments: Option<Vec<Deployment>>,
    environments: Option<Vec<Environment>>,
    projects: Option<Vec<Project>>,
    num_of_releases_to_keep: Option<i64>,
}

impl RetentionOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn releases(mut self, releases: impl IntoIterator<Item = Release>) -> Self {
        self.releases = Some(releases.into_iter().collect());
        self
    }

    pub fn deployments(mut self, deployments: impl IntoIterator<Item = Deployment>) -> Self {
        self.deployments = Some(deployments.into_iter().collect());
        self
    }

    pub fn environments(mut self, environments: impl IntoIterator<Item = Environment>) -> Self {
        self.environments = Some(environments.into_iter().collect());
        self
    }

    pub fn projects(mut self, projects: impl IntoIterator<Item = Project>) -> Self {
        self.projects = Some(projects.into_iter().collect());
        self
    }

    /// Set all four collections from possibly-absent values, e.g. as loaded
    /// from JSON where a file may hold `null`.
    pub fn collections(
        mut self,
        releases: Option<Vec<Release>>,
        deployments: Option<Vec<Deployment>>,
        environments: Option<Vec<Environment>>,
        projects: Option<Vec<Project>>,
    ) -> Self {
        self.releases = releases;
        self.deployments = deployments;
        self.environments = environments;
        self.projects = projects;
        self
    }

    pub fn num_of_releases_to_keep(mut self, n: i64) -> Self {
        self.num_of_releases_to_keep = Some(n);
        self
    }

    pub fn build(self) -> Result<RetentionOptions> {
        let deployments = self
            .deployments
            .ok_or(RetainerError::MissingCollection(Collection::Deployments))?;
        let environments = self
            .environments
            .ok_or(RetainerError::MissingCollection(Collection::Environments))?;
        let projects = self
            .projects
            .ok_or(RetainerError::MissingCollection(Collection::Projects))?;
        let releases = self
            .releases
            .ok_or(RetainerError::MissingCollection(Collection::Releases))?;

        let requested = self.num_of_releases_to_keep.unwrap_or(0);
        let num_of_releases_to_keep = usize::try_from(requested)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(RetainerError::InvalidRetentionCount(requested))?;

        Ok(RetentionOptions {
            releases,
            deployments,
            environments,
            projects,
            num_of_releases_to_keep,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
