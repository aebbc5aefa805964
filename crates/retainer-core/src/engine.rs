//! Retention selection.
//!
//! For every (project, environment) pair the engine keeps the
//! `num_of_releases_to_keep` releases most recently deployed to that
//! environment, newest deployment first, ties broken by newer `created`.
//! Orphaned releases and dangling deployments are excluded, never reported
//! as errors.

use crate::options::RetentionOptions;
use crate::types::{Deployment, Release};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// RetentionEvent
// ---------------------------------------------------------------------------

/// Why one release occurrence was retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetentionEvent {
    pub release_id: String,
    pub environment_id: String,
}

impl fmt::Display for RetentionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' kept because it was most recently deployed to '{}'",
            self.release_id, self.environment_id
        )
    }
}

// ---------------------------------------------------------------------------
// Retention (output)
// ---------------------------------------------------------------------------

/// Releases retained across all pairs, in project-then-environment order.
///
/// A release retained for several environments appears once per environment,
/// and `events[i]` explains `releases[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Retention {
    pub releases: Vec<Release>,
    pub events: Vec<RetentionEvent>,
}

impl Retention {
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn retained_ids(&self) -> HashSet<&str> {
        self.releases.iter().map(|r| r.id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// DeploymentIndex
// ---------------------------------------------------------------------------

/// Deployments grouped by `(release_id, environment_id)`, newest first.
///
/// Deployments without an environment never enter the index.
pub struct DeploymentIndex<'a> {
    by_release: HashMap<&'a str, HashMap<&'a str, Vec<&'a Deployment>>>,
}

impl<'a> DeploymentIndex<'a> {
    pub fn build(deployments: &'a [Deployment]) -> Self {
        let mut by_release: HashMap<&'a str, HashMap<&'a str, Vec<&'a Deployment>>> =
            HashMap::new();
        for deployment in deployments {
            let Some(environment_id) = deployment.environment_id.as_deref() else {
                continue;
            };
            by_release
                .entry(deployment.release_id.as_str())
                .or_default()
                .entry(environment_id)
                .or_default()
                .push(deployment);
        }
        for list in by_release.values_mut().flat_map(|by_env| by_env.values_mut()) {
            list.sort_by(|a, b| b.deployed_at.cmp(&a.deployed_at));
        }
        Self { by_release }
    }

    pub fn deployments(&self, release_id: &str, environment_id: &str) -> &[&'a Deployment] {
        self.by_release
            .get(release_id)
            .and_then(|by_env| by_env.get(environment_id))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn most_recent(&self, release_id: &str, environment_id: &str) -> Option<&'a Deployment> {
        self.deployments(release_id, environment_id).first().copied()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Compute the retained releases and one event per retained occurrence.
///
/// Pure and total: identical options always give identical output, and no
/// structurally valid input produces an error.
pub fn retain_releases(options: &RetentionOptions) -> Retention {
    let keep = options.num_of_releases_to_keep();
    let releases_by_project = group_by_project(options.releases());
    let index = DeploymentIndex::build(options.deployments());

    let mut retention = Retention::default();

    for project in options.projects() {
        let candidates = releases_by_project
            .get(project.id.as_str())
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        for environment in options.environments() {
            let selected = select_for_environment(candidates, &environment.id, &index, keep);

            tracing::debug!(
                project_id = %project.id,
                environment_id = %environment.id,
                candidates = candidates.len(),
                selected = selected.len(),
                "evaluated retention pair"
            );

            for release in selected {
                retention.events.push(RetentionEvent {
                    release_id: release.id.clone(),
                    environment_id: environment.id.clone(),
                });
                retention.releases.push(release.clone());
            }
        }
    }

    retention
}

/// Releases from the input that were not retained for any pair, deduplicated
/// by id and in input order. These are the releases safe to let expire.
pub fn expired_releases<'a>(
    options: &'a RetentionOptions,
    retention: &Retention,
) -> Vec<&'a Release> {
    let retained = retention.retained_ids();
    let mut seen = HashSet::new();
    options
        .releases()
        .iter()
        .filter(|r| !retained.contains(r.id.as_str()))
        .filter(|&r| seen.insert(r.id.as_str()))
        .collect()
}

fn group_by_project(releases: &[Release]) -> HashMap<&str, Vec<&Release>> {
    let mut by_project: HashMap<&str, Vec<&Release>> = HashMap::new();
    for release in releases {
        if let Some(project_id) = release.project_id.as_deref() {
            by_project.entry(project_id).or_default().push(release);
        }
    }
    by_project
}

fn select_for_environment<'a>(
    candidates: &[&'a Release],
    environment_id: &str,
    index: &DeploymentIndex<'_>,
    keep: usize,
) -> Vec<&'a Release> {
    let mut ranked: Vec<(&'a Release, DateTime<Utc>)> = candidates
        .iter()
        .filter_map(|release| {
            index
                .most_recent(&release.id, environment_id)
                .map(|d| (*release, d.deployed_at))
        })
        .collect();

    // Stable: releases equal on both keys keep their input order.
    ranked.sort_by(|(a, a_deployed), (b, b_deployed)| {
        b_deployed
            .cmp(a_deployed)
            .then_with(|| b.created.cmp(&a.created))
    });

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .map(|(release, _)| release)
        .filter(|&release| seen.insert(release.id.as_str()))
        .take(keep)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
