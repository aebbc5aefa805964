use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Environment {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Release {
    pub id: String,
    /// `None` (or an id no project carries) marks an orphaned release.
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
}

impl Release {
    pub fn new(id: impl Into<String>, project_id: Option<&str>, created: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.map(str::to_string),
            version: None,
            created,
        }
    }
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deployment {
    pub id: String,
    pub release_id: String,
    #[serde(default)]
    pub environment_id: Option<String>,
    #[serde(with = "timestamp")]
    pub deployed_at: DateTime<Utc>,
}

impl Deployment {
    pub fn new(
        id: impl Into<String>,
        release_id: impl Into<String>,
        environment_id: Option<&str>,
        deployed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            release_id: release_id.into(),
            environment_id: environment_id.map(str::to_string),
            deployed_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Serde adapter for entity timestamps.
///
/// Accepts RFC 3339 (`2000-01-01T08:00:00Z`, `2000-01-01T10:00:00+02:00`) as well
/// as zone-less ISO-8601 times (`2000-01-01T08:00:00`), which are taken as UTC.
/// Always writes RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn release_from_pascal_case_json() {
        let json = r#"{"Id":"Release-1","ProjectId":"Project-1","Version":"1.0.0","Created":"2000-01-01T08:00:00"}"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.id, "Release-1");
        assert_eq!(release.project_id.as_deref(), Some("Project-1"));
        assert_eq!(release.version.as_deref(), Some("1.0.0"));
        assert_eq!(
            release.created,
            Utc.with_ymd_and_hms(2000, 1, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn release_null_project_is_none() {
        let json = r#"{"Id":"Release-9","ProjectId":null,"Version":null,"Created":"2000-01-01T08:00:00Z"}"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert!(release.project_id.is_none());
        assert!(release.version.is_none());
    }

    #[test]
    fn deployment_missing_environment_is_none() {
        let json = r#"{"Id":"Deployment-1","ReleaseId":"Release-1","DeployedAt":"2000-01-01T10:00:00"}"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        assert_eq!(deployment.release_id, "Release-1");
        assert!(deployment.environment_id.is_none());
    }

    #[test]
    fn timestamp_accepts_offsets_and_fractions() {
        let offset = timestamp::parse("2000-01-01T10:00:00+02:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2000, 1, 1, 8, 0, 0).unwrap());

        let fractional = timestamp::parse("2000-01-01T08:00:00.250").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 250);

        assert!(timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn invalid_timestamp_is_a_json_error() {
        let json = r#"{"Id":"Deployment-1","ReleaseId":"Release-1","EnvironmentId":"Environment-1","DeployedAt":"soon"}"#;
        let err = serde_json::from_str::<Deployment>(json).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp 'soon'"));
    }

    #[test]
    fn project_name_is_optional() {
        let project: Project = serde_json::from_str(r#"{"Id":"Project-1"}"#).unwrap();
        assert_eq!(project, Project::new("Project-1"));

        let env: Environment =
            serde_json::from_str(r#"{"Id":"Environment-1","Name":"Staging"}"#).unwrap();
        assert_eq!(env.name.as_deref(), Some("Staging"));
    }
}
