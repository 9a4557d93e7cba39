//! GraphQL queries and their response schemas
//!
//! Every query the scorer issues lives here next to the exact shape it expects back.
//! Fields the API may legitimately omit or null out are `Option`s; anything else that is
//! missing fails deserialization, so scoring code never sees half-formed data.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// License metadata plus the default-branch `package.json` from `main` or `master`
pub const LICENSE_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    licenseInfo {
      name
      spdxId
    }
    mainManifest: object(expression: "main:package.json") {
      ... on Blob {
        text
      }
    }
    masterManifest: object(expression: "master:package.json") {
      ... on Blob {
        text
      }
    }
  }
}
"#;

/// Issue, pull request, and release counts plus default-branch commits since `$since`
pub const CORRECTNESS_QUERY: &str = "
query($owner: String!, $name: String!, $since: GitTimestamp!) {
  repository(owner: $owner, name: $name) {
    issues(states: OPEN) {
      totalCount
    }
    closedIssues: issues(states: CLOSED) {
      totalCount
    }
    pullRequests(states: OPEN) {
      totalCount
    }
    releases {
      totalCount
    }
    defaultBranchRef {
      target {
        ... on Commit {
          history(since: $since) {
            totalCount
          }
        }
      }
    }
  }
}
";

/// The 100 most recent pull requests and issues with their lifecycle timestamps
pub const RESPONSIVENESS_QUERY: &str = "
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: 100, orderBy: { field: CREATED_AT, direction: DESC }) {
      edges {
        node {
          createdAt
          closedAt
          mergedAt
        }
      }
    }
    issues(first: 100, states: [OPEN, CLOSED], orderBy: { field: CREATED_AT, direction: DESC }) {
      edges {
        node {
          createdAt
          closedAt
        }
      }
    }
  }
}
";

/// Top-level `data` member shared by every query: a possibly-null repository
#[derive(Debug, Deserialize)]
pub struct RepositoryData<T> {
    pub repository: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRepository {
    pub license_info: Option<LicenseInfo>,
    pub main_manifest: Option<Blob>,
    pub master_manifest: Option<Blob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

/// A git object; only blobs carry `text`
#[derive(Debug, Deserialize)]
pub struct Blob {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    name: Option<String>,
}

impl LicenseRepository {
    /// The `name` declared in the default-branch `package.json`, preferring `main` over `master`.
    #[must_use]
    pub fn manifest_package_name(&self) -> Option<String> {
        [&self.main_manifest, &self.master_manifest]
            .into_iter()
            .flatten()
            .filter_map(|blob| blob.text.as_deref())
            .find_map(|text| serde_json::from_str::<Manifest>(text).ok()?.name)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectnessRepository {
    pub issues: Count,
    pub closed_issues: Count,
    pub pull_requests: Count,
    pub releases: Count,
    pub default_branch_ref: Option<BranchRef>,
}

impl CorrectnessRepository {
    /// Commits on the default branch inside the queried window; 0 for empty repositories.
    #[must_use]
    pub fn recent_commits(&self) -> u64 {
        self.default_branch_ref
            .as_ref()
            .and_then(|r| r.target.as_ref())
            .and_then(|t| t.history.as_ref())
            .map_or(0, |h| h.total_count)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Count {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub target: Option<CommitTarget>,
}

/// The default branch target; `history` is absent when the target isn't a commit
#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub history: Option<Count>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsivenessRepository {
    pub pull_requests: Connection<PullRequestNode>,
    pub issues: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_repository_deserialize() {
        let json = r#"{
            "repository": {
                "licenseInfo": { "name": "MIT License", "spdxId": "MIT" },
                "mainManifest": { "text": "{\"name\": \"test-package\"}" },
                "masterManifest": null
            }
        }"#;

        let data: RepositoryData<LicenseRepository> = serde_json::from_str(json).unwrap();
        let repo = data.repository.unwrap();
        let info = repo.license_info.as_ref().unwrap();
        assert_eq!(info.spdx_id.as_deref(), Some("MIT"));
        assert_eq!(info.name.as_deref(), Some("MIT License"));
        assert_eq!(repo.manifest_package_name().as_deref(), Some("test-package"));
    }

    #[test]
    fn test_manifest_falls_back_to_master() {
        let json = r#"{
            "licenseInfo": null,
            "mainManifest": null,
            "masterManifest": { "text": "{\"name\": \"legacy\"}" }
        }"#;

        let repo: LicenseRepository = serde_json::from_str(json).unwrap();
        assert!(repo.license_info.is_none());
        assert_eq!(repo.manifest_package_name().as_deref(), Some("legacy"));
    }

    #[test]
    fn test_manifest_unparseable_or_nameless() {
        let json = r#"{
            "licenseInfo": null,
            "mainManifest": { "text": "not json" },
            "masterManifest": { "text": "{\"version\": \"1.0.0\"}" }
        }"#;

        let repo: LicenseRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.manifest_package_name(), None);
    }

    #[test]
    fn test_manifest_non_blob_object() {
        let json = r#"{ "licenseInfo": null, "mainManifest": {}, "masterManifest": null }"#;

        let repo: LicenseRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.manifest_package_name(), None);
    }

    #[test]
    fn test_correctness_repository_deserialize() {
        let json = r#"{
            "issues": { "totalCount": 10 },
            "closedIssues": { "totalCount": 5 },
            "pullRequests": { "totalCount": 3 },
            "releases": { "totalCount": 2 },
            "defaultBranchRef": { "target": { "history": { "totalCount": 20 } } }
        }"#;

        let repo: CorrectnessRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.issues.total_count, 10);
        assert_eq!(repo.closed_issues.total_count, 5);
        assert_eq!(repo.pull_requests.total_count, 3);
        assert_eq!(repo.releases.total_count, 2);
        assert_eq!(repo.recent_commits(), 20);
    }

    #[test]
    fn test_correctness_repository_empty_default_branch() {
        let json = r#"{
            "issues": { "totalCount": 0 },
            "closedIssues": { "totalCount": 0 },
            "pullRequests": { "totalCount": 0 },
            "releases": { "totalCount": 0 },
            "defaultBranchRef": null
        }"#;

        let repo: CorrectnessRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.recent_commits(), 0);
    }

    #[test]
    fn test_correctness_repository_rejects_missing_counts() {
        let json = r#"{ "issues": { "totalCount": 1 } }"#;
        assert!(serde_json::from_str::<CorrectnessRepository>(json).is_err());
    }

    #[test]
    fn test_responsiveness_repository_deserialize() {
        let json = r#"{
            "pullRequests": { "edges": [
                { "node": { "createdAt": "2021-01-01T00:00:00Z", "closedAt": "2021-01-02T00:00:00Z", "mergedAt": null } }
            ] },
            "issues": { "edges": [
                { "node": { "createdAt": "2021-01-01T00:00:00Z", "closedAt": null } }
            ] }
        }"#;

        let repo: ResponsivenessRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.pull_requests.edges.len(), 1);
        assert!(repo.pull_requests.edges[0].node.closed_at.is_some());
        assert!(repo.pull_requests.edges[0].node.merged_at.is_none());
        assert!(repo.issues.edges[0].node.closed_at.is_none());
    }

    #[test]
    fn test_null_repository() {
        let data: RepositoryData<ResponsivenessRepository> = serde_json::from_str(r#"{ "repository": null }"#).unwrap();
        assert!(data.repository.is_none());
    }
}
