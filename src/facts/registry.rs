//! Package registry client
//!
//! Minimal npm registry client returning the two fields the scorer cares about:
//! the declared source repository and the declared license.

use crate::Result;
use ohno::IntoAppError;
use serde::Deserialize;

pub(crate) const LOG_TARGET: &str = "  registry";

pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// The subset of a registry package document that is used for scoring
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    repository: Option<RepositoryField>,

    #[serde(default)]
    license: Option<serde_json::Value>,
}

/// Registries record the repository either as a bare URL or as `{ type, url }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Url(String),
    Detailed { url: String },
}

impl PackageMetadata {
    /// The declared source-repository URL, if any.
    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        match self.repository.as_ref()? {
            RepositoryField::Url(url) | RepositoryField::Detailed { url } => Some(url),
        }
    }

    /// The declared license, only when it is recorded as a plain string.
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        self.license.as_ref()?.as_str()
    }
}

#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("reuse-score").build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Metadata endpoint for a package. Scoped names keep their `@` and have the `/` escaped.
    #[must_use]
    pub fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package.replace('/', "%2F"))
    }

    /// Fetch the metadata document for a package.
    pub async fn package(&self, package: &str) -> Result<PackageMetadata> {
        let url = self.package_url(package);
        log::info!(target: LOG_TARGET, "Querying registry for package '{package}'");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .into_app_err_with(|| format!("fetching registry metadata for package '{package}'"))?;

        let metadata = resp
            .json::<PackageMetadata>()
            .await
            .into_app_err_with(|| format!("parsing registry metadata for package '{package}'"))?;

        Ok(metadata)
    }
}
