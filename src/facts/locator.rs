//! Input URL classification and resolution to a repository identity

use super::registry::RegistryClient;
use super::repo_identity::RepoIdentity;
use crate::Result;
use ohno::{IntoAppError, bail};
use url::Url;

const LOG_TARGET: &str = "   locator";

/// Host substring identifying repository URLs on the hosting site
const HOSTING_HOST_PATTERN: &str = "github.com";

/// Host substring identifying package pages on the registry
const REGISTRY_HOST_PATTERN: &str = "npmjs";

/// What kind of page an input URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// A repository on the hosting site, e.g. `https://github.com/owner/name`
    Hosting,

    /// A package page on the registry, e.g. `https://www.npmjs.com/package/name`
    Registry,

    /// Anything else
    Unknown,
}

/// Classify a URL by a substring test on its host.
#[must_use]
pub fn classify(url: &str) -> UrlKind {
    let Ok(parsed) = Url::parse(url) else {
        return UrlKind::Unknown;
    };

    match parsed.host_str() {
        Some(host) if host.contains(HOSTING_HOST_PATTERN) => UrlKind::Hosting,
        Some(host) if host.contains(REGISTRY_HOST_PATTERN) => UrlKind::Registry,
        _ => UrlKind::Unknown,
    }
}

/// Derive the package name from a registry package page URL.
///
/// The name is the final path segment, joined with the preceding segment when that one is
/// an `@scope`.
fn package_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url).into_app_err_with(|| format!("parsing registry URL '{url}'"))?;
    let segments: Vec<_> = parsed
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [.., scope, name] if scope.starts_with('@') => Ok(format!("{scope}/{name}")),
        [.., name] => Ok((*name).to_string()),
        [] => bail!("registry URL '{url}' does not name a package"),
    }
}

/// Resolves input URLs to repository identities
#[derive(Debug, Clone)]
pub struct Locator {
    registry: RegistryClient,
}

impl Locator {
    #[must_use]
    pub const fn new(registry: RegistryClient) -> Self {
        Self { registry }
    }

    /// Resolve a URL to a repository identity.
    ///
    /// Never fails: unrecognized URLs and failed registry lookups produce an unresolved
    /// identity.
    pub async fn resolve(&self, url: &str) -> RepoIdentity {
        match self.try_resolve(url).await {
            Ok(identity) => {
                log::debug!(target: LOG_TARGET, "Resolved '{url}' to repository '{identity}'");
                identity
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not resolve '{url}' to a repository: {e:#}");
                RepoIdentity::unresolved()
            }
        }
    }

    async fn try_resolve(&self, url: &str) -> Result<RepoIdentity> {
        match classify(url) {
            UrlKind::Hosting => RepoIdentity::from_hosting_url(url).into_app_err_with(|| format!("no owner/name in URL '{url}'")),
            UrlKind::Registry => {
                let package = package_name(url)?;
                let metadata = self.registry.package(&package).await?;
                let repo_url = metadata
                    .repository_url()
                    .into_app_err_with(|| format!("package '{package}' does not declare a repository"))?;

                RepoIdentity::from_hosting_url(repo_url)
                    .into_app_err_with(|| format!("no owner/name in repository URL '{repo_url}' of package '{package}'"))
            }
            UrlKind::Unknown => bail!("unrecognized URL '{url}'"),
        }
    }
}
