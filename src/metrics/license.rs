//! License compatibility with a weak-copyleft target license

use super::fetcher::{FailureLatency, measure};
use super::{LOG_TARGET, MetricFetcher, MetricKind, MetricResult};
use crate::Result;
use crate::facts::RegistryClient;
use crate::facts::RepoIdentity;
use crate::facts::hosting::Client;
use crate::facts::hosting::queries::{LICENSE_QUERY, LicenseInfo, LicenseRepository, RepositoryData};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use ohno::IntoAppError;
use strum::{EnumIter, EnumString};

/// Declared name the hosting site uses for licenses it could not identify
const UNIDENTIFIED_LICENSE_NAME: &str = "Other";

/// SPDX ids known to be compatible with LGPL-2.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
pub enum CompatibleLicense {
    #[strum(serialize = "LGPL-2.1-only")]
    Lgpl21Only,
    #[strum(serialize = "LGPL-2.1-or-later")]
    Lgpl21OrLater,
    #[strum(serialize = "LGPL-3.0-only")]
    Lgpl30Only,
    #[strum(serialize = "LGPL-3.0-or-later")]
    Lgpl30OrLater,
    #[strum(serialize = "MIT")]
    Mit,
    #[strum(serialize = "BSD-2-Clause")]
    Bsd2Clause,
    #[strum(serialize = "BSD-3-Clause")]
    Bsd3Clause,
    #[strum(serialize = "ISC")]
    Isc,
    #[strum(serialize = "Zlib")]
    Zlib,
    #[strum(serialize = "Artistic-2.0")]
    Artistic20,
    #[strum(serialize = "GPL-2.0-only")]
    Gpl20Only,
    #[strum(serialize = "GPL-2.0-or-later")]
    Gpl20OrLater,
    #[strum(serialize = "GPL-3.0-only")]
    Gpl30Only,
    #[strum(serialize = "GPL-3.0-or-later")]
    Gpl30OrLater,
    #[strum(serialize = "MPL-2.0")]
    Mpl20,
    #[strum(serialize = "Unlicense")]
    Unlicense,
    #[strum(serialize = "CC0-1.0")]
    Cc010,
}

/// Whether an SPDX id is on the allow-list. Absent ids never are.
#[must_use]
pub fn is_compatible(spdx_id: Option<&str>) -> bool {
    spdx_id.is_some_and(|id| id.parse::<CompatibleLicense>().is_ok())
}

/// What the hosting site's license metadata alone tells us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Compatible,
    Incompatible,

    /// The metadata is missing or unidentified; consult the registry
    NeedsRegistry,
}

/// Judge the hosting site's license metadata, first match wins.
#[must_use]
pub fn judge(info: Option<&LicenseInfo>) -> Verdict {
    let Some(info) = info else {
        return Verdict::NeedsRegistry;
    };

    if is_compatible(info.spdx_id.as_deref()) {
        Verdict::Compatible
    } else if info.spdx_id.is_none() || info.name.as_deref() == Some(UNIDENTIFIED_LICENSE_NAME) {
        Verdict::NeedsRegistry
    } else {
        Verdict::Incompatible
    }
}

const fn verdict_score(compatible: bool) -> f64 {
    if compatible { 1.0 } else { 0.0 }
}

/// Scores license compatibility from hosting metadata, falling back to the registry
#[derive(Debug, Clone)]
pub struct LicenseMetric {
    hosting: Client,
    registry: RegistryClient,
}

impl LicenseMetric {
    #[must_use]
    pub const fn new(hosting: Client, registry: RegistryClient) -> Self {
        Self { hosting, registry }
    }

    async fn compute(&self, owner: &str, name: &str) -> Result<f64> {
        let data: RepositoryData<LicenseRepository> = self
            .hosting
            .query(LICENSE_QUERY, serde_json::json!({ "owner": owner, "name": name }))
            .await?;
        let repo = data
            .repository
            .into_app_err_with(|| format!("repository '{owner}/{name}' not found"))?;

        match judge(repo.license_info.as_ref()) {
            Verdict::Compatible => Ok(1.0),
            Verdict::Incompatible => Ok(0.0),
            Verdict::NeedsRegistry => {
                let Some(package) = repo.manifest_package_name() else {
                    log::debug!(target: LOG_TARGET, "No license metadata or package manifest for '{owner}/{name}'");
                    return Ok(0.0);
                };

                log::debug!(target: LOG_TARGET, "Falling back to the registry license of package '{package}'");
                let metadata = self.registry.package(&package).await?;
                Ok(verdict_score(is_compatible(metadata.license())))
            }
        }
    }
}

impl MetricFetcher for LicenseMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::License
    }

    fn fetch<'a>(&'a self, identity: &'a RepoIdentity) -> BoxFuture<'a, MetricResult> {
        measure(MetricKind::License, identity, FailureLatency::Zero, |owner, name| self.compute(owner, name)).boxed()
    }
}
