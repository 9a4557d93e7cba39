use core::fmt::{Display, Formatter};
use std::sync::Arc;

/// The `(owner, name)` pair naming a repository on the hosting site.
///
/// Derived once per input URL and shared read-only by every metric. Both halves are
/// absent when the URL could not be resolved, in which case every metric reports its
/// fail-closed default without touching the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RepoIdentity {
    owner: Option<Arc<str>>,
    name: Option<Arc<str>>,
}

impl RepoIdentity {
    #[must_use]
    pub fn new(owner: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            owner: Some(owner.into()),
            name: Some(name.into()),
        }
    }

    /// An identity with both halves absent.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self { owner: None, name: None }
    }

    /// Extract the identity from a repository URL on the hosting site.
    ///
    /// The final two non-empty path segments become owner and name. The name is truncated
    /// at its first `.`, which drops suffixes such as `.git`. Works on plain `https://`
    /// URLs as well as the `git+https://`, `git://` and `git@host:owner/repo` forms that
    /// registries commonly record.
    #[must_use]
    pub fn from_hosting_url(url: &str) -> Option<Self> {
        let path = match url.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
            None => url.split_once(':').map_or(url, |(_, path)| path),
        };

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty()).rev();
        let name = segments.next()?;
        let owner = segments.next()?;

        let name = name.split('.').next().unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        Some(Self::new(owner, name))
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Both halves, or `None` when either one is absent.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, &str)> {
        Some((self.owner()?, self.name()?))
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.parts().is_some()
    }
}

impl Display for RepoIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.parts() {
            Some((owner, name)) => write!(f, "{owner}/{name}"),
            None => write!(f, "<unresolved>"),
        }
    }
}
