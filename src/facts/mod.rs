//! Repository identity and the collaborators that fetch raw facts
//!
//! This module owns every interaction with the outside world: the package
//! registry, the hosting site's GraphQL API, and git. Nothing in here scores
//! anything; it only produces typed data for the [`crate::metrics`] module.
//!
//! # Implementation Model
//!
//! - [`Locator`] turns an input URL into a [`RepoIdentity`], querying the
//!   registry when the URL names a package rather than a repository.
//! - [`hosting::Client`] issues GraphQL queries; each query has an explicit
//!   response schema in [`hosting::queries`] that is validated at
//!   deserialization time.
//! - [`RegistryClient`] fetches package metadata documents.
//! - [`git`] performs shallow clones into a [`CloneDir`], a scoped temporary
//!   directory that is always removed.

mod clone_dir;
pub mod git;
pub mod hosting;
mod locator;
mod registry;
mod repo_identity;

pub use clone_dir::CloneDir;
pub use locator::{Locator, UrlKind, classify};
pub use registry::{NPM_REGISTRY_URL, PackageMetadata, RegistryClient};
pub use repo_identity::RepoIdentity;
