use crate::Result;
use crate::facts::NPM_REGISTRY_URL;
use crate::facts::hosting::GITHUB_GRAPHQL_URL;
use crate::metrics::Weights;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_GIT_BASE_URL: &str = "https://github.com";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Per-metric weights of the net score
    #[serde(default)]
    pub weights: Weights,

    /// GraphQL endpoint of the hosting site
    #[serde(default = "default_hosting_api_url")]
    pub hosting_api_url: String,

    /// Base URL of the package registry's metadata API
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Prefix of clone URLs, which take the form `{git_base_url}/{owner}/{name}.git`
    #[serde(default = "default_git_base_url")]
    pub git_base_url: String,

    /// Number of commits fetched when cloning for the ramp-up metric
    #[serde(default = "default_clone_depth")]
    pub clone_depth: u32,

    /// Directory that holds temporary clones (default is the system temporary directory)
    #[serde(default)]
    pub clone_root: Option<Utf8PathBuf>,
}

fn default_hosting_api_url() -> String {
    GITHUB_GRAPHQL_URL.to_string()
}

fn default_registry_url() -> String {
    NPM_REGISTRY_URL.to_string()
}

fn default_git_base_url() -> String {
    DEFAULT_GIT_BASE_URL.to_string()
}

const fn default_clone_depth() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            hosting_api_url: default_hosting_api_url(),
            registry_url: default_registry_url(),
            git_base_url: default_git_base_url(),
            clone_depth: default_clone_depth(),
            clone_root: None,
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the weights are out of range or the clone depth is zero
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.clone_depth == 0 {
            return Err(app_err!("clone_depth must be at least 1"));
        }

        Ok(())
    }

    /// Where temporary clones are created.
    #[must_use]
    pub fn clone_root(&self) -> PathBuf {
        self.clone_root
            .as_ref()
            .map_or_else(std::env::temp_dir, |root| root.as_std_path().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.hosting_api_url, "https://api.github.com/graphql");
        assert_eq!(config.registry_url, "https://registry.npmjs.org");
        assert_eq!(config.git_base_url, "https://github.com");
        assert_eq!(config.clone_depth, 100);
        assert_eq!(config.clone_root(), std::env::temp_dir());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("reuse-score.toml")).unwrap();
        fs::write(
            &path,
            r#"
clone_depth = 10
clone_root = "/var/tmp/clones"
registry_url = "http://localhost:4873"

[weights]
license = 0.25
ramp_up = 0.25
correctness = 0.25
responsive_maintainer = 0.25
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.clone_depth, 10);
        assert_eq!(config.clone_root(), PathBuf::from("/var/tmp/clones"));
        assert_eq!(config.registry_url, "http://localhost:4873");
        assert_eq!(config.weights, Weights::EQUAL);
        assert_eq!(config.hosting_api_url, "https://api.github.com/graphql");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Utf8Path::new("/nonexistent/reuse-score.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading configuration file"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let _ = toml::from_str::<Config>("bogus = 1").unwrap_err();
        let _ = toml::from_str::<Config>("[weights]\nbus_factor = 0.1").unwrap_err();
    }

    #[test]
    fn test_zero_clone_depth_rejected() {
        let config = Config {
            clone_depth: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_weights_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("reuse-score.toml")).unwrap();
        fs::write(&path, "[weights]\nlicense = 0.9\n").unwrap();

        let _ = Config::load(Some(&path)).unwrap_err();
    }
}
