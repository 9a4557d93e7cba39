use crate::commands::Config;
use crate::facts::RegistryClient;
use crate::facts::hosting::Client;
use crate::metrics::{CorrectnessMetric, LicenseMetric, MetricFetcher, RampUpMetric, ResponsivenessMetric};

/// The four fetchers run for every URL
pub struct MetricSet {
    pub license: Box<dyn MetricFetcher>,
    pub ramp_up: Box<dyn MetricFetcher>,
    pub correctness: Box<dyn MetricFetcher>,
    pub responsiveness: Box<dyn MetricFetcher>,
}

impl MetricSet {
    /// Build the real fetchers from configuration.
    #[must_use]
    pub fn from_config(config: &Config, hosting: &Client, registry: &RegistryClient) -> Self {
        Self {
            license: Box::new(LicenseMetric::new(hosting.clone(), registry.clone())),
            ramp_up: Box::new(RampUpMetric::new(&config.git_base_url, config.clone_root(), config.clone_depth)),
            correctness: Box::new(CorrectnessMetric::new(hosting.clone())),
            responsiveness: Box::new(ResponsivenessMetric::new(hosting.clone())),
        }
    }
}

impl core::fmt::Debug for MetricSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricSet")
            .field("license", &self.license.kind())
            .field("ramp_up", &self.ramp_up.kind())
            .field("correctness", &self.correctness.kind())
            .field("responsiveness", &self.responsiveness.kind())
            .finish()
    }
}
