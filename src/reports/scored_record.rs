use crate::metrics::{Figure, MetricResult, round3};
use core::time::Duration;
use serde::{Serialize, Serializer};

/// The scores and latencies reported for one input URL
///
/// Field order is the order fields appear in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "NetScore")]
    pub net_score: f64,

    #[serde(rename = "NetScore_Latency", serialize_with = "serialize_latency")]
    pub net_score_latency: Duration,

    #[serde(rename = "RampUp")]
    pub ramp_up: f64,

    #[serde(rename = "RampUp_Latency", serialize_with = "serialize_latency")]
    pub ramp_up_latency: Duration,

    #[serde(rename = "Correctness")]
    pub correctness: f64,

    #[serde(rename = "Correctness_Latency", serialize_with = "serialize_latency")]
    pub correctness_latency: Duration,

    #[serde(rename = "BusFactor")]
    pub bus_factor: Figure,

    #[serde(rename = "BusFactor_Latency")]
    pub bus_factor_latency: Figure,

    #[serde(rename = "ResponsiveMaintainer")]
    pub responsive_maintainer: f64,

    #[serde(rename = "ResponsiveMaintainer_Latency", serialize_with = "serialize_latency")]
    pub responsive_maintainer_latency: Duration,

    #[serde(rename = "License")]
    pub license: f64,

    #[serde(rename = "License_Latency", serialize_with = "serialize_latency")]
    pub license_latency: Duration,
}

impl ScoredRecord {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        net_score: f64,
        net_score_latency: Duration,
        license: MetricResult,
        ramp_up: MetricResult,
        correctness: MetricResult,
        responsive_maintainer: MetricResult,
    ) -> Self {
        Self {
            url: url.into(),
            net_score,
            net_score_latency,
            ramp_up: ramp_up.value,
            ramp_up_latency: ramp_up.latency,
            correctness: correctness.value,
            correctness_latency: correctness.latency,
            bus_factor: Figure::NotImplemented,
            bus_factor_latency: Figure::NotImplemented,
            responsive_maintainer: responsive_maintainer.value,
            responsive_maintainer_latency: responsive_maintainer.latency,
            license: license.value,
            license_latency: license.latency,
        }
    }
}

/// Latencies are reported in seconds, rounded to 3 decimals.
fn serialize_latency<S: Serializer>(latency: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round3(latency.as_secs_f64()))
}
