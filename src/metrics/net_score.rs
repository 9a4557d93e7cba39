//! Weighted aggregation of the four metric scores

use super::round3;
use crate::Result;
use ohno::bail;
use serde::{Deserialize, Serialize};

/// Slack allowed above 1 when summing weights
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-metric weights of the net score
///
/// The weights need not add up to 1. The default set sums to 0.95, which caps the net score
/// at 0.95.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Weights {
    pub license: f64,
    pub ramp_up: f64,
    pub correctness: f64,
    pub responsive_maintainer: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            license: 0.30,
            ramp_up: 0.20,
            correctness: 0.25,
            responsive_maintainer: 0.20,
        }
    }
}

impl Weights {
    /// Every metric counts the same.
    pub const EQUAL: Self = Self {
        license: 0.25,
        ramp_up: 0.25,
        correctness: 0.25,
        responsive_maintainer: 0.25,
    };

    /// Check each weight is in `[0, 1]` and that together they sum to more than 0 and at most 1.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("license", self.license),
            ("ramp_up", self.ramp_up),
            ("correctness", self.correctness),
            ("responsive_maintainer", self.responsive_maintainer),
        ];

        for (name, weight) in named {
            if !(0.0..=1.0).contains(&weight) {
                bail!("weight '{name}' must be between 0 and 1, found {weight}");
            }
        }

        let sum: f64 = named.iter().map(|(_, weight)| weight).sum();
        if sum <= 0.0 || sum > 1.0 + WEIGHT_SUM_TOLERANCE {
            bail!("weights must sum to more than 0 and at most 1, found {sum}");
        }

        Ok(())
    }

    /// The unrounded weighted sum.
    #[must_use]
    pub fn combine(&self, license: f64, ramp_up: f64, correctness: f64, responsive_maintainer: f64) -> f64 {
        self.responsive_maintainer.mul_add(
            responsive_maintainer,
            self.correctness
                .mul_add(correctness, self.ramp_up.mul_add(ramp_up, self.license * license)),
        )
    }
}

/// The net score, rounded to 3 decimals.
#[must_use]
pub fn calculate_net_score(weights: &Weights, license: f64, ramp_up: f64, correctness: f64, responsive_maintainer: f64) -> f64 {
    round3(
        weights
            .combine(license, ramp_up, correctness, responsive_maintainer)
            .clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = Weights::default();
        weights.validate().unwrap();
        assert!((weights.license - 0.30).abs() < f64::EPSILON);
        assert!((weights.ramp_up - 0.20).abs() < f64::EPSILON);
        assert!((weights.correctness - 0.25).abs() < f64::EPSILON);
        assert!((weights.responsive_maintainer - 0.20).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_ones() {
        // the default weights sum to 0.95
        assert!((calculate_net_score(&Weights::default(), 1.0, 1.0, 1.0, 1.0) - 0.95).abs() < f64::EPSILON);
        assert!((calculate_net_score(&Weights::EQUAL, 1.0, 1.0, 1.0, 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_zeros() {
        assert!(calculate_net_score(&Weights::default(), 0.0, 0.0, 0.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed() {
        // 0.30 + 0.10 + 0.1875 + 0.05
        let weights = Weights::default();
        assert!((weights.combine(1.0, 0.5, 0.75, 0.25) - 0.6375).abs() < 1e-9);
        assert!((calculate_net_score(&weights, 1.0, 0.5, 0.75, 0.25) - 0.6375).abs() < 1e-3);
    }

    #[test]
    fn test_equal_weights() {
        Weights::EQUAL.validate().unwrap();
        assert!((calculate_net_score(&Weights::EQUAL, 1.0, 0.5, 0.75, 0.25) - 0.625).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighted_sum_identity() {
        let weights = Weights::default();
        let samples = [0.0, 0.1, 0.333, 0.5, 0.9, 1.0];
        for &l in &samples {
            for &r in &samples {
                for &c in &samples {
                    for &m in &samples {
                        let expected = 0.30 * l + 0.20 * r + 0.25 * c + 0.20 * m;
                        assert!((weights.combine(l, r, c, m) - expected).abs() < 1e-12);
                        let net = calculate_net_score(&weights, l, r, c, m);
                        assert!((0.0..=1.0).contains(&net));
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let weights = Weights::default();
        let first = calculate_net_score(&weights, 0.4, 0.6, 0.8, 0.2);
        for _ in 0..10 {
            assert!((calculate_net_score(&weights, 0.4, 0.6, 0.8, 0.2) - first).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let weights = Weights {
            license: 0.5,
            ..Weights::default()
        };
        let _ = weights.validate().unwrap_err();
    }

    #[test]
    fn test_validate_accepts_sum_below_one() {
        let weights = Weights {
            license: 0.5,
            ramp_up: 0.0,
            correctness: 0.0,
            responsive_maintainer: 0.0,
        };
        weights.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_all_zero() {
        let weights = Weights {
            license: 0.0,
            ramp_up: 0.0,
            correctness: 0.0,
            responsive_maintainer: 0.0,
        };
        let _ = weights.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let weights = Weights {
            license: 1.5,
            ramp_up: -0.5,
            correctness: 0.0,
            responsive_maintainer: 0.0,
        };
        let _ = weights.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rejects_nan() {
        let weights = Weights {
            license: f64::NAN,
            ..Weights::default()
        };
        let _ = weights.validate().unwrap_err();
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let weights: Weights = toml::from_str("license = 0.3").unwrap();
        assert_eq!(weights, Weights::default());
    }
}
