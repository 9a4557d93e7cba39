use core::time::Duration;

/// The outcome of one metric for one URL
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricResult {
    /// Score in `[0, 1]`
    pub value: f64,

    /// Wall-clock time spent fetching and scoring
    pub latency: Duration,
}

impl MetricResult {
    /// Build a result, clamping the score into `[0, 1]`. NaN becomes 0.
    #[must_use]
    pub fn new(value: f64, latency: Duration) -> Self {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        Self { value, latency }
    }

    /// The fail-closed default: score 0, reported with zero latency.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            value: 0.0,
            latency: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert!((MetricResult::new(1.5, Duration::ZERO).value - 1.0).abs() < f64::EPSILON);
        assert!(MetricResult::new(-0.2, Duration::ZERO).value.abs() < f64::EPSILON);
        assert!(MetricResult::new(f64::NAN, Duration::ZERO).value.abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_keeps_in_range_values() {
        let result = MetricResult::new(0.42, Duration::from_millis(1500));
        assert!((result.value - 0.42).abs() < f64::EPSILON);
        assert_eq!(result.latency, Duration::from_millis(1500));
    }

    #[test]
    fn test_failed() {
        let result = MetricResult::failed();
        assert!(result.value.abs() < f64::EPSILON);
        assert_eq!(result.latency, Duration::ZERO);
    }
}
