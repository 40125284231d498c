//! Estimator configuration.

/// Defaults applied when a request leaves a schedule field empty.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Working days per month for the primary commute.
    pub working_days_per_month: u32,

    /// Round trips per working day for the primary commute.
    pub daily_frequency: f64,

    /// Weeks per month used to scale weekly trips.
    /// A flat approximation; month lengths are not calendar-accurate.
    pub weeks_per_month: f64,
}

impl EstimatorConfig {
    /// Create a configuration with the given defaults.
    pub fn new(working_days_per_month: u32, daily_frequency: f64, weeks_per_month: f64) -> Self {
        Self {
            working_days_per_month,
            daily_frequency,
            weeks_per_month,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            daily_frequency: 2.0,
            weeks_per_month: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EstimatorConfig::default();
        assert_eq!(config.working_days_per_month, 22);
        assert_eq!(config.daily_frequency, 2.0);
        assert_eq!(config.weeks_per_month, 4.0);
    }

    #[test]
    fn custom_config() {
        let config = EstimatorConfig::new(20, 1.0, 4.33);
        assert_eq!(config.working_days_per_month, 20);
        assert_eq!(config.daily_frequency, 1.0);
        assert_eq!(config.weeks_per_month, 4.33);
    }
}
