// src/simulation/config.rs

use crate::simulation::policy::CapacityPolicy;

/// Smallest base capacity a run is allowed to use. A zero or negative base
/// capacity (explicit, or a mean over an all-zero series) is replaced by
/// this floor so the delay estimate stays defined.
pub const MIN_BASE_CAPACITY: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Backlog carried into day 0.
    pub initial_backlog: f64,
    /// Daily clearing capacity. `None` falls back to the mean of the order
    /// series being simulated.
    pub base_capacity: Option<f64>,
    pub policy: CapacityPolicy,
    /// Backlog level above which the adaptive policy adds capacity.
    pub backlog_threshold: f64,
    /// Capacity added per stressed day under the adaptive policy.
    pub capacity_step: f64,
    /// Ceiling as a multiple of the base capacity.
    pub max_capacity_multiplier: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_backlog: 0.0,
            base_capacity: None,
            policy: CapacityPolicy::Constant,
            backlog_threshold: 150.0,
            capacity_step: 15.0,
            max_capacity_multiplier: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Resolves the effective base capacity for a run, given the mean of the
    /// order series. Floors at [`MIN_BASE_CAPACITY`] so the result is always
    /// positive.
    pub fn resolved_base_capacity(&self, series_mean: f64) -> f64 {
        let base = self.base_capacity.unwrap_or(series_mean);
        if base <= 0.0 || !base.is_finite() {
            MIN_BASE_CAPACITY
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_form() {
        let config = SimulationConfig::default();
        assert_eq!(config.initial_backlog, 0.0);
        assert_eq!(config.base_capacity, None);
        assert_eq!(config.policy, CapacityPolicy::Constant);
        assert_eq!(config.backlog_threshold, 150.0);
        assert_eq!(config.capacity_step, 15.0);
        assert_eq!(config.max_capacity_multiplier, 2.0);
    }

    #[test]
    fn explicit_base_capacity_wins_over_series_mean() {
        let config = SimulationConfig {
            base_capacity: Some(42.0),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_capacity(100.0), 42.0);
    }

    #[test]
    fn unset_base_capacity_uses_series_mean() {
        let config = SimulationConfig::default();
        assert_eq!(config.resolved_base_capacity(87.5), 87.5);
    }

    #[test]
    fn non_positive_base_capacity_is_floored() {
        let zero = SimulationConfig {
            base_capacity: Some(0.0),
            ..Default::default()
        };
        assert_eq!(zero.resolved_base_capacity(100.0), MIN_BASE_CAPACITY);

        let negative = SimulationConfig {
            base_capacity: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(negative.resolved_base_capacity(100.0), MIN_BASE_CAPACITY);

        // mean over an all-zero series
        let unset = SimulationConfig::default();
        assert_eq!(unset.resolved_base_capacity(0.0), MIN_BASE_CAPACITY);
    }
}
