// src/simulation/policy.rs

use crate::simulation::engine::SimulationError;
use std::fmt;
use std::str::FromStr;

/// Capacity-management rule applied at the start of every simulated day.
///
/// `Adaptive` is a one-directional ratchet: once the backlog observed at the
/// start of a day exceeds the threshold, capacity rises by one step, up to
/// the ceiling, and never comes back down even if the backlog later drains.
/// This models an operation that permanently adds capacity under sustained
/// stress but does not downsize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityPolicy {
    Constant,
    Adaptive,
}

impl CapacityPolicy {
    /// One policy step. `backlog` is the value observed *before* today's
    /// clearing; the ordering relative to the clearing step is significant.
    pub fn adjust(
        self,
        current_capacity: f64,
        backlog: f64,
        backlog_threshold: f64,
        capacity_step: f64,
        max_capacity: f64,
    ) -> f64 {
        match self {
            CapacityPolicy::Constant => current_capacity,
            CapacityPolicy::Adaptive => {
                if backlog > backlog_threshold && current_capacity < max_capacity {
                    (current_capacity + capacity_step).min(max_capacity)
                } else {
                    current_capacity
                }
            }
        }
    }
}

impl FromStr for CapacityPolicy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(CapacityPolicy::Constant),
            "adaptive" => Ok(CapacityPolicy::Adaptive),
            other => Err(SimulationError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityPolicy::Constant => write!(f, "constant"),
            CapacityPolicy::Adaptive => write!(f, "adaptive"),
        }
    }
}
