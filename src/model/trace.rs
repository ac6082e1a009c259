// src/model/trace.rs

use chrono::NaiveDate;
use serde::Serialize;

/// The output of one simulation run: five aligned per-day series.
///
/// `backlog` is one element longer than the others; `backlog[t]` is the
/// backlog at the *start* of day t and the final element is the residual
/// left after the last simulated day. `delay` is NaN wherever the
/// effective capacity was not positive.
#[derive(Debug, Clone)]
pub struct SimulationTrace {
    pub orders: Vec<f64>,
    pub capacity: Vec<f64>,
    pub delivery_rate: Vec<f64>,
    pub backlog: Vec<f64>,
    pub delay: Vec<f64>,
}

impl SimulationTrace {
    /// Number of simulated days.
    pub fn horizon(&self) -> usize {
        self.orders.len()
    }

    /// Backlog left over after the final day.
    pub fn final_backlog(&self) -> f64 {
        *self.backlog.last().unwrap_or(&0.0)
    }

    pub fn peak_backlog(&self) -> f64 {
        self.backlog.iter().cloned().fold(0.0, f64::max)
    }

    /// Largest defined delay estimate; NaN entries are skipped.
    pub fn peak_delay(&self) -> f64 {
        self.delay
            .iter()
            .cloned()
            .filter(|d| !d.is_nan())
            .fold(0.0, f64::max)
    }

    pub fn final_capacity(&self) -> f64 {
        *self.capacity.last().unwrap_or(&0.0)
    }

    /// Pairs the trace with its date index and returns at most `limit`
    /// per-day rows. Truncation here is purely presentational; the full
    /// horizon has already been simulated.
    pub fn records(&self, dates: &[NaiveDate], limit: usize) -> Vec<DayRecord> {
        let n = limit.min(self.horizon()).min(dates.len());
        (0..n)
            .map(|t| DayRecord {
                day: dates[t].format("%Y-%m-%d").to_string(),
                orders: self.orders[t],
                capacity: self.capacity[t],
                delivery_rate: self.delivery_rate[t],
                backlog: self.backlog[t],
                delay: if self.delay[t].is_nan() {
                    None
                } else {
                    Some(self.delay[t])
                },
            })
            .collect()
    }
}

// Serialize so rows can be written straight to CSV.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    pub day: String,
    pub orders: f64,
    pub capacity: f64,
    pub delivery_rate: f64,
    pub backlog: f64,
    /// None when the delay estimate is undefined (capacity was not positive).
    pub delay: Option<f64>,
}
