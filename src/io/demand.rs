// src/io/demand.rs

use crate::model::series::OrderSeries;
use chrono::{Days, NaiveDate};
use rand::thread_rng;
use rand_distr::{Distribution, Normal};

fn date_index(start: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .map(|i| start + Days::new(i as u64))
        .collect()
}

/// A series where every day has the exact same order count. Useful for
/// steady-state checks.
pub fn constant_orders(start: NaiveDate, days: usize, value: f64) -> OrderSeries {
    let counts = vec![value.max(0.0); days];
    OrderSeries::new(date_index(start, days), counts)
        .expect("generated dates are consecutive and counts non-negative")
}

/// A series sampled from a Normal distribution, rounded to whole orders and
/// clamped at zero (demand cannot be negative).
pub fn normal_orders(start: NaiveDate, days: usize, mean: f64, std_dev: f64) -> OrderSeries {
    let mut rng = thread_rng();
    // a negative std-dev would be a caller bug; clamp keeps Normal::new valid
    let normal = Normal::new(mean, std_dev.max(0.0)).unwrap();

    let counts = (0..days)
        .map(|_| {
            let sampled: f64 = normal.sample(&mut rng);
            sampled.round().max(0.0)
        })
        .collect();

    OrderSeries::new(date_index(start, days), counts)
        .expect("generated dates are consecutive and counts non-negative")
}

/// A step pattern: `low` orders per day until `surge_day`, then `high` for
/// the rest of the horizon. This is the stress scenario that pushes the
/// backlog over the adaptive policy's threshold.
pub fn surge_orders(
    start: NaiveDate,
    days: usize,
    low: f64,
    high: f64,
    surge_day: usize,
) -> OrderSeries {
    let counts = (0..days)
        .map(|d| if d < surge_day { low.max(0.0) } else { high.max(0.0) })
        .collect();
    OrderSeries::new(date_index(start, days), counts)
        .expect("generated dates are consecutive and counts non-negative")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn constant_series_is_flat_with_consecutive_dates() {
        let series = constant_orders(start(), 5, 42.0);
        assert_eq!(series.len(), 5);
        assert!(series.counts().iter().all(|&c| c == 42.0));
        assert_eq!(series.dates()[4], start() + Days::new(4));
    }

    #[test]
    fn normal_series_never_goes_negative() {
        // mean near zero forces plenty of negative samples pre-clamp
        let series = normal_orders(start(), 200, 1.0, 10.0);
        assert_eq!(series.len(), 200);
        assert!(series.counts().iter().all(|&c| c >= 0.0));
    }

    #[test]
    fn surge_series_steps_up_at_the_surge_day() {
        let series = surge_orders(start(), 10, 40.0, 120.0, 4);
        assert_eq!(&series.counts()[..4], &[40.0; 4]);
        assert_eq!(&series.counts()[4..], &[120.0; 6]);
    }
}
