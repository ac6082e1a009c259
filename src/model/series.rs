// src/model/series.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("dates and counts have different lengths ({dates} vs {counts})")]
    LengthMismatch { dates: usize, counts: usize },
    #[error("dates must be strictly increasing (violation at index {0})")]
    UnsortedDates(usize),
    #[error("order count at index {index} is invalid: {value}")]
    NegativeCount { index: usize, value: f64 },
}

/// A date-indexed sequence of daily order counts.
///
/// Immutable once constructed: dates are strictly increasing (so no
/// duplicates) and every count is a finite, non-negative number. Missing
/// dates are simply absent; the series never infers zero-order days.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSeries {
    dates: Vec<NaiveDate>,
    counts: Vec<f64>,
}

impl OrderSeries {
    pub fn new(dates: Vec<NaiveDate>, counts: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != counts.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                counts: counts.len(),
            });
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SeriesError::UnsortedDates(i + 1));
            }
        }
        for (i, &c) in counts.iter().enumerate() {
            if !c.is_finite() || c < 0.0 {
                return Err(SeriesError::NegativeCount { index: i, value: c });
            }
        }
        Ok(Self { dates, counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Average orders per day. Zero for an empty series.
    pub fn mean(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        self.counts.iter().sum::<f64>() / self.counts.len() as f64
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let first_date = *self.dates.first()?;
        let last_date = *self.dates.last()?;
        let total: f64 = self.counts.iter().sum();
        let min = self.counts.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self
            .counts
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        Some(SeriesSummary {
            days: self.len(),
            first_date,
            last_date,
            total,
            mean: self.mean(),
            min,
            max,
        })
    }
}

/// Descriptive statistics over a non-empty order series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn accepts_sorted_non_negative_counts() {
        let series = OrderSeries::new(vec![day(1), day(2), day(4)], vec![5.0, 0.0, 12.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.counts(), &[5.0, 0.0, 12.0]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = OrderSeries::new(vec![day(1)], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { dates: 1, counts: 2 });
    }

    #[test]
    fn rejects_duplicate_and_unsorted_dates() {
        let err = OrderSeries::new(vec![day(2), day(2)], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::UnsortedDates(1));
        let err = OrderSeries::new(vec![day(3), day(1)], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::UnsortedDates(1));
    }

    #[test]
    fn rejects_negative_or_non_finite_counts() {
        let err = OrderSeries::new(vec![day(1)], vec![-3.0]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NegativeCount {
                index: 0,
                value: -3.0
            }
        );
        assert!(OrderSeries::new(vec![day(1)], vec![f64::NAN]).is_err());
    }

    #[test]
    fn summary_reports_describe_style_stats() {
        let series = OrderSeries::new(vec![day(1), day(2), day(3)], vec![10.0, 20.0, 6.0]).unwrap();
        let summary = series.summary().unwrap();
        assert_eq!(summary.days, 3);
        assert_eq!(summary.first_date, day(1));
        assert_eq!(summary.last_date, day(3));
        assert_eq!(summary.total, 36.0);
        assert_eq!(summary.mean, 12.0);
        assert_eq!(summary.min, 6.0);
        assert_eq!(summary.max, 20.0);
    }

    #[test]
    fn empty_series_has_zero_mean_and_no_summary() {
        let series = OrderSeries::new(vec![], vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.mean(), 0.0);
        assert!(series.summary().is_none());
    }
}
