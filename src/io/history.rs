// src/io/history.rs

use crate::model::series::{OrderSeries, SeriesError};
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read order history: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("unparseable order date '{0}'")]
    BadDate(String),
    #[error("order history contains no rows")]
    EmptyHistory,
    #[error(transparent)]
    Series(#[from] SeriesError),
}

// One transaction row. Every other column in the export is ignored.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    order_date: String,
}

/// Loads a transaction-level CSV export and aggregates it into daily order
/// counts, sorted by date. Dates with no transactions are left absent, not
/// filled with zeros.
pub fn load_order_history<P: AsRef<Path>>(path: P) -> Result<OrderSeries, HistoryError> {
    let file = File::open(path.as_ref())?;
    let series = read_order_history(file)?;
    debug!(
        "loaded {} days of order history from {}",
        series.len(),
        path.as_ref().display()
    );
    Ok(series)
}

/// Same as [`load_order_history`] but over any reader, for callers that
/// already hold the bytes.
pub fn read_order_history<R: Read>(reader: R) -> Result<OrderSeries, HistoryError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in csv_reader.deserialize::<TransactionRow>() {
        let row = row?;
        let date = parse_order_date(&row.order_date)?;
        *per_day.entry(date).or_insert(0.0) += 1.0;
    }

    if per_day.is_empty() {
        return Err(HistoryError::EmptyHistory);
    }

    let (dates, counts): (Vec<_>, Vec<_>) = per_day.into_iter().unzip();
    Ok(OrderSeries::new(dates, counts)?)
}

// Accepts plain dates and full timestamps; a timestamp is truncated to its
// calendar day.
fn parse_order_date(raw: &str) -> Result<NaiveDate, HistoryError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    Err(HistoryError::BadDate(trimmed.to_string()))
}
