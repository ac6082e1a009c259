// src/io/reporting.rs

use crate::model::trace::DayRecord;
use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;

/// Writes per-day trace rows to a CSV file.
pub fn write_trace_csv<P: AsRef<Path>>(path: P, rows: &[DayRecord]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        writer.serialize(row)?;
    }
    // Flush the buffer to ensure all data is written
    writer.flush()?;
    Ok(())
}

/// Renders the display slice as a fixed-width text table. An undefined delay
/// shows as `-`.
pub fn render_table(rows: &[DayRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>8} {:>10} {:>10} {:>10} {:>8}",
        "day", "orders", "capacity", "delivered", "backlog", "delay"
    );
    for row in rows {
        let delay = match row.delay {
            Some(d) => format!("{d:.2}"),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<12} {:>8.0} {:>10.2} {:>10.2} {:>10.2} {:>8}",
            row.day, row.orders, row.capacity, row.delivery_rate, row.backlog, delay
        );
    }
    out
}
