mod io;
mod model;
mod simulation;

use crate::io::form::{FormDefaults, SimulationRequest};
use crate::io::{demand, history, reporting};
use crate::model::series::OrderSeries;
use crate::model::trace::SimulationTrace;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::simulate;
use crate::simulation::policy::CapacityPolicy;
use chrono::NaiveDate;
use log::warn;
use std::env;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Delivery Backlog & Delay Simulation ===");

    // 1. LOAD ORDER HISTORY
    // First positional argument is an optional transaction CSV; without it
    // we fall back to a synthetic surge scenario.
    let args: Vec<String> = env::args().skip(1).collect();
    let (csv_path, overrides): (Option<&str>, &[String]) = match args.first() {
        Some(first) if !first.contains('=') => (Some(first.as_str()), &args[1..]),
        _ => (None, &args[..]),
    };

    let series = match csv_path {
        Some(path) => history::load_order_history(path)?,
        None => {
            println!("No dataset given; generating a synthetic surge scenario.");
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid literal date");
            demand::surge_orders(start, 90, 80.0, 220.0, 30)
        }
    };

    let summary = series
        .summary()
        .expect("loader and generators reject empty series");
    println!(
        "Orders per day: {} days ({} .. {}), total {:.0}, mean {:.2}, min {:.0}, max {:.0}",
        summary.days,
        summary.first_date,
        summary.last_date,
        summary.total,
        summary.mean,
        summary.min,
        summary.max
    );

    // 2. RESOLVE PARAMETERS
    // Remaining key=value arguments go through the same best-effort
    // parse-and-clamp boundary a web form would use.
    let defaults = FormDefaults::from_series(&series);
    let (request, unknown) =
        SimulationRequest::from_key_value_args(overrides.iter().map(String::as_str));
    for arg in unknown {
        warn!("ignoring unrecognized argument '{arg}'");
    }
    let (config, num_days_show) = request.resolve(&defaults, series.len());

    // 3. RUN SCENARIOS
    // A constant-capacity baseline with the same base capacity, next to the
    // configured scenario.
    let baseline_config = SimulationConfig {
        policy: CapacityPolicy::Constant,
        ..config.clone()
    };
    let baseline = simulate(&series, &baseline_config)?;
    let configured = simulate(&series, &config)?;

    // 4. SHOW THE CONFIGURED RUN
    println!(
        "\nScenario '{}' (base capacity {:.2}, first {} of {} days):",
        config.policy,
        config.resolved_base_capacity(series.mean()),
        num_days_show,
        series.len()
    );
    let shown = configured.records(series.dates(), num_days_show);
    print!("{}", reporting::render_table(&shown));

    // 5. COMPARE OUTCOMES
    println!("\n=== Scenario comparison ===");
    print_outcome("constant baseline", &baseline);
    print_outcome(&config.policy.to_string(), &configured);

    // 6. EXPORT FULL TRACES
    export_trace("backlog_constant.csv", &baseline, &series)?;
    export_trace(&format!("backlog_{}.csv", config.policy), &configured, &series)?;

    println!("\nSimulation complete.");
    Ok(())
}

fn print_outcome(label: &str, trace: &SimulationTrace) {
    println!(
        "{label}: final backlog {:.1}, peak backlog {:.1}, peak delay {:.2} days, final capacity {:.1}",
        trace.final_backlog(),
        trace.peak_backlog(),
        trace.peak_delay(),
        trace.final_capacity()
    );
}

fn export_trace(
    file_name: &str,
    trace: &SimulationTrace,
    series: &OrderSeries,
) -> Result<(), Box<dyn Error>> {
    let rows = trace.records(series.dates(), trace.horizon());
    reporting::write_trace_csv(file_name, &rows)?;
    println!("Wrote {} rows to ./{}", rows.len(), file_name);
    Ok(())
}
