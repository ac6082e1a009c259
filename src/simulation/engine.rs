// src/simulation/engine.rs

use crate::model::series::OrderSeries;
use crate::model::trace::SimulationTrace;
use crate::simulation::config::SimulationConfig;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("order series is empty; nothing to simulate")]
    EmptyOrderSeries,
    #[error("unknown capacity policy '{0}' (expected 'constant' or 'adaptive')")]
    UnknownPolicy(String),
}

/// Runs the backlog/delay recurrence over the full order series.
///
/// The loop is inherently sequential: day t's capacity and backlog depend on
/// day t-1's outputs. Each call owns its trace buffers exclusively and the
/// inputs are never mutated, so independent runs (scenario comparisons,
/// concurrent requests) need no coordination.
///
/// Per day t:
/// 1. The capacity policy reacts to the backlog observed at the *start* of
///    the day, before any clearing.
/// 2. Deliveries are capped by capacity and by what is actually available
///    (carried backlog + today's orders).
/// 3. The backlog carries the remainder forward, clamped at zero against
///    floating-point drift.
/// 4. The delay estimate is backlog / capacity, NaN when capacity is not
///    positive (a data condition, not an error).
pub fn simulate(
    series: &OrderSeries,
    config: &SimulationConfig,
) -> Result<SimulationTrace, SimulationError> {
    if series.is_empty() {
        return Err(SimulationError::EmptyOrderSeries);
    }

    let orders = series.counts();
    let horizon = orders.len();

    let base_capacity = config.resolved_base_capacity(series.mean());
    let max_capacity = base_capacity * config.max_capacity_multiplier;
    let mut capacity_current = base_capacity;

    debug!(
        "simulate: horizon={} policy={} base_capacity={:.2} max_capacity={:.2}",
        horizon, config.policy, base_capacity, max_capacity
    );

    let mut capacity = vec![0.0; horizon];
    let mut delivery_rate = vec![0.0; horizon];
    let mut delay = vec![0.0; horizon];
    let mut backlog = vec![0.0; horizon + 1];
    backlog[0] = config.initial_backlog;

    for t in 0..horizon {
        // 1. Capacity policy reacts to the start-of-day backlog.
        capacity_current = config.policy.adjust(
            capacity_current,
            backlog[t],
            config.backlog_threshold,
            config.capacity_step,
            max_capacity,
        );
        capacity[t] = capacity_current;

        // 2. Clear what capacity and availability allow.
        let available = backlog[t] + orders[t];
        delivery_rate[t] = available.min(capacity_current);

        // 3. Carry the remainder forward.
        backlog[t + 1] = (backlog[t] + orders[t] - delivery_rate[t]).max(0.0);

        // 4. Days-to-clear estimate.
        delay[t] = if capacity_current > 0.0 {
            backlog[t] / capacity_current
        } else {
            f64::NAN
        };
    }

    Ok(SimulationTrace {
        orders: orders.to_vec(),
        capacity,
        delivery_rate,
        backlog,
        delay,
    })
}
