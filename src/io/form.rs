// src/io/form.rs

use crate::model::series::OrderSeries;
use crate::simulation::config::SimulationConfig;
use crate::simulation::policy::CapacityPolicy;
use log::debug;

/// Parses a float from free-form text, accepting `.` or `,` as the decimal
/// separator. A missing or unparseable value yields the default; the result
/// is then clamped into `[min, max]`. Parse failures never propagate — this
/// boundary is deliberately best-effort.
pub fn parse_clamped_f64(
    raw: Option<&str>,
    default: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> f64 {
    let mut value = match raw {
        Some(text) => match text.trim().replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                debug!("ignoring unparseable value '{text}', keeping {default}");
                default
            }
        },
        None => default,
    };
    if let Some(lo) = min {
        value = value.max(lo);
    }
    if let Some(hi) = max {
        value = value.min(hi);
    }
    value
}

/// Integer variant of [`parse_clamped_f64`]; `"7,0"` parses as 7.
pub fn parse_clamped_usize(
    raw: Option<&str>,
    default: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> usize {
    let mut value = match raw {
        Some(text) => match text.trim().replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v as usize,
            _ => {
                debug!("ignoring unparseable value '{text}', keeping {default}");
                default
            }
        },
        None => default,
    };
    if let Some(lo) = min {
        value = value.max(lo);
    }
    if let Some(hi) = max {
        value = value.min(hi);
    }
    value
}

/// Default parameter values offered before the user changes anything.
#[derive(Debug, Clone)]
pub struct FormDefaults {
    pub base_capacity: f64,
    pub policy: CapacityPolicy,
    pub backlog_threshold: f64,
    pub capacity_step: f64,
    pub max_capacity_multiplier: f64,
    pub initial_backlog: f64,
    pub num_days_show: usize,
}

impl FormDefaults {
    /// Defaults derived from the loaded order series: base capacity is the
    /// historical mean (rounded to 2 decimals), and at most 30 days are
    /// shown.
    pub fn from_series(series: &OrderSeries) -> Self {
        Self {
            base_capacity: (series.mean() * 100.0).round() / 100.0,
            policy: CapacityPolicy::Constant,
            backlog_threshold: 150.0,
            capacity_step: 15.0,
            max_capacity_multiplier: 2.0,
            initial_backlog: 0.0,
            num_days_show: 30.min(series.len()),
        }
    }
}

/// Raw, still-textual simulation parameters as they arrive from the outside
/// (a form post, CLI `key=value` pairs). Every field is optional; resolution
/// fills gaps from the defaults.
#[derive(Debug, Clone, Default)]
pub struct SimulationRequest {
    pub base_capacity: Option<String>,
    pub policy: Option<String>,
    pub backlog_threshold: Option<String>,
    pub capacity_step: Option<String>,
    pub max_capacity_multiplier: Option<String>,
    pub initial_backlog: Option<String>,
    pub num_days_show: Option<String>,
}

impl SimulationRequest {
    /// Collects `key=value` pairs into a request; unknown keys are reported
    /// back to the caller.
    pub fn from_key_value_args<'a, I>(args: I) -> (Self, Vec<&'a str>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut request = Self::default();
        let mut unknown = Vec::new();
        for arg in args {
            let Some((key, value)) = arg.split_once('=') else {
                unknown.push(arg);
                continue;
            };
            let value = Some(value.to_string());
            match key {
                "base_capacity" => request.base_capacity = value,
                "policy" => request.policy = value,
                "backlog_threshold" => request.backlog_threshold = value,
                "capacity_step" => request.capacity_step = value,
                "max_capacity_multiplier" => request.max_capacity_multiplier = value,
                "initial_backlog" => request.initial_backlog = value,
                "num_days_show" => request.num_days_show = value,
                _ => unknown.push(arg),
            }
        }
        (request, unknown)
    }

    /// Validates and clamps every field against its documented range,
    /// substituting the default wherever parsing fails. Returns the
    /// ready-to-run config and the number of days to display.
    pub fn resolve(&self, defaults: &FormDefaults, series_len: usize) -> (SimulationConfig, usize) {
        let base_capacity = parse_clamped_f64(
            self.base_capacity.as_deref(),
            defaults.base_capacity,
            Some(1.0),
            None,
        );
        let policy = match self.policy.as_deref() {
            Some(name) => name.parse::<CapacityPolicy>().unwrap_or_else(|err| {
                debug!("{err}; keeping {}", defaults.policy);
                defaults.policy
            }),
            None => defaults.policy,
        };
        let backlog_threshold = parse_clamped_f64(
            self.backlog_threshold.as_deref(),
            defaults.backlog_threshold,
            Some(0.0),
            None,
        );
        let capacity_step = parse_clamped_f64(
            self.capacity_step.as_deref(),
            defaults.capacity_step,
            Some(0.0),
            None,
        );
        let max_capacity_multiplier = parse_clamped_f64(
            self.max_capacity_multiplier.as_deref(),
            defaults.max_capacity_multiplier,
            Some(0.1),
            None,
        );
        let initial_backlog = parse_clamped_f64(
            self.initial_backlog.as_deref(),
            defaults.initial_backlog,
            Some(0.0),
            None,
        );
        let num_days_show = parse_clamped_usize(
            self.num_days_show.as_deref(),
            defaults.num_days_show,
            Some(1),
            Some(series_len),
        );

        let config = SimulationConfig {
            initial_backlog,
            base_capacity: Some(base_capacity),
            policy,
            backlog_threshold,
            capacity_step,
            max_capacity_multiplier,
        };
        (config, num_days_show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn defaults() -> FormDefaults {
        FormDefaults {
            base_capacity: 27.32,
            policy: CapacityPolicy::Constant,
            backlog_threshold: 150.0,
            capacity_step: 15.0,
            max_capacity_multiplier: 2.0,
            initial_backlog: 0.0,
            num_days_show: 30,
        }
    }

    #[test]
    fn accepts_comma_as_decimal_separator() {
        assert_eq!(parse_clamped_f64(Some("27,5"), 1.0, None, None), 27.5);
        assert_eq!(parse_clamped_usize(Some("7,0"), 1, None, None), 7);
    }

    #[test]
    fn garbage_falls_back_to_the_default() {
        assert_eq!(parse_clamped_f64(Some("abc"), 9.0, None, None), 9.0);
        assert_eq!(parse_clamped_f64(Some(""), 9.0, None, None), 9.0);
        assert_eq!(parse_clamped_f64(None, 9.0, None, None), 9.0);
        assert_eq!(parse_clamped_usize(Some("-4"), 3, None, None), 3);
    }

    #[test]
    fn values_are_clamped_into_range() {
        assert_eq!(parse_clamped_f64(Some("0.2"), 5.0, Some(1.0), None), 1.0);
        assert_eq!(parse_clamped_usize(Some("500"), 10, Some(1), Some(90)), 90);
    }

    #[test]
    fn resolve_applies_the_documented_ranges() {
        let request = SimulationRequest {
            base_capacity: Some("0".into()),
            max_capacity_multiplier: Some("0,01".into()),
            initial_backlog: Some("-10".into()),
            ..Default::default()
        };
        let (config, _) = request.resolve(&defaults(), 90);
        assert_eq!(config.base_capacity, Some(1.0));
        assert_eq!(config.max_capacity_multiplier, 0.1);
        assert_eq!(config.initial_backlog, 0.0);
    }

    #[test]
    fn unknown_policy_name_keeps_the_default_policy() {
        let request = SimulationRequest {
            policy: Some("turbo".into()),
            ..Default::default()
        };
        let (config, _) = request.resolve(&defaults(), 90);
        assert_eq!(config.policy, CapacityPolicy::Constant);
    }

    #[test]
    fn num_days_show_cannot_exceed_the_series_length() {
        let request = SimulationRequest {
            num_days_show: Some("200".into()),
            ..Default::default()
        };
        let (_, n) = request.resolve(&defaults(), 45);
        assert_eq!(n, 45);
    }

    #[test]
    fn key_value_args_fill_the_request() {
        let (request, unknown) = SimulationRequest::from_key_value_args(vec![
            "policy=adaptive",
            "capacity_step=12,5",
            "bogus",
            "speed=11",
        ]);
        assert_eq!(request.policy.as_deref(), Some("adaptive"));
        assert_eq!(request.capacity_step.as_deref(), Some("12,5"));
        assert_eq!(unknown, vec!["bogus", "speed=11"]);

        let (config, _) = request.resolve(&defaults(), 90);
        assert_eq!(config.policy, CapacityPolicy::Adaptive);
        assert_eq!(config.capacity_step, 12.5);
    }

    #[test]
    fn defaults_from_series_use_the_rounded_mean() {
        let dates = (0..3)
            .map(|i| NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + Days::new(i))
            .collect();
        let series = OrderSeries::new(dates, vec![10.0, 11.0, 11.0]).unwrap();
        let d = FormDefaults::from_series(&series);
        assert_eq!(d.base_capacity, 10.67);
        assert_eq!(d.num_days_show, 3);
    }
}
