//! Runtime configuration and planning-form limits.

use std::time::Duration;

use crate::{
    error::{PlannerError, Result},
    services::openai_client::{DEFAULT_BASE_URL, DEFAULT_MODEL},
    types::preferences::TravelPreferences,
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

/// Smallest and largest budget multiplier accepted by regeneration.
pub const MIN_BUDGET_MULTIPLIER: f64 = 0.5;
pub const MAX_BUDGET_MULTIPLIER: f64 = 2.0;

/// Settings for talking to the AI service.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_tokens: Option<u32>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

impl PlannerConfig {
    /// Load from the process environment, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("TRIP_PLANNER_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number::<u64>("TRIP_PLANNER_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };
        if timeout.is_zero() {
            return Err(PlannerError::Config(
                "TRIP_PLANNER_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let max_tokens = match get("TRIP_PLANNER_MAX_TOKENS") {
            Some(raw) => Some(parse_number::<u32>("TRIP_PLANNER_MAX_TOKENS", &raw)?),
            None => defaults.max_tokens,
        };

        Ok(Self {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL")
                .or_else(|| get("OPENROUTER_BASE_URL"))
                .unwrap_or(defaults.base_url),
            model: get("TRIP_PLANNER_MODEL").unwrap_or(defaults.model),
            timeout,
            max_tokens,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        PlannerError::Config(format!("{key} must be a non-negative integer, got `{raw}`"))
    })
}

/// Bounds the planning form puts on user input.
///
/// These are advisory: a value outside them is still a valid
/// [`TravelPreferences`], `check` only reports what the form would reject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceLimits {
    pub min_budget: f64,
    pub max_budget: f64,
    pub min_duration: u32,
    pub max_duration: u32,
}

impl Default for PreferenceLimits {
    fn default() -> Self {
        Self {
            min_budget: 100.0,
            max_budget: 50_000.0,
            min_duration: 1,
            max_duration: 30,
        }
    }
}

impl PreferenceLimits {
    pub fn check(&self, prefs: &TravelPreferences) -> Vec<String> {
        let mut problems = Vec::new();

        if prefs.budget() < self.min_budget {
            problems.push(format!("Budget must be at least ${}", self.min_budget));
        }
        if prefs.budget() > self.max_budget {
            problems.push(format!("Budget cannot exceed ${}", self.max_budget));
        }
        if prefs.duration() < self.min_duration {
            problems.push(format!(
                "Trip duration must be at least {} day(s)",
                self.min_duration
            ));
        }
        if prefs.duration() > self.max_duration {
            problems.push(format!(
                "Trip duration cannot exceed {} days",
                self.max_duration
            ));
        }

        problems
    }
}

/// Reject budget multipliers outside the regeneration range.
pub fn check_budget_multiplier(multiplier: f64) -> Result<()> {
    if !(MIN_BUDGET_MULTIPLIER..=MAX_BUDGET_MULTIPLIER).contains(&multiplier) {
        return Err(PlannerError::InvalidPreferences(format!(
            "budget multiplier must be between {} and {}, got {}",
            MIN_BUDGET_MULTIPLIER, MAX_BUDGET_MULTIPLIER, multiplier
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::preferences::Interest;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENROUTER_BASE_URL", "http://localhost:9000/v1"),
            ("TRIP_PLANNER_MODEL", "openai/gpt-4.1-mini"),
            ("TRIP_PLANNER_TIMEOUT_SECS", "5"),
            ("TRIP_PLANNER_MAX_TOKENS", "1200"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, "openai/gpt-4.1-mini");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_tokens, Some(1200));
    }

    #[test]
    fn test_openai_base_url_wins() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            ("OPENROUTER_BASE_URL", "http://ignored"),
            ("OPENAI_API_KEY", "  "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_numbers_are_config_errors() {
        for pairs in [
            [("TRIP_PLANNER_TIMEOUT_SECS", "soon")],
            [("TRIP_PLANNER_TIMEOUT_SECS", "0")],
            [("TRIP_PLANNER_MAX_TOKENS", "-1")],
        ] {
            assert!(matches!(
                PlannerConfig::from_lookup(lookup(&pairs)),
                Err(PlannerError::Config(_))
            ));
        }
    }

    #[test]
    fn test_limits_report_each_problem() {
        let limits = PreferenceLimits::default();
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let fine = TravelPreferences::builder("Paris", start)
            .priority(Interest::Museums)
            .build()
            .unwrap();
        assert!(limits.check(&fine).is_empty());

        let off = TravelPreferences::builder("Paris", start)
            .budget(50.0)
            .duration(45)
            .priority(Interest::Museums)
            .build()
            .unwrap();
        let problems = limits.check(&off);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("at least $100"));
        assert!(problems[1].contains("cannot exceed 30 days"));
    }

    #[test]
    fn test_budget_multiplier_bounds() {
        assert!(check_budget_multiplier(0.5).is_ok());
        assert!(check_budget_multiplier(2.0).is_ok());
        assert!(check_budget_multiplier(0.49).is_err());
        assert!(check_budget_multiplier(f64::NAN).is_err());
    }
}
