use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use crate::matching::EngineSettings;

/// Application configuration loaded from environment variables.
/// Nothing is required; every value has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional JSON file with resumes and job descriptions to preload.
    pub seed_file: Option<PathBuf>,
    pub suggestion_threshold: f64,
    pub max_suggestions: usize,
    /// Date "present" resolves to in date ranges. Fixed for the process lifetime.
    pub reference_date: NaiveDate,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed_file: std::env::var("SEED_FILE").ok().filter(|s| !s.is_empty()).map(PathBuf::from),
            suggestion_threshold: parse_env("SUGGESTION_THRESHOLD", 70.0)?,
            max_suggestions: parse_env("MAX_SUGGESTIONS", 6)?,
            reference_date: parse_env("MATCH_REFERENCE_DATE", Utc::now().date_naive())?,
        };

        anyhow::ensure!(
            (0.0..=100.0).contains(&config.suggestion_threshold),
            "SUGGESTION_THRESHOLD must be between 0 and 100"
        );
        Ok(config)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            suggestion_threshold: self.suggestion_threshold,
            max_suggestions: self.max_suggestions,
            ..EngineSettings::new(self.reference_date)
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_settings_carry_config() {
        let config = Config {
            port: 8080,
            rust_log: "info".to_string(),
            seed_file: None,
            suggestion_threshold: 60.0,
            max_suggestions: 3,
            reference_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        };
        let settings = config.engine_settings();
        assert_eq!(settings.suggestion_threshold, 60.0);
        assert_eq!(settings.max_suggestions, 3);
        assert_eq!(settings.reference_date.to_string(), "2025-03-14");
    }

    #[test]
    fn test_parse_env_defaults_and_errors() {
        std::env::remove_var("RESUME_MATCHER_TEST_UNSET");
        assert_eq!(parse_env("RESUME_MATCHER_TEST_UNSET", 42u16).unwrap(), 42);

        std::env::set_var("RESUME_MATCHER_TEST_BAD", "abc");
        assert!(parse_env::<u16>("RESUME_MATCHER_TEST_BAD", 1).is_err());

        std::env::set_var("RESUME_MATCHER_TEST_GOOD", " 2031 ");
        assert_eq!(parse_env("RESUME_MATCHER_TEST_GOOD", 0i32).unwrap(), 2031);

        std::env::set_var("RESUME_MATCHER_TEST_DATE", "2026-03-01");
        let date: NaiveDate = parse_env("RESUME_MATCHER_TEST_DATE", NaiveDate::MIN).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }
}
