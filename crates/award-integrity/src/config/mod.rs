use crate::awards::source::FetchPolicy;
use crate::insights::InsightOptions;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring service and insight job.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub insights: InsightsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let threshold_percent = read_number::<f64>("INSIGHTS_THRESHOLD_PERCENT", 25.0)?;
        if !threshold_percent.is_finite() || threshold_percent < 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "INSIGHTS_THRESHOLD_PERCENT",
            });
        }

        let page_size = read_positive("INSIGHTS_PAGE_SIZE", 100)?;
        let max_pages = read_positive("INSIGHTS_MAX_PAGES", 10)?;
        let fetch_attempts = read_positive("INSIGHTS_FETCH_ATTEMPTS", 3)?;
        let store_path = env::var("INSIGHTS_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("insights.json"));

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            insights: InsightsConfig {
                threshold_percent,
                page_size,
                max_pages,
                fetch_attempts,
                store_path,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for the scheduled insight generation job.
#[derive(Debug, Clone)]
pub struct InsightsConfig {
    pub threshold_percent: f64,
    pub page_size: usize,
    pub max_pages: usize,
    pub fetch_attempts: usize,
    pub store_path: PathBuf,
}

impl InsightsConfig {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            page_size: self.page_size,
            max_pages: self.max_pages,
            attempts: self.fetch_attempts,
        }
    }

    pub fn insight_options(&self) -> InsightOptions {
        InsightOptions {
            threshold_percent: self.threshold_percent,
            ..InsightOptions::default()
        }
    }
}

fn read_number<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

fn read_positive(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    let value = read_number::<usize>(key, default)?;
    if value == 0 {
        return Err(ConfigError::OutOfRange { key });
    }
    Ok(value)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
    OutOfRange { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
            ConfigError::OutOfRange { key } => write!(f, "{key} is outside the accepted range"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("INSIGHTS_THRESHOLD_PERCENT");
        env::remove_var("INSIGHTS_PAGE_SIZE");
        env::remove_var("INSIGHTS_MAX_PAGES");
        env::remove_var("INSIGHTS_FETCH_ATTEMPTS");
        env::remove_var("INSIGHTS_STORE_PATH");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.insights.threshold_percent, 25.0);
        assert_eq!(config.insights.page_size, 100);
        assert_eq!(config.insights.max_pages, 10);
        assert_eq!(config.insights.fetch_attempts, 3);
        assert_eq!(config.insights.store_path, PathBuf::from("insights.json"));
    }

    #[test]
    fn threshold_override_flows_into_insight_options() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INSIGHTS_THRESHOLD_PERCENT", "40");
        env::set_var("APP_ENV", "prod");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.insights.insight_options().threshold_percent, 40.0);
        reset_env();
    }

    #[test]
    fn rejects_zero_page_cap_and_garbage_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INSIGHTS_MAX_PAGES", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::OutOfRange {
                key: "INSIGHTS_MAX_PAGES"
            })
        ));

        reset_env();
        env::set_var("INSIGHTS_PAGE_SIZE", "lots");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                key: "INSIGHTS_PAGE_SIZE"
            })
        ));
        reset_env();
    }
}
