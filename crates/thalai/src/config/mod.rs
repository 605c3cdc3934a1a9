use crate::eligibility::EligibilityPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub eligibility: EligibilityPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat { value: raw })?,
            Err(_) => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            eligibility: load_policy()?,
        })
    }
}

fn load_policy() -> Result<EligibilityPolicy, ConfigError> {
    let defaults = EligibilityPolicy::default();
    let policy = EligibilityPolicy {
        min_age_years: env_override("APP_DONOR_MIN_AGE", defaults.min_age_years)?,
        max_age_years: env_override("APP_DONOR_MAX_AGE", defaults.max_age_years)?,
        min_weight_kg: env_override("APP_DONOR_MIN_WEIGHT_KG", defaults.min_weight_kg)?,
        min_donation_gap_days: env_override(
            "APP_DONATION_GAP_DAYS",
            defaults.min_donation_gap_days,
        )?,
    };

    if policy.min_age_years > policy.max_age_years {
        return Err(ConfigError::InvertedAgeRange {
            min: policy.min_age_years,
            max: policy.max_age_years,
        });
    }
    if !policy.min_weight_kg.is_finite() || policy.min_weight_kg < 0.0 {
        return Err(ConfigError::InvalidPolicyValue {
            key: "APP_DONOR_MIN_WEIGHT_KG",
            value: policy.min_weight_kg.to_string(),
        });
    }
    if policy.min_donation_gap_days < 0 {
        return Err(ConfigError::InvalidPolicyValue {
            key: "APP_DONATION_GAP_DAYS",
            value: policy.min_donation_gap_days.to_string(),
        });
    }

    Ok(policy)
}

fn env_override<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidPolicyValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Output layout for the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat { value: String },
    InvalidPolicyValue { key: &'static str, value: String },
    InvertedAgeRange { min: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'full', found '{value}'")
            }
            ConfigError::InvalidPolicyValue { key, value } => {
                write!(f, "{key} has an invalid value '{value}'")
            }
            ConfigError::InvertedAgeRange { min, max } => write!(
                f,
                "APP_DONOR_MIN_AGE ({min}) must not exceed APP_DONOR_MAX_AGE ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLogFormat { .. }
            | ConfigError::InvalidPolicyValue { .. }
            | ConfigError::InvertedAgeRange { .. } => None,
        }
    }
}

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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_DONOR_MIN_AGE",
            "APP_DONOR_MAX_AGE",
            "APP_DONOR_MIN_WEIGHT_KG",
            "APP_DONATION_GAP_DAYS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.eligibility, EligibilityPolicy::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn policy_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DONOR_MIN_WEIGHT_KG", "50");
        env::set_var("APP_DONATION_GAP_DAYS", "90");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.eligibility.min_weight_kg, 50.0);
        assert_eq!(config.eligibility.min_donation_gap_days, 90);
        assert_eq!(config.eligibility.min_age_years, 18);
        reset_env();
    }

    #[test]
    fn rejects_inverted_age_range() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DONOR_MIN_AGE", "70");
        let err = AppConfig::load().expect_err("inverted range rejected");
        assert!(matches!(
            err,
            ConfigError::InvertedAgeRange { min: 70, max: 65 }
        ));
        reset_env();
    }

    #[test]
    fn rejects_unparseable_policy_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DONATION_GAP_DAYS", "eight weeks");
        let err = AppConfig::load().expect_err("gap must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidPolicyValue {
                key: "APP_DONATION_GAP_DAYS",
                ..
            }
        ));
        reset_env();
    }
}
