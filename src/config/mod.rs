use std::env;
use std::fmt;
use std::time::Duration;

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

/// Top-level configuration for the engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub lookup: TradeLookupConfig,
    pub matcher: MatcherConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let service_key = env::var("MOLIT_API_KEY").ok().filter(|key| !key.is_empty());
        let endpoint = env::var("TRADE_LOOKUP_ENDPOINT").unwrap_or_else(|_| {
            "https://openapi.molit.go.kr/OpenAPI_ToolInstallPackage/service/rest/RTMSOBJSvc/getRTMSDataSvcAptTradeDev"
                .to_string()
        });
        let timeout_secs = parse_env_number("TRADE_LOOKUP_TIMEOUT_SECS", 30u64)?;
        let lookback_months = parse_env_number("TRADE_LOOKBACK_MONTHS", 36u32)?;

        let min_confidence = match env::var("MATCH_MIN_CONFIDENCE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| (0.0..=1.0).contains(value))
                .ok_or(ConfigError::InvalidConfidence)?,
            Err(_) => MatcherConfig::DEFAULT_MIN_CONFIDENCE,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            lookup: TradeLookupConfig {
                service_key,
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
                lookback_months,
            },
            matcher: MatcherConfig { min_confidence },
        })
    }
}

fn parse_env_number<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for the external trade-record lookup.
#[derive(Debug, Clone)]
pub struct TradeLookupConfig {
    pub service_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
    pub lookback_months: u32,
}

impl Default for TradeLookupConfig {
    fn default() -> Self {
        Self {
            service_key: None,
            endpoint: String::new(),
            timeout: Duration::from_secs(30),
            lookback_months: 36,
        }
    }
}

/// Confidence policy for apartment-name matching.
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    pub min_confidence: f64,
}

impl MatcherConfig {
    /// Exactly the containment tier: only exact and containment matches bind
    /// without operator review.
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.85;
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_confidence: Self::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { name: &'static str },
    InvalidConfidence,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name } => {
                write!(f, "{} must be a non-negative integer", name)
            }
            ConfigError::InvalidConfidence => {
                write!(f, "MATCH_MIN_CONFIDENCE must be a number between 0 and 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
