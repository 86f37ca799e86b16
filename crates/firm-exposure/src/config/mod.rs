use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
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

/// Top-level configuration shared by the HTTP service and the console wizard.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub console: ConsoleConfig,
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

        let reveal_tick_ms = env::var("APP_REVEAL_TICK_MS")
            .unwrap_or_else(|_| DEFAULT_REVEAL_TICK_MS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidRevealTick)?;
        let reveal_steps = env::var("APP_REVEAL_STEPS")
            .unwrap_or_else(|_| DEFAULT_REVEAL_STEPS.to_string())
            .parse::<u8>()
            .ok()
            .filter(|steps| *steps > 0)
            .ok_or(ConfigError::InvalidRevealSteps)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            console: ConsoleConfig {
                reveal_tick_ms,
                reveal_steps,
            },
        })
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

const DEFAULT_REVEAL_TICK_MS: u64 = 50;
const DEFAULT_REVEAL_STEPS: u8 = 20;

/// Pacing of the animated score counter in the terminal wizard.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub reveal_tick_ms: u64,
    pub reveal_steps: u8,
}

impl ConsoleConfig {
    pub fn reveal_tick(&self) -> Duration {
        Duration::from_millis(self.reveal_tick_ms)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            reveal_tick_ms: DEFAULT_REVEAL_TICK_MS,
            reveal_steps: DEFAULT_REVEAL_STEPS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRevealTick,
    InvalidRevealSteps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRevealTick => {
                write!(f, "APP_REVEAL_TICK_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidRevealSteps => {
                write!(f, "APP_REVEAL_STEPS must be between 1 and 255")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRevealTick
            | ConfigError::InvalidRevealSteps => None,
        }
    }
}
