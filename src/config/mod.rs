// Configuration module entry point
// Server settings, SMS credentials, and shared application state

mod credentials;
mod state;
mod types;

use std::net::SocketAddr;

pub use credentials::{
    CredentialSource, ProcessEnv, SmsCredentials, ENV_ACCOUNT_SID, ENV_AUTH_TOKEN, ENV_FROM_PHONE,
    ENV_TO_PHONE,
};
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig, SmsConfig,
};

/// Default Twilio REST API base
pub const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

impl Config {
    /// Load configuration from specified file path (without extension).
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// Environment variables use the `RELAY` prefix with `__` between
    /// sections, e.g. `RELAY_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("RELAY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Built-in defaults only, without file or environment sources
    pub fn defaults() -> Result<Self, config::ConfigError> {
        with_defaults(config::Config::builder())?
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(builder: Builder) -> Result<Builder, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("http.server_name", "estimate-relay")?
        .set_default("http.enable_cors", false)?
        .set_default("http.max_body_size", 65_536)? // 64KB
        .set_default("routes.estimate_path", "/api/estimate")?
        .set_default("sms.api_base", TWILIO_API_BASE)
}
