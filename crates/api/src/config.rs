use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// External reward-redemption provider settings.
    pub rewards: RewardProviderConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            rewards: RewardProviderConfig::from_env(),
        }
    }
}

/// Default maximum delivery attempts against the reward provider.
const DEFAULT_REWARD_MAX_ATTEMPTS: u32 = 3;
/// Default base retry delay in milliseconds (scaled linearly by attempt).
const DEFAULT_REWARD_RETRY_DELAY_MS: u64 = 500;

/// Configuration for the external reward-redemption provider.
#[derive(Debug, Clone)]
pub struct RewardProviderConfig {
    /// Redemption endpoint URL.
    pub endpoint: String,
    /// Maximum redemption attempts before surfacing the last error.
    pub max_attempts: u32,
    /// Base retry delay in milliseconds. Attempt `n` waits `base * n`.
    pub retry_delay_ms: u64,
}

impl RewardProviderConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `REWARD_PROVIDER_URL`    | `http://localhost:9090/redeem`   |
    /// | `REWARD_MAX_ATTEMPTS`    | `3`                              |
    /// | `REWARD_RETRY_DELAY_MS`  | `500`                            |
    pub fn from_env() -> Self {
        let endpoint = std::env::var("REWARD_PROVIDER_URL")
            .unwrap_or_else(|_| "http://localhost:9090/redeem".into());

        let max_attempts: u32 = std::env::var("REWARD_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_REWARD_MAX_ATTEMPTS.to_string())
            .parse()
            .expect("REWARD_MAX_ATTEMPTS must be a valid u32");

        let retry_delay_ms: u64 = std::env::var("REWARD_RETRY_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_REWARD_RETRY_DELAY_MS.to_string())
            .parse()
            .expect("REWARD_RETRY_DELAY_MS must be a valid u64");

        Self {
            endpoint,
            max_attempts,
            retry_delay_ms,
        }
    }
}
