// ABOUTME: Environment-based configuration loaded once at startup
// ABOUTME: Parses JEFit credentials, catalog path, parser mode, HTTP timeouts, and transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use jefit_core::rsc::{ParseMode, RscParser};
use tracing::info;

use crate::constants::{defaults, env_vars, rsc::DEFAULT_MAX_MINING_DEPTH};
use crate::errors::{AppError, AppResult};

/// JEFit account and endpoint settings
#[derive(Clone)]
pub struct JefitConfig {
    /// Account username
    pub username: String,
    /// Account password (hashed before it leaves the process)
    pub password: String,
    /// UTC offset passed to the calendar endpoint, e.g. `-04:00`
    pub timezone: String,
    /// Scheme and host of the JEFit site, without trailing slash
    pub base_url: String,
}

impl fmt::Debug for JefitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JefitConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timezone", &self.timezone)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Exercise catalog storage
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON file holding id -> exercise record
    pub path: PathBuf,
}

/// Flight-stream parser settings
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// Lenient or strict handling of malformed upstream data
    pub mode: ParseMode,
    /// Mining depth cap
    pub max_depth: usize,
}

impl ParserConfig {
    /// Build the parser these settings describe
    #[must_use]
    pub const fn parser(&self) -> RscParser {
        RscParser::new(self.mode, self.max_depth)
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Which MCP transport the server runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// JSON-RPC lines over stdin/stdout
    Stdio,
    /// JSON-RPC over `POST /mcp`
    Http {
        /// Listening port
        port: u16,
    },
}

/// MCP transport selection
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bind address for the HTTP transport
    pub host: String,
    /// HTTP port; `None` selects stdio
    pub port: Option<u16>,
}

impl TransportConfig {
    /// Transport implied by the port setting
    #[must_use]
    pub const fn kind(&self) -> TransportKind {
        match self.port {
            Some(port) => TransportKind::Http { port },
            None => TransportKind::Stdio,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// JEFit account and endpoint
    pub jefit: JefitConfig,
    /// Exercise catalog storage
    pub catalog: CatalogConfig,
    /// Flight-stream parser
    pub parser: ParserConfig,
    /// Outbound HTTP timeouts
    pub http_client: HttpClientConfig,
    /// MCP transport
    pub transport: TransportConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when credentials are unset and
    /// `ConfigInvalid` when a numeric or enumerated value does not parse.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            jefit: JefitConfig {
                username: required_var(env_vars::JEFIT_USERNAME)?,
                password: required_var(env_vars::JEFIT_PASSWORD)?,
                timezone: env_var_or(env_vars::JEFIT_TIMEZONE, defaults::TIMEZONE),
                base_url: env_var_or(env_vars::JEFIT_BASE_URL, defaults::JEFIT_BASE_URL)
                    .trim_end_matches('/')
                    .to_owned(),
            },
            catalog: CatalogConfig {
                path: PathBuf::from(env_var_or(
                    env_vars::EXERCISE_DB_PATH,
                    defaults::EXERCISE_DB_PATH,
                )),
            },
            parser: ParserConfig {
                mode: parse_var(env_vars::JEFIT_RSC_MODE, ParseMode::Lenient)?,
                max_depth: parse_var(env_vars::RSC_MAX_DEPTH, DEFAULT_MAX_MINING_DEPTH)?,
            },
            http_client: HttpClientConfig {
                timeout_secs: parse_var(
                    env_vars::HTTP_CLIENT_TIMEOUT_SECS,
                    defaults::HTTP_CLIENT_TIMEOUT_SECS,
                )?,
                connect_timeout_secs: parse_var(
                    env_vars::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                    defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                )?,
            },
            transport: TransportConfig {
                host: env_var_or(env_vars::HOST, defaults::HOST),
                port: optional_parse_var(env_vars::PORT)?,
            },
        };

        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let transport = match self.transport.kind() {
            TransportKind::Stdio => "stdio".to_owned(),
            TransportKind::Http { port } => format!("http://{}:{port}/mcp", self.transport.host),
        };
        format!(
            "JEFit MCP Server Configuration:\n\
             - JEFit User: {}\n\
             - JEFit Base URL: {}\n\
             - Timezone Offset: {}\n\
             - Exercise DB: {}\n\
             - RSC Parse Mode: {} (max depth {})\n\
             - HTTP Timeouts: {}s request, {}s connect\n\
             - Transport: {transport}",
            self.jefit.username,
            self.jefit.base_url,
            self.jefit.timezone,
            self.catalog.path.display(),
            self.parser.mode,
            self.parser.max_depth,
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Non-empty environment variable or `ConfigMissing`
fn required_var(key: &str) -> AppResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config_missing(key)),
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional_parse_var(key).map(|value| value.unwrap_or(default))
}

/// Parse an environment variable if it is set and non-empty
fn optional_parse_var<T>(key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))),
        _ => Ok(None),
    }
}
