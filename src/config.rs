use crate::models::metadata::{DEFAULT_SYSTEM_HEADERS, MetadataPolicy};
use anyhow::{Context, Result};
use clap::Parser;
use std::env;

pub const TEST_ACCOUNT: &str = "swifttest";
pub const DEFAULT_PORT: u16 = 8080;

/// Centralized server configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Host used in the advertised auth and storage URLs. When unset the
    /// bound address is used, with wildcard hosts replaced by loopback.
    pub advertise_host: Option<String>,
    pub account: String,
    pub password: String,
    /// Canonical names of system headers persisted as metadata.
    pub system_headers: Vec<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "In-memory mock of the Swift object storage API")]
pub struct Args {
    /// Host to bind to (overrides SWIFT_MOCK_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to, 0 for any free port (overrides SWIFT_MOCK_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host advertised in auth/storage URLs (overrides SWIFT_MOCK_ADVERTISE_HOST)
    #[arg(long)]
    pub advertise_host: Option<String>,

    /// Name of the seeded test account (overrides SWIFT_MOCK_ACCOUNT)
    #[arg(long)]
    pub account: Option<String>,

    /// Password of the seeded test account (overrides SWIFT_MOCK_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,

    /// Comma-separated system metadata headers (overrides SWIFT_MOCK_SYSTEM_HEADERS)
    #[arg(long, value_delimiter = ',')]
    pub system_headers: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            advertise_host: None,
            account: TEST_ACCOUNT.into(),
            password: TEST_ACCOUNT.into(),
            system_headers: DEFAULT_SYSTEM_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::merge(Args::parse(), |key| env::var(key))
    }

    /// Merge CLI args over values from `lookup` over defaults.
    pub fn merge<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let defaults = Self::default();

        let env_port = match lookup("SWIFT_MOCK_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing SWIFT_MOCK_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => defaults.port,
            Err(err) => return Err(err).context("reading SWIFT_MOCK_PORT"),
        };
        let env_headers = lookup("SWIFT_MOCK_SYSTEM_HEADERS")
            .ok()
            .map(|v| split_list(&v));

        Ok(Self {
            host: args
                .host
                .or_else(|| lookup("SWIFT_MOCK_HOST").ok())
                .unwrap_or(defaults.host),
            port: args.port.unwrap_or(env_port),
            advertise_host: args
                .advertise_host
                .or_else(|| lookup("SWIFT_MOCK_ADVERTISE_HOST").ok()),
            account: args
                .account
                .or_else(|| lookup("SWIFT_MOCK_ACCOUNT").ok())
                .unwrap_or(defaults.account),
            password: args
                .password
                .or_else(|| lookup("SWIFT_MOCK_PASSWORD").ok())
                .unwrap_or(defaults.password),
            system_headers: args
                .system_headers
                .or(env_headers)
                .unwrap_or(defaults.system_headers),
        })
    }

    /// Loopback config on an ephemeral port, for tests.
    pub fn local() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            ..Self::default()
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn metadata_policy(&self) -> MetadataPolicy {
        MetadataPolicy::with_system_headers(&self.system_headers)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
