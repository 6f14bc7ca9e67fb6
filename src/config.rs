use anyhow::{Context, Result};
use config::{Config, Environment};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::entity::TokenCreatorError;
use crate::pinata::config::{DEFAULT_API_URL, DEFAULT_GATEWAY_URL};
use crate::pinata::PinataConfig;
use crate::solana::retry::{DEFAULT_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use crate::solana::tokens::constants::DEFAULT_FEE_SOL;
use crate::solana::utils::sol_to_lamports;
use crate::solana::RetryPolicy;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_fee_sol() -> String {
    DEFAULT_FEE_SOL.to_string()
}

fn default_pinata_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_pinata_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_retry_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

/// Application configuration, read from the process environment
/// (`SOLANA_RPC_URL` maps to `solana_rpc_url` and so on).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_rpc_url")]
    pub solana_rpc_url: String,

    /// Server secret key, as a JSON byte array or base58
    pub server_keypair: String,

    /// Wallet receiving the issuance fee; defaults to the server wallet
    #[serde(default)]
    pub fee_destination: Option<String>,

    /// Issuance fee in SOL
    #[serde(default = "default_fee_sol")]
    pub fee_sol: String,

    /// Comma-separated list of allowed browser origins
    #[serde(default)]
    pub frontend_url: Option<String>,

    #[serde(default)]
    pub pinata_api_key: String,
    #[serde(default)]
    pub pinata_secret_api_key: String,
    #[serde(default = "default_pinata_api_url")]
    pub pinata_api_url: String,
    #[serde(default = "default_pinata_gateway_url")]
    pub pinata_gateway_url: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_retry_attempts")]
    pub ata_retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub ata_retry_delay_ms: u64,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration from environment")?;

        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Config) -> Result<Self> {
        let config: AppConfig = settings
            .try_deserialize()
            .context("SERVER_KEYPAIR must be set in environment variables")?;

        // Surface a bad fee early instead of on the first request
        config.fee_lamports()?;

        Ok(config)
    }

    pub fn fee_lamports(&self) -> Result<u64> {
        let fee = Decimal::from_str(self.fee_sol.trim()).map_err(|_| {
            TokenCreatorError::Config(format!("FEE_SOL is not a decimal: {}", self.fee_sol))
        })?;
        sol_to_lamports(fee)
            .map_err(|e| TokenCreatorError::Config(format!("FEE_SOL is invalid: {}", e)).into())
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.frontend_url
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.ata_retry_attempts,
            Duration::from_millis(self.ata_retry_delay_ms),
        )
    }

    pub fn pinata(&self) -> PinataConfig {
        PinataConfig {
            api_url: self.pinata_api_url.trim_end_matches('/').to_string(),
            api_key: self.pinata_api_key.clone(),
            secret_api_key: self.pinata_secret_api_key.clone(),
            gateway_url: self.pinata_gateway_url.clone(),
        }
    }
}
