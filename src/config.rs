//! Public draw parameters and RPC endpoint settings.
//!
//! [`LotteryParams`] are the announced rules of the draw; changing any of
//! them changes eligibility. [`Settings`] only select where ledger data is
//! read from and never reach the engine.

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::CliError;

/// Token mint whose holders are eligible (mainnet).
pub const TOKEN_MINT: &str = "9NrkmoqwF1rBjsfKZvn7ngCy6zqvb8A6A5RfTvR2pump";
/// Public exclusion list committed next to the tool.
pub const EXCLUDED_WALLETS_FILE: &str = "excluded_wallets.mainnet.txt";
pub const TOKEN_DECIMALS: u32 = 6;
/// One whole token, in raw units.
pub const MIN_RAW_BALANCE: u128 = 10u128.pow(TOKEN_DECIMALS);

pub const DEFAULT_TIMEOUT_SECS: f64 = 60.0;
const HELIUS_MAINNET_URL: &str = "https://mainnet.helius-rpc.com/?api-key=";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotteryParams {
    pub mint: String,
    pub excluded_wallets_file: Option<PathBuf>,
    pub token_decimals: u32,
    pub min_raw_balance: u128,
}

impl Default for LotteryParams {
    fn default() -> Self {
        Self {
            mint: TOKEN_MINT.to_owned(),
            excluded_wallets_file: Some(PathBuf::from(EXCLUDED_WALLETS_FILE)),
            token_decimals: TOKEN_DECIMALS,
            min_raw_balance: MIN_RAW_BALANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rpc_url: String,
    pub timeout: Duration,
}

impl Settings {
    /// Load `.env` (if present) and resolve from the process environment.
    pub fn from_env(rpc_url_override: Option<String>, timeout_secs: f64) -> Result<Self, CliError> {
        // a missing .env is normal
        let _ = dotenv::dotenv();
        Self::resolve(
            rpc_url_override,
            std::env::var("RPC_URL").ok(),
            std::env::var("HELIUS_API_KEY").ok(),
            timeout_secs,
        )
    }

    /// Override, then `RPC_URL`, then a Helius URL built from `HELIUS_API_KEY`.
    pub fn resolve(
        rpc_url_override: Option<String>,
        env_rpc_url: Option<String>,
        helius_api_key: Option<String>,
        timeout_secs: f64,
    ) -> Result<Self, CliError> {
        let timeout = parse_timeout(timeout_secs)?;
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());

        let rpc_url = if let Some(url) = non_empty(rpc_url_override) {
            url
        } else if let Some(url) = non_empty(env_rpc_url) {
            url
        } else if let Some(key) = non_empty(helius_api_key) {
            format!("{HELIUS_MAINNET_URL}{key}")
        } else {
            return Err(CliError::Config(
                "missing HELIUS_API_KEY (or RPC_URL); put it in .env or export it".into(),
            ));
        };
        Ok(Self { rpc_url, timeout })
    }

    /// Endpoint without query string, safe to log.
    #[must_use]
    pub fn redacted_url(&self) -> &str {
        self.rpc_url.split('?').next().unwrap_or_default()
    }
}

fn parse_timeout(secs: f64) -> Result<Duration, CliError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(CliError::Config(format!("timeout must be a positive number of seconds, got {secs}")));
    }
    Ok(Duration::from_secs_f64(secs))
}
