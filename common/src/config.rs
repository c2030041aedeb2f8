// common/src/config.rs
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use std::env;

pub const DEFAULT_API_BASE: &str = "https://lite-api.jup.ag";
pub const DEFAULT_EXPLORER: &str = "https://solscan.io";
pub const DEFAULT_TOKEN_TAG: &str = "verified";
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Optional integrator fee, enabled only when both `FEE_ACCOUNT` and a
/// non-zero `FEE_BPS` are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegratorFee {
    pub account: String,
    pub bps: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub rpc_url: String,
    pub secret_key: Option<String>,
    pub keypair_path: Option<String>,
    pub public_key: Option<String>,
    pub api_key: Option<String>,
    pub slippage_bps: u16,
    pub token_tag: String,
    pub explorer_base: String,
    pub fee: Option<IntegratorFee>,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rpc_url = get("RPC_URL").context("RPC_URL must be set")?;

        let slippage_bps = match get("SLIPPAGE_BPS") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("SLIPPAGE_BPS is not a valid number: {raw}"))?,
            None => DEFAULT_SLIPPAGE_BPS,
        };
        if slippage_bps > 10_000 {
            bail!("SLIPPAGE_BPS must be at most 10000, got {slippage_bps}");
        }

        let fee_account = get("FEE_ACCOUNT");
        let fee_bps = get("FEE_BPS").and_then(|s| s.trim().parse::<u64>().ok());
        let fee = match (fee_account, fee_bps) {
            (Some(account), Some(bps)) if bps > 0 => Some(IntegratorFee { account, bps }),
            _ => None,
        };

        Ok(Config {
            api_base: get("JUPITER_API").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            rpc_url,
            secret_key: get("SECRET_KEY"),
            keypair_path: get("KEYPAIR_PATH"),
            public_key: get("PUBLIC_KEY"),
            api_key: get("API_KEY"),
            slippage_bps,
            token_tag: get("TOKEN_TAG").unwrap_or_else(|| DEFAULT_TOKEN_TAG.to_string()),
            explorer_base: get("EXPLORER_URL").unwrap_or_else(|| DEFAULT_EXPLORER.to_string()),
            fee,
        })
    }
}
