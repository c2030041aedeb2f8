// common/src/jupiter.rs
//! Jupiter implementations of the catalog, quote and swap seams.

use crate::catalog::{TokenCatalogSource, TokenInfo};
use crate::config::{Config, IntegratorFee};
use crate::quote::{Quote, QuoteProvider, QuoteRequest, SwapBroadcaster, SwapReceipt};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::decode;
use bincode::deserialize;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    signature::{read_keypair_file, Keypair, Signer},
    transaction::VersionedTransaction,
};
use tracing::debug;

// ─────────────────── HTTP ───────────────────

pub fn http_client() -> Result<Client> {
    Client::builder().build().context("failed to build HTTP client")
}

trait JupiterReqExt {
    fn with_jupiter_key(self, key: Option<&str>) -> Self;
}

/// Attaches the API key as `X-API-KEY` when one is configured.
impl JupiterReqExt for reqwest::RequestBuilder {
    fn with_jupiter_key(self, key: Option<&str>) -> Self {
        match key {
            Some(key) if !key.is_empty() => self.header("X-API-KEY", key),
            _ => self,
        }
    }
}

#[derive(Deserialize, Debug)]
struct TokenEntry {
    #[serde(alias = "address")]
    id: String,
    symbol: String,
    decimals: u8,
}

#[derive(Deserialize, Debug)]
pub struct SwapResponse {
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,
    #[serde(rename = "lastValidBlockHeight")]
    pub last_valid_block_height: u64,
}

/// Client for the Jupiter token, quote and swap-build endpoints.
#[derive(Clone)]
pub struct JupiterClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    slippage_bps: u16,
    token_tag: String,
    fee: Option<IntegratorFee>,
}

impl JupiterClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(JupiterClient {
            http: http_client()?,
            base_url: cfg.api_base.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            slippage_bps: cfg.slippage_bps,
            token_tag: cfg.token_tag.clone(),
            fee: cfg.fee.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Asks the aggregator to turn a quote into an unsigned transaction for
    /// `user_pubkey`, who also pays the fees.
    pub async fn build_swap(&self, quote: &Quote, user_pubkey: &str) -> Result<SwapResponse> {
        let mut body = json!({
            "quoteResponse": quote,
            "userPublicKey": user_pubkey,
            "payer": user_pubkey,
        });
        if let Some(fee) = &self.fee {
            body["feeAccount"] = fee.account.clone().into();
        }

        debug!(user = user_pubkey, "requesting swap transaction");
        let resp: SwapResponse = self
            .http
            .post(self.url("/swap/v1/swap"))
            .with_jupiter_key(self.api_key.as_deref())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to decode swap response")?;
        Ok(resp)
    }
}

#[async_trait]
impl TokenCatalogSource for JupiterClient {
    async fn fetch_tokens(&self) -> Result<Vec<TokenInfo>> {
        debug!(tag = %self.token_tag, "fetching token list");
        let entries: Vec<TokenEntry> = self
            .http
            .get(self.url("/tokens/v2/tag"))
            .query(&[("query", self.token_tag.as_str())])
            .with_jupiter_key(self.api_key.as_deref())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to decode token list")?;

        Ok(entries
            .into_iter()
            .map(|t| TokenInfo { symbol: t.symbol, address: t.id, decimals: t.decimals })
            .collect())
    }
}

#[async_trait]
impl QuoteProvider for JupiterClient {
    /// Jupiter answers with its single best route.
    async fn fetch_quotes(&self, req: &QuoteRequest) -> Result<Vec<Quote>> {
        let mut query = vec![
            ("inputMint", req.sell_token.clone()),
            ("outputMint", req.buy_token.clone()),
            ("amount", req.sell_amount.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
        ];
        if let Some(fee) = &self.fee {
            query.push(("platformFeeBps", fee.bps.to_string()));
        }

        debug!(?req, "requesting quote");
        let quote: Quote = self
            .http
            .get(self.url("/swap/v1/quote"))
            .query(&query)
            .with_jupiter_key(self.api_key.as_deref())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to decode quote")?;
        Ok(vec![quote])
    }
}

// ─────────────────── Account ───────────────────

/// RPC connection plus the keypair that signs for `address`.
pub struct Account {
    rpc: RpcClient,
    keypair: Keypair,
    address: String,
}

impl Account {
    /// `PUBLIC_KEY` is taken as given; without it the keypair's own pubkey
    /// is used.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let keypair = keypair(cfg)?;
        let address = cfg
            .public_key
            .clone()
            .unwrap_or_else(|| keypair.pubkey().to_string());
        Ok(Account { rpc: RpcClient::new(cfg.rpc_url.clone()), keypair, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Load Keypair from SECRET_KEY (base58) or fall back to KEYPAIR_PATH file.
pub fn keypair(cfg: &Config) -> Result<Keypair> {
    if let Some(secret_b58) = &cfg.secret_key {
        let bytes = bs58::decode(secret_b58)
            .into_vec()
            .context("invalid base58 in SECRET_KEY")?;
        Keypair::from_bytes(&bytes)
            .map_err(|e| anyhow!("failed to construct keypair from SECRET_KEY: {e}"))
    } else if let Some(path) = &cfg.keypair_path {
        read_keypair_file(path).map_err(|e| anyhow!("failed to read keypair from {path}: {e}"))
    } else {
        Err(anyhow!("either SECRET_KEY or KEYPAIR_PATH must be set"))
    }
}

fn sign_versioned_tx(tx: &mut VersionedTransaction, kp: &Keypair) -> Result<()> {
    let serialized = tx.message.serialize();
    let signature = kp
        .try_sign_message(&serialized)
        .context("failed to sign transaction")?;
    tx.signatures = vec![signature];
    Ok(())
}

/// Decodes the base64 bincode transaction returned by the swap endpoint.
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction> {
    let bytes = decode(encoded).context("swap transaction is not valid base64")?;
    deserialize(&bytes).context("swap transaction is not a versioned transaction")
}

// ─────────────────── Swap (/quote -> /swap -> send) ───────────────────

/// Executes quotes for one account: build through Jupiter, sign locally,
/// send and confirm over RPC.
pub struct JupiterSwapper {
    client: JupiterClient,
    account: Account,
}

impl JupiterSwapper {
    pub fn new(client: JupiterClient, account: Account) -> Self {
        JupiterSwapper { client, account }
    }
}

#[async_trait]
impl SwapBroadcaster for JupiterSwapper {
    async fn execute(&self, quote: &Quote) -> Result<SwapReceipt> {
        let swap = self.client.build_swap(quote, self.account.address()).await?;
        debug!(last_valid_block_height = swap.last_valid_block_height, "swap transaction built");

        let mut tx = decode_transaction(&swap.swap_transaction)?;
        sign_versioned_tx(&mut tx, &self.account.keypair)?;

        let signature = self
            .account
            .rpc
            .send_and_confirm_transaction(&tx)
            .await
            .context("failed to send swap transaction")?;
        debug!(%signature, "swap confirmed");

        Ok(SwapReceipt { transaction_hash: signature.to_string() })
    }
}
