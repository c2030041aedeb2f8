// common/src/quote.rs
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What to sell and how much of it, in the sell token's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub sell_token: String,
    pub buy_token: String,
    pub sell_amount: u64,
}

/// Aggregator quote. Fields the client does not model are kept in `extra`
/// so the quote can be echoed back unchanged when building the swap.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    pub other_amount_threshold: String,
    pub swap_mode: String,
    pub slippage_bps: u64,
    #[serde(default)]
    pub platform_fee: Option<serde_json::Value>,
    pub price_impact_pct: String,
    #[serde(default)]
    pub route_plan: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Quotes in the provider's preferred order; callers take the first.
    async fn fetch_quotes(&self, req: &QuoteRequest) -> Result<Vec<Quote>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub transaction_hash: String,
}

/// Signs and submits a quoted swap on behalf of an account.
#[async_trait]
pub trait SwapBroadcaster: Send + Sync {
    async fn execute(&self, quote: &Quote) -> Result<SwapReceipt>;
}
