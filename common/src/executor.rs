// common/src/executor.rs
use crate::catalog::TokenCatalog;
use crate::quote::{QuoteProvider, QuoteRequest, SwapBroadcaster, SwapReceipt};
use crate::units::parse_units;
use anyhow::{Context, Result};
use tracing::debug;

/// One swap as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub from: String,
    pub to: String,
    /// Human-readable amount of `from`, e.g. `"1.5"`.
    pub amount: String,
}

/// Maps symbols to mints and the amount to the sell token's smallest unit.
pub fn quote_request(req: &SwapRequest, catalog: &TokenCatalog) -> Result<QuoteRequest> {
    let sell = catalog
        .get(&req.from)
        .with_context(|| format!("unknown token {}", req.from))?;
    let buy = catalog
        .get(&req.to)
        .with_context(|| format!("unknown token {}", req.to))?;
    let sell_amount = parse_units(&req.amount, sell.decimals)?;

    Ok(QuoteRequest {
        sell_token: sell.address.clone(),
        buy_token: buy.address.clone(),
        sell_amount,
    })
}

/// Quote, take the first offer, execute it.
pub struct SwapExecutor<Q, B> {
    quotes: Q,
    broadcaster: B,
}

impl<Q, B> SwapExecutor<Q, B>
where
    Q: QuoteProvider,
    B: SwapBroadcaster,
{
    pub fn new(quotes: Q, broadcaster: B) -> Self {
        SwapExecutor { quotes, broadcaster }
    }

    pub async fn execute(&self, req: &SwapRequest, catalog: &TokenCatalog) -> Result<SwapReceipt> {
        let quote_req = quote_request(req, catalog)?;

        let quotes = self.quotes.fetch_quotes(&quote_req).await?;
        let quote = quotes.first().context("no quotes returned for this pair")?;
        debug!(
            from = %req.from,
            to = %req.to,
            in_amount = %quote.in_amount,
            out_amount = %quote.out_amount,
            price_impact = %quote.price_impact_pct,
            "executing first quote"
        );

        self.broadcaster.execute(quote).await
    }
}
