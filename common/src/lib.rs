// common/src/lib.rs
pub mod catalog;
pub mod config;
pub mod executor;
pub mod explorer;
pub mod jupiter;
pub mod prompt;
pub mod quote;
pub mod session;
pub mod spinner;
pub mod units;

pub use catalog::{load_catalog, TokenCatalog, TokenCatalogSource, TokenInfo};
pub use config::{Config, IntegratorFee};
pub use executor::{quote_request, SwapExecutor, SwapRequest};
pub use jupiter::{Account, JupiterClient, JupiterSwapper};
pub use prompt::{DialoguerPrompter, Prompter};
pub use quote::{Quote, QuoteProvider, QuoteRequest, SwapBroadcaster, SwapReceipt};
pub use session::Session;

use anyhow::{Context, Result};
use dialoguer::console::Term;
use spinner::with_spinner;

// ─────────────────── Swap Session (tokens -> prompt -> quote -> swap) ───────────────────

pub async fn swap_session(cfg: &Config) -> Result<()> {
    let client = JupiterClient::new(cfg)?;

    let catalog = with_spinner("Loading supported tokens…", load_catalog(&client))
        .await
        .context("could not load the supported token list")?;

    let account = Account::from_config(cfg)?;
    let swapper = JupiterSwapper::new(client.clone(), account);
    let executor = SwapExecutor::new(client, swapper);

    let mut session = Session::new(
        &catalog,
        DialoguerPrompter::new(),
        executor,
        cfg.explorer_base.clone(),
        Term::stdout(),
    );
    session.run().await
}
