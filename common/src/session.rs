// common/src/session.rs
//! The interactive swap loop: pick tokens, enter an amount, confirm, swap,
//! then decide whether to go again.

use crate::catalog::TokenCatalog;
use crate::executor::{SwapExecutor, SwapRequest};
use crate::explorer::tx_url;
use crate::prompt::Prompter;
use crate::quote::{QuoteProvider, SwapBroadcaster};
use crate::spinner::with_spinner;
use crate::units::{supports_decimals, validate_amount};
use anyhow::{Context, Result};
use dialoguer::console::style;
use std::io::Write;
use tracing::{debug, warn};

const RULE: &str = "####################################################################";

pub struct Session<'a, P, Q, B, W> {
    catalog: &'a TokenCatalog,
    prompter: P,
    executor: SwapExecutor<Q, B>,
    explorer_base: String,
    out: W,
}

impl<'a, P, Q, B, W> Session<'a, P, Q, B, W> {
    pub fn new(
        catalog: &'a TokenCatalog,
        prompter: P,
        executor: SwapExecutor<Q, B>,
        explorer_base: impl Into<String>,
        out: W,
    ) -> Self {
        Session { catalog, prompter, executor, explorer_base: explorer_base.into(), out }
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<'a, P, Q, B, W> Session<'a, P, Q, B, W>
where
    P: Prompter,
    Q: QuoteProvider,
    B: SwapBroadcaster,
    W: Write,
{
    /// Runs swaps until the user declines to continue. Only prompt and
    /// output failures end the session early.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.run_once().await?;

            if !self.prompter.confirm("Do you want to perform another swap?")? {
                debug!("user ended the session");
                return Ok(());
            }
        }
    }

    async fn run_once(&mut self) -> Result<()> {
        writeln!(self.out, "{}", style("## Jupiter Swapper ##").blue())?;

        let Some(request) = self.ask_swap()? else {
            return Ok(());
        };

        if !self.prompter.confirm("Are you sure you want to proceed with this swap?")? {
            writeln!(self.out, "{}", style("Swap cancelled.\n").red())?;
            return Ok(());
        }

        writeln!(self.out, "{}", style("Performing swap...").blue())?;
        let result = with_spinner(
            "Waiting for quote and swap confirmation…",
            self.executor.execute(&request, self.catalog),
        )
        .await;

        match result {
            Ok(receipt) => {
                let url = tx_url(&self.explorer_base, &receipt.transaction_hash);
                writeln!(self.out, "{}", style(RULE).blue())?;
                writeln!(
                    self.out,
                    "{}",
                    style(format!("Success, check your transaction here: {url}")).dim()
                )?;
                writeln!(self.out, "{}", style(RULE).blue())?;
            }
            Err(e) => {
                warn!("swap failed: {e:#}");
                writeln!(self.out, "{}", style(RULE).red())?;
                writeln!(self.out, "{}", style(format!("Error during the swap: {e:#}")).red())?;
                writeln!(self.out, "{}", style(RULE).red())?;
            }
        }
        Ok(())
    }

    /// `None` when the source token cannot be swapped at all.
    fn ask_swap(&mut self) -> Result<Option<SwapRequest>> {
        let symbols = self.catalog.symbols();
        let from = self.pick(&symbols, "From Token")?;
        let to = self.pick(&symbols, "To Token")?;
        if from == to {
            warn!(token = %from, "source and destination token are the same");
        }

        let decimals = self
            .catalog
            .get(&from)
            .with_context(|| format!("unknown token {from}"))?
            .decimals;
        if !supports_decimals(decimals) {
            let msg = format!("{from} uses {decimals} decimals, which is not supported.\n");
            writeln!(self.out, "{}", style(msg).red())?;
            return Ok(None);
        }
        let amount = loop {
            let raw = self.prompter.input("Swap amount")?;
            match validate_amount(&raw, decimals) {
                Ok(_) => break raw.trim().to_string(),
                Err(msg) => writeln!(self.out, "{}", style(msg).red())?,
            }
        };

        Ok(Some(SwapRequest { from, to, amount }))
    }

    fn pick(&mut self, symbols: &[String], prompt: &str) -> Result<String> {
        let idx = self.prompter.select(prompt, symbols)?;
        symbols
            .get(idx)
            .cloned()
            .with_context(|| format!("selection {idx} out of range"))
    }
}
