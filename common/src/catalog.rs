// common/src/catalog.rs
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    /// Mint address.
    pub address: String,
    pub decimals: u8,
}

/// Anything that can list the tradable tokens.
#[async_trait]
pub trait TokenCatalogSource: Send + Sync {
    async fn fetch_tokens(&self) -> Result<Vec<TokenInfo>>;
}

/// Symbol-keyed token lookup, built once per session.
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    tokens: BTreeMap<String, TokenInfo>,
}

impl TokenCatalog {
    /// A later token with an already-seen symbol replaces the earlier one.
    pub fn from_tokens(tokens: impl IntoIterator<Item = TokenInfo>) -> Self {
        let mut map = BTreeMap::new();
        for token in tokens {
            if let Some(prev) = map.insert(token.symbol.clone(), token) {
                debug!(symbol = %prev.symbol, replaced = %prev.address, "duplicate token symbol");
            }
        }
        TokenCatalog { tokens: map }
    }

    pub fn get(&self, symbol: &str) -> Option<&TokenInfo> {
        self.tokens.get(symbol)
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> Vec<String> {
        self.tokens.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Fetches the supported tokens and builds the lookup table. Failures are
/// logged here and handed back to the caller.
pub async fn load_catalog<S>(source: &S) -> Result<TokenCatalog>
where
    S: TokenCatalogSource + ?Sized,
{
    let catalog = match source.fetch_tokens().await {
        Ok(tokens) => TokenCatalog::from_tokens(tokens),
        Err(e) => {
            error!("error detected while loading supported tokens: {e:#}");
            return Err(e);
        }
    };
    if catalog.is_empty() {
        error!("error detected while loading supported tokens: empty token list");
        bail!("the token list is empty");
    }
    debug!(tokens = catalog.len(), "token catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn token(symbol: &str, address: &str, decimals: u8) -> TokenInfo {
        TokenInfo { symbol: symbol.into(), address: address.into(), decimals }
    }

    struct FixedSource(Vec<TokenInfo>);

    #[async_trait]
    impl TokenCatalogSource for FixedSource {
        async fn fetch_tokens(&self) -> Result<Vec<TokenInfo>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TokenCatalogSource for FailingSource {
        async fn fetch_tokens(&self) -> Result<Vec<TokenInfo>> {
            Err(anyhow!("service unavailable"))
        }
    }

    #[tokio::test]
    async fn test_catalog_has_one_entry_per_token() {
        let source = FixedSource(vec![
            token("SOL", "So11111111111111111111111111111111111111112", 9),
            token("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6),
            token("JUP", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", 6),
        ]);
        let catalog = load_catalog(&source).await.unwrap();

        assert_eq!(catalog.len(), 3);
        let usdc = catalog.get("USDC").unwrap();
        assert_eq!(usdc.address, "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
        assert_eq!(usdc.decimals, 6);
        assert_eq!(catalog.get("SOL").unwrap().decimals, 9);
        assert_eq!(catalog.symbols(), vec!["JUP", "SOL", "USDC"]);
    }

    #[test]
    fn test_duplicate_symbol_last_wins() {
        let catalog = TokenCatalog::from_tokens(vec![token("USDC", "first", 6), token("USDC", "second", 6)]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("USDC").unwrap().address, "second");
    }

    #[tokio::test]
    async fn test_load_failure_is_returned() {
        let err = load_catalog(&FailingSource).await.unwrap_err();
        assert_eq!(err.to_string(), "service unavailable");
    }

    #[tokio::test]
    async fn test_empty_list_is_an_error() {
        assert!(load_catalog(&FixedSource(vec![])).await.is_err());
    }
}
