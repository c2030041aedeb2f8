// common/src/explorer.rs

/// Link to the transaction view of a block explorer.
pub fn tx_url(explorer_base: &str, tx_hash: &str) -> String {
    format!("{}/tx/{}", explorer_base.trim_end_matches('/'), tx_hash)
}
