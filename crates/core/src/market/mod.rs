use crate::domain::quote::{DailyBar, Quote};
use std::collections::{BTreeMap, HashSet};

pub mod yahoo;

#[async_trait::async_trait]
pub trait MarketDataClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Latest daily bar per symbol. Symbols the source does not know are absent from the map.
    async fn fetch_daily_bars(
        &self,
        symbols: &[String],
    ) -> anyhow::Result<BTreeMap<String, DailyBar>>;
}

/// Quotes for the requested symbols, in request order. Unknown symbols and repeats are dropped.
pub async fn fetch_portfolio(
    client: &dyn MarketDataClient,
    symbols: &[String],
) -> anyhow::Result<Vec<Quote>> {
    let bars = client.fetch_daily_bars(symbols).await?;

    let mut seen = HashSet::new();
    let mut portfolio = Vec::with_capacity(bars.len());
    for symbol in symbols {
        if !seen.insert(symbol.as_str()) {
            continue;
        }
        match bars.get(symbol) {
            Some(bar) => portfolio.push(Quote::from_bar(symbol.clone(), bar)),
            None => tracing::debug!(%symbol, "no market data for symbol; dropping"),
        }
    }

    tracing::info!(
        requested = symbols.len(),
        resolved = portfolio.len(),
        provider = client.provider_name(),
        "fetched portfolio quotes"
    );
    Ok(portfolio)
}
