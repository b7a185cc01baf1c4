use crate::config::Settings;
use crate::domain::quote::DailyBar;
use crate::market::MarketDataClient;
use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Deserialize;
use std::collections::BTreeMap;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
// Some hosts reject requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; stockpulse/0.1)";

#[derive(Debug, Clone)]
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url: settings
                .market_data_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// The symbol is pushed as one encoded path segment.
    fn url(&self, symbol: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("invalid market data base url {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("market data base url cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }

    /// `Ok(None)` when the source has nothing usable for the symbol.
    async fn fetch_one(&self, symbol: &str) -> Result<Option<DailyBar>> {
        let res = self
            .http
            .get(self.url(symbol)?)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .with_context(|| format!("market data request failed for {symbol}"))?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(symbol, %status, "market data lookup rejected");
            return Ok(None);
        }

        let body = match res.json::<ChartResponse>().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(symbol, error = %err, "market data response not parseable");
                return Ok(None);
            }
        };

        if let Some(err) = body.chart.error.filter(|e| !e.is_null()) {
            tracing::debug!(symbol, error = %err, "market data source returned an error");
            return Ok(None);
        }

        Ok(body
            .chart
            .result
            .and_then(|mut r| r.pop())
            .and_then(|r| r.last_complete_bar()))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartResult {
    fn last_complete_bar(self) -> Option<DailyBar> {
        let q = self.indicators.quote.into_iter().next()?;
        let n = q.open.len().min(q.close.len());

        (0..n).rev().find_map(|i| {
            let open = q.open[i]?;
            let close = q.close[i]?;
            Some(DailyBar {
                date: self
                    .timestamp
                    .get(i)
                    .and_then(|ts| DateTime::from_timestamp(*ts, 0))
                    .map(|dt| dt.date_naive()),
                open,
                high: q.high.get(i).copied().flatten(),
                low: q.low.get(i).copied().flatten(),
                close,
            })
        })
    }
}

#[async_trait::async_trait]
impl MarketDataClient for YahooChartClient {
    fn provider_name(&self) -> &'static str {
        "yahoo_chart"
    }

    /// A failed lookup drops only that symbol. The call fails when every lookup failed.
    async fn fetch_daily_bars(&self, symbols: &[String]) -> Result<BTreeMap<String, DailyBar>> {
        let mut out = BTreeMap::new();
        let mut answered = false;
        let mut last_err = None;
        for symbol in symbols {
            if out.contains_key(symbol) {
                continue;
            }
            match self.fetch_one(symbol).await {
                Ok(bar) => {
                    answered = true;
                    if let Some(bar) = bar {
                        out.insert(symbol.clone(), bar);
                    }
                }
                Err(err) => {
                    tracing::warn!(symbol, error = %format!("{err:#}"), "market data lookup failed");
                    last_err = Some(err);
                }
            }
        }
        match last_err {
            Some(err) if !answered => Err(err),
            _ => Ok(out),
        }
    }
}
