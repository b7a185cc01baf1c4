use crate::config::Settings;
use crate::news::NewsClient;
use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const EVERYTHING_PATH: &str = "/v2/everything";

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .build()
            .context("failed to build news http client")?;

        Ok(Self {
            http,
            base_url: settings
                .news_api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: settings.news_api_key.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), EVERYTHING_PATH)
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

#[async_trait::async_trait]
impl NewsClient for NewsApiClient {
    fn provider_name(&self) -> &'static str {
        "newsapi"
    }

    async fn fetch_headlines(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("NEWS_API_KEY is not configured")?;

        let res = self
            .http
            .get(self.url())
            .query(&[("q", query), ("sortBy", "publishedAt"), ("apiKey", api_key)])
            .send()
            .await
            .context("news request failed")?;

        let status = res.status();
        anyhow::ensure!(status.is_success(), "news provider HTTP {status}");

        let body = res
            .json::<EverythingResponse>()
            .await
            .context("failed to parse news response")?;

        Ok(body
            .articles
            .into_iter()
            .take(limit)
            .filter_map(|a| a.title)
            .collect())
    }
}
