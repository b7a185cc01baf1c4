pub mod analysis;
pub mod domain;
pub mod llm;
pub mod market;
pub mod news;
pub mod sentiment;
pub mod storage;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_LEDGER_PATH: &str = "predictions.json";
    const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub news_api_key: Option<String>,
        pub news_api_base_url: Option<String>,
        pub gemini_api_key: Option<String>,
        pub gemini_base_url: Option<String>,
        pub gemini_model: Option<String>,
        pub market_data_base_url: Option<String>,
        pub http_timeout_secs: u64,
        pub ledger_path: PathBuf,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let http_timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
                Ok(s) => s
                    .parse::<u64>()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be an integer (got {s})"))?,
                Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
            };

            let ledger_path = std::env::var("PREDICTION_LEDGER_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LEDGER_PATH.to_string());

            Ok(Self {
                news_api_key: non_empty_var("NEWS_API_KEY"),
                news_api_base_url: non_empty_var("NEWS_API_BASE_URL"),
                gemini_api_key: non_empty_var("GEMINI_API_KEY"),
                gemini_base_url: non_empty_var("GEMINI_BASE_URL"),
                gemini_model: non_empty_var("GEMINI_MODEL"),
                market_data_base_url: non_empty_var("MARKET_DATA_BASE_URL"),
                http_timeout_secs,
                ledger_path: PathBuf::from(ledger_path),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_gemini_api_key(&self) -> anyhow::Result<&str> {
            self.gemini_api_key
                .as_deref()
                .context("GEMINI_API_KEY is required")
        }

        pub fn http_timeout(&self) -> std::time::Duration {
            std::time::Duration::from_secs(self.http_timeout_secs)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }
}
