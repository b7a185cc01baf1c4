use crate::domain::recommendation::SentimentAnalysis;
use crate::sentiment;

pub mod newsapi;

pub const MAX_HEADLINES: usize = 5;

#[async_trait::async_trait]
pub trait NewsClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Most recent headlines for `query`, newest first, at most `limit` entries.
    async fn fetch_headlines(&self, query: &str, limit: usize) -> anyhow::Result<Vec<String>>;
}

/// Outcome of a headline lookup. A failed lookup still yields an (empty) headline set, but the
/// two cases stay distinguishable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsFetch {
    Fetched(Vec<String>),
    Degraded { reason: String },
}

impl NewsFetch {
    pub fn headlines(&self) -> &[String] {
        match self {
            NewsFetch::Fetched(headlines) => headlines,
            NewsFetch::Degraded { .. } => &[],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, NewsFetch::Degraded { .. })
    }
}

/// Search term for a ticker: everything before the first `.` ("TCS.NS" -> "TCS").
pub fn query_term(symbol: &str) -> &str {
    symbol.split('.').next().unwrap_or(symbol)
}

pub async fn fetch_news(client: &dyn NewsClient, symbol: &str) -> NewsFetch {
    let query = query_term(symbol);
    match client.fetch_headlines(query, MAX_HEADLINES).await {
        Ok(mut headlines) => {
            headlines.truncate(MAX_HEADLINES);
            NewsFetch::Fetched(headlines)
        }
        Err(err) => {
            tracing::warn!(
                symbol,
                query,
                provider = client.provider_name(),
                error = %err,
                "news fetch failed; continuing without headlines"
            );
            NewsFetch::Degraded {
                reason: format!("{err:#}"),
            }
        }
    }
}

pub fn summarize(fetch: &NewsFetch) -> SentimentAnalysis {
    let headlines = fetch.headlines().to_vec();
    let sentiment_score = headlines
        .iter()
        .map(|h| i64::from(sentiment::score(h)))
        .sum();
    SentimentAnalysis {
        headlines,
        sentiment_score,
    }
}

pub async fn analyze_symbol_news(client: &dyn NewsClient, symbol: &str) -> SentimentAnalysis {
    summarize(&fetch_news(client, symbol).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeNews {
        result: Result<Vec<String>, String>,
        queries: Mutex<Vec<(String, usize)>>,
    }

    impl FakeNews {
        fn ok(headlines: &[&str]) -> Self {
            Self {
                result: Ok(headlines.iter().map(|s| s.to_string()).collect()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                result: Err(msg.to_string()),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl NewsClient for FakeNews {
        fn provider_name(&self) -> &'static str {
            "fake"
        }

        async fn fetch_headlines(&self, query: &str, limit: usize) -> anyhow::Result<Vec<String>> {
            self.queries.lock().unwrap().push((query.to_string(), limit));
            self.result.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    #[test]
    fn strips_exchange_suffix_from_query() {
        assert_eq!(query_term("TCS.NS"), "TCS");
        assert_eq!(query_term("BRK.B.X"), "BRK");
        assert_eq!(query_term("AAPL"), "AAPL");
        assert_eq!(query_term(""), "");
    }

    #[tokio::test]
    async fn queries_with_stripped_symbol_and_limit_five() {
        let news = FakeNews::ok(&[]);
        let _ = fetch_news(&news, "INFY.NS").await;
        assert_eq!(
            news.queries.lock().unwrap().as_slice(),
            &[("INFY".to_string(), MAX_HEADLINES)]
        );
    }

    #[tokio::test]
    async fn score_is_sum_of_headline_scores() {
        let headlines = [
            "Profits surge at TCS",
            "TCS shares plunge on weak guidance",
            "Analysts upgrade TCS after strong quarter",
            "TCS board meets on Friday",
        ];
        let news = FakeNews::ok(&headlines);
        let analysis = analyze_symbol_news(&news, "TCS.NS").await;

        let expected: i64 = headlines.iter().map(|h| i64::from(sentiment::score(h))).sum();
        assert_eq!(analysis.sentiment_score, expected);
        assert_eq!(analysis.sentiment_score, 1);
        assert_eq!(analysis.headlines.len(), 4);
        assert_eq!(analysis.headlines[0], "Profits surge at TCS");
    }

    #[tokio::test]
    async fn keeps_at_most_five_headlines_in_order() {
        let news = FakeNews::ok(&["a", "b", "c", "d", "e", "f", "g"]);
        let fetch = fetch_news(&news, "X").await;
        assert_eq!(fetch.headlines(), &["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn failure_degrades_to_empty_set() {
        let news = FakeNews::failing("connection refused");
        let fetch = fetch_news(&news, "TCS.NS").await;
        assert!(fetch.is_degraded());
        match &fetch {
            NewsFetch::Degraded { reason } => assert!(reason.contains("connection refused")),
            other => panic!("unexpected {other:?}"),
        }

        let analysis = summarize(&fetch);
        assert_eq!(analysis, SentimentAnalysis::default());
    }

    #[tokio::test]
    async fn empty_result_is_not_degraded() {
        let news = FakeNews::ok(&[]);
        let fetch = fetch_news(&news, "TCS.NS").await;
        assert_eq!(fetch, NewsFetch::Fetched(Vec::new()));
        assert_eq!(summarize(&fetch).sentiment_score, 0);
    }
}
