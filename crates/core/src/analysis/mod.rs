use crate::config::Settings;
use crate::domain::recommendation::{AnalysisReport, StockAnalysis};
use crate::llm::gemini::GeminiClient;
use crate::llm::{Provider, TextGenerator, UnconfiguredGenerator};
use crate::market::yahoo::YahooChartClient;
use crate::market::{self, MarketDataClient};
use crate::news::newsapi::NewsApiClient;
use crate::news::{self, NewsClient};
use crate::storage::ledger::PredictionLedger;
use std::sync::Arc;

pub mod deriver;
pub mod prompt;

/// Runs one analysis request end to end. Symbols are processed sequentially.
#[derive(Clone)]
pub struct Analyzer {
    market: Arc<dyn MarketDataClient>,
    news: Arc<dyn NewsClient>,
    generator: Arc<dyn TextGenerator>,
    ledger: PredictionLedger,
}

impl Analyzer {
    pub fn new(
        market: Arc<dyn MarketDataClient>,
        news: Arc<dyn NewsClient>,
        generator: Arc<dyn TextGenerator>,
        ledger: PredictionLedger,
    ) -> Self {
        Self {
            market,
            news,
            generator,
            ledger,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let market = YahooChartClient::from_settings(settings)?;
        let news = NewsApiClient::from_settings(settings)?;
        if settings.news_api_key.is_none() {
            tracing::warn!("NEWS_API_KEY missing; headlines will be empty");
        }

        let generator: Arc<dyn TextGenerator> = match GeminiClient::from_settings(settings) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Gemini client unavailable; recommendations will be Unknown"
                );
                Arc::new(UnconfiguredGenerator::new(Provider::Gemini, format!("{err:#}")))
            }
        };

        Ok(Self::new(
            Arc::new(market),
            Arc::new(news),
            generator,
            PredictionLedger::new(settings.ledger_path.clone()),
        ))
    }

    pub async fn run(&self, symbols: &[String]) -> anyhow::Result<AnalysisReport> {
        anyhow::ensure!(!symbols.is_empty(), "Stock symbols required");

        let portfolio = market::fetch_portfolio(self.market.as_ref(), symbols).await?;

        let mut report = AnalysisReport::default();
        for quote in &portfolio {
            let symbol = quote.symbol.as_str();
            let sentiment_analysis = news::analyze_symbol_news(self.news.as_ref(), symbol).await;

            let prompt = prompt::build_prompt(symbol, &sentiment_analysis);
            let generated = self.generator.generate(&prompt).await;
            if let Err(err) = &generated {
                tracing::warn!(
                    symbol,
                    provider = ?self.generator.provider(),
                    error = %err,
                    "analysis generation failed"
                );
            }
            let (brief_analysis, recommendation) = deriver::from_generation(generated);

            tracing::info!(
                symbol,
                %recommendation,
                sentiment_score = sentiment_analysis.sentiment_score,
                headlines = sentiment_analysis.headlines.len(),
                "analyzed symbol"
            );

            report.stock_analysis.insert(
                symbol.to_string(),
                StockAnalysis {
                    brief_analysis,
                    recommendation,
                    sentiment_analysis,
                },
            );
        }

        // Write happens before the accuracy read, so past_accuracy compares today's own
        // categories with today's move. Reordering would change the reported results.
        self.ledger.record_today(&report.categories()).await?;
        report.past_accuracy = self.ledger.check_accuracy(&portfolio).await?;

        Ok(report)
    }
}
