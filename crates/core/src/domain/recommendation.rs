use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Buy,
    Sell,
    Hold,
    Unknown,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Buy => "Buy",
            Category::Sell => "Sell",
            Category::Hold => "Hold",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headlines for one symbol and the sum of their polarities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub headlines: Vec<String>,
    pub sentiment_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub brief_analysis: String,
    pub recommendation: Category,
    pub sentiment_analysis: SentimentAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub stock_analysis: BTreeMap<String, StockAnalysis>,
    pub past_accuracy: BTreeMap<String, bool>,
}

impl AnalysisReport {
    /// Categories keyed by symbol, in the shape the prediction ledger stores.
    pub fn categories(&self) -> BTreeMap<String, Category> {
        self.stock_analysis
            .iter()
            .map(|(symbol, analysis)| (symbol.clone(), analysis.recommendation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_wire_shape() {
        let mut report = AnalysisReport::default();
        report.stock_analysis.insert(
            "TCS.NS".to_string(),
            StockAnalysis {
                brief_analysis: "Hold for now".to_string(),
                recommendation: Category::Hold,
                sentiment_analysis: SentimentAnalysis {
                    headlines: vec!["TCS wins deal".to_string()],
                    sentiment_score: 1,
                },
            },
        );
        report.past_accuracy.insert("TCS.NS".to_string(), false);

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(
            v,
            json!({
                "stock_analysis": {
                    "TCS.NS": {
                        "brief_analysis": "Hold for now",
                        "recommendation": "Hold",
                        "sentiment_analysis": {
                            "headlines": ["TCS wins deal"],
                            "sentiment_score": 1
                        }
                    }
                },
                "past_accuracy": {"TCS.NS": false}
            })
        );
    }
}
