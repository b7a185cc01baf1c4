use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLC bar as returned by the market-data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: Option<NaiveDate>,
    pub open: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub last_price: f64,
    pub day_change: f64,
    pub day_change_percentage: f64,
}

impl Quote {
    pub fn from_bar(symbol: impl Into<String>, bar: &DailyBar) -> Self {
        let day_change = bar.close - bar.open;
        Self {
            symbol: symbol.into(),
            last_price: bar.close,
            day_change,
            day_change_percentage: (day_change / bar.open) * 100.0,
        }
    }

    /// The direction a correct prediction would have named for today's move.
    pub fn realized_direction(&self) -> &'static str {
        if self.day_change > 0.0 {
            "Buy"
        } else {
            "Sell"
        }
    }
}
