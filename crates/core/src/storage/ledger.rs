//! Last recommendation per symbol, kept in a single JSON document.
//!
//! The document is replaced wholesale on every write and is not locked. Two runs racing on the
//! same file can see each other's categories.

use crate::domain::quote::Quote;
use crate::domain::recommendation::Category;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub type StoredPredictions = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct PredictionLedger {
    path: PathBuf,
}

impl PredictionLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored document with `predictions`. Symbols absent from `predictions` are
    /// gone afterwards.
    pub async fn record_today(
        &self,
        predictions: &BTreeMap<String, Category>,
    ) -> anyhow::Result<()> {
        let doc: StoredPredictions = predictions
            .iter()
            .map(|(symbol, category)| (symbol.clone(), category.as_str().to_string()))
            .collect();
        let body = serde_json::to_vec(&doc).context("failed to serialize predictions")?;

        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("failed to write prediction ledger {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), symbols = doc.len(), "recorded predictions");
        Ok(())
    }

    /// Stored predictions, or an empty map when nothing has been recorded yet.
    pub async fn load(&self) -> anyhow::Result<StoredPredictions> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredPredictions::new())
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read prediction ledger {}", self.path.display())
                })
            }
        };

        serde_json::from_slice(&bytes).with_context(|| {
            format!("prediction ledger {} is not a symbol map", self.path.display())
        })
    }

    /// For every quoted symbol with a stored prediction: whether the stored category equals
    /// today's realized direction ("Buy" when up, otherwise "Sell"). "Hold" and "Unknown"
    /// never match.
    pub async fn check_accuracy(
        &self,
        portfolio: &[Quote],
    ) -> anyhow::Result<BTreeMap<String, bool>> {
        let stored = self.load().await?;
        Ok(compare(&stored, portfolio))
    }
}

pub fn compare(stored: &StoredPredictions, portfolio: &[Quote]) -> BTreeMap<String, bool> {
    portfolio
        .iter()
        .filter_map(|quote| {
            let predicted = stored.get(&quote.symbol)?;
            Some((
                quote.symbol.clone(),
                predicted.as_str() == quote.realized_direction(),
            ))
        })
        .collect()
}
