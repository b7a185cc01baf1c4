pub mod error;
pub mod gemini;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
}

#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    /// Free-form completion for a single user prompt.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Stand-in used when the provider cannot be constructed (e.g. missing API key). Every call
/// fails, so each symbol degrades to an `Unknown` recommendation instead of failing startup.
#[derive(Debug, Clone)]
pub struct UnconfiguredGenerator {
    provider: Provider,
    reason: String,
}

impl UnconfiguredGenerator {
    pub fn new(provider: Provider, reason: impl Into<String>) -> Self {
        Self {
            provider,
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for UnconfiguredGenerator {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        Err(error::LlmDiagnosticsError::new(self.provider, "config", self.reason.clone()).into())
    }
}
