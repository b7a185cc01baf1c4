use crate::config::Settings;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::{Provider, TextGenerator};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_gemini_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings
                .gemini_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: settings
                .gemini_model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate_content(
        &self,
        req: GenerateContentRequest<'_>,
    ) -> anyhow::Result<GenerateContentResponse> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(&self.api_key)?);

        let res = self
            .http
            .post(self.url())
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Gemini response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            let detail = raw_response_json
                .as_ref()
                .and_then(|v| v.pointer("/error/message"))
                .and_then(|m| m.as_str())
                .map(|m| format!("status={status}: {m}"))
                .unwrap_or_else(|| format!("status={status}"));
            return Err(LlmDiagnosticsError {
                provider: Provider::Gemini,
                stage: "http",
                detail,
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        match serde_json::from_str::<GenerateContentResponse>(&text) {
            Ok(res) => Ok(res),
            Err(err) => Err(LlmDiagnosticsError {
                provider: Provider::Gemini,
                stage: "decode",
                detail: format!("failed to decode Gemini response: {err}"),
                raw_output: Some(text),
                raw_response_json: None,
            }
            .into()),
        }
    }

    fn response_text(res: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(reason) = res
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LlmDiagnosticsError::new(
                Provider::Gemini,
                "prompt_feedback",
                format!("prompt blocked: {reason}"),
            )
            .into());
        }

        let candidate = res.candidates.first().ok_or_else(|| {
            LlmDiagnosticsError::new(Provider::Gemini, "candidates", "response has no candidates")
        })?;

        let text: String = candidate
            .content
            .as_ref()
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(LlmDiagnosticsError::new(
                Provider::Gemini,
                "candidates",
                format!("candidate has no text (finish_reason={reason})"),
            )
            .into());
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };
        let res = self.generate_content(req).await?;
        Self::response_text(&res)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;
    use std::path::PathBuf;

    fn client(base_url: String) -> GeminiClient {
        let settings = Settings {
            news_api_key: None,
            news_api_base_url: None,
            gemini_api_key: Some("test-key".to_string()),
            gemini_base_url: Some(base_url),
            gemini_model: Some("gemini-test".to_string()),
            market_data_base_url: None,
            http_timeout_secs: 5,
            ledger_path: PathBuf::from("predictions.json"),
            sentry_dsn: None,
        };
        GeminiClient::from_settings(&settings).unwrap()
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let res: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Buy "}, {"text": "on dips."}]},
                 "finishReason": "STOP"},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(GeminiClient::response_text(&res).unwrap(), "Buy on dips.");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let res: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        let err = GeminiClient::response_text(&res).unwrap_err();
        assert!(err.to_string().contains("SAFETY"), "{err}");
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let res: GenerateContentResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(GeminiClient::response_text(&res).is_err());
    }

    #[test]
    fn requires_api_key() {
        let settings = Settings {
            news_api_key: None,
            news_api_base_url: None,
            gemini_api_key: None,
            gemini_base_url: None,
            gemini_model: None,
            market_data_base_url: None,
            http_timeout_secs: 5,
            ledger_path: PathBuf::from("predictions.json"),
            sentry_dsn: None,
        };
        let err = GeminiClient::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn posts_prompt_and_returns_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-test:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .json_body(json!({
                        "contents": [{"role": "user", "parts": [{"text": "Analyze TCS.NS"}]}]
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "candidates": [{"content": {"parts": [{"text": "Hold."}]}, "finishReason": "STOP"}]
                    }));
            })
            .await;

        let text = client(server.base_url()).generate("Analyze TCS.NS").await.unwrap();
        mock.assert_async().await;
        assert_eq!(text, "Hold.");
    }

    #[tokio::test]
    async fn http_error_carries_diagnostics() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1beta/models/gemini-test:generateContent");
                then.status(429).json_body(json!({
                    "error": {"code": 429, "message": "Resource has been exhausted"}
                }));
            })
            .await;

        let err = client(server.base_url()).generate("x").await.unwrap_err();
        let diag = err.downcast_ref::<LlmDiagnosticsError>().expect("diagnostics");
        assert_eq!(diag.stage, "http");
        assert!(diag.detail.contains("Resource has been exhausted"));
        assert!(diag.raw_output.is_some());
    }

    #[tokio::test]
    async fn undecodable_body_keeps_raw_text_out_of_message() {
        let server = MockServer::start_async().await;
        let body = format!("<html>{}</html>", "upstream proxy page ".repeat(200));
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1beta/models/gemini-test:generateContent");
                then.status(200).body(&body);
            })
            .await;

        let err = client(server.base_url()).generate("x").await.unwrap_err();
        let diag = err.downcast_ref::<LlmDiagnosticsError>().expect("diagnostics");
        assert_eq!(diag.stage, "decode");
        assert_eq!(diag.raw_output.as_deref(), Some(body.as_str()));

        let message = format!("{err:#}");
        assert!(!message.contains("upstream proxy page"), "{message}");
        assert!(message.len() < 300, "{message}");
    }
}
