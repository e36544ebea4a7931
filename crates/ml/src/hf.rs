use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use yatra_core::Language;

use crate::{TextGenerator, Translator};

const TRANSLATION_MAX_NEW_TOKENS: u32 = 256;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// Client for a hosted inference endpoint serving seq2seq text generation
/// and translation pipelines.
#[derive(Clone)]
pub struct HfInferenceClient {
    http_client: Client,
    endpoint: String,
    token: String,
    generation_model: String,
}

impl HfInferenceClient {
    pub fn new(endpoint: &str, token: &str, generation_model: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(timeout)
            .build()
            .context("failed building inference http client")?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.to_string(),
            generation_model: generation_model.to_string(),
        })
    }

    async fn run_pipeline(&self, model: &str, inputs: &str, max_new_tokens: u32) -> Result<Value> {
        let payload = InferenceRequest {
            inputs,
            parameters: InferenceParameters { max_new_tokens },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .http_client
            .post(format!("{}/models/{}", self.endpoint, model))
            .bearer_auth(self.token.as_str())
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("inference request to {model} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("inference non-success status {}: {}", status.as_u16(), body);
        }

        let body: Value = response
            .json()
            .await
            .with_context(|| format!("inference response from {model} was not json"))?;
        debug!(model, "inference call succeeded");
        Ok(body)
    }
}

#[async_trait]
impl TextGenerator for HfInferenceClient {
    fn model_name(&self) -> &str {
        &self.generation_model
    }

    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String> {
        let body = self
            .run_pipeline(&self.generation_model, prompt, max_new_tokens)
            .await?;
        extract_output_text(&body, &["generated_text", "text"])
            .context("generation output text missing")
    }
}

#[async_trait]
impl Translator for HfInferenceClient {
    async fn translate(&self, text: &str, language: Language) -> Result<String> {
        let body = self
            .run_pipeline(language.translation_model(), text, TRANSLATION_MAX_NEW_TOKENS)
            .await?;
        extract_output_text(&body, &["translation_text", "generated_text"])
            .context("translation output text missing")
    }
}

/// Pulls the first non-empty text field out of a pipeline response, which is
/// either a list of result objects or a single object.
pub fn extract_output_text(payload: &Value, keys: &[&str]) -> Option<String> {
    if let Some(error) = payload.get("error").and_then(|value| value.as_str()) {
        debug!(error, "inference payload carried an error");
        return None;
    }

    let first = match payload {
        Value::Array(items) => items.first()?,
        other => other,
    };

    keys.iter()
        .filter_map(|key| first.get(*key).and_then(|value| value.as_str()))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_generated_text_from_list() {
        let payload = json!([{ "generated_text": " Day 1 - Jaipur: Amber Fort " }]);
        assert_eq!(
            extract_output_text(&payload, &["generated_text", "text"]).as_deref(),
            Some("Day 1 - Jaipur: Amber Fort")
        );
    }

    #[test]
    fn translation_falls_back_to_generated_text() {
        let payload = json!([{ "translation_text": "", "generated_text": "Bonjour" }]);
        assert_eq!(
            extract_output_text(&payload, &["translation_text", "generated_text"]).as_deref(),
            Some("Bonjour")
        );
    }

    #[test]
    fn blank_translation_counts_as_missing() {
        let payload = json!([{ "translation_text": "   " }]);
        assert!(extract_output_text(&payload, &["translation_text", "generated_text"]).is_none());
    }

    #[test]
    fn error_payload_has_no_text() {
        let payload = json!({ "error": "Model is currently loading" });
        assert!(extract_output_text(&payload, &["generated_text"]).is_none());
    }

    #[test]
    fn empty_list_has_no_text() {
        assert!(extract_output_text(&json!([]), &["generated_text"]).is_none());
    }
}
