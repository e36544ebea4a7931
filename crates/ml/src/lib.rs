mod fallback;
mod hf;
mod tts;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use yatra_core::Language;

pub use fallback::{OfflineGenerator, OfflineSpeech, OfflineTranslator};
pub use hf::{extract_output_text, HfInferenceClient};
pub use tts::{split_for_speech, GoogleTranslateTts};

pub const DEFAULT_GENERATION_MODEL: &str = "google/flan-t5-base";
pub const DEFAULT_HF_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model_name(&self) -> &str;
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, language: Language) -> Result<String>;
}

/// Produces MP3 audio for `text` spoken in `lang` (an ISO 639-1 code).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct MlConfig {
    pub hf_token: Option<String>,
    pub hf_endpoint: String,
    pub generation_model: String,
    pub http_timeout: Duration,
    pub tts_endpoint: String,
    pub tts_disabled: bool,
}

impl MlConfig {
    pub fn from_env() -> Self {
        let http_timeout = env::var("YATRA_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(60);

        Self {
            hf_token: env::var("YATRA_HF_TOKEN")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            hf_endpoint: env::var("YATRA_HF_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_HF_ENDPOINT.to_string()),
            generation_model: env::var("YATRA_GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            http_timeout: Duration::from_secs(http_timeout),
            tts_endpoint: env::var("YATRA_TTS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_TTS_ENDPOINT.to_string()),
            tts_disabled: matches!(
                env::var("YATRA_TTS_DISABLED").as_deref(),
                Ok("1") | Ok("true") | Ok("yes")
            ),
        }
    }
}

#[derive(Clone)]
pub struct MlStack {
    pub generator: Arc<dyn TextGenerator>,
    pub translator: Arc<dyn Translator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub remote_enabled: bool,
}

impl MlStack {
    pub fn load_default() -> Result<Self> {
        Self::from_config(&MlConfig::from_env())
    }

    pub fn from_config(config: &MlConfig) -> Result<Self> {
        let speech: Arc<dyn SpeechSynthesizer> = if config.tts_disabled {
            Arc::new(OfflineSpeech)
        } else {
            Arc::new(GoogleTranslateTts::new(&config.tts_endpoint, config.http_timeout)?)
        };

        match &config.hf_token {
            Some(token) => {
                let client = Arc::new(HfInferenceClient::new(
                    &config.hf_endpoint,
                    token,
                    &config.generation_model,
                    config.http_timeout,
                )?);
                Ok(Self {
                    generator: client.clone(),
                    translator: client,
                    speech,
                    remote_enabled: true,
                })
            }
            None => Ok(Self {
                generator: Arc::new(OfflineGenerator),
                translator: Arc::new(OfflineTranslator),
                speech,
                remote_enabled: false,
            }),
        }
    }

    /// Stack with no network access; every call takes the fallback path.
    pub fn offline() -> Self {
        Self {
            generator: Arc::new(OfflineGenerator),
            translator: Arc::new(OfflineTranslator),
            speech: Arc::new(OfflineSpeech),
            remote_enabled: false,
        }
    }
}
