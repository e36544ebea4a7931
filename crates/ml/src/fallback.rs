use anyhow::Result;
use async_trait::async_trait;
use yatra_core::Language;

use crate::{SpeechSynthesizer, TextGenerator, Translator};

#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    fn model_name(&self) -> &str {
        "offline"
    }

    async fn generate(&self, _prompt: &str, _max_new_tokens: u32) -> Result<String> {
        anyhow::bail!("text generation backend not configured (set YATRA_HF_TOKEN)")
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfflineTranslator;

#[async_trait]
impl Translator for OfflineTranslator {
    async fn translate(&self, _text: &str, language: Language) -> Result<String> {
        anyhow::bail!(
            "translation backend for {} not configured (set YATRA_HF_TOKEN)",
            language.translation_model()
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfflineSpeech;

#[async_trait]
impl SpeechSynthesizer for OfflineSpeech {
    async fn synthesize(&self, _text: &str, _lang: &str) -> Result<Vec<u8>> {
        anyhow::bail!("speech synthesis disabled (YATRA_TTS_DISABLED)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_backends_always_fail() {
        assert!(OfflineGenerator.generate("Day 1", 16).await.is_err());
        assert!(OfflineTranslator.translate("Hello", Language::Fr).await.is_err());
        assert!(OfflineSpeech.synthesize("Hello", "en").await.is_err());
    }
}
