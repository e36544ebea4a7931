use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::SpeechSynthesizer;

/// The endpoint rejects longer requests, so text is sent in pieces.
pub const MAX_PIECE_CHARS: usize = 100;

#[derive(Clone)]
pub struct GoogleTranslateTts {
    http_client: Client,
    endpoint: String,
}

impl GoogleTranslateTts {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(timeout)
            .build()
            .context("failed building speech http client")?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>> {
        let pieces = split_for_speech(text, MAX_PIECE_CHARS);
        if pieces.is_empty() {
            anyhow::bail!("no text to speak");
        }

        let total = pieces.len().to_string();
        let mut audio = Vec::new();
        for (idx, piece) in pieces.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = piece.chars().count().to_string();
            let response = self
                .http_client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", piece.as_str()),
                    ("tl", lang),
                    ("client", "tw-ob"),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await
                .context("speech request failed")?;

            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("speech endpoint returned status {} for lang {}", status.as_u16(), lang);
            }

            let bytes = response.bytes().await.context("speech response read failed")?;
            audio.extend_from_slice(&bytes);
        }

        debug!(pieces = pieces.len(), bytes = audio.len(), lang, "speech synthesized");
        Ok(audio)
    }
}

/// Splits text into pieces of at most `max_chars` characters, breaking on
/// whitespace where possible and hard-splitting words that are too long.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars = word.chars().collect::<Vec<_>>();
            for chunk in chars.chunks(max_chars) {
                pieces.push(chunk.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}
