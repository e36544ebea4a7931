use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use yatra_agents::{SpeakFileError, TourismCompanion};
use yatra_core::{ItineraryRequest, Language, Theme};
use yatra_ml::{MlStack, OfflineGenerator, OfflineSpeech, OfflineTranslator};
use yatra_ml::{SpeechSynthesizer, TextGenerator, Translator};
use yatra_observability::AppMetrics;
use yatra_storage::{ArtifactStore, MemoryStore};

struct CannedGenerator(&'static str);

#[async_trait]
impl TextGenerator for CannedGenerator {
    fn model_name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _prompt: &str, _max_new_tokens: u32) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct UppercaseTranslator;

#[async_trait]
impl Translator for UppercaseTranslator {
    async fn translate(&self, text: &str, language: Language) -> Result<String> {
        Ok(format!("[{}] {}", language.as_code(), text.to_uppercase()))
    }
}

struct FakeSpeech;

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>> {
        Ok(format!("ID3:{lang}:{}", text.len()).into_bytes())
    }
}

struct SlowSpeech;

#[async_trait]
impl SpeechSynthesizer for SlowSpeech {
    async fn synthesize(&self, _text: &str, _lang: &str) -> Result<Vec<u8>> {
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
        Ok(b"ID3".to_vec())
    }
}

fn stack(generator: Arc<dyn TextGenerator>) -> MlStack {
    MlStack {
        generator,
        translator: Arc::new(UppercaseTranslator),
        speech: Arc::new(FakeSpeech),
        remote_enabled: true,
    }
}

fn companion(ml_stack: MlStack, store: &MemoryStore) -> TourismCompanion<MemoryStore> {
    TourismCompanion::new(
        ml_stack,
        Arc::new(store.clone()),
        AppMetrics::shared(),
        "dashboards",
    )
}

#[tokio::test]
async fn failing_generator_falls_back_to_static_plan() {
    let store = MemoryStore::new();
    let companion = companion(MlStack::offline(), &store);

    let outcome = companion
        .plan_itinerary(ItineraryRequest {
            budget: 8000,
            days: 2,
            interests: vec!["heritage".to_string()],
        })
        .await
        .unwrap();

    assert!(outcome.used_fallback);
    assert_eq!(outcome.cities, vec!["Jaipur", "Udaipur"]);
    assert!(outcome.text.starts_with("Rajasthan Itinerary (2 Days, ₹8000)"));
    assert!(outcome.text.contains("Day 1 - Jaipur:"));
    assert!(outcome.text.contains("Day 2 - Udaipur:"));
    assert_eq!(
        store.get_text("generated_itinerary.txt").as_deref(),
        Some(outcome.text.as_str())
    );

    let snapshot = companion.metrics().snapshot();
    assert_eq!(snapshot.fallback_total, 1);
    assert_eq!(snapshot.generation_total, 0);
}

#[tokio::test]
async fn short_model_output_is_replaced() {
    let store = MemoryStore::new();
    let companion = companion(stack(Arc::new(CannedGenerator("Day 1 Jaipur"))), &store);

    let outcome = companion
        .plan_itinerary(ItineraryRequest::default())
        .await
        .unwrap();

    assert!(outcome.used_fallback);
    assert!(outcome.text.contains("Day 3 - "));
}

#[tokio::test]
async fn usable_model_output_is_formatted() {
    let store = MemoryStore::new();
    let generator = CannedGenerator(
        "day 1 - Jaipur:\nAmber Fort at sunrise\nDinner at Chokhi Dhani\n\n\
         day 2 - Udaipur:\nCity Palace\nBoat ride on Lake Pichola",
    );
    let companion = companion(stack(Arc::new(generator)), &store);

    let outcome = companion
        .plan_itinerary(ItineraryRequest {
            budget: 15000,
            days: 2,
            interests: vec!["food".to_string()],
        })
        .await
        .unwrap();

    assert!(!outcome.used_fallback);
    assert!(outcome.text.contains("Day 1 - Jaipur:\n• Amber Fort at sunrise"));
    assert!(outcome.text.contains("• Boat ride on Lake Pichola"));
    assert_eq!(companion.metrics().snapshot().generation_total, 1);
}

#[tokio::test]
async fn unsupported_language_is_rejected() {
    let store = MemoryStore::new();
    let companion = companion(stack(Arc::new(OfflineGenerator)), &store);

    let error = companion.translate("Hawa Mahal", "de").await.unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unsupported language. Choose from 'hi', 'fr', or 'es'."
    );
}

#[tokio::test]
async fn translation_is_saved_and_spoken() {
    let store = MemoryStore::new();
    let companion = companion(stack(Arc::new(OfflineGenerator)), &store);

    let outcome = companion.translate("Amber Fort", "ES").await.unwrap();
    assert!(outcome.translated);
    assert_eq!(outcome.text, "[es] AMBER FORT");

    let saved = companion.save_translation(&outcome).await.unwrap();
    assert!(saved.to_string_lossy().starts_with("translated_es_"));
    assert_eq!(store.get_text(&saved).as_deref(), Some("[es] AMBER FORT"));

    let audio = companion.speak_translation(&outcome).await.unwrap();
    assert!(audio.to_string_lossy().ends_with(".mp3"));
    assert_eq!(store.get(&audio), Some(b"ID3:es:15".to_vec()));
}

#[tokio::test]
async fn failing_translator_keeps_source_text() {
    let store = MemoryStore::new();
    let ml_stack = MlStack {
        generator: Arc::new(OfflineGenerator),
        translator: Arc::new(OfflineTranslator),
        speech: Arc::new(OfflineSpeech),
        remote_enabled: false,
    };
    let companion = companion(ml_stack, &store);

    let outcome = companion.translate("Jal Mahal", "hi").await.unwrap();
    assert!(!outcome.translated);
    assert_eq!(outcome.language, Language::Hi);
    assert_eq!(outcome.text, "Jal Mahal");

    assert!(companion.speak_translation(&outcome).await.is_none());
    assert!(store.paths().is_empty());
}

#[tokio::test]
async fn dashboard_writes_csv_and_canned_summary() {
    let store = MemoryStore::new();
    let companion = companion(MlStack::offline(), &store);

    let report = companion.build_dashboard("Food").await.unwrap();

    assert_eq!(report.theme, Theme::Food);
    assert!(report.theme_recognized);
    assert!(report.used_fallback_summary);
    assert!(report
        .folder
        .to_string_lossy()
        .starts_with("dashboards/food_insights_"));

    let csv = store.get_text(&report.csv_path).unwrap();
    assert!(csv.starts_with("location,mentions,sentiment,tourism_score\n"));
    assert!(csv.contains("Pushkar,85,0.78,66.3"));

    assert!(report.summary.starts_with("Jaipur, Udaipur, Ajmer, Pushkar are trending"));
    assert_eq!(
        store.get_text(&report.summary_path).as_deref(),
        Some(report.summary.as_str())
    );
    assert_eq!(report.charts.len(), 3);
    for (chart, name) in report.charts.iter().zip([
        "mentions_chart.png",
        "sentiment_chart.png",
        "tourism_score_chart.png",
    ]) {
        assert_eq!(chart, &report.folder.join(name));
        let png = store.get(chart).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }
}

#[tokio::test]
async fn unknown_theme_uses_heritage_rows() {
    let store = MemoryStore::new();
    let generator = CannedGenerator("Jaipur and Udaipur lead heritage travel this season.");
    let companion = companion(stack(Arc::new(generator)), &store);

    let report = companion.build_dashboard("space").await.unwrap();

    assert_eq!(report.theme, Theme::Heritage);
    assert!(!report.theme_recognized);
    assert!(!report.used_fallback_summary);
    assert_eq!(report.rows[0].location, "Jaipur");
    assert_eq!(report.rows[0].tourism_score, 207.0);
    assert_eq!(
        report.summary,
        "Jaipur and Udaipur lead heritage travel this season."
    );
}

#[tokio::test]
async fn text_file_is_converted_to_speech() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("hawa_mahal.txt");
    std::fs::write(&source, "  Palace of Winds  \n").unwrap();

    let store = MemoryStore::new();
    let companion = companion(stack(Arc::new(OfflineGenerator)), &store);

    let audio = companion
        .speak_text_file(&source, "en")
        .await
        .unwrap()
        .unwrap();

    assert!(audio.to_string_lossy().starts_with("hawa_mahal_tts_"));
    assert_eq!(store.get(&audio), Some(b"ID3:en:15".to_vec()));
}

#[tokio::test]
async fn missing_and_empty_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.txt");
    std::fs::write(&empty, "   \n").unwrap();

    let store = MemoryStore::new();
    let companion = companion(stack(Arc::new(OfflineGenerator)), &store);

    let missing = companion
        .speak_text_file(&dir.path().join("missing.txt"), "en")
        .await;
    assert!(matches!(missing, Err(SpeakFileError::NotFound(_))));

    let blank = companion.speak_text_file(&empty, "en").await;
    assert!(matches!(blank, Err(SpeakFileError::Empty(_))));
    assert!(store.paths().is_empty());
}

#[tokio::test]
async fn saved_itinerary_reads_back_through_the_store() {
    let store = MemoryStore::new();
    let companion = companion(MlStack::offline(), &store);

    let outcome = companion
        .plan_itinerary(ItineraryRequest::default())
        .await
        .unwrap();
    let saved = outcome.saved_to.unwrap();

    assert_eq!(saved, store.location(Path::new("generated_itinerary.txt")));
    assert_eq!(store.read_text(&saved).await.unwrap(), outcome.text);
}

#[tokio::test]
async fn speech_latency_is_recorded() {
    let store = MemoryStore::new();
    let ml_stack = MlStack {
        speech: Arc::new(SlowSpeech),
        ..MlStack::offline()
    };
    let companion = companion(ml_stack, &store);

    let audio = companion
        .speak("Jantar Mantar", "en", Path::new("jantar_mantar.mp3"))
        .await
        .unwrap();
    assert_eq!(store.get(&audio), Some(b"ID3".to_vec()));

    let snapshot = companion.metrics().snapshot();
    assert_eq!(snapshot.requests_total, 1);
    assert_eq!(snapshot.audio_files_total, 1);
    assert!(snapshot.avg_latency_millis >= 25.0);
}
