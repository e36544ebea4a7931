use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{info, instrument, warn};
use yatra_core::{
    build_insight_prompt, build_itinerary_prompt, fallback_summary, format_itinerary,
    insight_rows, recommend_cities, CompanionError, DashboardReport, ItineraryOutcome,
    ItineraryRequest, Language, Theme, TranslationOutcome,
};
use yatra_dashboard::{folder_name, render_bar_chart, render_csv, ChartKind};
use yatra_ml::MlStack;
use yatra_observability::AppMetrics;
use yatra_storage::{
    speech_file_name, translation_file_name, ArtifactStore, CSV_FILE_NAME, ITINERARY_FILE_NAME,
    SUMMARY_FILE_NAME,
};

const ITINERARY_MAX_NEW_TOKENS: u32 = 256;
const SUMMARY_MAX_NEW_TOKENS: u32 = 120;

#[derive(Debug, Error)]
pub enum SpeakFileError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("File is empty: {0}")]
    Empty(PathBuf),
    #[error("failed reading {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub struct TourismCompanion<S>
where
    S: ArtifactStore,
{
    ml_stack: MlStack,
    store: Arc<S>,
    metrics: Arc<AppMetrics>,
    dashboard_root: PathBuf,
}

impl<S> TourismCompanion<S>
where
    S: ArtifactStore,
{
    pub fn new(
        ml_stack: MlStack,
        store: Arc<S>,
        metrics: Arc<AppMetrics>,
        dashboard_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            ml_stack,
            store,
            metrics,
            dashboard_root: dashboard_root.into(),
        }
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.metrics
    }

    pub fn remote_enabled(&self) -> bool {
        self.ml_stack.remote_enabled
    }

    #[instrument(skip(self, request), fields(days = request.days, budget = request.budget))]
    pub async fn plan_itinerary(&self, request: ItineraryRequest) -> Result<ItineraryOutcome> {
        let started = Instant::now();
        self.metrics.inc_request();

        let request = request.normalized();
        let cities = recommend_cities(&request.interests, request.days);
        let prompt = build_itinerary_prompt(&request, &cities);

        info!(
            cities = %cities.join(", "),
            model = self.ml_stack.generator.model_name(),
            "generating itinerary"
        );
        let raw = match self
            .ml_stack
            .generator
            .generate(&prompt, ITINERARY_MAX_NEW_TOKENS)
            .await
        {
            Ok(text) => {
                self.metrics.inc_generation();
                text
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "model generation failed");
                String::new()
            }
        };

        let formatted = format_itinerary(&raw, &request, &cities, now());
        if formatted.used_fallback {
            self.metrics.inc_fallback();
            info!("generated text unusable, using fallback itinerary");
        }

        let saved_to = match self
            .store
            .write_text(Path::new(ITINERARY_FILE_NAME), &formatted.text)
            .await
        {
            Ok(path) => Some(path),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "could not save itinerary");
                None
            }
        };

        self.metrics.observe_latency(started.elapsed());
        Ok(ItineraryOutcome {
            text: formatted.text,
            cities,
            used_fallback: formatted.used_fallback,
            saved_to,
        })
    }

    /// Fails only for an unsupported language code; a failing backend yields
    /// the source text unchanged.
    #[instrument(skip(self, text))]
    pub async fn translate(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<TranslationOutcome, CompanionError> {
        let language = Language::parse(language_code)?;
        let started = Instant::now();
        self.metrics.inc_request();

        let outcome = match self.ml_stack.translator.translate(text, language).await {
            Ok(translated) => {
                self.metrics.inc_translation();
                TranslationOutcome {
                    language,
                    source_text: text.to_string(),
                    text: translated,
                    translated: true,
                }
            }
            Err(error) => {
                self.metrics.inc_fallback();
                warn!(
                    language = language.as_code(),
                    error = %format!("{error:#}"),
                    "translation failed"
                );
                TranslationOutcome {
                    language,
                    source_text: text.to_string(),
                    text: text.to_string(),
                    translated: false,
                }
            }
        };

        self.metrics.observe_latency(started.elapsed());
        Ok(outcome)
    }

    pub async fn save_translation(&self, outcome: &TranslationOutcome) -> Result<PathBuf> {
        let name = translation_file_name(outcome.language, now(), "txt");
        self.store
            .write_text(&name, &outcome.text)
            .await
            .context("could not save translation")
    }

    /// Audio for a translation, named after the translation file.
    pub async fn speak_translation(&self, outcome: &TranslationOutcome) -> Option<PathBuf> {
        let name = translation_file_name(outcome.language, now(), "mp3");
        self.speak(&outcome.text, outcome.language.as_code(), &name)
            .await
    }

    /// Failures are logged and reported as `None`.
    #[instrument(skip(self, text))]
    pub async fn speak(&self, text: &str, lang: &str, file_name: &Path) -> Option<PathBuf> {
        let started = Instant::now();
        self.metrics.inc_request();

        let synthesized = self.ml_stack.speech.synthesize(text, lang).await;
        self.metrics.observe_latency(started.elapsed());
        let audio = match synthesized {
            Ok(audio) => audio,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "speech generation failed");
                return None;
            }
        };

        match self.store.write_bytes(file_name, &audio).await {
            Ok(path) => {
                self.metrics.inc_audio_file();
                info!(path = %path.display(), bytes = audio.len(), "audio saved");
                Some(path)
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "could not save audio");
                None
            }
        }
    }

    pub async fn speak_text_file(
        &self,
        source: &Path,
        lang: &str,
    ) -> Result<Option<PathBuf>, SpeakFileError> {
        if !source.is_file() {
            return Err(SpeakFileError::NotFound(source.to_path_buf()));
        }

        let content = tokio::fs::read_to_string(source)
            .await
            .map_err(|source_error| SpeakFileError::Read {
                path: source.to_path_buf(),
                source: source_error,
            })?;
        let content = content.trim();
        if content.is_empty() {
            return Err(SpeakFileError::Empty(source.to_path_buf()));
        }

        let name = speech_file_name(source, now());
        Ok(self.speak(content, lang, &name).await)
    }

    #[instrument(skip(self))]
    pub async fn build_dashboard(&self, theme_input: &str) -> Result<DashboardReport> {
        let started = Instant::now();
        self.metrics.inc_request();

        let (theme, theme_recognized) = Theme::parse_or_default(theme_input);
        if !theme_recognized {
            warn!(input = theme_input, "unknown theme, using heritage data");
        }

        let rows = insight_rows(theme);
        let folder = self.dashboard_root.join(folder_name(theme, now()));

        let csv = render_csv(&rows)?;
        let csv_path = self
            .store
            .write_bytes(&folder.join(CSV_FILE_NAME), &csv)
            .await
            .context("could not save insights csv")?;

        let mut charts = Vec::new();
        for kind in ChartKind::ALL {
            let chart_rows = rows.clone();
            let rendered =
                tokio::task::spawn_blocking(move || render_bar_chart(kind, theme, &chart_rows))
                    .await;
            let png = match rendered {
                Ok(Ok(png)) => png,
                Ok(Err(error)) => {
                    warn!(chart = kind.file_name(), error = %format!("{error:#}"), "chart rendering failed");
                    continue;
                }
                // font discovery in the renderer can panic on hosts without fontconfig
                Err(join_error) => {
                    warn!(chart = kind.file_name(), error = %join_error, "chart renderer aborted");
                    continue;
                }
            };
            match self
                .store
                .write_bytes(&folder.join(kind.file_name()), &png)
                .await
            {
                Ok(path) => charts.push(path),
                Err(error) => {
                    warn!(chart = kind.file_name(), error = %format!("{error:#}"), "could not save chart");
                }
            }
        }

        let cities = rows
            .iter()
            .map(|row| row.location.clone())
            .collect::<Vec<_>>();
        let prompt = build_insight_prompt(theme, &cities);
        let generated = match self
            .ml_stack
            .generator
            .generate(&prompt, SUMMARY_MAX_NEW_TOKENS)
            .await
        {
            Ok(text) => {
                self.metrics.inc_generation();
                Some(text.trim().to_string()).filter(|text| !text.is_empty())
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "insight summary generation failed");
                None
            }
        };
        let used_fallback_summary = generated.is_none();
        if used_fallback_summary {
            self.metrics.inc_fallback();
        }
        let summary = generated.unwrap_or_else(|| fallback_summary(theme, &rows));

        let summary_path = self
            .store
            .write_text(&folder.join(SUMMARY_FILE_NAME), &summary)
            .await
            .context("could not save insight summary")?;

        self.metrics.inc_dashboard();
        self.metrics.observe_latency(started.elapsed());
        info!(theme = theme.as_str(), charts = charts.len(), "dashboard built");

        Ok(DashboardReport {
            theme,
            theme_recognized,
            folder: self.store.location(&folder),
            rows,
            csv_path,
            charts,
            summary,
            summary_path,
            used_fallback_summary,
        })
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
