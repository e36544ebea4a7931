use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CompanionError;

pub const REGION: &str = "Rajasthan";
pub const DEFAULT_BUDGET: u32 = 12_000;
pub const DEFAULT_DAYS: u8 = 3;
pub const MAX_DAYS: u8 = 30;
pub const DEFAULT_INTERESTS: [&str; 2] = ["heritage", "food"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Hi,
    Fr,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Hi, Language::Fr, Language::Es];

    pub fn parse(code: &str) -> Result<Self, CompanionError> {
        match code.trim().to_lowercase().as_str() {
            "hi" => Ok(Self::Hi),
            "fr" => Ok(Self::Fr),
            "es" => Ok(Self::Es),
            other => Err(CompanionError::UnsupportedLanguage(other.to_string())),
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Hi => "hi",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    /// English-to-target translation model served by the inference backend.
    pub fn translation_model(self) -> &'static str {
        match self {
            Self::Hi => "Helsinki-NLP/opus-mt-en-hi",
            Self::Fr => "Helsinki-NLP/opus-mt-en-fr",
            Self::Es => "Helsinki-NLP/opus-mt-en-es",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Heritage,
    Food,
    Desert,
    Adventure,
    Nature,
    Shopping,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Heritage,
        Theme::Food,
        Theme::Desert,
        Theme::Adventure,
        Theme::Nature,
        Theme::Shopping,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "heritage" => Some(Self::Heritage),
            "food" => Some(Self::Food),
            "desert" => Some(Self::Desert),
            "adventure" => Some(Self::Adventure),
            "nature" => Some(Self::Nature),
            "shopping" => Some(Self::Shopping),
            _ => None,
        }
    }

    /// Unknown themes resolve to heritage; the flag tells the caller whether
    /// the input was recognised.
    pub fn parse_or_default(value: &str) -> (Self, bool) {
        match Self::parse(value) {
            Some(theme) => (theme, true),
            None => (Self::Heritage, false),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heritage => "heritage",
            Self::Food => "food",
            Self::Desert => "desert",
            Self::Adventure => "adventure",
            Self::Nature => "nature",
            Self::Shopping => "shopping",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Heritage => "Heritage",
            Self::Food => "Food",
            Self::Desert => "Desert",
            Self::Adventure => "Adventure",
            Self::Nature => "Nature",
            Self::Shopping => "Shopping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub budget: u32,
    pub days: u8,
    pub interests: Vec<String>,
}

impl Default for ItineraryRequest {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            days: DEFAULT_DAYS,
            interests: DEFAULT_INTERESTS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Clamps a requested day count into `1..=MAX_DAYS`, however large or
/// negative the input.
pub fn clamp_days(days: i64) -> u8 {
    u8::try_from(days.clamp(1, i64::from(MAX_DAYS))).unwrap_or(DEFAULT_DAYS)
}

impl ItineraryRequest {
    pub fn normalized(mut self) -> Self {
        self.days = self.days.clamp(1, MAX_DAYS);
        self.interests = self
            .interests
            .into_iter()
            .map(|interest| interest.trim().to_string())
            .filter(|interest| !interest.is_empty())
            .collect();
        if self.interests.is_empty() {
            self.interests = DEFAULT_INTERESTS.iter().map(ToString::to_string).collect();
        }
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItineraryOutcome {
    pub text: String,
    pub cities: Vec<String>,
    pub used_fallback: bool,
    pub saved_to: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationOutcome {
    pub language: Language,
    pub source_text: String,
    pub text: String,
    pub translated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRow {
    pub location: String,
    pub mentions: u32,
    pub sentiment: f64,
    pub tourism_score: f64,
}

impl InsightRow {
    pub fn new(location: impl Into<String>, mentions: u32, sentiment: f64) -> Self {
        Self {
            location: location.into(),
            mentions,
            sentiment,
            tourism_score: tourism_score(mentions, sentiment),
        }
    }
}

/// `mentions × sentiment`, rounded to two decimals.
pub fn tourism_score(mentions: u32, sentiment: f64) -> f64 {
    (mentions as f64 * sentiment * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub theme: Theme,
    pub theme_recognized: bool,
    pub folder: PathBuf,
    pub rows: Vec<InsightRow>,
    pub csv_path: PathBuf,
    pub charts: Vec<PathBuf>,
    pub summary: String,
    pub summary_path: PathBuf,
    pub used_fallback_summary: bool,
}
