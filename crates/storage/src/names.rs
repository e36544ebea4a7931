use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use yatra_core::Language;

pub const ITINERARY_FILE_NAME: &str = "generated_itinerary.txt";
pub const CSV_FILE_NAME: &str = "insights.csv";
pub const SUMMARY_FILE_NAME: &str = "tourism_insight_summary.txt";

pub fn file_stamp(now: NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// `translated_<lang>_<stamp>.<extension>`
pub fn translation_file_name(language: Language, now: NaiveDateTime, extension: &str) -> PathBuf {
    PathBuf::from(format!(
        "translated_{}_{}.{}",
        language.as_code(),
        file_stamp(now),
        extension
    ))
}

/// `<source stem>_tts_<stamp>.mp3`
pub fn speech_file_name(source: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("speech");
    PathBuf::from(format!("{}_tts_{}.mp3", stem, file_stamp(now)))
}
