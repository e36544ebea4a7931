use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::models::{ItineraryRequest, REGION};
use crate::planner::fallback_itinerary;

/// Generated text shorter than this is treated as unusable.
pub const MIN_GENERATED_CHARS: usize = 40;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid markup regex"));
static REPEATED_BULLETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"•\s*•+").expect("valid bullet regex"));
static DAY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bday\s*(\d+)\b").expect("valid day marker regex"));
static FIRST_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Day\s*1").expect("valid first day regex"));
static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid block separator regex"));
static DAY_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Day\s*\d+\s*-?\s*)(.*)$").expect("valid day heading regex"));

#[derive(Debug, Clone, Serialize)]
pub struct FormattedItinerary {
    pub text: String,
    pub used_fallback: bool,
}

pub fn clean_generated_text(raw: &str) -> String {
    let text = MARKUP.replace_all(raw, "");
    let text = REPEATED_BULLETS.replace_all(&text, "•");
    let text = DAY_MARKER.replace_all(&text, |caps: &Captures<'_>| format!("Day {}", &caps[1]));
    text.trim().to_string()
}

pub fn looks_like_itinerary(text: &str) -> bool {
    FIRST_DAY.is_match(text) && text.chars().count() >= MIN_GENERATED_CHARS
}

pub fn format_itinerary(
    raw: &str,
    request: &ItineraryRequest,
    cities: &[String],
    generated_at: NaiveDateTime,
) -> FormattedItinerary {
    let cleaned = clean_generated_text(raw);
    let used_fallback = !looks_like_itinerary(&cleaned);
    let body = if used_fallback {
        fallback_itinerary(request.days, cities)
    } else {
        cleaned
    };

    let header = format!(
        "{REGION} Itinerary ({} Days, ₹{})\nGenerated: {}\n",
        request.days,
        request.budget,
        generated_at.format("%Y-%m-%d %H:%M")
    );

    let blocks = BLOCK_SEPARATOR
        .split(&body)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(format_block)
        .collect::<Vec<_>>();

    FormattedItinerary {
        text: header + &blocks.join("\n\n"),
        used_fallback,
    }
}

fn format_block(block: &str) -> String {
    let mut lines = block.lines();
    let heading = lines.next().unwrap_or_default().trim();
    let heading = DAY_HEADING
        .replace(heading, |caps: &Captures<'_>| {
            format!("{} {}", caps[1].trim(), caps[2].trim())
        })
        .into_owned();

    let body = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with('•') {
                line.to_string()
            } else {
                format!("• {line}")
            }
        })
        .collect::<Vec<_>>();

    if body.is_empty() {
        heading
    } else {
        format!("{heading}\n{}", body.join("\n"))
    }
}
