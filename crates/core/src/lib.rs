pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod planner;
pub mod recommend;

pub use error::CompanionError;
pub use format::{format_itinerary, FormattedItinerary};
pub use insights::{fallback_summary, insight_rows};
pub use models::*;
pub use planner::{build_insight_prompt, build_itinerary_prompt, fallback_itinerary};
pub use recommend::{normalize_text, parse_interests, recommend_cities};
