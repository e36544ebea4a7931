use crate::models::{ItineraryRequest, Theme, REGION};
use crate::recommend::DEFAULT_CITIES;

const ACTIVITY_TABLE: [(&str, [&str; 3]); 6] = [
    (
        "Jaipur",
        [
            "Visit Amber Fort and Hawa Mahal",
            "Shop for handicrafts in Johari Bazaar",
            "Enjoy traditional Rajasthani dinner with folk dance",
        ],
    ),
    (
        "Udaipur",
        [
            "Take a boat ride on Lake Pichola",
            "Explore City Palace and Jag Mandir",
            "Watch sunset at Fateh Sagar Lake",
        ],
    ),
    (
        "Jodhpur",
        [
            "Climb Mehrangarh Fort for city views",
            "Wander the Blue City lanes",
            "Dine on rooftop with view of Umaid Bhawan Palace",
        ],
    ),
    (
        "Jaisalmer",
        [
            "Explore Jaisalmer Fort and Patwon Ki Haveli",
            "Ride a camel on the Sam Sand Dunes",
            "Enjoy folk music under the desert stars",
        ],
    ),
    (
        "Mount Abu",
        [
            "Trek to Guru Shikhar peak",
            "Visit Dilwara Temples",
            "Boat ride on Nakki Lake",
        ],
    ),
    (
        "Pushkar",
        [
            "Visit Brahma Temple",
            "Walk around Pushkar Lake ghats",
            "Shop in colorful street bazaars",
        ],
    ),
];

pub fn build_itinerary_prompt(request: &ItineraryRequest, cities: &[String]) -> String {
    let first = cities.first().map(String::as_str).unwrap_or(DEFAULT_CITIES[0]);
    let second = cities.get(1).map(String::as_str).unwrap_or(DEFAULT_CITIES[1]);

    format!(
        "You are a friendly travel planner.\n\
         Create a clear, day-wise, actionable itinerary for a {days}-day trip to {REGION} \
         under ₹{budget}, focusing on {interests}. Use only these cities: {city_list}.\n\
         Provide 2–3 bullet activities per day. Use the format:\n\n\
         Day 1 - {first}:\n\
         • Activity 1\n\
         • Activity 2\n\n\
         Day 2 - {second}:\n\
         • Activity 1\n\
         • Activity 2\n\n\
         Now write the itinerary for the requested cities/days below:\n",
        days = request.days,
        budget = request.budget,
        interests = request.interests.join(", "),
        city_list = cities.join(", "),
    )
}

pub fn build_insight_prompt(theme: Theme, cities: &[String]) -> String {
    format!(
        "Write a short 3-line tourism insight for {REGION} based on the following: \
         Theme: {}. Top cities: {}. \
         Use plain language and mention key attractions and travel mood.",
        theme.as_str(),
        cities.join(", ")
    )
}

/// Statically authored itinerary used when generated text is unusable.
/// Cities repeat in order when there are more days than cities.
pub fn fallback_itinerary(days: u8, cities: &[String]) -> String {
    let defaults = DEFAULT_CITIES.map(String::from);
    let cities = if cities.is_empty() { &defaults[..] } else { cities };

    (0..usize::from(days))
        .map(|index| {
            let city = &cities[index % cities.len()];
            let [first, second] = day_activities(city, index);
            format!("Day {} - {}:\n• {}\n• {}", index + 1, city, first, second)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn day_activities(city: &str, day_index: usize) -> [String; 2] {
    match ACTIVITY_TABLE.iter().find(|(name, _)| *name == city) {
        Some((_, activities)) => {
            let start = day_index % activities.len();
            [
                activities[start].to_string(),
                activities[(start + 1) % activities.len()].to_string(),
            ]
        }
        None => [
            format!("Explore major landmarks of {city} (forts, palaces or lakes)"),
            "Try local cuisine and visit the main market".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn fallback_has_a_line_for_every_day() {
        let text = fallback_itinerary(5, &cities(&["Jaipur", "Chittorgarh"]));
        for day in 1..=5 {
            assert!(
                text.lines().any(|line| line.starts_with(&format!("Day {day} "))),
                "missing Day {day} in {text}"
            );
        }
    }

    #[test]
    fn fallback_cycles_cities_when_days_exceed_cities() {
        let text = fallback_itinerary(4, &cities(&["Jaipur", "Udaipur"]));
        assert!(text.contains("Day 3 - Jaipur:"));
        assert!(text.contains("Day 4 - Udaipur:"));
    }

    #[test]
    fn unknown_city_gets_generic_activities() {
        let text = fallback_itinerary(1, &cities(&["Bikaner"]));
        assert!(text.contains("• Explore major landmarks of Bikaner (forts, palaces or lakes)"));
        assert!(text.contains("• Try local cuisine and visit the main market"));
    }

    #[test]
    fn known_city_rotates_activities_per_day() {
        let text = fallback_itinerary(2, &cities(&["Jaipur"]));
        assert!(text.contains("Day 1 - Jaipur:\n• Visit Amber Fort and Hawa Mahal"));
        assert!(text.contains("Day 2 - Jaipur:\n• Shop for handicrafts in Johari Bazaar"));
    }

    #[test]
    fn empty_city_list_uses_defaults() {
        let text = fallback_itinerary(1, &[]);
        assert!(text.starts_with("Day 1 - Jaipur:"));
    }

    #[test]
    fn prompt_lists_cities_and_budget() {
        let request = ItineraryRequest::default();
        let prompt = build_itinerary_prompt(&request, &cities(&["Jaipur", "Udaipur", "Jodhpur"]));
        assert!(prompt.contains("3-day trip to Rajasthan under ₹12000"));
        assert!(prompt.contains("focusing on heritage, food"));
        assert!(prompt.contains("Use only these cities: Jaipur, Udaipur, Jodhpur."));
    }
}
