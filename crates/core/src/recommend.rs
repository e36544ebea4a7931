use crate::models::DEFAULT_INTERESTS;

const CITY_TABLE: [(&str, &[&str]); 7] = [
    ("heritage", &["Jaipur", "Udaipur", "Jodhpur", "Chittorgarh"]),
    ("food", &["Jaipur", "Udaipur", "Ajmer", "Pushkar"]),
    ("desert", &["Jaisalmer", "Bikaner", "Barmer"]),
    ("adventure", &["Jaisalmer", "Mount Abu", "Kumbhalgarh"]),
    ("nature", &["Mount Abu", "Ranakpur", "Sariska", "Udaipur"]),
    ("shopping", &["Jaipur", "Pushkar", "Jodhpur"]),
    ("culture", &["Jaipur", "Pushkar", "Udaipur"]),
];

pub const DEFAULT_CITIES: [&str; 3] = ["Jaipur", "Udaipur", "Jodhpur"];

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Splits a comma separated interest list, falling back to the default
/// interests when nothing usable is left.
pub fn parse_interests(input: &str) -> Vec<String> {
    let interests = input
        .split(',')
        .map(normalize_text)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>();

    if interests.is_empty() {
        DEFAULT_INTERESTS.iter().map(ToString::to_string).collect()
    } else {
        interests
    }
}

/// Maps free-text interests onto the city table and keeps at most `days`
/// cities in first-seen order.
pub fn recommend_cities(interests: &[String], days: u8) -> Vec<String> {
    let mut matched_keys: Vec<&str> = Vec::new();
    let mut selected: Vec<&str> = Vec::new();

    for interest in interests {
        let key = interest.trim().to_lowercase();
        for (table_key, cities) in CITY_TABLE {
            if contains_any(&key, &[table_key]) && !matched_keys.contains(&table_key) {
                matched_keys.push(table_key);
                selected.extend_from_slice(cities);
            }
        }
    }

    if selected.is_empty() {
        selected.extend_from_slice(&DEFAULT_CITIES);
    }

    let mut ordered: Vec<String> = Vec::new();
    for city in selected {
        if !ordered.iter().any(|seen| seen == city) {
            ordered.push(city.to_string());
        }
    }

    ordered.truncate(usize::from(days.max(1)));
    ordered
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn merges_interests_without_duplicates() {
        let cities = recommend_cities(&interests(&["heritage", "food"]), 10);
        assert_eq!(
            cities,
            vec!["Jaipur", "Udaipur", "Jodhpur", "Chittorgarh", "Ajmer", "Pushkar"]
        );
    }

    #[test]
    fn truncates_to_requested_days() {
        let cities = recommend_cities(&interests(&["desert"]), 2);
        assert_eq!(cities, vec!["Jaisalmer", "Bikaner"]);
    }

    #[test]
    fn matches_keyword_inside_longer_interest() {
        let cities = recommend_cities(&interests(&["  Desert Safari "]), 3);
        assert_eq!(cities, vec!["Jaisalmer", "Bikaner", "Barmer"]);
    }

    #[test]
    fn unknown_interest_uses_default_cities() {
        let cities = recommend_cities(&interests(&["skiing"]), 5);
        assert_eq!(cities, vec!["Jaipur", "Udaipur", "Jodhpur"]);
    }

    #[test]
    fn repeated_interest_counts_once() {
        let cities = recommend_cities(&interests(&["shopping", "shopping mall"]), 10);
        assert_eq!(cities, vec!["Jaipur", "Pushkar", "Jodhpur"]);
    }

    #[test]
    fn parses_comma_separated_interests() {
        assert_eq!(
            parse_interests(" nature ,, adventure  trips,"),
            vec!["nature", "adventure trips"]
        );
        assert_eq!(parse_interests("  "), vec!["heritage", "food"]);
    }
}
