use crate::models::{InsightRow, Theme};

fn sample_table(theme: Theme) -> &'static [(&'static str, u32, f64)] {
    match theme {
        Theme::Heritage => &[
            ("Jaipur", 230, 0.90),
            ("Udaipur", 180, 0.86),
            ("Jodhpur", 140, 0.82),
            ("Chittorgarh", 110, 0.79),
        ],
        Theme::Food => &[
            ("Jaipur", 170, 0.88),
            ("Udaipur", 140, 0.85),
            ("Ajmer", 95, 0.80),
            ("Pushkar", 85, 0.78),
        ],
        Theme::Desert => &[
            ("Jaisalmer", 160, 0.86),
            ("Bikaner", 120, 0.81),
            ("Barmer", 70, 0.75),
        ],
        Theme::Adventure => &[
            ("Jaisalmer", 110, 0.83),
            ("Mount Abu", 100, 0.80),
            ("Kumbhalgarh", 75, 0.77),
        ],
        Theme::Nature => &[
            ("Mount Abu", 125, 0.86),
            ("Ranakpur", 95, 0.84),
            ("Sariska", 85, 0.80),
            ("Udaipur", 105, 0.85),
        ],
        Theme::Shopping => &[
            ("Jaipur", 190, 0.89),
            ("Pushkar", 120, 0.82),
            ("Jodhpur", 100, 0.81),
        ],
    }
}

/// Mock tourism statistics for a theme, with the derived score column.
pub fn insight_rows(theme: Theme) -> Vec<InsightRow> {
    sample_table(theme)
        .iter()
        .map(|(location, mentions, sentiment)| InsightRow::new(*location, *mentions, *sentiment))
        .collect()
}

pub fn fallback_summary(theme: Theme, rows: &[InsightRow]) -> String {
    let cities = rows
        .iter()
        .map(|row| row.location.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{cities} are trending for {} tourism. \
         Visitors enjoy major attractions and local experiences. \
         Sentiment is generally positive.",
        theme.as_str()
    )
}
