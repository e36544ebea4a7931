mod chart;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use yatra_core::{InsightRow, Theme};
use yatra_storage::file_stamp;

pub use chart::{render_bar_chart, ChartKind, CHART_SIZE};

/// `<theme>_insights_<stamp>`, one folder per dashboard run.
pub fn folder_name(theme: Theme, now: NaiveDateTime) -> String {
    format!("{}_insights_{}", theme.as_str(), file_stamp(now))
}

pub fn render_csv(rows: &[InsightRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("failed serializing insight row")?;
    }
    writer.flush().context("failed flushing insights csv")?;
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed finishing insights csv: {err}"))
}

/// Plain-text table for the console, one row per city.
pub fn render_table(rows: &[InsightRow]) -> String {
    let width = rows
        .iter()
        .map(|row| row.location.chars().count())
        .chain(std::iter::once("location".len()))
        .max()
        .unwrap_or(8);

    let mut lines = vec![format!(
        "{:<width$}  {:>8}  {:>9}  {:>13}",
        "location", "mentions", "sentiment", "tourism_score"
    )];
    lines.extend(rows.iter().map(|row| {
        format!(
            "{:<width$}  {:>8}  {:>9.2}  {:>13.2}",
            row.location, row.mentions, row.sentiment, row.tourism_score
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yatra_core::insight_rows;

    #[test]
    fn folder_name_carries_theme_and_stamp() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 5)
            .and_then(|date| date.and_hms_opt(7, 8, 9))
            .unwrap();
        assert_eq!(folder_name(Theme::Food, at), "food_insights_20260105_070809");
    }

    #[test]
    fn csv_has_header_and_derived_column() {
        let csv = String::from_utf8(render_csv(&insight_rows(Theme::Heritage)).unwrap()).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "location,mentions,sentiment,tourism_score");
        assert_eq!(lines[1], "Jaipur,230,0.9,207.0");
        assert_eq!(lines[2], "Udaipur,180,0.86,154.8");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn table_aligns_columns() {
        let table = render_table(&insight_rows(Theme::Adventure));
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("location   "));
        assert!(lines[3].starts_with("Kumbhalgarh"));
        assert!(lines[3].ends_with("57.75"));
    }
}
