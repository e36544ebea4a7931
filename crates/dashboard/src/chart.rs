use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use yatra_core::{InsightRow, Theme};

pub const CHART_SIZE: (u32, u32) = (800, 400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Mentions,
    Sentiment,
    TourismScore,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Mentions,
        ChartKind::Sentiment,
        ChartKind::TourismScore,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Mentions => "mentions_chart.png",
            Self::Sentiment => "sentiment_chart.png",
            Self::TourismScore => "tourism_score_chart.png",
        }
    }

    pub fn title(self, theme: Theme) -> String {
        match self {
            Self::Mentions => format!("Tourist Mentions by City ({})", theme.display_name()),
            Self::Sentiment => format!("Average Sentiment by City ({})", theme.display_name()),
            Self::TourismScore => format!("Tourism Score Index ({})", theme.display_name()),
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Self::Mentions => "Mentions (approx.)",
            Self::Sentiment => "Sentiment (0–1)",
            Self::TourismScore => "Score (mentions × sentiment)",
        }
    }

    pub fn values(self, rows: &[InsightRow]) -> Vec<f64> {
        rows.iter()
            .map(|row| match self {
                Self::Mentions => f64::from(row.mentions),
                Self::Sentiment => row.sentiment,
                Self::TourismScore => row.tourism_score,
            })
            .collect()
    }

    fn color(self) -> RGBColor {
        match self {
            Self::Mentions => RGBColor(70, 130, 180),
            Self::Sentiment => RGBColor(255, 165, 0),
            Self::TourismScore => RGBColor(46, 139, 87),
        }
    }
}

/// Renders one bar per city and returns the PNG bytes.
pub fn render_bar_chart(kind: ChartKind, theme: Theme, rows: &[InsightRow]) -> Result<Vec<u8>> {
    if rows.is_empty() {
        anyhow::bail!("no rows to chart");
    }

    let (width, height) = CHART_SIZE;
    let mut pixels = vec![0_u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, CHART_SIZE).into_drawing_area();
        draw_bars(&root, kind, theme, rows)
            .map_err(|err| anyhow::anyhow!("failed drawing {}: {err}", kind.file_name()))?;
        root.present()
            .map_err(|err| anyhow::anyhow!("failed presenting {}: {err}", kind.file_name()))?;
    }

    let bitmap = RgbImage::from_raw(width, height, pixels).context("chart buffer size mismatch")?;
    let mut png = Cursor::new(Vec::new());
    bitmap
        .write_to(&mut png, ImageFormat::Png)
        .context("failed encoding chart png")?;
    Ok(png.into_inner())
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    kind: ChartKind,
    theme: Theme,
    rows: &[InsightRow],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let values = kind.values(rows);
    let labels = rows
        .iter()
        .map(|row| row.location.clone())
        .collect::<Vec<_>>();
    let peak = values.iter().copied().fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(kind.title(theme), ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(index) => labels.get(*index).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(kind.y_label())
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(kind.color().filled())
            .margin(18)
            .data(values.iter().enumerate().map(|(index, value)| (index, *value))),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatra_core::insight_rows;

    #[test]
    fn chart_metadata_follows_theme() {
        assert_eq!(
            ChartKind::Mentions.title(Theme::Food),
            "Tourist Mentions by City (Food)"
        );
        assert_eq!(
            ChartKind::TourismScore.title(Theme::Desert),
            "Tourism Score Index (Desert)"
        );
        assert_eq!(ChartKind::Sentiment.file_name(), "sentiment_chart.png");
    }

    #[test]
    fn values_follow_chart_kind() {
        let rows = insight_rows(Theme::Desert);
        assert_eq!(ChartKind::Mentions.values(&rows), vec![160.0, 120.0, 70.0]);
        assert_eq!(ChartKind::Sentiment.values(&rows), vec![0.86, 0.81, 0.75]);
        assert_eq!(ChartKind::TourismScore.values(&rows), vec![137.6, 97.2, 52.5]);
    }

    #[test]
    fn renders_png_of_chart_size() {
        let rows = insight_rows(Theme::Nature);
        for kind in ChartKind::ALL {
            let png = render_bar_chart(kind, Theme::Nature, &rows).unwrap();
            assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));

            let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
            assert_eq!((decoded.width(), decoded.height()), CHART_SIZE);
        }
    }

    #[test]
    fn empty_rows_are_rejected() {
        assert!(render_bar_chart(ChartKind::Mentions, Theme::Food, &[]).is_err());
    }
}
