//! Charts over the analyzed review table.
//!
//! All chart data is gathered before anything is drawn, so a table that is
//! missing a required column fails without leaving partial output behind.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzers::analyzer::LABEL_COLUMN;
use crate::config::PipelineConfig;
use crate::sentiment::SentimentLabel;
use crate::table::Table;

pub const SENTIMENT_CHART: &str = "sentiment_by_bank.png";
pub const RATING_CHART: &str = "rating_dist.png";
pub const THEME_CHART: &str = "pain_points.png";

/// Separator between tags in the `theme` column.
const THEME_SEPARATOR: &str = ", ";

const LABEL_COLORS: [RGBColor; 3] = [
    RGBColor(68, 1, 84),
    RGBColor(33, 145, 140),
    RGBColor(253, 231, 37),
];
const THEME_COLOR: RGBColor = RGBColor(203, 27, 79);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    /// Banks in order of first appearance.
    pub banks: Vec<String>,
    /// Per bank, counts in [`SentimentLabel::ALL`] order.
    pub sentiment_counts: Vec<[usize; 3]>,
    /// Per bank, counts of ratings 1 through 5.
    pub rating_counts: Vec<[usize; 5]>,
    /// Theme tags of negative reviews, most frequent first.
    pub themes: Vec<(String, usize)>,
}

fn parse_rating(value: &str) -> Option<usize> {
    let rating = value.trim().parse::<f64>().ok()?.round();
    (1.0..=5.0).contains(&rating).then_some(rating as usize)
}

impl ChartData {
    pub fn from_table(table: &Table) -> Result<Self> {
        let bank_idx = table.require_column("bank_name")?;
        let label_idx = table.require_column(LABEL_COLUMN)?;
        let rating_idx = table.require_column("rating")?;
        let theme_idx = table.require_column("theme")?;

        let mut data = ChartData::default();
        let mut theme_counts: HashMap<&str, usize> = HashMap::new();

        let rows = table
            .column(bank_idx)
            .zip(table.column(label_idx))
            .zip(table.column(rating_idx))
            .zip(table.column(theme_idx));

        for (((bank, label), rating), themes) in rows {
            let idx = match data.banks.iter().position(|b| b == bank) {
                Some(idx) => idx,
                None => {
                    data.banks.push(bank.to_string());
                    data.sentiment_counts.push([0; 3]);
                    data.rating_counts.push([0; 5]);
                    data.banks.len() - 1
                }
            };

            let label = SentimentLabel::parse(label);
            if let Some(label) = label {
                let slot = SentimentLabel::ALL
                    .iter()
                    .position(|l| *l == label)
                    .unwrap_or_default();
                data.sentiment_counts[idx][slot] += 1;
            }
            if let Some(rating) = parse_rating(rating) {
                data.rating_counts[idx][rating - 1] += 1;
            }
            if label == Some(SentimentLabel::Negative) {
                for theme in themes.split(THEME_SEPARATOR).filter(|t| !t.is_empty()) {
                    *theme_counts.entry(theme).or_insert(0) += 1;
                }
            }
        }

        let mut themes: Vec<(String, usize)> = theme_counts
            .into_iter()
            .map(|(theme, count)| (theme.to_string(), count))
            .collect();
        themes.sort_by(|a, b| Reverse(a.1).cmp(&Reverse(b.1)).then_with(|| a.0.cmp(&b.0)));
        data.themes = themes;

        Ok(data)
    }
}

/// Grouped bars of label counts, one group per bank.
fn draw_sentiment_by_bank(data: &ChartData, path: &Path) -> Result<()> {
    // Each bank takes one slot per label plus a spacer.
    let width = SentimentLabel::ALL.len() as i32 + 1;
    let slots = data.banks.len().max(1) as i32 * width;
    let max = data
        .sentiment_counts
        .iter()
        .flat_map(|c| c.iter())
        .copied()
        .max()
        .unwrap_or(0) as i32;

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment Distribution by Bank", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..slots).into_segmented(), 0..max + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(k) if k % width == 1 => data
                .banks
                .get((k / width) as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("bank_name")
        .y_desc("count")
        .draw()?;

    for (slot, label) in SentimentLabel::ALL.iter().enumerate() {
        let color = LABEL_COLORS[slot];
        chart
            .draw_series(data.sentiment_counts.iter().enumerate().map(|(bank, counts)| {
                let k = bank as i32 * width + slot as i32;
                Rectangle::new(
                    [
                        (SegmentValue::Exact(k), 0),
                        (SegmentValue::Exact(k + 1), counts[slot] as i32),
                    ],
                    color.filled(),
                )
            }))?
            .label(label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Step outline of the rating histogram, one line per bank.
fn draw_rating_distribution(data: &ChartData, path: &Path) -> Result<()> {
    let max = data
        .rating_counts
        .iter()
        .flat_map(|c| c.iter())
        .copied()
        .max()
        .unwrap_or(0) as f64;

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Rating Distribution Comparison", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..5.5f64, 0f64..max + 1.0)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .x_desc("rating")
        .y_desc("count")
        .draw()?;

    for (idx, (bank, counts)) in data.banks.iter().zip(&data.rating_counts).enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let mut points = vec![(0.5, 0.0)];
        for (i, count) in counts.iter().enumerate() {
            let center = i as f64 + 1.0;
            points.push((center - 0.5, *count as f64));
            points.push((center + 0.5, *count as f64));
        }
        points.push((5.5, 0.0));

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(bank.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Horizontal bars of negative-review themes, most frequent on top.
fn draw_pain_points(data: &ChartData, path: &Path) -> Result<()> {
    let n = data.themes.len() as i32;
    let max = data.themes.first().map(|(_, c)| *c).unwrap_or(0) as i32;

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Pain Point Themes (Negative Reviews)", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(200)
        .build_cartesian_2d(0..max + 1, (0..n.max(1)).into_segmented())?;

    // Rank 0 is drawn in the highest row.
    let theme_at = |row: i32| -> String {
        data.themes
            .get((n - 1 - row) as usize)
            .map(|(theme, _)| theme.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n.max(1) as usize)
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(row) if *row < n => theme_at(*row),
            _ => String::new(),
        })
        .x_desc("count")
        .draw()?;

    chart.draw_series(data.themes.iter().enumerate().map(|(rank, (_, count))| {
        let row = n - 1 - rank as i32;
        Rectangle::new(
            [
                (0, SegmentValue::Exact(row)),
                (*count as i32, SegmentValue::Exact(row + 1)),
            ],
            THEME_COLOR.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Renders the three charts into the chart directory and returns their paths.
#[tracing::instrument(skip_all, fields(input = %config.analyzed_path().display()))]
pub fn visualize(config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let table = Table::read(&config.analyzed_path())?;
    let data = ChartData::from_table(&table)?;

    std::fs::create_dir_all(&config.chart_dir)
        .with_context(|| format!("creating directory {}", config.chart_dir.display()))?;

    let charts: [(&str, fn(&ChartData, &Path) -> Result<()>); 3] = [
        (SENTIMENT_CHART, draw_sentiment_by_bank),
        (RATING_CHART, draw_rating_distribution),
        (THEME_CHART, draw_pain_points),
    ];

    let mut saved = Vec::with_capacity(charts.len());
    for (file, draw) in charts {
        let path = config.chart_dir.join(file);
        draw(&data, &path).with_context(|| format!("rendering {}", file))?;
        info!(path = %path.display(), "Saved {}", file);
        saved.push(path);
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(with_theme: bool) -> Table {
        let mut headers = vec!["review_text", "rating", "bank_name", "sentiment_label"];
        if with_theme {
            headers.push("theme");
        }
        let rows = [
            ["slow", "1", "CBE", "Negative", "Performance, Reliability"],
            ["crash", "2.0", "CBE", "Negative", "Reliability"],
            ["ok", "3", "BOA", "Neutral", "Reliability"],
            ["great", "5", "BOA", "Positive", ""],
            ["otp", "", "Dashen", "Negative", ""],
        ];
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| {
                    r[..headers.len()]
                        .iter()
                        .map(|v| v.to_string())
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_counts_per_bank() {
        let data = ChartData::from_table(&table(true)).unwrap();

        assert_eq!(data.banks, vec!["CBE", "BOA", "Dashen"]);
        // Positive, Neutral, Negative
        assert_eq!(data.sentiment_counts[0], [0, 0, 2]);
        assert_eq!(data.sentiment_counts[1], [1, 1, 0]);
        assert_eq!(data.rating_counts[0], [1, 1, 0, 0, 0]);
        assert_eq!(data.rating_counts[1], [0, 0, 1, 0, 1]);
        assert_eq!(data.rating_counts[2], [0; 5]);
    }

    #[test]
    fn test_themes_from_negative_reviews_only() {
        let data = ChartData::from_table(&table(true)).unwrap();
        assert_eq!(
            data.themes,
            vec![("Reliability".to_string(), 2), ("Performance".to_string(), 1)]
        );
    }

    #[test]
    fn test_missing_theme_column_fails() {
        let err = ChartData::from_table(&table(false)).unwrap_err();
        assert!(err.to_string().contains("theme"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default()
            .with_data_dir(dir.path())
            .with_chart_dir(dir.path());

        assert!(visualize(&config).is_err());
        assert!(!dir.path().join(SENTIMENT_CHART).exists());
    }

    #[test]
    fn test_missing_theme_writes_no_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default()
            .with_data_dir(dir.path())
            .with_chart_dir(dir.path());
        table(false).write(&config.analyzed_path()).unwrap();

        assert!(visualize(&config).is_err());
        for file in [SENTIMENT_CHART, RATING_CHART, THEME_CHART] {
            assert!(!dir.path().join(file).exists());
        }
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("4"), Some(4));
        assert_eq!(parse_rating("4.0"), Some(4));
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("0"), None);
        assert_eq!(parse_rating("6"), None);
    }
}
