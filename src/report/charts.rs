use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{CategoryStat, FieldStats};

const SKYBLUE: RGBColor = RGBColor(135, 206, 235);
const CHART_SIZE: (u32, u32) = (1000, 600);

/// Titles and output name of one category bar chart.
#[derive(Debug, Clone, Copy)]
pub struct BarChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub file_name: &'static str,
    pub limit: Option<usize>,
}

impl BarChart {
    pub fn select<'a>(&self, stats: &'a FieldStats) -> &'a [CategoryStat] {
        match self.limit {
            Some(n) => stats.top(n),
            None => &stats.categories,
        }
    }
}

/// Draws the chart's categories as skyblue bars into an SVG at `path`.
pub fn render_bar_chart(path: &Path, chart: &BarChart, stats: &FieldStats) -> Result<()> {
    let bars = chart.select(stats);
    if bars.is_empty() {
        return Err(Error::Render(format!("{}: no data", chart.title)));
    }
    draw_bars(path, chart, bars).map_err(|e| Error::Render(e.to_string()))?;
    tracing::info!("{} chart saved as {}", chart.title, path.display());
    Ok(())
}

fn draw_bars(
    path: &Path,
    chart: &BarChart,
    bars: &[CategoryStat],
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = bars.len() as u32;
    let max_count = bars.iter().map(|b| b.count).max().unwrap_or(0) as u32;

    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title, ("sans-serif", 24.0).into_font())
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u32..max_count + 1)?;

    let label = |value: &SegmentValue<u32>| {
        let index = match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i as usize,
            SegmentValue::Last => return String::new(),
        };
        bars.get(index).map(|b| b.value.clone()).unwrap_or_default()
    };

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&label)
        .x_label_style(("sans-serif", 12.0).into_font().transform(FontTransform::Rotate90))
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .draw()?;

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(SKYBLUE.filled())
            .margin(10)
            .data(bars.iter().enumerate().map(|(i, b)| (i as u32, b.count as u32))),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CHART: BarChart = BarChart {
        title: "Salaries Range",
        x_label: "Salary",
        y_label: "Range",
        file_name: "salaries_range.svg",
        limit: Some(2),
    };

    #[test]
    fn test_select_applies_limit() {
        let stats = FieldStats::from_values("salaries", ["na", "na", "5-8", "10-15"]);
        let selected = TEST_CHART.select(&stats);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].value, "na");
        assert_eq!(selected, stats.top(2));

        let unlimited = BarChart { limit: None, ..TEST_CHART };
        assert_eq!(unlimited.select(&stats).len(), 3);
    }

    #[test]
    fn test_renders_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TEST_CHART.file_name);
        let stats = FieldStats::from_values("salaries", ["na", "na", "5-8"]);

        render_bar_chart(&path, &TEST_CHART, &stats).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_empty_chart_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        assert!(matches!(
            render_bar_chart(&path, &TEST_CHART, &FieldStats::default()),
            Err(Error::Render(_))
        ));
        assert!(!path.exists());
    }
}
