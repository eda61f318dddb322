//! Bar and pie charts for a finished report
//!
//! Both panels are drawn side by side on one SVG canvas with [`plotters`].
//! The SVG backend estimates text layout without system fonts, so rendering
//! also works in headless environments.

use crate::core::aggregator::rounded_percent;
use crate::models::{CategoryCounts, InteractionCategory, Report};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const CHART_TITLE: &str = "Hinge Data Visualization";
pub const BAR_TITLE: &str = "Total Likes Sent vs. Received";
pub const PIE_TITLE: &str = "Distribution of Interaction Types";

const PASTEL: [RGBColor; 4] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
];

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to prepare drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Numbers the charts are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartInput {
    pub likes_sent: usize,
    pub likes_received: usize,
    pub counts: CategoryCounts,
}

impl ChartInput {
    pub fn from_report(report: &Report) -> Self {
        Self {
            likes_sent: report.summary.total_likes_sent,
            likes_received: report.summary.total_likes_received,
            counts: report.counts,
        }
    }

    /// Pie wedge labels with their integer share of all interactions
    pub fn wedge_labels(&self) -> Vec<(InteractionCategory, String)> {
        let total = self.counts.total();
        InteractionCategory::ALL
            .iter()
            .map(|&category| {
                let count = self.counts.get(category);
                let percent = rounded_percent(count, total).unwrap_or(0);
                (category, format!("{} {}%", category.label(), percent))
            })
            .collect()
    }
}

/// Render both charts into an SVG file
pub fn render_svg_file(input: &ChartInput, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(&root, input)?;
    root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;

    tracing::info!("Wrote charts to {}", path.display());
    Ok(())
}

/// Render both charts into an in-memory SVG document
pub fn render_svg_string(input: &ChartInput, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(&root, input)?;
        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
    }
    Ok(svg)
}

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, input: &ChartInput) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let body = root
        .titled(CHART_TITLE, ("sans-serif", 32).into_font())
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let (width, _) = body.dim_in_pixel();
    let (left, right) = body.split_horizontally((width / 2) as i32);

    draw_bar_panel(&left, input)?;
    draw_pie_panel(&right, input)?;

    Ok(())
}

fn draw_bar_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, input: &ChartInput) -> Result<()> {
    let sent = saturate(input.likes_sent);
    let received = saturate(input.likes_received);

    // Headroom above the tallest bar; never an empty range
    let tallest = sent.max(received).max(1);
    let y_top = tallest.saturating_add(tallest / 10 + 1);

    let mut chart = ChartBuilder::on(area)
        .caption(BAR_TITLE, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..1u32).into_segmented(), 0u32..y_top)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Likes")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(0) => "Likes Sent".to_string(),
            SegmentValue::CenterOf(1) => "Likes Received".to_string(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(PASTEL[0].filled())
                .margin(30)
                .data([(0u32, sent), (1u32, received)]),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

fn draw_pie_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, input: &ChartInput) -> Result<()> {
    let area = area
        .titled(PIE_TITLE, ("sans-serif", 22).into_font())
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.3;

    draw_legend(&area, input)?;

    if input.counts.total() == 0 {
        area.draw(&Circle::new(center, radius as i32, BLACK.stroke_width(1)))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        area.draw(&Text::new(
            "No interactions",
            (center.0 - 50, center.1 - 8),
            ("sans-serif", 16).into_font(),
        ))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
        return Ok(());
    }

    // Zero-sized wedges are left out of the pie; the legend still lists them
    let mut sizes = Vec::new();
    let mut colors = Vec::new();
    let mut labels = Vec::new();
    for (index, (category, label)) in input.wedge_labels().into_iter().enumerate() {
        let count = input.counts.get(category);
        if count > 0 {
            sizes.push(count as f64);
            colors.push(PASTEL[index]);
            labels.push(label);
        }
    }

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
    area.draw(&pie)
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

/// Legend listing every category, including those with no wedge
fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, input: &ChartInput) -> Result<()> {
    let (x, top) = (10, 10);

    for (index, (_, label)) in input.wedge_labels().into_iter().enumerate() {
        let y = top + 20 * index as i32;
        area.draw(&Rectangle::new([(x, y), (x + 12, y + 12)], PASTEL[index].filled()))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        area.draw(&Text::new(label, (x + 18, y), ("sans-serif", 14).into_font()))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    Ok(())
}

#[inline]
fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
