//! Renders [`Table`] data to line, bar and pie charts through `plotters`.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;

use crate::table::Table;

const CHART_SIZE: (u32, u32) = (800, 600);

/// The chart shapes the viewer can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl FromStr for ChartKind {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<ChartKind> {
        match text.to_ascii_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            _ => bail!("unknown chart kind '{}' (expected line, bar or pie)", text),
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        };
        write!(f, "{}", name)
    }
}

/// Draws the table as the given chart kind into the file at `path`.
///
/// The backend is chosen by extension: `.svg` produces vector output, any
/// other extension goes through the bitmap backend.
pub fn render(table: &Table, kind: ChartKind, path: &Path) -> Result<()> {
    if is_svg(path) {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw(&root, table, kind)
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        draw(&root, table, kind)
    }
}

/// Draws an observed series and its forecast continuation into the file at
/// `path`. The forecast is drawn dashed so the two are distinguishable.
pub fn render_forecast(
    observed: &[f64],
    predicted: &[(f64, f64)],
    column: &str,
    path: &Path,
) -> Result<()> {
    if is_svg(path) {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_forecast(&root, observed, predicted, column)
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_forecast(&root, observed, predicted, column)
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    kind: ChartKind,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|error| anyhow!("Failed to fill chart background: {}", error))?;
    match kind {
        ChartKind::Line => draw_line(root, table)?,
        ChartKind::Bar => draw_bar(root, table)?,
        ChartKind::Pie => draw_pie(root, table)?,
    }
    root.present()
        .map_err(|error| anyhow!("Failed to write chart: {}", error))
}

fn draw_line<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, table: &Table) -> Result<()> {
    let series = table.series()?;
    let (x_low, x_high) = padded(0.0, (table.row_count() - 1) as f64);
    let (y_low, y_high) = value_range(
        series
            .iter()
            .flat_map(|(_, values)| values.iter().copied()),
    )?;

    let mut chart = ChartBuilder::on(root)
        .caption("Line chart", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_low..x_high, y_low..y_high)
        .map_err(|error| anyhow!("Failed to build chart axes: {}", error))?;

    chart
        .configure_mesh()
        .x_desc(table.headers()[0].as_str())
        .y_desc("value")
        .draw()
        .map_err(|error| anyhow!("Failed to draw chart mesh: {}", error))?;

    for (index, (name, values)) in series.iter().enumerate() {
        let color = palette_color(index);
        chart
            .draw_series(
                LineSeries::new(
                    values.iter().enumerate().map(|(x, &y)| (x as f64, y)),
                    color.stroke_width(2),
                )
                .point_size(3),
            )
            .map_err(|error| anyhow!("Failed to draw series '{}': {}", name, error))?
            .label(name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    draw_legend(&mut chart)
}

fn draw_bar<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, table: &Table) -> Result<()> {
    let series = table.series()?;
    let categories = table.labels();
    let (y_low, y_high) = value_range(
        series
            .iter()
            .flat_map(|(_, values)| values.iter().copied()),
    )?;
    // Bars grow from the zero line, so the axis must include it.
    let y_low = y_low.min(0.0);
    let y_high = y_high.max(0.0);

    let mut chart = ChartBuilder::on(root)
        .caption("Bar chart", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(categories.len() as f64 - 0.5), y_low..y_high)
        .map_err(|error| anyhow!("Failed to build chart axes: {}", error))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&|x| {
            let index = x.round();
            if (x - index).abs() > 0.25 || index < 0.0 {
                return String::new();
            }
            categories
                .get(index as usize)
                .cloned()
                .unwrap_or_default()
        })
        .x_desc(table.headers()[0].as_str())
        .y_desc("value")
        .draw()
        .map_err(|error| anyhow!("Failed to draw chart mesh: {}", error))?;

    let group_width = 0.8;
    let bar_width = group_width / series.len() as f64;
    for (index, (name, values)) in series.iter().enumerate() {
        let color = palette_color(index);
        let offset = index as f64 * bar_width - group_width / 2.0;
        chart
            .draw_series(values.iter().enumerate().map(|(category, &value)| {
                let left = category as f64 + offset;
                Rectangle::new([(left, 0.0), (left + bar_width, value)], color.filled())
            }))
            .map_err(|error| anyhow!("Failed to draw series '{}': {}", name, error))?
            .label(name.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    draw_legend(&mut chart)
}

/// Draws the first value column as a pie, sliced by the label column. Further
/// value columns are ignored.
fn draw_pie<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, table: &Table) -> Result<()> {
    let series = table.series()?;
    let (name, values) = &series[0];
    if let Some(value) = values.iter().find(|value| **value < 0.0) {
        bail!(
            "pie chart needs non-negative values, column '{}' has {}",
            name,
            value
        );
    }
    if values.iter().sum::<f64>() == 0.0 {
        bail!("pie chart needs at least one positive value in column '{}'", name);
    }

    let title = format!("Pie chart - {}", name);
    let area = root
        .titled(&title, ("sans-serif", 24))
        .map_err(|error| anyhow!("Failed to draw chart title: {}", error))?;

    let labels = table.labels();
    let colors: Vec<RGBColor> = (0..values.len()).map(palette_color).collect();
    let dimensions = area.dim_in_pixel();
    let center = (dimensions.0 as i32 / 2, dimensions.1 as i32 / 2);
    let radius = f64::from(dimensions.0.min(dimensions.1)) * 0.35;

    let mut pie = Pie::new(&center, &radius, values, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font());
    pie.percentages(("sans-serif", 14).into_font());
    area.draw(&pie)
        .map_err(|error| anyhow!("Failed to draw pie chart: {}", error))?;
    Ok(())
}

fn draw_forecast<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    observed: &[f64],
    predicted: &[(f64, f64)],
    column: &str,
) -> Result<()> {
    if observed.is_empty() {
        bail!("forecast chart needs observed values");
    }
    root.fill(&WHITE)
        .map_err(|error| anyhow!("Failed to fill chart background: {}", error))?;

    let last_x = predicted
        .last()
        .map(|(x, _)| *x)
        .unwrap_or((observed.len() - 1) as f64);
    let (x_low, x_high) = padded(0.0, last_x);
    let (y_low, y_high) = value_range(
        observed
            .iter()
            .copied()
            .chain(predicted.iter().map(|(_, y)| *y)),
    )?;

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("{} linear trend forecast", column),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_low..x_high, y_low..y_high)
        .map_err(|error| anyhow!("Failed to build chart axes: {}", error))?;

    chart
        .configure_mesh()
        .x_desc("index")
        .y_desc("value")
        .draw()
        .map_err(|error| anyhow!("Failed to draw chart mesh: {}", error))?;

    chart
        .draw_series(
            LineSeries::new(
                observed.iter().enumerate().map(|(x, &y)| (x as f64, y)),
                BLUE.stroke_width(2),
            )
            .point_size(3),
        )
        .map_err(|error| anyhow!("Failed to draw observed series: {}", error))?
        .label("observed")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            predicted.iter().copied(),
            8,
            4,
            RED.stroke_width(2),
        ))
        .map_err(|error| anyhow!("Failed to draw forecast series: {}", error))?
        .label("forecast")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    draw_legend(&mut chart)?;
    root.present()
        .map_err(|error| anyhow!("Failed to write chart: {}", error))
}

fn draw_legend<'a, DB: DrawingBackend + 'a, CT: CoordTranslate>(
    chart: &mut ChartContext<'a, DB, CT>,
) -> Result<()> {
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|error| anyhow!("Failed to draw chart legend: {}", error))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .map(|extension| extension.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

fn palette_color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

/// The plotting range covering every value, with a margin so extremes do not
/// sit on the frame.
fn value_range(values: impl Iterator<Item = f64>) -> Result<(f64, f64)> {
    match values.minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => bail!("chart has no values"),
        MinMaxResult::OneElement(value) => Ok(padded(value, value)),
        MinMaxResult::MinMax(low, high) => Ok(padded(low, high)),
    }
}

fn padded(low: f64, high: f64) -> (f64, f64) {
    if low == high {
        return (low - 1.0, high + 1.0);
    }
    let margin = (high - low) * 0.05;
    (low - margin, high + margin)
}
