//! Violin plot of one sample group: one violin per gene

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::error::{ExpError, Result};
use crate::filter::{GroupAggregate, LongRow};
use crate::stats::{gaussian_kde, linspace, median, quantile, scott_bandwidth, QuantileMethod};
use crate::transform::ValueScale;

/// Alternating violin colours
const PALETTE: [RGBColor; 2] = [RGBColor(0x87, 0xCE, 0xFA), RGBColor(0xFF, 0x80, 0x00)];
const INNER_BOX_COLOR: RGBColor = RGBColor(61, 61, 61);

/// Width of the widest violin in category units
const VIOLIN_WIDTH: f64 = 0.8;
/// Density evaluation points per violin
const GRID_SIZE: usize = 100;

/// Figure size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotOptions {
    /// 6.4 x 4.8 inches at 300 dpi
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1440,
        }
    }
}

/// Pixel sizes derived from the canvas
#[derive(Debug, Clone, Copy)]
struct Layout {
    font_size: u32,
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
    label_offset: i32,
}

impl Layout {
    fn new(options: &PlotOptions) -> Self {
        let font_size = (options.height / 25).max(8);
        Self {
            font_size,
            margin: options.height / 50,
            x_label_area: options.height / 10 * 3,
            y_label_area: options.width / 8,
            label_offset: i32::try_from(font_size / 2).unwrap_or(i32::MAX),
        }
    }
}

/// Values sharing one x-axis category
#[derive(Debug)]
struct Category<'a> {
    label: &'a str,
    values: Vec<f64>,
}

/// Group rows by label, categories in order of first appearance
fn categories(rows: &[LongRow]) -> Vec<Category<'_>> {
    let mut cats: Vec<Category> = Vec::new();
    for row in rows {
        match cats.iter_mut().find(|c| c.label == row.label) {
            Some(cat) => cat.values.push(row.value),
            None => cats.push(Category {
                label: &row.label,
                values: vec![row.value],
            }),
        }
    }
    cats
}

/// Y-axis range covering every value with 5% padding
fn y_range(rows: &[LongRow]) -> (f64, f64) {
    if rows.is_empty() {
        return (0.0, 1.0);
    }
    let lo = rows.iter().map(|r| r.value).fold(f64::INFINITY, f64::min);
    let hi = rows.iter().map(|r| r.value).fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Closed outline of a violin centred at `x`, density cut at the data extremes.
/// `None` when the values have no spread to estimate a density from.
fn violin_outline(x: f64, values: &[f64], half_width: f64) -> Option<Vec<(f64, f64)>> {
    let bandwidth = scott_bandwidth(values)?;
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let grid = linspace(lo, hi, GRID_SIZE);
    let density = gaussian_kde(values, bandwidth, &grid);
    let peak = density.iter().copied().fold(0.0, f64::max);
    if peak <= 0.0 {
        return None;
    }

    let mut outline = Vec::with_capacity(2 * grid.len());
    outline.extend(
        grid.iter()
            .zip(&density)
            .map(|(&y, &d)| (x - half_width * d / peak, y)),
    );
    outline.extend(
        grid.iter()
            .zip(&density)
            .rev()
            .map(|(&y, &d)| (x + half_width * d / peak, y)),
    );
    Some(outline)
}

/// Draw the violins of one group and write the image to `path`.
///
/// An aggregate without rows still produces a figure with empty axes.
pub fn render_violin_plot<P: AsRef<Path>>(
    path: P,
    aggregate: &GroupAggregate,
    scale: ValueScale,
    options: &PlotOptions,
) -> Result<()> {
    let path = path.as_ref();
    if options.width == 0 || options.height == 0 {
        return Err(ExpError::InvalidInput {
            reason: format!("figure size {}x{} is empty", options.width, options.height),
        });
    }
    draw_violins(path, &aggregate.rows, scale, options).map_err(|e| ExpError::Render {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn draw_violins(
    path: &Path,
    rows: &[LongRow],
    scale: ValueScale,
    options: &PlotOptions,
) -> std::result::Result<(), Box<dyn Error>> {
    let cats = categories(rows);
    let n_max = cats.iter().map(|c| c.values.len()).max().unwrap_or(1);
    let n_slots = cats.len().max(1) as f64;
    let (y_lo, y_hi) = y_range(rows);

    let layout = Layout::new(options);
    let font_size = layout.font_size;
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(layout.margin)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area)
        .build_cartesian_2d(-0.5..n_slots - 0.5, y_lo..y_hi)?;

    // category names are drawn below, rotated
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_: &f64| String::new())
        .y_desc(scale.axis_label())
        .axis_desc_style(("sans-serif", font_size))
        .label_style(("sans-serif", font_size))
        .draw()?;

    for (i, cat) in cats.iter().enumerate() {
        let x = i as f64;
        let color = PALETTE[i % PALETTE.len()];
        let half_width = VIOLIN_WIDTH / 2.0 * cat.values.len() as f64 / n_max as f64;

        match violin_outline(x, &cat.values, half_width) {
            Some(outline) => {
                let mut closed = outline.clone();
                closed.push(outline[0]);
                chart.draw_series(std::iter::once(Polygon::new(outline, color.filled())))?;
                chart.draw_series(std::iter::once(PathElement::new(closed, BLACK.stroke_width(2))))?;
            }
            None => {
                let y = cat.values[0];
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(x - half_width, y), (x + half_width, y)],
                    color.stroke_width(4),
                )))?;
            }
        }

        let q1 = quantile(&cat.values, 0.25, QuantileMethod::Linear);
        let q3 = quantile(&cat.values, 0.75, QuantileMethod::Linear);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.02, q1), (x + 0.02, q3)],
            INNER_BOX_COLOR.filled(),
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            (x, median(&cat.values)),
            (font_size / 4).max(2),
            WHITE.filled(),
        )))?;
    }

    let label_style = TextStyle::from(("sans-serif", font_size)).transform(FontTransform::Rotate90);
    let offset = layout.label_offset;
    for (i, cat) in cats.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64, y_lo));
        root.draw(&Text::new(
            cat.label.to_string(),
            (px.saturating_add(offset), py.saturating_add(offset)),
            label_style.clone(),
        ))?;
    }

    root.present()?;
    Ok(())
}
