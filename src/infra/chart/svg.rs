use anyhow::Result;
use plotters::prelude::*;

use crate::domain::entities::chart::{ChartError, ChartPoint, ChartSpec};
use crate::domain::entities::score_table::format_numeric_value;
use crate::usecase::ports::chart_renderer::ChartRenderer;

/// Series colors, in the order subjects first appear.
const PALETTE: [RGBColor; 6] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
];

pub fn series_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

pub fn series_color_hex(idx: usize) -> String {
    let RGBColor(r, g, b) = series_color(idx);
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[derive(Debug, Clone, Copy)]
pub struct PlottersSvgRenderer {
    pub width: u32,
    pub height: u32,
}

impl ChartRenderer for PlottersSvgRenderer {
    fn render_svg(&self, spec: &ChartSpec) -> Result<String, ChartError> {
        draw_line_chart(spec, (self.width, self.height))
            .map_err(|err| ChartError::Render(format!("{err:#}")))
    }
}

/// Maps a data value onto the drawing axis. Inverted charts plot the negated
/// value so the smallest number ends up at the top.
fn axis_value(spec: &ChartSpec, value: f64) -> f64 {
    if spec.y_axis_inverted {
        -value
    } else {
        value
    }
}

fn y_axis_range(spec: &ChartSpec) -> (f64, f64) {
    let (lo, hi) = spec.value_bounds().unwrap_or((0.0, 1.0));
    let (lo, hi) = (axis_value(spec, lo), axis_value(spec, hi));
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let pad = ((hi - lo) * 0.1).max(1.0);
    (lo - pad, hi + pad)
}

fn x_label(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

pub fn draw_line_chart(spec: &ChartSpec, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let category_count = spec.categories.len().max(1);
        let x_range = -0.5..(category_count as f64 - 0.5);
        let (y_lo, y_hi) = y_axis_range(spec);

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 22).into_font())
            .margin(16)
            .set_label_area_size(LabelAreaPosition::Left, 56)
            .set_label_area_size(LabelAreaPosition::Bottom, 48)
            .build_cartesian_2d(x_range, y_lo..y_hi)?;

        let categories = spec.categories.clone();
        let inverted = spec.y_axis_inverted;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(category_count)
            .x_label_formatter(&|v| x_label(&categories, *v))
            .y_label_formatter(&|v| {
                let shown = if inverted { -*v } else { *v };
                format_numeric_value((shown * 100.0).round() / 100.0)
            })
            .x_desc(spec.x_title.as_str())
            .y_desc(spec.y_title.as_str())
            .draw()?;

        for (series_idx, series) in spec.series.iter().enumerate() {
            let color = series_color(series_idx);
            let to_axis =
                |point: &ChartPoint| (point.category as f64, axis_value(spec, point.value));

            for (segment_idx, segment) in series.segments().into_iter().enumerate() {
                let mut line = chart.draw_series(LineSeries::new(
                    segment.iter().map(to_axis),
                    color.stroke_width(2),
                ))?;
                if segment_idx == 0 {
                    line.label(series.name.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2))
                    });
                }
            }

            if spec.markers {
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(to_axis)
                        .map(|(x, y)| Circle::new((x, y), 4, color.filled())),
                )?;
            }
        }

        if !spec.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK.mix(0.3))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        root.present()?;
    }
    Ok(svg)
}
