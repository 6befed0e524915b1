//! PNG line plots and shaded interval bands.

use std::fs;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

/// Caption, axis labels and pixel size of one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub size: (u32, u32),
}

/// One y-series drawn against the shared x vector.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub y: &'a [f64],
    pub label: &'a str,
    pub color: RGBColor,
}

/// Lower/upper bound pair rendered as a filled band.
#[derive(Debug, Clone, Copy)]
pub struct Band<'a> {
    pub low: &'a [f64],
    pub high: &'a [f64],
    pub label: &'a str,
}

/// Signal against its sample index.
pub fn plot_signal(path: &Path, signal: &[f64], spec: &ChartSpec) -> anyhow::Result<()> {
    let x: Vec<f64> = (0..signal.len()).map(|i| i as f64).collect();
    let series = Series {
        y: signal,
        label: "signal",
        color: BLUE,
    };
    draw_chart(path, &x, &[series], None, spec)
}

pub fn plot_line(
    path: &Path,
    x: &[f64],
    series: &[Series],
    spec: &ChartSpec,
) -> anyhow::Result<()> {
    draw_chart(path, x, series, None, spec)
}

/// Shaded `[low, high]` band with optional series drawn on top.
pub fn plot_bounds(
    path: &Path,
    x: &[f64],
    band: Band,
    series: &[Series],
    spec: &ChartSpec,
) -> anyhow::Result<()> {
    draw_chart(path, x, series, Some(band), spec)
}

fn draw_chart(
    path: &Path,
    x: &[f64],
    series: &[Series],
    band: Option<Band>,
    spec: &ChartSpec,
) -> anyhow::Result<()> {
    for s in series {
        anyhow::ensure!(s.y.len() == x.len(), "series '{}' length mismatch", s.label);
    }
    if let Some(b) = &band {
        anyhow::ensure!(
            b.low.len() == x.len() && b.high.len() == x.len(),
            "band '{}' length mismatch",
            b.label
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let x_range = axis_range(x.iter().copied());
    let ys = series
        .iter()
        .flat_map(|s| s.y.iter().copied())
        .chain(band.iter().flat_map(|b| b.low.iter().chain(b.high).copied()));
    let y_range = axis_range(ys);

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 34).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .draw()?;

    if let Some(b) = band {
        let fill = BLUE.mix(0.25).filled();
        let mut outline: Vec<(f64, f64)> = x.iter().copied().zip(b.low.iter().copied()).collect();
        outline.extend(x.iter().copied().zip(b.high.iter().copied()).rev());
        chart
            .draw_series(std::iter::once(Polygon::new(outline, fill)))?
            .label(b.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 25, y + 5)], fill));
    }

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                x.iter().copied().zip(s.y.iter().copied()),
                &color,
            ))?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 25, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.7))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Finite min..max of `values` padded by 5%; falls back to `0..1`.
pub(crate) fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}
