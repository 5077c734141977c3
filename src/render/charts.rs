use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::{ColorMap, AXIS_GREY, PRIMARY};
use crate::data::aggregate::{self, CategoryCounts, GroupStats};

const FONT: &str = "sans-serif";
const TITLE_SIZE: i32 = 22;
const LABEL_SIZE: i32 = 13;

// ---------------------------------------------------------------------------
// Bar chart: one bar per category
// ---------------------------------------------------------------------------

pub fn bar_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    counts: &CategoryCounts,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    let slots = counts.len().max(1);
    let y_max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let y_top = y_max + (y_max / 10).max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d((0..slots).into_segmented(), 0..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(WHITE.mix(0.3))
        .x_labels(slots)
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style((FONT, LABEL_SIZE))
        .axis_desc_style((FONT, LABEL_SIZE + 2))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(PRIMARY.filled())
            .margin(12)
            .data(counts.iter().enumerate().map(|(i, (_, c))| (i, *c))),
    )?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Donut chart: one labelled wedge per category
// ---------------------------------------------------------------------------

/// Hole radius as a fraction of the outer radius (wedge width 0.35).
const DONUT_HOLE: f64 = 0.65;

pub fn donut_chart<DB>(root: &DrawingArea<DB, Shift>, title: &str, counts: &CategoryCounts) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root.titled(title, (FONT, TITLE_SIZE).into_font())?;
    if counts.is_empty() {
        return Ok(());
    }

    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.36;

    let color_map = ColorMap::new(counts.iter().map(|(v, _)| v));
    let sizes: Vec<f64> = counts.iter().map(|(_, c)| *c as f64).collect();
    let colors: Vec<RGBColor> = counts.iter().map(|(v, _)| color_map.color_for(v)).collect();
    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.donut_hole(radius * DONUT_HOLE);
    pie.label_style((FONT, LABEL_SIZE + 1).into_font().color(&BLACK));
    area.draw(&pie)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Range + mean chart: [min, max] behind [min, mean], one row per group
// ---------------------------------------------------------------------------

const RANGE_HALF_HEIGHT: f64 = 0.45;
const MEAN_HALF_HEIGHT: f64 = 0.25;

pub fn range_chart<DB>(root: &DrawingArea<DB, Shift>, title: &str, stats: &[GroupStats]) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels: Vec<String> = stats.iter().map(|s| s.group.to_string()).collect();
    let rows = stats.len().max(1);

    let (x_lo, x_hi) = if stats.is_empty() {
        (0.0, 1.0)
    } else {
        let lo = stats.iter().map(|s| s.min).fold(f64::INFINITY, f64::min);
        let hi = stats.iter().map(|s| s.max).fold(f64::NEG_INFINITY, f64::max);
        let pad = ((hi - lo) * 0.05).max(0.5);
        (lo - pad, hi + pad)
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, -0.5..(rows as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(AXIS_GREY.stroke_width(1))
        .y_labels(rows)
        .y_label_formatter(&|v: &f64| {
            let row = v.round();
            if (v - row).abs() > 1e-6 || row < 0.0 {
                return String::new();
            }
            labels.get(row as usize).cloned().unwrap_or_default()
        })
        .x_label_formatter(&|v: &f64| format!("{v:.1}"))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(stats.iter().enumerate().map(|(i, s)| {
        let y = i as f64;
        Rectangle::new(
            [(s.min, y - RANGE_HALF_HEIGHT), (s.max, y + RANGE_HALF_HEIGHT)],
            PRIMARY.mix(0.35).filled(),
        )
    }))?;

    chart.draw_series(stats.iter().enumerate().map(|(i, s)| {
        let y = i as f64;
        Rectangle::new(
            [(s.min, y - MEAN_HALF_HEIGHT), (s.mean, y + MEAN_HALF_HEIGHT)],
            PRIMARY.filled(),
        )
    }))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Histogram: pre-binned sample, white bin edges
// ---------------------------------------------------------------------------

pub fn histogram_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    hist: &aggregate::Histogram,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_lo, x_hi) = match (hist.edges.first(), hist.edges.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (0.0, 1.0),
    };
    let y_top = (hist.max_count() as f64 * 1.05).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(WHITE.mix(0.3))
        .x_label_formatter(&|v: &f64| format!("{v:.0}"))
        .y_label_formatter(&|v: &f64| format!("{v:.0}"))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(
        hist.bins()
            .map(|(lo, hi, c)| Rectangle::new([(lo, 0.0), (hi, c as f64)], PRIMARY.filled())),
    )?;
    chart.draw_series(
        hist.bins()
            .map(|(lo, hi, c)| Rectangle::new([(lo, 0.0), (hi, c as f64)], WHITE.stroke_width(1))),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::render::backend::TextTolerantBackend;

    const W: u32 = 320;
    const H: u32 = 240;

    /// Draw into an in-memory RGB buffer.
    fn draw_to_buffer<F>(draw: F) -> Vec<u8>
    where
        F: FnOnce(&DrawingArea<TextTolerantBackend<BitMapBackend<'_>>, Shift>) -> Result<()>,
    {
        let mut buf = vec![0u8; (W * H * 3) as usize];
        {
            let root = TextTolerantBackend::new(BitMapBackend::with_buffer(&mut buf, (W, H)))
                .into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw(&root).unwrap();
            root.present().unwrap();
        }
        buf
    }

    fn count_pixels(buf: &[u8], color: RGBColor) -> usize {
        buf.chunks(3)
            .filter(|px| px[0] == color.0 && px[1] == color.1 && px[2] == color.2)
            .count()
    }

    fn counts(pairs: &[(&str, usize)]) -> CategoryCounts {
        pairs
            .iter()
            .map(|(k, c)| (CellValue::String(k.to_string()), *c))
            .collect()
    }

    /// Height in pixels of each run of adjacent `color` columns, left to right.
    fn bar_heights(buf: &[u8], color: RGBColor) -> Vec<usize> {
        let column_height = |x: u32| {
            (0..H)
                .filter(|&y| {
                    let i = ((y * W + x) * 3) as usize;
                    buf[i] == color.0 && buf[i + 1] == color.1 && buf[i + 2] == color.2
                })
                .count()
        };
        let mut bars = Vec::new();
        let mut current = 0;
        for x in 0..W {
            let h = column_height(x);
            if h > 0 {
                current = current.max(h);
            } else if current > 0 {
                bars.push(current);
                current = 0;
            }
        }
        if current > 0 {
            bars.push(current);
        }
        bars
    }

    #[test]
    fn bar_heights_follow_counts() {
        let even = draw_to_buffer(|root| bar_chart(root, "t", "x", "y", &counts(&[("A", 1), ("B", 1)])));
        let even = bar_heights(&even, PRIMARY);
        assert_eq!(even.len(), 2);
        assert!(even[0].abs_diff(even[1]) <= 1, "{even:?}");

        let skew = draw_to_buffer(|root| bar_chart(root, "t", "x", "y", &counts(&[("A", 3), ("B", 2)])));
        let skew = bar_heights(&skew, PRIMARY);
        assert_eq!(skew.len(), 2);
        let ratio = skew[0] as f64 / skew[1] as f64;
        assert!((ratio - 1.5).abs() < 0.05, "{skew:?}");
    }

    #[test]
    fn donut_uses_palette_colours() {
        let buf = draw_to_buffer(|root| donut_chart(root, "t", &counts(&[("Ship", 5), ("Road", 2)])));
        let palette = crate::color::generate_palette(2);
        assert!(count_pixels(&buf, palette[0]) > count_pixels(&buf, palette[1]));
    }

    #[test]
    fn empty_views_still_draw() {
        draw_to_buffer(|root| bar_chart(root, "t", "x", "y", &Vec::new()));
        draw_to_buffer(|root| donut_chart(root, "t", &Vec::new()));
        draw_to_buffer(|root| range_chart(root, "t", &[]));
        draw_to_buffer(|root| histogram_chart(root, "t", &aggregate::histogram(&[], 10)));
    }

    #[test]
    fn range_chart_draws_mean_bar() {
        let stats = vec![GroupStats {
            group: CellValue::String("Ship".into()),
            count: 3,
            mean: 3.0,
            min: 1.0,
            max: 5.0,
        }];
        let buf = draw_to_buffer(|root| range_chart(root, "t", &stats));
        assert!(count_pixels(&buf, PRIMARY) > 0);
    }

    #[test]
    fn histogram_draws_bins() {
        let hist = aggregate::histogram(&[100.0, 200.0, 150.0, 120.0], 10);
        let buf = draw_to_buffer(|root| histogram_chart(root, "t", &hist));
        assert!(count_pixels(&buf, PRIMARY) > 0);
    }
}
