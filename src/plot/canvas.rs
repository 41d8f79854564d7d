// src/plot/canvas.rs

use crate::table::Series;

/// Dimensions of the character grid a chart draws onto.
#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    /// Plot area width in characters, excluding the y-axis gutter.
    pub width: usize,
    /// Plot area height in rows.
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 72,
            height: 18,
        }
    }
}

/// Glyphs assigned to series in order; a chart with more series than
/// glyphs wraps around.
const GLYPHS: &[char] = &['*', 'o', '+', 'x', '#', '@', '~', '='];

/// Width of the y-axis gutter: a 9-char label, a space, and the axis.
const GUTTER: usize = 11;

/// Draw `series` as one multi-line chart, returned as printable text.
///
/// Points scale linearly into the grid; consecutive points of a series are
/// joined by interpolating across the columns between them. The y axis is
/// labeled at the top, middle, and bottom, the x axis with the tick range,
/// and each series gets a legend line. Series without points are dropped,
/// and a chart with nothing left renders a "(no data)" placeholder.
pub fn line_chart(title: &str, series: &[Series], cfg: ChartConfig) -> String {
    let width = cfg.width.max(2);
    let height = cfg.height.max(2);

    let mut out = String::new();
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(GUTTER + width));
    out.push('\n');

    let drawable: Vec<&Series> = series.iter().filter(|s| !s.points.is_empty()).collect();
    if drawable.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let mut x_min = i64::MAX;
    let mut x_max = i64::MIN;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in &drawable {
        for &(tick, value) in &s.points {
            x_min = x_min.min(tick);
            x_max = x_max.max(tick);
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }

    let mut grid = vec![vec![' '; width]; height];
    for (i, s) in drawable.iter().enumerate() {
        draw_series(&mut grid, s, GLYPHS[i % GLYPHS.len()], (x_min, x_max), (y_min, y_max));
    }

    let y_span = y_max - y_min;
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            fmt_axis(y_max)
        } else if row == height - 1 {
            fmt_axis(y_min)
        } else if row == height / 2 {
            fmt_axis(y_max - y_span * row as f64 / (height - 1) as f64)
        } else {
            String::new()
        };
        out.push_str(&format!("{:>9} |", label));
        out.extend(cells.iter());
        out.push('\n');
    }

    out.push_str(&format!("{:>9} +{}\n", "", "-".repeat(width)));
    out.push_str(&format!("{:>9}  tick {}..{}\n", "", x_min, x_max));

    for (i, s) in drawable.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", GLYPHS[i % GLYPHS.len()], s.label));
    }
    out
}

fn fmt_axis(value: f64) -> String {
    format!("{:.2}", value)
}

fn draw_series(
    grid: &mut [Vec<char>],
    series: &Series,
    glyph: char,
    (x_min, x_max): (i64, i64),
    (y_min, y_max): (f64, f64),
) {
    let height = grid.len();
    let width = grid[0].len();

    // Degenerate ranges (one tick, or a flat line) pin to the middle.
    let col_of = |tick: i64| -> usize {
        if x_max == x_min {
            width / 2
        } else {
            let frac = (tick - x_min) as f64 / (x_max - x_min) as f64;
            ((frac * (width - 1) as f64).round() as usize).min(width - 1)
        }
    };
    let row_of = |value: f64| -> usize {
        if y_max - y_min <= f64::EPSILON {
            height / 2
        } else {
            let frac = (value - y_min) / (y_max - y_min);
            (((1.0 - frac) * (height - 1) as f64).round() as usize).min(height - 1)
        }
    };

    let mut prev: Option<(usize, f64)> = None;
    for &(tick, value) in &series.points {
        let col = col_of(tick);
        if let Some((prev_col, prev_value)) = prev {
            if col > prev_col + 1 {
                let span = (col - prev_col) as f64;
                for c in prev_col + 1..col {
                    let interp =
                        prev_value + (value - prev_value) * (c - prev_col) as f64 / span;
                    grid[row_of(interp)][c] = glyph;
                }
            }
        }
        grid[row_of(value)][col] = glyph;
        prev = Some((col, value));
    }
}
