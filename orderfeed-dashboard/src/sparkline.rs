use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Geometry of the volume bucket bar chart.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
    pub bar_gap: f64,

    /// Number of most recent buckets displayed.
    pub visible_count: usize,

    /// Minimum value bar heights are normalised against, so small values are not inflated.
    pub height_floor: u64,

    /// Headroom kept above the tallest bar.
    pub top_padding: f64,
}

impl SparklineConfig {
    pub fn bar_width(&self) -> f64 {
        let gaps = self.visible_count.saturating_sub(1) as f64;
        (self.width - self.bar_gap * gaps) / self.visible_count.max(1) as f64
    }

    fn drawable_height(&self) -> f64 {
        self.height - self.top_padding
    }
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 60.0,
            bar_gap: 6.0,
            visible_count: 10,
            height_floor: 150,
            top_padding: 8.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct SparklineBar {
    pub value: u64,

    /// `value / max(displayed values, height_floor)`.
    pub ratio: f64,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,

    /// One-shot "new bar" transition hint.
    pub entering: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SparklineView {
    pub width: f64,
    pub height: f64,
    pub bars: Vec<SparklineBar>,
}

/// Project the most recent volume buckets into bar chart geometry.
///
/// Bars fade in from left to right, the rightmost (newest) bar is always fully opaque and is
/// flagged as `entering` when `newest` is set.
pub fn render_sparkline(buckets: &[u64], config: &SparklineConfig, newest: bool) -> SparklineView {
    let displayed = &buckets[buckets.len().saturating_sub(config.visible_count)..];

    let max = displayed
        .iter()
        .copied()
        .max()
        .unwrap_or_default()
        .max(config.height_floor)
        .max(1) as f64;

    let bar_width = config.bar_width();
    let index_last = displayed.len().saturating_sub(1);

    let bars = displayed
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let is_last = index == index_last;
            let ratio = value as f64 / max;
            let height = ratio * config.drawable_height();

            SparklineBar {
                value,
                ratio,
                x: index as f64 * (bar_width + config.bar_gap),
                y: config.height - height,
                width: bar_width,
                height,
                opacity: if is_last {
                    1.0
                } else {
                    0.3 + (index as f64 / config.visible_count as f64) * 0.7
                },
                entering: newest && is_last,
            }
        })
        .collect();

    SparklineView {
        width: config.width,
        height: config.height,
        bars,
    }
}

impl SparklineView {
    /// Inner `<rect>` markup of the sparkline `<svg>`.
    pub fn to_svg(&self) -> String {
        self.bars
            .iter()
            .map(|bar| {
                format!(
                    r#"<rect class="sparkline-bar{}" x="{}" y="{}" width="{}" height="{}" style="opacity: {}"/>"#,
                    if bar.entering { " entering" } else { "" },
                    bar.x,
                    bar.y,
                    bar.width,
                    bar.height,
                    bar.opacity,
                )
            })
            .join("")
    }

    /// Standalone `<svg>` element containing the bars.
    pub fn to_svg_document(&self) -> String {
        format!(
            r#"<svg id="sparkline" viewBox="0 0 {} {}" preserveAspectRatio="none">{}</svg>"#,
            self.width,
            self.height,
            self.to_svg()
        )
    }
}
