use super::{ChartRenderer, ChartSpec, RenderError};
use std::fs;
use std::path::PathBuf;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 190.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const BAR_FILL_RATIO: f64 = 0.7;
const TARGET_TICKS: f64 = 5.0;

/// Writes stacked bar charts as standalone SVG files named after [`ChartSpec::name`].
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    out_dir: PathBuf,
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            width: 800,
            height: 480,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn to_svg(&self, spec: &ChartSpec) -> String {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let plot_left = MARGIN_LEFT;
        let plot_right = (width - MARGIN_RIGHT).max(plot_left + 1.0);
        let plot_top = MARGIN_TOP;
        let plot_bottom = (height - MARGIN_BOTTOM).max(plot_top + 1.0);

        let (low, high) = spec.value_range();
        let axis = Axis::new(low, high);
        let y_of = |value: i64| {
            plot_bottom - (value - axis.min) as f64 / axis.span() as f64 * (plot_bottom - plot_top)
        };

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
            w = self.width,
            h = self.height
        );
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            self.width, self.height
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"32\" font-size=\"18\" text-anchor=\"middle\">{}</text>\n",
            width / 2.0,
            escape(&spec.title)
        ));

        let mut tick = axis.min;
        while tick <= axis.max {
            let y = y_of(tick);
            svg.push_str(&format!(
                "<line x1=\"{plot_left:.1}\" y1=\"{y:.1}\" x2=\"{plot_right:.1}\" y2=\"{y:.1}\" stroke=\"#e0e0e0\"/>\n"
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\">{tick}</text>\n",
                plot_left - 8.0,
                y + 4.0
            ));
            tick += axis.step;
        }

        let band = (plot_right - plot_left) / spec.categories.len().max(1) as f64;
        let bar_width = band * BAR_FILL_RATIO;
        for (index, category) in spec.categories.iter().enumerate() {
            let x = plot_left + index as f64 * band + (band - bar_width) / 2.0;
            let mut positive = 0;
            let mut negative = 0;

            for series in &spec.series {
                let value = series.values.get(index).copied().unwrap_or(0);
                if value == 0 {
                    continue;
                }
                let (from, to) = if value > 0 {
                    positive += value;
                    (positive - value, positive)
                } else {
                    negative += value;
                    (negative, negative - value)
                };
                let top = y_of(to);
                svg.push_str(&format!(
                    "<rect class=\"bar\" data-series=\"{label}\" data-category=\"{category}\" x=\"{x:.1}\" y=\"{top:.1}\" width=\"{bar_width:.1}\" height=\"{height:.1}\" fill=\"{color}\"><title>{label}: {value}</title></rect>\n",
                    label = escape(series.label),
                    category = escape(category),
                    height = y_of(from) - top,
                    color = series.color,
                ));
            }

            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
                x + bar_width / 2.0,
                plot_bottom + 20.0,
                escape(category)
            ));
        }

        let zero = y_of(0);
        svg.push_str(&format!(
            "<line x1=\"{plot_left:.1}\" y1=\"{zero:.1}\" x2=\"{plot_right:.1}\" y2=\"{zero:.1}\" stroke=\"#333333\"/>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"14\" text-anchor=\"middle\">{}</text>\n",
            (plot_left + plot_right) / 2.0,
            height - 20.0,
            escape(spec.x_label)
        ));
        svg.push_str(&format!(
            "<text x=\"20\" y=\"{y:.1}\" font-size=\"14\" text-anchor=\"middle\" transform=\"rotate(-90 20 {y:.1})\">{}</text>\n",
            escape(spec.y_label),
            y = (plot_top + plot_bottom) / 2.0
        ));

        // Legend lists the top of the stack first so it reads like the bars.
        for (row, series) in spec.series.iter().rev().enumerate() {
            let y = plot_top + row as f64 * 22.0;
            svg.push_str(&format!(
                "<rect x=\"{:.1}\" y=\"{y:.1}\" width=\"14\" height=\"14\" fill=\"{}\"/>\n",
                plot_right + 20.0,
                series.color
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{}</text>\n",
                plot_right + 40.0,
                y + 12.0,
                escape(series.label)
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl ChartRenderer for SvgChartRenderer {
    type Output = PathBuf;

    fn render(&self, spec: &ChartSpec) -> Result<PathBuf, RenderError> {
        let path = self.out_dir.join(format!("{}.svg", spec.name));
        match fs::write(&path, self.to_svg(spec)) {
            Ok(()) => Ok(path),
            Err(source) => Err(RenderError::Io { path, source }),
        }
    }
}

/// Y axis bounds snapped outward to a 1/2/5 step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Axis {
    min: i64,
    max: i64,
    step: i64,
}

impl Axis {
    fn new(low: i64, high: i64) -> Self {
        let step = nice_step(high - low);
        let min = low.div_euclid(step) * step;
        let mut max = -(-high).div_euclid(step) * step;
        if max == min {
            max = min + step;
        }
        Self { min, max, step }
    }

    fn span(&self) -> i64 {
        self.max - self.min
    }
}

fn nice_step(span: i64) -> i64 {
    if span <= 0 {
        return 1;
    }
    let raw = span as f64 / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let multiplier = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    ((multiplier * magnitude).round() as i64).max(1)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
