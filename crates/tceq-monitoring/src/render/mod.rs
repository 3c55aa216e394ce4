pub mod charts;
mod svg;
mod table;

pub use svg::SvgChartRenderer;
pub use table::{onsite_table, project_year_table, van_summary_table};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One stack level of a bar chart. `values` line up with [`ChartSpec::categories`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<i64>,
}

/// Data plus encoding for a stacked bar chart. Series are listed bottom of the stack first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub name: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Lowest and highest stack extents, always including zero.
    pub fn value_range(&self) -> (i64, i64) {
        (0..self.categories.len()).fold((0, 0), |(low, high), index| {
            let (negative, positive) = self.series.iter().fold((0, 0), |(neg, pos), series| {
                let value = series.values.get(index).copied().unwrap_or(0);
                if value < 0 {
                    (neg + value, pos)
                } else {
                    (neg, pos + value)
                }
            });
            (low.min(negative), high.max(positive))
        })
    }
}

/// Turns a chart description into some rendered artifact.
pub trait ChartRenderer {
    type Output;

    fn render(&self, spec: &ChartSpec) -> Result<Self::Output, RenderError>;
}
