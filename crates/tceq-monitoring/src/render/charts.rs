use super::{ChartRenderer, ChartSeries, ChartSpec, RenderError};
use crate::datasets::ProjectType;
use crate::report::views::{FiscalYearEntry, MonitoringReportSummary, ProjectYearEntry};
use crate::report::InvestigationCategory;
use tracing::info;

pub const PROJECTS_PER_YEAR: &str = "projects_per_year";
pub const MONITORING_DAYS_PER_YEAR: &str = "monitoring_days_per_year";
pub const ONSITE_INVESTIGATIONS: &str = "onsite_investigations";

const fn project_color(project_type: ProjectType) -> &'static str {
    match project_type {
        ProjectType::ProactiveMonitoring => "#1b9e77",
        ProjectType::NoSummaryReport => "#d95f02",
        ProjectType::EmergencyResponse => "#7570b3",
    }
}

const fn category_color(category: InvestigationCategory) -> &'static str {
    match category {
        InvestigationCategory::Other => "#bdbdbd",
        InvestigationCategory::OgiCamera => "#e6550d",
    }
}

/// Every year from the first to the last one present, so gaps in the record show as empty
/// bars instead of being closed up.
fn year_span(years: impl Iterator<Item = i32> + Clone) -> Vec<i32> {
    match (years.clone().min(), years.max()) {
        (Some(first), Some(last)) => (first..=last).collect(),
        _ => Vec::new(),
    }
}

pub fn projects_per_year(entries: &[ProjectYearEntry]) -> ChartSpec {
    project_chart(
        PROJECTS_PER_YEAR,
        "Mobile monitoring projects per year",
        "Projects",
        entries,
        |entry| entry.projects as i64,
    )
}

pub fn monitoring_days_per_year(entries: &[ProjectYearEntry]) -> ChartSpec {
    project_chart(
        MONITORING_DAYS_PER_YEAR,
        "Days spent on mobile monitoring per year",
        "Days",
        entries,
        |entry| entry.monitoring_days,
    )
}

fn project_chart(
    name: &'static str,
    title: &str,
    y_label: &'static str,
    entries: &[ProjectYearEntry],
    value: impl Fn(&ProjectYearEntry) -> i64,
) -> ChartSpec {
    let years = year_span(entries.iter().map(|entry| entry.year));

    let series = ProjectType::ordered()
        .into_iter()
        .map(|project_type| ChartSeries {
            label: project_type.label(),
            color: project_color(project_type),
            values: years
                .iter()
                .map(|year| {
                    entries
                        .iter()
                        .filter(|entry| entry.year == *year && entry.project_type == project_type)
                        .map(&value)
                        .sum()
                })
                .collect(),
        })
        .collect();

    ChartSpec {
        name,
        title: title.to_string(),
        x_label: "Year",
        y_label,
        categories: years.iter().map(i32::to_string).collect(),
        series,
    }
}

pub fn onsite_investigations(entries: &[FiscalYearEntry]) -> ChartSpec {
    let fiscal_years = year_span(entries.iter().map(|entry| entry.fiscal_year));

    let series = InvestigationCategory::ordered()
        .into_iter()
        .map(|category| ChartSeries {
            label: category.label(),
            color: category_color(category),
            values: fiscal_years
                .iter()
                .map(|fiscal_year| {
                    entries
                        .iter()
                        .filter(|entry| {
                            entry.fiscal_year == *fiscal_year && entry.category == category
                        })
                        .map(|entry| entry.investigations)
                        .sum()
                })
                .collect(),
        })
        .collect();

    ChartSpec {
        name: ONSITE_INVESTIGATIONS,
        title: "On-site investigations using OGI cameras".to_string(),
        x_label: "Fiscal year",
        y_label: "Investigations",
        categories: fiscal_years.iter().map(|year| format!("FY{year}")).collect(),
        series,
    }
}

pub fn report_charts(summary: &MonitoringReportSummary) -> Vec<ChartSpec> {
    vec![
        projects_per_year(&summary.project_years),
        monitoring_days_per_year(&summary.project_years),
        onsite_investigations(&summary.onsite_investigations),
    ]
}

/// Renders every chart the report carries, in a fixed order.
pub fn render_all<R: ChartRenderer>(
    renderer: &R,
    summary: &MonitoringReportSummary,
) -> Result<Vec<R::Output>, RenderError> {
    report_charts(summary)
        .iter()
        .map(|spec| -> Result<R::Output, RenderError> {
            let output = renderer.render(spec)?;
            info!(chart = spec.name, "chart rendered");
            Ok(output)
        })
        .collect()
}
