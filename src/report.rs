use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use tceq_monitoring::config::AppConfig;
use tceq_monitoring::datasets::Datasets;
use tceq_monitoring::error::AppError;
use tceq_monitoring::render::charts::render_all;
use tceq_monitoring::render::{onsite_table, project_year_table, van_summary_table, SvgChartRenderer};
use tceq_monitoring::report::{MonitoringReport, MonitoringReportSummary};
use tceq_monitoring::telemetry;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RenderArgs {
    /// Directory holding the CSV exports (overrides REPORT_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Directory the SVG charts are written to (overrides REPORT_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Reference date (YYYY-MM-DD); its calendar and fiscal year are treated as incomplete
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// How the summary is printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

/// Where the reference date for the open year came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AsOfSource {
    Flag,
    Environment,
    LatestRecord,
    Today,
}

impl AsOfSource {
    const fn describe(self) -> &'static str {
        match self {
            Self::Flag => "from --as-of",
            Self::Environment => "from REPORT_AS_OF",
            Self::LatestRecord => "latest record date in the data",
            Self::Today => "today's date; no dated records found",
        }
    }
}

pub(crate) fn resolve_as_of(
    flag: Option<NaiveDate>,
    configured: Option<NaiveDate>,
    datasets: &Datasets,
) -> (NaiveDate, AsOfSource) {
    if let Some(date) = flag {
        (date, AsOfSource::Flag)
    } else if let Some(date) = configured {
        (date, AsOfSource::Environment)
    } else if let Some(date) = datasets.latest_record_date() {
        (date, AsOfSource::LatestRecord)
    } else {
        (Local::now().date_naive(), AsOfSource::Today)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        data_dir,
        out_dir,
        as_of,
        format,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(dir) = data_dir {
        config.report.data_dir = dir;
    }
    if let Some(dir) = out_dir {
        config.report.output_dir = dir;
    }

    telemetry::init(&config.telemetry)?;

    info!(?config.environment, "generating monitoring report");
    let datasets = Datasets::load_dir(&config.report.data_dir)?;

    let (as_of, as_of_source) = resolve_as_of(as_of, config.report.as_of, &datasets);
    info!(%as_of, source = as_of_source.describe(), "reference date resolved");

    let report = MonitoringReport::build(&datasets, as_of);
    let summary = report.summary();

    std::fs::create_dir_all(&config.report.output_dir)?;
    let renderer = SvgChartRenderer::new(&config.report.output_dir);
    let charts = render_all(&renderer, &summary)?;

    match format {
        OutputFormat::Text => {
            print_text_report(&summary, as_of_source, &config.report.data_dir, &charts)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn print_text_report(
    summary: &MonitoringReportSummary,
    as_of_source: AsOfSource,
    data_dir: &Path,
    charts: &[PathBuf],
) {
    println!("TCEQ mobile monitoring report");
    println!("Data: {}", data_dir.display());
    println!(
        "As of {} ({}); the open calendar and fiscal year are left out",
        summary.as_of,
        as_of_source.describe()
    );

    if summary.project_years.is_empty() {
        println!("\nMonitoring projects: none");
    } else {
        println!("\nMonitoring projects by year");
        println!("{}", project_year_table(&summary.project_years));
    }

    if summary.onsite_investigations.is_empty() {
        println!("\nOn-site investigations: no fiscal years with both totals and OGI counts");
    } else {
        println!("\nOn-site investigations by fiscal year");
        println!("{}", onsite_table(&summary.onsite_investigations));
    }

    println!("\nRegional monitoring van investigations");
    println!("{}", van_summary_table(&summary.regional_van));

    println!("\nCharts");
    for chart in charts {
        println!("- {}", chart.display());
    }
}
