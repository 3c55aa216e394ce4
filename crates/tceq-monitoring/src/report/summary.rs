use super::aggregate::{
    count_by_fiscal_year, decompose_onsite, summarize_van, tally_projects, FiscalYearBreakdown,
    FiscalYearCounts, InvestigationCategory, ProjectTallies, VanSummary,
};
use super::views::{FiscalYearEntry, MonitoringReportSummary, ProjectYearEntry, VanSummaryView};
use crate::datasets::{fiscal_year, Datasets};
use chrono::{Datelike, NaiveDate};
use tracing::info;

#[derive(Debug, Clone)]
pub struct MonitoringReport {
    pub as_of: NaiveDate,
    pub projects: ProjectTallies,
    pub ogi: FiscalYearCounts,
    pub onsite: Vec<FiscalYearBreakdown>,
    pub van: VanSummary,
}

impl MonitoringReport {
    /// Aggregates every dataset. The calendar and fiscal years containing `as_of` are still
    /// open and are left out of the time series.
    pub fn build(datasets: &Datasets, as_of: NaiveDate) -> Self {
        let projects = tally_projects(&datasets.projects, as_of.year());
        let ogi = count_by_fiscal_year(&datasets.ogi_investigations, fiscal_year(as_of));
        let onsite = decompose_onsite(&datasets.onsite_counts, &ogi.counts);
        let van = summarize_van(&datasets.van_investigations);

        info!(
            %as_of,
            project_groups = projects.by_year.len(),
            skipped_projects = projects.skipped,
            ogi_duplicates = ogi.duplicates,
            ogi_undated = ogi.undated,
            onsite_years = onsite.len(),
            van_investigations = van.distinct_investigations,
            "report aggregated"
        );

        Self {
            as_of,
            projects,
            ogi,
            onsite,
            van,
        }
    }

    pub fn summary(&self) -> MonitoringReportSummary {
        let project_years = self
            .projects
            .by_year
            .iter()
            .map(|(&(year, project_type), tally)| ProjectYearEntry {
                year,
                project_type,
                project_type_label: project_type.label(),
                projects: tally.projects,
                monitoring_days: tally.monitoring_days,
            })
            .collect();

        let onsite_investigations = self
            .onsite
            .iter()
            .flat_map(|breakdown| {
                InvestigationCategory::ordered()
                    .into_iter()
                    .map(move |category| FiscalYearEntry {
                        fiscal_year: breakdown.fiscal_year,
                        category,
                        category_label: category.label(),
                        investigations: breakdown.count(category),
                    })
            })
            .collect();

        MonitoringReportSummary {
            as_of: self.as_of,
            project_years,
            onsite_investigations,
            regional_van: VanSummaryView {
                distinct_investigations: self.van.distinct_investigations,
                first_status_date: self.van.first_status_date,
                last_status_date: self.van.last_status_date,
            },
        }
    }
}
