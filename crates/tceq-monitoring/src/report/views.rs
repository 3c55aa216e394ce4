use super::aggregate::InvestigationCategory;
use crate::datasets::ProjectType;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectYearEntry {
    pub year: i32,
    pub project_type: ProjectType,
    pub project_type_label: &'static str,
    pub projects: usize,
    pub monitoring_days: i64,
}

/// One row of the long-form on-site breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct FiscalYearEntry {
    pub fiscal_year: i32,
    pub category: InvestigationCategory,
    pub category_label: &'static str,
    pub investigations: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VanSummaryView {
    pub distinct_investigations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_status_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitoringReportSummary {
    pub as_of: NaiveDate,
    pub project_years: Vec<ProjectYearEntry>,
    pub onsite_investigations: Vec<FiscalYearEntry>,
    pub regional_van: VanSummaryView,
}
