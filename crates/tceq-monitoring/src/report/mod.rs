mod aggregate;
mod summary;
pub mod views;

pub use aggregate::{
    count_by_fiscal_year, decompose_onsite, summarize_van, tally_projects, FiscalYearBreakdown,
    FiscalYearCounts, InvestigationCategory, ProjectTallies, ProjectTally, VanSummary,
};
pub use summary::MonitoringReport;
pub use views::MonitoringReportSummary;
