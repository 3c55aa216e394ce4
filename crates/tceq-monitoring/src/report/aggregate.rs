use crate::datasets::{
    distinct_by_number, Investigation, MonitoringProject, OnSiteInvestigationCount, ProjectType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTally {
    pub projects: usize,
    pub monitoring_days: i64,
}

/// Projects grouped by calendar year and type, complete years only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectTallies {
    pub by_year: BTreeMap<(i32, ProjectType), ProjectTally>,
    /// Rows without a usable start date.
    pub skipped: usize,
    /// Rows counted as projects whose duration could not be computed.
    pub missing_duration: usize,
    /// Trips, in counted projects, that end before they start.
    pub reversed_spans: usize,
}

pub fn tally_projects(projects: &[MonitoringProject], before_year: i32) -> ProjectTallies {
    let mut tallies = ProjectTallies::default();

    for project in projects {
        let Some(year) = project.year() else {
            tallies.skipped += 1;
            continue;
        };
        if year >= before_year {
            continue;
        }

        let tally = tallies
            .by_year
            .entry((year, project.project_type()))
            .or_default();
        tally.projects += 1;

        let reversed = project.reversed_spans();
        if reversed > 0 {
            warn!(
                year,
                reversed,
                days = ?project.duration_days(),
                "monitoring trip ends before it starts"
            );
            tallies.reversed_spans += reversed;
        }

        match project.duration_days() {
            Some(days) => tally.monitoring_days += days,
            None => tallies.missing_duration += 1,
        }
    }

    if tallies.skipped > 0 {
        debug!(skipped = tallies.skipped, "projects without a start date left out");
    }

    tallies
}

/// Distinct OGI investigations per fiscal year, complete fiscal years only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FiscalYearCounts {
    pub counts: BTreeMap<i32, usize>,
    pub duplicates: usize,
    pub undated: usize,
}

pub fn count_by_fiscal_year(
    investigations: &[Investigation],
    before_fiscal_year: i32,
) -> FiscalYearCounts {
    let distinct = distinct_by_number(investigations);
    let mut result = FiscalYearCounts {
        duplicates: investigations.len() - distinct.len(),
        ..FiscalYearCounts::default()
    };

    for investigation in distinct {
        match investigation.fiscal_year() {
            Some(fiscal_year) if fiscal_year < before_fiscal_year => {
                *result.counts.entry(fiscal_year).or_default() += 1;
            }
            Some(_) => {}
            None => result.undated += 1,
        }
    }

    result
}

/// Stack levels for the on-site investigation chart, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationCategory {
    Other,
    OgiCamera,
}

impl InvestigationCategory {
    pub const fn ordered() -> [Self; 2] {
        [Self::Other, Self::OgiCamera]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Other => "Other",
            Self::OgiCamera => "OGI camera",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYearBreakdown {
    pub fiscal_year: i32,
    pub total: i64,
    pub ogi_camera: i64,
    pub other: i64,
}

impl FiscalYearBreakdown {
    pub fn new(fiscal_year: i32, total: i64, ogi_camera: i64) -> Self {
        Self {
            fiscal_year,
            total,
            ogi_camera,
            other: total - ogi_camera,
        }
    }

    pub fn count(&self, category: InvestigationCategory) -> i64 {
        match category {
            InvestigationCategory::Other => self.other,
            InvestigationCategory::OgiCamera => self.ogi_camera,
        }
    }
}

/// Inner join of released totals against OGI counts. Totals repeated for a fiscal year are
/// summed first.
pub fn decompose_onsite(
    totals: &[OnSiteInvestigationCount],
    ogi: &BTreeMap<i32, usize>,
) -> Vec<FiscalYearBreakdown> {
    let mut by_year: BTreeMap<i32, i64> = BTreeMap::new();
    for row in totals {
        *by_year.entry(row.fiscal_year).or_default() += row.total_count;
    }

    by_year
        .into_iter()
        .filter_map(|(fiscal_year, total)| match ogi.get(&fiscal_year) {
            Some(&count) => Some(FiscalYearBreakdown::new(fiscal_year, total, count as i64)),
            None => {
                debug!(fiscal_year, "no OGI count for fiscal year; dropped from join");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VanSummary {
    pub distinct_investigations: usize,
    pub first_status_date: Option<NaiveDate>,
    pub last_status_date: Option<NaiveDate>,
}

pub fn summarize_van(investigations: &[Investigation]) -> VanSummary {
    let dates = investigations.iter().filter_map(|row| row.status_date);
    VanSummary {
        distinct_investigations: distinct_by_number(investigations).len(),
        first_status_date: dates.clone().min(),
        last_status_date: dates.max(),
    }
}
