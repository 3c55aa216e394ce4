mod dates;
mod investigations;
mod monitoring;
mod normalizer;

pub use dates::{fiscal_year, parse_record_date, FISCAL_YEAR_START_MONTH, MIN_RECORD_YEAR};
pub use investigations::{distinct_by_number, Investigation, OnSiteInvestigationCount};
pub use monitoring::{inclusive_days, MonitoringProject, ProjectType};

use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MONITORING_PROJECTS_FILE: &str = "monitoring_projects.csv";
pub const OGI_INVESTIGATIONS_FILE: &str = "ogi_investigations.csv";
pub const ONSITE_COUNTS_FILE: &str = "onsite_investigation_counts.csv";
pub const REGIONAL_VAN_FILE: &str = "regional_van_investigations.csv";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV data in {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Every record set the report draws on, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub projects: Vec<MonitoringProject>,
    pub ogi_investigations: Vec<Investigation>,
    pub onsite_counts: Vec<OnSiteInvestigationCount>,
    pub van_investigations: Vec<Investigation>,
}

impl Datasets {
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        info!(data_dir = %dir.display(), "loading datasets");

        let datasets = Self {
            projects: load_file(dir.join(MONITORING_PROJECTS_FILE), monitoring::parse_projects)?,
            ogi_investigations: load_file(
                dir.join(OGI_INVESTIGATIONS_FILE),
                investigations::parse_investigations,
            )?,
            onsite_counts: load_file(
                dir.join(ONSITE_COUNTS_FILE),
                investigations::parse_onsite_counts,
            )?,
            van_investigations: load_file(
                dir.join(REGIONAL_VAN_FILE),
                investigations::parse_investigations,
            )?,
        };

        info!(
            projects = datasets.projects.len(),
            ogi_investigations = datasets.ogi_investigations.len(),
            onsite_counts = datasets.onsite_counts.len(),
            van_investigations = datasets.van_investigations.len(),
            "datasets loaded"
        );

        Ok(datasets)
    }

    /// Latest date found in any dated column. A records release stops partway through the
    /// year containing this date.
    pub fn latest_record_date(&self) -> Option<NaiveDate> {
        let project_dates = self.projects.iter().flat_map(|project| {
            [project.start1, project.end1, project.start2, project.end2]
                .into_iter()
                .flatten()
        });
        let status_dates = self
            .ogi_investigations
            .iter()
            .chain(&self.van_investigations)
            .filter_map(|investigation| investigation.status_date);

        project_dates.chain(status_dates).max()
    }
}

fn load_file<T, F>(path: PathBuf, parse: F) -> Result<Vec<T>, DatasetError>
where
    F: FnOnce(File) -> Result<Vec<T>, csv::Error>,
{
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(DatasetError::Io { path, source }),
    };

    match parse(file) {
        Ok(rows) => {
            debug!(path = %path.display(), rows = rows.len(), "parsed dataset");
            Ok(rows)
        }
        Err(source) => Err(DatasetError::Csv { path, source }),
    }
}
