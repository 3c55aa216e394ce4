use super::dates::{empty_string_as_none, optional_date};
use super::normalizer::normalize_text;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Read;

const NO_SUMMARY_REPORT: &str = "no summary report";

/// Why a monitoring project was run. Declaration order is the stacking order in charts,
/// bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    ProactiveMonitoring,
    NoSummaryReport,
    EmergencyResponse,
}

impl ProjectType {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ProactiveMonitoring,
            Self::NoSummaryReport,
            Self::EmergencyResponse,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ProactiveMonitoring => "Proactive monitoring",
            Self::NoSummaryReport => "No summary report",
            Self::EmergencyResponse => "Emergency response",
        }
    }
}

/// One mobile monitoring project, covering one or two trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitoringProject {
    pub start1: Option<NaiveDate>,
    pub end1: Option<NaiveDate>,
    pub start2: Option<NaiveDate>,
    pub end2: Option<NaiveDate>,
    pub emergency_response: Option<String>,
    pub notes: String,
}

impl MonitoringProject {
    /// First matching rule wins: emergency flag, then the notes check, then the default.
    pub fn project_type(&self) -> ProjectType {
        if self.emergency_response.is_some() {
            ProjectType::EmergencyResponse
        } else if normalize_text(&self.notes).contains(NO_SUMMARY_REPORT) {
            ProjectType::NoSummaryReport
        } else {
            ProjectType::ProactiveMonitoring
        }
    }

    /// Inclusive day count across both trips. Spans with the end before the start are kept
    /// as entered, so the result can be negative. Missing dates yield `None`.
    pub fn duration_days(&self) -> Option<i64> {
        let first = inclusive_days(self.start1?, self.end1?);
        match self.start2 {
            None => Some(first),
            Some(start2) => Some(first + inclusive_days(start2, self.end2?)),
        }
    }

    /// Trips whose end date falls before their start date.
    pub fn reversed_spans(&self) -> usize {
        [(self.start1, self.end1), (self.start2, self.end2)]
            .into_iter()
            .filter_map(|(start, end)| Some(inclusive_days(start?, end?)))
            .filter(|days| *days < 1)
            .count()
    }

    pub fn year(&self) -> Option<i32> {
        self.start1.map(|date| date.year())
    }
}

pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub(crate) fn parse_projects<R: Read>(reader: R) -> Result<Vec<MonitoringProject>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut projects = Vec::new();

    for record in csv_reader.deserialize::<ProjectRow>() {
        projects.push(record?.into());
    }

    Ok(projects)
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    #[serde(
        rename = "Start Date 1",
        alias = "start1",
        default,
        deserialize_with = "optional_date"
    )]
    start1: Option<NaiveDate>,
    #[serde(
        rename = "End Date 1",
        alias = "end1",
        default,
        deserialize_with = "optional_date"
    )]
    end1: Option<NaiveDate>,
    #[serde(
        rename = "Start Date 2",
        alias = "start2",
        default,
        deserialize_with = "optional_date"
    )]
    start2: Option<NaiveDate>,
    #[serde(
        rename = "End Date 2",
        alias = "end2",
        default,
        deserialize_with = "optional_date"
    )]
    end2: Option<NaiveDate>,
    #[serde(
        rename = "Emergency Response",
        alias = "emergency_response",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    emergency_response: Option<String>,
    #[serde(rename = "Notes", alias = "notes", default)]
    notes: String,
}

impl From<ProjectRow> for MonitoringProject {
    fn from(row: ProjectRow) -> Self {
        Self {
            start1: row.start1,
            end1: row.end1,
            start2: row.start2,
            end2: row.end2,
            emergency_response: row.emergency_response,
            notes: row.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn project(notes: &str, emergency: Option<&str>) -> MonitoringProject {
        MonitoringProject {
            start1: date(2020, 1, 1),
            end1: date(2020, 1, 10),
            emergency_response: emergency.map(str::to_string),
            notes: notes.to_string(),
            ..MonitoringProject::default()
        }
    }

    #[test]
    fn emergency_flag_takes_precedence_over_notes() {
        let tagged = project("No summary report was written", Some("Yes"));
        assert_eq!(tagged.project_type(), ProjectType::EmergencyResponse);
    }

    #[test]
    fn notes_match_is_case_insensitive() {
        assert_eq!(
            project("Trip cancelled; NO SUMMARY REPORT", None).project_type(),
            ProjectType::NoSummaryReport
        );
        assert_eq!(
            project("no summary\r\nreport on file", None).project_type(),
            ProjectType::NoSummaryReport
        );
        assert_eq!(
            project("Summary report pending", None).project_type(),
            ProjectType::ProactiveMonitoring
        );
    }

    #[test]
    fn single_period_duration_is_inclusive() {
        assert_eq!(project("", None).duration_days(), Some(10));
    }

    #[test]
    fn two_period_duration_sums_both_spans() {
        let two_trips = MonitoringProject {
            start1: date(2015, 1, 1),
            end1: date(2015, 1, 5),
            start2: date(2015, 2, 1),
            end2: date(2015, 2, 3),
            ..MonitoringProject::default()
        };
        assert_eq!(two_trips.duration_days(), Some(8));
        assert_eq!(two_trips.year(), Some(2015));
    }

    #[test]
    fn reversed_span_passes_through_negative() {
        let reversed = MonitoringProject {
            start1: date(2021, 8, 5),
            end1: date(2021, 8, 1),
            ..MonitoringProject::default()
        };
        assert_eq!(reversed.duration_days(), Some(-3));
        assert_eq!(reversed.reversed_spans(), 1);
    }

    #[test]
    fn reversed_second_trip_is_detected_under_positive_total() {
        let project = MonitoringProject {
            start1: date(2019, 5, 1),
            end1: date(2019, 5, 10),
            start2: date(2019, 6, 4),
            end2: date(2019, 6, 2),
            ..MonitoringProject::default()
        };
        assert_eq!(project.duration_days(), Some(9));
        assert_eq!(project.reversed_spans(), 1);
    }

    #[test]
    fn missing_dates_propagate() {
        let open_second_trip = MonitoringProject {
            start1: date(2022, 11, 1),
            end1: date(2022, 11, 2),
            start2: date(2022, 12, 1),
            ..MonitoringProject::default()
        };
        assert_eq!(open_second_trip.duration_days(), None);
        assert_eq!(MonitoringProject::default().duration_days(), None);
        assert_eq!(MonitoringProject::default().year(), None);
    }

    #[test]
    fn parser_reads_optional_columns_and_blank_flags() {
        let csv = "Start Date 1,End Date 1,Emergency Response,Notes\n\
3/2/2015,3/4/2015,  ,routine\n\
not a date,3/4/2015,Yes,\n";
        let projects = parse_projects(Cursor::new(csv)).expect("parse");
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].start1, date(2015, 3, 2));
        assert!(projects[0].start2.is_none());
        assert!(projects[0].emergency_response.is_none());
        assert!(projects[1].start1.is_none());
        assert_eq!(projects[1].project_type(), ProjectType::EmergencyResponse);
    }
}
