use super::dates::{fiscal_year, optional_date};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// An investigation row from the OGI camera or regional van exports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Investigation {
    #[serde(
        rename = "Status Date",
        alias = "status_date",
        default,
        deserialize_with = "optional_date"
    )]
    pub status_date: Option<NaiveDate>,
    #[serde(rename = "Investigation Number", alias = "investigation_number")]
    pub investigation_number: u64,
}

impl Investigation {
    pub fn fiscal_year(&self) -> Option<i32> {
        self.status_date.map(fiscal_year)
    }
}

/// Pre-aggregated on-site investigation totals released per fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OnSiteInvestigationCount {
    #[serde(rename = "Fiscal Year", alias = "fiscal_year")]
    pub fiscal_year: i32,
    #[serde(rename = "Total", alias = "total_count")]
    pub total_count: i64,
}

/// Keeps the first row seen for each investigation number.
pub fn distinct_by_number(investigations: &[Investigation]) -> Vec<&Investigation> {
    let mut seen: HashSet<u64> = HashSet::new();
    investigations
        .iter()
        .filter(|investigation| seen.insert(investigation.investigation_number))
        .collect()
}

pub(crate) fn parse_investigations<R: Read>(reader: R) -> Result<Vec<Investigation>, csv::Error> {
    read_rows(reader)
}

pub(crate) fn parse_onsite_counts<R: Read>(
    reader: R,
) -> Result<Vec<OnSiteInvestigationCount>, csv::Error> {
    read_rows(reader)
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn investigations_parse_dates_and_numbers() {
        let csv = "Status Date,Investigation Number\n9/1/2022,1002\n,1006\n";
        let rows = parse_investigations(Cursor::new(csv)).expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fiscal_year(), Some(2023));
        assert_eq!(rows[1].investigation_number, 1006);
        assert_eq!(rows[1].fiscal_year(), None);
    }

    #[test]
    fn non_numeric_investigation_number_is_an_error() {
        let csv = "Status Date,Investigation Number\n9/1/2022,pending\n";
        assert!(parse_investigations(Cursor::new(csv)).is_err());
    }

    #[test]
    fn distinct_keeps_first_occurrence() {
        let rows = vec![
            Investigation {
                status_date: NaiveDate::from_ymd_opt(2022, 8, 31),
                investigation_number: 7,
            },
            Investigation {
                status_date: NaiveDate::from_ymd_opt(2022, 9, 30),
                investigation_number: 7,
            },
            Investigation {
                status_date: None,
                investigation_number: 8,
            },
        ];
        let distinct = distinct_by_number(&rows);
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].fiscal_year(), Some(2022));
    }

    #[test]
    fn onsite_counts_accept_snake_case_headers() {
        let csv = "fiscal_year,total_count\n2022,100\n";
        let rows = parse_onsite_counts(Cursor::new(csv)).expect("parse");
        assert_eq!(
            rows,
            vec![OnSiteInvestigationCount {
                fiscal_year: 2022,
                total_count: 100
            }]
        );
    }
}
