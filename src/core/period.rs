use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FacturaError;

/// A reporting month (SAF-T periods are monthly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub struct ReportingPeriod {
    year: i32,
    month: u32,
}

impl ReportingPeriod {
    /// Create a period. `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, FacturaError> {
        if !(1..=12).contains(&month) {
            return Err(FacturaError::Period(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FacturaError::Period(format!("year {year} out of range")));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Actual last day of the month (28–31).
    pub fn end_date(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `MM/YYYY`, as shown in the submission archive.
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[derive(Serialize, Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for ReportingPeriod {
    type Error = FacturaError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl From<ReportingPeriod> for RawPeriod {
    fn from(p: ReportingPeriod) -> Self {
        Self {
            year: p.year,
            month: p.month,
        }
    }
}
