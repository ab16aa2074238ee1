use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

categorical! {
    /// Lifecycle status of a grant.
    pub enum GrantStatus {
        Active => "Active",
        Pending => "Pending",
        Closed => "Closed",
        Archived => "Archived",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: String,
    pub title: String,
    pub funder: String,
    pub region: String,
    pub status: GrantStatus,
    pub amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub program_officer: Option<String>,
}

impl Grant {
    /// Closed and archived grants belong to the archive view.
    pub fn is_archived(&self) -> bool {
        matches!(self.status, GrantStatus::Closed | GrantStatus::Archived)
    }

    /// Whole months between start and end date.
    pub fn duration_months(&self) -> i64 {
        let days = (self.end_date - self.start_date).num_days().max(0);
        // Round to the nearest month
        (days + 15) / 30
    }

    pub fn period_display(&self) -> String {
        format!(
            "{} – {}",
            self.start_date.format("%b %Y"),
            self.end_date.format("%b %Y")
        )
    }

    pub fn officer(&self) -> &str {
        self.program_officer.as_deref().unwrap_or("-")
    }
}

impl Record for Grant {
    fn id(&self) -> &str {
        &self.id
    }
}
